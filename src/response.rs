//! Response envelope: HTTP status classification and body decoding.

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::errors::{Error, ServiceErrorBody};

/// Wraps one raw HTTP response. The body is drained exactly once, by the
/// consuming [`process`](ApiResponse::process) / [`consume`](ApiResponse::consume)
/// methods, on every exit path.
#[derive(Debug)]
pub struct ApiResponse {
    response: Response,
}

impl ApiResponse {
    pub(crate) fn new(response: Response) -> Self {
        Self { response }
    }

    /// HTTP status code of the wrapped response.
    pub fn status(&self) -> StatusCode {
        self.response.status()
    }

    /// 1xx status.
    pub fn is_informational(&self) -> bool {
        self.response.status().as_u16() / 100 == 1
    }

    /// 2xx status.
    pub fn is_success(&self) -> bool {
        self.response.status().as_u16() / 100 == 2
    }

    /// 3xx status.
    pub fn is_redirection(&self) -> bool {
        self.response.status().as_u16() / 100 == 3
    }

    /// 4xx status.
    pub fn is_client_error(&self) -> bool {
        self.response.status().as_u16() / 100 == 4
    }

    /// 5xx status.
    pub fn is_server_error(&self) -> bool {
        self.response.status().as_u16() / 100 == 5
    }

    /// HTTP 409, the one status whose error payload carries an extended
    /// shape with a machine-readable cause.
    pub fn is_conflict_error(&self) -> bool {
        self.response.status() == StatusCode::CONFLICT
    }

    /// Drain the body and decode it according to the status class.
    ///
    /// Success and redirection bodies deserialize into `T` (`Ok(Some)`);
    /// informational responses decode nothing (`Ok(None)`); any error status
    /// yields [`Error::Service`] built from the decoded error payload.
    pub async fn process<T: DeserializeOwned>(self) -> Result<Option<T>, Error> {
        let status = self.response.status();
        let body = self.response.bytes().await?;

        process_body(status, &body)
    }

    /// Drain the body and classify the status without decoding a success
    /// payload. For callers that only care whether the request succeeded,
    /// e.g. probing an endpoint or credentials before issuing real queries.
    pub async fn consume(self) -> Result<(), Error> {
        let status = self.response.status();
        let body = self.response.bytes().await?;

        process_body::<serde::de::IgnoredAny>(status, &body).map(|_| ())
    }
}

/// Status classification and body decoding, independent of the transport.
pub(crate) fn process_body<T: DeserializeOwned>(
    status: StatusCode,
    body: &[u8],
) -> Result<Option<T>, Error> {
    let class = status.as_u16() / 100;

    if class == 2 || class == 3 {
        let decoded = serde_json::from_slice(body).map_err(|source| Error::Decode {
            body: String::from_utf8_lossy(body).into_owned(),
            source,
        })?;

        return Ok(Some(decoded));
    }

    if class == 1 {
        return Ok(None);
    }

    // Error statuses carry a JSON payload with a human-readable message;
    // 409 additionally carries a machine-readable cause.
    let payload: ServiceErrorBody =
        serde_json::from_slice(body).map_err(|source| Error::Decode {
            body: String::from_utf8_lossy(body).into_owned(),
            source,
        })?;

    let cause = if status == StatusCode::CONFLICT {
        payload.cause
    } else {
        None
    };

    Err(Error::Service {
        status: payload.response_code.unwrap_or(status.as_u16()),
        message: payload.message,
        cause,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FlightData;

    #[test]
    fn test_success_body_decodes() {
        let body = br#"[{"icao24": "c060b9", "firstSeen": 1, "lastSeen": 2}]"#;
        let flights: Option<Vec<FlightData>> =
            process_body(StatusCode::OK, body).unwrap();

        let flights = flights.unwrap();
        assert_eq!(flights.len(), 1);
        assert_eq!(flights[0].icao24, "c060b9");
    }

    #[test]
    fn test_redirection_decodes_like_success() {
        let body = br#"[]"#;
        let flights: Option<Vec<FlightData>> =
            process_body(StatusCode::MULTIPLE_CHOICES, body).unwrap();
        assert_eq!(flights.unwrap().len(), 0);
    }

    #[test]
    fn test_informational_decodes_nothing() {
        let decoded: Option<Vec<FlightData>> =
            process_body(StatusCode::CONTINUE, b"").unwrap();
        assert!(decoded.is_none());
    }

    #[test]
    fn test_success_decode_failure_preserves_body() {
        let body = b"{'a': 2}";
        let err = process_body::<Vec<FlightData>>(StatusCode::OK, body).unwrap_err();

        match err {
            Error::Decode { body, .. } => assert_eq!(body, "{'a': 2}"),
            other => panic!("expected decode error, got {other:?}"),
        }
    }

    #[test]
    fn test_error_status_decodes_service_payload() {
        let body = br#"{"message": "no flight found", "response": 404}"#;
        let err = process_body::<Vec<FlightData>>(StatusCode::NOT_FOUND, body).unwrap_err();

        match err {
            Error::Service {
                status,
                message,
                cause,
            } => {
                assert_eq!(status, 404);
                assert_eq!(message, "no flight found");
                assert_eq!(cause, None);
            }
            other => panic!("expected service error, got {other:?}"),
        }
    }

    #[test]
    fn test_server_error_decodes_service_payload() {
        let body = br#"{"message": "internal error", "response": 500}"#;
        let err =
            process_body::<Vec<FlightData>>(StatusCode::INTERNAL_SERVER_ERROR, body).unwrap_err();
        assert!(matches!(err, Error::Service { status: 500, .. }));
    }

    #[test]
    fn test_conflict_carries_cause() {
        let body = br#"{"cause": "duplicate request", "message": "conflict", "response": 409}"#;
        let err = process_body::<Vec<FlightData>>(StatusCode::CONFLICT, body).unwrap_err();

        match err {
            Error::Service { status, cause, .. } => {
                assert_eq!(status, 409);
                assert_eq!(cause.as_deref(), Some("duplicate request"));
            }
            other => panic!("expected service error, got {other:?}"),
        }
    }

    fn api_response(status: u16, body: &str) -> ApiResponse {
        let response = http::Response::builder()
            .status(status)
            .body(body.to_string())
            .unwrap();

        ApiResponse::new(reqwest::Response::from(response))
    }

    #[tokio::test]
    async fn test_consume_accepts_success_status() {
        let response = api_response(200, r#"{"time": 1}"#);
        assert!(response.is_success());
        response.consume().await.unwrap();
    }

    #[tokio::test]
    async fn test_consume_classifies_error_status() {
        let response = api_response(404, r#"{"message": "no flight found", "response": 404}"#);
        assert!(response.is_client_error());

        let err = response.consume().await.unwrap_err();
        match err {
            Error::Service {
                status, message, ..
            } => {
                assert_eq!(status, 404);
                assert_eq!(message, "no flight found");
            }
            other => panic!("expected service error, got {other:?}"),
        }
    }

    #[test]
    fn test_cause_ignored_outside_conflict() {
        let body = br#"{"cause": "noise", "message": "bad request", "response": 400}"#;
        let err = process_body::<Vec<FlightData>>(StatusCode::BAD_REQUEST, body).unwrap_err();

        match err {
            Error::Service { cause, .. } => assert_eq!(cause, None),
            other => panic!("expected service error, got {other:?}"),
        }
    }
}
