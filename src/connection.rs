//! HTTP connection to the OpenSky Network API.

use base64::Engine;
use reqwest::{header, Client};
use url::Url;

use crate::errors::Error;
use crate::response::ApiResponse;

/// Root of the OpenSky Network REST API.
pub const OPENSKY_API_URL: &str = "https://opensky-network.org/api";

/// Query parameters for one request, in insertion order. Keys may repeat
/// (e.g. `icao24`).
pub(crate) type QueryParams = Vec<(&'static str, String)>;

/// A connection to the API: base address, optional credential, and a
/// reusable transport. Immutable after construction, so one connection can
/// be shared freely across tasks issuing concurrent requests.
#[derive(Debug, Clone)]
pub struct Connection {
    uri: Url,
    auth: Option<String>,
    client: Client,
}

impl Connection {
    /// Open a connection to the default API root. Anonymous when `username`
    /// is `None`.
    pub fn new(username: Option<&str>, password: Option<&str>) -> Result<Self, Error> {
        Self::with_base_url(OPENSKY_API_URL, username, password)
    }

    /// Open a connection to a specific API root. Fails if the address does
    /// not parse into a valid endpoint.
    pub fn with_base_url(
        base_url: &str,
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<Self, Error> {
        let uri = Url::parse(base_url).map_err(|source| Error::Connection {
            url: base_url.to_string(),
            source,
        })?;

        // Basic credential is encoded once and reused for every request.
        let auth = username.map(|user| {
            let pass = password.unwrap_or_default();
            base64::engine::general_purpose::STANDARD.encode(format!("{user}:{pass}"))
        });

        Ok(Self {
            uri,
            auth,
            client: Client::new(),
        })
    }

    /// Issue a GET request against an endpoint path (e.g. `/states/all`).
    pub(crate) async fn get(
        &self,
        endpoint: &str,
        params: &QueryParams,
    ) -> Result<ApiResponse, Error> {
        let url = format!("{}{}", self.uri.as_str().trim_end_matches('/'), endpoint);

        let mut request = self.client.get(&url);
        if !params.is_empty() {
            tracing::debug!("request params: {:?}", params);
            request = request.query(params);
        }

        if let Some(ref auth) = self.auth {
            tracing::debug!("setting authorization");
            request = request.header(header::AUTHORIZATION, format!("Basic {auth}"));
        }

        tracing::debug!("do get request: {}", url);

        let response = request.send().await?;

        Ok(ApiResponse::new(response))
    }

    #[cfg(test)]
    pub(crate) fn auth(&self) -> Option<&str> {
        self.auth.as_deref()
    }

    #[cfg(test)]
    pub(crate) fn base_url(&self) -> &str {
        self.uri.as_str()
    }
}

/// Render a float query value with six decimal places, matching the
/// service's accepted coordinate format.
pub(crate) fn float_to_string(value: f64) -> String {
    format!("{value:.6}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_base_url() {
        let err = Connection::with_base_url("not a url", None, None).unwrap_err();
        assert!(matches!(err, Error::Connection { .. }));
    }

    #[test]
    fn test_anonymous_connection_has_no_credential() {
        let conn = Connection::new(None, Some("ignored")).unwrap();
        assert_eq!(conn.auth(), None);
        assert_eq!(conn.base_url(), "https://opensky-network.org/api");
    }

    #[test]
    fn test_credential_encoded_once() {
        let conn = Connection::new(Some("user"), Some("pass")).unwrap();
        // base64("user:pass")
        assert_eq!(conn.auth(), Some("dXNlcjpwYXNz"));

        let no_pass = Connection::new(Some("user"), None).unwrap();
        // base64("user:")
        assert_eq!(no_pass.auth(), Some("dXNlcjo="));
    }

    #[test]
    fn test_float_to_string() {
        assert_eq!(float_to_string(3.14), "3.140000");
        assert_eq!(float_to_string(1.0), "1.000000");
        assert_eq!(float_to_string(2.1), "2.100000");
    }
}
