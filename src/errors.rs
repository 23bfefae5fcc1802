//! Error types for API calls and wire decoding.

use serde::Deserialize;
use thiserror::Error;

/// Errors returned by connection setup and retrieval operations.
#[derive(Debug, Error)]
pub enum Error {
    /// An airport identifier argument was empty.
    #[error("empty airport name")]
    EmptyAirportName,
    /// An aircraft identifier argument was empty.
    #[error("empty aircraft name")]
    EmptyAircraftName,
    /// A timestamp argument was outside the accepted range.
    #[error("invalid unix time")]
    InvalidUnixTime,
    /// The configured base address does not parse into a valid endpoint.
    #[error("unable to connect to api: invalid url {url}: {source}")]
    Connection {
        url: String,
        #[source]
        source: url::ParseError,
    },
    /// Network-level failure issuing the request. Never retried.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// A success-status body could not be deserialized into the expected
    /// shape. Carries the raw body text for diagnosis.
    #[error("unmarshalling response body {body:?}: {source}")]
    Decode {
        body: String,
        #[source]
        source: serde_json::Error,
    },
    /// A positional wire array failed a count or type check.
    #[error(transparent)]
    Field(#[from] DecodeError),
    /// Non-success HTTP status with a decoded service error payload.
    #[error("service error ({status}): {message}")]
    Service {
        status: u16,
        message: String,
        /// Machine-readable root cause, populated for the conflict (409)
        /// error shape when the service provides one.
        cause: Option<String>,
    },
}

/// Field-level failures from the positional array decoders.
///
/// Every slot of a state vector or waypoint array has one documented
/// expectation (wire type, required or optional-by-null); a violation is
/// reported against the slot's field name together with the offending raw
/// value.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DecodeError {
    #[error("invalid state vector data count: {0}")]
    StateVectorLength(usize),
    #[error("invalid waypoint data count: {0}")]
    WaypointLength(usize),
    #[error("state vector {field} assertion failed: {value}")]
    StateVectorField {
        field: &'static str,
        value: serde_json::Value,
    },
    #[error("waypoint {field} assertion failed: {value}")]
    WaypointField {
        field: &'static str,
        value: serde_json::Value,
    },
}

/// Error payload returned by the service on non-success statuses.
///
/// The `cause` field is only present in the extended shape used by the
/// distinguished conflict (409) response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceErrorBody {
    #[serde(default)]
    pub message: String,
    #[serde(rename = "response", default)]
    pub response_code: Option<u16>,
    #[serde(default)]
    pub cause: Option<String>,
}
