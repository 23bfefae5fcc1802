//! Client library for the OpenSky Network flight telemetry API.
//!
//! This library provides functionality to:
//! - Retrieve live or historical aircraft state vectors
//! - Retrieve flight records by airport, aircraft or time interval
//! - Retrieve the recorded trajectory (track) of a flight
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │ Retrieval   │───▶│ Connection  │───▶│  Envelope   │
//! │ operations  │    │ (HTTP GET)  │    │ (classify)  │
//! └─────────────┘    └─────────────┘    └─────────────┘
//!        ▲                                     │
//!        │            ┌─────────────┐          │
//!        └────────────│ Positional  │◀─────────┘
//!                     │  decoders   │
//!                     └─────────────┘
//! ```
//!
//! State vectors and track waypoints arrive as positional JSON arrays of
//! heterogeneous values; the decoders turn them into typed records,
//! reporting a field-specific error for every count or type violation.
//! Flight records carry named fields and deserialize directly.
//!
//! # Example
//!
//! ```no_run
//! use flightwire::{get_states, Connection, StateQuery};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let conn = Connection::new(None, None)?;
//!
//!     let states = get_states(&conn, &StateQuery::new()).await?;
//!     for state in &states.states {
//!         println!("{} ({})", state.icao24, state.origin_country);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! Every operation is a single request/response cycle: no caching, no
//! retries, no background tasks. A [`Connection`] is immutable after
//! construction and safe to share across concurrent tasks.

pub mod connection;
pub mod errors;
pub mod flights;
pub mod response;
pub mod states;
pub mod tracks;
pub mod types;

pub use connection::{Connection, OPENSKY_API_URL};
pub use errors::{DecodeError, Error};
pub use flights::{
    get_arrivals_by_airport, get_departures_by_airport, get_flights_by_aircraft,
    get_flights_by_interval,
};
pub use response::ApiResponse;
pub use states::{decode_state_vector, get_states, DecodePolicy, StateQuery};
pub use tracks::{decode_waypoint, get_track_by_aircraft};
pub use types::{BoundingBox, FlightData, FlightTrack, StateVector, States, WayPoint};
