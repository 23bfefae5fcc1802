//! Typed domain records and raw wire shapes.
//!
//! Every field the service may omit is an `Option`: absence is kept distinct
//! from any valid zero/false/empty value, and serializes as JSON null.

use serde::{Deserialize, Serialize};

/// One telemetry snapshot for an aircraft at a point in time.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateVector {
    /// Unique ICAO 24-bit address of the transponder, lower-case hex string.
    pub icao24: String,

    /// Callsign of the vehicle (8 chars). `None` if no callsign was received.
    pub callsign: Option<String>,

    /// Country name inferred from the ICAO 24-bit address.
    pub origin_country: String,

    /// Unix timestamp (seconds) for the last position update. `None` if no
    /// position report was received recently.
    pub time_position: Option<i64>,

    /// Unix timestamp (seconds) for the last update in general, from any
    /// valid message received from the transponder.
    pub last_contact: i64,

    /// WGS-84 longitude in decimal degrees.
    pub longitude: Option<f64>,

    /// WGS-84 latitude in decimal degrees.
    pub latitude: Option<f64>,

    /// Barometric altitude in meters.
    pub baro_altitude: Option<f64>,

    /// Whether the position was retrieved from a surface position report.
    pub on_ground: bool,

    /// Velocity over ground in m/s.
    pub velocity: Option<f64>,

    /// True track in decimal degrees clockwise from north (north = 0).
    pub true_track: Option<f64>,

    /// Vertical rate in m/s. Positive means climbing, negative descending.
    pub vertical_rate: Option<f64>,

    /// IDs of the receivers which contributed to this state vector. `None`
    /// if no sensor filtering was used in the request.
    pub sensors: Option<Vec<i64>>,

    /// Geometric altitude in meters.
    pub geo_altitude: Option<f64>,

    /// The transponder code (squawk).
    pub squawk: Option<String>,

    /// Whether the flight status indicates a special purpose indicator.
    pub spi: bool,

    /// Origin of this state's position:
    /// 0 = ADS-B, 1 = ASTERIX, 2 = MLAT, 3 = FLARM.
    pub position_source: i32,

    /// Aircraft category (0 = no information). Only reported by extended
    /// state responses; stays 0 otherwise.
    pub category: i32,
}

/// A state-vector response: response timestamp plus the vectors in wire
/// order. Duplicate icao24 entries are kept as received.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct States {
    /// The time which the state vectors in this response are associated with.
    pub time: i64,

    /// The decoded state vectors.
    pub states: Vec<StateVector>,
}

/// Raw `/states/all` body: the state vectors arrive as positional arrays of
/// heterogeneous values.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct StatesResponse {
    #[serde(default)]
    pub time: i64,
    #[serde(default)]
    pub states: Option<Vec<Vec<serde_json::Value>>>,
}

/// A flight's recorded trajectory.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightTrack {
    /// Unique ICAO 24-bit address of the transponder, lower-case hex string.
    pub icao24: String,

    /// Time of the first waypoint in seconds since epoch.
    pub start_time: i64,

    /// Time of the last waypoint in seconds since epoch.
    pub end_time: i64,

    /// Callsign (8 chars) that holds for the whole track.
    pub callsign: Option<String>,

    /// Waypoints of the trajectory, in wire order.
    pub path: Vec<WayPoint>,
}

/// One sampled point along a flight track.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WayPoint {
    /// Time which this waypoint is associated with, seconds since epoch.
    pub time: i64,

    /// WGS-84 latitude in decimal degrees.
    pub latitude: Option<f64>,

    /// WGS-84 longitude in decimal degrees.
    pub longitude: Option<f64>,

    /// Barometric altitude in meters.
    pub baro_altitude: Option<f64>,

    /// True track in decimal degrees clockwise from north (north = 0).
    pub true_track: Option<f64>,

    /// Whether the position was retrieved from a surface position report.
    pub on_ground: bool,
}

/// Raw `/tracks/all` body: the path arrives as positional waypoint arrays.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TrackResponse {
    #[serde(default)]
    pub icao24: String,
    #[serde(default)]
    pub start_time: f64,
    #[serde(default)]
    pub end_time: f64,
    #[serde(default)]
    pub callsign: Option<String>,
    #[serde(default)]
    pub path: Option<Vec<Vec<serde_json::Value>>>,
}

/// One flight record as returned by the `/flights` endpoints. These bodies
/// carry named fields and deserialize directly, no positional decoding.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightData {
    /// Unique ICAO 24-bit address of the transponder, lower-case hex string.
    pub icao24: String,

    /// Estimated time of departure for the flight, seconds since epoch.
    #[serde(default)]
    pub first_seen: i64,

    /// ICAO code of the estimated departure airport. `None` if the airport
    /// could not be identified.
    pub est_departure_airport: Option<String>,

    /// Estimated time of arrival for the flight, seconds since epoch.
    #[serde(default)]
    pub last_seen: i64,

    /// ICAO code of the estimated arrival airport. `None` if the airport
    /// could not be identified.
    pub est_arrival_airport: Option<String>,

    /// Callsign of the vehicle (8 chars). If multiple callsigns were
    /// transmitted during the flight, the most frequent one is reported.
    pub callsign: Option<String>,

    /// Horizontal distance of the last received airborne position to the
    /// estimated departure airport, in meters.
    #[serde(default)]
    pub est_departure_airport_horiz_distance: i64,

    /// Vertical distance of the last received airborne position to the
    /// estimated departure airport, in meters.
    #[serde(default)]
    pub est_departure_airport_vert_distance: i64,

    /// Horizontal distance of the last received airborne position to the
    /// estimated arrival airport, in meters.
    #[serde(default)]
    pub est_arrival_airport_horiz_distance: i64,

    /// Vertical distance of the last received airborne position to the
    /// estimated arrival airport, in meters.
    #[serde(default)]
    pub est_arrival_airport_vert_distance: i64,

    /// Number of other possible departure airports in short distance to
    /// the estimated one.
    #[serde(default)]
    pub departure_airport_candidates_count: i32,

    /// Number of other possible arrival airports in short distance to the
    /// estimated one.
    #[serde(default)]
    pub arrival_airport_candidates_count: i32,
}

/// Rectangular WGS-84 coordinate filter for state queries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Lower bound for the latitude in decimal degrees.
    pub lat_min: f64,
    /// Lower bound for the longitude in decimal degrees.
    pub lon_min: f64,
    /// Upper bound for the latitude in decimal degrees.
    pub lat_max: f64,
    /// Upper bound for the longitude in decimal degrees.
    pub lon_max: f64,
}

impl BoundingBox {
    /// Create a bounding box from coordinates.
    pub fn new(lat_min: f64, lon_min: f64, lat_max: f64, lon_max: f64) -> Self {
        Self {
            lat_min,
            lon_min,
            lat_max,
            lon_max,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_fields_serialize_as_null() {
        let state = StateVector {
            icao24: "c060b9".to_string(),
            origin_country: "Canada".to_string(),
            last_contact: 1689193028,
            ..Default::default()
        };

        let value = serde_json::to_value(&state).unwrap();
        assert_eq!(value["callsign"], serde_json::Value::Null);
        assert_eq!(value["longitude"], serde_json::Value::Null);
        assert_ne!(value["longitude"], serde_json::json!(0.0));
        assert_eq!(value["onGround"], serde_json::json!(false));
    }

    #[test]
    fn test_flight_data_deserializes_named_fields() {
        let body = serde_json::json!({
            "icao24": "a835af",
            "firstSeen": 1693523464,
            "estDepartureAirport": "KPVD",
            "lastSeen": 1693526582,
            "estArrivalAirport": null,
            "callsign": "N401TD",
            "estDepartureAirportHorizDistance": 38,
            "estDepartureAirportVertDistance": 21,
            "estArrivalAirportHorizDistance": 0,
            "estArrivalAirportVertDistance": 0,
            "departureAirportCandidatesCount": 1,
            "arrivalAirportCandidatesCount": 0
        });

        let flight: FlightData = serde_json::from_value(body).unwrap();
        assert_eq!(flight.icao24, "a835af");
        assert_eq!(flight.first_seen, 1693523464);
        assert_eq!(flight.est_departure_airport.as_deref(), Some("KPVD"));
        assert_eq!(flight.est_arrival_airport, None);
        assert_eq!(flight.departure_airport_candidates_count, 1);
    }
}
