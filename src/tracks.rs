//! Flight-track retrieval and the waypoint positional decoder.

use serde_json::Value;

use crate::connection::{Connection, QueryParams};
use crate::errors::{DecodeError, Error};
use crate::types::{FlightTrack, TrackResponse, WayPoint};

// Slot schema of a waypoint array: time, latitude, longitude, baro
// altitude, true track, on-ground. Only time and on-ground are required;
// the rest are optional-by-null.
const IDX_TIME: usize = 0;
const IDX_LATITUDE: usize = 1;
const IDX_LONGITUDE: usize = 2;
const IDX_BARO_ALTITUDE: usize = 3;
const IDX_TRUE_TRACK: usize = 4;
const IDX_ON_GROUND: usize = 5;

/// Retrieve the trajectory for a certain aircraft at a given time. If `time`
/// is 0 the live track is taken. A malformed waypoint aborts the call.
pub async fn get_track_by_aircraft(
    conn: &Connection,
    icao24: &str,
    time: i64,
) -> Result<FlightTrack, Error> {
    if icao24.is_empty() {
        return Err(Error::EmptyAircraftName);
    }

    if time < 0 {
        return Err(Error::InvalidUnixTime);
    }

    let params = track_request_params(icao24, time);
    let response = conn.get("/tracks/all", &params).await?;
    let raw: TrackResponse = response.process().await?.unwrap_or_default();

    parse_track_response(raw).map_err(Error::from)
}

/// Build the `/tracks/all` query parameters. Pure.
pub(crate) fn track_request_params(icao24: &str, time: i64) -> QueryParams {
    let mut params = QueryParams::new();

    if time >= 0 {
        params.push(("time", time.to_string()));
    }

    if !icao24.is_empty() {
        params.push(("icao24", icao24.to_string()));
    }

    params
}

/// Convert a raw track response into a typed [`FlightTrack`], decoding each
/// positional waypoint array.
///
/// The service frequently reports a zero or negative start time; the
/// caller-facing start time is clamped to 1 in that case for compatibility.
pub(crate) fn parse_track_response(raw: TrackResponse) -> Result<FlightTrack, DecodeError> {
    let start_time = match raw.start_time as i64 {
        t if t <= 0 => 1,
        t => t,
    };

    let mut path = Vec::new();
    for data in raw.path.unwrap_or_default() {
        path.push(decode_waypoint(&data)?);
    }

    Ok(FlightTrack {
        icao24: raw.icao24,
        start_time,
        end_time: raw.end_time as i64,
        callsign: raw.callsign,
        path,
    })
}

/// Decode one positional waypoint array into a typed record.
pub fn decode_waypoint(data: &[Value]) -> Result<WayPoint, DecodeError> {
    if data.len() <= IDX_ON_GROUND {
        return Err(DecodeError::WaypointLength(data.len()));
    }

    Ok(WayPoint {
        time: req_f64(data, IDX_TIME, "time")? as i64,
        latitude: opt_f64(data, IDX_LATITUDE, "latitude")?,
        longitude: opt_f64(data, IDX_LONGITUDE, "longitude")?,
        baro_altitude: opt_f64(data, IDX_BARO_ALTITUDE, "baro altitude")?,
        true_track: opt_f64(data, IDX_TRUE_TRACK, "true track")?,
        on_ground: req_bool(data, IDX_ON_GROUND, "on ground")?,
    })
}

fn field_err(field: &'static str, value: &Value) -> DecodeError {
    DecodeError::WaypointField {
        field,
        value: value.clone(),
    }
}

fn req_f64(data: &[Value], idx: usize, field: &'static str) -> Result<f64, DecodeError> {
    match &data[idx] {
        Value::Number(n) => n.as_f64().ok_or_else(|| field_err(field, &data[idx])),
        other => Err(field_err(field, other)),
    }
}

fn opt_f64(data: &[Value], idx: usize, field: &'static str) -> Result<Option<f64>, DecodeError> {
    match &data[idx] {
        Value::Null => Ok(None),
        _ => req_f64(data, idx, field).map(Some),
    }
}

fn req_bool(data: &[Value], idx: usize, field: &'static str) -> Result<bool, DecodeError> {
    match &data[idx] {
        Value::Bool(b) => Ok(*b),
        other => Err(field_err(field, other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_waypoint_all_present() {
        let row = vec![
            json!(1),
            json!(-46.5097),
            json!(-46.5097),
            json!(-46.5097),
            json!(-46.5097),
            json!(false),
        ];

        let point = decode_waypoint(&row).unwrap();
        assert_eq!(point.time, 1);
        assert_eq!(point.latitude, Some(-46.5097));
        assert_eq!(point.longitude, Some(-46.5097));
        assert_eq!(point.baro_altitude, Some(-46.5097));
        assert_eq!(point.true_track, Some(-46.5097));
        assert!(!point.on_ground);
    }

    #[test]
    fn test_decode_waypoint_all_null() {
        let row = vec![json!(1), json!(null), json!(null), json!(null), json!(null), json!(true)];

        let point = decode_waypoint(&row).unwrap();
        assert_eq!(point.time, 1);
        assert_eq!(point.latitude, None);
        assert_eq!(point.longitude, None);
        assert_eq!(point.baro_altitude, None);
        assert_eq!(point.true_track, None);
        assert!(point.on_ground);
    }

    #[test]
    fn test_short_waypoint_is_data_count_error() {
        let row = vec![json!(1)];
        let err = decode_waypoint(&row).unwrap_err();
        assert_eq!(err, DecodeError::WaypointLength(1));
    }

    #[test]
    fn test_waypoint_missing_on_ground_is_data_count_error() {
        // Five elements: everything up to the on-ground slot, which is
        // required. Still a count error, never an out-of-bounds read.
        let row = vec![json!(1), json!(null), json!(null), json!(null), json!(null)];
        let err = decode_waypoint(&row).unwrap_err();
        assert_eq!(err, DecodeError::WaypointLength(5));
    }

    #[test]
    fn test_waypoint_type_mismatch() {
        let row = vec![
            json!(1),
            json!("a"),
            json!(null),
            json!(null),
            json!(null),
            json!(true),
        ];

        let err = decode_waypoint(&row).unwrap_err();
        assert_eq!(
            err,
            DecodeError::WaypointField {
                field: "latitude",
                value: json!("a"),
            }
        );
    }

    #[test]
    fn test_parse_track_response() {
        let raw = TrackResponse {
            icao24: "c060b9".to_string(),
            start_time: 1689193028.0,
            end_time: 1689197805.0,
            callsign: Some("POE2136".to_string()),
            path: Some(vec![vec![
                json!(1689193028),
                json!(45.0),
                json!(-93.0),
                json!(600.0),
                json!(90.0),
                json!(false),
            ]]),
        };

        let track = parse_track_response(raw).unwrap();
        assert_eq!(track.icao24, "c060b9");
        assert_eq!(track.start_time, 1689193028);
        assert_eq!(track.end_time, 1689197805);
        assert_eq!(track.callsign.as_deref(), Some("POE2136"));
        assert_eq!(track.path.len(), 1);
        assert_eq!(track.path[0].latitude, Some(45.0));
    }

    #[test]
    fn test_start_time_clamped_to_one() {
        for start in [0.0, -12.0] {
            let raw = TrackResponse {
                icao24: "c060b9".to_string(),
                start_time: start,
                end_time: 1.0,
                callsign: None,
                path: None,
            };

            let track = parse_track_response(raw).unwrap();
            assert_eq!(track.start_time, 1);
        }
    }

    #[test]
    fn test_malformed_waypoint_aborts_track() {
        let raw = TrackResponse {
            icao24: "c060b9".to_string(),
            start_time: 1.0,
            end_time: 2.0,
            callsign: None,
            path: Some(vec![vec![json!(1)]]),
        };

        let err = parse_track_response(raw).unwrap_err();
        assert_eq!(err, DecodeError::WaypointLength(1));
    }

    #[test]
    fn test_track_request_params() {
        let params = track_request_params("icao24_c", 2);
        assert_eq!(
            params,
            vec![
                ("time", "2".to_string()),
                ("icao24", "icao24_c".to_string()),
            ]
        );

        let params = track_request_params("icao24_b", 0);
        assert!(params.contains(&("time", "0".to_string())));
    }

    #[tokio::test]
    async fn test_get_track_argument_validation() {
        let conn = Connection::new(None, None).unwrap();

        let err = get_track_by_aircraft(&conn, "", 1696755342).await.unwrap_err();
        assert!(matches!(err, Error::EmptyAircraftName));

        let err = get_track_by_aircraft(&conn, "a835af", -1).await.unwrap_err();
        assert!(matches!(err, Error::InvalidUnixTime));
    }
}
