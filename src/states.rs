//! State-vector retrieval and the positional array decoder behind it.
//!
//! The `/states/all` endpoint encodes each state vector as a positional JSON
//! array of heterogeneous values. Decoding validates element count, type and
//! position against the fixed slot schema below and produces one typed
//! [`StateVector`] per array.

use serde_json::Value;

use crate::connection::{float_to_string, Connection, QueryParams};
use crate::errors::{DecodeError, Error};
use crate::types::{BoundingBox, StateVector, States, StatesResponse};

// Slot schema of a state-vector array. Indexes are fixed by the wire
// format; slots marked optional are null when the value is unknown.
//
//  idx  field            wire type        required
//   0   icao24           string           yes
//   1   callsign         string           no
//   2   origin_country   string           yes
//   3   time_position    number (epoch)   no
//   4   last_contact     number (epoch)   yes
//   5   longitude        number           no
//   6   latitude         number           no
//   7   baro_altitude    number           no
//   8   on_ground        bool             yes
//   9   velocity         number           no
//  10   true_track       number           no
//  11   vertical_rate    number           no
//  12   sensors          array of ints    no
//  13   geo_altitude     number           no
//  14   squawk           string           no
//  15   spi              bool             yes
//  16   position_source  number           yes
//  17   category         number           extended responses only
const IDX_ICAO24: usize = 0;
const IDX_CALLSIGN: usize = 1;
const IDX_ORIGIN_COUNTRY: usize = 2;
const IDX_TIME_POSITION: usize = 3;
const IDX_LAST_CONTACT: usize = 4;
const IDX_LONGITUDE: usize = 5;
const IDX_LATITUDE: usize = 6;
const IDX_BARO_ALTITUDE: usize = 7;
const IDX_ON_GROUND: usize = 8;
const IDX_VELOCITY: usize = 9;
const IDX_TRUE_TRACK: usize = 10;
const IDX_VERTICAL_RATE: usize = 11;
const IDX_SENSORS: usize = 12;
const IDX_GEO_ALTITUDE: usize = 13;
const IDX_SQUAWK: usize = 14;
const IDX_SPI: usize = 15;
const IDX_POSITION_SOURCE: usize = 16;
const IDX_CATEGORY: usize = 17;

/// What to do when one state-vector array fails to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodePolicy {
    /// Log the malformed record and drop it; the call still succeeds with a
    /// shorter result list.
    #[default]
    Skip,
    /// Abort the whole call with the first decode failure.
    Fail,
}

/// Options for a state-vector query.
#[derive(Debug, Clone, Default)]
pub struct StateQuery {
    /// Unix timestamp of the requested snapshot; 0 means the most recent one.
    pub time: i64,
    /// Restrict the result to these transponder addresses. Empty = all.
    pub icao24: Vec<String>,
    /// Restrict the result to a geographic area.
    pub bounding_box: Option<BoundingBox>,
    /// Request the extended response that includes the aircraft category.
    pub extended: bool,
    /// Malformed-record handling, see [`DecodePolicy`].
    pub decode_policy: DecodePolicy,
}

impl StateQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at_time(mut self, time: i64) -> Self {
        self.time = time;
        self
    }

    pub fn with_icao24(mut self, icao24: impl Into<String>) -> Self {
        self.icao24.push(icao24.into());
        self
    }

    pub fn with_bounding_box(mut self, bounding_box: BoundingBox) -> Self {
        self.bounding_box = Some(bounding_box);
        self
    }

    pub fn extended(mut self) -> Self {
        self.extended = true;
        self
    }

    pub fn with_decode_policy(mut self, policy: DecodePolicy) -> Self {
        self.decode_policy = policy;
        self
    }
}

/// Retrieve state vectors for a given time. If `query.time` is 0 the most
/// recent ones are taken.
pub async fn get_states(conn: &Connection, query: &StateQuery) -> Result<States, Error> {
    if query.time < 0 {
        return Err(Error::InvalidUnixTime);
    }

    let params = state_request_params(query);
    let response = conn.get("/states/all", &params).await?;
    let raw: StatesResponse = response.process().await?.unwrap_or_default();

    let mut states = Vec::new();

    for data in raw.states.unwrap_or_default() {
        match decode_state_vector(&data) {
            Ok(state) => states.push(state),
            Err(err) => match query.decode_policy {
                DecodePolicy::Skip => {
                    tracing::error!("cannot decode received data: {err}");
                }
                DecodePolicy::Fail => return Err(err.into()),
            },
        }
    }

    Ok(States {
        time: raw.time,
        states,
    })
}

/// Build the `/states/all` query parameters. Pure: a parameter is added only
/// when the corresponding input is meaningful.
pub(crate) fn state_request_params(query: &StateQuery) -> QueryParams {
    let mut params = QueryParams::new();

    if query.time >= 0 {
        params.push(("time", query.time.to_string()));
    }

    for icao24 in &query.icao24 {
        if !icao24.is_empty() {
            params.push(("icao24", icao24.clone()));
        }
    }

    if query.extended {
        params.push(("extended", "1".to_string()));
    }

    if let Some(bbox) = query.bounding_box {
        params.push(("lamin", float_to_string(bbox.lat_min)));
        params.push(("lomin", float_to_string(bbox.lon_min)));
        params.push(("lamax", float_to_string(bbox.lat_max)));
        params.push(("lomax", float_to_string(bbox.lon_max)));
    }

    params
}

/// Decode one positional state-vector array into a typed record.
///
/// The category slot is populated only when the array length is exactly one
/// more than the category index, i.e. the server produced an extended
/// response; a plain 17-element response leaves it at 0 (no information).
pub fn decode_state_vector(data: &[Value]) -> Result<StateVector, DecodeError> {
    if data.len() < IDX_CATEGORY {
        return Err(DecodeError::StateVectorLength(data.len()));
    }

    let mut state = StateVector {
        icao24: req_str(data, IDX_ICAO24, "icao24")?,
        callsign: opt_str(data, IDX_CALLSIGN, "callsign")?,
        origin_country: req_str(data, IDX_ORIGIN_COUNTRY, "origin country")?,
        time_position: opt_f64(data, IDX_TIME_POSITION, "time position")?.map(|v| v as i64),
        last_contact: req_f64(data, IDX_LAST_CONTACT, "last contact")? as i64,
        longitude: opt_f64(data, IDX_LONGITUDE, "longitude")?,
        latitude: opt_f64(data, IDX_LATITUDE, "latitude")?,
        baro_altitude: opt_f64(data, IDX_BARO_ALTITUDE, "baro altitude")?,
        on_ground: req_bool(data, IDX_ON_GROUND, "on ground")?,
        velocity: opt_f64(data, IDX_VELOCITY, "velocity")?,
        true_track: opt_f64(data, IDX_TRUE_TRACK, "true track")?,
        vertical_rate: opt_f64(data, IDX_VERTICAL_RATE, "vertical rate")?,
        sensors: opt_sensors(data, IDX_SENSORS, "sensors")?,
        geo_altitude: opt_f64(data, IDX_GEO_ALTITUDE, "geo altitude")?,
        squawk: opt_str(data, IDX_SQUAWK, "squawk")?,
        spi: req_bool(data, IDX_SPI, "spi")?,
        position_source: req_f64(data, IDX_POSITION_SOURCE, "position source")? as i32,
        category: 0,
    };

    if data.len() == IDX_CATEGORY + 1 {
        state.category = req_f64(data, IDX_CATEGORY, "category")? as i32;
    }

    Ok(state)
}

fn field_err(field: &'static str, value: &Value) -> DecodeError {
    DecodeError::StateVectorField {
        field,
        value: value.clone(),
    }
}

fn req_str(data: &[Value], idx: usize, field: &'static str) -> Result<String, DecodeError> {
    match &data[idx] {
        Value::String(s) => Ok(s.clone()),
        other => Err(field_err(field, other)),
    }
}

fn opt_str(data: &[Value], idx: usize, field: &'static str) -> Result<Option<String>, DecodeError> {
    match &data[idx] {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        other => Err(field_err(field, other)),
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

fn opt_sensors(
    data: &[Value],
    idx: usize,
    field: &'static str,
) -> Result<Option<Vec<i64>>, DecodeError> {
    match &data[idx] {
        Value::Null => Ok(None),
        Value::Array(items) => items
            .iter()
            .map(|item| item.as_i64().ok_or_else(|| field_err(field, &data[idx])))
            .collect::<Result<Vec<_>, _>>()
            .map(Some),
        other => Err(field_err(field, other)),
    }
}
