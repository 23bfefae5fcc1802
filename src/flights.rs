//! Flight-record retrieval operations.
//!
//! These endpoints return JSON objects with named fields, so the bodies
//! deserialize straight into [`FlightData`] without positional decoding.

use crate::connection::{Connection, QueryParams};
use crate::errors::Error;
use crate::types::FlightData;

/// Retrieve flights for a certain airport which arrived within the
/// `[begin, end]` interval. The interval must not be larger than seven days.
pub async fn get_arrivals_by_airport(
    conn: &Connection,
    airport: &str,
    begin: i64,
    end: i64,
) -> Result<Vec<FlightData>, Error> {
    if airport.is_empty() {
        return Err(Error::EmptyAirportName);
    }

    if begin <= 0 || end <= 0 {
        return Err(Error::InvalidUnixTime);
    }

    let params = flight_request_params(Some(airport), None, begin, end);
    let response = conn.get("/flights/arrival", &params).await?;

    Ok(response.process().await?.unwrap_or_default())
}

/// Retrieve flights for a certain airport which departed within the
/// `[begin, end]` interval. The interval must not be larger than seven days.
pub async fn get_departures_by_airport(
    conn: &Connection,
    airport: &str,
    begin: i64,
    end: i64,
) -> Result<Vec<FlightData>, Error> {
    if airport.is_empty() {
        return Err(Error::EmptyAirportName);
    }

    if begin <= 0 || end <= 0 {
        return Err(Error::InvalidUnixTime);
    }

    let params = flight_request_params(Some(airport), None, begin, end);
    let response = conn.get("/flights/departure", &params).await?;

    Ok(response.process().await?.unwrap_or_default())
}

/// Retrieve flights within the `[begin, end]` interval. The interval must
/// not be larger than two hours.
pub async fn get_flights_by_interval(
    conn: &Connection,
    begin: i64,
    end: i64,
) -> Result<Vec<FlightData>, Error> {
    if begin <= 0 || end <= 0 {
        return Err(Error::InvalidUnixTime);
    }

    let params = flight_request_params(None, None, begin, end);
    let response = conn.get("/flights/all", &params).await?;

    Ok(response.process().await?.unwrap_or_default())
}

/// Retrieve flights for a particular aircraft within the `[begin, end]`
/// interval. The interval must not be larger than thirty days.
pub async fn get_flights_by_aircraft(
    conn: &Connection,
    icao24: &str,
    begin: i64,
    end: i64,
) -> Result<Vec<FlightData>, Error> {
    if icao24.is_empty() {
        return Err(Error::EmptyAircraftName);
    }

    if begin <= 0 || end <= 0 {
        return Err(Error::InvalidUnixTime);
    }

    let params = flight_request_params(None, Some(icao24), begin, end);
    let response = conn.get("/flights/aircraft", &params).await?;

    Ok(response.process().await?.unwrap_or_default())
}

/// Build the query parameters shared by the `/flights` endpoints. Pure.
pub(crate) fn flight_request_params(
    airport: Option<&str>,
    aircraft: Option<&str>,
    begin: i64,
    end: i64,
) -> QueryParams {
    let mut params = QueryParams::new();

    if begin >= 0 {
        params.push(("begin", begin.to_string()));
    }

    if end >= 0 {
        params.push(("end", end.to_string()));
    }

    if let Some(airport) = airport {
        if !airport.is_empty() {
            params.push(("airport", airport.to_string()));
        }
    }

    if let Some(aircraft) = aircraft {
        if !aircraft.is_empty() {
            params.push(("icao24", aircraft.to_string()));
        }
    }

    params
}
