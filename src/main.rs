//! OpenSky Network query CLI
//!
//! Fetches state vectors, flight records and flight tracks from the OpenSky
//! Network API and prints them as text or JSON.

use clap::{Parser, Subcommand};
use flightwire::{
    get_arrivals_by_airport, get_departures_by_airport, get_flights_by_aircraft,
    get_flights_by_interval, get_states, get_track_by_aircraft, BoundingBox, Connection,
    FlightData, StateQuery,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "flightwire")]
#[command(about = "Query the OpenSky Network flight telemetry API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// OpenSky account username (anonymous when omitted)
    #[arg(short, long, env = "OPENSKY_USERNAME")]
    username: Option<String>,

    /// OpenSky account password
    #[arg(short, long, env = "OPENSKY_PASSWORD")]
    password: Option<String>,

    /// Print results as pretty JSON instead of text
    #[arg(long)]
    json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Retrieve aircraft state vectors
    States {
        /// Unix timestamp of the snapshot (0 = most recent)
        #[arg(short, long, default_value = "0")]
        time: i64,

        /// Restrict to these ICAO 24-bit addresses (repeatable)
        #[arg(short, long)]
        icao24: Vec<String>,

        /// Bounding box: lat-min lon-min lat-max lon-max
        #[arg(short, long, num_args = 4, value_names = ["LAMIN", "LOMIN", "LAMAX", "LOMAX"])]
        bounding_box: Option<Vec<f64>>,

        /// Request the extended response including aircraft category
        #[arg(short, long)]
        extended: bool,
    },

    /// Retrieve flights which arrived at an airport within an interval
    Arrivals {
        /// ICAO airport code (e.g. EDDF)
        #[arg(short, long)]
        airport: String,

        /// Interval start, seconds since epoch
        #[arg(short, long)]
        begin: i64,

        /// Interval end, seconds since epoch
        #[arg(short, long)]
        end: i64,
    },

    /// Retrieve flights which departed from an airport within an interval
    Departures {
        /// ICAO airport code (e.g. EDDF)
        #[arg(short, long)]
        airport: String,

        /// Interval start, seconds since epoch
        #[arg(short, long)]
        begin: i64,

        /// Interval end, seconds since epoch
        #[arg(short, long)]
        end: i64,
    },

    /// Retrieve flights within a time interval
    Flights {
        /// Interval start, seconds since epoch
        #[arg(short, long)]
        begin: i64,

        /// Interval end, seconds since epoch
        #[arg(short, long)]
        end: i64,
    },

    /// Retrieve flights of a particular aircraft within an interval
    Aircraft {
        /// ICAO 24-bit address (lower-case hex)
        #[arg(short, long)]
        icao24: String,

        /// Interval start, seconds since epoch
        #[arg(short, long)]
        begin: i64,

        /// Interval end, seconds since epoch
        #[arg(short, long)]
        end: i64,
    },

    /// Retrieve the trajectory of a flight
    Track {
        /// ICAO 24-bit address (lower-case hex)
        #[arg(short, long)]
        icao24: String,

        /// Any time within the flight (0 = live track)
        #[arg(short, long, default_value = "0")]
        time: i64,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let conn = Connection::new(cli.username.as_deref(), cli.password.as_deref())?;

    match cli.command {
        Commands::States {
            time,
            icao24,
            bounding_box,
            extended,
        } => {
            let mut query = StateQuery::new().at_time(time);
            query.icao24 = icao24;
            query.extended = extended;

            if let Some(bbox) = bounding_box {
                query = query.with_bounding_box(BoundingBox::new(bbox[0], bbox[1], bbox[2], bbox[3]));
            }

            let states = get_states(&conn, &query).await?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&states)?);
            } else {
                println!("Response time: {}", states.time);
                for state in &states.states {
                    print!(
                        "{}  {:<8}  {}",
                        state.icao24,
                        state.callsign.as_deref().unwrap_or("-").trim(),
                        state.origin_country
                    );

                    if let (Some(lat), Some(lon)) = (state.latitude, state.longitude) {
                        print!("  {lat:.4}, {lon:.4}");
                    }

                    if let Some(alt) = state.baro_altitude {
                        print!("  {alt:.0} m");
                    }

                    println!();
                }
                println!("{} state vectors", states.states.len());
            }
        }

        Commands::Arrivals {
            airport,
            begin,
            end,
        } => {
            let flights = get_arrivals_by_airport(&conn, &airport, begin, end).await?;
            print_flights(&flights, cli.json)?;
        }

        Commands::Departures {
            airport,
            begin,
            end,
        } => {
            let flights = get_departures_by_airport(&conn, &airport, begin, end).await?;
            print_flights(&flights, cli.json)?;
        }

        Commands::Flights { begin, end } => {
            let flights = get_flights_by_interval(&conn, begin, end).await?;
            print_flights(&flights, cli.json)?;
        }

        Commands::Aircraft { icao24, begin, end } => {
            let flights = get_flights_by_aircraft(&conn, &icao24, begin, end).await?;
            print_flights(&flights, cli.json)?;
        }

        Commands::Track { icao24, time } => {
            let track = get_track_by_aircraft(&conn, &icao24, time).await?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&track)?);
            } else {
                println!("Aircraft: {}", track.icao24);
                if let Some(callsign) = &track.callsign {
                    println!("Callsign: {}", callsign.trim());
                }
                println!("Start: {}", track.start_time);
                println!("End:   {}", track.end_time);
                println!();

                for point in &track.path {
                    print!("{}", point.time);

                    if let (Some(lat), Some(lon)) = (point.latitude, point.longitude) {
                        print!("  {lat:.4}, {lon:.4}");
                    }

                    if let Some(alt) = point.baro_altitude {
                        print!("  {alt:.0} m");
                    }

                    if point.on_ground {
                        print!("  [ground]");
                    }

                    println!();
                }
                println!("{} waypoints", track.path.len());
            }
        }
    }

    Ok(())
}

fn print_flights(flights: &[FlightData], json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(flights)?);
        return Ok(());
    }

    for flight in flights {
        println!(
            "{}  {:<8}  {} -> {}  ({} - {})",
            flight.icao24,
            flight.callsign.as_deref().unwrap_or("-").trim(),
            flight.est_departure_airport.as_deref().unwrap_or("????"),
            flight.est_arrival_airport.as_deref().unwrap_or("????"),
            flight.first_seen,
            flight.last_seen
        );
    }
    println!("{} flights", flights.len());

    Ok(())
}
