// Traces a driving route from a stored home coordinate to a destination.
//
//     ORS_API_KEY=... cargo run --example trace_route -- "-101.200,20.130"
//
// The first run stores ORS_CURRENT_LOCATION (a "<lon>,<lat>" string) as the
// home coordinate in orsroute-prefs.json. Set RUST_LOG=orsroute=debug to see
// the requests being made.

use orsroute::prefs::FilePreferences;
use orsroute::trace::{ensure_home, trace_route, HomeOrigin};
use orsroute::{Coordinate, DirectionsConfig};
use std::error::Error;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn current_location() -> Option<Coordinate> {
    std::env::var("ORS_CURRENT_LOCATION").ok()?.parse().ok()
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();

    let destination = std::env::args().nth(1).unwrap_or_default();
    let config = DirectionsConfig::from_env()?;
    let client = config.client()?;

    let mut prefs = FilePreferences::open("orsroute-prefs.json")?;
    match ensure_home(&mut prefs, &current_location)? {
        HomeOrigin::Existing(home) => println!("Origin (home): {}", home),
        HomeOrigin::Stored(home) => println!("Home coordinate set to {}", home),
        HomeOrigin::Unavailable => {
            println!("No home stored, set ORS_CURRENT_LOCATION to store one")
        }
    }

    let route =
        trace_route(&client, &prefs, &destination, &config.api_key).await?;

    println!(
        "{:.1} km, {:.0} min, {} points",
        route.distance_km(),
        route.duration_minutes(),
        route.points().len()
    );
    for (lat, lon) in route.lat_lon_points() {
        println!("{:.6} {:.6}", lat, lon);
    }

    Ok(())
}
