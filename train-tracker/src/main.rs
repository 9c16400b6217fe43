use std::time::Duration;

use tracing_subscriber::EnvFilter;

use train_tracker::cache::{CacheConfig, CachedClient};
use train_tracker::domain::TrainId;
use train_tracker::stations::CodeResolver;
use train_tracker::tracker::{Snapshot, Tracker, TrackerConfig};
use train_tracker::trafikverket::{TrafikverketClient, TrafikverketConfig};

/// How often to poll the announcement feed.
const POLL_INTERVAL: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Train number from argv, e.g. `train-tracker 545`
    let train_arg = match std::env::args().nth(1) {
        Some(arg) => arg,
        None => {
            eprintln!("Usage: train-tracker <train-number>");
            std::process::exit(2);
        }
    };
    let train = match TrainId::parse(&train_arg) {
        Ok(train) => train,
        Err(e) => {
            eprintln!("Invalid train number {train_arg:?}: {e}");
            std::process::exit(2);
        }
    };

    let api_key = std::env::var("TRAFIKVERKET_API_KEY").unwrap_or_else(|_| {
        eprintln!("Warning: TRAFIKVERKET_API_KEY not set. API calls will fail.");
        String::new()
    });

    let client = TrafikverketClient::new(TrafikverketConfig::new(&api_key))
        .expect("Failed to create Trafikverket client");
    let cached = CachedClient::new(client, &CacheConfig::default());

    let date = chrono::Local::now().date_naive();
    let config = TrackerConfig::default().with_poll_interval(POLL_INTERVAL);

    let tracker = Tracker::spawn(cached, CodeResolver::new(), train.clone(), date, config);
    let mut snapshots = tracker.subscribe();

    println!("Tracking train {train} on {date}. Press Ctrl-C to stop.");

    loop {
        tokio::select! {
            changed = snapshots.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = snapshots.borrow_and_update().clone();
                print_snapshot(&snapshot);
            }
            _ = tokio::signal::ctrl_c() => {
                println!("\nStopping.");
                break;
            }
        }
    }

    tracker.stop();
}

/// Print one itinerary snapshot as a table.
fn print_snapshot(snapshot: &Snapshot) {
    println!();

    if snapshot.itinerary.is_empty() {
        println!("Train {}: no announcements yet.", snapshot.train);
        return;
    }

    println!(
        "Train {} — {} stations, {} passed:",
        snapshot.train,
        snapshot.itinerary.len(),
        snapshot.itinerary.passed_count()
    );

    let current = snapshot.itinerary.current_index();

    for (idx, stop) in snapshot.itinerary.iter().enumerate() {
        let marker = if Some(idx) == current {
            ">"
        } else if stop.passed {
            "x"
        } else {
            " "
        };

        let arrival = stop.arrival_time.as_deref().unwrap_or("-");
        let departure = stop.departure_time.as_deref().unwrap_or("-");
        let track = stop.track.as_deref().unwrap_or("-");

        let delay = stop
            .display_delay()
            .map(|d| format!(" ({d})"))
            .unwrap_or_default();

        let canceled = if stop.canceled { " CANCELED" } else { "" };

        println!(
            "  {marker} {:<24} arr {arrival:<25} dep {departure:<25} track {track}{delay}{canceled}",
            stop.name
        );
    }
}
