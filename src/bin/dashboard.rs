//! Terminal dashboard: polls a running sensor-data server every few seconds
//! and prints the current conditions plus the size of the charted history.
//!
//! Configuration:
//!   DASHBOARD_API_URL   base URL of the server (default http://localhost:3001)
//!   POLL_INTERVAL_SECS  poll interval in seconds (default 5)

use std::{sync::Arc, time::Duration};

use anyhow::{Context, Result};
use tokio::{signal, sync::RwLock, time};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use sensor_dashboard_service::client::{self, display::DisplayState, ApiClient};

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let base_url = std::env::var("DASHBOARD_API_URL")
        .unwrap_or_else(|_| "http://localhost:3001".to_owned());
    let interval = Duration::from_secs(
        std::env::var("POLL_INTERVAL_SECS")
            .unwrap_or_else(|_| "5".to_owned())
            .parse()
            .context("POLL_INTERVAL_SECS must be a positive integer")?,
    );

    let state = Arc::new(RwLock::new(DisplayState::default()));
    let poller = tokio::spawn(client::poll_loop(
        ApiClient::new(base_url.clone()),
        state.clone(),
        interval,
    ));

    info!(base_url = %base_url, "Dashboard started");

    // Render on the same cadence as the poller; Ctrl-C stops both. Aborting
    // the poll task is the only cancellation — an in-flight fetch at that
    // point is discarded.
    let render = async {
        let mut ticker = time::interval(interval);
        loop {
            ticker.tick().await;
            println!("{}", state.read().await.render_line());
        }
    };

    tokio::select! {
        _ = render => {},
        _ = signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
    }

    poller.abort();
    Ok(())
}
