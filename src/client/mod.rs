pub mod display;

use std::{sync::Arc, time::Duration};

use anyhow::{Context, Result};
use reqwest::Client;
use tokio::{sync::RwLock, time};
use tracing::{info, warn};

use crate::api::dto::CurrentConditions;
use crate::db::models::HistoryPoint;

use self::display::DisplayState;

/// Typed HTTP client for the sensor-data API, used by the dashboard binary
/// and by anything else that wants to poll a running server.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// GET `/api/sensor-data` — latest conditions, nulls when no data yet.
    pub async fn fetch_current(&self) -> Result<CurrentConditions> {
        self.http
            .get(format!("{}/api/sensor-data", self.base_url))
            .send()
            .await
            .context("latest-reading request failed")?
            .error_for_status()
            .context("latest-reading request rejected")?
            .json()
            .await
            .context("latest-reading response was not valid JSON")
    }

    /// GET `/api/temperature-history` — up to 100 points, oldest first.
    pub async fn fetch_history(&self) -> Result<Vec<HistoryPoint>> {
        self.http
            .get(format!("{}/api/temperature-history", self.base_url))
            .send()
            .await
            .context("history request failed")?
            .error_for_status()
            .context("history request rejected")?
            .json()
            .await
            .context("history response was not valid JSON")
    }
}

/// Poll the server on a fixed interval and fold responses into `state`.
///
/// Each tick issues the latest-reading and history fetches concurrently and
/// applies each result independently; a failed fetch is logged and the
/// previously displayed values stay in place until the next tick. Runs until
/// the future is dropped or aborted — that is the only cancellation
/// primitive, and a fetch in flight at that point is simply discarded.
pub async fn poll_loop(client: ApiClient, state: Arc<RwLock<DisplayState>>, interval: Duration) {
    let mut ticker = time::interval(interval);
    info!(interval_secs = interval.as_secs(), "Dashboard polling loop started");

    loop {
        ticker.tick().await;

        let (current, history) = tokio::join!(client.fetch_current(), client.fetch_history());

        match current {
            Ok(current) => state.write().await.apply_current(current),
            Err(e) => warn!(error = %e, "Failed to fetch current conditions"),
        }

        match history {
            Ok(history) => state.write().await.apply_history(history),
            Err(e) => warn!(error = %e, "Failed to fetch temperature history"),
        }
    }
}

#[cfg(test)]
mod tests {
    use sqlx::PgPool;

    use super::*;
    use crate::api::router;

    /// Serve the real router on an ephemeral port, returning its base URL.
    async fn spawn_server(pool: PgPool) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router(pool)).await.unwrap();
        });
        format!("http://{addr}")
    }

    async fn ingest(pool: &PgPool, temperature: f64, humidity: Option<f64>) {
        sqlx::query("INSERT INTO sensor_readings (temperature, humidity) VALUES ($1, $2)")
            .bind(temperature)
            .bind(humidity)
            .execute(pool)
            .await
            .unwrap();
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn fetch_current_empty_returns_placeholder(pool: PgPool) {
        let client = ApiClient::new(spawn_server(pool).await);
        let current = client.fetch_current().await.unwrap();
        assert!(current.temperature.is_none());
        assert!(current.humidity.is_none());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn fetch_current_returns_latest_values(pool: PgPool) {
        ingest(&pool, 18.0, Some(40.0)).await;
        ingest(&pool, 21.5, Some(48.0)).await;

        let client = ApiClient::new(spawn_server(pool).await);
        let current = client.fetch_current().await.unwrap();
        assert_eq!(current.temperature, Some(21.5));
        assert_eq!(current.humidity, Some(48.0));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn fetch_history_is_chronological(pool: PgPool) {
        ingest(&pool, 18.0, None).await;
        ingest(&pool, 19.0, None).await;
        ingest(&pool, 20.0, None).await;

        let client = ApiClient::new(spawn_server(pool).await);
        let history = client.fetch_history().await.unwrap();
        let temps: Vec<f64> = history.iter().map(|p| p.temperature).collect();
        assert_eq!(temps, vec![18.0, 19.0, 20.0]);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn poll_loop_populates_display_state(pool: PgPool) {
        ingest(&pool, 21.5, Some(48.0)).await;

        let client = ApiClient::new(spawn_server(pool).await);
        let state = Arc::new(RwLock::new(DisplayState::default()));
        let poller = tokio::spawn(poll_loop(
            client,
            state.clone(),
            Duration::from_millis(50),
        ));

        // Wait for the first tick to land.
        let mut applied = false;
        for _ in 0..50 {
            tokio::time::sleep(Duration::from_millis(20)).await;
            if state.read().await.last_updated.is_some() {
                applied = true;
                break;
            }
        }
        poller.abort();

        assert!(applied, "poll loop never updated display state");
        let state = state.read().await;
        assert_eq!(state.temperature, Some(21.5));
        assert_eq!(state.humidity, Some(48.0));
        assert_eq!(state.history.len(), 1);
    }

    #[tokio::test]
    async fn fetch_failure_leaves_state_untouched() {
        // Nothing listens on this port; both fetches fail.
        let client = ApiClient::new("http://127.0.0.1:9");
        let state = Arc::new(RwLock::new(DisplayState::default()));

        {
            let mut s = state.write().await;
            s.apply_current(CurrentConditions {
                temperature: Some(19.0),
                humidity: Some(52.0),
            });
        }

        let (current, history) = tokio::join!(client.fetch_current(), client.fetch_history());
        assert!(current.is_err());
        assert!(history.is_err());

        // Last-known-good values remain on display.
        let s = state.read().await;
        assert_eq!(s.temperature, Some(19.0));
        assert_eq!(s.humidity, Some(52.0));
    }
}
