use chrono::{DateTime, Utc};

use crate::api::dto::CurrentConditions;
use crate::db::models::HistoryPoint;

/// Local display model of the dashboard: the values currently on screen.
///
/// Null current values mean "no data yet", not a sensor fault. Updates are
/// idempotent overwrites — the latest-reading and history fetches land
/// independently, and a response from a slow earlier poll tick may overwrite
/// a newer one. That reorder race is accepted: the next tick repairs it.
#[derive(Debug, Default)]
pub struct DisplayState {
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub history: Vec<HistoryPoint>,
    /// Instant of the last successfully applied fetch, for staleness display.
    pub last_updated: Option<DateTime<Utc>>,
}

impl DisplayState {
    pub fn apply_current(&mut self, current: CurrentConditions) {
        self.temperature = current.temperature;
        self.humidity = current.humidity;
        self.last_updated = Some(Utc::now());
    }

    pub fn apply_history(&mut self, history: Vec<HistoryPoint>) {
        self.history = history;
        self.last_updated = Some(Utc::now());
    }

    /// One-line textual rendering of the current conditions.
    pub fn render_line(&self) -> String {
        let temperature = match self.temperature {
            Some(t) => format!("{t:.1} °C"),
            None => "N/A".to_owned(),
        };
        let humidity = match self.humidity {
            Some(h) => format!("{h:.1} %"),
            None => "N/A".to_owned(),
        };
        format!(
            "temperature {temperature} | humidity {humidity} | {} history points",
            self.history.len()
        )
    }
}
