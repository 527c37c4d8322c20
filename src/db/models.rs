use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// One row of the `sensor_readings` table.
///
/// Rows are append-only: created once on ingestion, never updated or deleted.
/// `id` is assigned by the `BIGSERIAL` sequence and strictly increases with
/// insertion order; `timestamp` defaults to the insert time, so it is
/// non-decreasing with `id` unless the server clock moves backwards (readers
/// must tolerate that).
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, ToSchema)]
pub struct SensorReading {
    pub id: i64,
    pub timestamp: DateTime<Utc>,
    /// Degrees Celsius. Required at ingestion; no range validation applied.
    pub temperature: f64,
    /// Relative humidity in percent. `None` when the sensor did not report it,
    /// stored as SQL `NULL` (never defaulted to zero).
    pub humidity: Option<f64>,
}

/// Projection used by the history endpoint: one chart point per row.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, ToSchema)]
pub struct HistoryPoint {
    pub timestamp: DateTime<Utc>,
    pub temperature: f64,
}
