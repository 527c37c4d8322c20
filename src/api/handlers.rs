use axum::{extract::State, Json};
use sqlx::PgPool;
use utoipa::OpenApi;

use super::{
    dto::{CurrentConditions, IngestReadingRequest},
    errors::ApiError,
};
use crate::db::models::{HistoryPoint, SensorReading};

/// Fixed server-side cap on history responses. Not configurable.
const HISTORY_LIMIT: i64 = 100;

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Persist one sensor reading and echo the stored row.
///
/// `id` and `timestamp` are assigned by the database. A missing temperature
/// is rejected before any row is written; there is no partial write on
/// failure, and no retry — the sensor firmware resubmits on its next cycle.
#[utoipa::path(
    post,
    path = "/api/sensor-data",
    request_body = IngestReadingRequest,
    responses(
        (status = 200, description = "The persisted reading", body = SensorReading),
        (status = 400, description = "Temperature missing from payload"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "sensor-data"
)]
pub async fn ingest_reading(
    State(pool): State<PgPool>,
    Json(payload): Json<IngestReadingRequest>,
) -> Result<Json<SensorReading>, ApiError> {
    let temperature = payload.temperature.ok_or(ApiError::MissingTemperature)?;

    let row = sqlx::query_as::<_, SensorReading>(
        r#"
        INSERT INTO sensor_readings (temperature, humidity)
        VALUES ($1, $2)
        RETURNING id, "timestamp", temperature, humidity
        "#,
    )
    .bind(temperature)
    .bind(payload.humidity)
    .fetch_one(&pool)
    .await?;

    Ok(Json(row))
}

/// Fetch the most recent reading, or the null-valued placeholder when no
/// readings exist yet. Equal timestamps resolve toward the higher id.
#[utoipa::path(
    get,
    path = "/api/sensor-data",
    responses(
        (status = 200, description = "Latest temperature/humidity, nulls when empty", body = CurrentConditions),
        (status = 500, description = "Internal server error"),
    ),
    tag = "sensor-data"
)]
pub async fn latest_reading(
    State(pool): State<PgPool>,
) -> Result<Json<CurrentConditions>, ApiError> {
    let row = sqlx::query_as::<_, SensorReading>(
        r#"
        SELECT id, "timestamp", temperature, humidity
        FROM sensor_readings
        ORDER BY "timestamp" DESC, id DESC
        LIMIT 1
        "#,
    )
    .fetch_optional(&pool)
    .await?;

    let current = match row {
        Some(r) => CurrentConditions {
            temperature: Some(r.temperature),
            humidity: r.humidity,
        },
        None => CurrentConditions::placeholder(),
    };

    Ok(Json(current))
}

/// Fetch the 100 most recent temperature points in chronological order.
///
/// The query walks the timestamp index newest-first to find the window, then
/// the result is reversed so the wire contract is strictly oldest-first for
/// direct charting. An empty table yields `[]`, not an error.
#[utoipa::path(
    get,
    path = "/api/temperature-history",
    responses(
        (status = 200, description = "Up to 100 points, oldest first", body = Vec<HistoryPoint>),
        (status = 500, description = "Internal server error"),
    ),
    tag = "sensor-data"
)]
pub async fn temperature_history(
    State(pool): State<PgPool>,
) -> Result<Json<Vec<HistoryPoint>>, ApiError> {
    let mut rows = sqlx::query_as::<_, HistoryPoint>(
        r#"
        SELECT "timestamp", temperature
        FROM sensor_readings
        ORDER BY "timestamp" DESC, id DESC
        LIMIT $1
        "#,
    )
    .bind(HISTORY_LIMIT)
    .fetch_all(&pool)
    .await?;

    rows.reverse();
    Ok(Json(rows))
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

/// Returns `200 OK` with `{"status":"ok"}` and the current server time.
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is healthy"),
    ),
    tag = "system"
)]
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "timestamp": chrono::Utc::now(),
    }))
}

// ---------------------------------------------------------------------------
// OpenAPI spec
// ---------------------------------------------------------------------------

#[derive(OpenApi)]
#[openapi(
    paths(ingest_reading, latest_reading, temperature_history, health),
    components(schemas(IngestReadingRequest, CurrentConditions, SensorReading, HistoryPoint)),
    tags(
        (name = "sensor-data", description = "Reading ingestion and retrieval"),
        (name = "system", description = "System endpoints"),
    ),
    info(
        title = "Sensor Dashboard API",
        version = "0.1.0",
        description = "REST API for temperature/humidity sensor readings"
    )
)]
pub struct ApiDoc;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
