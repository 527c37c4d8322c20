use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body for `POST /api/sensor-data`.
///
/// `temperature` is modelled as `Option` so that its absence can be answered
/// with the endpoint's own 400 payload instead of a deserialisation
/// rejection; handlers validate it before touching storage.
#[derive(Debug, Deserialize, ToSchema)]
pub struct IngestReadingRequest {
    /// Degrees Celsius. Required.
    pub temperature: Option<f64>,
    /// Relative humidity in percent. Optional; stored as null when omitted.
    pub humidity: Option<f64>,
}

/// Response for `GET /api/sensor-data`.
///
/// Both fields are null when no readings exist yet — the "no data yet"
/// placeholder, which is a 200 success, not an error.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CurrentConditions {
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
}

impl CurrentConditions {
    pub fn placeholder() -> Self {
        Self {
            temperature: None,
            humidity: None,
        }
    }
}
