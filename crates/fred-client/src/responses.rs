use crate::error::ApiError;
use chrono::NaiveDate;
use core_types::Observation;
use reqwest::StatusCode;
use serde::Deserialize;

/// The sentinel FRED uses for a missing value.
const MISSING_VALUE: &str = ".";

/// The successful payload of `GET /fred/series/observations`.
///
/// An empty `observations` array is a normal result (e.g., a discontinued
/// series queried past its last release), not an error.
#[derive(Debug, Clone, Deserialize)]
pub struct ObservationsResponse {
    #[serde(default)]
    pub observations: Vec<RawObservation>,
}

/// A single observation as FRED serializes it: both fields are strings, and
/// a missing value is the literal `"."`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawObservation {
    pub date: String,
    pub value: String,
}

impl RawObservation {
    /// Converts the wire form into a typed `Observation`.
    ///
    /// The `"."` sentinel becomes `None`; anything else must parse as a
    /// float or the whole response is considered malformed.
    pub fn into_observation(self) -> Result<Observation, ApiError> {
        let date = NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").map_err(|e| {
            ApiError::MalformedResponse(format!("bad observation date '{}': {}", self.date, e))
        })?;

        let value = match self.value.as_str() {
            MISSING_VALUE => None,
            raw => Some(raw.parse::<f64>().map_err(|e| {
                ApiError::MalformedResponse(format!("bad observation value '{}': {}", raw, e))
            })?),
        };

        Ok(Observation::new(date, value))
    }
}

/// Represents an error response from the FRED API.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub error_code: i32,
    pub error_message: String,
}

/// Maps a non-2xx FRED response onto the error taxonomy.
///
/// FRED answers 400 for both a rejected key and an unknown series, so the
/// status code alone cannot discriminate; the `error_message` text can.
pub fn classify_error_body(series_id: &str, status: StatusCode, body: &str) -> ApiError {
    match serde_json::from_str::<ApiErrorResponse>(body) {
        Ok(err) => {
            let message = err.error_message.to_lowercase();
            if message.contains("api_key") || message.contains("api key") {
                ApiError::Credential(err.error_message)
            } else if message.contains("series does not exist") {
                ApiError::UnknownSeries(series_id.to_string())
            } else {
                ApiError::Api(format!("{} (HTTP {})", err.error_message, status.as_u16()))
            }
        }
        Err(e) => ApiError::MalformedResponse(format!(
            "HTTP {} with unparseable error body: {} ({})",
            status.as_u16(),
            body,
            e
        )),
    }
}
