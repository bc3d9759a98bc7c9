use async_trait::async_trait;
use chrono::NaiveDate;
use configuration::Fred;
use core_types::Series;
use std::time::Duration;

pub mod error;
pub mod responses;

// --- Public API ---
pub use error::ApiError;
pub use responses::{ApiErrorResponse, ObservationsResponse, RawObservation};

/// How long a single observation request may take before the transport
/// gives up. Matches the timeout the original dashboard used.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The generic, abstract interface for a source of observation series.
/// This trait is the contract the dashboard pipeline uses, allowing the
/// underlying implementation (live FRED or mock) to be swapped out.
#[async_trait]
pub trait ObservationSource: Send + Sync {
    /// Fetches one series, ordered by date, spanning from `start` (or the
    /// source-defined earliest date when `None`) to the present.
    ///
    /// One outbound request per call; there is no retry logic here.
    async fn fetch_series(
        &self,
        series_id: &str,
        label: &str,
        start: Option<NaiveDate>,
    ) -> Result<Series, ApiError>;
}

/// A concrete `ObservationSource` backed by the FRED observations API.
#[derive(Clone, Debug)]
pub struct FredClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl FredClient {
    /// Builds a client from the FRED section of the configuration.
    ///
    /// A missing or empty API key fails here, before any request is made,
    /// so the caller gets a credential message rather than a cryptic 400
    /// from the remote end.
    pub fn new(fred: &Fred) -> Result<Self, ApiError> {
        let api_key = fred
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                ApiError::Credential(
                    "no FRED API key configured; set the FRED_API_KEY environment variable"
                        .to_string(),
                )
            })?;

        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(ApiError::Network)?;

        Ok(Self {
            client,
            base_url: fred.base_url.clone(),
            api_key: api_key.to_string(),
        })
    }
}

#[async_trait]
impl ObservationSource for FredClient {
    async fn fetch_series(
        &self,
        series_id: &str,
        label: &str,
        start: Option<NaiveDate>,
    ) -> Result<Series, ApiError> {
        let mut query: Vec<(&str, String)> = vec![
            ("series_id", series_id.to_string()),
            ("api_key", self.api_key.clone()),
            ("file_type", "json".to_string()),
        ];
        if let Some(start) = start {
            query.push(("observation_start", start.format("%Y-%m-%d").to_string()));
        }

        let response = self
            .client
            .get(&self.base_url)
            .query(&query)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let err = responses::classify_error_body(series_id, status, &text);
            tracing::warn!(series_id, %status, error = %err, "FRED request rejected");
            return Err(err);
        }

        let payload: ObservationsResponse = serde_json::from_str(&text)
            .map_err(|e| ApiError::MalformedResponse(format!("bad observations payload: {}", e)))?;

        let observations = payload
            .observations
            .into_iter()
            .map(|raw| raw.into_observation())
            .collect::<Result<Vec<_>, ApiError>>()?;

        // FRED guarantees ascending dates; trust but verify, since every
        // downstream transform leans on the ordering invariant.
        let series = Series::from_observations(series_id, label, observations)
            .map_err(|e| ApiError::MalformedResponse(e.to_string()))?;

        tracing::debug!(series_id, points = series.len(), "fetched series");
        Ok(series)
    }
}
