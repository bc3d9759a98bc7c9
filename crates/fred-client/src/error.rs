use thiserror::Error;

/// The distinct failure kinds of a series fetch.
///
/// Each variant maps to a specific user-visible message on the affected
/// chart, so a credential problem never masquerades as a network outage.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("FRED credential error: {0}")]
    Credential(String),

    #[error("The request to FRED failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("FRED does not recognize series '{0}'")]
    UnknownSeries(String),

    #[error("Failed to interpret the FRED response: {0}")]
    MalformedResponse(String),

    #[error("The FRED API returned an error: {0}")]
    Api(String),
}
