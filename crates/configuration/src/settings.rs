use chrono::NaiveDate;
use serde::Deserialize;

/// The root configuration structure for the entire application.
///
/// Constructed once per run in `main` and threaded explicitly into the
/// fetcher and the web server; nothing reads configuration ambiently.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: Server,
    pub fred: Fred,
}

/// Parameters for the dashboard web server.
#[derive(Debug, Clone, Deserialize)]
pub struct Server {
    /// The socket address the server binds to (e.g., "127.0.0.1:3000").
    pub bind: String,
}

/// Parameters for the FRED observations API client.
#[derive(Debug, Clone, Deserialize)]
pub struct Fred {
    /// Base URL of the observations endpoint. Overridable so tests can point
    /// the client at a local stub server.
    pub base_url: String,

    /// The FRED API key. Read from the `FRED_API_KEY` environment variable;
    /// absence is surfaced by the client as a credential error, never as a
    /// silent empty result.
    pub api_key: Option<String>,

    /// The earliest observation date requested from every series.
    pub observation_start: NaiveDate,
}
