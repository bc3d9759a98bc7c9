use axum::{routing::get, Router};
use configuration::Config;
use fred_client::{FredClient, ObservationSource};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;
pub mod pipeline;

pub use handlers::validate_start;
pub use pipeline::{build_dashboard, Dashboard, Panel, PanelOutcome, PANELS};

/// The shared application state that all handlers can access.
///
/// The source is a trait object so the router can be exercised against a
/// mock in tests. Nothing here is mutable: every request re-fetches from
/// scratch.
pub struct AppState {
    pub config: Config,
    pub source: Arc<dyn ObservationSource>,
}

/// Builds the application router for the given state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any());

    Router::new()
        .route("/", get(handlers::dashboard_page))
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/dashboard", get(handlers::get_dashboard))
        .with_state(Arc::new(state))
        .layer(cors)
        // This middleware logs information about every incoming request.
        .layer(TraceLayer::new_for_http())
}

/// The main function to configure and run the web server.
///
/// Tracing is initialized in `main`, not here, so the subscriber is set up
/// exactly once per process.
pub async fn run_server(config: Config) -> anyhow::Result<()> {
    let client = FredClient::new(&config.fred)?;
    let addr: SocketAddr = config.server.bind.parse()?;

    let app = router(AppState {
        config,
        source: Arc::new(client),
    });

    tracing::info!("Dashboard listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
