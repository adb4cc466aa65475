use std::path::Path;
use std::sync::Arc;

use sched_assist::api::HttpApi;
use sched_assist::config::AppConfig;
use sched_assist::locale::Locale;
use sched_assist::onboarding::{LogTelemetry, MemoryProfileCache, OnboardingRouteState, onboarding_routes};
use sched_assist::store::{ClientStore, LibSqlStore};
use tower_http::cors::CorsLayer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = AppConfig::from_env()?;

    let store: Arc<dyn ClientStore> =
        Arc::new(LibSqlStore::new_local(Path::new(&config.db_path)).await?);

    let api = Arc::new(HttpApi::new(
        config.api_base_url.clone(),
        config.api_token.clone(),
    ));

    let state = OnboardingRouteState {
        api,
        store,
        cache: Arc::new(MemoryProfileCache::new()),
        telemetry: Arc::new(LogTelemetry),
        locale: Locale::default(),
        user_id: config.user_id.clone(),
    };

    let app = onboarding_routes(state).layer(CorsLayer::permissive());

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, api = %config.api_base_url, "Onboarding service listening");
    axum::serve(listener, app).await?;

    Ok(())
}
