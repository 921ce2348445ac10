use std::sync::Arc;

use divboard::api::router::create_router;
use divboard::config::AppConfig;
use divboard::db::{self, PgTables};
use divboard::services::assets;
use divboard::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    let addr = format!("{}:{}", config.host, config.port);

    tracing::info!("Connecting to database...");
    let pool = db::init_pool(&config.database_url).await?;
    tracing::info!("Database connected");

    // Static assets load once; a missing file only costs decoration.
    let (static_logos, holidays) = tokio::join!(
        assets::load_logo_csv(config.logo_csv_source.as_deref()),
        assets::load_holidays(config.holidays_source.as_deref()),
    );
    tracing::info!(
        logos = static_logos.len(),
        holidays = holidays.len(),
        "Static assets loaded"
    );

    let metrics_handle = divboard::metrics::init_metrics();

    let state = AppState::new(
        Arc::new(PgTables::new(pool)),
        config,
        holidays,
        static_logos,
        metrics_handle,
    );
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {addr}");
    axum::serve(listener, router).await?;

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,divboard=debug"));

    if std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json")) {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer())
            .init();
    }
}
