//! Pasture Management Platform - Backend Server

use std::{net::SocketAddr, sync::Arc, time::Duration};

use rust_decimal::Decimal;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pms_backend::external::soil_moisture::SoilMoistureClient;
use pms_backend::external::vegetation::{CoarseVegetationClient, HighResVegetationClient};
use pms_backend::external::weather::WeatherClient;
use pms_backend::services::{AssessmentService, ModelStore, SourceReaders};
use pms_backend::store::{PgParcelStore, PgReportStore};
use pms_backend::{config, create_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pms_server=debug,pms_backend=debug,tower_http=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::load()?;

    tracing::info!("Starting Pasture Management Server");
    tracing::info!("Environment: {}", config.environment);

    // Create database connection pool
    tracing::info!("Connecting to database...");
    let db_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .acquire_timeout(Duration::from_secs(30))
        .connect(&config.database.url)
        .await?;

    tracing::info!("Database connection established");

    // Run migrations in development
    if config.environment == "development" {
        tracing::info!("Running database migrations...");
        sqlx::migrate!("./migrations").run(&db_pool).await?;
        tracing::info!("Migrations completed");
    }

    // Wire the signal readers
    let readers = SourceReaders {
        vegetation_high_res: Arc::new(HighResVegetationClient::new(
            config.vegetation.high_res_endpoint.clone(),
            config.vegetation.api_key.clone(),
        )),
        vegetation_coarse: Arc::new(CoarseVegetationClient::new(
            config.vegetation.coarse_endpoint.clone(),
            config.vegetation.api_key.clone(),
        )),
        soil_moisture: Arc::new(SoilMoistureClient::new(config.soil_moisture.endpoint.clone())),
        weather: Arc::new(WeatherClient::new(config.weather.endpoint.clone())),
    };

    let default_cost_per_kg =
        Decimal::from_f64_retain(config.feed.default_cost_per_kg).unwrap_or_default();

    let assessments = AssessmentService::new(
        Arc::new(PgParcelStore::new(db_pool.clone())),
        readers,
        Arc::new(ModelStore::new(config.models.dir.clone())),
        Arc::new(PgReportStore::new(db_pool)),
        default_cost_per_kg,
    );

    // Create application state
    let state = AppState {
        assessments: Arc::new(assessments),
        config: Arc::new(config.clone()),
    };

    // Build application
    let app = create_app(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
