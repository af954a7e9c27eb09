use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, EMPLOYEES_API_PORT, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn")),
        )
        .init();

    // Initialize configuration (this loads the config singleton)
    let config = employee_records_api::config::config();
    tracing::info!("Starting Employee Records API in {:?} mode", config.environment);

    employee_records_api::server::serve(config).await
}
