use exercisedb_client::config::Config;
use exercisedb_client::export::{self, BatchSize};
use exercisedb_client::http_client::ReqwestExerciseDbClient;
use exercisedb_client::store::Store;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Configure logging from env var `EXERCISEDB_LOG_LEVEL` (or fallback to `RUST_LOG`, default `info`).
    let log_env = std::env::var("EXERCISEDB_LOG_LEVEL")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "info".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_new(&log_env)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(env_filter)
        .init();

    let config = Config::from_env()?;
    if config.api_key.is_none() {
        tracing::warn!("no API key in environment or key file; requests will likely be rejected upstream");
    }
    let batch_size =
        BatchSize::parse(&std::env::var("EXERCISEDB_BATCH_SIZE").unwrap_or_default())?;

    let client = ReqwestExerciseDbClient::new(&config.base_url, config.api_key.clone());
    let store = Store::new(&config.data_dir, client)?;

    tracing::info!(data_dir = %config.data_dir.display(), ?batch_size, "starting full export");
    let summary = export::export_all(&store, batch_size).await?;
    tracing::info!(
        rows = summary.rows,
        files = summary.files.len(),
        "export finished"
    );

    Ok(())
}
