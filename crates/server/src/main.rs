use std::sync::Arc;

use anyhow::Context;
use precis_core::{Dictionary, HttpFetcher, NoiseFilter, Pipeline, PipelineConfig};
use tracing_subscriber::EnvFilter;

mod config;
mod routes;
mod store;

use config::ServerConfig;
use routes::AppState;
use store::PgStore;

const DEFAULT_FILTER: &str = "precis_server=info,precis_core=info,tower_http=info";

fn build_pipeline(config: &ServerConfig) -> anyhow::Result<Pipeline<HttpFetcher>> {
    let mut builder = PipelineConfig::builder().timeout(config.fetch_timeout);
    if let Some(path) = &config.noise {
        let noise = NoiseFilter::from_file(path)
            .with_context(|| format!("load noise phrases from {}", path.display()))?;
        builder = builder.noise(noise);
    }

    let dictionary = match &config.dictionary {
        Some(path) => Dictionary::from_file(path).with_context(|| format!("load dictionary from {}", path.display()))?,
        None => Dictionary::load_default().context("load dictionary")?,
    };
    tracing::info!(entries = dictionary.len(), "dictionary loaded");

    Pipeline::new(builder.build(), Arc::new(dictionary)).context("build HTTP client")
}

/// Connects the store when `DATABASE_URL` is set. A database that cannot be
/// reached at startup disables persistence instead of stopping the server.
async fn connect_store(config: &ServerConfig) -> Option<Arc<PgStore>> {
    let url = config.database_url.as_deref()?;
    let host = config.database_host().unwrap_or_else(|| "<unparsed>".to_string());

    match PgStore::connect(url).await {
        Ok(store) => {
            tracing::info!(%host, "persistence enabled");
            Some(Arc::new(store))
        }
        Err(err) => {
            tracing::warn!(%host, error = %format!("{err:#}"), "persistence disabled");
            None
        }
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(%err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = ServerConfig::from_env()?;
    let pipeline = Arc::new(build_pipeline(&config)?);
    let store = connect_store(&config).await;

    let app = routes::router(AppState::new(pipeline, store));

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("bind {}", config.addr))?;
    let addr = listener.local_addr().context("get listener local address")?;

    tracing::info!(%addr, "listening");
    tracing::info!("  POST /api/summarize");
    tracing::info!("  GET  /health");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serve HTTP")?;

    Ok(())
}
