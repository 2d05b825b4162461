use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use readlater_core::{DomainTable, MetadataConfig, MetadataService};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod routes;

use routes::{AppState, router};

const DEFAULT_ADDR: &str = "127.0.0.1:3000";

/// Headroom on top of the worst-case relay walk.
const REQUEST_MARGIN: Duration = Duration::from_secs(5);

/// Upper bound for one `/api/metadata` request: a platform URL can sweep the
/// relay list twice before the generic path gives up.
fn request_timeout(config: &MetadataConfig) -> Duration {
    let attempts = u32::try_from(config.proxies.len().saturating_mul(2)).unwrap_or(u32::MAX);
    config.fetch_timeout.saturating_mul(attempts).saturating_add(REQUEST_MARGIN)
}

/// Settings read from `READLATER_*` environment variables.
struct ServerConfig {
    addr: SocketAddr,
    fetch_timeout: Duration,
    hints: Option<PathBuf>,
}

impl ServerConfig {
    fn from_env() -> Result<Self> {
        let addr = std::env::var("READLATER_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
        let addr: SocketAddr = addr.parse().with_context(|| format!("Invalid READLATER_ADDR: {addr}"))?;

        let fetch_timeout = match std::env::var("READLATER_FETCH_TIMEOUT_MS") {
            Ok(ms) => {
                let ms: u64 = ms.parse().with_context(|| format!("Invalid READLATER_FETCH_TIMEOUT_MS: {ms}"))?;
                Duration::from_millis(ms)
            }
            Err(_) => MetadataConfig::default().fetch_timeout,
        };

        let hints = std::env::var_os("READLATER_HINTS").map(PathBuf::from);

        Ok(Self { addr, fetch_timeout, hints })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("readlater_server=info".parse()?)
                .add_directive("readlater_core=info".parse()?),
        )
        .init();

    let config = ServerConfig::from_env()?;

    let mut domains = DomainTable::builtin();
    if let Some(path) = &config.hints {
        let extra =
            DomainTable::load_file(path).with_context(|| format!("Failed to load hints: {}", path.display()))?;
        info!(path = %path.display(), entries = extra.len(), "loaded domain hints");
        domains = domains.merge(extra);
    }

    let service = MetadataService::builder()
        .config(MetadataConfig::builder().fetch_timeout(config.fetch_timeout).build())
        .domains(domains)
        .build()
        .context("Failed to build metadata service")?;

    let request_timeout = request_timeout(service.config());
    info!(timeout_ms = %request_timeout.as_millis(), "request timeout");
    let app = router(Arc::new(AppState { service }), request_timeout);

    info!("readlater server listening on http://{}", config.addr);
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
