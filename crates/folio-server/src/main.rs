mod api;
mod middleware;
mod rate_limit;
mod relay;
mod snapshot_cache;

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};
use crate::rate_limit::RateLimiter;
use crate::snapshot_cache::SnapshotCache;

/// Timeout for calls to the email provider.
const MAILER_TIMEOUT_SECS: u64 = 10;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = folio_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cms = folio_cms::CmsClient::new(&config.cms_url, config.cms_timeout_secs)?;
    let cache = Arc::new(SnapshotCache::new(
        folio_cms::ContentAggregator::new(cms),
        Duration::from_secs(config.snapshot_ttl_secs),
    ));

    let mailer = match config.resend_api_key.as_deref() {
        Some(key) => Some(Arc::new(folio_mailer::MailerClient::new(
            key,
            MAILER_TIMEOUT_SECS,
        )?)),
        None => {
            tracing::warn!(
                "RESEND_API_KEY not set; contact submissions fall back to mailto links"
            );
            None
        }
    };

    let limiter = RateLimiter::new(
        config.contact_rate_limit,
        Duration::from_secs(config.contact_rate_window_secs),
    );

    let app = build_app(AppState {
        cache,
        limiter,
        mailer,
        from_address: config.resend_from_email.clone(),
        revalidate_secret: config.revalidate_secret.clone(),
    });

    tracing::info!(addr = %config.bind_addr, env = %config.env, "starting folio server");
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
