//! Policy resolver
//!
//! Answers `POST /config` with whether a client version may use the cache.

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use todo_cache::policy::server::create_policy_router;
use todo_cache::policy::VersionRule;
use todo_cache::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_cache=info,policy_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let rule = VersionRule::new(config.policy_min_version.clone());
    info!(
        "Starting policy resolver: caching enabled for versions > {}",
        rule.min_version()
    );

    let app = create_policy_router(rule);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.policy_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Policy resolver listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = signal::ctrl_c().await {
                warn!("Failed to listen for Ctrl+C: {}", e);
                std::future::pending::<()>().await;
            }
            info!("Received Ctrl+C, initiating shutdown...");
        })
        .await
        .context("server error")?;

    Ok(())
}
