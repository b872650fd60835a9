use axum::Router;
use configs::{AppConfig, ServerConfig};
use migration::MigratorTrait;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes;
use crate::state::AppState;
use service::runtime;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Bind `host:port`; hostnames such as `localhost` are resolved first.
async fn bind_listener(server: &ServerConfig) -> anyhow::Result<TcpListener> {
    let listener = TcpListener::bind((server.host.as_str(), server.port)).await?;
    Ok(listener)
}

/// Resolves on Ctrl+C so in-flight requests can finish.
async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("received Ctrl+C, draining connections");
    }
}

/// Public entry: connect storage, bootstrap the schema, and serve HTTP until Ctrl+C
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    runtime::ensure_env(&cfg.frontend_dir).await?;

    let db = models::db::connect_with_config(&cfg.database).await?;
    // Schema bootstrap runs once per process; already-applied migrations are skipped
    migration::Migrator::up(&db, None).await?;
    info!("database schema ready");

    let state = AppState::from_config(&cfg, db);
    let app: Router = routes::build_router(state, build_cors());

    let listener = bind_listener(&cfg.server).await?;
    let addr = listener.local_addr()?;
    info!(%addr, host = %cfg.server.host, "starting alert server");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn binds_ip_literal_from_config() {
        let cfg = ServerConfig { host: "127.0.0.1".into(), port: 0, worker_threads: None };
        let addr = bind_listener(&cfg).await.unwrap().local_addr().unwrap();
        assert!(addr.ip().is_loopback());
        assert_ne!(addr.port(), 0);
    }

    #[tokio::test]
    async fn binds_hostname_after_resolving_it() {
        let cfg = ServerConfig { host: "localhost".into(), port: 0, worker_threads: None };
        let addr = bind_listener(&cfg).await.unwrap().local_addr().unwrap();
        assert!(addr.ip().is_loopback());
    }

    #[tokio::test]
    async fn unresolvable_host_is_an_error() {
        let cfg = ServerConfig { host: "no such host".into(), port: 0, worker_threads: None };
        assert!(bind_listener(&cfg).await.is_err());
    }
}
