//! Environment/runtime helpers
//!
//! Sanity checks run once at startup.

use tracing::warn;

/// Warn when the landing page cannot be served; the API itself still works.
pub async fn ensure_env(frontend_dir: &str) -> anyhow::Result<()> {
    let index = format!("{}/index.html", frontend_dir.trim_end_matches('/'));
    if tokio::fs::metadata(&index).await.is_err() {
        warn!(%frontend_dir, "landing page not found; GET / will 404");
    }
    Ok(())
}
