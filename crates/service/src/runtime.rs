//! Runtime environment helpers
//!
//! Thin wrapper around `common::env` so the server crate can run startup
//! checks without depending directly on `common` internals.

/// Warn when the landing page is missing.
pub async fn ensure_env(frontend_dir: &str) -> anyhow::Result<()> {
    common::env::ensure_env(frontend_dir).await
}
