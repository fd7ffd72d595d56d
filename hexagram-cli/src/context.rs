//! Shared command plumbing: global options, client construction, output helpers

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Args;

use hexagram_client::{ApiClient, ClientConfig, FileStorage, Session};

#[derive(Args)]
pub struct GlobalArgs {
    /// File holding the stored session
    #[arg(long, global = true, default_value = ".hexagram-session.json")]
    pub session_file: PathBuf,

    /// Backend base URL (overrides HEXAGRAM_ENV / HEXAGRAM_ORIGIN)
    #[arg(long, global = true)]
    pub base_url: Option<String>,
}

/// Build a gateway bound to the session file
pub fn connect(global: &GlobalArgs) -> Result<ApiClient> {
    let config = match &global.base_url {
        Some(url) => ClientConfig::new(url.as_str()),
        None => ClientConfig::from_env()?,
    };
    let storage = FileStorage::open(&global.session_file).with_context(|| {
        format!("Failed to open session file {}", global.session_file.display())
    })?;
    tracing::debug!("Backend at {}", config.base_url);

    Ok(ApiClient::new(config, Arc::new(Session::load(Arc::new(storage)))))
}

/// Drive one async call to completion
pub fn block_on<F: Future>(future: F) -> Result<F::Output> {
    let runtime = tokio::runtime::Runtime::new()?;
    Ok(runtime.block_on(future))
}

/// Server timestamps are epoch milliseconds
pub fn format_millis(millis: u64) -> String {
    i64::try_from(millis)
        .ok()
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| millis.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_millis() {
        assert_eq!(format_millis(0), "1970-01-01 00:00:00 UTC");
        assert_eq!(format_millis(1_700_000_000_000), "2023-11-14 22:13:20 UTC");
    }

    #[test]
    fn test_format_millis_out_of_range() {
        assert_eq!(format_millis(u64::MAX), u64::MAX.to_string());
    }

    #[test]
    fn test_connect_with_explicit_url() {
        let dir = std::env::temp_dir().join(format!("hexagram-cli-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let global = GlobalArgs {
            session_file: dir.join("session.json"),
            base_url: Some("http://example.test/api/".to_string()),
        };

        let client = connect(&global).unwrap();
        assert_eq!(client.config().base_url, "http://example.test/api");
        assert!(!client.session().is_logged_in());

        std::fs::remove_dir_all(&dir).ok();
    }
}
