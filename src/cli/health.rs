//! `speedfit health`: probe the backend before uploading.

use std::sync::Arc;

use crate::adapters::ReqwestHttpClient;
use crate::client::{display_health_check_results, run_health_check};
use crate::config::BackendConfig;
use crate::error::SpeedfitResult;

/// Resolve the backend URL from the environment and an optional override.
pub fn health_config(url: Option<&str>) -> SpeedfitResult<BackendConfig> {
    let mut config = BackendConfig::from_env()?;
    if let Some(url) = url {
        config = config.with_base_url(url);
    }
    config.validate()?;
    Ok(config)
}

/// Handle `speedfit health`.
///
/// Succeeds only when the backend is healthy and its model is loaded.
pub fn handle_health_command(url: Option<String>) -> SpeedfitResult<bool> {
    let config = health_config(url.as_deref())?;
    let http = Arc::new(ReqwestHttpClient::new());

    let runtime = tokio::runtime::Runtime::new()?;
    let result = runtime.block_on(run_health_check(http.as_ref(), &config.base_url));

    display_health_check_results(&result, &config.base_url);
    Ok(result.ready())
}
