use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Holds no optimizer: each request builds its own so quota exhaustion seen
/// by one request never leaks into another.
#[derive(Clone)]
pub struct AppState {
    /// Remote text generation. `LlmClient` in production.
    pub llm: Arc<dyn TextGenerator>,
    pub config: Config,
}
