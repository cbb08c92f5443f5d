use serde::{Deserialize, Serialize};

/// Default number of trailing transcript entries forwarded to the chat
/// backend as conversation context. The full transcript stays unbounded
/// locally; only the outbound window is trimmed.
pub const DEFAULT_CONTEXT_WINDOW: usize = 10;

/// Client configuration, supplied by the embedding view layer.
/// The core never reads environment variables or config files itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Base URL of the REST backend (e.g., "http://localhost:8000").
    pub base_url: String,

    /// Per-request timeout in seconds. Applied on native targets only;
    /// on wasm32 the browser owns request timeouts.
    pub request_timeout_secs: u64,

    /// Outbound chat context window size (see `DEFAULT_CONTEXT_WINDOW`).
    pub context_window: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            request_timeout_secs: 30,
            context_window: DEFAULT_CONTEXT_WINDOW,
        }
    }
}
