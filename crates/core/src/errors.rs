use thiserror::Error;

/// Unified error type for the entire stockmate-core library.
/// Every public fallible function returns `Result<T, CoreError>`.
///
/// Derives `Clone`/`PartialEq` so stateful components (e.g. `PortfolioStore`)
/// can retain a retrievable copy as their displayed error flag.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    // ── Local validation (no network call was issued) ───────────────
    #[error("Validation error: {0}")]
    Validation(String),

    // ── Backend responses ───────────────────────────────────────────
    #[error("Not found: {0}")]
    NotFound(String),

    /// The backend rejected a mutation (HTTP 400/422). The server-supplied
    /// message is passed through verbatim for display.
    #[error("{0}")]
    Rejected(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    // ── Transport / decoding ────────────────────────────────────────
    #[error("Network error: {0}")]
    Network(String),

    #[error("Response decode error: {0}")]
    Decode(String),

    // ── Component state ─────────────────────────────────────────────
    #[error("A chat request is already in flight")]
    ChatBusy,

    #[error("No holding is currently being edited")]
    NoActiveEdit,
}

impl CoreError {
    /// True for failures the user can recover from by re-issuing the
    /// same action (nothing in this library is fatal).
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            CoreError::Network(_) | CoreError::Api { .. } | CoreError::Decode(_)
        )
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // Sanitize error message: strip query parameters from URLs so a
        // backend that moves behind keyed endpoints never leaks secrets
        // into logs or UI. reqwest errors often contain full URLs.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::Network(sanitized)
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Decode(e.to_string())
    }
}
