use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::backend::traits::Backend;
use crate::errors::CoreError;
use crate::models::chat::ChatMessage;

/// Fixed assistant reply appended when a chat request fails; the raw error
/// is never surfaced into the transcript.
pub const FALLBACK_REPLY: &str = "Sorry, I encountered an error. Please make sure the backend is running and your OpenAI API key is configured.";

/// Identifies one outbound chat request. A completion is only applied if
/// its token still matches the session's in-flight token, so responses
/// that land after `clear()` are discarded instead of resurrecting a
/// cleared transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SendToken(Uuid);

/// Everything needed to issue one chat request: the current message plus
/// the trimmed trailing context window (which excludes the message itself).
#[derive(Debug, Clone)]
pub struct OutboundChat {
    pub token: SendToken,
    pub message: String,
    pub history: Vec<ChatMessage>,
}

/// Conversational session: an unbounded local transcript and a bounded
/// outbound context window.
///
/// The API is split-phase (`begin_send` / `finish_send`) so a UI event loop
/// can drive the request itself; `send` composes the two around the backend
/// call for embedders that just want one awaitable.
pub struct AssistantSession {
    backend: Arc<dyn Backend>,
    transcript: Vec<ChatMessage>,
    in_flight: Option<SendToken>,
    context_window: usize,
}

impl AssistantSession {
    pub fn new(backend: Arc<dyn Backend>, context_window: usize) -> Self {
        Self {
            backend,
            transcript: Vec::new(),
            in_flight: None,
            context_window,
        }
    }

    /// Append the user message optimistically and produce the outbound
    /// payload. Fails with `Validation` on empty/whitespace input and with
    /// `ChatBusy` while a send is in flight; the transcript is unchanged in
    /// both cases.
    ///
    /// The context window is the trailing `context_window` transcript
    /// entries *including* the just-appended message, which is then removed
    /// from the history payload and sent separately as the current message.
    pub fn begin_send(&mut self, message: &str) -> Result<OutboundChat, CoreError> {
        let trimmed = message.trim();
        if trimmed.is_empty() {
            return Err(CoreError::Validation("Message must not be empty".into()));
        }
        if self.in_flight.is_some() {
            return Err(CoreError::ChatBusy);
        }

        self.transcript.push(ChatMessage::user(trimmed));

        // Trailing window over the transcript including the new message,
        // which is then dropped from the history payload; a window of N
        // therefore carries at most N-1 prior entries.
        let start = self.transcript.len().saturating_sub(self.context_window.max(1));
        let window = &self.transcript[start..];
        let history = window[..window.len() - 1].to_vec();

        let token = SendToken(Uuid::new_v4());
        self.in_flight = Some(token);
        debug!(history_len = history.len(), "chat send started");

        Ok(OutboundChat {
            token,
            message: trimmed.to_string(),
            history,
        })
    }

    /// Apply the outcome of a send. A stale token (anything but the current
    /// in-flight one) is ignored entirely. On success the reply is appended;
    /// on failure the fixed [`FALLBACK_REPLY`] is appended instead of the
    /// raw error.
    pub fn finish_send(&mut self, token: SendToken, result: Result<String, CoreError>) {
        if self.in_flight != Some(token) {
            debug!("discarding stale chat completion");
            return;
        }
        self.in_flight = None;

        match result {
            Ok(reply) => self.transcript.push(ChatMessage::assistant(reply)),
            Err(e) => {
                debug!(error = %e, "chat send failed, appending fallback reply");
                self.transcript.push(ChatMessage::assistant(FALLBACK_REPLY));
            }
        }
    }

    /// One full assistant turn. Returns `Err` only for the pre-network
    /// failures (`Validation`, `ChatBusy`); a failed request degrades into
    /// the fallback transcript entry and still returns `Ok`.
    pub async fn send(&mut self, message: &str) -> Result<(), CoreError> {
        let outbound = self.begin_send(message)?;
        let result = self
            .backend
            .send_chat(&outbound.message, &outbound.history)
            .await;
        self.finish_send(outbound.token, result);
        Ok(())
    }

    /// Empty the transcript unconditionally and invalidate any in-flight
    /// send. No confirmation step, unlike holding removal; the asymmetry is
    /// observed behavior, kept deliberately (see DESIGN.md).
    pub fn clear(&mut self) {
        self.transcript.clear();
        self.in_flight = None;
    }

    #[must_use]
    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    #[must_use]
    pub fn context_window(&self) -> usize {
        self.context_window
    }
}
