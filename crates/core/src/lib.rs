pub mod backend;
pub mod errors;
pub mod format;
pub mod models;
pub mod services;

use std::sync::Arc;

use backend::rest::RestBackend;
use backend::traits::Backend;
use errors::CoreError;
use models::chat::ChatMessage;
use models::holding::{HoldingId, HoldingPatch, NewHolding};
use models::settings::Settings;
use models::stock::{StockDetails, StockQuote};
use models::summary::PortfolioSummary;
use services::assistant::AssistantSession;
use services::edit_session::{EditDraft, EditSession};
use services::portfolio_store::{ConfirmedRemoval, PortfolioStore, RemovalPrompt};
use services::stock_lookup::StockLookup;

/// Main entry point for the Stockmate core library.
///
/// Owns one shared backend handle and the four client-side components:
/// the portfolio store, the stock lookup client, the edit session, and
/// the assistant session. The embedding view layer calls the delegating
/// methods below on user actions and re-renders from the read accessors.
#[must_use]
pub struct Stockmate {
    store: PortfolioStore,
    lookup: StockLookup,
    edit: EditSession,
    assistant: AssistantSession,
}

impl std::fmt::Debug for Stockmate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stockmate")
            .field("holdings", &self.store.holdings().len())
            .field("loaded", &self.store.is_loaded())
            .field("editing", &self.edit.target())
            .field("transcript", &self.assistant.transcript().len())
            .finish()
    }
}

impl Stockmate {
    /// Wire up against the REST backend described by `settings`.
    pub fn new(settings: Settings) -> Self {
        let backend: Arc<dyn Backend> = Arc::new(RestBackend::new(&settings));
        Self::build(backend, &settings)
    }

    /// Wire up against an arbitrary `Backend` implementation (tests,
    /// alternative transports).
    pub fn with_backend(backend: Arc<dyn Backend>, settings: &Settings) -> Self {
        Self::build(backend, settings)
    }

    // ── Portfolio ───────────────────────────────────────────────────

    /// Refresh the holdings list and summary from the backend.
    pub async fn load_portfolio(&mut self) -> Result<(), CoreError> {
        self.store.load().await
    }

    /// Add a new holding, then resynchronize.
    pub async fn add_holding(
        &mut self,
        symbol: impl Into<String>,
        name: impl Into<String>,
        shares: f64,
        avg_price: f64,
    ) -> Result<(), CoreError> {
        self.store
            .add_holding(NewHolding::new(symbol, name, shares, avg_price))
            .await
    }

    /// Partially update one holding, then resynchronize.
    pub async fn update_holding(
        &mut self,
        id: HoldingId,
        patch: HoldingPatch,
    ) -> Result<(), CoreError> {
        self.store.update_holding(id, patch).await
    }

    /// First removal step: produce the confirmation prompt.
    pub fn request_removal(&self, id: HoldingId) -> Result<RemovalPrompt, CoreError> {
        self.store.request_removal(id)
    }

    /// Second removal step: issue the confirmed DELETE and resynchronize.
    pub async fn remove_holding(&mut self, confirmed: ConfirmedRemoval) -> Result<(), CoreError> {
        self.store.remove_holding(confirmed).await
    }

    #[must_use]
    pub fn holdings(&self) -> &[models::holding::Holding] {
        self.store.holdings()
    }

    #[must_use]
    pub fn summary(&self) -> Option<&PortfolioSummary> {
        self.store.summary()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.store.is_loading()
    }

    #[must_use]
    pub fn last_error(&self) -> Option<&CoreError> {
        self.store.last_error()
    }

    pub fn clear_error(&mut self) {
        self.store.clear_error();
    }

    // ── Stock lookup ────────────────────────────────────────────────

    /// Quick lookup for the search form.
    pub async fn lookup_quote(&self, raw_symbol: &str) -> Result<StockQuote, CoreError> {
        self.lookup.quote(raw_symbol).await
    }

    /// Extended detail payload for the chart modal.
    pub async fn lookup_details(&self, raw_symbol: &str) -> Result<StockDetails, CoreError> {
        self.lookup.details(raw_symbol).await
    }

    // ── Edit session ────────────────────────────────────────────────

    /// Begin editing a holding from the cached list.
    pub fn begin_edit(&mut self, id: HoldingId) -> Result<(), CoreError> {
        let holding = self
            .store
            .holding(id)
            .ok_or_else(|| CoreError::NotFound("Portfolio item not found".into()))?;
        self.edit.begin(holding);
        Ok(())
    }

    pub fn set_draft_shares(&mut self, shares: f64) -> Result<(), CoreError> {
        self.edit.set_shares(shares)
    }

    pub fn set_draft_avg_price(&mut self, avg_price: f64) -> Result<(), CoreError> {
        self.edit.set_avg_price(avg_price)
    }

    /// Submit the draft; returns to idle only once the store confirms.
    pub async fn save_edit(&mut self) -> Result<(), CoreError> {
        self.edit.save(&mut self.store).await
    }

    /// Discard the draft unconditionally.
    pub fn cancel_edit(&mut self) {
        self.edit.cancel();
    }

    #[must_use]
    pub fn editing(&self) -> Option<HoldingId> {
        self.edit.target()
    }

    #[must_use]
    pub fn edit_draft(&self) -> Option<&EditDraft> {
        self.edit.draft()
    }

    // ── Assistant ───────────────────────────────────────────────────

    /// One assistant turn; request failures degrade into a fallback
    /// transcript entry rather than an error.
    pub async fn send_chat(&mut self, message: &str) -> Result<(), CoreError> {
        self.assistant.send(message).await
    }

    /// Empty the transcript. No confirmation step.
    pub fn clear_chat(&mut self) {
        self.assistant.clear();
    }

    #[must_use]
    pub fn transcript(&self) -> &[ChatMessage] {
        self.assistant.transcript()
    }

    #[must_use]
    pub fn is_chat_busy(&self) -> bool {
        self.assistant.is_busy()
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(backend: Arc<dyn Backend>, settings: &Settings) -> Self {
        let store = PortfolioStore::new(Arc::clone(&backend));
        let lookup = StockLookup::new(Arc::clone(&backend));
        let assistant = AssistantSession::new(backend, settings.context_window);

        Self {
            store,
            lookup,
            edit: EditSession::new(),
            assistant,
        }
    }
}
