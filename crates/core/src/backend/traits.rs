use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::chat::ChatMessage;
use crate::models::holding::{Holding, HoldingId, HoldingPatch, NewHolding};
use crate::models::stock::{StockDetails, StockQuote};
use crate::models::summary::PortfolioSummary;

/// Trait abstraction over the REST backend, one method per endpoint.
///
/// The services never touch HTTP directly; they hold an `Arc<dyn Backend>`.
/// Tests substitute an in-memory implementation, and alternative transports
/// (e.g. a Tauri IPC bridge) slot in the same way.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait Backend: Send + Sync {
    /// `GET /stock/{symbol}` — quick lookup snapshot.
    async fn fetch_quote(&self, symbol: &str) -> Result<StockQuote, CoreError>;

    /// `GET /stock/{symbol}/details` — extended detail for the chart modal.
    async fn fetch_details(&self, symbol: &str) -> Result<StockDetails, CoreError>;

    /// `GET /portfolio` — full holdings list with current prices.
    async fn fetch_holdings(&self) -> Result<Vec<Holding>, CoreError>;

    /// `GET /portfolio/summary` — aggregate valuation.
    async fn fetch_summary(&self) -> Result<PortfolioSummary, CoreError>;

    /// `POST /portfolio` — add a holding. Returns the created row.
    async fn create_holding(&self, new_holding: &NewHolding) -> Result<Holding, CoreError>;

    /// `PUT /portfolio/{id}` — partial update of one holding.
    async fn update_holding(
        &self,
        id: HoldingId,
        patch: &HoldingPatch,
    ) -> Result<Holding, CoreError>;

    /// `DELETE /portfolio/{id}` — remove a holding. The ack body is ignored.
    async fn delete_holding(&self, id: HoldingId) -> Result<(), CoreError>;

    /// `POST /chat` — one assistant turn. `history` is the trimmed context
    /// window, excluding `message` itself.
    async fn send_chat(
        &self,
        message: &str,
        history: &[ChatMessage],
    ) -> Result<String, CoreError>;
}
