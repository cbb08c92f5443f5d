use std::sync::Arc;

use crate::backend::traits::Backend;
use crate::errors::CoreError;
use crate::models::stock::{StockDetails, StockQuote};

/// Stateless lookup client: normalizes a raw ticker and fetches the
/// snapshot or detail payload for it. One request per lookup, nothing
/// cached.
pub struct StockLookup {
    backend: Arc<dyn Backend>,
}

impl StockLookup {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }

    /// Trim and uppercase a raw ticker. Empty or whitespace-only input
    /// fails validation locally; no network call is issued for it.
    pub fn normalize_symbol(raw: &str) -> Result<String, CoreError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CoreError::Validation(
                "Please enter a stock symbol".into(),
            ));
        }
        Ok(trimmed.to_uppercase())
    }

    /// Quick lookup: `{symbol, name, price, summary}`.
    /// A missing ticker surfaces as `CoreError::NotFound`, distinct from
    /// generic network failure.
    pub async fn quote(&self, raw_symbol: &str) -> Result<StockQuote, CoreError> {
        let symbol = Self::normalize_symbol(raw_symbol)?;
        self.backend.fetch_quote(&symbol).await
    }

    /// Extended detail payload for the chart modal.
    pub async fn details(&self, raw_symbol: &str) -> Result<StockDetails, CoreError> {
        let symbol = Self::normalize_symbol(raw_symbol)?;
        self.backend.fetch_details(&symbol).await
    }
}
