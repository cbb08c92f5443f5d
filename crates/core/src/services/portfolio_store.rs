use std::sync::Arc;

use tracing::{debug, warn};

use crate::backend::traits::Backend;
use crate::errors::CoreError;
use crate::models::holding::{Holding, HoldingId, HoldingPatch, NewHolding};
use crate::models::summary::PortfolioSummary;

/// Client-local cache of the portfolio: the holdings list and the derived
/// summary, refreshed wholesale from the backend after every mutation.
///
/// The store never trusts its own optimistic state: each mutation is
/// submitted, then the authoritative list and summary are re-fetched.
/// That trades a round trip for the guarantee that no client-side merge
/// conflict can exist.
pub struct PortfolioStore {
    backend: Arc<dyn Backend>,
    holdings: Vec<Holding>,
    summary: Option<PortfolioSummary>,
    loading: bool,
    loaded: bool,
    last_error: Option<CoreError>,
}

/// Pending confirmation for a destructive removal. Dropping the prompt
/// declines it; `confirm()` is the only path to a deletable token, so a
/// DELETE can never be issued without the explicit confirmation step.
#[derive(Debug)]
#[must_use = "dropping the prompt declines the removal"]
pub struct RemovalPrompt {
    id: HoldingId,
    symbol: String,
}

impl RemovalPrompt {
    /// The holding the prompt refers to, for display in the confirm dialog.
    #[must_use]
    pub fn holding_id(&self) -> HoldingId {
        self.id
    }

    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn confirm(self) -> ConfirmedRemoval {
        ConfirmedRemoval { id: self.id }
    }
}

/// Proof that the user confirmed a removal. Consumed by
/// [`PortfolioStore::remove_holding`].
#[derive(Debug)]
pub struct ConfirmedRemoval {
    id: HoldingId,
}

/// Sets the loading flag for its lifetime and clears it on drop, so a
/// future abandoned mid-request (an unmounted view) cannot leave the
/// flag stuck.
struct LoadingGuard<'a>(&'a mut bool);

impl<'a> LoadingGuard<'a> {
    fn new(flag: &'a mut bool) -> Self {
        *flag = true;
        Self(flag)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}

impl PortfolioStore {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            holdings: Vec::new(),
            summary: None,
            loading: false,
            loaded: false,
            last_error: None,
        }
    }

    // ── Synchronization ─────────────────────────────────────────────

    /// Fetch the holdings list and the summary in parallel and commit both
    /// atomically. On any failure the prior state is left untouched and the
    /// error is both returned and retained in `last_error` for display.
    pub async fn load(&mut self) -> Result<(), CoreError> {
        let result = {
            let _guard = LoadingGuard::new(&mut self.loading);
            let (holdings, summary) =
                tokio::join!(self.backend.fetch_holdings(), self.backend.fetch_summary());
            holdings.and_then(|h| summary.map(|s| (h, s)))
        };

        match result {
            Ok((holdings, summary)) => {
                debug!(count = holdings.len(), "portfolio loaded");
                self.holdings = holdings;
                self.summary = Some(summary);
                self.loaded = true;
                self.last_error = None;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "portfolio load failed");
                self.last_error = Some(e.clone());
                Err(e)
            }
        }
    }

    // ── Mutations ───────────────────────────────────────────────────

    /// Submit a new holding. Validation runs locally first (no network call
    /// on failure); a backend rejection such as a duplicate symbol surfaces
    /// verbatim as `CoreError::Rejected`. On success the store reloads.
    pub async fn add_holding(&mut self, new_holding: NewHolding) -> Result<(), CoreError> {
        if let Err(e) = new_holding.validate() {
            self.last_error = Some(e.clone());
            return Err(e);
        }

        let result = {
            let _guard = LoadingGuard::new(&mut self.loading);
            self.backend.create_holding(&new_holding).await
        };

        match result {
            Ok(_) => self.load().await,
            Err(e) => {
                warn!(symbol = %new_holding.symbol, error = %e, "add holding failed");
                self.last_error = Some(e.clone());
                Err(e)
            }
        }
    }

    /// Submit a partial update for one holding, then reload.
    pub async fn update_holding(
        &mut self,
        id: HoldingId,
        patch: HoldingPatch,
    ) -> Result<(), CoreError> {
        if let Err(e) = patch.validate() {
            self.last_error = Some(e.clone());
            return Err(e);
        }

        let result = {
            let _guard = LoadingGuard::new(&mut self.loading);
            self.backend.update_holding(id, &patch).await
        };

        match result {
            Ok(_) => self.load().await,
            Err(e) => {
                warn!(id, error = %e, "update holding failed");
                self.last_error = Some(e.clone());
                Err(e)
            }
        }
    }

    /// First step of removal: produce a confirmation prompt for a holding
    /// in the cached list. No network call happens here.
    pub fn request_removal(&self, id: HoldingId) -> Result<RemovalPrompt, CoreError> {
        let holding = self
            .holding(id)
            .ok_or_else(|| CoreError::NotFound("Portfolio item not found".into()))?;
        Ok(RemovalPrompt {
            id,
            symbol: holding.symbol.clone(),
        })
    }

    /// Second step of removal: exactly one DELETE followed by exactly one
    /// reload. Only reachable through a confirmed prompt.
    pub async fn remove_holding(&mut self, confirmed: ConfirmedRemoval) -> Result<(), CoreError> {
        let result = {
            let _guard = LoadingGuard::new(&mut self.loading);
            self.backend.delete_holding(confirmed.id).await
        };

        match result {
            Ok(()) => self.load().await,
            Err(e) => {
                warn!(id = confirmed.id, error = %e, "remove holding failed");
                self.last_error = Some(e.clone());
                Err(e)
            }
        }
    }

    // ── Read accessors ──────────────────────────────────────────────

    #[must_use]
    pub fn holdings(&self) -> &[Holding] {
        &self.holdings
    }

    #[must_use]
    pub fn holding(&self, id: HoldingId) -> Option<&Holding> {
        self.holdings.iter().find(|h| h.id == id)
    }

    #[must_use]
    pub fn summary(&self) -> Option<&PortfolioSummary> {
        self.summary.as_ref()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// True once an initial `load()` has succeeded.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// The most recent failure, retained for display until cleared or until
    /// the next successful load.
    #[must_use]
    pub fn last_error(&self) -> Option<&CoreError> {
        self.last_error.as_ref()
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }
}
