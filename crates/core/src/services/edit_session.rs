use tracing::debug;

use crate::errors::CoreError;
use crate::models::holding::{Holding, HoldingId, HoldingPatch};
use crate::services::portfolio_store::PortfolioStore;

/// Scratch values for an in-progress edit, pending save.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditDraft {
    pub shares: f64,
    pub avg_price: f64,
}

#[derive(Debug, Clone, PartialEq)]
enum State {
    Idle,
    Editing {
        holding_id: HoldingId,
        draft: EditDraft,
    },
}

/// At most one in-flight edit of a single holding.
///
/// `Idle` → `begin` → `Editing(holding_id, draft)` → `save`/`cancel` → `Idle`.
/// Beginning an edit while another holding is being edited silently discards
/// the unsaved draft; this mirrors the observed UI behavior and is kept
/// deliberately (see DESIGN.md).
pub struct EditSession {
    state: State,
}

impl EditSession {
    pub fn new() -> Self {
        Self { state: State::Idle }
    }

    /// Start editing a holding, seeding the draft from its current values.
    /// Re-beginning on the same holding resets the draft the same way.
    pub fn begin(&mut self, holding: &Holding) {
        if let State::Editing { holding_id, .. } = &self.state {
            if *holding_id != holding.id {
                debug!(
                    from = *holding_id,
                    to = holding.id,
                    "switching edit target, unsaved draft discarded"
                );
            }
        }
        self.state = State::Editing {
            holding_id: holding.id,
            draft: EditDraft {
                shares: holding.shares,
                avg_price: holding.avg_price,
            },
        };
    }

    pub fn set_shares(&mut self, shares: f64) -> Result<(), CoreError> {
        match &mut self.state {
            State::Editing { draft, .. } => {
                draft.shares = shares;
                Ok(())
            }
            State::Idle => Err(CoreError::NoActiveEdit),
        }
    }

    pub fn set_avg_price(&mut self, avg_price: f64) -> Result<(), CoreError> {
        match &mut self.state {
            State::Editing { draft, .. } => {
                draft.avg_price = avg_price;
                Ok(())
            }
            State::Idle => Err(CoreError::NoActiveEdit),
        }
    }

    /// Submit the draft through the store. The session returns to `Idle`
    /// only after the store confirms; any failure (local validation or
    /// backend) leaves it in `Editing` with the draft intact.
    pub async fn save(&mut self, store: &mut PortfolioStore) -> Result<(), CoreError> {
        let (holding_id, draft) = match &self.state {
            State::Editing { holding_id, draft } => (*holding_id, *draft),
            State::Idle => return Err(CoreError::NoActiveEdit),
        };

        let patch = HoldingPatch {
            shares: Some(draft.shares),
            avg_price: Some(draft.avg_price),
        };
        store.update_holding(holding_id, patch).await?;

        self.state = State::Idle;
        Ok(())
    }

    /// Discard the draft unconditionally. No-op from `Idle`.
    pub fn cancel(&mut self) {
        self.state = State::Idle;
    }

    #[must_use]
    pub fn is_editing(&self) -> bool {
        matches!(self.state, State::Editing { .. })
    }

    /// The holding currently being edited, if any.
    #[must_use]
    pub fn target(&self) -> Option<HoldingId> {
        match &self.state {
            State::Editing { holding_id, .. } => Some(*holding_id),
            State::Idle => None,
        }
    }

    #[must_use]
    pub fn draft(&self) -> Option<&EditDraft> {
        match &self.state {
            State::Editing { draft, .. } => Some(draft),
            State::Idle => None,
        }
    }
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new()
    }
}
