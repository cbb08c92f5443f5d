use serde::{Deserialize, Serialize};

use super::holding::Holding;

/// Aggregate valuation across all holdings, as served by
/// `GET /portfolio/summary`.
///
/// Holdings without an available price are excluded from the monetary
/// sums but still counted in `item_count`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub total_value: f64,
    pub total_cost: f64,
    pub total_gain_loss: f64,
    pub total_gain_loss_percent: f64,
    pub item_count: usize,
}

impl PortfolioSummary {
    /// Canonical derivation from a holdings list. The backend computes the
    /// served summary the same way; this exists so the client can verify or
    /// re-derive totals without another round trip.
    #[must_use]
    pub fn from_holdings(holdings: &[Holding]) -> Self {
        let mut total_value = 0.0;
        let mut total_cost = 0.0;

        for holding in holdings {
            if let Some(value) = holding.total_value() {
                total_value += value;
                total_cost += holding.total_cost();
            }
        }

        let total_gain_loss = total_value - total_cost;
        let total_gain_loss_percent = if total_cost > 0.0 {
            total_gain_loss / total_cost * 100.0
        } else {
            0.0
        };

        Self {
            total_value,
            total_cost,
            total_gain_loss,
            total_gain_loss_percent,
            item_count: holdings.len(),
        }
    }
}

impl Default for PortfolioSummary {
    fn default() -> Self {
        Self::from_holdings(&[])
    }
}
