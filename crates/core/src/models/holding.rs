use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::CoreError;

/// Server-assigned identifier for a portfolio position.
pub type HoldingId = i64;

/// One portfolio position as returned by `GET /portfolio`.
///
/// Valuation fields (`total_value`, `gain_loss`, ...) are **methods**, never
/// stored fields: they are recomputed from `shares`/`avg_price`/`current_price`
/// on every call, so they can never go stale. Any derived numbers the backend
/// happens to include in the payload are ignored during deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub id: HoldingId,

    /// Ticker symbol, uppercase canonical form (e.g., "AAPL", "MSFT").
    pub symbol: String,

    /// Human-readable display name (e.g., "Apple Inc.").
    pub name: String,

    /// Number of shares held. Non-negative.
    pub shares: f64,

    /// Average cost basis per share. Non-negative.
    pub avg_price: f64,

    /// Latest market price, if the backend could obtain one.
    /// The wire payload uses `0.0` as an unavailable-price sentinel;
    /// that (and any non-finite junk) normalizes to `None` here.
    #[serde(default, deserialize_with = "deserialize_price")]
    pub current_price: Option<f64>,

    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created_at: DateTime<Utc>,

    #[serde(deserialize_with = "deserialize_timestamp")]
    pub updated_at: DateTime<Utc>,
}

/// The backend stores naive UTC timestamps and serializes them without an
/// offset ("2025-06-01T09:30:00"). RFC 3339 forms are accepted as well.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(dt) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    raw.parse::<NaiveDateTime>()
        .map(|naive| naive.and_utc())
        .map_err(serde::de::Error::custom)
}

/// Normalize the backend's price field: absent, zero, negative, or
/// non-finite values all mean "price unavailable".
fn deserialize_price<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<f64>::deserialize(deserializer)?;
    Ok(raw.filter(|p| p.is_finite() && *p > 0.0))
}

impl Holding {
    /// `shares * avg_price` — always defined.
    #[must_use]
    pub fn total_cost(&self) -> f64 {
        self.shares * self.avg_price
    }

    /// `shares * current_price`, or `None` when the price is unavailable.
    #[must_use]
    pub fn total_value(&self) -> Option<f64> {
        self.current_price.map(|p| self.shares * p)
    }

    /// `total_value - total_cost`, or `None` when the price is unavailable.
    #[must_use]
    pub fn gain_loss(&self) -> Option<f64> {
        self.total_value().map(|v| v - self.total_cost())
    }

    /// Gain/loss as a percentage of cost. Defined only when the price is
    /// available and `total_cost > 0`.
    #[must_use]
    pub fn gain_loss_percent(&self) -> Option<f64> {
        let cost = self.total_cost();
        if cost > 0.0 {
            self.gain_loss().map(|g| g / cost * 100.0)
        } else {
            None
        }
    }
}

/// Payload for `POST /portfolio` — a new position to add.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewHolding {
    pub symbol: String,
    pub name: String,
    pub shares: f64,
    pub avg_price: f64,
}

impl NewHolding {
    /// Builds a create payload with the symbol uppercased and trimmed.
    pub fn new(
        symbol: impl Into<String>,
        name: impl Into<String>,
        shares: f64,
        avg_price: f64,
    ) -> Self {
        Self {
            symbol: symbol.into().trim().to_uppercase(),
            name: name.into(),
            shares,
            avg_price,
        }
    }

    /// Local validation, performed before any network call is issued.
    /// Creation requires strictly positive, finite shares and cost basis.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.symbol.is_empty() {
            return Err(CoreError::Validation("Symbol must not be empty".into()));
        }
        if self.name.trim().is_empty() {
            return Err(CoreError::Validation("Name must not be empty".into()));
        }
        if !self.shares.is_finite() || self.shares <= 0.0 {
            return Err(CoreError::Validation(
                "Shares must be a positive number".into(),
            ));
        }
        if !self.avg_price.is_finite() || self.avg_price <= 0.0 {
            return Err(CoreError::Validation(
                "Average price must be a positive number".into(),
            ));
        }
        Ok(())
    }
}

/// Partial-update payload for `PUT /portfolio/{id}`.
/// Absent fields are omitted from the request body entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HoldingPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shares: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_price: Option<f64>,
}

impl HoldingPatch {
    /// Local validation: at least one field present, every present field
    /// finite and non-negative. Zero is allowed here (a fully-sold
    /// position), unlike creation.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.shares.is_none() && self.avg_price.is_none() {
            return Err(CoreError::Validation(
                "Update must change at least one field".into(),
            ));
        }
        if let Some(shares) = self.shares {
            if !shares.is_finite() || shares < 0.0 {
                return Err(CoreError::Validation(
                    "Shares must be a non-negative number".into(),
                ));
            }
        }
        if let Some(avg_price) = self.avg_price {
            if !avg_price.is_finite() || avg_price < 0.0 {
                return Err(CoreError::Validation(
                    "Average price must be a non-negative number".into(),
                ));
            }
        }
        Ok(())
    }
}
