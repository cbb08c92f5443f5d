use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;
use tracing::{debug, warn};

use super::traits::Backend;
use crate::errors::CoreError;
use crate::models::chat::ChatMessage;
use crate::models::holding::{Holding, HoldingId, HoldingPatch, NewHolding};
use crate::models::settings::Settings;
use crate::models::stock::{StockDetails, StockQuote};
use crate::models::summary::PortfolioSummary;

/// `Backend` implementation over the investment-tracker REST API.
///
/// One `reqwest::Client` for the lifetime of the backend; per-request
/// timeout is configured on native targets only (the browser owns
/// timeouts on wasm32).
pub struct RestBackend {
    client: Client,
    base_url: String,
}

impl RestBackend {
    pub fn new(settings: &Settings) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(settings.request_timeout_secs));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Map a completed response to a decoded value or a `CoreError` per the
    /// status taxonomy. `not_found` is the user-facing fallback when a 404
    /// arrives without a usable `detail` field.
    async fn decode<T: DeserializeOwned>(
        resp: Response,
        not_found: &str,
    ) -> Result<T, CoreError> {
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            let code = status.as_u16();
            let detail = extract_detail(&body).unwrap_or_else(|| {
                if code == 404 {
                    not_found.to_string()
                } else {
                    format!("HTTP {code}")
                }
            });
            warn!(status = code, detail = %detail, "backend request failed");
            return Err(map_status(code, detail));
        }

        Ok(serde_json::from_str(&body)?)
    }
}

/// Pull the FastAPI-style `detail` out of an error body. Plain mutation
/// rejections carry a string; 422 validation errors carry an array of
/// `{loc, msg, type}` entries, of which the first `msg` is taken.
fn extract_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Array(items) => items
            .first()?
            .get("msg")?
            .as_str()
            .map(str::to_owned),
        _ => None,
    }
}

/// Status taxonomy: 404 is distinguished so the UI can show a tailored
/// message; 400/422 pass the server's rejection text through verbatim;
/// everything else is a generic retryable API failure.
fn map_status(status: u16, detail: String) -> CoreError {
    match status {
        404 => CoreError::NotFound(detail),
        400 | 422 => CoreError::Rejected(detail),
        _ => CoreError::Api {
            status,
            message: detail,
        },
    }
}

// ── Wire payloads (private to this transport) ───────────────────────

#[derive(Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
    history: &'a [ChatMessage],
}

#[derive(Deserialize)]
struct ChatReply {
    reply: String,
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl Backend for RestBackend {
    async fn fetch_quote(&self, symbol: &str) -> Result<StockQuote, CoreError> {
        debug!(symbol, "fetching quote");
        let resp = self
            .client
            .get(self.url(&format!("/stock/{symbol}")))
            .send()
            .await?;
        Self::decode(resp, "Stock not found or incomplete data.").await
    }

    async fn fetch_details(&self, symbol: &str) -> Result<StockDetails, CoreError> {
        debug!(symbol, "fetching details");
        let resp = self
            .client
            .get(self.url(&format!("/stock/{symbol}/details")))
            .send()
            .await?;
        Self::decode(resp, "Stock not found or incomplete data.").await
    }

    async fn fetch_holdings(&self) -> Result<Vec<Holding>, CoreError> {
        debug!("fetching holdings");
        let resp = self.client.get(self.url("/portfolio")).send().await?;
        Self::decode(resp, "Portfolio not found").await
    }

    async fn fetch_summary(&self) -> Result<PortfolioSummary, CoreError> {
        debug!("fetching summary");
        let resp = self
            .client
            .get(self.url("/portfolio/summary"))
            .send()
            .await?;
        Self::decode(resp, "Portfolio not found").await
    }

    async fn create_holding(&self, new_holding: &NewHolding) -> Result<Holding, CoreError> {
        debug!(symbol = %new_holding.symbol, "creating holding");
        let resp = self
            .client
            .post(self.url("/portfolio"))
            .json(new_holding)
            .send()
            .await?;
        Self::decode(resp, "Stock not found").await
    }

    async fn update_holding(
        &self,
        id: HoldingId,
        patch: &HoldingPatch,
    ) -> Result<Holding, CoreError> {
        debug!(id, "updating holding");
        let resp = self
            .client
            .put(self.url(&format!("/portfolio/{id}")))
            .json(patch)
            .send()
            .await?;
        Self::decode(resp, "Portfolio item not found").await
    }

    async fn delete_holding(&self, id: HoldingId) -> Result<(), CoreError> {
        debug!(id, "deleting holding");
        let resp = self
            .client
            .delete(self.url(&format!("/portfolio/{id}")))
            .send()
            .await?;
        // The ack body ({"message": ...}) carries nothing the client needs.
        Self::decode::<serde_json::Value>(resp, "Portfolio item not found")
            .await
            .map(|_| ())
    }

    async fn send_chat(
        &self,
        message: &str,
        history: &[ChatMessage],
    ) -> Result<String, CoreError> {
        debug!(history_len = history.len(), "sending chat turn");
        let resp = self
            .client
            .post(self.url("/chat"))
            .json(&ChatRequest { message, history })
            .send()
            .await?;
        Self::decode::<ChatReply>(resp, "Chat endpoint not found")
            .await
            .map(|r| r.reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_string_passes_through() {
        let body = r#"{"detail": "Stock AAPL already exists in portfolio"}"#;
        assert_eq!(
            extract_detail(body).as_deref(),
            Some("Stock AAPL already exists in portfolio")
        );
    }

    #[test]
    fn detail_array_takes_first_msg() {
        let body = r#"{"detail": [{"loc": ["body", "history", 0, "role"], "msg": "Input should be 'user' or 'assistant'", "type": "literal_error"}]}"#;
        assert_eq!(
            extract_detail(body).as_deref(),
            Some("Input should be 'user' or 'assistant'")
        );
    }

    #[test]
    fn detail_missing_or_unparseable_is_none() {
        assert_eq!(extract_detail("not json"), None);
        assert_eq!(extract_detail(r#"{"error": "nope"}"#), None);
        assert_eq!(extract_detail(r#"{"detail": 42}"#), None);
    }

    #[test]
    fn status_taxonomy() {
        assert_eq!(
            map_status(404, "Stock not found".into()),
            CoreError::NotFound("Stock not found".into())
        );
        assert_eq!(
            map_status(400, "duplicate".into()),
            CoreError::Rejected("duplicate".into())
        );
        assert_eq!(
            map_status(422, "bad role".into()),
            CoreError::Rejected("bad role".into())
        );
        assert_eq!(
            map_status(500, "HTTP 500".into()),
            CoreError::Api {
                status: 500,
                message: "HTTP 500".into()
            }
        );
    }
}
