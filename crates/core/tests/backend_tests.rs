// ═══════════════════════════════════════════════════════════════════
// Wire-Format Tests — serde shapes of the REST payloads, matched
// against what the backend actually sends
// ═══════════════════════════════════════════════════════════════════

use chrono::NaiveDate;

use stockmate_core::models::chat::{ChatMessage, ChatRole};
use stockmate_core::models::holding::{Holding, HoldingPatch, NewHolding};
use stockmate_core::models::stock::{StockDetails, StockQuote};
use stockmate_core::models::summary::PortfolioSummary;

// ── GET /portfolio ──────────────────────────────────────────────────

mod holdings_wire {
    use super::*;

    /// Full row as the backend serves it: naive UTC timestamps with no
    /// offset, plus the server-computed derived fields the client
    /// deliberately ignores.
    const ROW: &str = r#"{
        "id": 7,
        "symbol": "AAPL",
        "name": "Apple Inc.",
        "shares": 10.0,
        "avg_price": 150.0,
        "created_at": "2025-06-01T09:30:00.123456",
        "updated_at": "2025-06-02T15:45:00",
        "current_price": 185.0,
        "total_value": 1850.0,
        "total_cost": 1500.0,
        "gain_loss": 350.0,
        "gain_loss_percent": 23.33
    }"#;

    #[test]
    fn decodes_a_full_row_and_recomputes_derived_values() {
        let h: Holding = serde_json::from_str(ROW).unwrap();

        assert_eq!(h.id, 7);
        assert_eq!(h.symbol, "AAPL");
        assert_eq!(h.current_price, Some(185.0));
        // Derived values come from the methods, not the payload.
        assert_eq!(h.total_value(), Some(1850.0));
        assert_eq!(h.gain_loss(), Some(350.0));
    }

    #[test]
    fn timestamps_decode_with_and_without_an_offset() {
        let h: Holding = serde_json::from_str(ROW).unwrap();
        let expected = NaiveDate::from_ymd_opt(2025, 6, 2)
            .unwrap()
            .and_hms_opt(15, 45, 0)
            .unwrap()
            .and_utc();
        assert_eq!(h.updated_at, expected);

        // RFC 3339 forms are accepted too and normalize to UTC.
        let offset_row = r#"{
            "id": 1, "symbol": "X", "name": "X Co",
            "shares": 1.0, "avg_price": 1.0,
            "created_at": "2025-06-02T15:45:00Z",
            "updated_at": "2025-06-02T17:45:00+02:00"
        }"#;
        let h: Holding = serde_json::from_str(offset_row).unwrap();
        assert_eq!(h.created_at, expected);
        assert_eq!(h.updated_at, expected);
    }

    #[test]
    fn zero_price_sentinel_normalizes_to_none() {
        // The backend substitutes 0.0 when its price provider fails.
        let body = r#"{
            "id": 1, "symbol": "DARK", "name": "Dark Co",
            "shares": 5.0, "avg_price": 20.0, "current_price": 0.0,
            "created_at": "2025-06-01T09:30:00",
            "updated_at": "2025-06-01T09:30:00"
        }"#;
        let h: Holding = serde_json::from_str(body).unwrap();
        assert_eq!(h.current_price, None);
        assert!(h.total_value().is_none());
    }

    #[test]
    fn negative_or_missing_price_normalizes_to_none() {
        let negative = r#"{
            "id": 1, "symbol": "X", "name": "X Co",
            "shares": 1.0, "avg_price": 1.0, "current_price": -3.5,
            "created_at": "2025-06-01T09:30:00",
            "updated_at": "2025-06-01T09:30:00"
        }"#;
        let h: Holding = serde_json::from_str(negative).unwrap();
        assert_eq!(h.current_price, None);

        let absent = r#"{
            "id": 2, "symbol": "Y", "name": "Y Co",
            "shares": 1.0, "avg_price": 1.0,
            "created_at": "2025-06-01T09:30:00",
            "updated_at": "2025-06-01T09:30:00"
        }"#;
        let h: Holding = serde_json::from_str(absent).unwrap();
        assert_eq!(h.current_price, None);
    }
}

// ── POST /portfolio and PUT /portfolio/{id} ─────────────────────────

mod mutation_wire {
    use super::*;

    #[test]
    fn create_payload_has_all_four_fields() {
        let body = serde_json::to_value(NewHolding::new("aapl", "Apple Inc.", 10.0, 150.0))
            .unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "symbol": "AAPL",
                "name": "Apple Inc.",
                "shares": 10.0,
                "avg_price": 150.0
            })
        );
    }

    #[test]
    fn patch_omits_absent_fields_entirely() {
        let shares_only = HoldingPatch {
            shares: Some(20.0),
            avg_price: None,
        };
        assert_eq!(
            serde_json::to_value(&shares_only).unwrap(),
            serde_json::json!({"shares": 20.0})
        );

        let both = HoldingPatch {
            shares: Some(20.0),
            avg_price: Some(155.0),
        };
        assert_eq!(
            serde_json::to_value(&both).unwrap(),
            serde_json::json!({"shares": 20.0, "avg_price": 155.0})
        );
    }
}

// ── GET /portfolio/summary ──────────────────────────────────────────

mod summary_wire {
    use super::*;

    #[test]
    fn decodes_the_summary_endpoint() {
        let body = r#"{
            "total_cost": 3000.0,
            "total_value": 3412.5,
            "total_gain_loss": 412.5,
            "total_gain_loss_percent": 13.75,
            "item_count": 3
        }"#;
        let s: PortfolioSummary = serde_json::from_str(body).unwrap();
        assert_eq!(s.total_value, 3412.5);
        assert_eq!(s.item_count, 3);
    }
}

// ── GET /stock/{symbol} and /details ────────────────────────────────

mod stock_wire {
    use super::*;

    #[test]
    fn decodes_a_quote() {
        let body = r#"{
            "symbol": "MSFT",
            "name": "Microsoft Corp",
            "price": 312.50,
            "summary": "Software and cloud."
        }"#;
        let q: StockQuote = serde_json::from_str(body).unwrap();
        assert_eq!(q.symbol, "MSFT");
        assert_eq!(q.price, 312.50);
    }

    #[test]
    fn decodes_details_with_partial_metrics() {
        // Provider metrics are best-effort; nulls are normal.
        let body = r#"{
            "name": "Microsoft Corp",
            "current_price": 312.50,
            "performance_metrics": {
                "market_cap": 2.3e12,
                "pe_ratio": 35.1,
                "one_year_return": null,
                "beta": 0.9,
                "dividend_yield": null,
                "price_to_book": null,
                "fifty_two_week_high": 340.0,
                "fifty_two_week_low": 260.0
            },
            "chart_data": [
                {"date": "2025-06-02", "price": 310.0, "volume": 21500000},
                {"date": "2025-06-03", "price": 312.5, "volume": 19800000}
            ]
        }"#;
        let d: StockDetails = serde_json::from_str(body).unwrap();

        assert_eq!(d.performance_metrics.market_cap, Some(2.3e12));
        assert_eq!(d.performance_metrics.one_year_return, None);
        assert_eq!(d.chart_data.len(), 2);
        assert_eq!(
            d.chart_data[0].date,
            NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
        );
        assert_eq!(d.chart_data[0].volume, 21_500_000);
    }
}

// ── POST /chat ──────────────────────────────────────────────────────

mod chat_wire {
    use super::*;

    #[test]
    fn roles_serialize_lowercase() {
        let user = serde_json::to_value(ChatMessage::user("hi")).unwrap();
        assert_eq!(user, serde_json::json!({"role": "user", "content": "hi"}));

        let assistant = serde_json::to_value(ChatMessage::assistant("hello")).unwrap();
        assert_eq!(
            assistant,
            serde_json::json!({"role": "assistant", "content": "hello"})
        );
    }

    #[test]
    fn unknown_roles_cannot_be_decoded() {
        // The backend 422s on any other role string; the closed enum
        // keeps the client from ever producing one.
        let err = serde_json::from_str::<ChatMessage>(r#"{"role": "system", "content": "x"}"#);
        assert!(err.is_err());
    }

    #[test]
    fn role_display_matches_wire_form() {
        assert_eq!(ChatRole::User.to_string(), "user");
        assert_eq!(ChatRole::Assistant.to_string(), "assistant");
    }
}
