// ═══════════════════════════════════════════════════════════════════
// Error Tests — CoreError variants, Display formatting, From impls
// ═══════════════════════════════════════════════════════════════════

use stockmate_core::errors::CoreError;

// ── Display formatting ──────────────────────────────────────────────

mod display {
    use super::*;

    #[test]
    fn validation() {
        let err = CoreError::Validation("Shares must be a positive number".into());
        assert_eq!(
            err.to_string(),
            "Validation error: Shares must be a positive number"
        );
    }

    #[test]
    fn not_found() {
        let err = CoreError::NotFound("Stock not found or incomplete data.".into());
        assert_eq!(
            err.to_string(),
            "Not found: Stock not found or incomplete data."
        );
    }

    #[test]
    fn rejected_is_verbatim() {
        // Server-supplied rejection text reaches the user unchanged.
        let err = CoreError::Rejected("Stock AAPL already exists in portfolio".into());
        assert_eq!(err.to_string(), "Stock AAPL already exists in portfolio");
    }

    #[test]
    fn api() {
        let err = CoreError::Api {
            status: 500,
            message: "HTTP 500".into(),
        };
        assert_eq!(err.to_string(), "API error (500): HTTP 500");
    }

    #[test]
    fn network() {
        let err = CoreError::Network("connection refused".into());
        assert_eq!(err.to_string(), "Network error: connection refused");
    }

    #[test]
    fn decode() {
        let err = CoreError::Decode("missing field `symbol`".into());
        assert_eq!(
            err.to_string(),
            "Response decode error: missing field `symbol`"
        );
    }

    #[test]
    fn chat_busy() {
        assert_eq!(
            CoreError::ChatBusy.to_string(),
            "A chat request is already in flight"
        );
    }

    #[test]
    fn no_active_edit() {
        assert_eq!(
            CoreError::NoActiveEdit.to_string(),
            "No holding is currently being edited"
        );
    }
}

// ── From impls ──────────────────────────────────────────────────────

mod conversions {
    use super::*;

    #[test]
    fn serde_json_errors_become_decode() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{bad").unwrap_err();
        let err: CoreError = parse_err.into();
        assert!(matches!(err, CoreError::Decode(_)));
    }
}

// ── Semantics ───────────────────────────────────────────────────────

mod semantics {
    use super::*;

    #[test]
    fn transient_failures_are_retryable() {
        assert!(CoreError::Network("x".into()).is_retryable());
        assert!(CoreError::Decode("x".into()).is_retryable());
        assert!(CoreError::Api {
            status: 503,
            message: "x".into()
        }
        .is_retryable());
    }

    #[test]
    fn local_and_semantic_failures_are_not() {
        assert!(!CoreError::Validation("x".into()).is_retryable());
        assert!(!CoreError::NotFound("x".into()).is_retryable());
        assert!(!CoreError::Rejected("x".into()).is_retryable());
        assert!(!CoreError::ChatBusy.is_retryable());
        assert!(!CoreError::NoActiveEdit.is_retryable());
    }

    #[test]
    fn errors_are_cloneable_for_the_error_flag() {
        let err = CoreError::Rejected("duplicate".into());
        let copy = err.clone();
        assert_eq!(err, copy);
    }
}
