//! Canonical schema constants for structured logging and diagnostics
//!
//! These constants keep field keys identical between the engine, the
//! default diagnostic sink and the test capture layer.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_COMPARISON_ID: &str = "comparison_id";

// Operand identification
pub const FIELD_LHS_TYPE: &str = "lhs_type";
pub const FIELD_RHS_TYPE: &str = "rhs_type";
pub const FIELD_FIELD: &str = "field";
pub const FIELD_INDEX: &str = "index";

// Outcome
pub const FIELD_EQUAL: &str = "equal";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical operation names
pub const OP_COMPARE: &str = "compare";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_MISMATCH: &str = "mismatch";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants_accessibility() {
        assert!(!FIELD_COMPONENT.is_empty());
        assert!(!FIELD_OP.is_empty());
        assert!(!FIELD_LHS_TYPE.is_empty());
        assert!(!EVENT_START.is_empty());
        assert!(!EVENT_END.is_empty());
        assert!(!EVENT_MISMATCH.is_empty());
    }

    #[test]
    fn test_event_names_are_distinct() {
        assert_ne!(EVENT_START, EVENT_END);
        assert_ne!(EVENT_START, EVENT_MISMATCH);
        assert_ne!(EVENT_END, EVENT_MISMATCH);
    }

    #[test]
    fn test_operand_keys_are_distinct() {
        assert_ne!(FIELD_LHS_TYPE, FIELD_RHS_TYPE);
        assert_ne!(FIELD_FIELD, FIELD_INDEX);
    }
}
