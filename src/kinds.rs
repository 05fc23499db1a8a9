//! # Well-Known Failure Kinds
//!
//! Definition-time catalog of the structured failure kinds the flow runtime
//! raises. Each kind fixes its category, target and message template here,
//! once; raise sites only supply the template arguments. USER_ERROR templates
//! are authored to be safe to show to a caller verbatim.

use crate::types::{ErrorCategory, ErrorDef, ErrorTarget};

/// A named run does not exist in the control-plane store.
pub const RUN_NOT_FOUND: ErrorDef = ErrorDef {
    type_name: "RunNotFoundError",
    category: ErrorCategory::UserError,
    target: ErrorTarget::ControlPlaneSdk,
    message_format: "Run name '{name}' cannot be found.",
};

/// A flow path given by the caller does not exist.
pub const FLOW_NOT_FOUND: ErrorDef = ErrorDef {
    type_name: "FlowNotFoundError",
    category: ErrorCategory::UserError,
    target: ErrorTarget::ControlPlaneSdk,
    message_format: "Flow path '{flow_path}' does not exist.",
};

/// An aggregation node received a non-list reference input.
pub const INVALID_AGGREGATION_INPUT: ErrorDef = ErrorDef {
    type_name: "InvalidAggregationInput",
    category: ErrorCategory::SystemError,
    target: ErrorTarget::Unknown,
    message_format: "The input for aggregation is incorrect. The value for aggregated reference \
                     input '{input_key}' should be a list, but received {value_type}. Please \
                     adjust the input value to match the expected format.",
};

/// An aggregation node's activate config references a non-aggregation node.
pub const INVALID_NODE_REFERENCE: ErrorDef = ErrorDef {
    type_name: "InvalidNodeReference",
    category: ErrorCategory::UserError,
    target: ErrorTarget::Executor,
    message_format: "Invalid node definitions found in the flow graph. Non-aggregation node \
                     '{invalid_reference}' cannot be referenced in the activate config of the \
                     aggregation node '{node_name}'. Please review and rectify the node reference.",
};

/// A tool call inside a node failed.
pub const TOOL_EXECUTION_ERROR: ErrorDef = ErrorDef {
    type_name: "ToolExecutionError",
    category: ErrorCategory::UserError,
    target: ErrorTarget::Tool,
    message_format: "Execution failure in '{node_name}': {error_type_and_message}",
};

/// A connection named by the flow is not configured.
pub const CONNECTION_NOT_FOUND: ErrorDef = ErrorDef {
    type_name: "ConnectionNotFoundError",
    category: ErrorCategory::UserError,
    target: ErrorTarget::Executor,
    message_format: "Connection '{connection}' of node '{node_name}' is not found.",
};

/// The executor hit a fault it cannot attribute to the flow definition.
pub const UNEXPECTED_FLOW_FAILURE: ErrorDef = ErrorDef {
    type_name: "UnexpectedFlowFailure",
    category: ErrorCategory::SystemError,
    target: ErrorTarget::Executor,
    message_format: "Unexpected error occurred while executing the flow. Error: {error}",
};

/// Every built-in kind; the tests below keep the catalog consistent.
pub const ALL: &[&ErrorDef] = &[
    &RUN_NOT_FOUND,
    &FLOW_NOT_FOUND,
    &INVALID_AGGREGATION_INPUT,
    &INVALID_NODE_REFERENCE,
    &TOOL_EXECUTION_ERROR,
    &CONNECTION_NOT_FOUND,
    &UNEXPECTED_FLOW_FAILURE,
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_type_names_are_unique_and_non_empty() {
        let mut seen = HashSet::new();
        for def in ALL {
            assert!(!def.type_name.is_empty());
            assert!(seen.insert(def.type_name), "duplicate kind: {}", def.type_name);
        }
    }

    #[test]
    fn test_no_kind_is_defined_unknown_category() {
        // UNKNOWN is reserved for foreign failures; a structured kind must
        // always commit to a side.
        for def in ALL {
            assert_ne!(def.category, ErrorCategory::Unknown, "{}", def.type_name);
        }
    }

    #[test]
    fn test_templates_are_non_empty() {
        for def in ALL {
            assert!(!def.message_format.is_empty(), "{}", def.type_name);
        }
    }

    #[test]
    fn test_user_error_templates_are_display_safe() {
        // USER_ERROR text is shown to callers verbatim; templates must not
        // leak module paths, source locations, or internal wording.
        for def in ALL {
            if def.category != ErrorCategory::UserError {
                continue;
            }
            for leak in ["::", "src/", ".rs", "internal", "panic"] {
                assert!(
                    !def.message_format.contains(leak),
                    "{} template leaks '{leak}'",
                    def.type_name
                );
            }
        }
    }
}
