//! # Chain Resolution and Classification
//!
//! Decides, for a failure caught at a system boundary, which side of the
//! outer/cause pair supplies the category, type identity, message and
//! diagnostic detail. Classification is a pure computation over the captured
//! state; it performs no I/O and never fails on malformed input.

use crate::message::render;
use crate::types::{CapturedError, ErrorCategory, ErrorInfo, ErrorTarget, StructuredError};

/// Classifies a failure caught at a boundary.
///
/// `None` yields the neutral verdict `(UNKNOWN, "", UNKNOWN, "", "")`.
/// Otherwise the failure is resolved against its direct cause; deeper chain
/// links are never traversed.
pub fn classify(failure: Option<&CapturedError>) -> ErrorInfo {
    match failure {
        Some(outer) => resolve(outer),
        None => ErrorInfo::unknown(),
    }
}

/// The one-level chain resolution table.
///
/// A structured failure wrapped by another structured failure is an
/// intentional re-raise across a boundary: the outer category stays
/// authoritative for routing, the cause's type identity is the more useful
/// one, and message/detail are suppressed rather than guessing which of the
/// two narratives to show. A structured failure under a foreign wrapper is
/// classified as if it had never been wrapped. Two foreign failures yield
/// only the outer identity; a lone foreign failure is the one foreign case
/// whose own origin is surfaced.
fn resolve(outer: &CapturedError) -> ErrorInfo {
    match (outer, outer.cause()) {
        (CapturedError::Structured(outer_err), Some(CapturedError::Structured(cause))) => {
            ErrorInfo {
                category: outer_err.def.category,
                type_name: cause.def.type_name.to_string(),
                target: outer_err.def.target,
                message: String::new(),
                detail: String::new(),
            }
        }
        (CapturedError::Structured(outer_err), _) => resolve_structured(outer_err),
        (CapturedError::Foreign(_), Some(CapturedError::Structured(cause))) => {
            resolve_structured(cause)
        }
        (CapturedError::Foreign(outer_err), Some(CapturedError::Foreign(_))) => ErrorInfo {
            category: ErrorCategory::Unknown,
            type_name: outer_err.type_name.clone(),
            target: ErrorTarget::Unknown,
            message: String::new(),
            detail: String::new(),
        },
        (CapturedError::Foreign(outer_err), None) => ErrorInfo {
            category: ErrorCategory::Unknown,
            type_name: outer_err.type_name.clone(),
            target: ErrorTarget::Unknown,
            message: String::new(),
            detail: origin_detail(outer_err.origin.as_ref()),
        },
    }
}

/// Unwrapped-failure semantics for a structured failure: its own category,
/// identity, rendered message and raise-site detail.
fn resolve_structured(err: &StructuredError) -> ErrorInfo {
    ErrorInfo {
        category: err.def.category,
        type_name: err.def.type_name.to_string(),
        target: err.def.target,
        message: render(err.def.message_format, &err.args),
        detail: origin_detail(err.origin.as_ref()),
    }
}

fn origin_detail(origin: Option<&crate::origin::Origin>) -> String {
    origin.map(|o| o.to_string()).unwrap_or_default()
}
