//! # Classification Telemetry
//!
//! Records classification verdicts for aggregation and alerting. Counters go
//! through the `metrics` facade; installing an exporter is left to the host
//! service. Log severity follows the escalation policy: SYSTEM_ERROR and
//! UNKNOWN are operator-actionable, USER_ERROR is not.

use metrics::counter;
use tracing::{error, warn};

use crate::types::{ErrorCategory, ErrorInfo};

/// Emits a counter and a structured log event for a classification verdict.
pub fn record_classification(info: &ErrorInfo) {
    let key = format!("triage.classified.{}", info.category);
    counter!(key, 1);

    match info.category {
        ErrorCategory::SystemError | ErrorCategory::Unknown => {
            error!(
                category = %info.category,
                target = %info.target,
                type_name = %info.type_name,
                detail = %info.detail,
                "Failure classified"
            );
        }
        ErrorCategory::UserError => {
            warn!(
                category = %info.category,
                target = %info.target,
                type_name = %info.type_name,
                detail = %info.detail,
                "Failure classified"
            );
        }
    }
}
