//! # Origin Capture
//!
//! Records where a failure was raised: the module path, the source text of
//! the raise expression, and its line number. Rust has no runtime stack
//! reflection for source text, so capture happens at the raise site through
//! the [`crate::raise!`] macro; a failure constructed without it simply has
//! no origin. Origin is always optional metadata.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::CapturedError;

/// The raise site of a failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Origin {
    /// Module path of the function that raised the failure
    pub module: String,
    /// Single trimmed line of source text of the raise expression
    pub code: String,
    /// Line number of the raise site
    pub lineno: u32,
}

impl Origin {
    /// Creates an origin record, collapsing the source text to one line.
    pub fn new<M: Into<String>, C: Into<String>>(module: M, code: C, lineno: u32) -> Self {
        let code = code.into();
        let code = code.split_whitespace().collect::<Vec<_>>().join(" ");
        Self {
            module: module.into(),
            code,
            lineno,
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "module={}, code={}, lineno={}",
            self.module, self.code, self.lineno
        )
    }
}

/// Returns the raise-site origin of a captured failure, when it has one.
///
/// Present only for failures that went through [`crate::raise!`], the
/// analogue of an exception that actually propagated through a catch
/// boundary instead of merely being instantiated.
pub fn locate(failure: &CapturedError) -> Option<&Origin> {
    failure.origin()
}

/// Raises a failure with its origin attached.
///
/// Evaluates to a [`CapturedError`] carrying the current module path, the
/// stringified raise expression as its source line, and the line number.
///
/// ```
/// use error_triage_rs::{kinds, raise, StructuredError};
///
/// let err = raise!(StructuredError::new(&kinds::RUN_NOT_FOUND).arg("name", "nightly-eval"));
/// assert!(err.origin().is_some());
/// ```
#[macro_export]
macro_rules! raise {
    ($err:expr) => {{
        let origin = $crate::origin::Origin::new(module_path!(), stringify!($err), line!());
        $crate::types::CapturedError::from($err).with_origin(origin)
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinds;
    use crate::types::{CapturedError, ForeignError, StructuredError};

    #[test]
    fn test_origin_display_format() {
        let origin = Origin::new(
            "flow_runtime::validator",
            "raise InvalidAggregationInput",
            42,
        );
        assert_eq!(
            origin.to_string(),
            "module=flow_runtime::validator, code=raise InvalidAggregationInput, lineno=42"
        );
    }

    #[test]
    fn test_origin_collapses_whitespace() {
        let origin = Origin::new("m", "StructuredError::new(&DEF)\n    .arg(\"k\",\n  1)", 7);
        assert_eq!(origin.code, "StructuredError::new(&DEF) .arg(\"k\", 1)");
    }

    #[test]
    fn test_raise_macro_attaches_origin() {
        let err = raise!(ForeignError::new("ValueError", "bad input"));
        let origin = locate(&err).expect("raise! should attach an origin");
        assert_eq!(origin.module, module_path!());
        assert!(origin.code.contains("ForeignError::new"));
        assert!(origin.lineno > 0);
    }

    #[test]
    fn test_constructed_failure_has_no_origin() {
        let err: CapturedError = StructuredError::new(&kinds::RUN_NOT_FOUND).into();
        assert!(locate(&err).is_none());
    }
}
