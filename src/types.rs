//! # Captured-Failure Model
//!
//! This module defines the closed set of failure shapes the triage engine
//! can classify: structured failures declared by the flow runtime itself,
//! and foreign failures that originate outside it.

use std::error::Error as StdError;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::message::render;
use crate::origin::Origin;

/// A type alias for Result with the error type defaulting to our TriageError
pub type Result<T, E = TriageError> = std::result::Result<T, E>;

/// Operational errors of the triage crate itself.
///
/// Classification never fails; this type only covers bootstrap paths such as
/// logging initialization.
#[derive(Debug, Error)]
pub enum TriageError {
    /// The global tracing subscriber could not be installed
    #[error("failed to initialize logging: {0}")]
    LoggingInit(String),
    /// A configuration value could not be read
    #[error("invalid configuration: {0}")]
    Config(#[from] config::ConfigError),
}

/// Coarse fault attribution, fixed when a structured failure kind is defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCategory {
    /// Caller or configuration fault; the message is authored to be shown verbatim
    UserError,
    /// Internal invariant violation; the message is operator-facing
    SystemError,
    /// Anything the classifier cannot attribute, including every foreign failure
    Unknown,
}

impl ErrorCategory {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UserError => "USER_ERROR",
            Self::SystemError => "SYSTEM_ERROR",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for ErrorCategory {
    fn default() -> Self {
        ErrorCategory::Unknown
    }
}

/// Symbolic subsystem a structured failure is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorTarget {
    Executor,
    Tool,
    ControlPlane,
    ControlPlaneSdk,
    Runtime,
    Unknown,
}

impl ErrorTarget {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Executor => "EXECUTOR",
            Self::Tool => "TOOL",
            Self::ControlPlane => "CONTROL_PLANE",
            Self::ControlPlaneSdk => "CONTROL_PLANE_SDK",
            Self::Runtime => "RUNTIME",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for ErrorTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for ErrorTarget {
    fn default() -> Self {
        ErrorTarget::Unknown
    }
}

/// Definition-time record for a structured failure kind.
///
/// Category, target and message template are fixed here, once, rather than
/// spread across an open type hierarchy. New kinds are declared as `ErrorDef`
/// consts (see [`crate::kinds`]) so the classifiable set stays closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorDef {
    /// Stable identity of the kind, reported as `type_name`
    pub type_name: &'static str,
    /// Who is at fault when this kind is raised
    pub category: ErrorCategory,
    /// Which subsystem the kind belongs to
    pub target: ErrorTarget,
    /// Message template with named `{placeholder}` arguments
    pub message_format: &'static str,
}

/// A failure raised by the flow runtime itself, carrying full triage metadata.
#[derive(Debug)]
pub struct StructuredError {
    /// The definition this failure was raised from
    pub def: &'static ErrorDef,
    /// Values for the template placeholders; `Value::Null` counts as absent
    pub args: Map<String, Value>,
    /// The direct failure this one chains from, if any
    pub cause: Option<Box<CapturedError>>,
    /// Where the failure was raised, when it went through [`crate::raise!`]
    pub origin: Option<Origin>,
}

impl StructuredError {
    /// Creates a new structured failure from its definition
    pub fn new(def: &'static ErrorDef) -> Self {
        Self {
            def,
            args: Map::new(),
            cause: None,
            origin: None,
        }
    }

    /// Supplies a value for a template placeholder.
    ///
    /// A value that cannot be serialized is recorded as null, which leaves
    /// its placeholder unresolved and makes the renderer fall back to the
    /// raw template.
    pub fn arg<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Serialize,
    {
        let value = serde_json::to_value(value).unwrap_or(Value::Null);
        self.args.insert(key.into(), value);
        self
    }

    /// Chains this failure to the one it was raised from
    pub fn caused_by<E: Into<CapturedError>>(mut self, cause: E) -> Self {
        self.cause = Some(Box::new(cause.into()));
        self
    }

    /// Attaches the raise-site origin; [`crate::raise!`] calls this
    pub fn with_origin(mut self, origin: Origin) -> Self {
        self.origin = Some(origin);
        self
    }
}

impl fmt::Display for StructuredError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = render(self.def.message_format, &self.args);
        if message.is_empty() {
            f.write_str(self.def.type_name)
        } else {
            f.write_str(&message)
        }
    }
}

/// Any failure without structured metadata, e.g. an SDK or I/O error caught
/// at the boundary.
#[derive(Debug)]
pub struct ForeignError {
    /// The concrete type identity of the foreign failure
    pub type_name: String,
    /// The raw message as produced by its origin
    pub message: String,
    /// Transport-style status attribute, if one was attached.
    /// Stored for a future category mapping; the resolver never consults it.
    pub status_code: Option<u16>,
    /// The direct failure this one chains from, if any
    pub cause: Option<Box<CapturedError>>,
    /// Where the failure was raised, when it went through [`crate::raise!`]
    pub origin: Option<Origin>,
}

impl ForeignError {
    /// Creates a foreign failure from its type identity and raw message
    pub fn new<T: Into<String>, M: Into<String>>(type_name: T, message: M) -> Self {
        Self {
            type_name: type_name.into(),
            message: message.into(),
            status_code: None,
            cause: None,
            origin: None,
        }
    }

    /// Captures a `std::error::Error` as a foreign failure, using the final
    /// segment of its type path as the type identity.
    pub fn from_std<E: StdError>(err: &E) -> Self {
        let full = std::any::type_name::<E>();
        let type_name = full.rsplit("::").next().unwrap_or(full);
        Self::new(type_name, err.to_string())
    }

    /// Attaches a transport-style status attribute
    pub fn status_code(mut self, code: u16) -> Self {
        self.status_code = Some(code);
        self
    }

    /// Chains this failure to the one it was raised from
    pub fn caused_by<E: Into<CapturedError>>(mut self, cause: E) -> Self {
        self.cause = Some(Box::new(cause.into()));
        self
    }

    /// Attaches the raise-site origin; [`crate::raise!`] calls this
    pub fn with_origin(mut self, origin: Origin) -> Self {
        self.origin = Some(origin);
        self
    }
}

impl fmt::Display for ForeignError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            f.write_str(&self.type_name)
        } else {
            f.write_str(&self.message)
        }
    }
}

/// The closed tag over the two failure shapes the classifier accepts.
///
/// The cause chain is owned, so it is acyclic by construction; the resolver
/// only ever inspects the direct cause.
#[derive(Debug)]
pub enum CapturedError {
    Structured(StructuredError),
    Foreign(ForeignError),
}

impl CapturedError {
    /// The concrete type identity of the outermost failure
    pub fn type_name(&self) -> &str {
        match self {
            CapturedError::Structured(e) => e.def.type_name,
            CapturedError::Foreign(e) => &e.type_name,
        }
    }

    /// The direct cause, if one was chained
    pub fn cause(&self) -> Option<&CapturedError> {
        match self {
            CapturedError::Structured(e) => e.cause.as_deref(),
            CapturedError::Foreign(e) => e.cause.as_deref(),
        }
    }

    /// The raise-site origin, if the failure went through [`crate::raise!`]
    pub fn origin(&self) -> Option<&Origin> {
        match self {
            CapturedError::Structured(e) => e.origin.as_ref(),
            CapturedError::Foreign(e) => e.origin.as_ref(),
        }
    }

    /// True for failures belonging to the structured model
    pub fn is_structured(&self) -> bool {
        matches!(self, CapturedError::Structured(_))
    }

    /// Attaches the raise-site origin; [`crate::raise!`] calls this
    pub fn with_origin(self, origin: Origin) -> Self {
        match self {
            CapturedError::Structured(e) => CapturedError::Structured(e.with_origin(origin)),
            CapturedError::Foreign(e) => CapturedError::Foreign(e.with_origin(origin)),
        }
    }
}

impl From<StructuredError> for CapturedError {
    fn from(e: StructuredError) -> Self {
        CapturedError::Structured(e)
    }
}

impl From<ForeignError> for CapturedError {
    fn from(e: ForeignError) -> Self {
        CapturedError::Foreign(e)
    }
}

impl fmt::Display for CapturedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CapturedError::Structured(e) => e.fmt(f),
            CapturedError::Foreign(e) => e.fmt(f),
        }
    }
}

impl StdError for CapturedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.cause().map(|c| c as &(dyn StdError + 'static))
    }
}

/// Generic notice shown for anything that is not a USER_ERROR.
pub const GENERIC_FAILURE_NOTICE: &str =
    "The operation failed due to an internal error. The service team has been notified.";

/// The fixed five-field classification verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    pub category: ErrorCategory,
    pub type_name: String,
    pub target: ErrorTarget,
    /// Template-rendered message, or empty when nothing is safe to report
    pub message: String,
    /// `module=<path>, code=<source line>, lineno=<n>` when an origin is known
    pub detail: String,
}

impl ErrorInfo {
    /// The neutral verdict for absent or unattributable input
    pub fn unknown() -> Self {
        Self {
            category: ErrorCategory::Unknown,
            type_name: String::new(),
            target: ErrorTarget::Unknown,
            message: String::new(),
            detail: String::new(),
        }
    }

    /// Text safe to show an end user.
    ///
    /// Only USER_ERROR messages surface verbatim; every other category gets
    /// the generic notice while `detail` and `type_name` go to operator logs.
    pub fn user_facing_message(&self) -> &str {
        match self.category {
            ErrorCategory::UserError if !self.message.is_empty() => &self.message,
            _ => GENERIC_FAILURE_NOTICE,
        }
    }
}
