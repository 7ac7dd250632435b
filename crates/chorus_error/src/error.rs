//! Top-level error wrapper types.

use crate::{ConfigError, HttpError, JsonError, TaskError, TimestampError, ValidationError};

/// Every failure a Chorus operation can surface.
///
/// # Examples
///
/// ```
/// use chorus_error::{ChorusError, JsonError};
///
/// let json_err = JsonError::new("expected value at line 1 column 1");
/// let err: ChorusError = json_err.into();
/// assert!(format!("{}", err).contains("JSON Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum ChorusErrorKind {
    /// Transport failure or non-success HTTP status
    #[from(HttpError)]
    Http(HttpError),
    /// Malformed API payload
    #[from(JsonError)]
    Json(JsonError),
    /// Caller supplied an invalid argument
    #[from(ValidationError)]
    Validation(ValidationError),
    /// A post carried an unparsable creation time
    #[from(TimestampError)]
    Timestamp(TimestampError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// A background task failed to complete
    #[from(TaskError)]
    Task(TaskError),
}

/// Chorus error with kind discrimination.
///
/// # Examples
///
/// ```
/// use chorus_error::{ChorusErrorKind, ChorusResult, ConfigError};
///
/// fn might_fail() -> ChorusResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// let err = might_fail().unwrap_err();
/// assert!(matches!(err.kind(), ChorusErrorKind::Config(_)));
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Chorus Error: {}", _0)]
pub struct ChorusError(Box<ChorusErrorKind>);

impl ChorusError {
    /// Create a new error from a kind.
    pub fn new(kind: ChorusErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ChorusErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to ChorusErrorKind
impl<T> From<T> for ChorusError
where
    T: Into<ChorusErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Chorus operations.
pub type ChorusResult<T> = std::result::Result<T, ChorusError>;
