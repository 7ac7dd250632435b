//! Argument validation errors.

/// Kinds of validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ValidationErrorKind {
    /// A lookup batch exceeded the API's hard id limit
    #[display("Too many ids: {} exceeds the limit of {}", count, max)]
    TooManyIds {
        /// Ids supplied
        count: usize,
        /// Maximum accepted
        max: usize,
    },
    /// A numeric setting was out of range
    #[display("Invalid value for {}: {}", field, reason)]
    OutOfRange {
        /// Setting name
        field: String,
        /// What was wrong
        reason: String,
    },
}

/// Validation error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Validation Error: {} at line {} in {}", kind, line, file)]
pub struct ValidationError {
    /// The kind of error that occurred
    pub kind: ValidationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ValidationError {
    /// Create a new validation error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ValidationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
