//! Post timestamp errors.

/// A `created_at` value that could not be parsed.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Timestamp Error: cannot parse '{}' ({}) at line {} in {}", value, reason, line, file)]
pub struct TimestampError {
    /// The raw timestamp text
    pub value: String,
    /// Parser message
    pub reason: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl TimestampError {
    /// Create a new TimestampError at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use chorus_error::TimestampError;
    ///
    /// let err = TimestampError::new("yesterday", "input contains invalid characters");
    /// assert_eq!(err.value, "yesterday");
    /// ```
    #[track_caller]
    pub fn new(value: impl Into<String>, reason: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            value: value.into(),
            reason: reason.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
