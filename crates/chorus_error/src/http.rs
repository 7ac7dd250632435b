//! HTTP error types.

/// Kinds of HTTP failures.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum HttpErrorKind {
    /// The request never produced a response
    #[display("Transport failure: {}", _0)]
    Transport(String),
    /// The API answered with a non-success status
    #[display("Unexpected status {} for {}", status, path)]
    Status {
        /// Status line text, e.g. "429 Too Many Requests"
        status: String,
        /// Request path
        path: String,
    },
}

/// HTTP error with source location.
///
/// # Examples
///
/// ```
/// use chorus_error::{HttpError, HttpErrorKind};
///
/// let err = HttpError::new(HttpErrorKind::Status {
///     status: "503 Service Unavailable".into(),
///     path: "/users/lookup".into(),
/// });
/// assert!(format!("{}", err).contains("503"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("HTTP Error: {} at line {} in {}", kind, line, file)]
pub struct HttpError {
    /// The kind of error that occurred
    pub kind: HttpErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl HttpError {
    /// Create a new HttpError at the current location.
    #[track_caller]
    pub fn new(kind: HttpErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
