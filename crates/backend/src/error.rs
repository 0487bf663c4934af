use thiserror::Error;

/// What can go wrong between this application and the backend.
///
/// Transport and parsing failures abort the current operation and are
/// reported to the user; local view state stays untouched. A missing
/// session is a programming-order error and fails fast rather than letting
/// an invalid id reach the wire.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("no active session")]
    NoActiveSession,
    #[error("backend unavailable: {0}")]
    Unavailable(String),
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}
