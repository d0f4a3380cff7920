//! Request handlers for the HTTP API

pub mod auth;
pub mod books;

/// Result type for warp handler functions
pub type WebResult<T> = std::result::Result<T, warp::Rejection>;

/// Treats absent and empty-string inputs identically
pub(crate) fn required(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.is_empty())
}
