use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum BookrackError {
    // Input errors
    ValidationError(String),
    Conflict(String),

    // Auth errors
    InvalidCredentials,
    Unauthenticated(String),
    Forbidden(String),

    // Resource errors
    NotFound(String),

    // Collaborator errors
    StorageError(String),
    MediaError(String),
    TokenError(String),
    HashError(String),

    // Configuration errors
    ConfigError(String),
}

impl fmt::Display for BookrackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            Self::Conflict(msg) => write!(f, "Conflict: {}", msg),
            Self::InvalidCredentials => write!(f, "Invalid credentials"),
            Self::Unauthenticated(msg) => write!(f, "Unauthenticated: {}", msg),
            Self::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            Self::NotFound(msg) => write!(f, "Not found: {}", msg),
            Self::StorageError(msg) => write!(f, "Storage error: {}", msg),
            Self::MediaError(msg) => write!(f, "Media storage error: {}", msg),
            Self::TokenError(msg) => write!(f, "Token error: {}", msg),
            Self::HashError(msg) => write!(f, "Password hash error: {}", msg),
            Self::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl Error for BookrackError {}

impl BookrackError {
    /// HTTP status code this error maps to at the API boundary.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::ValidationError(_) | Self::Conflict(_) | Self::InvalidCredentials => 400,
            Self::Unauthenticated(_) => 401,
            Self::Forbidden(_) => 403,
            Self::NotFound(_) => 404,
            Self::StorageError(_)
            | Self::MediaError(_)
            | Self::TokenError(_)
            | Self::HashError(_)
            | Self::ConfigError(_) => 500,
        }
    }

    /// Message safe to return to clients. Internal failure detail stays in
    /// server-side logs only.
    pub fn public_message(&self) -> String {
        match self {
            Self::ValidationError(msg)
            | Self::Conflict(msg)
            | Self::Unauthenticated(msg)
            | Self::Forbidden(msg)
            | Self::NotFound(msg) => msg.clone(),
            Self::InvalidCredentials => "Invalid Credentials".to_string(),
            _ => "Internal server error".to_string(),
        }
    }
}

// Generic result type for bookrack
pub type Result<T> = std::result::Result<T, BookrackError>;
