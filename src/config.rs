//! Server configuration module
//! Handles environment-derived configuration for the HTTP server

use std::env;

use crate::constants::{DEFAULT_HOST, DEFAULT_PORT, MIN_SECRET_LENGTH};
use crate::error::{BookrackError, Result};

/// Credentials for the external media storage provider
#[derive(Debug, Clone)]
pub struct MediaConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    pub upload_preset: String,
}

/// Server configuration parameters
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Secret for token signing/validation. Loaded once at startup and
    /// immutable for the life of the process; rotating it invalidates every
    /// outstanding token.
    pub jwt_secret: String,
    /// Media provider credentials; absent means in-memory media storage
    pub media: Option<MediaConfig>,
    /// URL pinged periodically so the hosting platform does not idle the
    /// process. Absent disables the keep-alive task.
    pub keepalive_url: Option<String>,
}

impl ServerConfig {
    /// Create a test configuration - only for testing!
    #[cfg(test)]
    pub fn for_testing() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            jwt_secret: "unit-test-signing-key-a1b2c3d4e5f6-xyz".to_string(),
            media: None,
            keepalive_url: None,
        }
    }

    /// Validate that the JWT secret meets security requirements
    fn validate_jwt_secret(secret: &str) -> Result<()> {
        if secret.len() < MIN_SECRET_LENGTH {
            return Err(BookrackError::ConfigError(format!(
                "JWT secret must be at least {} characters long",
                MIN_SECRET_LENGTH
            )));
        }

        // Check for insecure default or example values
        let insecure_patterns = [
            "your-secret-key",
            "change-this",
            "test-secret",
            "password",
            "12345",
        ];

        for pattern in &insecure_patterns {
            if secret.contains(pattern) {
                return Err(BookrackError::ConfigError(format!(
                    "JWT secret contains insecure pattern '{}'. Please use a secure random \
                     secret generated with: openssl rand -base64 32",
                    pattern
                )));
            }
        }

        // Ensure some complexity
        if secret.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(BookrackError::ConfigError(
                "JWT secret should contain mixed characters (letters, numbers, symbols) \
                 for security"
                    .to_string(),
            ));
        }

        Ok(())
    }

    /// Load configuration from environment variables if available
    pub fn from_env() -> Result<Self> {
        let host = env::var("BOOKRACK_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let port = env::var("BOOKRACK_PORT")
            .or_else(|_| env::var("PORT"))
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let jwt_secret = env::var("BOOKRACK_JWT_SECRET")
            .or_else(|_| env::var("JWT_SECRET"))
            .map_err(|_| {
                BookrackError::ConfigError(
                    "JWT_SECRET environment variable is required for security. \
                     Generate one with: openssl rand -base64 32"
                        .to_string(),
                )
            })?;

        Self::validate_jwt_secret(&jwt_secret)?;

        // Media credentials come as a group; a partial group is a
        // configuration mistake, not a fallback to in-memory storage.
        let media = match env::var("CLOUDINARY_CLOUD_NAME") {
            Ok(cloud_name) => {
                let api_key = env::var("CLOUDINARY_API_KEY").map_err(|_| {
                    BookrackError::ConfigError(
                        "CLOUDINARY_API_KEY is required when CLOUDINARY_CLOUD_NAME is set"
                            .to_string(),
                    )
                })?;
                let api_secret = env::var("CLOUDINARY_API_SECRET").map_err(|_| {
                    BookrackError::ConfigError(
                        "CLOUDINARY_API_SECRET is required when CLOUDINARY_CLOUD_NAME is set"
                            .to_string(),
                    )
                })?;
                let upload_preset = env::var("CLOUDINARY_UPLOAD_PRESET").map_err(|_| {
                    BookrackError::ConfigError(
                        "CLOUDINARY_UPLOAD_PRESET is required when CLOUDINARY_CLOUD_NAME is set"
                            .to_string(),
                    )
                })?;

                Some(MediaConfig {
                    cloud_name,
                    api_key,
                    api_secret,
                    upload_preset,
                })
            }
            Err(_) => None,
        };

        let keepalive_url = env::var("API_URL").ok();

        Ok(Self {
            host,
            port,
            jwt_secret,
            media,
            keepalive_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_testing_secret_passes_validation() {
        let config = ServerConfig::for_testing();
        assert!(ServerConfig::validate_jwt_secret(&config.jwt_secret).is_ok());
    }

    #[test]
    fn test_short_secret_is_rejected() {
        assert!(ServerConfig::validate_jwt_secret("too-short-1").is_err());
    }

    #[test]
    fn test_insecure_pattern_is_rejected() {
        let result =
            ServerConfig::validate_jwt_secret("change-this-please-0123456789-0123456789");
        assert!(result.is_err());
    }

    #[test]
    fn test_all_alphabetic_secret_is_rejected() {
        let result =
            ServerConfig::validate_jwt_secret("abcdefghijklmnopqrstuvwxyzabcdefghij");
        assert!(result.is_err());
    }
}
