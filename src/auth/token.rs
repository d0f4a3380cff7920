use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::constants::TOKEN_TTL_SECS;
use crate::error::{BookrackError, Result};

/// JWT Claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Issued at (as UTC timestamp)
    pub iat: usize,
    /// Expiration time (as UTC timestamp)
    pub exp: usize,
}

impl Claims {
    /// Creates new claims for a user, expiring 15 days from now
    pub fn new(user_id: String) -> Self {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("Time went backwards")
            .as_secs() as usize;

        Self {
            sub: user_id,
            iat: now,
            exp: now + TOKEN_TTL_SECS,
        }
    }

    /// Check if the token is expired
    pub fn is_expired(&self) -> bool {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("Time went backwards")
            .as_secs() as usize;

        now > self.exp
    }
}

/// Manages session token operations.
///
/// The signing secret is loaded once at process start and never changes
/// within a process. Rotating it invalidates every outstanding token, since
/// there is no server-side revocation list.
pub struct TokenManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenManager {
    /// Creates a new token manager with a secret
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::default(),
        }
    }

    /// Issues a signed token carrying the given user id as its subject
    pub fn issue(&self, user_id: &str) -> Result<String> {
        let claims = Claims::new(user_id.to_string());
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| BookrackError::TokenError(format!("Failed to issue token: {}", e)))
    }

    /// Validates a token and returns the subject user id.
    ///
    /// Signature mismatch, malformed input and expiry all collapse into the
    /// same `Unauthenticated` error; callers must not distinguish them.
    pub fn verify(&self, token: &str) -> Result<String> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|_| BookrackError::Unauthenticated("Token is invalid!".to_string()))?;
        Ok(data.claims.sub)
    }
}

/// Extracts bearer token from Authorization header
pub fn extract_bearer_token(auth_header: &str) -> Option<String> {
    auth_header.strip_prefix("Bearer ").map(|t| t.to_string())
}
