//! Object storage for book cover images
//!
//! The core hands raw image payloads to an external provider and persists
//! only the stable reference URL it returns. Deletion is best-effort: the
//! provider-side asset is removed when possible, and failures never block
//! the owning operation.

pub mod cloud;
pub mod memory;

use async_trait::async_trait;
use base64::Engine;

use crate::constants::MAX_IMAGE_PAYLOAD_BYTES;
use crate::error::{BookrackError, Result};

// Re-export main components
pub use cloud::CloudMediaStorage;
pub use memory::MemoryMediaStorage;

/// External object storage interface
#[async_trait]
pub trait MediaStorage: Send + Sync {
    /// Uploads an image payload and returns its stable public reference URL
    async fn upload(&self, payload: &str) -> Result<String>;

    /// Deletes a previously uploaded asset by its public id
    async fn delete(&self, public_id: &str) -> Result<()>;

    /// Whether a stored reference belongs to this provider
    fn owns_reference(&self, reference: &str) -> bool;
}

/// Extracts the deletable public id from a reference URL: the final path
/// segment with its file extension stripped.
pub fn public_id_from_reference(reference: &str) -> Option<String> {
    let last = reference.rsplit('/').next()?;
    let id = last.split('.').next().filter(|s| !s.is_empty())?;
    Some(id.to_string())
}

/// Validates that an inbound image payload is a base64 `data:` URI whose
/// decoded size stays within the configured cap.
pub fn validate_image_payload(payload: &str) -> Result<()> {
    let encoded = payload
        .strip_prefix("data:")
        .and_then(|rest| rest.split_once(";base64,"))
        .map(|(_, data)| data)
        .ok_or_else(|| {
            BookrackError::ValidationError("Image must be a base64 data URI".to_string())
        })?;

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .map_err(|_| {
            BookrackError::ValidationError("Image payload is not valid base64".to_string())
        })?;

    if bytes.len() > MAX_IMAGE_PAYLOAD_BYTES {
        return Err(BookrackError::ValidationError(
            "Image payload is too large".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_id_strips_path_and_extension() {
        assert_eq!(
            public_id_from_reference("https://res.cloudinary.com/demo/image/upload/v17/abc123.jpg"),
            Some("abc123".to_string())
        );
        assert_eq!(
            public_id_from_reference("https://res.cloudinary.com/demo/image/upload/abc123"),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn test_public_id_of_trailing_slash_is_none() {
        assert_eq!(public_id_from_reference("https://res.cloudinary.com/demo/"), None);
    }

    #[test]
    fn test_valid_data_uri_passes() {
        assert!(validate_image_payload("data:image/png;base64,iVBORw0KGgo=").is_ok());
    }

    #[test]
    fn test_plain_url_payload_is_rejected() {
        let err = validate_image_payload("https://example.com/cover.jpg").unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_bad_base64_is_rejected() {
        assert!(validate_image_payload("data:image/png;base64,@@not-base64@@").is_err());
    }
}
