//! Cloudinary-backed media storage
//!
//! Uploads go through the unsigned upload endpoint with a preset; deletes go
//! through the admin API with basic auth. Both calls carry a bounded timeout
//! so a hung provider cannot hang a request task indefinitely.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

use super::MediaStorage;
use crate::config::MediaConfig;
use crate::constants::MEDIA_REQUEST_TIMEOUT_SECS;
use crate::error::{BookrackError, Result};

/// Media storage backed by the Cloudinary HTTP API
pub struct CloudMediaStorage {
    client: reqwest::Client,
    cloud_name: String,
    api_key: String,
    api_secret: String,
    upload_preset: String,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
}

impl CloudMediaStorage {
    pub fn new(config: MediaConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(MEDIA_REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| BookrackError::MediaError(format!("Failed to build media client: {}", e)))?;

        Ok(Self {
            client,
            cloud_name: config.cloud_name,
            api_key: config.api_key,
            api_secret: config.api_secret,
            upload_preset: config.upload_preset,
        })
    }

    fn api_url(&self, endpoint: &str) -> String {
        format!("https://api.cloudinary.com/v1_1/{}/{}", self.cloud_name, endpoint)
    }
}

#[async_trait]
impl MediaStorage for CloudMediaStorage {
    async fn upload(&self, payload: &str) -> Result<String> {
        let response = self
            .client
            .post(self.api_url("image/upload"))
            .form(&[
                ("file", payload),
                ("upload_preset", self.upload_preset.as_str()),
            ])
            .send()
            .await
            .map_err(|e| BookrackError::MediaError(format!("Image upload request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(BookrackError::MediaError(format!(
                "Image upload rejected with status {}",
                response.status()
            )));
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| BookrackError::MediaError(format!("Malformed upload response: {}", e)))?;

        Ok(body.secure_url)
    }

    async fn delete(&self, public_id: &str) -> Result<()> {
        let response = self
            .client
            .delete(self.api_url("resources/image/upload"))
            .basic_auth(&self.api_key, Some(&self.api_secret))
            .query(&[("public_ids[]", public_id)])
            .send()
            .await
            .map_err(|e| BookrackError::MediaError(format!("Image delete request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(BookrackError::MediaError(format!(
                "Image delete rejected with status {}",
                response.status()
            )));
        }

        Ok(())
    }

    fn owns_reference(&self, reference: &str) -> bool {
        Url::parse(reference)
            .ok()
            .and_then(|url| url.host_str().map(|host| host.contains("cloudinary")))
            .unwrap_or(false)
    }
}
