//! In-memory media storage for development and testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::MediaStorage;
use crate::error::{BookrackError, Result};

/// Host marker embedded in references minted by this store
pub const MEMORY_MEDIA_HOST: &str = "memory.cloudinary.test";

/// Media storage that keeps uploaded payloads in process memory
pub struct MemoryMediaStorage {
    assets: Arc<RwLock<HashMap<String, String>>>, // public_id -> payload
}

impl MemoryMediaStorage {
    pub fn new() -> Self {
        Self {
            assets: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Whether an asset with this public id is currently stored
    pub async fn contains(&self, public_id: &str) -> bool {
        self.assets.read().await.contains_key(public_id)
    }
}

impl Default for MemoryMediaStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MediaStorage for MemoryMediaStorage {
    async fn upload(&self, payload: &str) -> Result<String> {
        let public_id = Uuid::new_v4().to_string();
        self.assets
            .write()
            .await
            .insert(public_id.clone(), payload.to_string());

        Ok(format!(
            "https://{}/image/upload/{}.jpg",
            MEMORY_MEDIA_HOST, public_id
        ))
    }

    async fn delete(&self, public_id: &str) -> Result<()> {
        if self.assets.write().await.remove(public_id).is_some() {
            Ok(())
        } else {
            Err(BookrackError::MediaError(format!(
                "Asset {} not found",
                public_id
            )))
        }
    }

    fn owns_reference(&self, reference: &str) -> bool {
        reference.contains(MEMORY_MEDIA_HOST)
    }
}
