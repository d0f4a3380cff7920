//! Shared application state threaded through request handlers

use std::sync::Arc;

use crate::auth::password::PasswordManager;
use crate::auth::token::TokenManager;
use crate::media::memory::MemoryMediaStorage;
use crate::media::MediaStorage;
use crate::storage::memory::MemoryStore;
use crate::storage::traits::{BookStore, UserStore};

/// Handles to every collaborator the request handlers need.
///
/// Cloned per filter; all members are cheap `Arc` handles.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub books: Arc<dyn BookStore>,
    pub media: Arc<dyn MediaStorage>,
    pub tokens: Arc<TokenManager>,
    pub passwords: Arc<PasswordManager>,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserStore>,
        books: Arc<dyn BookStore>,
        media: Arc<dyn MediaStorage>,
        tokens: Arc<TokenManager>,
        passwords: Arc<PasswordManager>,
    ) -> Self {
        Self {
            users,
            books,
            media,
            tokens,
            passwords,
        }
    }

    /// State backed entirely by in-memory collaborators. Suitable for
    /// development and tests.
    pub fn in_memory(jwt_secret: &str) -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            users: store.clone(),
            books: store,
            media: Arc::new(MemoryMediaStorage::new()),
            tokens: Arc::new(TokenManager::new(jwt_secret)),
            passwords: Arc::new(PasswordManager::new()),
        }
    }
}
