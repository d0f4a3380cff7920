//! Abstract storage interfaces for pluggable backends
//!
//! This module defines the records and traits the core needs from a durable
//! store: user credentials and owned book entries.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::error::Result;

/// Persisted user credential record.
///
/// `password_hash` holds a salted one-way hash from the moment of creation;
/// the plaintext never reaches storage. The record is deliberately not
/// serializable so it cannot leak onto the wire by accident.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub profile_image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRecord {
    /// Creates a record from an already-hashed password. Storage never
    /// re-hashes; hashing happens exactly once, before this constructor.
    pub fn new(
        username: String,
        email: String,
        password_hash: String,
        profile_image: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            username,
            email,
            password_hash,
            profile_image,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Persisted book record.
///
/// `owner` is set once, at creation, from the authenticated identity of the
/// creating request and is never reassigned. The wire name stays `user`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookRecord {
    pub id: String,
    pub title: String,
    pub caption: String,
    pub image: String,
    pub rating: f64,
    #[serde(rename = "user")]
    pub owner: String,
    pub created_at: DateTime<Utc>,
}

impl BookRecord {
    pub fn new(title: String, caption: String, image: String, rating: f64, owner: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title,
            caption,
            image,
            rating,
            owner,
            created_at: Utc::now(),
        }
    }
}

/// User credential storage interface
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Persists a new user and returns its id.
    ///
    /// Uniqueness of username and email is enforced here, not only by the
    /// caller's pre-checks; a violation is the authoritative `Conflict`
    /// signal even when two registrations race.
    async fn create_user(&self, user: UserRecord) -> Result<String>;

    /// Get user by ID
    async fn find_user(&self, user_id: &str) -> Result<Option<UserRecord>>;

    /// Get user by username
    async fn find_user_by_username(&self, username: &str) -> Result<Option<UserRecord>>;

    /// Get user by email
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>>;
}

/// Book storage interface
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Persists a new book and returns its id
    async fn create_book(&self, book: BookRecord) -> Result<String>;

    /// Get book by ID
    async fn find_book(&self, book_id: &str) -> Result<Option<BookRecord>>;

    /// Removes a book permanently. `NotFound` if the id is absent.
    async fn delete_book(&self, book_id: &str) -> Result<()>;

    /// Window over all books, most recently created first. Equal creation
    /// times keep the most recently inserted entry first, so the order is a
    /// strict total order.
    async fn list_books(&self, offset: usize, limit: usize) -> Result<Vec<BookRecord>>;

    /// All books belonging to one owner, most recently created first
    async fn list_books_by_owner(&self, owner_id: &str) -> Result<Vec<BookRecord>>;

    /// Count of all books, unfiltered
    async fn count_books(&self) -> Result<usize>;
}
