//! In-memory storage implementation for development and testing
//!
//! This provides a complete storage implementation that keeps all data
//! in memory. Suitable for development, testing, or small deployments.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::traits::{BookRecord, BookStore, UserRecord, UserStore};
use crate::error::{BookrackError, Result};

/// In-memory store backing both the user and book collections
pub struct MemoryStore {
    users: Arc<RwLock<HashMap<String, UserRecord>>>,
    user_emails: Arc<RwLock<HashMap<String, String>>>, // email -> user_id
    user_usernames: Arc<RwLock<HashMap<String, String>>>, // username -> user_id
    books: Arc<RwLock<HashMap<String, BookRecord>>>,
    book_order: Arc<RwLock<Vec<String>>>, // book ids in insertion order
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            user_emails: Arc::new(RwLock::new(HashMap::new())),
            user_usernames: Arc::new(RwLock::new(HashMap::new())),
            books: Arc::new(RwLock::new(HashMap::new())),
            book_order: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Books ordered most recent first: walk insertion order newest first,
    /// then stable-sort by creation time so equal timestamps keep the most
    /// recently inserted entry in front.
    async fn books_most_recent_first(&self) -> Vec<BookRecord> {
        let books = self.books.read().await;
        let order = self.book_order.read().await;

        let mut sorted: Vec<&BookRecord> =
            order.iter().rev().filter_map(|id| books.get(id)).collect();
        sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        sorted.into_iter().cloned().collect()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, user: UserRecord) -> Result<String> {
        let mut users = self.users.write().await;
        let mut emails = self.user_emails.write().await;
        let mut usernames = self.user_usernames.write().await;

        // Both index maps are checked and updated under the same write locks,
        // so two concurrent registrations cannot both pass the handler-level
        // pre-checks and insert.
        if emails.contains_key(&user.email) {
            return Err(BookrackError::Conflict("Email already exists!".to_string()));
        }
        if usernames.contains_key(&user.username) {
            return Err(BookrackError::Conflict("Username already taken!".to_string()));
        }

        emails.insert(user.email.clone(), user.id.clone());
        usernames.insert(user.username.clone(), user.id.clone());

        let id = user.id.clone();
        users.insert(user.id.clone(), user);

        Ok(id)
    }

    async fn find_user(&self, user_id: &str) -> Result<Option<UserRecord>> {
        let users = self.users.read().await;
        Ok(users.get(user_id).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<UserRecord>> {
        // Index and record locks are taken one at a time; holding both here
        // would invert the lock order `create_user` relies on.
        let user_id = {
            let usernames = self.user_usernames.read().await;
            usernames.get(username).cloned()
        };

        match user_id {
            Some(user_id) => self.find_user(&user_id).await,
            None => Ok(None),
        }
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>> {
        let user_id = {
            let emails = self.user_emails.read().await;
            emails.get(email).cloned()
        };

        match user_id {
            Some(user_id) => self.find_user(&user_id).await,
            None => Ok(None),
        }
    }
}

#[async_trait]
impl BookStore for MemoryStore {
    async fn create_book(&self, book: BookRecord) -> Result<String> {
        let mut books = self.books.write().await;
        let mut order = self.book_order.write().await;

        let id = book.id.clone();
        order.push(id.clone());
        books.insert(id.clone(), book);

        Ok(id)
    }

    async fn find_book(&self, book_id: &str) -> Result<Option<BookRecord>> {
        let books = self.books.read().await;
        Ok(books.get(book_id).cloned())
    }

    async fn delete_book(&self, book_id: &str) -> Result<()> {
        let mut books = self.books.write().await;
        let mut order = self.book_order.write().await;

        if books.remove(book_id).is_some() {
            order.retain(|id| id != book_id);
            Ok(())
        } else {
            Err(BookrackError::NotFound("Book not found".to_string()))
        }
    }

    async fn list_books(&self, offset: usize, limit: usize) -> Result<Vec<BookRecord>> {
        let sorted = self.books_most_recent_first().await;
        Ok(sorted.into_iter().skip(offset).take(limit).collect())
    }

    async fn list_books_by_owner(&self, owner_id: &str) -> Result<Vec<BookRecord>> {
        let sorted = self.books_most_recent_first().await;
        Ok(sorted
            .into_iter()
            .filter(|book| book.owner == owner_id)
            .collect())
    }

    async fn count_books(&self) -> Result<usize> {
        let books = self.books.read().await;
        Ok(books.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(username: &str, email: &str) -> UserRecord {
        UserRecord::new(
            username.to_string(),
            email.to_string(),
            "$argon2id$fake-hash".to_string(),
            String::new(),
        )
    }

    fn book(title: &str, owner: &str) -> BookRecord {
        BookRecord::new(
            title.to_string(),
            "caption".to_string(),
            "https://example.test/cover.jpg".to_string(),
            4.0,
            owner.to_string(),
        )
    }

    #[tokio::test]
    async fn test_duplicate_email_is_a_conflict() {
        let store = MemoryStore::new();
        store.create_user(user("first", "shared@x.com")).await.unwrap();

        let err = store.create_user(user("second", "shared@x.com")).await.unwrap_err();
        assert_eq!(err.public_message(), "Email already exists!");
    }

    #[tokio::test]
    async fn test_duplicate_username_is_a_conflict() {
        let store = MemoryStore::new();
        store.create_user(user("shared", "first@x.com")).await.unwrap();

        let err = store.create_user(user("shared", "second@x.com")).await.unwrap_err();
        assert_eq!(err.public_message(), "Username already taken!");
    }

    #[tokio::test]
    async fn test_lookup_by_username_and_email() {
        let store = MemoryStore::new();
        let id = store.create_user(user("raj", "raj@x.com")).await.unwrap();

        let by_name = store.find_user_by_username("raj").await.unwrap().unwrap();
        let by_email = store.find_user_by_email("raj@x.com").await.unwrap().unwrap();
        assert_eq!(by_name.id, id);
        assert_eq!(by_email.id, id);
        assert!(store.find_user_by_username("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_listing_is_most_recent_first() {
        let store = MemoryStore::new();
        for i in 0..4 {
            store.create_book(book(&format!("book-{}", i), "owner")).await.unwrap();
        }

        let listed = store.list_books(0, 10).await.unwrap();
        let titles: Vec<&str> = listed.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["book-3", "book-2", "book-1", "book-0"]);
    }

    #[tokio::test]
    async fn test_delete_missing_book_is_not_found() {
        let store = MemoryStore::new();
        let err = store.delete_book("missing").await.unwrap_err();
        assert_eq!(err.status_code(), 404);
    }
}
