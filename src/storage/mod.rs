//! Storage mechanisms for persisting users and books

pub mod memory;
pub mod traits;

// Re-export main components
pub use memory::MemoryStore;
pub use traits::{BookRecord, BookStore, UserRecord, UserStore};
