//! In-process memory store for short text artifacts
//!
//! Save text with optional tags, then find it again by case-insensitive
//! substring match. Results come back newest first. Nothing is persisted.
//!
//! # Example
//!
//! ```
//! use mnemos_store::{ArtifactStore, MemoryStore};
//!
//! let store = MemoryStore::new();
//! store.save("The quick brown fox", vec!["animal".to_string()]);
//! store.save("Lazy dog jumps over", vec!["animal".to_string()]);
//!
//! let hits = store.search("brown");
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].text(), "The quick brown fox");
//!
//! assert_eq!(store.search("ANIMAL").len(), 2);
//! assert!(store.search("").is_empty());
//! ```

mod artifact;
mod backend;
mod default_store;
mod memory_store;

pub use artifact::{Artifact, ArtifactId};
pub use backend::ArtifactStore;
pub use default_store::{default_store, recall, remember, replace_default_store, reset_default_store};
pub use memory_store::{MemoryStore, StoreStats};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
