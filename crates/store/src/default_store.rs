//! Process-wide default store and the `remember`/`recall` shortcuts.
//!
//! The store is built on first use. Tests that need isolation swap it with
//! [`replace_default_store`] or [`reset_default_store`]; nothing else can
//! change which store the shortcuts talk to.

use crate::artifact::Artifact;
use crate::backend::ArtifactStore;
use crate::memory_store::MemoryStore;

use std::sync::{Arc, LazyLock, PoisonError, RwLock};

static DEFAULT_STORE: LazyLock<RwLock<Arc<dyn ArtifactStore>>> = LazyLock::new(|| RwLock::new(fresh_store()));

fn fresh_store() -> Arc<dyn ArtifactStore> {
    Arc::new(MemoryStore::new())
}

/// The store currently backing [`remember`] and [`recall`]
pub fn default_store() -> Arc<dyn ArtifactStore> {
    DEFAULT_STORE.read().unwrap_or_else(PoisonError::into_inner).clone()
}

/// Install `store` as the default and return the one it replaces
pub fn replace_default_store(store: Arc<dyn ArtifactStore>) -> Arc<dyn ArtifactStore> {
    let mut current = DEFAULT_STORE.write().unwrap_or_else(PoisonError::into_inner);
    tracing::debug!("Replacing default store");
    std::mem::replace(&mut *current, store)
}

/// Install a fresh, empty [`MemoryStore`] as the default
pub fn reset_default_store() {
    replace_default_store(fresh_store());
}

/// Store `text` with `tags` in the default store
///
/// ```
/// use mnemos_store::{recall, remember};
///
/// remember("The fire rises", ["dark_knight", "bane"]);
/// assert!(!recall("fire").is_empty());
/// ```
pub fn remember<I, S>(text: &str, tags: I) -> Artifact
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    default_store().save(text, tags.into_iter().map(Into::into).collect())
}

/// Search the default store; see [`ArtifactStore::search`]
pub fn recall(query: &str) -> Vec<Artifact> {
    default_store().search(query)
}
