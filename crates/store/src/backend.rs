use crate::artifact::{Artifact, ArtifactId};

/// Storage capability behind the convenience API
///
/// [`MemoryStore`](crate::MemoryStore) is the only implementation shipped
/// here. Every operation is total: none of them can fail.
pub trait ArtifactStore: Send + Sync {
    /// Create an artifact with a fresh id and the current time, and keep it.
    fn save(&self, text: &str, tags: Vec<String>) -> Artifact;

    /// Keep an already-built artifact, replacing any artifact with the same id.
    fn insert(&self, artifact: Artifact) -> Artifact;

    /// Case-insensitive substring search over text and tags, newest first.
    ///
    /// An empty query returns no results.
    fn search(&self, query: &str) -> Vec<Artifact>;

    /// Drop every artifact. Clearing an empty store is a no-op.
    fn clear(&self);

    fn get(&self, id: &ArtifactId) -> Option<Artifact>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
