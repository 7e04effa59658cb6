//! In-memory artifact store with substring search
//!
//! All state sits behind one mutex. Each operation takes the lock once, does
//! no I/O while holding it, and releases it before returning.
use crate::artifact::{Artifact, ArtifactId};
use crate::backend::ArtifactStore;

use chrono::{DateTime, Utc};
use mnemos_core::{Clock, Config, PrivacyConfig, SystemClock, redact_text};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::instrument;

/// Store statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreStats {
    /// Number of artifacts currently held
    pub artifact_count: usize,
    /// Total tags across all artifacts (duplicates counted)
    pub tag_count: usize,
    /// Earliest `created_at`, if any artifacts exist
    pub oldest: Option<DateTime<Utc>>,
    /// Latest `created_at`, if any artifacts exist
    pub newest: Option<DateTime<Utc>>,
}

struct Entry {
    /// Insertion order; breaks ties between equal timestamps.
    seq: u64,
    artifact: Artifact,
}

#[derive(Default)]
struct State {
    artifacts: HashMap<ArtifactId, Entry>,
    next_seq: u64,
}

impl State {
    fn put(&mut self, artifact: Artifact) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.artifacts.insert(artifact.id(), Entry { seq, artifact });
    }
}

/// Process-local artifact store
///
/// Search results are ordered by `created_at` descending. Artifacts with the
/// same timestamp come out most recently inserted first.
pub struct MemoryStore {
    state: Mutex<State>,
    clock: Arc<dyn Clock>,
    privacy: PrivacyConfig,
}

impl MemoryStore {
    /// Create an empty store using the system clock
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create an empty store that timestamps artifacts with `clock`
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self { state: Mutex::new(State::default()), clock, privacy: PrivacyConfig::default() }
    }

    /// Create an empty store sized and logged according to `config`
    pub fn from_config(config: &Config, clock: Arc<dyn Clock>) -> Self {
        let state = State { artifacts: HashMap::with_capacity(config.store.initial_capacity), next_seq: 0 };
        let logging = mnemos_core::LoggingConfig::from(config.logging.clone());
        Self { state: Mutex::new(state), clock, privacy: logging.privacy }
    }

    /// Control how artifact text and queries appear in trace logs
    pub fn with_privacy(mut self, privacy: PrivacyConfig) -> Self {
        self.privacy = privacy;
        self
    }

    /// Every critical section leaves the map consistent, so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of what the store currently holds
    pub fn stats(&self) -> StoreStats {
        let state = self.lock();
        let timestamps = state.artifacts.values().map(|entry| entry.artifact.created_at());

        StoreStats {
            artifact_count: state.artifacts.len(),
            tag_count: state.artifacts.values().map(|entry| entry.artifact.tags().len()).sum(),
            oldest: timestamps.clone().min(),
            newest: timestamps.max(),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore").field("len", &self.len()).finish_non_exhaustive()
    }
}

impl ArtifactStore for MemoryStore {
    #[instrument(skip(self, text, tags), fields(tag_count = tags.len()))]
    fn save(&self, text: &str, tags: Vec<String>) -> Artifact {
        let artifact = Artifact::new(text).with_tags(tags).with_created_at(self.clock.now());
        tracing::trace!(text = %redact_text(text, &self.privacy), "Saving artifact");

        self.lock().put(artifact.clone());
        tracing::debug!(id = %artifact.id(), "Artifact saved");
        artifact
    }

    #[instrument(skip(self, artifact), fields(id = %artifact.id()))]
    fn insert(&self, artifact: Artifact) -> Artifact {
        self.lock().put(artifact.clone());
        tracing::debug!("Artifact inserted");
        artifact
    }

    #[instrument(skip_all)]
    fn search(&self, query: &str) -> Vec<Artifact> {
        if query.is_empty() {
            tracing::trace!("Empty query, returning no results");
            return Vec::new();
        }

        tracing::debug!(query = %redact_text(query, &self.privacy), "Searching artifacts");
        let query_lower = query.to_lowercase();

        let state = self.lock();
        let mut hits: Vec<&Entry> =
            state.artifacts.values().filter(|entry| entry.artifact.matches(&query_lower)).collect();

        hits.sort_by(|a, b| {
            b.artifact
                .created_at()
                .cmp(&a.artifact.created_at())
                .then_with(|| b.seq.cmp(&a.seq))
        });

        let results: Vec<Artifact> = hits.into_iter().map(|entry| entry.artifact.clone()).collect();
        tracing::debug!(matches = results.len(), "Search complete");
        results
    }

    #[instrument(skip(self))]
    fn clear(&self) {
        let mut state = self.lock();
        let removed = state.artifacts.len();
        state.artifacts.clear();
        tracing::debug!(removed, "Store cleared");
    }

    fn get(&self, id: &ArtifactId) -> Option<Artifact> {
        self.lock().artifacts.get(id).map(|entry| entry.artifact.clone())
    }

    fn len(&self) -> usize {
        self.lock().artifacts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use mnemos_core::{ManualClock, TextLogging};

    fn test_clock() -> Arc<ManualClock> {
        Arc::new(ManualClock::new(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()))
    }

    fn texts(results: &[Artifact]) -> Vec<&str> {
        results.iter().map(Artifact::text).collect()
    }

    #[test]
    fn test_save_creates_artifact() {
        let store = MemoryStore::new();
        let artifact = store.save("Test memory", vec!["test".to_string()]);

        assert_eq!(artifact.text(), "Test memory");
        assert_eq!(artifact.tags(), ["test".to_string()]);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&artifact.id()), Some(artifact));
    }

    #[test]
    fn test_save_uses_injected_clock() {
        let clock = test_clock();
        let store = MemoryStore::with_clock(clock.clone());

        let first = store.save("first", vec![]);
        clock.advance(Duration::minutes(5));
        let second = store.save("second", vec![]);

        assert_eq!(second.created_at() - first.created_at(), Duration::minutes(5));
    }

    #[test]
    fn test_save_without_tags_gets_own_empty_tags() {
        let store = MemoryStore::new();
        let a = store.save("a", Vec::new());
        let b = store.save("b", Vec::new());
        assert!(a.tags().is_empty());
        assert!(b.tags().is_empty());
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_search_in_text_and_tags() {
        let store = MemoryStore::with_clock(test_clock());
        store.save("The quick brown fox", vec!["animal".to_string(), "fox".to_string()]);
        store.save("Lazy dog jumps over", vec!["animal".to_string(), "dog".to_string()]);
        store.save("Irrelevant memory", vec!["other".to_string()]);

        assert_eq!(texts(&store.search("brown")), vec!["The quick brown fox"]);
        assert_eq!(texts(&store.search("dog")), vec!["Lazy dog jumps over"]);
        assert_eq!(texts(&store.search("OTHER")), vec!["Irrelevant memory"]);
    }

    #[test]
    fn test_search_not_found() {
        let store = MemoryStore::new();
        store.save("Test artifact", vec![]);
        assert!(store.search("nonexistent").is_empty());
    }

    #[test]
    fn test_empty_query_returns_nothing() {
        let store = MemoryStore::new();
        store.save("anything", vec!["tag".to_string()]);
        store.save("", vec![]);
        assert!(store.search("").is_empty());
    }

    #[test]
    fn test_text_match_counted_once() {
        let store = MemoryStore::new();
        store.save("fox in text", vec!["fox".to_string(), "foxes".to_string()]);
        assert_eq!(store.search("fox").len(), 1);
    }

    #[test]
    fn test_search_orders_newest_first() {
        let clock = test_clock();
        let store = MemoryStore::with_clock(clock.clone());

        store.save("Old memory", vec![]);
        clock.advance(Duration::days(1));
        store.save("Recent memory", vec![]);

        assert_eq!(texts(&store.search("memory")), vec!["Recent memory", "Old memory"]);
    }

    #[test]
    fn test_insert_orders_by_timestamp_not_insertion() {
        let store = MemoryStore::new();
        let now = Utc::now();

        store.insert(Artifact::new("New artifact").with_created_at(now));
        store.insert(Artifact::new("Old artifact").with_created_at(now - Duration::days(1)));

        assert_eq!(texts(&store.search("artifact")), vec!["New artifact", "Old artifact"]);
    }

    #[test]
    fn test_equal_timestamps_latest_insert_first() {
        let store = MemoryStore::with_clock(test_clock());
        store.save("Memory 1", vec![]);
        store.save("Memory 2", vec![]);
        store.save("Memory 3", vec![]);

        assert_eq!(texts(&store.search("memory")), vec!["Memory 3", "Memory 2", "Memory 1"]);
    }

    #[test]
    fn test_insert_with_existing_id_replaces() {
        let store = MemoryStore::new();
        let original = store.save("draft", vec![]);
        store.insert(Artifact::new("final").with_id(original.id()));

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&original.id()).map(|a| a.text().to_string()), Some("final".to_string()));
        assert!(store.search("draft").is_empty());
    }

    #[test]
    fn test_identical_saves_are_not_deduplicated() {
        let store = MemoryStore::new();
        let a = store.save("same", vec!["t".to_string()]);
        let b = store.save("same", vec!["t".to_string()]);

        let results = store.search("same");
        assert_eq!(results.len(), 2);
        assert!(results.contains(&a));
        assert!(results.contains(&b));
    }

    #[test]
    fn test_clear() {
        let store = MemoryStore::new();
        store.save("Test artifact", vec![]);
        assert_eq!(store.search("artifact").len(), 1);

        store.clear();
        assert!(store.search("artifact").is_empty());
        assert!(store.is_empty());

        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn test_get_missing() {
        let store = MemoryStore::new();
        assert!(store.get(&ArtifactId::new()).is_none());
    }

    #[test]
    fn test_stats() {
        let clock = test_clock();
        let start = clock.now();
        let store = MemoryStore::with_clock(clock.clone());

        let empty = store.stats();
        assert_eq!(empty.artifact_count, 0);
        assert!(empty.oldest.is_none() && empty.newest.is_none());

        store.save("one", vec!["a".to_string(), "b".to_string()]);
        clock.advance(Duration::hours(1));
        store.save("two", vec!["a".to_string()]);

        let stats = store.stats();
        assert_eq!(stats.artifact_count, 2);
        assert_eq!(stats.tag_count, 3);
        assert_eq!(stats.oldest, Some(start));
        assert_eq!(stats.newest, Some(start + Duration::hours(1)));
    }

    #[test]
    fn test_from_config() {
        let config = Config::from_toml_str("[store]\ninitial_capacity = 32\n[logging.privacy]\nlog_text = \"none\"\n")
            .unwrap();
        let store = MemoryStore::from_config(&config, test_clock());

        assert_eq!(store.privacy.log_text, TextLogging::None);
        assert!(store.lock().artifacts.capacity() >= 32);
        assert!(store.is_empty());
    }

    #[test]
    fn test_debug_shows_len() {
        let store = MemoryStore::new();
        store.save("x", vec![]);
        assert!(format!("{store:?}").contains("len: 1"));
    }
}
