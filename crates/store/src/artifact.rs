//! The artifact entity: one remembered piece of text.

use chrono::{DateTime, Utc};
use mnemos_core::Error;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier of an artifact (UUID v4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtifactId(Uuid);

impl ArtifactId {
    /// Generate a fresh random identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ArtifactId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ArtifactId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| Error::Parse(format!("invalid artifact id '{s}': {e}")))
    }
}

/// A stored unit of remembered text
///
/// Fields are only reachable through accessors, so an artifact cannot change
/// once built. Two artifacts are the same record exactly when their ids match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artifact {
    id: ArtifactId,
    text: String,
    #[serde(default)]
    tags: Vec<String>,
    created_at: DateTime<Utc>,
}

impl Artifact {
    /// Create an artifact with a fresh id, no tags, and the current time
    pub fn new(text: impl Into<String>) -> Self {
        Self { id: ArtifactId::new(), text: text.into(), tags: Vec::new(), created_at: Utc::now() }
    }

    pub fn with_id(mut self, id: ArtifactId) -> Self {
        self.id = id;
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn id(&self) -> ArtifactId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Case-insensitive substring match against the text, then each tag.
    ///
    /// `query_lower` must already be lowercased. Tags are not consulted once
    /// the text matches.
    pub(crate) fn matches(&self, query_lower: &str) -> bool {
        if self.text.to_lowercase().contains(query_lower) {
            return true;
        }

        self.tags.iter().any(|tag| tag.to_lowercase().contains(query_lower))
    }
}

impl PartialEq for Artifact {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Artifact {}

impl Hash for Artifact {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
