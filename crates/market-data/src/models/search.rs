//! Search result models for item lookup.

use serde::{Deserialize, Serialize};

use super::types::CanonicalId;

/// Where a search hit came from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchSource {
    /// Matched a curated alias phrase
    Alias { phrase: String },
    /// Matched a dataset record by name or id
    Dataset,
}

/// Result from a keyword search.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Name to show the user (localized name when known)
    pub display_name: String,

    /// Canonical item id
    pub id: CanonicalId,

    /// Alias or dataset origin
    pub source: MatchSource,
}

impl SearchHit {
    pub fn from_alias(
        display_name: impl Into<String>,
        id: CanonicalId,
        phrase: impl Into<String>,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            id,
            source: MatchSource::Alias {
                phrase: phrase.into(),
            },
        }
    }

    pub fn from_dataset(display_name: impl Into<String>, id: CanonicalId) -> Self {
        Self {
            display_name: display_name.into(),
            id,
            source: MatchSource::Dataset,
        }
    }

    pub fn is_alias(&self) -> bool {
        matches!(self.source, MatchSource::Alias { .. })
    }
}
