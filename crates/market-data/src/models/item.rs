use serde::{Deserialize, Serialize};

use super::types::CanonicalId;

/// One entry of the item dataset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    /// Canonical identifier, unique within an index
    pub id: CanonicalId,

    /// Localized (Korean) display name; may be empty
    pub localized_name: String,

    /// Reference (English) name
    pub reference_name: String,
}

impl ItemRecord {
    pub fn new(
        id: CanonicalId,
        localized_name: impl Into<String>,
        reference_name: impl Into<String>,
    ) -> Self {
        Self {
            id,
            localized_name: localized_name.into(),
            reference_name: reference_name.into(),
        }
    }

    /// Localized name, or the reference name when no localization exists.
    pub fn display_name(&self) -> &str {
        if self.localized_name.is_empty() {
            &self.reference_name
        } else {
            &self.localized_name
        }
    }
}

/// Curated colloquial phrase pointing at a canonical id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasEntry {
    pub phrase: String,
    pub id: CanonicalId,
}

impl AliasEntry {
    pub fn new(phrase: impl Into<String>, id: CanonicalId) -> Self {
        Self {
            phrase: phrase.into(),
            id,
        }
    }
}
