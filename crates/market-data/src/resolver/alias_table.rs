//! Curated colloquial aliases.
//!
//! Players rarely type the full localized item name ("숙련자의 가방"); the
//! alias table maps the short phrases they do type onto canonical ids. The
//! table is small, ordered and immutable once built.

use std::collections::{HashMap, HashSet};

use crate::errors::DatasetError;
use crate::models::{AliasEntry, CanonicalId};

use super::normalize::normalize;

/// Built-in aliases, in lookup order.
const BUILTIN_ALIASES: &[(&str, &str)] = &[
    ("가방", "T4_BAG"),
    ("말", "T3_MOUNT_HORSE"),
    ("소", "T3_MOUNT_OX"),
    ("갑옷말", "T5_MOUNT_ARMORED_HORSE"),
    ("갑옷 말", "T5_MOUNT_ARMORED_HORSE"),
    ("체력포션", "T4_POTION_HEALTH"),
    ("에너지포션", "T4_POTION_ENERGY"),
    ("집중포션", "T4_POTION_FOCUS"),
    ("헤르틱망토", "T4_CAPEITEM_HERETIC"),
    ("악마망토", "T4_CAPEITEM_DEMON"),
    ("언데드망토", "T4_CAPEITEM_UNDEAD"),
    ("키퍼망토", "T4_CAPEITEM_KEEPER"),
    ("모르가나망토", "T4_CAPEITEM_MORGANA"),
];

/// Ordered phrase -> id table with exact and normalized lookups.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    entries: Vec<AliasEntry>,
    /// normalize(phrase), parallel to `entries`
    normalized: Vec<String>,
    by_phrase: HashMap<String, usize>,
}

impl AliasTable {
    /// The curated aliases shipped with the crate.
    pub fn builtin() -> Self {
        Self::index(
            BUILTIN_ALIASES
                .iter()
                .map(|(phrase, id)| AliasEntry::new(*phrase, CanonicalId::new(id)))
                .collect(),
        )
    }

    /// An empty table (every alias rule misses).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a table from caller-supplied entries, keeping their order.
    ///
    /// Fails if a phrase appears twice or an id is not a canonical id.
    pub fn from_entries(
        entries: impl IntoIterator<Item = AliasEntry>,
    ) -> Result<Self, DatasetError> {
        let mut seen = HashSet::new();
        let mut collected = Vec::new();

        for entry in entries {
            if !entry.id.is_well_formed() {
                return Err(DatasetError::InvalidId(entry.id.to_string()));
            }
            if !seen.insert(entry.phrase.clone()) {
                return Err(DatasetError::DuplicateAlias(entry.phrase));
            }
            collected.push(entry);
        }

        Ok(Self::index(collected))
    }

    fn index(entries: Vec<AliasEntry>) -> Self {
        let normalized = entries.iter().map(|e| normalize(&e.phrase)).collect();
        let by_phrase = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.phrase.clone(), i))
            .collect();

        Self {
            entries,
            normalized,
            by_phrase,
        }
    }

    /// Byte-for-byte phrase lookup.
    pub fn exact(&self, phrase: &str) -> Option<&AliasEntry> {
        self.by_phrase.get(phrase).map(|&i| &self.entries[i])
    }

    /// First entry (in table order) whose normalized phrase equals `normalized`.
    pub fn find_normalized(&self, normalized: &str) -> Option<&AliasEntry> {
        self.iter_normalized()
            .find(|(_, key)| *key == normalized)
            .map(|(entry, _)| entry)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AliasEntry> {
        self.entries.iter()
    }

    /// Entries paired with their normalized phrase, in table order.
    pub(crate) fn iter_normalized(&self) -> impl Iterator<Item = (&AliasEntry, &str)> {
        self.entries
            .iter()
            .zip(self.normalized.iter().map(String::as_str))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
