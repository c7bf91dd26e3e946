//! Keyword search over aliases and the item dataset.

use std::collections::HashSet;
use std::sync::Arc;

use crate::models::{CanonicalId, SearchHit};

use super::alias_table::AliasTable;
use super::item_index::ItemIndex;
use super::normalize::normalize;

/// Default number of hits returned by front ends.
pub const DEFAULT_SEARCH_LIMIT: usize = 20;

/// Ranked, de-duplicated keyword search.
///
/// Alias hits always come first, then dataset hits; each group keeps its
/// enumeration order. There is no relevance scoring.
pub struct SearchEngine {
    aliases: Arc<AliasTable>,
    index: Arc<ItemIndex>,
}

impl SearchEngine {
    pub fn new(aliases: Arc<AliasTable>, index: Arc<ItemIndex>) -> Self {
        Self { aliases, index }
    }

    /// Return at most `limit` hits whose alias, name or id contains `keyword`.
    ///
    /// An empty keyword matches everything.
    pub fn search(&self, keyword: &str, limit: usize) -> Vec<SearchHit> {
        let needle = normalize(keyword);
        let mut seen: HashSet<CanonicalId> = HashSet::new();
        let mut hits = Vec::new();

        for (entry, phrase_key) in self.aliases.iter_normalized() {
            if phrase_key.contains(needle.as_str()) && seen.insert(entry.id.clone()) {
                let display = self
                    .index
                    .localized_name(entry.id.as_str())
                    .unwrap_or(entry.phrase.as_str());
                hits.push(SearchHit::from_alias(display, entry.id.clone(), &entry.phrase));
            }
        }

        for indexed in self.index.indexed() {
            if hits.len() >= limit {
                break;
            }
            let matches = indexed.localized_key.contains(needle.as_str())
                || indexed.reference_key.contains(needle.as_str())
                || indexed.id_key.contains(needle.as_str());

            if matches && seen.insert(indexed.record.id.clone()) {
                hits.push(SearchHit::from_dataset(
                    indexed.record.display_name(),
                    indexed.record.id.clone(),
                ));
            }
        }

        hits.truncate(limit);
        log::debug!("Search '{}' returned {} hits", keyword, hits.len());
        hits
    }
}
