//! Resolution engine - maps one query to at most one canonical id.
//!
//! Precedence, first hit wins:
//! 1. Id pattern (`T…_…`, upper-cased, trusted without an index lookup)
//! 2. Exact alias phrase
//! 3. Normalized alias phrase
//! 4. Normalized localized name (last record wins on duplicate names)
//! 5. Unique normalized substring of a localized name

use std::sync::Arc;

use crate::errors::ResolveError;
use crate::models::CanonicalId;

use super::alias_table::AliasTable;
use super::item_index::ItemIndex;
use super::traits::{ResolutionSource, ResolveQuery, Resolved, Resolver};

/// Passes through anything that already looks like an item id.
///
/// The check is deliberately loose (starts with `T`, contains `_`); ids that
/// do not exist upstream fail at fetch time, not here.
pub struct IdPatternResolver;

impl Resolver for IdPatternResolver {
    fn resolve(&self, query: &ResolveQuery<'_>) -> Option<Result<Resolved, ResolveError>> {
        let upper = query.raw.to_uppercase();
        if upper.starts_with('T') && upper.contains('_') {
            return Some(Ok(Resolved {
                id: CanonicalId::new(upper),
                source: ResolutionSource::IdPattern,
            }));
        }
        None
    }
}

/// Exact, then normalized, alias lookup.
pub struct AliasResolver {
    aliases: Arc<AliasTable>,
}

impl AliasResolver {
    pub fn new(aliases: Arc<AliasTable>) -> Self {
        Self { aliases }
    }
}

impl Resolver for AliasResolver {
    fn resolve(&self, query: &ResolveQuery<'_>) -> Option<Result<Resolved, ResolveError>> {
        if let Some(entry) = self.aliases.exact(query.raw) {
            return Some(Ok(Resolved {
                id: entry.id.clone(),
                source: ResolutionSource::ExactAlias,
            }));
        }

        self.aliases
            .find_normalized(&query.normalized)
            .map(|entry| {
                Ok(Resolved {
                    id: entry.id.clone(),
                    source: ResolutionSource::NormalizedAlias,
                })
            })
    }
}

/// Localized-name lookup: exact first, then unique substring.
pub struct NameResolver {
    index: Arc<ItemIndex>,
}

impl NameResolver {
    pub fn new(index: Arc<ItemIndex>) -> Self {
        Self { index }
    }
}

impl Resolver for NameResolver {
    fn resolve(&self, query: &ResolveQuery<'_>) -> Option<Result<Resolved, ResolveError>> {
        let named = || self.index.indexed().filter(|r| r.has_localized_name());

        // Records sharing a localized name: the later one in dataset order wins.
        if let Some(hit) = named()
            .filter(|r| r.localized_key == query.normalized)
            .last()
        {
            return Some(Ok(Resolved {
                id: hit.record.id.clone(),
                source: ResolutionSource::ExactName,
            }));
        }

        let mut candidates: Vec<CanonicalId> = named()
            .filter(|r| r.localized_key.contains(query.normalized.as_str()))
            .map(|r| r.record.id.clone())
            .collect();

        match candidates.len() {
            0 => None,
            1 => Some(Ok(Resolved {
                id: candidates.remove(0),
                source: ResolutionSource::UniqueSubstring,
            })),
            _ => Some(Err(ResolveError::Ambiguous {
                query: query.raw.to_string(),
                candidates,
            })),
        }
    }
}

/// Composite resolver that applies the precedence rules in order.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use albion_market_data::resolver::{AliasTable, ItemIndex, ResolutionEngine};
///
/// let index = ItemIndex::from_json_str(r#"{"T4_BAG": {"ko": "숙련자의 가방", "en": "Adept's Bag"}}"#)?;
/// let engine = ResolutionEngine::new(Arc::new(AliasTable::builtin()), Arc::new(index));
///
/// assert_eq!(engine.resolve("가방").unwrap().as_str(), "T4_BAG");
/// assert_eq!(engine.resolve("t6_bag").unwrap().as_str(), "T6_BAG");
/// assert!(engine.resolve("존재하지않음").is_none());
/// # Ok::<(), albion_market_data::errors::DatasetError>(())
/// ```
pub struct ResolutionEngine {
    resolvers: Vec<Box<dyn Resolver>>,
}

impl ResolutionEngine {
    /// Create an engine with the default resolver order.
    pub fn new(aliases: Arc<AliasTable>, index: Arc<ItemIndex>) -> Self {
        Self {
            resolvers: vec![
                Box::new(IdPatternResolver),
                Box::new(AliasResolver::new(aliases)),
                Box::new(NameResolver::new(index)),
            ],
        }
    }

    /// Resolve a query, collapsing "no match" and "ambiguous" into `None`.
    pub fn resolve(&self, query: &str) -> Option<CanonicalId> {
        self.resolve_detailed(query).ok().map(|resolved| resolved.id)
    }

    /// Resolve a query, reporting which rule matched or why none did.
    pub fn resolve_detailed(&self, query: &str) -> Result<Resolved, ResolveError> {
        let prepared = ResolveQuery::new(query);
        let not_found = || ResolveError::NotFound {
            query: prepared.raw.to_string(),
        };

        if prepared.normalized.is_empty() {
            return Err(not_found());
        }

        for resolver in &self.resolvers {
            if let Some(result) = resolver.resolve(&prepared) {
                if let Ok(resolved) = &result {
                    log::debug!(
                        "Resolved '{}' -> {} via {:?}",
                        prepared.raw,
                        resolved.id,
                        resolved.source
                    );
                }
                return result;
            }
        }

        Err(not_found())
    }
}
