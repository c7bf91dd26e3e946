//! Resolution traits for the market data crate.
//!
//! Defines the core abstractions for resolving free-text queries to
//! canonical item identifiers.

use serde::Serialize;

use crate::errors::ResolveError;
use crate::models::CanonicalId;

use super::normalize::normalize;

/// A user query prepared once for every resolver in the chain.
#[derive(Clone, Debug)]
pub struct ResolveQuery<'a> {
    /// The query with surrounding whitespace trimmed.
    pub raw: &'a str,
    /// `normalize(raw)`.
    pub normalized: String,
}

impl<'a> ResolveQuery<'a> {
    pub fn new(query: &'a str) -> Self {
        let raw = query.trim();
        Self {
            raw,
            normalized: normalize(raw),
        }
    }
}

/// Resolution result containing the identifier and the rule that produced it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Resolved {
    pub id: CanonicalId,
    pub source: ResolutionSource,
}

/// Indicates which precedence rule resolved a query.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionSource {
    /// The query already looked like an item id.
    IdPattern,
    /// Exact alias phrase.
    ExactAlias,
    /// Alias phrase after normalization.
    NormalizedAlias,
    /// Localized item name after normalization.
    ExactName,
    /// The only localized name containing the query.
    UniqueSubstring,
}

/// Individual resolver in the resolution chain.
///
/// Resolvers are tried in order until one returns a result.
/// Returning `None` means this resolver cannot handle the query,
/// and the chain should try the next resolver.
pub trait Resolver: Send + Sync {
    /// Attempt to resolve the query.
    ///
    /// # Returns
    /// * `Some(Ok(resolved))` - Successfully resolved
    /// * `Some(Err(error))` - Definitive failure (stops the chain)
    /// * `None` - This resolver has no opinion (try next)
    fn resolve(&self, query: &ResolveQuery<'_>) -> Option<Result<Resolved, ResolveError>>;
}
