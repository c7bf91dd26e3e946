use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Provider identifier - mostly static constants
pub type ProviderId = &'static str;

lazy_static! {
    /// Strict canonical item id: tier prefix, family token, optional `@n` enchantment.
    /// Format: ^T<digits>_[A-Z0-9_@]+$
    static ref CANONICAL_ID_REGEX: Regex =
        Regex::new(r"^T(\d+)_[A-Z0-9_@]+$").expect("Invalid regex pattern");
}

/// Canonical Albion item identifier (e.g. `T4_BAG`, `T5_MOUNT_ARMORED_HORSE`).
///
/// Holding a `CanonicalId` says nothing about whether the item exists in the
/// [`ItemIndex`](crate::resolver::ItemIndex); ids that pass the resolver's
/// pattern fast path are trusted verbatim and fail later at fetch time.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanonicalId(Arc<str>);

impl CanonicalId {
    /// Wrap an identifier without validating it.
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(Arc::from(id.as_ref()))
    }

    /// Parse an identifier, accepting only the strict `T<tier>_<TOKEN>` syntax.
    ///
    /// # Examples
    ///
    /// ```
    /// use albion_market_data::CanonicalId;
    ///
    /// assert!(CanonicalId::parse("T4_BAG").is_some());
    /// assert!(CanonicalId::parse("T8_MAIN_SWORD@3").is_some());
    /// assert!(CanonicalId::parse("t4_bag").is_none());
    /// assert!(CanonicalId::parse("BAG").is_none());
    /// ```
    pub fn parse(id: &str) -> Option<Self> {
        CANONICAL_ID_REGEX.is_match(id).then(|| Self::new(id))
    }

    /// Whether the id matches the strict canonical syntax.
    pub fn is_well_formed(&self) -> bool {
        CANONICAL_ID_REGEX.is_match(&self.0)
    }

    /// Tier number encoded in the prefix (`T4_BAG` -> 4).
    pub fn tier(&self) -> Option<u8> {
        CANONICAL_ID_REGEX
            .captures(&self.0)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok())
    }

    /// Human label for the tier (`"Tier 4"`).
    pub fn tier_label(&self) -> Option<String> {
        self.tier().map(|tier| format!("Tier {}", tier))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CanonicalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CanonicalId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for CanonicalId {
    fn borrow(&self) -> &str {
        &self.0
    }
}
