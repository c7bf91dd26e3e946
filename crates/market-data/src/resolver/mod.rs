//! Item resolution and search.
//!
//! This module turns free-text user input (Korean names, English names,
//! colloquial aliases, raw ids) into canonical item identifiers.
//!
//! # Architecture
//!
//! The resolver uses a chain of responsibility pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    ResolutionEngine                          │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────────┐ │
//! │  │ 1. IdPatternResolver                                    │ │
//! │  │    - "t4_bag" -> T4_BAG, trusted without index lookup   │ │
//! │  └────────────────────────────────────────────────────────┘ │
//! │                           │ miss                             │
//! │                           ▼                                  │
//! │  ┌────────────────────────────────────────────────────────┐ │
//! │  │ 2. AliasResolver (AliasTable)                           │ │
//! │  │    - exact phrase, then normalized phrase               │ │
//! │  └────────────────────────────────────────────────────────┘ │
//! │                           │ miss                             │
//! │                           ▼                                  │
//! │  ┌────────────────────────────────────────────────────────┐ │
//! │  │ 3. NameResolver (ItemIndex)                             │ │
//! │  │    - normalized localized name, then unique substring   │ │
//! │  └────────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`SearchEngine`] shares the same [`AliasTable`] and [`ItemIndex`] and
//! returns ranked candidate lists instead of a single id.
//!
//! Everything here is immutable after construction and safe to share
//! across threads behind an `Arc`.

mod alias_table;
mod engine;
mod item_index;
mod normalize;
mod search;
mod traits;

pub use alias_table::AliasTable;
pub use engine::{AliasResolver, IdPatternResolver, NameResolver, ResolutionEngine};
pub use item_index::ItemIndex;
pub use normalize::normalize;
pub use search::{SearchEngine, DEFAULT_SEARCH_LIMIT};
pub use traits::{ResolutionSource, ResolveQuery, Resolved, Resolver};
