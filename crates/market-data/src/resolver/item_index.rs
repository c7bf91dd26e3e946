//! Immutable item dataset snapshot.
//!
//! The index is built once from an externally produced `item_db.json`
//! (`{ "<ID>": { "ko": "...", "en": "..." } }`) and never mutated, so it can
//! be shared behind an `Arc` by any number of readers. Object order in the
//! source file is the iteration order used by search and resolution.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::errors::DatasetError;
use crate::models::{CanonicalId, ItemRecord};

use super::normalize::normalize;

/// Name pair as stored in `item_db.json`.
#[derive(Debug, Deserialize)]
struct RawNames {
    #[serde(default)]
    ko: String,
    #[serde(default)]
    en: String,
}

/// Dataset entries in file order (a plain `HashMap` would lose it).
struct RawDataset(Vec<(String, RawNames)>);

impl<'de> Deserialize<'de> for RawDataset {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct OrderedVisitor;

        impl<'de> Visitor<'de> for OrderedVisitor {
            type Value = RawDataset;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of item id to name pair")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((id, names)) = map.next_entry::<String, RawNames>()? {
                    entries.push((id, names));
                }
                Ok(RawDataset(entries))
            }
        }

        deserializer.deserialize_map(OrderedVisitor)
    }
}

/// A record together with its precomputed comparison keys.
#[derive(Debug, Clone)]
pub(crate) struct IndexedRecord {
    pub(crate) record: ItemRecord,
    /// normalize(localized_name)
    pub(crate) localized_key: String,
    /// normalize(reference_name)
    pub(crate) reference_key: String,
    /// id, lower-cased
    pub(crate) id_key: String,
}

impl IndexedRecord {
    fn new(record: ItemRecord) -> Self {
        Self {
            localized_key: normalize(&record.localized_name),
            reference_key: normalize(&record.reference_name),
            id_key: record.id.as_str().to_lowercase(),
            record,
        }
    }

    pub(crate) fn has_localized_name(&self) -> bool {
        !self.record.localized_name.is_empty()
    }
}

/// Identifier -> names mapping, in dataset order.
#[derive(Debug, Clone)]
pub struct ItemIndex {
    records: Vec<IndexedRecord>,
    by_id: HashMap<CanonicalId, usize>,
    version: String,
}

impl ItemIndex {
    /// Build an index from in-memory records (synthetic datasets, tests).
    ///
    /// The version label is a fingerprint of the records' contents.
    pub fn from_records(
        records: impl IntoIterator<Item = ItemRecord>,
    ) -> Result<Self, DatasetError> {
        let records: Vec<ItemRecord> = records.into_iter().collect();

        let mut context = md5::Context::new();
        for record in &records {
            context.consume(record.id.as_str().as_bytes());
            context.consume(b"\t");
            context.consume(record.localized_name.as_bytes());
            context.consume(b"\t");
            context.consume(record.reference_name.as_bytes());
            context.consume(b"\n");
        }
        let version = format!("{:x}", context.compute());

        Self::build(records, version)
    }

    /// Parse an `item_db.json` document.
    ///
    /// The version label is the md5 of the document.
    pub fn from_json_str(json: &str) -> Result<Self, DatasetError> {
        let RawDataset(entries) = serde_json::from_str(json)?;
        let records = entries
            .into_iter()
            .map(|(id, names)| ItemRecord::new(CanonicalId::new(id), names.ko, names.en))
            .collect();

        Self::build(records, format!("{:x}", md5::compute(json.as_bytes())))
    }

    /// Read and parse an `item_db.json` file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let index = Self::from_json_str(&json)?;
        log::info!(
            "Loaded {} items from {} (version {})",
            index.len(),
            path.as_ref().display(),
            index.version()
        );
        Ok(index)
    }

    fn build(records: Vec<ItemRecord>, version: String) -> Result<Self, DatasetError> {
        let mut by_id = HashMap::with_capacity(records.len());
        let mut indexed = Vec::with_capacity(records.len());

        for (position, record) in records.into_iter().enumerate() {
            if by_id.insert(record.id.clone(), position).is_some() {
                return Err(DatasetError::DuplicateId(record.id.to_string()));
            }
            indexed.push(IndexedRecord::new(record));
        }

        Ok(Self {
            records: indexed,
            by_id,
            version,
        })
    }

    /// Replace the version label (e.g. with a release tag of the dataset).
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn get(&self, id: &str) -> Option<&ItemRecord> {
        self.by_id.get(id).map(|&i| &self.records[i].record)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Localized name for `id`, if the item exists and has one.
    pub fn localized_name(&self, id: &str) -> Option<&str> {
        self.get(id)
            .map(|r| r.localized_name.as_str())
            .filter(|name| !name.is_empty())
    }

    /// Localized name, falling back to the reference name.
    pub fn display_name(&self, id: &str) -> Option<&str> {
        self.get(id).map(ItemRecord::display_name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemRecord> {
        self.records.iter().map(|r| &r.record)
    }

    pub(crate) fn indexed(&self) -> impl Iterator<Item = &IndexedRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
