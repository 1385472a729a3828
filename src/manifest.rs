//! The gallery manifest: the one artifact shared by build time and runtime.
//!
//! ## Format
//!
//! A JSON object keyed by category identifier. Each value is an array of
//! image records in display/navigation order:
//!
//! ```json
//! {
//!   "wedding": [
//!     {
//!       "src": "/gallery/wedding/wedding-1.jpg",
//!       "webp": "/gallery/wedding/wedding-1.webp",
//!       "alt": "Wedding photo"
//!     }
//!   ]
//! }
//! ```
//!
//! `webp` is optional. Array position is the only ordering information, so
//! consumers index into it positionally.
//!
//! ## Writing vs. reading
//!
//! The writer is strict: only non-empty categories are emitted, keys come out
//! in [`Category`] declaration order, and the output is pretty-printed with
//! two-space indentation so that re-running ingestion over unchanged input
//! produces a byte-identical file.
//!
//! The reader ([`Manifest::parse`]) is lenient. Unknown category keys, values
//! that are not arrays, and entries without a `src` string are dropped with a
//! warning instead of failing the whole load.

use crate::category::Category;
use crate::config::AltTextTable;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("manifest must be a JSON object keyed by category")]
    NotAnObject,
}

/// One processed photo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    /// Broadly compatible encoding (JPEG).
    pub src: String,
    /// Size-optimized alternative encoding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webp: Option<String>,
    pub alt: String,
}

/// Category → ordered image records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Manifest {
    categories: BTreeMap<Category, Vec<ImageRecord>>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the records for a category. Empty sequences are not stored.
    pub fn insert(&mut self, category: Category, records: Vec<ImageRecord>) {
        if records.is_empty() {
            self.categories.remove(&category);
        } else {
            self.categories.insert(category, records);
        }
    }

    /// Records for a category, or an empty slice when absent.
    pub fn images(&self, category: Category) -> &[ImageRecord] {
        self.categories
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn contains(&self, category: Category) -> bool {
        self.categories.contains_key(&category)
    }

    /// Present categories, in manifest order.
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.categories.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &[ImageRecord])> {
        self.categories.iter().map(|(c, r)| (*c, r.as_slice()))
    }

    /// Number of categories present.
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn total_images(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    /// Serialize to the on-disk JSON shape.
    pub fn to_json(&self) -> Result<String, ManifestError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the manifest, replacing any previous file at `path`.
    pub fn write(&self, path: &Path) -> Result<(), ManifestError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Read and leniently parse a manifest file.
    pub fn read(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Leniently parse manifest JSON.
    ///
    /// Fails only when the text is not JSON or the top level is not an
    /// object. Everything below that is salvaged entry by entry.
    pub fn parse(json: &str) -> Result<Self, ManifestError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let serde_json::Value::Object(map) = value else {
            return Err(ManifestError::NotAnObject);
        };

        let mut manifest = Manifest::new();
        for (key, value) in map {
            let category = match key.parse::<Category>() {
                Ok(c) => c,
                Err(_) => {
                    tracing::warn!(key = %key, "ignoring unknown manifest category");
                    continue;
                }
            };
            let serde_json::Value::Array(entries) = value else {
                tracing::warn!(%category, "ignoring manifest category whose value is not an array");
                continue;
            };
            let records = entries
                .into_iter()
                .enumerate()
                .filter_map(|(position, entry)| parse_entry(category, position, entry))
                .collect();
            manifest.insert(category, records);
        }
        Ok(manifest)
    }
}

/// Entry shape as found in the wild: every field optional.
#[derive(Deserialize)]
struct RawEntry {
    src: Option<String>,
    webp: Option<String>,
    alt: Option<String>,
}

fn parse_entry(
    category: Category,
    position: usize,
    entry: serde_json::Value,
) -> Option<ImageRecord> {
    let raw: RawEntry = match serde_json::from_value(entry) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!(%category, position, error = %e, "dropping malformed manifest entry");
            return None;
        }
    };
    let Some(src) = raw.src.filter(|s| !s.is_empty()) else {
        tracing::warn!(%category, position, "dropping manifest entry without src");
        return None;
    };
    Some(ImageRecord {
        src,
        webp: raw.webp,
        alt: raw.alt.unwrap_or_else(|| generic_alt(category)),
    })
}

/// Generic description used when no curated text exists: `"Wedding photo"`.
pub fn generic_alt(category: Category) -> String {
    format!("{} photo", category.label())
}

/// Alt text for the record at `position` (0-based) within `category`.
pub fn alt_text(table: &AltTextTable, category: Category, position: usize) -> String {
    table
        .get(&category)
        .and_then(|texts| texts.get(position))
        .cloned()
        .unwrap_or_else(|| generic_alt(category))
}
