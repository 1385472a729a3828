//! Pipeline configuration.
//!
//! Everything the ingestion pipeline needs is carried by one explicit
//! [`PipelineConfig`] value passed into [`ingest`](crate::ingest::ingest).
//! There is no module-level state: stock defaults live in `Default`, a
//! `gallery.toml` file may override any subset of them, and command-line
//! flags override the file.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! input_dir = "images-to-optimize"   # One sub-folder per category
//! output_dir = "public/gallery"      # Encoded images + manifest
//! max_width = 2000                   # Never upscale, never exceed this width
//! quality = 85                       # JPEG and WebP quality (1-100)
//! categories = ["firstbirthday", "musicconcert", "familysession", "housewarming",
//!               "maternity", "newborn", "portraits", "wedding"]
//! public_prefix = "/gallery"         # URL prefix written into the manifest
//! manifest_name = "manifest.json"
//! on_error = "skip-and-log"          # or "abort"
//!
//! [processing]
//! max_processes = 4                  # Max parallel encoders (omit for auto = CPU cores)
//!
//! [alt_text]
//! wedding = ["Bride and groom sharing first look before ceremony"]
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse: override just the values you want. Unknown keys
//! are rejected to catch typos early.

use crate::category::Category;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default config filename looked up in the working directory.
pub const CONFIG_FILENAME: &str = "gallery.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// What the pipeline does when a single source file cannot be processed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorMode {
    /// Log the failure, leave the file out of the manifest, keep going.
    #[default]
    SkipAndLog,
    /// Stop the run at the first failing file.
    Abort,
}

/// Curated alt text per category, indexed by position in the manifest.
///
/// Content data, not logic: positions past the end of a list fall back to
/// the generic `"{Label} photo"` text.
pub type AltTextTable = BTreeMap<Category, Vec<String>>;

/// Configuration for one ingestion run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Root containing one sub-folder per category.
    pub input_dir: PathBuf,
    /// Root the encoded images and the manifest are written under.
    pub output_dir: PathBuf,
    /// Upper bound on output width in pixels.
    pub max_width: u32,
    /// Encoding quality shared by both output formats.
    pub quality: u32,
    /// Categories to ingest. Order only affects processing order.
    pub categories: Vec<Category>,
    /// URL prefix for manifest paths (`{prefix}/{category}/{file}`).
    pub public_prefix: String,
    /// Manifest filename inside `output_dir`.
    pub manifest_name: String,
    pub on_error: ErrorMode,
    pub processing: ProcessingConfig,
    pub alt_text: AltTextTable,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("images-to-optimize"),
            output_dir: PathBuf::from("public/gallery"),
            max_width: 2000,
            quality: 85,
            categories: Category::ALL.to_vec(),
            public_prefix: "/gallery".to_string(),
            manifest_name: "manifest.json".to_string(),
            on_error: ErrorMode::default(),
            processing: ProcessingConfig::default(),
            alt_text: AltTextTable::new(),
        }
    }
}

impl PipelineConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=100).contains(&self.quality) {
            return Err(ConfigError::Validation("quality must be 1-100".into()));
        }
        if self.max_width == 0 {
            return Err(ConfigError::Validation(
                "max_width must be greater than zero".into(),
            ));
        }
        if self.categories.is_empty() {
            return Err(ConfigError::Validation(
                "categories must not be empty".into(),
            ));
        }
        let mut seen = HashSet::new();
        for category in &self.categories {
            if !seen.insert(category) {
                return Err(ConfigError::Validation(format!(
                    "category listed twice: {category}"
                )));
            }
        }
        if self.manifest_name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "manifest_name must not be empty".into(),
            ));
        }
        if self.processing.max_processes == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_processes must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Full path of the manifest file.
    pub fn manifest_path(&self) -> PathBuf {
        self.output_dir.join(&self.manifest_name)
    }

    /// Public URL for a generated file, e.g. `/gallery/wedding/wedding-1.jpg`.
    pub fn public_url(&self, category: Category, filename: &str) -> String {
        format!(
            "{}/{}/{}",
            self.public_prefix.trim_end_matches('/'),
            category,
            filename
        )
    }

    /// Apply command-line overrides on top of this config and re-validate.
    pub fn with_overrides(mut self, overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        if let Some(ref input) = overrides.input_dir {
            self.input_dir = input.clone();
        }
        if let Some(ref output) = overrides.output_dir {
            self.output_dir = output.clone();
        }
        if let Some(max_width) = overrides.max_width {
            self.max_width = max_width;
        }
        if let Some(quality) = overrides.quality {
            self.quality = quality;
        }
        if !overrides.categories.is_empty() {
            self.categories = overrides.categories.clone();
        }
        self.validate()?;
        Ok(self)
    }
}

/// Values supplied on the command line. `None`/empty means "keep the file value".
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub input_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub max_width: Option<u32>,
    pub quality: Option<u32>,
    pub categories: Vec<Category>,
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel encoding workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_processes.map(|n| n.min(cores)).unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// The base layer user overrides are merged on top of.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(PipelineConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Merge an optional overlay onto the stock defaults, deserialize and validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<PipelineConfig, ConfigError> {
    let base = stock_defaults_value();
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: PipelineConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from a TOML file.
///
/// A missing file yields the stock defaults; a present but invalid file is
/// an error.
pub fn load_config(path: &Path) -> Result<PipelineConfig, ConfigError> {
    if !path.exists() {
        return resolve_config(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    resolve_config(Some(value))
}

/// Returns a fully-commented stock `gallery.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Gallery Image Pipeline Configuration
# ====================================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# Source root: one sub-folder per category, e.g. images-to-optimize/wedding/
input_dir = "images-to-optimize"

# Where encoded images and the manifest are written.
output_dir = "public/gallery"

# Output width cap in pixels. Smaller images are never upscaled.
max_width = 2000

# Encoding quality for both WebP and JPEG outputs (1 = worst, 100 = best).
quality = 85

# Categories to ingest.
categories = [
    "firstbirthday",
    "musicconcert",
    "familysession",
    "housewarming",
    "maternity",
    "newborn",
    "portraits",
    "wedding",
]

# URL prefix written into manifest entries: {public_prefix}/{category}/{file}
public_prefix = "/gallery"

# Manifest filename inside output_dir.
manifest_name = "manifest.json"

# What to do when a source image cannot be processed:
#   "skip-and-log" - log it, leave it out of the manifest, continue
#   "abort"        - stop the run
on_error = "skip-and-log"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel encoding workers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4

# ---------------------------------------------------------------------------
# Alt text
# ---------------------------------------------------------------------------
# Curated alt text per category, in manifest order. Images past the end of a
# list get a generic "{Category} photo" description.
[alt_text]
# wedding = [
#     "Bride and groom sharing first look before ceremony",
#     "Romantic couple portrait during golden hour",
# ]
"##
}
