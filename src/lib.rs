//! # Adorn Gallery
//!
//! Build-time image optimizer and runtime manifest consumer for a
//! photography portfolio site. Photos are dropped into one folder per
//! shoot type; the optimizer resizes and re-encodes them and writes a
//! single JSON manifest that the site reads to render its galleries.
//!
//! # Architecture: One Artifact, Two Sides
//!
//! ```text
//! images-to-optimize/<category>/*   ──ingest──▶  public/gallery/<category>/<category>-N.{webp,jpg}
//!                                                public/gallery/manifest.json
//!                                                        │
//!                                                        ▼
//!                                          Gallery (lookups, navigation, viewer)
//! ```
//!
//! The manifest is the only thing the two sides share. Ingestion writes it
//! strictly and deterministically; the consumer reads it leniently and never
//! fails a page over a bad entry.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`category`] | The fixed set of shoot types and their presentation data |
//! | [`config`] | `gallery.toml` loading, merging over defaults, validation |
//! | [`ingest`] | Listing, ordinal planning, parallel encoding, manifest emission |
//! | [`imaging`] | Pure-Rust resize + JPEG/WebP encoding behind a backend trait |
//! | [`manifest`] | Manifest types, byte-stable writer, tolerant reader |
//! | [`gallery`] | Manifest sources (file, HTTP), category lookups, wraparound navigation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Listing Order Is Display Order
//!
//! Output names carry a 1-based ordinal taken from the filtered directory
//! listing, sorted by file name, and the manifest lists records in that same
//! order. Visitors step through photos in the order their names sort.
//! Ordinals are fixed before parallel work starts, so worker scheduling can
//! never reorder a gallery.
//!
//! ## Two Encodings Per Photo
//!
//! Every photo is written as lossy WebP (small, what modern browsers pick)
//! and JPEG (the universal fallback), both capped at the same width. Images
//! are never upscaled.
//!
//! ## Bad Files Are Skipped, Not Fatal
//!
//! The default error mode is `skip-and-log`: an unreadable or corrupt source
//! is reported and left out, and everything else still ships. `abort` is
//! available for CI runs that should fail loudly.

pub mod category;
pub mod config;
pub mod gallery;
pub mod imaging;
pub mod ingest;
pub mod manifest;
pub mod output;

#[cfg(test)]
pub(crate) mod test_helpers;
