//! Palette Loader
//!
//! Reads pywal's `colors.json`:
//!
//! ```json
//! {
//!   "special": { "background": "#1d262a", "foreground": "#eaeaea", "cursor": "#eaeaea" },
//!   "colors": { "color0": "#435b67", "color1": "#fc3841", "...": "...", "color15": "#ffffff" }
//! }
//! ```
//!
//! The first eight `colors` are named positionally by `color_names`; `color8`
//! becomes `comment` unless `special` already has one. `special` entries win over
//! positional ones. `colors` may also be a plain array.
//!
//! [`load`] never fails: any error is logged and an empty palette returned.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

use super::{BasePalette, ColorRole};
use crate::color::parse_hex;

/// Index of the color used for `comment`
const COMMENT_INDEX: usize = 8;

/// Errors that can occur while reading a palette document
#[derive(Debug, Error)]
pub enum PaletteError {
    /// Failed to read the palette file
    #[error("Failed to read palette file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse JSON
    #[error("Failed to parse palette document: {0}")]
    ParseError(#[from] serde_json::Error),

    /// A required top-level group is missing
    #[error("Palette document has no `{0}` group")]
    MissingGroup(&'static str),

    /// Not enough positional colors to name
    #[error("Palette document has {found} colors, expected at least {expected}")]
    TooFewColors {
        /// Colors present
        found: usize,
        /// Colors required by `color_names`
        expected: usize,
    },

    /// A positional color is not a usable hex string
    #[error("Palette entry {key} is not a hex color")]
    InvalidEntry {
        /// Key (or index) of the entry
        key: String,
    },
}

#[derive(Debug, Deserialize)]
struct WalDocument {
    #[serde(default)]
    special: Map<String, Value>,
    colors: Option<Value>,
}

/// Load a palette, returning an empty one on any failure
///
/// Callers treat an empty result as "no palette available".
#[must_use]
pub fn load(path: &Path, color_names: &[ColorRole]) -> BasePalette {
    match try_load(path, color_names) {
        Ok(palette) => palette,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Palette unavailable");
            BasePalette::new()
        }
    }
}

/// Load a palette from a file
///
/// # Errors
///
/// Returns a [`PaletteError`] if the file cannot be read or is not a usable
/// palette document.
pub fn try_load(path: &Path, color_names: &[ColorRole]) -> Result<BasePalette, PaletteError> {
    let content = std::fs::read_to_string(path).map_err(|e| PaletteError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    let palette = load_from_str(&content, color_names)?;

    tracing::info!(
        path = %path.display(),
        colors = palette.len(),
        "Loaded palette"
    );
    Ok(palette)
}

/// Build a palette from an in-memory document
///
/// # Errors
///
/// Returns a [`PaletteError`] if the document is malformed, has no `colors`
/// group, or has fewer colors than `color_names`.
pub fn load_from_str(content: &str, color_names: &[ColorRole]) -> Result<BasePalette, PaletteError> {
    let document: WalDocument = serde_json::from_str(content)?;
    let colors = document
        .colors
        .ok_or(PaletteError::MissingGroup("colors"))?;
    let values = positional_colors(colors, color_names.len().max(COMMENT_INDEX + 1))?;

    if values.len() < color_names.len() {
        return Err(PaletteError::TooFewColors {
            found: values.len(),
            expected: color_names.len(),
        });
    }

    let mut special = special_colors(document.special);
    if let Some(comment) = values.get(COMMENT_INDEX) {
        special
            .entry(ColorRole::Comment)
            .or_insert_with(|| comment.clone());
    }

    let mut palette: BasePalette = color_names.iter().cloned().zip(values).collect();
    palette.extend(special);
    Ok(palette)
}

/// Flatten the first `needed` entries of the `colors` group into validated hex
/// strings; later entries are never read
fn positional_colors(colors: Value, needed: usize) -> Result<Vec<String>, PaletteError> {
    let entries: Vec<(String, Value)> = match colors {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, v)| (i.to_string(), v))
            .collect(),
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|(a, _), (b, _)| compare_color_keys(a, b));
            entries
        }
        _ => return Err(PaletteError::MissingGroup("colors")),
    };

    entries
        .into_iter()
        .take(needed)
        .map(|(key, value)| match value {
            Value::String(hex) if parse_hex(&hex).is_ok() => Ok(hex),
            _ => Err(PaletteError::InvalidEntry { key }),
        })
        .collect()
}

/// Order `color2` before `color10`; keys without a numeric suffix go last
fn compare_color_keys(a: &str, b: &str) -> Ordering {
    match (numeric_suffix(a), numeric_suffix(b)) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

fn numeric_suffix(key: &str) -> Option<usize> {
    let digits = key.trim_start_matches(|c: char| !c.is_ascii_digit());
    digits.parse().ok()
}

fn special_colors(special: Map<String, Value>) -> BTreeMap<ColorRole, String> {
    special
        .into_iter()
        .filter_map(|(key, value)| match value {
            Value::String(hex) if parse_hex(&hex).is_ok() => Some((ColorRole::from(key), hex)),
            other => {
                tracing::debug!(key = %key, value = %other, "Skipping non-color special entry");
                None
            }
        })
        .collect()
}
