//! Bundled palettes
//!
//! Used when no cache file is available and the fallback is enabled. The
//! documents are stored in pywal's own format and go through the normal loader.

use super::loader::load_from_str;
use super::{BasePalette, ColorRole};

/// Names and documents of the bundled palettes
pub const BUILTIN_PALETTES: &[(&str, &str)] = &[
    (
        "sexy-material",
        include_str!("../../assets/palettes/sexy-material.json"),
    ),
    ("ashes", include_str!("../../assets/palettes/ashes.json")),
];

/// Load a bundled palette by name
#[must_use]
pub fn builtin_palette(name: &str, color_names: &[ColorRole]) -> Option<BasePalette> {
    let (_, document) = BUILTIN_PALETTES.iter().find(|(n, _)| *n == name)?;
    match load_from_str(document, color_names) {
        Ok(palette) => Some(palette),
        Err(e) => {
            tracing::warn!(name, error = %e, "Bundled palette is unusable");
            None
        }
    }
}
