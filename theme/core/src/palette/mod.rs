//! Palettes
//!
//! - [`loader`]: reads the pywal cache into a [`BasePalette`]
//! - [`extend`]: expands every base color into a shade ramp ([`ExtendedPalette`])
//! - [`access`]: shade lookup with clamping
//! - [`builtin`]: bundled fallback palettes

pub mod access;
pub mod builtin;
pub mod extend;
pub mod loader;

use std::collections::BTreeMap;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use builtin::{builtin_palette, BUILTIN_PALETTES};
pub use extend::{extend_color, extend_palette, ExtendedPalette, ShadeConfig};
pub use loader::{load, load_from_str, try_load, PaletteError};

// ============================================================================
// Color Roles
// ============================================================================

/// Symbolic name of a palette color
///
/// The first eight variants are the canonical terminal colors, named in the
/// order pywal writes `color0`..`color7`. Any other key of the cache's
/// `special` group lands in [`ColorRole::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum ColorRole {
    /// `color0`
    Black,
    /// `color1`
    Red,
    /// `color2`
    Green,
    /// `color3`
    Yellow,
    /// `color4`
    Blue,
    /// `color5`
    Magenta,
    /// `color6`
    Cyan,
    /// `color7`
    White,
    /// Terminal background
    Background,
    /// Terminal foreground
    Foreground,
    /// Cursor color
    Cursor,
    /// Dimmed text, taken from `color8`
    Comment,
    /// Any other named color
    Custom(String),
}

impl ColorRole {
    /// Canonical roles in positional order
    pub const CANONICAL: [ColorRole; 8] = [
        ColorRole::Black,
        ColorRole::Red,
        ColorRole::Green,
        ColorRole::Yellow,
        ColorRole::Blue,
        ColorRole::Magenta,
        ColorRole::Cyan,
        ColorRole::White,
    ];

    /// Lowercase name of this role
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Black => "black",
            Self::Red => "red",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Blue => "blue",
            Self::Magenta => "magenta",
            Self::Cyan => "cyan",
            Self::White => "white",
            Self::Background => "background",
            Self::Foreground => "foreground",
            Self::Cursor => "cursor",
            Self::Comment => "comment",
            Self::Custom(name) => name,
        }
    }

    /// Whether this is one of the eight canonical roles
    #[must_use]
    pub fn is_canonical(&self) -> bool {
        Self::CANONICAL.contains(self)
    }
}

impl fmt::Display for ColorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorRole {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Ok(match name.to_ascii_lowercase().as_str() {
            "black" => Self::Black,
            "red" => Self::Red,
            "green" => Self::Green,
            "yellow" => Self::Yellow,
            "blue" => Self::Blue,
            "magenta" => Self::Magenta,
            "cyan" => Self::Cyan,
            "white" => Self::White,
            "background" => Self::Background,
            "foreground" => Self::Foreground,
            "cursor" => Self::Cursor,
            "comment" => Self::Comment,
            _ => Self::Custom(name.to_string()),
        })
    }
}

impl From<String> for ColorRole {
    fn from(name: String) -> Self {
        match name.parse() {
            Ok(role) => role,
            Err(never) => match never {},
        }
    }
}

impl From<&str> for ColorRole {
    fn from(name: &str) -> Self {
        Self::from(name.to_string())
    }
}

impl From<ColorRole> for String {
    fn from(role: ColorRole) -> Self {
        match role {
            ColorRole::Custom(name) => name,
            other => other.as_str().to_string(),
        }
    }
}

// ============================================================================
// Base Palette
// ============================================================================

/// One hex color per role, as read from the cache
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BasePalette {
    colors: BTreeMap<ColorRole, String>,
}

impl BasePalette {
    /// Create an empty palette
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether no colors are present ("no palette available")
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Number of roles
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Color for `role`
    #[must_use]
    pub fn get(&self, role: &ColorRole) -> Option<&str> {
        self.colors.get(role).map(String::as_str)
    }

    /// Set the color for `role`, returning the previous one
    pub fn insert(&mut self, role: ColorRole, hex: impl Into<String>) -> Option<String> {
        self.colors.insert(role, hex.into())
    }

    /// Iterate roles and colors in role order
    pub fn iter(&self) -> impl Iterator<Item = (&ColorRole, &str)> {
        self.colors.iter().map(|(role, hex)| (role, hex.as_str()))
    }
}

impl FromIterator<(ColorRole, String)> for BasePalette {
    fn from_iter<I: IntoIterator<Item = (ColorRole, String)>>(iter: I) -> Self {
        Self {
            colors: iter.into_iter().collect(),
        }
    }
}

impl Extend<(ColorRole, String)> for BasePalette {
    fn extend<I: IntoIterator<Item = (ColorRole, String)>>(&mut self, iter: I) {
        self.colors.extend(iter);
    }
}
