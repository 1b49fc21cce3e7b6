//! Theme Generators
//!
//! Static tables mapping semantic roles to a palette slot and a shade, resolved
//! against an [`ExtendedPalette`] on every call:
//!
//! - [`syntax_theme`]: editor faces (backgrounds, syntax, headings, chrome)
//! - [`state_cursors`]: cursor color and shape per modal-editing state
//! - [`evil_cursors`]: the same states keyed by evil's cursor variable names
//!
//! A theme is always computed whole; a missing color fails the entire table.

mod cursors;
mod syntax;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::palette::{ColorRole, ExtendedPalette};

pub use cursors::{evil_cursors, state_cursors};
pub use syntax::syntax_theme;

/// Errors that can occur while resolving a theme table
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThemeError {
    /// The palette has no color for a role a table needs
    #[error("Palette has no color for {role} at shade {shade}")]
    MissingColor {
        /// Role that was looked up
        role: ColorRole,
        /// Shade that was requested
        shade: i32,
    },
}

/// Inputs shared by every generator
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Main accent (functions, headings, active chrome)
    pub primary_accent: ColorRole,
    /// Second accent (keywords, variables)
    pub secondary_accent: ColorRole,
    /// Ignore shades and always use base colors
    pub reduced: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            primary_accent: ColorRole::Magenta,
            secondary_accent: ColorRole::Blue,
            reduced: false,
        }
    }
}

/// Where a table entry takes its color from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Slot {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    Background,
    Foreground,
    Cursor,
    Comment,
    PrimaryAccent,
    SecondaryAccent,
}

impl Slot {
    fn role(self, opts: &ResolveOptions) -> ColorRole {
        match self {
            Self::Black => ColorRole::Black,
            Self::Red => ColorRole::Red,
            Self::Green => ColorRole::Green,
            Self::Yellow => ColorRole::Yellow,
            Self::Blue => ColorRole::Blue,
            Self::Magenta => ColorRole::Magenta,
            Self::Cyan => ColorRole::Cyan,
            Self::White => ColorRole::White,
            Self::Background => ColorRole::Background,
            Self::Foreground => ColorRole::Foreground,
            Self::Cursor => ColorRole::Cursor,
            Self::Comment => ColorRole::Comment,
            Self::PrimaryAccent => opts.primary_accent.clone(),
            Self::SecondaryAccent => opts.secondary_accent.clone(),
        }
    }
}

pub(crate) fn resolve(
    palette: &ExtendedPalette,
    slot: Slot,
    shade: i32,
    opts: &ResolveOptions,
) -> Result<String, ThemeError> {
    let role = slot.role(opts);
    palette
        .get(&role, shade, opts.reduced)
        .map(str::to_string)
        .ok_or(ThemeError::MissingColor { role, shade })
}

// ============================================================================
// Resolved Themes
// ============================================================================

/// Semantic role -> hex color
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SyntaxTheme {
    colors: BTreeMap<String, String>,
}

impl SyntaxTheme {
    /// Color for a semantic role such as `keyword` or `line-number`
    #[must_use]
    pub fn get(&self, role: &str) -> Option<&str> {
        self.colors.get(role).map(String::as_str)
    }

    /// Number of roles
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Whether the theme has no roles
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Iterate roles and colors in role order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.colors.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for SyntaxTheme {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            colors: iter.into_iter().collect(),
        }
    }
}

/// Cursor shape, handed to the consumer unchanged
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CursorShape {
    /// Filled cell
    Box,
    /// Vertical bar of the given width
    Bar(u8),
    /// Horizontal bar of the given height
    HBar(u8),
}

/// Color and shape of the cursor in one state
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CursorStyle {
    /// Hex color
    pub color: String,
    /// Shape tag
    pub shape: CursorShape,
}

/// Editing state -> cursor style
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CursorTheme {
    cursors: BTreeMap<String, CursorStyle>,
}

impl CursorTheme {
    /// Style for a state
    #[must_use]
    pub fn get(&self, state: &str) -> Option<&CursorStyle> {
        self.cursors.get(state)
    }

    /// Number of states
    #[must_use]
    pub fn len(&self) -> usize {
        self.cursors.len()
    }

    /// Whether the theme has no states
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cursors.is_empty()
    }

    /// Iterate states and styles in state order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CursorStyle)> {
        self.cursors.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, CursorStyle)> for CursorTheme {
    fn from_iter<I: IntoIterator<Item = (String, CursorStyle)>>(iter: I) -> Self {
        Self {
            cursors: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_shape_serialization() {
        assert_eq!(serde_json::to_string(&CursorShape::Box).unwrap(), "\"box\"");
        assert_eq!(
            serde_json::to_string(&CursorShape::Bar(2)).unwrap(),
            "{\"bar\":2}"
        );
        assert_eq!(
            serde_json::to_string(&CursorShape::HBar(3)).unwrap(),
            "{\"hbar\":3}"
        );
    }

    #[test]
    fn test_slot_accents_follow_options() {
        let opts = ResolveOptions {
            primary_accent: ColorRole::Green,
            secondary_accent: ColorRole::Yellow,
            reduced: false,
        };
        assert_eq!(Slot::PrimaryAccent.role(&opts), ColorRole::Green);
        assert_eq!(Slot::SecondaryAccent.role(&opts), ColorRole::Yellow);
        assert_eq!(Slot::Comment.role(&opts), ColorRole::Comment);
    }
}
