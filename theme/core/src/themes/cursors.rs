//! Modal-editing cursor styles
//!
//! Two consumers want the same information keyed differently: a state-name
//! table (`normal`, `insert`, ...) and one keyed by evil's per-state cursor
//! variables (`evil-normal-state-cursor`, ...).

use super::{resolve, CursorShape, CursorStyle, CursorTheme, ResolveOptions, Slot, ThemeError};
use crate::palette::ExtendedPalette;

type CursorEntry = (&'static str, Slot, i32, CursorShape);

#[rustfmt::skip]
static STATE_TABLE: &[CursorEntry] = &[
    ("normal",       Slot::Cursor,          0, CursorShape::Box),
    ("insert",       Slot::Green,           0, CursorShape::Bar(2)),
    ("visual",       Slot::White,           0, CursorShape::HBar(2)),
    ("replace",      Slot::Red,             0, CursorShape::HBar(2)),
    ("motion",       Slot::PrimaryAccent,   0, CursorShape::Box),
    ("emacs",        Slot::Blue,            0, CursorShape::Box),
    ("hybrid",       Slot::Blue,            0, CursorShape::Bar(2)),
    ("evilified",    Slot::Green,           0, CursorShape::Box),
    ("lisp",         Slot::Magenta,         0, CursorShape::Box),
    ("iedit",        Slot::Red,             0, CursorShape::Box),
    ("iedit-insert", Slot::Red,             0, CursorShape::Bar(2)),
];

#[rustfmt::skip]
static EVIL_TABLE: &[CursorEntry] = &[
    ("evil-normal-state-cursor",       Slot::Cursor,          0, CursorShape::Box),
    ("evil-insert-state-cursor",       Slot::Green,           0, CursorShape::Bar(2)),
    ("evil-visual-state-cursor",       Slot::White,           0, CursorShape::HBar(2)),
    ("evil-replace-state-cursor",      Slot::Red,             0, CursorShape::HBar(2)),
    ("evil-operator-state-cursor",     Slot::SecondaryAccent, 0, CursorShape::HBar(2)),
    ("evil-motion-state-cursor",       Slot::PrimaryAccent,   0, CursorShape::Box),
    ("evil-emacs-state-cursor",        Slot::Blue,            0, CursorShape::Box),
    ("evil-evilified-state-cursor",    Slot::Green,           0, CursorShape::Box),
    ("evil-lisp-state-cursor",         Slot::Magenta,         0, CursorShape::Box),
    ("evil-iedit-state-cursor",        Slot::Red,             0, CursorShape::Box),
    ("evil-iedit-insert-state-cursor", Slot::Red,             0, CursorShape::Bar(2)),
];

fn resolve_table(
    table: &[CursorEntry],
    palette: &ExtendedPalette,
    opts: &ResolveOptions,
) -> Result<CursorTheme, ThemeError> {
    table
        .iter()
        .map(|&(state, slot, shade, shape)| {
            resolve(palette, slot, shade, opts)
                .map(|color| (state.to_string(), CursorStyle { color, shape }))
        })
        .collect()
}

/// Resolve cursor styles keyed by state name
///
/// # Errors
///
/// Returns [`ThemeError::MissingColor`] if the palette lacks a role the
/// table uses.
pub fn state_cursors(
    palette: &ExtendedPalette,
    opts: &ResolveOptions,
) -> Result<CursorTheme, ThemeError> {
    resolve_table(STATE_TABLE, palette, opts)
}

/// Resolve cursor styles keyed by evil's cursor variable names
///
/// # Errors
///
/// Returns [`ThemeError::MissingColor`] if the palette lacks a role the
/// table uses.
pub fn evil_cursors(
    palette: &ExtendedPalette,
    opts: &ResolveOptions,
) -> Result<CursorTheme, ThemeError> {
    resolve_table(EVIL_TABLE, palette, opts)
}
