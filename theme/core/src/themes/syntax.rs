//! Editor syntax and UI faces

use super::{resolve, ResolveOptions, Slot, SyntaxTheme, ThemeError};
use crate::palette::ExtendedPalette;

#[rustfmt::skip]
static SYNTAX_TABLE: &[(&str, Slot, i32)] = &[
    // Backgrounds
    ("background",         Slot::Background,      0),
    ("background-2",       Slot::Background,     -2),
    ("background-3",       Slot::Background,     -3),
    ("background-4",       Slot::Background,     -4),
    ("background-active",  Slot::Background,     -3),
    ("highlight",          Slot::Background,      4),
    ("highlight-dim",      Slot::Background,      2),
    ("border",             Slot::Background,      0),

    // Foregrounds
    ("foreground",         Slot::Foreground,      0),
    ("foreground-dim",     Slot::Foreground,     -4),
    ("cursor",             Slot::Cursor,          0),
    ("accent",             Slot::PrimaryAccent,   0),

    // Syntax
    ("builtin",            Slot::PrimaryAccent,   0),
    ("comment",            Slot::Comment,         0),
    ("comment-background", Slot::Background,      0),
    ("constant",           Slot::PrimaryAccent,   4),
    ("doc",                Slot::Comment,         2),
    ("function",           Slot::PrimaryAccent,   0),
    ("keyword",            Slot::SecondaryAccent, 0),
    ("string",             Slot::Cyan,           -1),
    ("type",               Slot::Red,             2),
    ("variable",           Slot::SecondaryAccent, 4),
    ("meta",               Slot::Yellow,          4),
    ("complement",         Slot::SecondaryAccent, 0),

    // Code blocks
    ("code-block",               Slot::Foreground,     -3),
    ("code-block-background",    Slot::Background,     -3),
    ("code-block-line",          Slot::PrimaryAccent,   4),
    ("code-block-line-background", Slot::PrimaryAccent, -4),

    // Headings
    ("heading-1",            Slot::PrimaryAccent,   0),
    ("heading-1-background", Slot::Background,    -3),
    ("heading-2",            Slot::SecondaryAccent, 0),
    ("heading-2-background", Slot::Background,    -3),
    ("heading-3",            Slot::Cyan,            0),
    ("heading-3-background", Slot::Background,    -3),
    ("heading-4",            Slot::Yellow,          0),
    ("heading-4-background", Slot::Background,    -3),

    // Status
    ("error",              Slot::Red,             0),
    ("warning",            Slot::Red,             4),
    ("success",            Slot::Green,           4),
    ("match",              Slot::Green,           1),

    // UI chrome
    ("line-number",        Slot::Comment,         0),
    ("mode-line-active",   Slot::Background,     -3),
    ("mode-line-accent",   Slot::PrimaryAccent,   0),
    ("tooltip",            Slot::Comment,         0),
    ("tooltip-selection",  Slot::Background,      4),
    ("tooltip-background", Slot::Background,      0),

    // Plain colors with tinted backgrounds
    ("red",                Slot::Red,             0),
    ("red-background",     Slot::Red,            -3),
    ("red-background-strong", Slot::Red,         -4),
    ("green",              Slot::Green,           0),
    ("green-background",   Slot::Green,          -3),
    ("green-background-strong", Slot::Green,     -4),
    ("yellow",             Slot::Yellow,          0),
    ("yellow-background",  Slot::Yellow,         -3),
    ("blue",               Slot::Blue,            0),
    ("blue-background",    Slot::Blue,           -3),
    ("magenta",            Slot::Magenta,         0),
    ("cyan",               Slot::Cyan,            0),
    ("cyan-background",    Slot::Cyan,           -3),
    ("black",              Slot::Black,           0),
    ("white",              Slot::White,           0),
];

/// Resolve the syntax face table
///
/// # Errors
///
/// Returns [`ThemeError::MissingColor`] if the palette lacks any role the
/// table uses, including the configured accents.
pub fn syntax_theme(
    palette: &ExtendedPalette,
    opts: &ResolveOptions,
) -> Result<SyntaxTheme, ThemeError> {
    SYNTAX_TABLE
        .iter()
        .map(|&(name, slot, shade)| {
            resolve(palette, slot, shade, opts).map(|hex| (name.to_string(), hex))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::{builtin_palette, extend_palette, BasePalette, ColorRole, ShadeConfig};
    use std::collections::HashSet;

    fn material() -> ExtendedPalette {
        let base = builtin_palette("sexy-material", &ColorRole::CANONICAL).unwrap();
        extend_palette(ShadeConfig::default(), &base).unwrap()
    }

    #[test]
    fn test_table_names_are_unique() {
        let names: HashSet<&str> = SYNTAX_TABLE.iter().map(|(name, _, _)| *name).collect();
        assert_eq!(names.len(), SYNTAX_TABLE.len());
    }

    #[test]
    fn test_resolves_every_role() {
        let theme = syntax_theme(&material(), &ResolveOptions::default()).unwrap();
        assert_eq!(theme.len(), SYNTAX_TABLE.len());
        assert_eq!(theme.get("background"), Some("#1d262a"));
        assert_eq!(theme.get("error"), Some("#fc3841"));
        assert_eq!(theme.get("line-number"), Some("#a1b0b8"));
        // magenta is the default primary accent
        assert_eq!(theme.get("function"), Some("#fc226e"));
        // blue is the default secondary accent
        assert_eq!(theme.get("keyword"), Some("#37b6ff"));
    }

    #[test]
    fn test_shaded_roles_use_the_ramp() {
        let palette = material();
        let theme = syntax_theme(&palette, &ResolveOptions::default()).unwrap();
        assert_eq!(
            theme.get("background-2"),
            palette.color(&ColorRole::Background, -2)
        );
        assert_eq!(theme.get("string"), palette.color(&ColorRole::Cyan, -1));
        assert_eq!(theme.get("warning"), palette.color(&ColorRole::Red, 4));
        assert_ne!(theme.get("background-2"), theme.get("background"));
    }

    #[test]
    fn test_accents_are_configurable() {
        let opts = ResolveOptions {
            primary_accent: ColorRole::Green,
            secondary_accent: ColorRole::Yellow,
            reduced: false,
        };
        let theme = syntax_theme(&material(), &opts).unwrap();
        assert_eq!(theme.get("function"), Some("#5cf19e"));
        assert_eq!(theme.get("keyword"), Some("#fed032"));
    }

    #[test]
    fn test_reduced_mode_uses_base_colors() {
        let opts = ResolveOptions {
            reduced: true,
            ..ResolveOptions::default()
        };
        let theme = syntax_theme(&material(), &opts).unwrap();
        assert_eq!(theme.get("background-4"), Some("#1d262a"));
        assert_eq!(theme.get("highlight"), Some("#1d262a"));
        assert_eq!(theme.get("type"), Some("#fc3841"));
    }

    #[test]
    fn test_missing_role_fails_whole_table() {
        let base: BasePalette = [(ColorRole::Background, "#000000".to_string())]
            .into_iter()
            .collect();
        let palette = extend_palette(ShadeConfig::default(), &base).unwrap();
        let err = syntax_theme(&palette, &ResolveOptions::default()).unwrap_err();
        assert!(matches!(err, ThemeError::MissingColor { .. }));
    }
}
