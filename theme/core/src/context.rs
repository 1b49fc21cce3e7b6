//! Theme context
//!
//! [`ThemeContext`] owns everything derived from one palette: the base and
//! extended palettes and one cache per resolved theme. Nothing is global, so
//! several contexts with different palettes can live in one process.
//!
//! # Lifecycle
//!
//! - Palettes are built on first access.
//! - [`ThemeContext::reload`] rebuilds both palettes and drops every resolved
//!   theme; themes are recomputed whole on their next access.
//! - A reload that yields no palette keeps whatever was cached before.
//!
//! Every configuration a context accepts has passed [`ThemeConfig::validate`].

use thiserror::Error;

use crate::color::ColorError;
use crate::config::{ConfigError, ThemeConfig};
use crate::palette::{
    builtin_palette, extend_palette, load, BasePalette, ColorRole, ExtendedPalette,
};
use crate::themes::{self, CursorTheme, SyntaxTheme, ThemeError};

/// Errors that can occur while building a context
#[derive(Debug, Error)]
pub enum ContextError {
    /// The configuration is invalid
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The palette holds a color that is not a hex color
    #[error(transparent)]
    Color(#[from] ColorError),
}

/// Where base palettes come from
#[derive(Debug, Clone)]
enum PaletteSource {
    /// The configured cache file (with optional built-in fallback)
    CacheFile,
    /// A palette handed in by the caller
    Fixed(BasePalette),
}

/// Cache owner for palettes and resolved themes
#[derive(Debug, Clone)]
pub struct ThemeContext {
    config: ThemeConfig,
    source: PaletteSource,
    base: Option<BasePalette>,
    extended: Option<ExtendedPalette>,
    syntax: Option<SyntaxTheme>,
    state_cursors: Option<CursorTheme>,
    evil_cursors: Option<CursorTheme>,
}

impl ThemeContext {
    /// Context reading the palette from `config.cache_file`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] if `config` is invalid.
    pub fn new(config: ThemeConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::unchecked(config, PaletteSource::CacheFile))
    }

    /// Context over an in-memory palette
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::Config`] if `config` is invalid, or
    /// [`ContextError::Color`] if a color of `base` is not a hex color.
    pub fn from_palette(config: ThemeConfig, base: BasePalette) -> Result<Self, ContextError> {
        config.validate()?;
        let extended = extend_palette(config.shades, &base)?;
        Ok(Self {
            base: Some(base.clone()),
            extended: Some(extended),
            ..Self::unchecked(config, PaletteSource::Fixed(base))
        })
    }

    fn unchecked(config: ThemeConfig, source: PaletteSource) -> Self {
        Self {
            config,
            source,
            base: None,
            extended: None,
            syntax: None,
            state_cursors: None,
            evil_cursors: None,
        }
    }

    /// Active configuration
    #[must_use]
    pub fn config(&self) -> &ThemeConfig {
        &self.config
    }

    /// Replace the configuration and drop every cache
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] if `config` is invalid; the
    /// current configuration and caches are kept in that case.
    pub fn set_config(&mut self, config: ThemeConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = config;
        self.base = None;
        self.extended = None;
        self.clear_themes();
        Ok(())
    }

    /// Whether a palette is currently cached
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.extended.is_some()
    }

    /// Rebuild both palettes and drop every resolved theme
    ///
    /// Returns `false` if no palette could be produced; previously cached
    /// palettes and themes are kept in that case.
    pub fn reload(&mut self) -> bool {
        let base = self.read_base();
        if base.is_empty() {
            tracing::warn!(
                path = %self.config.cache_file.display(),
                "No palette available, keeping previous colors"
            );
            return false;
        }

        match extend_palette(self.config.shades, &base) {
            Ok(extended) => {
                tracing::info!(
                    roles = base.len(),
                    num_shades = self.config.shades.num_shades,
                    "Palette reloaded"
                );
                self.base = Some(base);
                self.extended = Some(extended);
                self.clear_themes();
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "Palette has an unusable color, keeping previous colors");
                false
            }
        }
    }

    /// Base palette, loading it on first access
    pub fn base_palette(&mut self) -> Option<&BasePalette> {
        self.ensure_loaded();
        self.base.as_ref()
    }

    /// Extended palette, building it on first access
    pub fn extended_palette(&mut self) -> Option<&ExtendedPalette> {
        self.ensure_loaded();
        self.extended.as_ref()
    }

    /// Color for `role` at `shade`, honouring the reduced-colors setting
    pub fn get_color(&mut self, role: &ColorRole, shade: i32) -> Option<String> {
        let reduced = self.config.reduced_colors;
        self.extended_palette()?
            .get(role, shade, reduced)
            .map(str::to_string)
    }

    /// Resolved syntax faces
    pub fn syntax_theme(&mut self) -> Option<&SyntaxTheme> {
        if self.syntax.is_none() {
            self.syntax = self.resolve("syntax", themes::syntax_theme);
        } else {
            tracing::debug!(theme = "syntax", "Theme cache hit");
        }
        self.syntax.as_ref()
    }

    /// Resolved cursor styles keyed by state name
    pub fn state_cursors(&mut self) -> Option<&CursorTheme> {
        if self.state_cursors.is_none() {
            self.state_cursors = self.resolve("state-cursors", themes::state_cursors);
        } else {
            tracing::debug!(theme = "state-cursors", "Theme cache hit");
        }
        self.state_cursors.as_ref()
    }

    /// Resolved cursor styles keyed by evil's cursor variables
    pub fn evil_cursors(&mut self) -> Option<&CursorTheme> {
        if self.evil_cursors.is_none() {
            self.evil_cursors = self.resolve("evil-cursors", themes::evil_cursors);
        } else {
            tracing::debug!(theme = "evil-cursors", "Theme cache hit");
        }
        self.evil_cursors.as_ref()
    }

    fn resolve<T, F>(&mut self, name: &str, generate: F) -> Option<T>
    where
        F: Fn(&ExtendedPalette, &themes::ResolveOptions) -> Result<T, ThemeError>,
    {
        let opts = self.config.resolve_options();
        let palette = self.extended_palette()?;
        match generate(palette, &opts) {
            Ok(theme) => {
                tracing::debug!(theme = name, "Resolved theme");
                Some(theme)
            }
            Err(e) => {
                tracing::warn!(theme = name, error = %e, "Theme could not be resolved");
                None
            }
        }
    }

    fn ensure_loaded(&mut self) {
        if self.extended.is_none() {
            self.reload();
        }
    }

    fn clear_themes(&mut self) {
        self.syntax = None;
        self.state_cursors = None;
        self.evil_cursors = None;
    }

    fn read_base(&self) -> BasePalette {
        match &self.source {
            PaletteSource::Fixed(base) => base.clone(),
            PaletteSource::CacheFile => {
                let base = load(&self.config.cache_file, &self.config.color_names);
                if base.is_empty() && self.config.use_builtin_on_failure {
                    tracing::info!(
                        name = %self.config.builtin_palette,
                        "Using built-in palette"
                    );
                    builtin_palette(&self.config.builtin_palette, &self.config.color_names)
                        .unwrap_or_default()
                } else {
                    base
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::ShadeConfig;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const DOC: &str = r##"{
        "special": {"background": "#000000", "foreground": "#ffffff", "cursor": "#ffffff"},
        "colors": ["#000000", "#ff0000", "#00ff00", "#ffff00",
                   "#0000ff", "#ff00ff", "#00ffff", "#ffffff", "#808080"]
    }"##;

    fn cache_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_lazy_load_on_first_access() {
        let file = cache_file(DOC);
        let mut ctx = ThemeContext::new(ThemeConfig::with_cache_file(file.path())).unwrap();
        assert!(!ctx.is_loaded());

        assert_eq!(ctx.get_color(&ColorRole::Red, 0), Some("#ff0000".to_string()));
        assert!(ctx.is_loaded());
        assert_eq!(ctx.base_palette().map(BasePalette::len), Some(12));
    }

    #[test]
    fn test_missing_cache_file_means_no_palette() {
        let mut ctx =
            ThemeContext::new(ThemeConfig::with_cache_file("/nonexistent/colors.json")).unwrap();
        assert!(!ctx.reload());
        assert_eq!(ctx.get_color(&ColorRole::Red, 0), None);
        assert!(ctx.syntax_theme().is_none());
        assert!(ctx.state_cursors().is_none());
    }

    #[test]
    fn test_builtin_fallback() {
        let mut config = ThemeConfig::with_cache_file("/nonexistent/colors.json");
        config.use_builtin_on_failure = true;
        config.builtin_palette = "ashes".to_string();

        let mut ctx = ThemeContext::new(config).unwrap();
        assert!(ctx.reload());
        assert_eq!(
            ctx.get_color(&ColorRole::Background, 0),
            Some("#1c2023".to_string())
        );
    }

    #[test]
    fn test_reload_picks_up_new_colors() {
        let mut file = cache_file(DOC);
        let mut ctx = ThemeContext::new(ThemeConfig::with_cache_file(file.path())).unwrap();
        assert_eq!(
            ctx.syntax_theme().and_then(|t| t.get("error")).map(str::to_string),
            Some("#ff0000".to_string())
        );

        let updated = DOC.replace("#ff0000", "#aa0000");
        file = cache_file(&updated);
        ctx.set_config(ThemeConfig::with_cache_file(file.path()))
            .unwrap();
        assert_eq!(
            ctx.syntax_theme().and_then(|t| t.get("error")).map(str::to_string),
            Some("#aa0000".to_string())
        );
    }

    #[test]
    fn test_failed_reload_keeps_previous_palette() {
        let file = cache_file(DOC);
        let path = file.path().to_path_buf();
        let mut ctx = ThemeContext::new(ThemeConfig::with_cache_file(&path)).unwrap();
        assert!(ctx.reload());
        let before = ctx.syntax_theme().cloned();
        assert!(before.is_some());

        drop(file);
        assert!(!path.exists());
        assert!(!ctx.reload());
        assert_eq!(ctx.get_color(&ColorRole::Red, 0), Some("#ff0000".to_string()));
        assert_eq!(ctx.syntax_theme().cloned(), before);
    }

    #[test]
    fn test_reduced_mode_from_config() {
        let file = cache_file(DOC);
        let mut config = ThemeConfig::with_cache_file(file.path());
        config.reduced_colors = true;
        let mut ctx = ThemeContext::new(config).unwrap();

        assert_eq!(ctx.get_color(&ColorRole::Red, 5), Some("#ff0000".to_string()));
        let theme = ctx.syntax_theme().unwrap();
        assert_eq!(theme.get("highlight"), Some("#000000"));
    }

    #[test]
    fn test_independent_contexts() {
        let red: BasePalette = [
            (ColorRole::Red, "#ff0000".to_string()),
            (ColorRole::Blue, "#0000ff".to_string()),
        ]
        .into_iter()
        .collect();
        let teal: BasePalette = [
            (ColorRole::Red, "#008080".to_string()),
            (ColorRole::Blue, "#000080".to_string()),
        ]
        .into_iter()
        .collect();

        let mut a = ThemeContext::from_palette(ThemeConfig::default(), red).unwrap();
        let mut b = ThemeContext::from_palette(ThemeConfig::default(), teal).unwrap();
        assert_eq!(a.get_color(&ColorRole::Red, 0), Some("#ff0000".to_string()));
        assert_eq!(b.get_color(&ColorRole::Red, 0), Some("#008080".to_string()));
    }

    #[test]
    fn test_set_config_rebuilds_shades() {
        let base: BasePalette = [(ColorRole::Red, "#ff0000".to_string())]
            .into_iter()
            .collect();
        let mut ctx = ThemeContext::from_palette(ThemeConfig::default(), base).unwrap();
        assert_eq!(
            ctx.extended_palette().map(|p| p.shades()),
            Some(ShadeConfig::default())
        );

        ctx.set_config(ThemeConfig {
            shades: ShadeConfig::new(2, 50.0),
            ..ThemeConfig::default()
        })
        .unwrap();
        assert_eq!(ctx.get_color(&ColorRole::Red, 2), Some("#ffffff".to_string()));
        assert_eq!(ctx.get_color(&ColorRole::Red, 99), Some("#ffffff".to_string()));
    }

    #[test]
    fn test_from_palette_rejects_bad_colors() {
        let base: BasePalette = [(ColorRole::Red, "crimson".to_string())]
            .into_iter()
            .collect();
        assert!(matches!(
            ThemeContext::from_palette(ThemeConfig::default(), base),
            Err(ContextError::Color(_))
        ));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let bad_accent = ThemeConfig {
            primary_accent: ColorRole::Background,
            ..ThemeConfig::with_cache_file("/nonexistent/colors.json")
        };
        assert!(matches!(
            ThemeContext::new(bad_accent.clone()),
            Err(ConfigError::ValidationError(_))
        ));

        let base: BasePalette = [
            (ColorRole::Background, "#101010".to_string()),
            (ColorRole::Magenta, "#ff00ff".to_string()),
        ]
        .into_iter()
        .collect();
        assert!(matches!(
            ThemeContext::from_palette(bad_accent.clone(), base.clone()),
            Err(ContextError::Config(_))
        ));

        let mut ctx = ThemeContext::from_palette(ThemeConfig::default(), base).unwrap();
        assert!(ctx.set_config(bad_accent).is_err());
        assert_eq!(ctx.config().primary_accent, ColorRole::Magenta);
        assert!(ctx.is_loaded());

        let too_many_shades = ThemeConfig {
            shades: ShadeConfig::new(8, 20.0),
            ..ThemeConfig::default()
        };
        assert!(ctx.set_config(too_many_shades).is_err());
        assert_eq!(ctx.config().shades, ShadeConfig::default());
    }

    #[test]
    fn test_partial_palette_cannot_resolve_themes() {
        let base: BasePalette = [(ColorRole::Red, "#ff0000".to_string())]
            .into_iter()
            .collect();
        let mut ctx = ThemeContext::from_palette(ThemeConfig::default(), base).unwrap();
        assert!(ctx.syntax_theme().is_none());
        assert!(ctx.evil_cursors().is_none());
        // The palette itself is still usable
        assert!(ctx.get_color(&ColorRole::Red, -1).is_some());
    }
}
