//! Theme Core - Shaded palettes and editor color roles from a pywal cache
//!
//! This crate reads the color cache written by a wallpaper-based color
//! extraction tool (pywal's `colors.json`), expands every base color into a
//! symmetric ramp of darker and lighter shades, and resolves static tables of
//! semantic roles (syntax faces, modal cursor states) against that ramp.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        ThemeContext                           │
//! │  config ──► Palette Loader ──► Palette Extender ──► caches    │
//! │                 │                    │                         │
//! │          BasePalette          ExtendedPalette                  │
//! │                                      │                         │
//! │                              Color Accessor (get)              │
//! │                                      │                         │
//! │       ┌──────────────────────────────┼─────────────────────┐   │
//! │       │ syntax_theme   state_cursors │  evil_cursors        │   │
//! │       └──────────────────────────────┴─────────────────────┘   │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`ThemeContext`]: owns the configuration and every cached palette/theme
//! - [`BasePalette`]: one color per [`ColorRole`], straight from the cache file
//! - [`ExtendedPalette`]: `2N+1` shades per role, darkest to lightest
//! - [`SyntaxTheme`] / [`CursorTheme`]: resolved role tables for consumers
//! - [`Blender`] / [`ColorArg`]: blending over literals, roles and sequences
//!
//! # Quick Start
//!
//! ```no_run
//! use theme_core::{ColorRole, ThemeConfig, ThemeContext};
//!
//! let mut ctx = ThemeContext::new(ThemeConfig::default())?;
//! if let Some(red) = ctx.get_color(&ColorRole::Red, 2) {
//!     println!("lighter red: {red}");
//! }
//! if let Some(theme) = ctx.syntax_theme() {
//!     println!("keywords: {:?}", theme.get("keyword"));
//! }
//! # Ok::<(), theme_core::ConfigError>(())
//! ```
//!
//! # Module Overview
//!
//! - [`color`]: hex parsing, RGB decomposition, blend/darken/lighten
//! - [`palette`]: loading, shade extension and shade lookup
//! - [`themes`]: the static role tables and their resolution
//! - [`config`]: TOML/env configuration
//! - [`context`]: the cache owner with explicit reload

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod color;
pub mod config;
pub mod context;
pub mod palette;
pub mod themes;

// Re-exports for convenience
pub use color::{
    blend_hex, darken_hex, lighten_hex, rgb_components, Blended, Blender, ColorArg, ColorError,
    Rgb,
};
pub use config::{
    default_cache_file, default_config_path, load_config, load_config_from_path,
    load_config_with_env, ConfigError, ConfigOverrides, ConfigSource, ThemeConfig, ThemeToml,
};
pub use context::{ContextError, ThemeContext};
pub use palette::{
    builtin_palette, extend_color, extend_palette, load, load_from_str, try_load, BasePalette,
    ColorRole, ExtendedPalette, PaletteError, ShadeConfig, BUILTIN_PALETTES,
};
pub use themes::{
    evil_cursors, state_cursors, syntax_theme, CursorShape, CursorStyle, CursorTheme,
    ResolveOptions, SyntaxTheme, ThemeError,
};
