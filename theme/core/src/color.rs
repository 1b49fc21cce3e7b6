//! Color math
//!
//! Hex parsing, RGB decomposition and linear blending between two colors.
//!
//! # Channel Scale
//!
//! Hex strings are decoded into 16-bit channels the way X11 color names are
//! (`#f` -> `0xffff`, `#ff` -> `0xffff`, `#fff` -> `0xffff`), then normalized by
//! the decomposition of `#ffffff` on the same scale. The result is a channel in
//! `[0.0, 1.0]` regardless of how many digits the input used.
//!
//! # Rounding
//!
//! Blended channels are written back as `#rrggbb` by multiplying by 255 and
//! truncating toward zero. A `1e-9` tolerance is added before truncation so that
//! `0.9999999999999999 * 255` still lands on `ff`.

use serde::Serialize;
use thiserror::Error;

use crate::palette::{ColorRole, ExtendedPalette};

/// Tolerance added before truncating a scaled channel
const TRUNCATION_EPSILON: f64 = 1e-9;

const BLACK: &str = "#000000";
const WHITE: &str = "#ffffff";

/// Errors produced while decoding a hex color
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// The color does not start with `#`
    #[error("Color {0:?} does not start with '#'")]
    MissingHash(String),

    /// Digit count is not 3, 6, 9 or 12
    #[error("Color {color:?} has {digits} hex digits, expected 3, 6, 9 or 12")]
    InvalidLength {
        /// The offending color
        color: String,
        /// Number of digits after the `#`
        digits: usize,
    },

    /// The color contains something other than hex digits
    #[error("Color {0:?} contains a non-hex digit")]
    InvalidDigit(String),
}

/// Decode a hex color into 16-bit channels
///
/// # Errors
///
/// Returns a [`ColorError`] if `hex` is not `#` followed by 1 to 4 hex digits
/// per channel.
pub fn parse_hex(hex: &str) -> Result<[u16; 3], ColorError> {
    let trimmed = hex.trim();
    let digits = trimmed
        .strip_prefix('#')
        .ok_or_else(|| ColorError::MissingHash(hex.to_string()))?;

    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ColorError::InvalidDigit(hex.to_string()));
    }

    let len = digits.len();
    if len == 0 || len % 3 != 0 || len > 12 {
        return Err(ColorError::InvalidLength {
            color: hex.to_string(),
            digits: len,
        });
    }

    let width = len / 3;
    let max = (1u32 << (4 * width)) - 1;
    let mut channels = [0u16; 3];
    for (i, channel) in channels.iter_mut().enumerate() {
        let chunk = &digits[i * width..(i + 1) * width];
        let value = u32::from_str_radix(chunk, 16)
            .map_err(|_| ColorError::InvalidDigit(hex.to_string()))?;
        *channel = u16::try_from(value * 0xffff / max).unwrap_or(u16::MAX);
    }
    Ok(channels)
}

/// Color with channels normalized to `[0.0, 1.0]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    /// Red component
    pub r: f64,
    /// Green component
    pub g: f64,
    /// Blue component
    pub b: f64,
}

impl Rgb {
    /// Create a color from normalized channels
    #[must_use]
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Linearly interpolate toward `other`
    ///
    /// Each channel becomes `alpha * self + (1 - alpha) * other`, so
    /// `alpha = 1.0` keeps `self` and `alpha = 0.0` yields `other`.
    #[must_use]
    pub fn mix(self, other: Rgb, alpha: f64) -> Rgb {
        let mix = |a: f64, b: f64| alpha * a + (1.0 - alpha) * b;
        Rgb {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
        }
    }

    /// Convert to a lowercase `#rrggbb` string
    ///
    /// # Examples
    ///
    /// ```
    /// use theme_core::color::Rgb;
    ///
    /// assert_eq!(Rgb::new(1.0, 0.5, 0.0).to_hex(), "#ff7f00");
    /// ```
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!(
            "#{:02x}{:02x}{:02x}",
            to_byte(self.r),
            to_byte(self.g),
            to_byte(self.b)
        )
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_byte(channel: f64) -> u8 {
    (channel * 255.0 + TRUNCATION_EPSILON).clamp(0.0, 255.0) as u8
}

/// Decompose a hex color into normalized RGB channels
///
/// Channels are divided by the decomposition of `#ffffff`, not by a fixed
/// constant.
///
/// # Errors
///
/// Returns a [`ColorError`] if `hex` cannot be decoded.
///
/// # Examples
///
/// ```
/// use theme_core::rgb_components;
///
/// let rgb = rgb_components("#ff0000").unwrap();
/// assert_eq!((rgb.r, rgb.g, rgb.b), (1.0, 0.0, 0.0));
/// ```
pub fn rgb_components(hex: &str) -> Result<Rgb, ColorError> {
    let [r, g, b] = parse_hex(hex)?;
    let [wr, wg, wb] = parse_hex(WHITE)?;
    Ok(Rgb {
        r: f64::from(r) / f64::from(wr),
        g: f64::from(g) / f64::from(wg),
        b: f64::from(b) / f64::from(wb),
    })
}

/// Blend two literal hex colors: `alpha * a + (1 - alpha) * b` per channel
///
/// # Errors
///
/// Returns a [`ColorError`] if either color cannot be decoded.
pub fn blend_hex(a: &str, b: &str, alpha: f64) -> Result<String, ColorError> {
    Ok(rgb_components(a)?.mix(rgb_components(b)?, alpha).to_hex())
}

/// Move a literal color toward black; `alpha = 0.0` leaves it unchanged
///
/// # Errors
///
/// Returns a [`ColorError`] if `color` cannot be decoded.
pub fn darken_hex(color: &str, alpha: f64) -> Result<String, ColorError> {
    blend_hex(color, BLACK, 1.0 - alpha)
}

/// Move a literal color toward white; `alpha = 0.0` leaves it unchanged
///
/// # Errors
///
/// Returns a [`ColorError`] if `color` cannot be decoded.
pub fn lighten_hex(color: &str, alpha: f64) -> Result<String, ColorError> {
    blend_hex(color, WHITE, 1.0 - alpha)
}

// ============================================================================
// Tagged Color Arguments
// ============================================================================

/// A blend operand
///
/// An empty [`ColorArg::Sequence`] stands for "no color"; blending it with
/// anything produces nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorArg {
    /// A hex color such as `#1d262a`
    Literal(String),
    /// A palette role, resolved at shade 0
    Role(ColorRole),
    /// Several operands blended element-wise
    Sequence(Vec<ColorArg>),
}

impl ColorArg {
    /// Create a literal operand
    pub fn literal(hex: impl Into<String>) -> Self {
        Self::Literal(hex.into())
    }

    /// Create a sequence operand
    pub fn sequence<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ColorArg>,
    {
        Self::Sequence(items.into_iter().map(Into::into).collect())
    }

    /// The absent operand
    #[must_use]
    pub const fn absent() -> Self {
        Self::Sequence(Vec::new())
    }

    /// Whether this operand carries no color
    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Sequence(items) if items.is_empty())
    }
}

impl From<ColorRole> for ColorArg {
    fn from(role: ColorRole) -> Self {
        Self::Role(role)
    }
}

impl From<&str> for ColorArg {
    fn from(hex: &str) -> Self {
        Self::Literal(hex.to_string())
    }
}

impl From<String> for ColorArg {
    fn from(hex: String) -> Self {
        Self::Literal(hex)
    }
}

/// Result of a blend: one color, or one per element of a sequence operand
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Blended {
    /// A single `#rrggbb` color
    Color(String),
    /// Element-wise results
    Sequence(Vec<Blended>),
}

impl Blended {
    /// The color, if this is a single result
    #[must_use]
    pub fn as_color(&self) -> Option<&str> {
        match self {
            Self::Color(hex) => Some(hex),
            Self::Sequence(_) => None,
        }
    }
}

/// Blends [`ColorArg`] operands, resolving roles through an optional palette
///
/// # Broadcast Rules
///
/// - sequence with sequence: element-wise, stopping at the shorter one
/// - sequence with a single operand: the single operand is reused for every element
/// - anything with the absent operand: nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct Blender<'a> {
    palette: Option<&'a ExtendedPalette>,
}

impl<'a> Blender<'a> {
    /// A blender that can only handle literal colors
    #[must_use]
    pub const fn new() -> Self {
        Self { palette: None }
    }

    /// A blender that resolves roles against `palette`
    #[must_use]
    pub const fn with_palette(palette: &'a ExtendedPalette) -> Self {
        Self {
            palette: Some(palette),
        }
    }

    /// Blend `a` and `b`: `alpha * a + (1 - alpha) * b`
    #[must_use]
    pub fn blend(&self, a: &ColorArg, b: &ColorArg, alpha: f64) -> Option<Blended> {
        if a.is_absent() || b.is_absent() {
            return None;
        }

        match (a, b) {
            (ColorArg::Sequence(xs), ColorArg::Sequence(ys)) => Some(Blended::Sequence(
                xs.iter()
                    .zip(ys)
                    .filter_map(|(x, y)| self.blend(x, y, alpha))
                    .collect(),
            )),
            (ColorArg::Sequence(xs), single) => Some(Blended::Sequence(
                xs.iter()
                    .filter_map(|x| self.blend(x, single, alpha))
                    .collect(),
            )),
            (single, ColorArg::Sequence(ys)) => Some(Blended::Sequence(
                ys.iter()
                    .filter_map(|y| self.blend(single, y, alpha))
                    .collect(),
            )),
            (x, y) => {
                let x = self.resolve(x)?;
                let y = self.resolve(y)?;
                match blend_hex(x, y, alpha) {
                    Ok(hex) => Some(Blended::Color(hex)),
                    Err(e) => {
                        tracing::debug!(error = %e, "Skipping unblendable color");
                        None
                    }
                }
            }
        }
    }

    /// Move `color` toward black; `alpha = 0.0` leaves it unchanged
    #[must_use]
    pub fn darken(&self, color: &ColorArg, alpha: f64) -> Option<Blended> {
        self.blend(color, &ColorArg::literal(BLACK), 1.0 - alpha)
    }

    /// Move `color` toward white; `alpha = 0.0` leaves it unchanged
    #[must_use]
    pub fn lighten(&self, color: &ColorArg, alpha: f64) -> Option<Blended> {
        self.blend(color, &ColorArg::literal(WHITE), 1.0 - alpha)
    }

    fn resolve<'s>(&self, arg: &'s ColorArg) -> Option<&'s str>
    where
        'a: 's,
    {
        match arg {
            ColorArg::Literal(hex) => Some(hex),
            ColorArg::Role(role) => self.palette?.get(role, 0, false),
            ColorArg::Sequence(_) => None,
        }
    }
}
