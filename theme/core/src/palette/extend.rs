//! Palette Extender
//!
//! Every base color becomes `2N+1` shades ordered darkest to lightest:
//!
//! ```text
//! darken(c, N*s) .. darken(c, 1*s)   c   lighten(c, 1*s) .. lighten(c, N*s)
//! ```
//!
//! where `s` is `step_percent / 100`. The middle entry is the base color exactly
//! as it appeared in the source.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{BasePalette, ColorRole};
use crate::color::{darken_hex, lighten_hex, ColorError};

/// Default number of shades on each side of the base color
pub const DEFAULT_NUM_SHADES: u16 = 8;

/// Default distance between neighbouring shades, in percent
pub const DEFAULT_STEP_PERCENT: f64 = 5.0;

/// Shade ramp parameters
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShadeConfig {
    /// Shades on each side of the base color
    pub num_shades: u16,
    /// Distance between neighbouring shades, in percent
    pub step_percent: f64,
}

impl Default for ShadeConfig {
    fn default() -> Self {
        Self {
            num_shades: DEFAULT_NUM_SHADES,
            step_percent: DEFAULT_STEP_PERCENT,
        }
    }
}

impl ShadeConfig {
    /// Create a shade configuration
    #[must_use]
    pub const fn new(num_shades: u16, step_percent: f64) -> Self {
        Self {
            num_shades,
            step_percent,
        }
    }

    /// Entries per role: `2 * num_shades + 1`
    #[must_use]
    pub fn ramp_len(&self) -> usize {
        2 * usize::from(self.num_shades) + 1
    }
}

/// Expand one color into its shade ramp
///
/// # Errors
///
/// Returns a [`ColorError`] if `color` is not a hex color.
///
/// # Examples
///
/// ```
/// use theme_core::extend_color;
///
/// let ramp = extend_color("#ff0000", 1, 50.0).unwrap();
/// assert_eq!(ramp, vec!["#7f0000", "#ff0000", "#ff7f7f"]);
/// ```
pub fn extend_color(
    color: &str,
    num_shades: u16,
    step_percent: f64,
) -> Result<Vec<String>, ColorError> {
    let amount = |i: u16| f64::from(i) * step_percent / 100.0;
    let mut ramp = Vec::with_capacity(2 * usize::from(num_shades) + 1);

    for i in (1..=num_shades).rev() {
        ramp.push(darken_hex(color, amount(i))?);
    }
    ramp.push(color.to_string());
    for i in 1..=num_shades {
        ramp.push(lighten_hex(color, amount(i))?);
    }

    Ok(ramp)
}

/// Expand every color of `base`, keeping its roles
///
/// # Errors
///
/// Returns a [`ColorError`] if any base color is not a hex color.
pub fn extend_palette(shades: ShadeConfig, base: &BasePalette) -> Result<ExtendedPalette, ColorError> {
    let colors = base
        .iter()
        .map(|(role, hex)| {
            extend_color(hex, shades.num_shades, shades.step_percent).map(|ramp| (role.clone(), ramp))
        })
        .collect::<Result<BTreeMap<_, _>, _>>()?;

    tracing::debug!(
        roles = colors.len(),
        num_shades = shades.num_shades,
        step_percent = shades.step_percent,
        "Extended palette"
    );

    Ok(ExtendedPalette { shades, colors })
}

/// Shade ramps for every role
///
/// Every ramp has the same length, `2 * num_shades + 1`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtendedPalette {
    shades: ShadeConfig,
    colors: BTreeMap<ColorRole, Vec<String>>,
}

impl ExtendedPalette {
    /// Parameters this palette was built with
    #[must_use]
    pub fn shades(&self) -> ShadeConfig {
        self.shades
    }

    /// Whether no roles are present
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Number of roles
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Full ramp for `role`
    #[must_use]
    pub fn ramp(&self, role: &ColorRole) -> Option<&[String]> {
        self.colors.get(role).map(Vec::as_slice)
    }

    /// Iterate roles and ramps in role order
    pub fn iter(&self) -> impl Iterator<Item = (&ColorRole, &[String])> {
        self.colors.iter().map(|(role, ramp)| (role, ramp.as_slice()))
    }

    /// Index of the base color inside every ramp
    #[must_use]
    pub fn middle_index(&self) -> Option<usize> {
        self.colors
            .values()
            .next()
            .map(|ramp| ramp.len().saturating_sub(1) / 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_shade_config() {
        let shades = ShadeConfig::default();
        assert_eq!(shades.num_shades, 8);
        assert_eq!(shades.step_percent, 5.0);
        assert_eq!(shades.ramp_len(), 17);
    }

    #[test]
    fn test_extend_color_length_and_middle() {
        for (n, step) in [(0u16, 5.0), (1, 50.0), (3, 10.0), (8, 5.0), (10, 2.5)] {
            let ramp = extend_color("#37B6FF", n, step).unwrap();
            assert_eq!(ramp.len(), 2 * usize::from(n) + 1);
            assert_eq!(ramp[usize::from(n)], "#37B6FF");
        }
    }

    #[test]
    fn test_extend_color_order() {
        let ramp = extend_color("#808080", 3, 10.0).unwrap();
        assert_eq!(ramp[0], darken_hex("#808080", 0.3).unwrap());
        assert_eq!(ramp[1], darken_hex("#808080", 0.2).unwrap());
        assert_eq!(ramp[2], darken_hex("#808080", 0.1).unwrap());
        assert_eq!(ramp[4], lighten_hex("#808080", 0.1).unwrap());
        assert_eq!(ramp[6], lighten_hex("#808080", 0.3).unwrap());

        // darkest to lightest
        let red_channel = |hex: &str| u8::from_str_radix(&hex[1..3], 16).unwrap();
        let reds: Vec<u8> = ramp.iter().map(|hex| red_channel(hex)).collect();
        assert!(reds.windows(2).all(|w| w[0] <= w[1]), "{reds:?}");
    }

    #[test]
    fn test_extend_color_rejects_bad_hex() {
        assert!(extend_color("teal", 2, 5.0).is_err());
    }

    #[test]
    fn test_extend_palette_keeps_roles() {
        let base: BasePalette = [
            (ColorRole::Red, "#fc3841".to_string()),
            (ColorRole::Background, "#1d262a".to_string()),
        ]
        .into_iter()
        .collect();

        let extended = extend_palette(ShadeConfig::default(), &base).unwrap();
        assert_eq!(extended.len(), 2);
        assert_eq!(extended.middle_index(), Some(8));
        for (role, ramp) in extended.iter() {
            assert_eq!(ramp.len(), 17);
            assert_eq!(Some(ramp[8].as_str()), base.get(role));
        }
    }

    #[test]
    fn test_empty_palette_has_no_middle() {
        let extended = extend_palette(ShadeConfig::default(), &BasePalette::new()).unwrap();
        assert!(extended.is_empty());
        assert_eq!(extended.middle_index(), None);
    }
}
