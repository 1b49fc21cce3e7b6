//! Color Accessor
//!
//! Looks up a shade relative to a role's base color. Shade `0` is the base
//! color, negative shades are darker, positive ones lighter. Requests past
//! either end of the ramp clamp to the extreme shade.

use super::{ColorRole, ExtendedPalette};

impl ExtendedPalette {
    /// Color for `role` at `shade`
    ///
    /// With `reduced` set the base color is returned whatever `shade` asks
    /// for, for displays that cannot show the full ramp. Returns `None` for a
    /// role the palette does not have.
    ///
    /// # Examples
    ///
    /// ```
    /// use theme_core::{extend_palette, BasePalette, ColorRole, ShadeConfig};
    ///
    /// let base: BasePalette = [(ColorRole::Red, "#ff0000".to_string())].into_iter().collect();
    /// let palette = extend_palette(ShadeConfig::new(2, 25.0), &base).unwrap();
    ///
    /// assert_eq!(palette.get(&ColorRole::Red, 0, false), Some("#ff0000"));
    /// assert_eq!(palette.get(&ColorRole::Red, 99, false), palette.get(&ColorRole::Red, 2, false));
    /// assert_eq!(palette.get(&ColorRole::Red, 2, true), Some("#ff0000"));
    /// ```
    #[must_use]
    pub fn get(&self, role: &ColorRole, shade: i32, reduced: bool) -> Option<&str> {
        let ramp = self.ramp(role)?;
        let middle = self.middle_index()?;
        let original = ramp.get(middle)?;

        if reduced {
            return Some(original);
        }

        let last = ramp.len() - 1;
        let requested = i64::try_from(middle).ok()? + i64::from(shade);
        let index = usize::try_from(requested).map_or(0, |i| i.min(last));
        ramp.get(index).map(String::as_str)
    }

    /// Color for `role` at `shade`, honouring the full ramp
    #[must_use]
    pub fn color(&self, role: &ColorRole, shade: i32) -> Option<&str> {
        self.get(role, shade, false)
    }
}
