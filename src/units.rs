//! # Unit Conversion
//!
//! Physical quantities (millimeters, typographic points) to device-native
//! drawing units.
//!
//! ## Calculations
//!
//! ```text
//! device_units = mm / 25.4 * dpi
//! device_units = pt / 72 * dpi
//!
//! For reMarkable 2 (226 DPI):
//!   units_per_mm = 226 / 25.4 ≈ 8.9
//!   7mm line spacing ≈ 62.3 units
//! ```
//!
//! Nothing here rounds; rounding is left to the drawing backend.

use serde::Serialize;

use crate::error::{InkplanError, Result};

/// Millimeters per inch.
pub const MM_PER_INCH: f64 = 25.4;

/// Typographic points per inch.
pub const POINTS_PER_INCH: f64 = 72.0;

/// Convert millimeters to device units.
///
/// Fails with [`InkplanError::InvalidUnit`] for negative or non-finite input.
///
/// ```
/// use inkplan::units::to_device_units;
///
/// let units = to_device_units(25.4, 300).unwrap();
/// assert!((units - 300.0).abs() < 1e-9);
/// ```
pub fn to_device_units(mm: f64, dpi: u32) -> Result<f64> {
    if !mm.is_finite() || mm < 0.0 {
        return Err(InkplanError::InvalidUnit(mm));
    }
    if dpi == 0 {
        return Err(InkplanError::invalid_param("dpi", dpi, "must be positive"));
    }
    Ok(mm / MM_PER_INCH * dpi as f64)
}

/// Convert device units back to millimeters.
pub fn to_millimeters(units: f64, dpi: u32) -> Result<f64> {
    if !units.is_finite() || units < 0.0 {
        return Err(InkplanError::InvalidUnit(units));
    }
    if dpi == 0 {
        return Err(InkplanError::invalid_param("dpi", dpi, "must be positive"));
    }
    Ok(units / dpi as f64 * MM_PER_INCH)
}

/// Convert typographic points to device units.
pub fn points_to_device_units(pt: f64, dpi: u32) -> Result<f64> {
    if !pt.is_finite() || pt < 0.0 {
        return Err(InkplanError::InvalidUnit(pt));
    }
    Ok(pt * dpi as f64 / POINTS_PER_INCH)
}

/// Pixel count at a given DPI expressed in millimeters.
///
/// Used to build the static profile tables from the pixel values the
/// devices are specified in.
pub const fn px_to_mm(px: f64, dpi: u32) -> f64 {
    px / dpi as f64 * MM_PER_INCH
}

/// Converter bound to one device.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Units {
    dpi: u32,
    font_scale: f64,
}

impl Units {
    pub fn new(dpi: u32, font_scale: f64) -> Self {
        Self { dpi, font_scale }
    }

    pub fn dpi(&self) -> u32 {
        self.dpi
    }

    /// Millimeters to device units.
    #[inline]
    pub fn mm(&self, mm: f64) -> Result<f64> {
        to_device_units(mm, self.dpi)
    }

    /// Points to device units.
    #[inline]
    pub fn pt(&self, pt: f64) -> Result<f64> {
        points_to_device_units(pt, self.dpi)
    }

    /// Points to device units with the device's text scaling applied.
    #[inline]
    pub fn font_pt(&self, pt: f64) -> Result<f64> {
        points_to_device_units(pt * self.font_scale, self.dpi)
    }

    /// Device units to millimeters.
    #[inline]
    pub fn to_mm(&self, units: f64) -> Result<f64> {
        to_millimeters(units, self.dpi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_inch_is_dpi_units() {
        let units = to_device_units(25.4, 226).unwrap();
        assert!((units - 226.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_mm_is_zero_units() {
        assert_eq!(to_device_units(0.0, 300).unwrap(), 0.0);
    }

    #[test]
    fn test_negative_mm_rejected() {
        let err = to_device_units(-1.0, 300).unwrap_err();
        assert!(matches!(err, InkplanError::InvalidUnit(v) if v == -1.0));
    }

    #[test]
    fn test_non_finite_mm_rejected() {
        assert!(matches!(
            to_device_units(f64::NAN, 300),
            Err(InkplanError::InvalidUnit(_))
        ));
        assert!(matches!(
            to_device_units(f64::INFINITY, 300),
            Err(InkplanError::InvalidUnit(_))
        ));
    }

    #[test]
    fn test_zero_dpi_rejected() {
        assert!(matches!(
            to_device_units(5.0, 0),
            Err(InkplanError::InvalidParam { .. })
        ));
    }

    #[test]
    fn test_round_trip() {
        for dpi in [72, 226, 300, 600] {
            for mm in [0.0, 0.35, 1.0, 7.0, 139.53, 210.4] {
                let units = to_device_units(mm, dpi).unwrap();
                let back = to_millimeters(units, dpi).unwrap();
                assert!((back - mm).abs() < 1e-9, "dpi={dpi} mm={mm} back={back}");
            }
        }
    }

    #[test]
    fn test_points() {
        // 72pt = 1 inch
        let units = points_to_device_units(72.0, 300).unwrap();
        assert!((units - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_font_scale_applies_only_to_font_points() {
        let units = Units::new(300, 0.75);
        assert!((units.pt(8.0).unwrap() - 33.333).abs() < 0.01);
        assert!((units.font_pt(8.0).unwrap() - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_px_to_mm_matches_runtime_conversion() {
        let mm = px_to_mm(1872.0, 226);
        let px = to_device_units(mm, 226).unwrap();
        assert!((px - 1872.0).abs() < 1e-9);
    }
}
