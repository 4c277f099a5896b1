//! # Device Profiles
//!
//! Physical page targets for supported e-ink devices.
//!
//! ## Supported Devices
//!
//! | Key | Model | Page (px) | Resolution | Min cell | Min tap |
//! |-----|-------|-----------|------------|----------|---------|
//! | remarkable | reMarkable 2 | 1404 × 1872 | 226 DPI | 100 px | 24 px |
//! | scribe | Kindle Scribe | 1860 × 2480 | 300 DPI | 100 px | 24 px |
//! | palma | BOOX Palma | 824 × 1648 | 300 DPI | 100 px | 28 px |
//!
//! Every length is stored in millimeters, derived from the device's native
//! pixel value at its own DPI, so converting back with
//! [`crate::units::to_device_units`] reproduces the pixel figure.
//!
//! ## Usage
//!
//! ```
//! use inkplan::profile::DeviceProfile;
//!
//! let device = DeviceProfile::REMARKABLE;
//! let (width, height) = device.page_size_units().unwrap();
//! assert!((width - 1404.0).abs() < 1e-6);
//! assert!((height - 1872.0).abs() < 1e-6);
//! ```

use serde::Serialize;

use crate::error::Result;
use crate::params::TemplateParams;
use crate::units::{Units, px_to_mm};

/// # Device Profile
///
/// Defines the physical characteristics of a target device.
///
/// ## Legibility Minimums
///
/// - **min_cell_mm**: smallest calendar cell / day column width
/// - **min_tap_mm**: smallest interactive target (rows, badges)
/// - **min_section_mm**: smallest daily page section width
///
/// ## Page Frame
///
/// - **margin_mm**: content inset from the page edge
/// - **sidebar_width_mm**: month navigation strip (when the layout shows it)
/// - **header_height_mm**: title band at the top of planner pages
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DeviceProfile {
    /// Registry key (e.g. "palma")
    pub key: &'static str,

    /// Human-readable model name
    pub name: &'static str,

    pub page_width_mm: f64,
    pub page_height_mm: f64,

    /// Resolution in dots per inch
    pub dpi: u32,

    pub min_cell_mm: f64,
    pub min_tap_mm: f64,
    pub min_section_mm: f64,

    pub margin_mm: f64,
    pub sidebar_width_mm: f64,
    pub header_height_mm: f64,

    /// Text size multiplier for template labels
    pub font_scale: f64,

    /// Prefer the stacked compact day-at-glance arrangement
    pub compact_day_at_glance: bool,

    /// Planner layout used when none is requested
    pub default_layout: &'static str,

    /// Template layout used when none is requested
    pub default_template_layout: &'static str,

    /// Device-specific template parameter defaults
    pub template_defaults: TemplateParams,
}

impl DeviceProfile {
    /// # reMarkable 2
    ///
    /// 10.3" Canvas display, the reference device for planner design units.
    pub const REMARKABLE: Self = Self {
        key: "remarkable",
        name: "reMarkable 2",
        page_width_mm: px_to_mm(1404.0, 226),
        page_height_mm: px_to_mm(1872.0, 226),
        dpi: 226,
        min_cell_mm: px_to_mm(100.0, 226),
        min_tap_mm: px_to_mm(24.0, 226),
        min_section_mm: px_to_mm(220.0, 226),
        margin_mm: px_to_mm(50.0, 226),
        sidebar_width_mm: px_to_mm(140.0, 226),
        header_height_mm: px_to_mm(160.0, 226),
        font_scale: 1.0,
        compact_day_at_glance: false,
        default_layout: "full",
        default_template_layout: "balanced",
        template_defaults: TemplateParams::EMPTY,
    };

    /// # Kindle Scribe
    pub const SCRIBE: Self = Self {
        key: "scribe",
        name: "Kindle Scribe",
        page_width_mm: px_to_mm(1860.0, 300),
        page_height_mm: px_to_mm(2480.0, 300),
        dpi: 300,
        min_cell_mm: px_to_mm(100.0, 300),
        min_tap_mm: px_to_mm(24.0, 300),
        min_section_mm: px_to_mm(220.0, 300),
        margin_mm: px_to_mm(50.0, 300),
        sidebar_width_mm: px_to_mm(140.0, 300),
        header_height_mm: px_to_mm(160.0, 300),
        font_scale: 1.0,
        compact_day_at_glance: false,
        default_layout: "full",
        default_template_layout: "full",
        template_defaults: TemplateParams::EMPTY,
    };

    /// # BOOX Palma
    ///
    /// Phone-sized reader. Narrow enough that the sidebar and seven-column
    /// weeks do not fit, so the compact layout is its default.
    pub const PALMA: Self = Self {
        key: "palma",
        name: "BOOX Palma",
        page_width_mm: px_to_mm(824.0, 300),
        page_height_mm: px_to_mm(1648.0, 300),
        dpi: 300,
        min_cell_mm: px_to_mm(100.0, 300),
        min_tap_mm: px_to_mm(28.0, 300),
        min_section_mm: px_to_mm(220.0, 300),
        margin_mm: px_to_mm(28.0, 300),
        sidebar_width_mm: px_to_mm(140.0, 300),
        header_height_mm: px_to_mm(160.0, 300),
        font_scale: 0.75,
        compact_day_at_glance: true,
        default_layout: "compact",
        default_template_layout: "compact",
        template_defaults: TemplateParams {
            margin_mm: Some(3.0),
            schedule_start_hour: Some(9),
            schedule_end_hour: Some(19),
            ..TemplateParams::EMPTY
        },
    };

    /// Unit converter for this device.
    pub fn units(&self) -> Units {
        Units::new(self.dpi, self.font_scale)
    }

    /// Page width and height in device units.
    pub fn page_size_units(&self) -> Result<(f64, f64)> {
        let units = self.units();
        Ok((units.mm(self.page_width_mm)?, units.mm(self.page_height_mm)?))
    }
}

impl Default for DeviceProfile {
    fn default() -> Self {
        Self::REMARKABLE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::to_device_units;

    #[test]
    fn test_remarkable_dimensions() {
        let (w, h) = DeviceProfile::REMARKABLE.page_size_units().unwrap();
        assert!((w - 1404.0).abs() < 1e-6);
        assert!((h - 1872.0).abs() < 1e-6);
    }

    #[test]
    fn test_page_mm() {
        // 1872 px / 226 dpi = 8.283 in = 210.4 mm
        assert!((DeviceProfile::REMARKABLE.page_height_mm - 210.4).abs() < 0.1);
        // 1648 px / 300 dpi = 5.493 in = 139.5 mm
        assert!((DeviceProfile::PALMA.page_height_mm - 139.5).abs() < 0.1);
    }

    #[test]
    fn test_min_tap_round_trips_to_pixels() {
        let palma = DeviceProfile::PALMA;
        let tap = to_device_units(palma.min_tap_mm, palma.dpi).unwrap();
        assert!((tap - 28.0).abs() < 1e-9);
    }

    #[test]
    fn test_palma_template_defaults() {
        let defaults = DeviceProfile::PALMA.template_defaults;
        assert_eq!(defaults.schedule_hours(), (Some(9), Some(19)));
        assert!(DeviceProfile::REMARKABLE.template_defaults.is_empty());
    }

    #[test]
    fn test_default_is_remarkable() {
        assert_eq!(DeviceProfile::default().key, "remarkable");
    }
}
