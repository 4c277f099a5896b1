//! # Profile Registry
//!
//! Read-only table of built-in devices and layouts.
//!
//! The registry is a `static` and is always passed by reference, so it can be
//! shared across planner worker threads without locking. Lookups are
//! case-insensitive.

use serde::Serialize;

use super::{DeviceProfile, LayoutProfile};
use crate::error::{InkplanError, Result};

/// Built-in profile table.
pub static BUILTIN: ProfileRegistry = ProfileRegistry {
    devices: &[
        DeviceProfile::REMARKABLE,
        DeviceProfile::SCRIBE,
        DeviceProfile::PALMA,
    ],
    // Fallback order: least dense first
    layouts: &[
        LayoutProfile::FULL,
        LayoutProfile::BALANCED,
        LayoutProfile::COMPACT,
    ],
};

/// Named device and layout profiles.
#[derive(Debug, Serialize)]
pub struct ProfileRegistry {
    devices: &'static [DeviceProfile],
    layouts: &'static [LayoutProfile],
}

impl ProfileRegistry {
    /// The built-in registry.
    pub fn builtin() -> &'static ProfileRegistry {
        &BUILTIN
    }

    pub fn devices(&self) -> &'static [DeviceProfile] {
        self.devices
    }

    /// Layouts in fallback order.
    pub fn layouts(&self) -> &'static [LayoutProfile] {
        self.layouts
    }

    /// Look up a device by key.
    ///
    /// ```
    /// use inkplan::profile::ProfileRegistry;
    ///
    /// let registry = ProfileRegistry::builtin();
    /// assert_eq!(registry.resolve_device("Palma").unwrap().dpi, 300);
    /// assert!(registry.resolve_device("kindle").is_err());
    /// ```
    pub fn resolve_device(&self, name: &str) -> Result<&'static DeviceProfile> {
        let needle = name.trim().to_lowercase();
        self.devices
            .iter()
            .find(|d| d.key == needle)
            .ok_or_else(|| InkplanError::UnknownProfile(name.to_string()))
    }

    /// Look up a layout by name.
    pub fn resolve_layout(&self, name: &str) -> Result<&'static LayoutProfile> {
        let needle = name.trim().to_lowercase();
        self.layouts
            .iter()
            .find(|l| l.name == needle)
            .ok_or_else(|| InkplanError::UnknownProfile(name.to_string()))
    }

    /// Planner layout for a device when none is requested.
    pub fn default_layout(&self, device: &DeviceProfile) -> Result<&'static LayoutProfile> {
        self.resolve_layout(device.default_layout)
    }

    /// Template layout for a device when none is requested.
    pub fn default_template_layout(
        &self,
        device: &DeviceProfile,
    ) -> Result<&'static LayoutProfile> {
        self.resolve_layout(device.default_template_layout)
    }

    /// Layouts to try, in order, starting at `requested`.
    pub fn fallback_candidates(&self, requested: &LayoutProfile) -> &'static [LayoutProfile] {
        let start = self
            .layouts
            .iter()
            .position(|l| l.name == requested.name)
            .unwrap_or(0);
        &self.layouts[start..]
    }

    /// Device keys, for help output.
    pub fn device_keys(&self) -> Vec<&'static str> {
        self.devices.iter().map(|d| d.key).collect()
    }

    /// Layout names, for help output.
    pub fn layout_names(&self) -> Vec<&'static str> {
        self.layouts.iter().map(|l| l.name).collect()
    }
}
