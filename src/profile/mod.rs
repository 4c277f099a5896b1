//! # Profile Module
//!
//! Device and layout profiles, and the read-only registry that holds the
//! built-in tables.
//!
//! ## Modules
//!
//! - [`device`]: physical page targets (page size, DPI, legibility minimums)
//! - [`layout`]: layout densities (full, balanced, compact)
//! - [`registry`]: name lookup and the fallback order

pub mod device;
pub mod layout;
pub mod registry;

pub use device::DeviceProfile;
pub use layout::{DailyLayout, Density, LayoutProfile, MonthLayout, WeekLayout};
pub use registry::ProfileRegistry;

