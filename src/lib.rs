//! # Inkplan - E-ink Planner Layout Library
//!
//! Inkplan computes device-accurate page geometry for e-ink planners and note
//! templates. It provides:
//!
//! - **Profiles**: device page targets and full / balanced / compact layouts
//! - **Fit validation**: legibility checks with automatic layout fallback
//! - **Calendar**: month matrices, week rows and ISO week numbers
//! - **Templates**: lines, grid, dotted grid, millimeter, schedule, task list,
//!   notes and day-at-glance pages
//! - **Planner**: a full year of cover, month, week and day pages
//! - **Preview**: grayscale PNG rendering of any page
//!
//! Output is a backend-agnostic tree of [`geometry::GeometryNode`]s in device
//! units (origin top-left, y down). Nothing here draws glyphs or writes PDF.
//!
//! ## Quick Start
//!
//! ```
//! use inkplan::{
//!     fit::{FitMode, FitTarget, validate_fit},
//!     params::TemplateParams,
//!     profile::ProfileRegistry,
//!     template::{TemplateKind, build_template},
//! };
//!
//! let registry = ProfileRegistry::builtin();
//! let params =
//!     TemplateParams::from_pairs([("schedule_start_hour", "6"), ("schedule_end_hour", "22")])?;
//!
//! // The full layout is too wide for a Palma; the validator degrades it
//! let report = validate_fit(
//!     registry,
//!     "palma",
//!     Some("full"),
//!     FitTarget::Template(TemplateKind::Schedule),
//!     &params,
//!     FitMode::Fallback,
//! )?;
//! assert!(report.result.is_fallback());
//!
//! let page = build_template(
//!     registry,
//!     TemplateKind::Schedule,
//!     "palma",
//!     Some("full"),
//!     &params,
//!     FitMode::Fallback,
//! )?;
//! let json = serde_json::to_string(&page.geometry)?;
//! assert!(json.contains("\"type\":\"group\""));
//!
//! # Ok::<(), inkplan::error::InkplanError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`profile`] | Device and layout tables, registry |
//! | [`units`] | Millimeter, point and device-unit conversion |
//! | [`params`] | `--param key=value` parsing and resolution |
//! | [`fit`] | Fit validation and fallback |
//! | [`calendar`] | Date arithmetic and month matrices |
//! | [`geometry`] | Geometry tree, rectangles, page assembly |
//! | [`template`] | Note template builders |
//! | [`planner`] | Yearly planner composer |
//! | [`preview`] | PNG preview renderer |
//! | [`error`] | Error types |
//!
//! ## Supported Devices
//!
//! - reMarkable 2 (226 DPI)
//! - Kindle Scribe (300 DPI)
//! - BOOX Palma (300 DPI)

pub mod calendar;
pub mod error;
pub mod fit;
pub mod geometry;
pub mod params;
pub mod planner;
pub mod preview;
pub mod profile;
pub mod template;
pub mod units;

// Re-exports for convenience
pub use error::InkplanError;
pub use geometry::GeometryNode;
pub use profile::{DeviceProfile, LayoutProfile, ProfileRegistry};
