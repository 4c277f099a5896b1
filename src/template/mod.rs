//! # Note Templates
//!
//! Single-page note templates. Each builder fills a body rectangle and
//! returns one [`GeometryNode::Group`].
//!
//! ## Kinds
//!
//! | Kind | Body |
//! |------|------|
//! | `lines` | Writing rules every `line_spacing_mm` |
//! | `grid` | Square grid at `grid_spacing_mm` |
//! | `dotted-grid` | Dot at every grid intersection |
//! | `millimeter` | 1 mm minor and 5 mm major lines |
//! | `schedule` | One row per hour, work hours shaded |
//! | `task-list` | Checkbox rows (alias `todo-list`) |
//! | `notes` | Bordered area with the chosen fill |
//! | `day-at-glance` | Schedule, priorities and checklist stacked |
//!
//! ## Adding a Template
//!
//! 1. Add a variant to [`TemplateKind`] and to [`TemplateKind::ALL`]
//! 2. Write the builder in one of the submodules
//! 3. Dispatch to it from [`build_template_geometry`]
//! 4. Add its legibility check to `fit::template_checks`

pub mod glance;
pub mod rows;
pub mod ruled;

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::{InkplanError, Result};
use crate::fit::{FitMode, FitReport, FitTarget, validate_fit};
use crate::geometry::{GeometryNode, PageRegions, Point, Rect, TextRole, assemble};
use crate::params::{ResolvedParams, TemplateParams};
use crate::profile::{DeviceProfile, ProfileRegistry};
use crate::units::Units;

/// Title text size in points.
const TITLE_PT: f64 = 14.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateKind {
    Lines,
    Grid,
    DottedGrid,
    Millimeter,
    Schedule,
    TaskList,
    Notes,
    DayAtGlance,
}

impl TemplateKind {
    pub const ALL: [TemplateKind; 8] = [
        TemplateKind::Lines,
        TemplateKind::Grid,
        TemplateKind::DottedGrid,
        TemplateKind::Millimeter,
        TemplateKind::Schedule,
        TemplateKind::TaskList,
        TemplateKind::Notes,
        TemplateKind::DayAtGlance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateKind::Lines => "lines",
            TemplateKind::Grid => "grid",
            TemplateKind::DottedGrid => "dotted-grid",
            TemplateKind::Millimeter => "millimeter",
            TemplateKind::Schedule => "schedule",
            TemplateKind::TaskList => "task-list",
            TemplateKind::Notes => "notes",
            TemplateKind::DayAtGlance => "day-at-glance",
        }
    }

    /// Header title drawn above the body.
    pub fn title(&self) -> &'static str {
        match self {
            TemplateKind::Lines => "LINES",
            TemplateKind::Grid => "GRID",
            TemplateKind::DottedGrid => "DOTTED GRID",
            TemplateKind::Millimeter => "MILLIMETER",
            TemplateKind::Schedule => "SCHEDULE",
            TemplateKind::TaskList => "TASKS",
            TemplateKind::Notes => "NOTES",
            TemplateKind::DayAtGlance => "DAY AT A GLANCE",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            TemplateKind::Lines => "Ruled writing lines",
            TemplateKind::Grid => "Square grid",
            TemplateKind::DottedGrid => "Dot grid",
            TemplateKind::Millimeter => "Millimeter drafting paper",
            TemplateKind::Schedule => "Hourly schedule with work hours shaded",
            TemplateKind::TaskList => "Checklist rows",
            TemplateKind::Notes => "Bordered notes area (lines, grid, dots or millimeter fill)",
            TemplateKind::DayAtGlance => "Schedule, priorities and checklist on one page",
        }
    }

    /// Look up a kind by name. Case-insensitive; `todo-list` and underscore
    /// spellings are accepted.
    pub fn by_name(name: &str) -> Option<TemplateKind> {
        match name.trim().to_lowercase().replace('_', "-").as_str() {
            "lines" => Some(TemplateKind::Lines),
            "grid" => Some(TemplateKind::Grid),
            "dotted-grid" | "dots" => Some(TemplateKind::DottedGrid),
            "millimeter" => Some(TemplateKind::Millimeter),
            "schedule" => Some(TemplateKind::Schedule),
            "task-list" | "todo-list" => Some(TemplateKind::TaskList),
            "notes" => Some(TemplateKind::Notes),
            "day-at-glance" => Some(TemplateKind::DayAtGlance),
            _ => None,
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateKind {
    type Err = InkplanError;

    fn from_str(s: &str) -> Result<Self> {
        TemplateKind::by_name(s).ok_or_else(|| {
            let names: Vec<&str> = TemplateKind::ALL.iter().map(|k| k.as_str()).collect();
            InkplanError::invalid_param(
                "template",
                s,
                format!("expected one of {}", names.join(", ")),
            )
        })
    }
}

/// Build the body geometry of one template.
///
/// `params` is re-validated; builders never see an unchecked value. The
/// returned group's frame is `body`.
///
/// ```
/// use inkplan::geometry::{GeometryNode, Rect};
/// use inkplan::params::TemplateParams;
/// use inkplan::profile::{DeviceProfile, LayoutProfile};
/// use inkplan::template::{TemplateKind, build_template_geometry};
///
/// let device = DeviceProfile::REMARKABLE;
/// let params = TemplateParams::EMPTY.resolve(&device, &LayoutProfile::BALANCED).unwrap();
/// let body = Rect::new(0.0, 0.0, 1000.0, 1000.0);
/// let group =
///     build_template_geometry(TemplateKind::Lines, &params, &device.units(), body).unwrap();
/// assert!(group.count(|n| matches!(n, GeometryNode::Line { .. })) > 10);
/// ```
pub fn build_template_geometry(
    kind: TemplateKind,
    params: &ResolvedParams,
    units: &Units,
    body: Rect,
) -> Result<GeometryNode> {
    params.validate()?;
    body.validate("body")?;
    match kind {
        TemplateKind::Lines => ruled::lines(params, units, body),
        TemplateKind::Grid => ruled::grid(params, units, body),
        TemplateKind::DottedGrid => ruled::dotted_grid(params, units, body),
        TemplateKind::Millimeter => ruled::millimeter(units, body),
        TemplateKind::Notes => ruled::notes(params, units, body),
        TemplateKind::Schedule => rows::schedule(params, units, body),
        TemplateKind::TaskList => rows::task_list(params, units, body),
        TemplateKind::DayAtGlance => glance::day_at_glance(params, units, body),
    }
}

/// Build a complete template page: margins, a titled header band and the
/// body, assembled into one page group.
pub fn build_template_page(
    kind: TemplateKind,
    device: &DeviceProfile,
    params: &ResolvedParams,
) -> Result<GeometryNode> {
    let units = device.units();
    let regions = PageRegions::for_template(device, params)?;

    let header = template_header(kind, &units, regions.header)?;
    let body = if kind == TemplateKind::DayAtGlance && device.compact_day_at_glance {
        regions.body.validate("body")?;
        glance::day_at_glance_arranged(params, &units, regions.body, glance::Arrangement::Compact)?
    } else {
        build_template_geometry(kind, params, &units, regions.body)?
    };
    let sidebar = GeometryNode::group("sidebar", regions.sidebar, Vec::new());

    let mut page = assemble(sidebar, header, body)?;
    if let GeometryNode::Group { frame, .. } = &mut page {
        *frame = regions.page;
    }
    Ok(page)
}

/// A template page built under a validated layout.
#[derive(Debug, Clone, Serialize)]
pub struct TemplatePage {
    pub kind: TemplateKind,
    pub fit: FitReport,
    pub params: ResolvedParams,
    pub geometry: GeometryNode,
}

/// Validate the layout for `kind` on a device, then build the page with the
/// chosen layout's defaults under the caller's explicit params.
///
/// ```
/// use inkplan::fit::FitMode;
/// use inkplan::params::TemplateParams;
/// use inkplan::profile::ProfileRegistry;
/// use inkplan::template::{TemplateKind, build_template};
///
/// let page = build_template(
///     ProfileRegistry::builtin(),
///     TemplateKind::Lines,
///     "scribe",
///     None,
///     &TemplateParams::EMPTY,
///     FitMode::Fallback,
/// )
/// .unwrap();
/// assert!(page.geometry.find_group("lines").is_some());
/// ```
pub fn build_template(
    registry: &ProfileRegistry,
    kind: TemplateKind,
    device_name: &str,
    layout_name: Option<&str>,
    params: &TemplateParams,
    mode: FitMode,
) -> Result<TemplatePage> {
    let target = FitTarget::Template(kind);
    let fit = validate_fit(registry, device_name, layout_name, target, params, mode)?;
    let device = registry.resolve_device(device_name)?;
    let layout = fit.result.clone().into_layout()?;
    let resolved = params.resolve(device, layout)?;
    let geometry = build_template_page(kind, device, &resolved)?;
    Ok(TemplatePage {
        kind,
        fit,
        params: resolved,
        geometry,
    })
}

fn template_header(kind: TemplateKind, units: &Units, frame: Rect) -> Result<GeometryNode> {
    let mut children = Vec::new();
    if frame.height > 0.0 {
        let size = units.font_pt(TITLE_PT)?.min(frame.height);
        children.push(GeometryNode::text(
            Point::new(frame.x, frame.y + frame.height / 2.0),
            kind.title(),
            TextRole::Title,
            size,
        ));
    }
    Ok(GeometryNode::group("header", frame, children))
}
