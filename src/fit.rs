//! # Fit Validation
//!
//! Decides whether a layout keeps every drawable above the device's legibility
//! minimums, and degrades to a denser layout when it does not.
//!
//! ## Checks
//!
//! Frame checks (always):
//!
//! | Check | Minimum |
//! |-------|---------|
//! | month cell width | `min_cell` |
//! | month cell height, day badge | `min_tap` |
//! | week column width (per segment) | `min_cell` |
//! | week day badge | `min_tap` |
//! | daily schedule / notes width | `min_section` |
//! | schedule writing width, row heights | `min_tap` |
//!
//! Template checks (template targets): body row heights and line pitches
//! against `min_tap`, row counts against the layout's `max_rows`.
//!
//! ## Fallback
//!
//! ```text
//! requested ──fails──▶ next denser ──fails──▶ ... ──▶ Rejected
//!     │                    │
//!   Fits              Fallback(chosen)
//! ```
//!
//! In strict mode the first failure is final.

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{InkplanError, Result};
use crate::geometry::{EPSILON, PageRegions};
use crate::params::{NotesFill, ParamKey, ResolvedParams, TemplateParams};
use crate::planner::frame::{PlannerFrame, SCHEDULE_LABEL_WIDTH};
use crate::profile::{DeviceProfile, LayoutProfile, ProfileRegistry};
use crate::template::glance::GlanceMetrics;
use crate::template::TemplateKind;

/// Reason reported when no layout fits.
pub const NO_LAYOUT_FITS: &str = "no layout satisfies minimum legible size for this device";

/// Major line pitch of millimeter paper.
const MILLIMETER_MAJOR_MM: f64 = 5.0;

// ============================================================================
// TYPES
// ============================================================================

/// What is being laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FitTarget {
    Planner,
    Template(TemplateKind),
}

impl FromStr for FitTarget {
    type Err = InkplanError;

    /// `planner` or a template kind name.
    fn from_str(s: &str) -> Result<Self> {
        if s.trim().eq_ignore_ascii_case("planner") {
            return Ok(FitTarget::Planner);
        }
        Ok(FitTarget::Template(s.parse()?))
    }
}

impl fmt::Display for FitTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FitTarget::Planner => f.write_str("planner"),
            FitTarget::Template(kind) => write!(f, "{kind}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FitMode {
    /// Degrade to a denser layout when the requested one fails
    #[default]
    Fallback,
    /// Reject on the first failure
    Strict,
}

/// Direction of a failed limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Bound {
    AtLeast,
    AtMost,
}

/// One failed check, in device units (or rows for row counts).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitIssue {
    pub check: &'static str,
    pub measured: f64,
    pub limit: f64,
    pub bound: Bound,
}

impl fmt::Display for FitIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self.bound {
            Bound::AtLeast => "<",
            Bound::AtMost => ">",
        };
        write!(f, "{} {:.1} {} {:.1}", self.check, self.measured, op, self.limit)
    }
}

fn layout_name<S: Serializer>(
    layout: &&'static LayoutProfile,
    s: S,
) -> std::result::Result<S::Ok, S::Error> {
    s.serialize_str(layout.name)
}

/// Outcome of fit validation.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FitResult {
    Fits {
        #[serde(serialize_with = "layout_name")]
        layout: &'static LayoutProfile,
    },
    Fallback {
        #[serde(serialize_with = "layout_name")]
        layout: &'static LayoutProfile,
        reason: String,
    },
    Rejected {
        reason: String,
    },
}

impl FitResult {
    /// The layout to use, if any.
    pub fn layout(&self) -> Option<&'static LayoutProfile> {
        match self {
            FitResult::Fits { layout } | FitResult::Fallback { layout, .. } => Some(*layout),
            FitResult::Rejected { .. } => None,
        }
    }

    /// The layout to use, or [`InkplanError::Rejected`].
    pub fn into_layout(self) -> Result<&'static LayoutProfile> {
        match self {
            FitResult::Fits { layout } | FitResult::Fallback { layout, .. } => Ok(layout),
            FitResult::Rejected { reason } => Err(InkplanError::Rejected(reason)),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, FitResult::Fallback { .. })
    }
}

impl fmt::Display for FitResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FitResult::Fits { layout } => write!(f, "fits ({})", layout.name),
            FitResult::Fallback { layout, reason } => {
                write!(f, "fallback to {} ({})", layout.name, reason)
            }
            FitResult::Rejected { reason } => write!(f, "rejected ({reason})"),
        }
    }
}

/// Fit result with context for display.
#[derive(Debug, Clone, Serialize)]
pub struct FitReport {
    pub device: &'static str,
    pub requested: &'static str,
    pub target: FitTarget,
    pub result: FitResult,
    /// Failed checks of the requested layout
    pub issues: Vec<FitIssue>,
}

// ============================================================================
// VALIDATION
// ============================================================================

/// Validate a layout for a device and target.
///
/// `layout_name` of `None` uses the device's default layout for the target.
/// Fails with `UnknownProfile` for unknown names and `InvalidParam` when
/// `params` cannot be resolved against the requested layout.
///
/// ```
/// use inkplan::fit::{FitMode, FitTarget, validate_fit};
/// use inkplan::params::TemplateParams;
/// use inkplan::profile::ProfileRegistry;
///
/// let report = validate_fit(
///     ProfileRegistry::builtin(),
///     "palma",
///     Some("full"),
///     FitTarget::Planner,
///     &TemplateParams::EMPTY,
///     FitMode::Fallback,
/// )
/// .unwrap();
/// assert_eq!(report.result.layout().unwrap().name, "compact");
/// ```
pub fn validate_fit(
    registry: &ProfileRegistry,
    device_name: &str,
    layout_name: Option<&str>,
    target: FitTarget,
    params: &TemplateParams,
    mode: FitMode,
) -> Result<FitReport> {
    let device = registry.resolve_device(device_name)?;
    let requested = match (layout_name, target) {
        (Some(name), _) => registry.resolve_layout(name)?,
        (None, FitTarget::Planner) => registry.default_layout(device)?,
        (None, FitTarget::Template(_)) => registry.default_template_layout(device)?,
    };

    let issues = check_layout(device, requested, target, params)?;
    let result = if issues.is_empty() {
        FitResult::Fits { layout: requested }
    } else if mode == FitMode::Strict {
        let details: Vec<String> = issues.iter().map(|i| i.to_string()).collect();
        FitResult::Rejected {
            reason: format!(
                "{} does not fit {}: {}",
                requested.name,
                device.key,
                details.join("; ")
            ),
        }
    } else {
        // A candidate whose defaults conflict with explicit params cannot fit
        let chosen = registry
            .fallback_candidates(requested)
            .iter()
            .skip(1)
            .find(|candidate| {
                check_layout(device, candidate, target, params)
                    .map(|issues| issues.is_empty())
                    .unwrap_or(false)
            });
        match chosen {
            Some(layout) => FitResult::Fallback {
                layout,
                reason: format!("{} failed min-cell; degraded to {}", requested.name, layout.name),
            },
            None => FitResult::Rejected {
                reason: NO_LAYOUT_FITS.to_string(),
            },
        }
    };

    Ok(FitReport {
        device: device.key,
        requested: requested.name,
        target,
        result,
        issues,
    })
}

/// Every failed check for one device, layout and target.
pub fn check_layout(
    device: &DeviceProfile,
    layout: &LayoutProfile,
    target: FitTarget,
    params: &TemplateParams,
) -> Result<Vec<FitIssue>> {
    let resolved = params.resolve(device, layout)?;
    let mut checks = Checks::new(device)?;
    frame_checks(&mut checks, &PlannerFrame::new(device, layout)?, &resolved)?;
    if let FitTarget::Template(kind) = target {
        template_checks(&mut checks, kind, device, layout, &resolved)?;
    }
    Ok(checks.issues)
}

struct Checks {
    cell: f64,
    tap: f64,
    section: f64,
    issues: Vec<FitIssue>,
}

impl Checks {
    fn new(device: &DeviceProfile) -> Result<Self> {
        let units = device.units();
        Ok(Self {
            cell: units.mm(device.min_cell_mm)?,
            tap: units.mm(device.min_tap_mm)?,
            section: units.mm(device.min_section_mm)?,
            issues: Vec::new(),
        })
    }

    fn at_least(&mut self, check: &'static str, measured: f64, limit: f64) {
        if measured + EPSILON < limit {
            self.issues.push(FitIssue {
                check,
                measured,
                limit,
                bound: Bound::AtLeast,
            });
        }
    }

    fn at_most(&mut self, check: &'static str, measured: f64, limit: f64) {
        if measured > limit + EPSILON {
            self.issues.push(FitIssue {
                check,
                measured,
                limit,
                bound: Bound::AtMost,
            });
        }
    }

    /// Records an issue and returns false for a non-positive extent.
    fn positive(&mut self, check: &'static str, measured: f64) -> bool {
        if measured <= EPSILON {
            self.issues.push(FitIssue {
                check,
                measured,
                limit: 0.0,
                bound: Bound::AtLeast,
            });
            return false;
        }
        true
    }
}

fn frame_checks(
    checks: &mut Checks,
    frame: &PlannerFrame<'_>,
    params: &ResolvedParams,
) -> Result<()> {
    let (cell, tap, section) = (checks.cell, checks.tap, checks.section);

    let grid = frame.month_grid();
    if checks.positive("month grid width", grid.width)
        & checks.positive("month grid height", grid.height)
    {
        let col = grid.width / 7.0;
        let row = grid.height / 6.0;
        checks.at_least("month cell width", col, cell);
        checks.at_least("month cell height", row, tap);
        let (badge_w, badge_h) = frame.month_badge(col);
        checks.at_least("month badge width", badge_w, tap);
        checks.at_least("month badge height", badge_h, tap);
    }

    let week = frame.week_area();
    if checks.positive("week area width", week.width)
        & checks.positive("week area height", week.height)
    {
        for segment in frame.layout.week_segments() {
            let col = week.width / segment.len().max(1) as f64;
            checks.at_least("week column width", col, cell);
            checks.at_least("week badge width", frame.week_badge_width(col), tap);
        }
    }

    let daily = frame.daily_area();
    if checks.positive("daily area width", daily.width)
        & checks.positive("daily area height", daily.height)
    {
        let sections = frame.daily_sections();
        if frame.layout.daily.show_schedule {
            checks.at_least("daily schedule width", sections.schedule.width, section);
            checks.at_least("daily notes width", sections.notes.width, section);
            checks.at_least(
                "schedule writing width",
                sections.schedule.width - SCHEDULE_LABEL_WIDTH,
                tap,
            );
            let rows = params.schedule_row_count() as f64;
            checks.at_least("daily schedule row height", sections.schedule.height / rows, tap);
        } else if frame.layout.daily.show_priorities {
            checks.at_least("daily section width", daily.width, section);
        }
        if frame.layout.daily.show_priorities {
            let rows =
                ResolvedParams::require_rows(ParamKey::PrioritiesRows, params.priorities_rows)?;
            checks.at_least(
                "daily priority row height",
                sections.priorities.height / rows as f64,
                tap,
            );
        }
    }
    Ok(())
}

fn template_checks(
    checks: &mut Checks,
    kind: TemplateKind,
    device: &DeviceProfile,
    layout: &LayoutProfile,
    params: &ResolvedParams,
) -> Result<()> {
    let units = device.units();
    let tap = checks.tap;
    let body = PageRegions::for_template(device, params)?.body;
    if !(checks.positive("template body width", body.width)
        & checks.positive("template body height", body.height))
    {
        return Ok(());
    }

    let fill_pitch = |fill: NotesFill| -> Result<(&'static str, f64)> {
        Ok(match fill {
            NotesFill::Lines => ("line spacing", units.mm(params.line_spacing_mm)?),
            NotesFill::Grid => ("grid spacing", units.mm(params.grid_spacing_mm)?),
            NotesFill::DottedGrid => ("dot spacing", units.mm(params.dot_spacing_mm)?),
            NotesFill::Millimeter => ("major line spacing", units.mm(MILLIMETER_MAJOR_MM)?),
        })
    };

    match kind {
        TemplateKind::Lines => {
            let (check, pitch) = fill_pitch(NotesFill::Lines)?;
            checks.at_least(check, pitch, tap);
        }
        TemplateKind::Grid => {
            let (check, pitch) = fill_pitch(NotesFill::Grid)?;
            checks.at_least(check, pitch, tap);
        }
        TemplateKind::DottedGrid => {
            let (check, pitch) = fill_pitch(NotesFill::DottedGrid)?;
            checks.at_least(check, pitch, tap);
        }
        TemplateKind::Millimeter => {
            let (check, pitch) = fill_pitch(NotesFill::Millimeter)?;
            checks.at_least(check, pitch, tap);
        }
        TemplateKind::Notes => {
            let (check, pitch) = fill_pitch(params.notes_fill)?;
            checks.at_least(check, pitch, tap);
        }
        TemplateKind::Schedule => {
            let rows = params.schedule_row_count() as f64;
            checks.at_least("schedule row height", body.height / rows, tap);
        }
        TemplateKind::TaskList => {
            let rows =
                ResolvedParams::require_rows(ParamKey::ChecklistRows, params.checklist_rows)?;
            checks.at_most("checklist rows", rows as f64, layout.max_rows as f64);
            checks.at_least("checklist row height", body.height / rows as f64, tap);
        }
        TemplateKind::DayAtGlance => {
            let metrics = GlanceMetrics::compute(params, &units, body)?;
            checks.at_least("day-at-glance row pitch", metrics.pitch, tap);
            let max_rows = layout.max_rows as f64;
            checks.at_most("priorities rows", metrics.priorities_rows as f64, max_rows);
            checks.at_most("checklist rows", metrics.checklist_rows as f64, max_rows);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fit(device: &str, layout: &str, target: FitTarget, mode: FitMode) -> FitReport {
        validate_fit(
            ProfileRegistry::builtin(),
            device,
            Some(layout),
            target,
            &TemplateParams::EMPTY,
            mode,
        )
        .unwrap()
    }

    #[test]
    fn test_remarkable_full_planner_fits() {
        let report = fit("remarkable", "full", FitTarget::Planner, FitMode::Fallback);
        assert!(matches!(report.result, FitResult::Fits { layout } if layout.name == "full"));
        assert!(report.issues.is_empty());
    }

    #[test]
    fn test_palma_full_degrades_to_compact() {
        let report = fit("palma", "full", FitTarget::Planner, FitMode::Fallback);
        match &report.result {
            FitResult::Fallback { layout, reason } => {
                assert_eq!(layout.name, "compact");
                assert_eq!(reason, "full failed min-cell; degraded to compact");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(report.issues.iter().any(|i| i.check == "week column width"));
    }

    #[test]
    fn test_strict_mode_rejects() {
        let report = fit("palma", "full", FitTarget::Planner, FitMode::Strict);
        match report.result {
            FitResult::Rejected { reason } => assert!(reason.contains("month cell width")),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_into_layout_maps_rejection_to_error() {
        let report = fit("palma", "balanced", FitTarget::Planner, FitMode::Strict);
        assert!(matches!(report.result.into_layout(), Err(InkplanError::Rejected(_))));
    }

    #[test]
    fn test_unknown_names() {
        let registry = ProfileRegistry::builtin();
        let err = validate_fit(
            registry,
            "kobo",
            None,
            FitTarget::Planner,
            &TemplateParams::EMPTY,
            FitMode::Fallback,
        )
        .unwrap_err();
        assert!(matches!(err, InkplanError::UnknownProfile(_)));
    }

    #[test]
    fn test_default_layouts_used_when_unspecified() {
        let registry = ProfileRegistry::builtin();
        let report = validate_fit(
            registry,
            "remarkable",
            None,
            FitTarget::Template(TemplateKind::Lines),
            &TemplateParams::EMPTY,
            FitMode::Strict,
        )
        .unwrap();
        assert_eq!(report.requested, "balanced");
    }

    #[test]
    fn test_row_cap_triggers_fallback() {
        let registry = ProfileRegistry::builtin();
        let params = TemplateParams::from_pairs([("checklist_rows", "17")]).unwrap();
        let report = validate_fit(
            registry,
            "remarkable",
            Some("full"),
            FitTarget::Template(TemplateKind::TaskList),
            &params,
            FitMode::Fallback,
        )
        .unwrap();
        assert_eq!(report.result.layout().unwrap().name, "balanced");
        assert_eq!(report.issues[0].check, "checklist rows");
        assert_eq!(report.issues[0].bound, Bound::AtMost);
    }

    #[test]
    fn test_nothing_fits() {
        let registry = ProfileRegistry::builtin();
        let params = TemplateParams::from_pairs([("checklist_rows", "500")]).unwrap();
        let report = validate_fit(
            registry,
            "scribe",
            Some("full"),
            FitTarget::Template(TemplateKind::TaskList),
            &params,
            FitMode::Fallback,
        )
        .unwrap();
        assert!(matches!(
            report.result,
            FitResult::Rejected { ref reason } if reason == NO_LAYOUT_FITS
        ));
    }

    #[test]
    fn test_zero_rows_is_an_error_not_a_rejection() {
        let registry = ProfileRegistry::builtin();
        let params = TemplateParams::from_pairs([("checklist_rows", "0")]).unwrap();
        let err = validate_fit(
            registry,
            "scribe",
            Some("full"),
            FitTarget::Template(TemplateKind::TaskList),
            &params,
            FitMode::Fallback,
        )
        .unwrap_err();
        assert!(matches!(err, InkplanError::InvalidParam { .. }));
    }

    #[test]
    fn test_target_parse() {
        assert_eq!("planner".parse::<FitTarget>().unwrap(), FitTarget::Planner);
        assert_eq!(
            "todo-list".parse::<FitTarget>().unwrap(),
            FitTarget::Template(TemplateKind::TaskList)
        );
        assert!("poster".parse::<FitTarget>().is_err());
    }

    #[test]
    fn test_report_serializes_layout_by_name() {
        let report = fit("palma", "full", FitTarget::Planner, FitMode::Fallback);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["result"]["status"], "fallback");
        assert_eq!(json["result"]["layout"], "compact");
        assert_eq!(json["target"], "planner");
    }
}
