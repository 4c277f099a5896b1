//! Day-at-a-glance: schedule, priorities and checklist stacked on one page.
//!
//! ```text
//! ┌────────────────────────┐
//! │ SCHEDULE        (band) │
//! │ 06:00 ──────────────── │
//! │ ...                    │
//! │ PRIORITIES      (band) │
//! │ ☐ ──────────────────── │
//! │ CHECKLIST       (band) │
//! │ ☐ ──────────────────── │
//! └────────────────────────┘
//! ```
//!
//! All three sections share one row pitch:
//! `pitch = (height - 3 * band) / (hours + priorities + checklist)`.

use crate::error::Result;
use crate::geometry::{GeometryNode, Point, Rect, TextRole};
use crate::params::{ParamKey, ResolvedParams};
use crate::units::Units;

use super::rows::{checklist_rows, hour_rows};
use super::TemplateKind;

/// Height of a section label band.
pub const LABEL_BAND_MM: f64 = 6.0;

const LABEL_FONT_PT: f64 = 10.0;

/// Section order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Arrangement {
    /// Schedule, priorities, checklist
    #[default]
    Standard,
    /// Priorities first, for small screens
    Compact,
}

/// Label band height and shared row pitch for a body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlanceMetrics {
    pub band: f64,
    pub pitch: f64,
    pub schedule_rows: u32,
    pub priorities_rows: u32,
    pub checklist_rows: u32,
}

impl GlanceMetrics {
    /// Fails with `InvalidParam` when priorities or checklist rows are zero
    /// or above [`MAX_ROW_COUNT`](crate::params::MAX_ROW_COUNT).
    pub fn compute(params: &ResolvedParams, units: &Units, body: Rect) -> Result<Self> {
        let priorities_rows =
            ResolvedParams::require_rows(ParamKey::PrioritiesRows, params.priorities_rows)?;
        let checklist_rows =
            ResolvedParams::require_rows(ParamKey::ChecklistRows, params.checklist_rows)?;
        let schedule_rows = params.schedule_row_count();
        // Bands never take more than half the body
        let band = units.mm(LABEL_BAND_MM)?.min(body.height / 6.0);
        let total =
            f64::from(schedule_rows) + f64::from(priorities_rows) + f64::from(checklist_rows);
        Ok(Self {
            band,
            pitch: (body.height - 3.0 * band) / total,
            schedule_rows,
            priorities_rows,
            checklist_rows,
        })
    }
}

pub(super) fn day_at_glance(
    params: &ResolvedParams,
    units: &Units,
    body: Rect,
) -> Result<GeometryNode> {
    day_at_glance_arranged(params, units, body, Arrangement::Standard)
}

/// Day-at-glance body with an explicit section order.
pub fn day_at_glance_arranged(
    params: &ResolvedParams,
    units: &Units,
    body: Rect,
    arrangement: Arrangement,
) -> Result<GeometryNode> {
    params.validate()?;
    let metrics = GlanceMetrics::compute(params, units, body)?;
    let font = units.font_pt(LABEL_FONT_PT)?.min(metrics.band);

    let sections = match arrangement {
        Arrangement::Standard => [Section::Schedule, Section::Priorities, Section::Checklist],
        Arrangement::Compact => [Section::Priorities, Section::Schedule, Section::Checklist],
    };

    let mut children = Vec::with_capacity(sections.len());
    let mut rest = body;
    for section in sections {
        let rows = section.rows(&metrics);
        let (frame, remaining) = rest.split_top(metrics.band + rows as f64 * metrics.pitch);
        rest = remaining;
        let (band, area) = frame.split_top(metrics.band);

        let mut nodes = vec![GeometryNode::text(
            Point::new(band.x, band.y + band.height / 2.0),
            section.title(),
            TextRole::Label,
            font,
        )];
        nodes.extend(match section {
            Section::Schedule => hour_rows(area, params.schedule_hours(), units)?,
            Section::Priorities => checklist_rows(area, rows, "priority", units)?,
            Section::Checklist => checklist_rows(area, rows, "task", units)?,
        });
        children.push(GeometryNode::group(section.name(), frame, nodes));
    }

    Ok(GeometryNode::group(TemplateKind::DayAtGlance.as_str(), body, children))
}

#[derive(Debug, Clone, Copy)]
enum Section {
    Schedule,
    Priorities,
    Checklist,
}

impl Section {
    fn name(&self) -> &'static str {
        match self {
            Section::Schedule => "schedule",
            Section::Priorities => "priorities",
            Section::Checklist => "checklist",
        }
    }

    fn title(&self) -> &'static str {
        match self {
            Section::Schedule => "SCHEDULE",
            Section::Priorities => "PRIORITIES",
            Section::Checklist => "CHECKLIST",
        }
    }

    fn rows(&self, metrics: &GlanceMetrics) -> u32 {
        match self {
            Section::Schedule => metrics.schedule_rows,
            Section::Priorities => metrics.priorities_rows,
            Section::Checklist => metrics.checklist_rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InkplanError;
    use crate::geometry::EPSILON;
    use crate::profile::LayoutProfile;

    fn params() -> ResolvedParams {
        ResolvedParams {
            schedule_start_hour: 8,
            schedule_end_hour: 17,
            priorities_rows: 5,
            checklist_rows: 10,
            ..LayoutProfile::FULL.template_defaults
        }
    }

    #[test]
    fn test_metrics_reject_oversized_rows_without_overflow() {
        let units = Units::new(226, 1.0);
        let body = Rect::new(0.0, 100.0, 1000.0, 1500.0);
        let huge = ResolvedParams {
            priorities_rows: u32::MAX,
            checklist_rows: u32::MAX,
            ..params()
        };
        let err = GlanceMetrics::compute(&huge, &units, body).unwrap_err();
        assert!(matches!(err, InkplanError::InvalidParam { .. }));
    }

    #[test]
    fn test_sections_stack_in_order() {
        let units = Units::new(226, 1.0);
        let body = Rect::new(0.0, 100.0, 1000.0, 1500.0);
        let group = day_at_glance(&params(), &units, body).unwrap();
        let labels: Vec<&str> = group.child_groups().filter_map(|g| g.label()).collect();
        assert_eq!(labels, vec!["schedule", "priorities", "checklist"]);

        let frames: Vec<Rect> = group.child_groups().filter_map(|g| g.frame()).collect();
        assert!((frames[0].y - body.y).abs() < EPSILON);
        assert!((frames[1].y - frames[0].bottom()).abs() < EPSILON);
        assert!((frames[2].bottom() - body.bottom()).abs() < 1e-6);
    }

    #[test]
    fn test_shared_pitch() {
        let units = Units::new(226, 1.0);
        let body = Rect::new(0.0, 0.0, 1000.0, 1500.0);
        let metrics = GlanceMetrics::compute(&params(), &units, body).unwrap();
        // 10 hours + 5 priorities + 10 tasks
        let expected = (1500.0 - 3.0 * metrics.band) / 25.0;
        assert!((metrics.pitch - expected).abs() < EPSILON);

        let group = day_at_glance(&params(), &units, body).unwrap();
        let hour = group.find_group("08:00").unwrap().frame().unwrap();
        let task = group.find_group("task 1").unwrap().frame().unwrap();
        assert!((hour.height - metrics.pitch).abs() < 1e-6);
        assert!((task.height - metrics.pitch).abs() < 1e-6);
    }

    #[test]
    fn test_compact_arrangement_puts_priorities_first() {
        let units = Units::new(300, 0.75);
        let body = Rect::new(0.0, 0.0, 700.0, 1400.0);
        let group = day_at_glance_arranged(&params(), &units, body, Arrangement::Compact).unwrap();
        assert_eq!(group.child_groups().next().and_then(|g| g.label()), Some("priorities"));
    }

    #[test]
    fn test_zero_priorities_rejected() {
        let units = Units::new(226, 1.0);
        let params = ResolvedParams {
            priorities_rows: 0,
            ..params()
        };
        assert!(matches!(
            day_at_glance(&params, &units, Rect::new(0.0, 0.0, 100.0, 100.0)),
            Err(InkplanError::InvalidParam { .. })
        ));
    }
}
