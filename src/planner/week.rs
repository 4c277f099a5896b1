//! Weekly pages and their segmentation.
//!
//! A week row of a month is drawn on one page, or under a splitting layout
//! on one page per segment:
//!
//! ```text
//! full / balanced            compact
//! ┌──┬──┬──┬──┬──┬──┬──┐     ┌────┬────┬────┬────┐  ┌─────┬─────┬─────┐
//! │MO│TU│WE│TH│FR│SA│SU│     │ MO │ TU │ WE │ TH │  │ FR  │ SA  │ SU  │
//! └──┴──┴──┴──┴──┴──┴──┘     └────┴────┴────┴────┘  └─────┴─────┴─────┘
//!        MON-SUN                    MON-THU               FRI-SUN
//! ```
//!
//! Segments without a single in-month day are dropped, so a week that only
//! touches the month on its Sunday yields just the FRI-SUN page.

use serde::Serialize;

use crate::calendar::{CalendarDate, DayCell, Weekday};
use crate::error::Result;
use crate::geometry::{GeometryNode, Point, Rect, Stroke, TextRole, step_positions};
use crate::profile::LayoutProfile;

use super::frame::{
    PlannerFrame, WEEK_LABEL_HEIGHT, WEEK_LABEL_MARGIN, WEEK_LABEL_TOP, WEEK_LINE_BOTTOM,
    WEEK_LINE_MARGIN, WEEK_LINE_STEP, WEEK_LINE_TOP,
};

const BADGE_FONT_PT: f64 = 10.0;

/// One page worth of a week row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekSegment {
    /// e.g. "MON-THU"
    pub label: String,
    pub weekdays: Vec<Weekday>,
    pub days: Vec<DayCell>,
}

impl WeekSegment {
    /// First in-month date of the segment.
    pub fn first_date(&self) -> Option<CalendarDate> {
        self.days.iter().find_map(|d| d.date())
    }
}

/// Label for a run of weekdays, `FIRST-LAST`.
pub fn segment_label(weekdays: &[Weekday]) -> String {
    match (weekdays.first(), weekdays.last()) {
        (Some(first), Some(last)) if first != last => {
            format!("{}-{}", first.short_label(), last.short_label())
        }
        (Some(only), _) => only.short_label().to_string(),
        _ => String::new(),
    }
}

/// Segments of a Monday-first month week row that contain at least one
/// in-month day.
///
/// ```
/// use inkplan::calendar::build_month_matrix;
/// use inkplan::planner::plan_week_segments;
/// use inkplan::profile::LayoutProfile;
///
/// let matrix = build_month_matrix(2024, 2).unwrap();
/// let segments = plan_week_segments(&matrix.weeks[1], &LayoutProfile::COMPACT);
/// let labels: Vec<&str> = segments.iter().map(|s| s.label.as_str()).collect();
/// assert_eq!(labels, vec!["MON-THU", "FRI-SUN"]);
/// ```
pub fn plan_week_segments(week: &[DayCell; 7], layout: &LayoutProfile) -> Vec<WeekSegment> {
    layout
        .week_segments()
        .iter()
        .filter(|indexes| indexes.iter().any(|&i| week.get(i).is_some_and(|d| !d.is_blank())))
        .map(|indexes| {
            let weekdays: Vec<Weekday> =
                indexes.iter().map(|&i| Weekday::from_monday_index(i)).collect();
            let days = indexes
                .iter()
                .map(|&i| week.get(i).copied().unwrap_or(DayCell::Blank))
                .collect();
            WeekSegment {
                label: segment_label(&weekdays),
                weekdays,
                days,
            }
        })
        .collect()
}

/// Body of one weekly page: a column per day with a badge and writing lines.
///
/// The group is labelled with the segment label.
pub fn week_body(frame: &PlannerFrame<'_>, segment: &WeekSegment) -> Result<GeometryNode> {
    let area = frame.week_area();
    let count = segment.days.len();
    let font = frame.device.units().font_pt(BADGE_FONT_PT)?;
    let line_step = WEEK_LINE_STEP * frame.layout.spacing_scale;

    let mut children = Vec::with_capacity(count);
    for (i, (day, weekday)) in segment.days.iter().zip(&segment.weekdays).enumerate() {
        let column = area.column(i, count);
        let badge = Rect::new(
            column.x + WEEK_LABEL_MARGIN,
            column.y + WEEK_LABEL_TOP,
            frame.week_badge_width(column.width).max(0.0),
            WEEK_LABEL_HEIGHT,
        );
        let text = match day.date() {
            Some(date) => format!("{} {}", weekday.short_label(), date.day()),
            None => "-".to_string(),
        };

        let mut nodes = vec![
            GeometryNode::RectStroke { rect: column },
            GeometryNode::RectStroke { rect: badge },
            GeometryNode::text(
                Point::new(badge.x, badge.y + badge.height / 2.0),
                text,
                TextRole::DayNumber,
                font.min(badge.height),
            ),
        ];

        let label = match day.date() {
            Some(date) => {
                let first = column.y + WEEK_LINE_TOP;
                let last = column.bottom() - WEEK_LINE_BOTTOM;
                let x0 = (column.x + WEEK_LINE_MARGIN).min(column.right());
                let x1 = (column.right() - WEEK_LINE_MARGIN).max(x0);
                for y in step_positions(first, last, line_step, true, true) {
                    nodes.push(GeometryNode::hline(x0, x1, y, Stroke::Rule));
                }
                date.iso_string()
            }
            None => "blank".to_string(),
        };
        children.push(GeometryNode::group(label, column, nodes));
    }

    Ok(GeometryNode::group(segment.label.clone(), frame.regions.body, children))
}
