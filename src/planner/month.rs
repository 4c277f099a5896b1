//! Month overview page body.
//!
//! ```text
//!        MON   TUE   WED   THU   FRI   SAT   SUN
//!  W05 ┌─────┬─────┬─────┬─────┬─────┬─────┬─────┐
//!      │     │     │     │ [1] │ [2] │ [3] │ [4] │
//!      │     │     │     │ ─── │ ─── │ ─── │ ─── │
//!  W06 ├─────┼─────┼─────┼─────┼─────┼─────┼─────┤
//!      ...  six rows regardless of month length
//! ```

use crate::calendar::{CalendarMatrix, MONTH_NAMES, Weekday};
use crate::error::Result;
use crate::geometry::{GeometryNode, Point, Rect, Stroke, TextRole};

use super::frame::{PlannerFrame, WEEKDAY_LABEL_OFFSET};

const GRID_ROWS: usize = 6;
const LABEL_FONT_PT: f64 = 9.0;
const DAY_FONT_PT: f64 = 10.0;

/// Build the month grid body for a calendar matrix.
pub fn month_body(frame: &PlannerFrame<'_>, matrix: &CalendarMatrix) -> Result<GeometryNode> {
    let layout = frame.layout;
    let units = frame.device.units();
    let grid = frame.month_grid();
    let col = grid.width / 7.0;
    let row = grid.height / GRID_ROWS as f64;
    let (badge_w, badge_h) = frame.month_badge(col);
    let label_font = units.font_pt(LABEL_FONT_PT)?;
    let day_font = units.font_pt(DAY_FONT_PT)?.min(badge_h);
    let line_margin = layout.month.writing_line_margin_px;

    let mut children = Vec::new();

    for (c, weekday) in Weekday::ALL.iter().enumerate() {
        children.push(GeometryNode::text(
            Point::new(grid.x + c as f64 * col + col / 2.0, grid.y - WEEKDAY_LABEL_OFFSET),
            weekday.short_label(),
            TextRole::Label,
            label_font,
        ));
    }

    for r in 0..GRID_ROWS {
        let week = matrix.weeks.get(r);
        for c in 0..7 {
            let cell = Rect::new(grid.x + c as f64 * col, grid.y + r as f64 * row, col, row);
            let date = week.and_then(|w| w[c].date());
            let Some(date) = date else {
                children.push(GeometryNode::RectStroke { rect: cell });
                continue;
            };

            let badge = Rect::new(cell.x, cell.y, badge_w, badge_h.min(cell.height));
            let mut nodes = vec![
                GeometryNode::RectStroke { rect: cell },
                GeometryNode::RectStroke { rect: badge },
                GeometryNode::text(
                    badge.center(),
                    date.day().to_string(),
                    TextRole::DayNumber,
                    day_font,
                ),
            ];
            if layout.month.draw_writing_line {
                let y = cell.y + cell.height / 2.0;
                let x0 = (cell.x + line_margin).min(cell.right());
                let x1 = (cell.right() - line_margin).max(x0);
                nodes.push(GeometryNode::hline(x0, x1, y, Stroke::Rule));
            }
            children.push(GeometryNode::group(date.iso_string(), cell, nodes));
        }

        if layout.month.show_week_labels {
            if let Some(first) = week.and_then(|w| w.iter().find_map(|c| c.date())) {
                let width = layout.month.week_label_width_px;
                let gap = layout.month.week_label_gap_px;
                let label = Rect::new(grid.x - width - gap, grid.y + r as f64 * row, width, row);
                children.push(GeometryNode::text(
                    label.center(),
                    format!("W{:02}", first.iso_week().1),
                    TextRole::WeekNumber,
                    label_font.min(width),
                ));
            }
        }
    }

    let name = MONTH_NAMES[(matrix.month as usize).saturating_sub(1) % 12];
    Ok(GeometryNode::group(name, frame.regions.body, children))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::build_month_matrix;
    use crate::profile::{DeviceProfile, LayoutProfile};

    fn day_groups(node: &GeometryNode) -> usize {
        node.child_groups().count()
    }

    #[test]
    fn test_one_group_per_day_and_42_cells() {
        let frame = PlannerFrame::new(&DeviceProfile::REMARKABLE, &LayoutProfile::FULL).unwrap();
        let matrix = build_month_matrix(2024, 2).unwrap();
        let body = month_body(&frame, &matrix).unwrap();
        assert_eq!(body.label(), Some("February"));
        assert_eq!(day_groups(&body), 29);
        let col = frame.month_grid().width / 7.0;
        let cells = body.count(|n| match n {
            GeometryNode::RectStroke { rect } => (rect.width - col).abs() < 1e-9,
            _ => false,
        });
        assert_eq!(cells, 42);
    }

    #[test]
    fn test_week_labels_follow_layout() {
        let matrix = build_month_matrix(2025, 6).unwrap();
        let full = PlannerFrame::new(&DeviceProfile::REMARKABLE, &LayoutProfile::FULL).unwrap();
        let compact =
            PlannerFrame::new(&DeviceProfile::REMARKABLE, &LayoutProfile::COMPACT).unwrap();
        let is_week = |n: &GeometryNode| {
            matches!(n, GeometryNode::TextAnchor { role: TextRole::WeekNumber, .. })
        };
        assert_eq!(month_body(&full, &matrix).unwrap().count(is_week), matrix.weeks.len());
        assert_eq!(month_body(&compact, &matrix).unwrap().count(is_week), 0);
    }

    #[test]
    fn test_writing_lines_only_when_enabled() {
        let matrix = build_month_matrix(2025, 6).unwrap();
        let compact =
            PlannerFrame::new(&DeviceProfile::REMARKABLE, &LayoutProfile::COMPACT).unwrap();
        let body = month_body(&compact, &matrix).unwrap();
        assert_eq!(body.count(|n| matches!(n, GeometryNode::Line { .. })), 0);
    }
}
