//! Row-based templates: hourly schedule and checklist.

use std::ops::RangeInclusive;

use crate::error::{InkplanError, Result};
use crate::geometry::{GeometryNode, Point, Rect, Shade, Stroke, TextRole};
use crate::params::{MAX_ROW_COUNT, ParamKey, ResolvedParams};
use crate::units::Units;

use super::TemplateKind;

/// Shaded working hours, `[start, end)`.
pub const WORK_HOURS: std::ops::Range<u32> = 9..18;

const HOUR_COLUMN_PT: f64 = 34.0;
const HOUR_COLUMN_SHARE: f64 = 0.2;
const HOUR_FONT_PT: f64 = 9.0;
const WRITING_LEFT_PT: f64 = 6.0;
const WRITING_RIGHT_PT: f64 = 8.0;

const CHECKBOX_COLUMN_PT: f64 = 28.0;
const CHECKBOX_PT: f64 = 12.0;
const CHECKBOX_ROW_SHARE: f64 = 0.45;
const CHECKLIST_RIGHT_PT: f64 = 8.0;

/// Label of a schedule row.
pub fn hour_label(hour: u32) -> String {
    format!("{hour:02}:00")
}

/// One group per hour, top to bottom, filling `area`.
///
/// Each row holds an optional work-hours fill, the hour label and a writing
/// rule along its bottom edge.
pub fn hour_rows(
    area: Rect,
    hours: RangeInclusive<u32>,
    units: &Units,
) -> Result<Vec<GeometryNode>> {
    let count = hours.clone().count();
    let hour_column = units.pt(HOUR_COLUMN_PT)?.min(area.width * HOUR_COLUMN_SHARE);
    let left = units.pt(WRITING_LEFT_PT)?;
    let right = units.pt(WRITING_RIGHT_PT)?;
    let font = units.font_pt(HOUR_FONT_PT)?;

    let mut rows = Vec::with_capacity(count);
    for (i, hour) in hours.enumerate() {
        let row = area.row(i, count);
        let mut children = Vec::with_capacity(3);
        if WORK_HOURS.contains(&hour) {
            children.push(GeometryNode::RectFill {
                rect: row,
                shade: Shade::WorkHours,
            });
        }
        children.push(GeometryNode::text(
            Point::new(row.x + left.min(hour_column), row.y + row.height / 2.0),
            hour_label(hour),
            TextRole::Hour,
            font.min(row.height),
        ));
        let x0 = (row.x + hour_column + left).min(row.right());
        let x1 = (row.right() - right).max(x0);
        children.push(GeometryNode::hline(x0, x1, row.bottom(), Stroke::Rule));
        rows.push(GeometryNode::group(hour_label(hour), row, children));
    }
    Ok(rows)
}

/// `rows` checkbox rows filling `area`, labelled `"{prefix} {n}"`.
///
/// Fails with `InvalidParam` above [`MAX_ROW_COUNT`].
pub fn checklist_rows(
    area: Rect,
    rows: u32,
    prefix: &str,
    units: &Units,
) -> Result<Vec<GeometryNode>> {
    if rows > MAX_ROW_COUNT {
        return Err(InkplanError::invalid_param(
            ParamKey::ChecklistRows.as_str(),
            rows,
            format!("must be at most {MAX_ROW_COUNT}"),
        ));
    }
    let count = rows as usize;
    let row_height = area.height / count.max(1) as f64;
    let column = units.pt(CHECKBOX_COLUMN_PT)?.min(area.width);
    let box_size = units
        .pt(CHECKBOX_PT)?
        .min(row_height * CHECKBOX_ROW_SHARE)
        .min(column);
    let right = units.pt(CHECKLIST_RIGHT_PT)?;

    let mut nodes = Vec::with_capacity(count);
    for i in 0..count {
        let row = area.row(i, count);
        let checkbox = Rect::new(
            row.x + (column - box_size) / 2.0,
            row.y + (row.height - box_size) / 2.0,
            box_size,
            box_size,
        );
        let x0 = row.x + column;
        let x1 = (row.right() - right).max(x0);
        let children = vec![
            GeometryNode::RectStroke { rect: checkbox },
            GeometryNode::hline(x0, x1, row.bottom(), Stroke::Rule),
        ];
        nodes.push(GeometryNode::group(format!("{prefix} {}", i + 1), row, children));
    }
    Ok(nodes)
}

pub(super) fn schedule(params: &ResolvedParams, units: &Units, body: Rect) -> Result<GeometryNode> {
    let mut children = vec![GeometryNode::RectStroke { rect: body }];
    children.extend(hour_rows(body, params.schedule_hours(), units)?);
    Ok(GeometryNode::group(TemplateKind::Schedule.as_str(), body, children))
}

pub(super) fn task_list(
    params: &ResolvedParams,
    units: &Units,
    body: Rect,
) -> Result<GeometryNode> {
    let rows = ResolvedParams::require_rows(ParamKey::ChecklistRows, params.checklist_rows)?;
    Ok(GeometryNode::group(
        TemplateKind::TaskList.as_str(),
        body,
        checklist_rows(body, rows, "task", units)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::EPSILON;
    use crate::profile::LayoutProfile;

    fn params_with_hours(start: u32, end: u32) -> ResolvedParams {
        ResolvedParams {
            schedule_start_hour: start,
            schedule_end_hour: end,
            ..LayoutProfile::FULL.template_defaults
        }
    }

    fn hour_groups(node: &GeometryNode) -> Vec<&GeometryNode> {
        node.child_groups().collect()
    }

    #[test]
    fn test_checklist_rows_refuses_oversized_count() {
        let units = Units::new(226, 1.0);
        let area = Rect::new(0.0, 0.0, 800.0, 1700.0);
        let err = checklist_rows(area, u32::MAX, "task", &units).unwrap_err();
        assert!(matches!(err, InkplanError::InvalidParam { .. }));
        assert_eq!(checklist_rows(area, MAX_ROW_COUNT, "task", &units).unwrap().len(), 1000);
    }

    #[test]
    fn test_schedule_one_row_per_hour_inclusive() {
        let units = Units::new(226, 1.0);
        let body = Rect::new(0.0, 0.0, 800.0, 1700.0);
        let group = schedule(&params_with_hours(6, 22), &units, body).unwrap();
        let rows = hour_groups(&group);
        assert_eq!(rows.len(), 17);
        assert_eq!(rows[0].label(), Some("06:00"));
        assert_eq!(rows[16].label(), Some("22:00"));
        let h = rows[0].frame().unwrap().height;
        assert!((h - 100.0).abs() < EPSILON);
    }

    #[test]
    fn test_single_hour_schedule() {
        let units = Units::new(226, 1.0);
        let body = Rect::new(0.0, 0.0, 500.0, 300.0);
        let group = schedule(&params_with_hours(12, 12), &units, body).unwrap();
        let rows = hour_groups(&group);
        assert_eq!(rows.len(), 1);
        assert!((rows[0].frame().unwrap().height - 300.0).abs() < EPSILON);
    }

    #[test]
    fn test_work_hours_shaded() {
        let units = Units::new(226, 1.0);
        let body = Rect::new(0.0, 0.0, 800.0, 1700.0);
        let group = schedule(&params_with_hours(6, 22), &units, body).unwrap();
        let shaded: Vec<&str> = hour_groups(&group)
            .into_iter()
            .filter(|row| {
                row.children()
                    .iter()
                    .any(|c| matches!(c, GeometryNode::RectFill { shade: Shade::WorkHours, .. }))
            })
            .filter_map(|row| row.label())
            .collect();
        assert_eq!(shaded.first(), Some(&"09:00"));
        assert_eq!(shaded.last(), Some(&"17:00"));
        assert_eq!(shaded.len(), 9);
    }

    #[test]
    fn test_reversed_hours_rejected() {
        let units = Units::new(226, 1.0);
        let body = Rect::new(0.0, 0.0, 100.0, 100.0);
        let err = crate::template::build_template_geometry(
            TemplateKind::Schedule,
            &params_with_hours(10, 9),
            &units,
            body,
        )
        .unwrap_err();
        assert!(matches!(err, InkplanError::InvalidParam { .. }));
    }

    #[test]
    fn test_task_list_rows_and_checkboxes() {
        let units = Units::new(300, 1.0);
        let params = ResolvedParams {
            checklist_rows: 10,
            ..LayoutProfile::FULL.template_defaults
        };
        let body = Rect::new(50.0, 50.0, 1000.0, 1000.0);
        let group = task_list(&params, &units, body).unwrap();
        assert_eq!(group.child_groups().count(), 10);
        assert_eq!(group.count(|n| matches!(n, GeometryNode::RectStroke { .. })), 10);
        let first = group.children()[0].frame().unwrap();
        assert!((first.height - 100.0).abs() < EPSILON);
    }

    #[test]
    fn test_task_list_zero_rows_rejected() {
        let units = Units::new(300, 1.0);
        let params = ResolvedParams {
            checklist_rows: 0,
            ..LayoutProfile::FULL.template_defaults
        };
        assert!(matches!(
            task_list(&params, &units, Rect::new(0.0, 0.0, 100.0, 100.0)),
            Err(InkplanError::InvalidParam { .. })
        ));
    }

    #[test]
    fn test_checkbox_fits_short_rows() {
        let units = Units::new(300, 1.0);
        let rows = checklist_rows(Rect::new(0.0, 0.0, 500.0, 100.0), 10, "task", &units).unwrap();
        let size = rows[0]
            .children()
            .iter()
            .find_map(|c| match c {
                GeometryNode::RectStroke { rect } => Some(rect.width),
                _ => None,
            })
            .unwrap();
        assert!((size - 4.5).abs() < EPSILON);
    }
}
