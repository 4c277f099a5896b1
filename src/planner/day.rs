//! Daily page body.
//!
//! Full and balanced layouts: schedule column on the left, priorities above a
//! notes grid on the right. Compact: one full-width notes grid.

use crate::calendar::CalendarDate;
use crate::error::Result;
use crate::geometry::{GeometryNode, Rect};
use crate::params::{ParamKey, ResolvedParams};
use crate::template::rows::{checklist_rows, hour_rows};
use crate::template::ruled::grid_lines;

use super::frame::{DAILY_SECTION_GAP, PRIORITIES_SHARE, PlannerFrame};

pub fn day_body(
    frame: &PlannerFrame<'_>,
    params: &ResolvedParams,
    date: CalendarDate,
) -> Result<GeometryNode> {
    let daily = &frame.layout.daily;
    let units = frame.device.units();

    let (schedule, priorities, notes) = if daily.show_schedule {
        let sections = frame.daily_sections();
        (
            Some(sections.schedule),
            daily.show_priorities.then_some(sections.priorities),
            sections.notes,
        )
    } else if daily.show_priorities {
        let area = frame.daily_area();
        let (top, rest) = area.split_top(area.height * PRIORITIES_SHARE);
        let (_, notes) = rest.split_top(DAILY_SECTION_GAP);
        (None, Some(top), notes)
    } else {
        (None, None, frame.daily_area())
    };

    let mut children = Vec::with_capacity(3);
    if let Some(rect) = schedule {
        let mut nodes = vec![GeometryNode::RectStroke { rect }];
        nodes.extend(hour_rows(rect, params.schedule_hours(), &units)?);
        children.push(GeometryNode::group("schedule", rect, nodes));
    }
    if let Some(rect) = priorities {
        let rows = ResolvedParams::require_rows(ParamKey::PrioritiesRows, params.priorities_rows)?;
        children.push(GeometryNode::group(
            "priorities",
            rect,
            checklist_rows(rect, rows, "priority", &units)?,
        ));
    }
    children.push(notes_grid(frame, notes)?);

    Ok(GeometryNode::group(date.iso_string(), frame.regions.body, children))
}

fn notes_grid(frame: &PlannerFrame<'_>, rect: Rect) -> Result<GeometryNode> {
    let step = frame.device.units().mm(frame.layout.daily.notes_grid_step_mm)?;
    let mut nodes = vec![GeometryNode::RectStroke { rect }];
    nodes.extend(grid_lines(rect, step, false));
    Ok(GeometryNode::group("notes", rect, nodes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::TemplateParams;
    use crate::profile::{DeviceProfile, LayoutProfile};

    fn build(device: &DeviceProfile, layout: &LayoutProfile) -> GeometryNode {
        let frame = PlannerFrame::new(device, layout).unwrap();
        let params = TemplateParams::EMPTY.resolve(device, layout).unwrap();
        let date = CalendarDate::new(2025, 3, 14).unwrap();
        day_body(&frame, &params, date).unwrap()
    }

    #[test]
    fn test_full_day_sections() {
        let body = build(&DeviceProfile::REMARKABLE, &LayoutProfile::FULL);
        assert_eq!(body.label(), Some("2025-03-14"));
        let labels: Vec<&str> = body.child_groups().filter_map(|g| g.label()).collect();
        assert_eq!(labels, vec!["schedule", "priorities", "notes"]);
        // 06:00 through 22:00
        let schedule = body.find_group("schedule").unwrap();
        assert_eq!(schedule.child_groups().count(), 17);
        let priorities = body.find_group("priorities").unwrap();
        assert_eq!(priorities.child_groups().count(), 5);
    }

    #[test]
    fn test_compact_day_is_notes_only() {
        let body = build(&DeviceProfile::PALMA, &LayoutProfile::COMPACT);
        let labels: Vec<&str> = body.child_groups().filter_map(|g| g.label()).collect();
        assert_eq!(labels, vec!["notes"]);
        let frame = PlannerFrame::new(&DeviceProfile::PALMA, &LayoutProfile::COMPACT).unwrap();
        assert_eq!(body.find_group("notes").unwrap().frame(), Some(frame.daily_area()));
    }

    #[test]
    fn test_sections_inside_body() {
        let body = build(&DeviceProfile::SCRIBE, &LayoutProfile::BALANCED);
        let frame = body.frame().unwrap();
        for group in body.child_groups() {
            assert!(frame.contains(&group.frame().unwrap()), "{:?}", group.label());
        }
    }
}
