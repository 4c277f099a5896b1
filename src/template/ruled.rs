//! Ruled fills: lines, grid, dots, millimeter paper and notes.
//!
//! The fill helpers are shared with the planner's notes areas.

use crate::error::Result;
use crate::geometry::{GeometryNode, Point, Rect, Stroke, step_positions};
use crate::params::{NotesFill, ResolvedParams};
use crate::units::Units;

use super::TemplateKind;

/// Horizontal inset of notes rules from the border, in points.
const NOTES_LINE_PADDING_PT: f64 = 8.0;

/// Every n-th millimeter line is major.
pub const MAJOR_EVERY: usize = 5;

// ============================================================================
// FILLS
// ============================================================================

/// Horizontal rules every `step` below the top edge. The top edge itself is
/// not ruled; a rule landing exactly on the bottom edge is.
pub fn rule_lines(area: Rect, step: f64, padding: f64) -> Vec<GeometryNode> {
    step_positions(area.y, area.bottom(), step, false, true)
        .into_iter()
        .map(|y| GeometryNode::hline(area.x + padding, area.right() - padding, y, Stroke::Rule))
        .collect()
}

/// Vertical then horizontal grid lines. With `edges`, lines on the area's
/// own edges are included.
pub fn grid_lines(area: Rect, step: f64, edges: bool) -> Vec<GeometryNode> {
    let xs = step_positions(area.x, area.right(), step, edges, edges);
    let ys = step_positions(area.y, area.bottom(), step, edges, edges);
    let verticals = xs
        .into_iter()
        .map(|x| GeometryNode::vline(x, area.y, area.bottom(), Stroke::Minor));
    let horizontals = ys
        .into_iter()
        .map(|y| GeometryNode::hline(area.x, area.right(), y, Stroke::Minor));
    verticals.chain(horizontals).collect()
}

/// Dots at grid intersections, row by row.
pub fn grid_dots(area: Rect, step: f64, radius: f64, edges: bool) -> Vec<GeometryNode> {
    let xs = step_positions(area.x, area.right(), step, edges, edges);
    let ys = step_positions(area.y, area.bottom(), step, edges, edges);
    ys.iter()
        .flat_map(|&y| {
            xs.iter().map(move |&x| GeometryNode::Dot {
                center: Point::new(x, y),
                radius,
            })
        })
        .collect()
}

/// Millimeter paper as two groups, `minor` then `major`.
///
/// Lines are counted from the area's left and top edges; every fifth line
/// belongs to the major family and is absent from the minor one.
pub fn millimeter_families(area: Rect, units: &Units) -> Result<Vec<GeometryNode>> {
    let step = units.mm(1.0)?;
    let xs = step_positions(area.x, area.right(), step, false, false);
    let ys = step_positions(area.y, area.bottom(), step, false, false);

    let mut minor = Vec::new();
    let mut major = Vec::new();
    let verticals = xs
        .iter()
        .enumerate()
        .map(|(i, &x)| (i, GeometryNode::vline(x, area.y, area.bottom(), Stroke::Minor)));
    let horizontals = ys
        .iter()
        .enumerate()
        .map(|(i, &y)| (i, GeometryNode::hline(area.x, area.right(), y, Stroke::Minor)));
    for (i, mut line) in verticals.chain(horizontals) {
        if (i + 1) % MAJOR_EVERY == 0 {
            if let GeometryNode::Line { stroke, .. } = &mut line {
                *stroke = Stroke::Major;
            }
            major.push(line);
        } else {
            minor.push(line);
        }
    }

    Ok(vec![
        GeometryNode::group("minor", area, minor),
        GeometryNode::group("major", area, major),
    ])
}

/// Fill an area per `fill`, wrapped in a group labelled with the fill name.
pub fn notes_fill(
    fill: NotesFill,
    params: &ResolvedParams,
    units: &Units,
    area: Rect,
) -> Result<GeometryNode> {
    let children = match fill {
        NotesFill::Lines => {
            let padding = units.pt(NOTES_LINE_PADDING_PT)?.min(area.width / 2.0);
            rule_lines(area, units.mm(params.line_spacing_mm)?, padding)
        }
        NotesFill::Grid => grid_lines(area, units.mm(params.grid_spacing_mm)?, false),
        NotesFill::DottedGrid => grid_dots(
            area,
            units.mm(params.dot_spacing_mm)?,
            units.mm(params.dot_radius_mm)?,
            false,
        ),
        NotesFill::Millimeter => millimeter_families(area, units)?,
    };
    Ok(GeometryNode::group(fill.as_str(), area, children))
}

// ============================================================================
// TEMPLATES
// ============================================================================

pub(super) fn lines(params: &ResolvedParams, units: &Units, body: Rect) -> Result<GeometryNode> {
    let step = units.mm(params.line_spacing_mm)?;
    Ok(GeometryNode::group(TemplateKind::Lines.as_str(), body, rule_lines(body, step, 0.0)))
}

pub(super) fn grid(params: &ResolvedParams, units: &Units, body: Rect) -> Result<GeometryNode> {
    let step = units.mm(params.grid_spacing_mm)?;
    Ok(GeometryNode::group(TemplateKind::Grid.as_str(), body, grid_lines(body, step, true)))
}

pub(super) fn dotted_grid(
    params: &ResolvedParams,
    units: &Units,
    body: Rect,
) -> Result<GeometryNode> {
    let step = units.mm(params.dot_spacing_mm)?;
    let radius = units.mm(params.dot_radius_mm)?;
    Ok(GeometryNode::group(
        TemplateKind::DottedGrid.as_str(),
        body,
        grid_dots(body, step, radius, true),
    ))
}

pub(super) fn millimeter(units: &Units, body: Rect) -> Result<GeometryNode> {
    Ok(GeometryNode::group(
        TemplateKind::Millimeter.as_str(),
        body,
        millimeter_families(body, units)?,
    ))
}

pub(super) fn notes(params: &ResolvedParams, units: &Units, body: Rect) -> Result<GeometryNode> {
    let children = vec![
        GeometryNode::RectStroke { rect: body },
        notes_fill(params.notes_fill, params, units, body)?,
    ];
    Ok(GeometryNode::group(TemplateKind::Notes.as_str(), body, children))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::EPSILON;
    use crate::profile::LayoutProfile;

    fn ys(nodes: &[GeometryNode]) -> Vec<f64> {
        nodes
            .iter()
            .filter_map(|n| match n {
                GeometryNode::Line { from, .. } => Some(from.y),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_rule_lines_skip_top_keep_bottom() {
        let lines = rule_lines(Rect::new(0.0, 100.0, 50.0, 30.0), 10.0, 0.0);
        assert_eq!(ys(&lines), vec![110.0, 120.0, 130.0]);
    }

    #[test]
    fn test_rule_lines_never_partial() {
        let area = Rect::new(0.0, 0.0, 50.0, 35.0);
        let lines = rule_lines(area, 10.0, 2.0);
        assert_eq!(ys(&lines), vec![10.0, 20.0, 30.0]);
        match &lines[0] {
            GeometryNode::Line { from, to, .. } => {
                assert_eq!(from.x, 2.0);
                assert_eq!(to.x, 48.0);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_grid_includes_edges() {
        let nodes = grid_lines(Rect::new(0.0, 0.0, 20.0, 10.0), 5.0, true);
        // 5 verticals (0..=20) and 3 horizontals (0..=10)
        assert_eq!(nodes.len(), 8);
        let inner = grid_lines(Rect::new(0.0, 0.0, 20.0, 10.0), 5.0, false);
        assert_eq!(inner.len(), 3 + 1);
    }

    #[test]
    fn test_dots_at_intersections() {
        let dots = grid_dots(Rect::new(0.0, 0.0, 10.0, 10.0), 5.0, 0.5, true);
        assert_eq!(dots.len(), 9);
        assert!(
            dots.iter()
                .all(|d| matches!(d, GeometryNode::Dot { radius, .. } if *radius == 0.5))
        );
    }

    #[test]
    fn test_millimeter_major_every_fifth() {
        let units = Units::new(254, 1.0); // 10 units per mm
        let area = Rect::new(0.0, 0.0, 105.0, 0.0);
        let families = millimeter_families(area, &units).unwrap();
        let minor = &families[0];
        let major = &families[1];
        assert_eq!(minor.label(), Some("minor"));
        assert_eq!(major.label(), Some("major"));

        let major_xs: Vec<f64> = major
            .children()
            .iter()
            .filter_map(|n| match n {
                GeometryNode::Line { from, stroke: Stroke::Major, .. } => Some(from.x),
                _ => None,
            })
            .collect();
        assert_eq!(major_xs.len(), 2);
        assert!((major_xs[0] - 50.0).abs() < EPSILON);
        assert!((major_xs[1] - 100.0).abs() < EPSILON);
        // 10 lines at 10..=100 minus the 2 majors
        assert_eq!(minor.children().len(), 8);
    }

    #[test]
    fn test_notes_fill_group_label() {
        let units = Units::new(226, 1.0);
        let mut params = LayoutProfile::BALANCED.template_defaults;
        params.notes_fill = NotesFill::DottedGrid;
        let group = notes(&params, &units, Rect::new(0.0, 0.0, 400.0, 400.0)).unwrap();
        assert!(matches!(group.children()[0], GeometryNode::RectStroke { .. }));
        assert_eq!(group.children()[1].label(), Some("dotted-grid"));
    }
}
