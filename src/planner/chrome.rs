//! Sidebar, header and cover.

use crate::calendar::MONTH_ABBREVIATIONS;
use crate::error::Result;
use crate::geometry::{GeometryNode, Point, Rect, Shade, Stroke, TextRole, assemble};

use super::frame::PlannerFrame;

const TAB_FONT_PT: f64 = 9.0;
const TITLE_FONT_PT: f64 = 18.0;
const SUBTITLE_FONT_PT: f64 = 10.0;
const COVER_FONT_PT: f64 = 48.0;
/// Header text inset, device pixels
const HEADER_INSET: f64 = 24.0;
const COVER_INSET: f64 = 40.0;

/// Month navigation strip: twelve tabs, the active one accented.
///
/// A hidden sidebar (zero width) is an empty group.
pub fn sidebar(frame: &PlannerFrame<'_>, active_month: Option<u32>) -> Result<GeometryNode> {
    let rect = frame.regions.sidebar;
    if rect.is_empty() {
        return Ok(GeometryNode::group("sidebar", rect, Vec::new()));
    }

    let font = frame.device.units().font_pt(TAB_FONT_PT)?;
    let mut children = vec![GeometryNode::RectFill {
        rect,
        shade: Shade::Sidebar,
    }];
    for (i, name) in MONTH_ABBREVIATIONS.iter().enumerate() {
        let tab = rect.row(i, MONTH_ABBREVIATIONS.len());
        let mut nodes = Vec::with_capacity(3);
        if active_month == Some(i as u32 + 1) {
            nodes.push(GeometryNode::RectFill {
                rect: tab,
                shade: Shade::Accent,
            });
        }
        nodes.push(GeometryNode::RectStroke { rect: tab });
        nodes.push(GeometryNode::text(tab.center(), *name, TextRole::Tab, font.min(tab.height)));
        children.push(GeometryNode::group(*name, tab, nodes));
    }
    Ok(GeometryNode::group("sidebar", rect, children))
}

/// Title band with a rule along its bottom edge.
pub fn header(frame: &PlannerFrame<'_>, title: &str, subtitle: &str) -> Result<GeometryNode> {
    let rect = frame.regions.header;
    let units = frame.device.units();
    let inset = HEADER_INSET.min(rect.width / 2.0);
    let children = vec![
        GeometryNode::text(
            Point::new(rect.x + inset, rect.y + rect.height * 0.4),
            title,
            TextRole::Title,
            units.font_pt(TITLE_FONT_PT)?.min(rect.height / 2.0),
        ),
        GeometryNode::text(
            Point::new(rect.x + inset, rect.y + rect.height * 0.75),
            subtitle,
            TextRole::Subtitle,
            units.font_pt(SUBTITLE_FONT_PT)?.min(rect.height / 4.0),
        ),
        GeometryNode::hline(rect.x, rect.right(), rect.bottom(), Stroke::Border),
    ];
    Ok(GeometryNode::group("header", rect, children))
}

/// Assemble a planner page from its chrome and a body group.
pub fn page(
    frame: &PlannerFrame<'_>,
    active_month: Option<u32>,
    title: &str,
    subtitle: &str,
    body: GeometryNode,
) -> Result<GeometryNode> {
    assemble(sidebar(frame, active_month)?, header(frame, title, subtitle)?, body)
}

/// Cover body: the year, centered in a bordered panel.
pub fn cover_body(frame: &PlannerFrame<'_>, year: i32) -> Result<GeometryNode> {
    let body = frame.regions.body;
    let panel: Rect = body.inset(COVER_INSET);
    let size = frame.device.units().font_pt(COVER_FONT_PT)?.min(panel.height);
    let children = vec![
        GeometryNode::RectStroke { rect: panel },
        GeometryNode::text(panel.center(), year.to_string(), TextRole::Title, size),
    ];
    Ok(GeometryNode::group("cover", body, children))
}
