//! Page region layout and assembly.
//!
//! ```text
//! planner page                      template page
//! ┌────┬──────────────────┐         ┌──────────────────────┐
//! │    │ header           │         │  margin              │
//! │ s  ├──────────────────┤         │ ┌──────────────────┐ │
//! │ i  │                  │         │ │ header           │ │
//! │ d  │ body             │         │ ├──────────────────┤ │
//! │ e  │                  │         │ │ body             │ │
//! │    │                  │         │ └──────────────────┘ │
//! └────┴──────────────────┘         └──────────────────────┘
//! ```

use serde::Serialize;

use super::{GeometryNode, Rect};
use crate::error::{InkplanError, Result};
use crate::params::ResolvedParams;
use crate::profile::{DeviceProfile, LayoutProfile};

/// The three non-overlapping regions of a page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageRegions {
    pub page: Rect,
    /// Zero width when the layout hides the sidebar
    pub sidebar: Rect,
    pub header: Rect,
    pub body: Rect,
}

impl PageRegions {
    /// Planner page regions: full-height sidebar on the left, header band
    /// across the remaining width, body below it.
    pub fn for_profile(device: &DeviceProfile, layout: &LayoutProfile) -> Result<Self> {
        let units = device.units();
        let (width, height) = device.page_size_units()?;
        let sidebar_width = if layout.show_sidebar {
            units.mm(device.sidebar_width_mm)?.min(width)
        } else {
            0.0
        };
        let header_height = units.mm(device.header_height_mm)?.min(height);

        let page = Rect::new(0.0, 0.0, width, height);
        let (sidebar, content) = page.split_left(sidebar_width);
        let (header, body) = content.split_top(header_height);
        Ok(Self {
            page,
            sidebar,
            header,
            body,
        })
    }

    /// Template page regions: the page inset by the margin, a header band of
    /// `header_height_mm`, body below. Templates have no sidebar.
    pub fn for_template(device: &DeviceProfile, params: &ResolvedParams) -> Result<Self> {
        let units = device.units();
        let (width, height) = device.page_size_units()?;
        let margin = units.mm(params.margin_mm)?;
        let header_height = units.mm(params.header_height_mm)?;

        let page = Rect::new(0.0, 0.0, width, height);
        let content = page.inset(margin);
        let sidebar = Rect::new(content.x, content.y, 0.0, content.height);
        let (header, body) = content.split_top(header_height);
        Ok(Self {
            page,
            sidebar,
            header,
            body,
        })
    }
}

/// Combine sidebar, header and body groups into one page group.
///
/// Fails with [`InkplanError::InvalidParam`] if an argument is not a group or
/// if two region frames overlap. Touching edges are allowed.
pub fn assemble(
    sidebar: GeometryNode,
    header: GeometryNode,
    body: GeometryNode,
) -> Result<GeometryNode> {
    let regions = [("sidebar", &sidebar), ("header", &header), ("body", &body)];
    let mut frames = Vec::with_capacity(regions.len());
    for (name, node) in regions {
        let frame = node.frame().ok_or_else(|| {
            InkplanError::invalid_param(name, "non-group node", "page regions must be groups")
        })?;
        frame.validate(name)?;
        frames.push((name, frame));
    }

    for (i, (a_name, a)) in frames.iter().enumerate() {
        for (b_name, b) in &frames[i + 1..] {
            if a.intersects(b) {
                return Err(InkplanError::invalid_param(
                    format!("{a_name}/{b_name}"),
                    format!("{a:?} / {b:?}"),
                    "page regions must not overlap",
                ));
            }
        }
    }

    let page = frames.iter().fold(frames[0].1, |acc, (_, f)| union(&acc, f));
    Ok(GeometryNode::group("page", page, vec![sidebar, header, body]))
}

fn union(a: &Rect, b: &Rect) -> Rect {
    Rect::from_edges(
        a.x.min(b.x),
        a.y.min(b.y),
        a.right().max(b.right()),
        a.bottom().max(b.bottom()),
    )
}
