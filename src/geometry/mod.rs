//! # Geometry Tree
//!
//! Backend-agnostic page description. Every coordinate is in device units,
//! origin at the top-left corner of the page, y growing downward.
//!
//! ```text
//! Group "page"
//! ├── Group "sidebar"   (frame: left strip)
//! ├── Group "header"    (frame: top band)
//! └── Group "body"
//!     ├── Line { from, to, stroke }
//!     ├── RectFill { rect, shade }
//!     ├── Dot { center, radius }
//!     └── ...
//! ```
//!
//! Nodes carry no styling beyond a semantic [`Stroke`], [`Shade`] or
//! [`TextRole`]; a drawing backend maps those to pens and fonts.

pub mod assemble;

pub use assemble::{PageRegions, assemble};

use serde::{Deserialize, Serialize};

use crate::error::{InkplanError, Result};

/// Tolerance for comparing accumulated float positions.
pub const EPSILON: f64 = 1e-9;

// ============================================================================
// PRIMITIVES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle, `(x, y)` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const ZERO: Rect = Rect::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Rectangle spanning two edges on each axis.
    pub fn from_edges(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self::new(left, top, (right - left).max(0.0), (bottom - top).max(0.0))
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width <= EPSILON || self.height <= EPSILON
    }

    /// Whether the interiors overlap. Shared edges do not count.
    pub fn intersects(&self, other: &Rect) -> bool {
        let overlap_x = self.right().min(other.right()) - self.x.max(other.x);
        let overlap_y = self.bottom().min(other.bottom()) - self.y.max(other.y);
        overlap_x > EPSILON && overlap_y > EPSILON
    }

    /// Whether `other` lies entirely inside `self`.
    pub fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x - EPSILON
            && other.y >= self.y - EPSILON
            && other.right() <= self.right() + EPSILON
            && other.bottom() <= self.bottom() + EPSILON
    }

    pub fn contains_point(&self, p: Point) -> bool {
        p.x >= self.x - EPSILON
            && p.y >= self.y - EPSILON
            && p.x <= self.right() + EPSILON
            && p.y <= self.bottom() + EPSILON
    }

    /// Shrink on every side; never produces a negative size.
    pub fn inset(&self, d: f64) -> Rect {
        self.inset_xy(d, d)
    }

    pub fn inset_xy(&self, dx: f64, dy: f64) -> Rect {
        Rect::from_edges(self.x + dx, self.y + dy, self.right() - dx, self.bottom() - dy)
    }

    /// Split off a band of `height` from the top.
    pub fn split_top(&self, height: f64) -> (Rect, Rect) {
        let h = height.clamp(0.0, self.height);
        (
            Rect::new(self.x, self.y, self.width, h),
            Rect::new(self.x, self.y + h, self.width, self.height - h),
        )
    }

    /// Split off a column of `width` from the left.
    pub fn split_left(&self, width: f64) -> (Rect, Rect) {
        let w = width.clamp(0.0, self.width);
        (
            Rect::new(self.x, self.y, w, self.height),
            Rect::new(self.x + w, self.y, self.width - w, self.height),
        )
    }

    /// Row `index` of `count` equal horizontal bands.
    pub fn row(&self, index: usize, count: usize) -> Rect {
        let h = self.height / count.max(1) as f64;
        Rect::new(self.x, self.y + index as f64 * h, self.width, h)
    }

    /// Column `index` of `count` equal vertical bands.
    pub fn column(&self, index: usize, count: usize) -> Rect {
        let w = self.width / count.max(1) as f64;
        Rect::new(self.x + index as f64 * w, self.y, w, self.height)
    }

    /// Fail unless the rectangle is finite with non-negative size.
    pub fn validate(&self, name: &str) -> Result<()> {
        let finite = [self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| v.is_finite());
        if !finite || self.width < 0.0 || self.height < 0.0 {
            return Err(InkplanError::invalid_param(
                name,
                format!("{}x{}@({},{})", self.width, self.height, self.x, self.y),
                "rectangle must be finite with non-negative size",
            ));
        }
        Ok(())
    }
}

// ============================================================================
// STYLE TAGS
// ============================================================================

/// Line weight class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stroke {
    /// Region outlines
    Border,
    /// Writing lines and separators
    Rule,
    /// Fine grid lines
    Minor,
    /// Emphasized grid lines (every 5 mm on millimeter paper)
    Major,
}

/// Fill class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shade {
    WorkHours,
    Accent,
    Sidebar,
}

/// Text purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextRole {
    Title,
    Subtitle,
    Label,
    Hour,
    DayNumber,
    WeekNumber,
    Tab,
}

// ============================================================================
// NODES
// ============================================================================

/// A positioned drawable.
///
/// Serialized with a `type` tag:
///
/// ```json
/// {"type": "line", "from": {"x": 0.0, "y": 10.0}, "to": {"x": 100.0, "y": 10.0}, "stroke": "rule"}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GeometryNode {
    Line {
        from: Point,
        to: Point,
        stroke: Stroke,
    },
    RectFill {
        rect: Rect,
        shade: Shade,
    },
    RectStroke {
        rect: Rect,
    },
    Dot {
        center: Point,
        radius: f64,
    },
    TextAnchor {
        at: Point,
        text: String,
        role: TextRole,
        /// Font size in device units
        size: f64,
    },
    Group {
        label: String,
        frame: Rect,
        children: Vec<GeometryNode>,
    },
}

impl GeometryNode {
    pub fn group(label: impl Into<String>, frame: Rect, children: Vec<GeometryNode>) -> Self {
        GeometryNode::Group {
            label: label.into(),
            frame,
            children,
        }
    }

    pub fn hline(x0: f64, x1: f64, y: f64, stroke: Stroke) -> Self {
        GeometryNode::Line {
            from: Point::new(x0, y),
            to: Point::new(x1, y),
            stroke,
        }
    }

    pub fn vline(x: f64, y0: f64, y1: f64, stroke: Stroke) -> Self {
        GeometryNode::Line {
            from: Point::new(x, y0),
            to: Point::new(x, y1),
            stroke,
        }
    }

    pub fn text(at: Point, text: impl Into<String>, role: TextRole, size: f64) -> Self {
        GeometryNode::TextAnchor {
            at,
            text: text.into(),
            role,
            size,
        }
    }

    /// Group label, if this is a group.
    pub fn label(&self) -> Option<&str> {
        match self {
            GeometryNode::Group { label, .. } => Some(label),
            _ => None,
        }
    }

    /// Group frame, if this is a group.
    pub fn frame(&self) -> Option<Rect> {
        match self {
            GeometryNode::Group { frame, .. } => Some(*frame),
            _ => None,
        }
    }

    pub fn children(&self) -> &[GeometryNode] {
        match self {
            GeometryNode::Group { children, .. } => children,
            _ => &[],
        }
    }

    /// Depth-first, pre-order visit of this node and every descendant.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a GeometryNode)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }

    /// Number of nodes in the subtree matching `pred`.
    pub fn count(&self, pred: impl Fn(&GeometryNode) -> bool) -> usize {
        let mut n = 0;
        self.walk(&mut |node| {
            if pred(node) {
                n += 1;
            }
        });
        n
    }

    /// First group in the subtree with the given label.
    pub fn find_group(&self, label: &str) -> Option<&GeometryNode> {
        let mut found = None;
        self.walk(&mut |node| {
            if found.is_none() && node.label() == Some(label) {
                found = Some(node);
            }
        });
        found
    }

    /// Direct child groups.
    pub fn child_groups(&self) -> impl Iterator<Item = &GeometryNode> {
        self.children()
            .iter()
            .filter(|c| matches!(c, GeometryNode::Group { .. }))
    }
}

// ============================================================================
// STEP POSITIONS
// ============================================================================

/// Evenly spaced positions from `start` toward `end`.
///
/// `start` is emitted only with `include_start`; `end` only when a step lands
/// on it (within tolerance) and `include_end` is set. A step that would
/// overshoot `end` is never emitted, so no partial line is drawn.
///
/// ```
/// use inkplan::geometry::step_positions;
///
/// assert_eq!(step_positions(0.0, 10.0, 2.5, true, true), vec![0.0, 2.5, 5.0, 7.5, 10.0]);
/// assert_eq!(step_positions(0.0, 10.0, 3.0, false, true), vec![3.0, 6.0, 9.0]);
/// ```
pub fn step_positions(
    start: f64,
    end: f64,
    step: f64,
    include_start: bool,
    include_end: bool,
) -> Vec<f64> {
    if step <= 0.0 || !step.is_finite() || end < start {
        return Vec::new();
    }
    let epsilon = step * EPSILON;
    let first = if include_start { 0 } else { 1 };
    let mut positions = Vec::new();
    let mut k = first;
    loop {
        // Multiply rather than accumulate to keep long runs exact
        let pos = start + k as f64 * step;
        if pos < end - epsilon || (include_end && (pos - end).abs() <= epsilon) {
            positions.push(pos);
            k += 1;
        } else {
            break;
        }
    }
    positions
}
