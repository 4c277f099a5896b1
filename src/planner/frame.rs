//! Planner page frames.
//!
//! Where the month grid, week columns and daily sections sit on a page for a
//! device and layout. Both the fit validator and the page builders measure
//! from here, so a layout that passes validation is drawn with exactly the
//! sizes that were checked.
//!
//! Fixed offsets are device pixels and are not scaled by DPI, so a denser
//! screen gets proportionally thinner paddings:
//!
//! ```text
//! month grid  = body - 2 * side_padding (x), body - bottom_padding (y)
//! week area   = body - 2 * 40 (x),          body - 260 (y)
//! daily area  = body - 2 * 40 (x),          body - 90 - 110 (y)
//! ```

use crate::error::Result;
use crate::geometry::{PageRegions, Rect};
use crate::profile::{DeviceProfile, LayoutProfile};

// Week page
pub(crate) const WEEK_SIDE_PADDING: f64 = 40.0;
pub(crate) const WEEK_TOP_PADDING: f64 = 80.0;
pub(crate) const WEEK_VERTICAL_PADDING: f64 = 260.0;
pub(crate) const WEEK_LABEL_MARGIN: f64 = 8.0;
pub(crate) const WEEK_LABEL_HEIGHT: f64 = 56.0;
pub(crate) const WEEK_LABEL_TOP: f64 = 10.0;
pub(crate) const WEEK_LINE_TOP: f64 = 82.0;
pub(crate) const WEEK_LINE_BOTTOM: f64 = 16.0;
pub(crate) const WEEK_LINE_MARGIN: f64 = 8.0;
pub(crate) const WEEK_LINE_STEP: f64 = 30.0;

// Daily page
pub(crate) const DAILY_SIDE_PADDING: f64 = 40.0;
pub(crate) const DAILY_TOP_PADDING: f64 = 90.0;
pub(crate) const DAILY_BOTTOM_PADDING: f64 = 110.0;
pub(crate) const DAILY_GUTTER: f64 = 16.0;
pub(crate) const DAILY_SECTION_GAP: f64 = 28.0;
pub(crate) const SCHEDULE_LABEL_WIDTH: f64 = 42.0;
pub(crate) const PRIORITIES_SHARE: f64 = 0.25;

// Month page
pub(crate) const WEEKDAY_LABEL_OFFSET: f64 = 20.0;

/// Section rectangles of a daily page with the schedule column shown.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailySections {
    pub schedule: Rect,
    pub priorities: Rect,
    pub notes: Rect,
}

/// Page frames for one device and layout.
#[derive(Debug, Clone, Copy)]
pub struct PlannerFrame<'a> {
    pub device: &'a DeviceProfile,
    pub layout: &'a LayoutProfile,
    pub regions: PageRegions,
}

impl<'a> PlannerFrame<'a> {
    pub fn new(device: &'a DeviceProfile, layout: &'a LayoutProfile) -> Result<Self> {
        Ok(Self {
            device,
            layout,
            regions: PageRegions::for_profile(device, layout)?,
        })
    }

    /// The 6 × 7 month grid. May have non-positive size on small pages.
    pub fn month_grid(&self) -> Rect {
        let month = &self.layout.month;
        let body = self.regions.body;
        let side = month.side_padding_px;
        Rect::new(
            body.x + side,
            body.y + month.top_padding_px,
            body.width - 2.0 * side,
            self.regions.page.height - body.y - month.bottom_padding_px,
        )
    }

    /// Day badge `(width, height)` inside a month cell of `cell_width`.
    pub fn month_badge(&self, cell_width: f64) -> (f64, f64) {
        let month = &self.layout.month;
        (
            month.day_badge_max_width_px.min(cell_width),
            month.day_badge_height_px,
        )
    }

    /// Area shared by the columns of a weekly segment.
    pub fn week_area(&self) -> Rect {
        let body = self.regions.body;
        Rect::new(
            body.x + WEEK_SIDE_PADDING,
            body.y + WEEK_TOP_PADDING,
            body.width - 2.0 * WEEK_SIDE_PADDING,
            self.regions.page.height - body.y - WEEK_VERTICAL_PADDING,
        )
    }

    /// Day number badge width for a week column of `column_width`.
    pub fn week_badge_width(&self, column_width: f64) -> f64 {
        column_width - 2.0 * WEEK_LABEL_MARGIN
    }

    /// Daily page content area.
    pub fn daily_area(&self) -> Rect {
        let body = self.regions.body;
        Rect::new(
            body.x + DAILY_SIDE_PADDING,
            body.y + DAILY_TOP_PADDING,
            body.width - 2.0 * DAILY_SIDE_PADDING,
            self.regions.page.height - body.y - DAILY_TOP_PADDING - DAILY_BOTTOM_PADDING,
        )
    }

    /// Schedule column, priorities block and notes area of a full daily page.
    pub fn daily_sections(&self) -> DailySections {
        let area = self.daily_area();
        let schedule_width = area.width / 3.0;
        let gutter = DAILY_GUTTER;
        let schedule = Rect::new(area.x, area.y, schedule_width, area.height);

        let right =
            Rect::from_edges(schedule.right() + gutter, area.y, area.right(), area.bottom());
        let priorities_height = if self.layout.daily.show_priorities {
            area.height * PRIORITIES_SHARE
        } else {
            0.0
        };
        let (priorities, rest) = right.split_top(priorities_height);
        let gap = if priorities_height > 0.0 { DAILY_SECTION_GAP } else { 0.0 };
        let (_, notes) = rest.split_top(gap);
        DailySections {
            schedule,
            priorities,
            notes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remarkable_full_month_grid() {
        let frame = PlannerFrame::new(&DeviceProfile::REMARKABLE, &LayoutProfile::FULL).unwrap();
        let grid = frame.month_grid();
        // 1404 - 140 - 2 * 40
        assert!((grid.width - 1184.0).abs() < 1e-6);
        // 1872 - 160 - 150
        assert!((grid.height - 1562.0).abs() < 1e-6);
        assert!((grid.x - 180.0).abs() < 1e-6);
    }

    #[test]
    fn test_palma_compact_frames_use_unscaled_paddings() {
        let frame = PlannerFrame::new(&DeviceProfile::PALMA, &LayoutProfile::COMPACT).unwrap();

        // 824 - 2 * 40, no sidebar
        let grid = frame.month_grid();
        assert!((grid.width / 7.0 - 744.0 / 7.0).abs() < 1e-6);
        assert!((grid.width / 7.0 - 106.3).abs() < 0.05);
        // 1648 - 160 - 150
        assert!((grid.height - 1338.0).abs() < 1e-6);
        assert_eq!(frame.month_badge(106.3), (50.0, 30.0));

        // 824 - 80 and 1648 - 160 - 260
        let week = frame.week_area();
        assert!((week.width - 744.0).abs() < 1e-6);
        assert!((week.height - 1228.0).abs() < 1e-6);
        assert!((frame.week_badge_width(week.width / 4.0) - 170.0).abs() < 1e-6);

        // 1648 - 160 - 90 - 110
        let daily = frame.daily_area();
        assert!((daily.width - 744.0).abs() < 1e-6);
        assert!((daily.height - 1288.0).abs() < 1e-6);
    }

    #[test]
    fn test_paddings_match_across_devices() {
        let remarkable =
            PlannerFrame::new(&DeviceProfile::REMARKABLE, &LayoutProfile::FULL).unwrap();
        let scribe = PlannerFrame::new(&DeviceProfile::SCRIBE, &LayoutProfile::FULL).unwrap();
        let inset = |f: &PlannerFrame| f.week_area().x - f.regions.body.x;
        assert!((inset(&remarkable) - inset(&scribe)).abs() < 1e-6);
    }

    #[test]
    fn test_daily_sections_do_not_overlap() {
        let frame = PlannerFrame::new(&DeviceProfile::REMARKABLE, &LayoutProfile::FULL).unwrap();
        let s = frame.daily_sections();
        assert!(!s.schedule.intersects(&s.priorities));
        assert!(!s.schedule.intersects(&s.notes));
        assert!(!s.priorities.intersects(&s.notes));
        assert!((s.notes.bottom() - frame.daily_area().bottom()).abs() < 1e-6);
    }

    #[test]
    fn test_palma_week_columns_too_narrow_with_sidebar() {
        let frame = PlannerFrame::new(&DeviceProfile::PALMA, &LayoutProfile::FULL).unwrap();
        let col = frame.week_area().width / 7.0;
        assert!(col < 100.0);
    }
}
