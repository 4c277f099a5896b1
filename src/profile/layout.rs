//! # Layout Profiles
//!
//! Layout densities, independent of the physical page.
//!
//! | Layout | Sidebar | Week split | Spacing | Max rows |
//! |--------|---------|------------|---------|----------|
//! | full | yes | no | 1.0 | 16 |
//! | balanced | yes | no | 0.875 | 18 |
//! | compact | no | MON-THU / FRI-SUN | 0.75 | 22 |
//!
//! Planner paddings and badge sizes are device pixels, applied unscaled on
//! every device.

use serde::Serialize;
use std::fmt;

use crate::params::{NotesFill, ResolvedParams};

/// Layout density, ordered from most spacious to densest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Density {
    Full,
    Balanced,
    Compact,
}

impl Density {
    /// Fallback order.
    pub const ORDER: [Density; 3] = [Density::Full, Density::Balanced, Density::Compact];

    pub fn as_str(&self) -> &'static str {
        match self {
            Density::Full => "full",
            Density::Balanced => "balanced",
            Density::Compact => "compact",
        }
    }
}

impl fmt::Display for Density {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Monthly grid paddings and feature toggles. Sizes are device pixels.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MonthLayout {
    pub side_padding_px: f64,
    pub top_padding_px: f64,
    pub bottom_padding_px: f64,
    pub show_week_labels: bool,
    pub day_badge_height_px: f64,
    pub day_badge_max_width_px: f64,
    pub week_label_width_px: f64,
    pub week_label_gap_px: f64,
    pub draw_writing_line: bool,
    pub writing_line_margin_px: f64,
}

impl MonthLayout {
    const STANDARD: Self = Self {
        side_padding_px: 40.0,
        top_padding_px: 60.0,
        bottom_padding_px: 150.0,
        show_week_labels: true,
        day_badge_height_px: 34.0,
        day_badge_max_width_px: 58.0,
        week_label_width_px: 24.0,
        week_label_gap_px: 8.0,
        draw_writing_line: true,
        writing_line_margin_px: 10.0,
    };
}

/// Weekly page segmentation.
///
/// Each segment is a list of weekday indexes (0 = Monday) drawn on its own
/// page.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct WeekLayout {
    pub segments: &'static [&'static [usize]],
}

/// Daily page section toggles.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DailyLayout {
    pub show_schedule: bool,
    pub show_priorities: bool,
    pub notes_grid_step_mm: f64,
}

/// # Layout Profile
///
/// A named density. `spacing_scale` scales planner writing-line pitch,
/// `max_rows` caps checklist and priority row counts, and `allows_split`
/// permits weekly pages to be segmented.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct LayoutProfile {
    pub name: &'static str,
    pub density: Density,
    pub spacing_scale: f64,
    pub max_rows: u32,
    pub allows_split: bool,
    pub show_sidebar: bool,
    pub month: MonthLayout,
    pub week: WeekLayout,
    pub daily: DailyLayout,
    /// Template parameter values used when neither device nor caller sets one
    pub template_defaults: ResolvedParams,
}

const WHOLE_WEEK: &[&[usize]] = &[&[0, 1, 2, 3, 4, 5, 6]];
const SPLIT_WEEK: &[&[usize]] = &[&[0, 1, 2, 3], &[4, 5, 6]];

impl LayoutProfile {
    pub const FULL: Self = Self {
        name: "full",
        density: Density::Full,
        spacing_scale: 1.0,
        max_rows: 16,
        allows_split: false,
        show_sidebar: true,
        month: MonthLayout::STANDARD,
        week: WeekLayout { segments: WHOLE_WEEK },
        daily: DailyLayout {
            show_schedule: true,
            show_priorities: true,
            notes_grid_step_mm: 5.0,
        },
        template_defaults: ResolvedParams {
            margin_mm: 12.0,
            header_height_mm: 12.0,
            line_spacing_mm: 8.0,
            grid_spacing_mm: 6.0,
            dot_spacing_mm: 6.0,
            dot_radius_mm: 0.38,
            checklist_rows: 16,
            priorities_rows: 5,
            schedule_start_hour: 6,
            schedule_end_hour: 22,
            notes_fill: NotesFill::Lines,
        },
    };

    pub const BALANCED: Self = Self {
        name: "balanced",
        density: Density::Balanced,
        spacing_scale: 0.875,
        max_rows: 18,
        allows_split: false,
        show_sidebar: true,
        month: MonthLayout::STANDARD,
        week: WeekLayout { segments: WHOLE_WEEK },
        daily: DailyLayout {
            show_schedule: true,
            show_priorities: true,
            notes_grid_step_mm: 5.0,
        },
        template_defaults: ResolvedParams {
            margin_mm: 10.0,
            header_height_mm: 10.0,
            line_spacing_mm: 7.0,
            grid_spacing_mm: 5.0,
            dot_spacing_mm: 5.0,
            dot_radius_mm: 0.35,
            checklist_rows: 18,
            priorities_rows: 6,
            schedule_start_hour: 6,
            schedule_end_hour: 22,
            notes_fill: NotesFill::Lines,
        },
    };

    pub const COMPACT: Self = Self {
        name: "compact",
        density: Density::Compact,
        spacing_scale: 0.75,
        max_rows: 22,
        allows_split: true,
        show_sidebar: false,
        month: MonthLayout {
            show_week_labels: false,
            day_badge_height_px: 30.0,
            day_badge_max_width_px: 50.0,
            draw_writing_line: false,
            ..MonthLayout::STANDARD
        },
        week: WeekLayout { segments: SPLIT_WEEK },
        daily: DailyLayout {
            show_schedule: false,
            show_priorities: false,
            notes_grid_step_mm: 6.0,
        },
        template_defaults: ResolvedParams {
            margin_mm: 8.0,
            header_height_mm: 8.0,
            line_spacing_mm: 6.0,
            grid_spacing_mm: 4.5,
            dot_spacing_mm: 4.5,
            dot_radius_mm: 0.3,
            checklist_rows: 22,
            priorities_rows: 8,
            schedule_start_hour: 7,
            schedule_end_hour: 22,
            notes_fill: NotesFill::Lines,
        },
    };

    /// Weekly segments in effect: the split table when the layout allows
    /// splitting, otherwise the whole week.
    pub fn week_segments(&self) -> &'static [&'static [usize]] {
        if self.allows_split {
            self.week.segments
        } else {
            WHOLE_WEEK
        }
    }
}
