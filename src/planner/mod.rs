//! # Planner Composer
//!
//! Builds the pages of a yearly planner for one device.
//!
//! ## Document Order
//!
//! ```text
//! cover
//! 12 × month overview
//! for each month, for each week row, one page per segment with an in-month day
//! one page per day of the year
//! ```
//!
//! `expected_page_count` predicts the total without building anything.
//!
//! ## Usage
//!
//! ```
//! use inkplan::planner::{PlannerRequest, build_year};
//! use inkplan::profile::ProfileRegistry;
//!
//! let request = PlannerRequest::new("palma", 2025);
//! let document = build_year(ProfileRegistry::builtin(), &request).unwrap();
//! assert_eq!(document.layout, "compact");
//! assert_eq!(document.pages.len(), document.expected_pages);
//! ```

pub mod chrome;
pub mod day;
pub mod frame;
pub mod month;
pub mod week;

pub use frame::PlannerFrame;
pub use week::{WeekSegment, plan_week_segments};

use rayon::prelude::*;
use serde::Serialize;

use crate::calendar::{CalendarDate, MONTH_NAMES, build_month_matrix, check_year, dates_of_year};
use crate::error::Result;
use crate::fit::{FitMode, FitReport, FitTarget, validate_fit};
use crate::geometry::GeometryNode;
use crate::params::{ResolvedParams, TemplateParams};
use crate::profile::{LayoutProfile, ProfileRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    Cover,
    Month,
    Week,
    Day,
}

/// One assembled planner page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannerPage {
    pub kind: PageKind,
    pub title: String,
    pub geometry: GeometryNode,
}

/// What to build.
#[derive(Debug, Clone)]
pub struct PlannerRequest {
    pub device: String,
    /// `None` uses the device's default planner layout
    pub layout: Option<String>,
    pub year: i32,
    pub params: TemplateParams,
    pub mode: FitMode,
}

impl PlannerRequest {
    pub fn new(device: impl Into<String>, year: i32) -> Self {
        Self {
            device: device.into(),
            layout: None,
            year,
            params: TemplateParams::EMPTY,
            mode: FitMode::Fallback,
        }
    }

    pub fn with_layout(mut self, layout: impl Into<String>) -> Self {
        self.layout = Some(layout.into());
        self
    }

    pub fn with_params(mut self, params: TemplateParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_mode(mut self, mode: FitMode) -> Self {
        self.mode = mode;
        self
    }
}

/// A built planner.
#[derive(Debug, Clone, Serialize)]
pub struct PlannerDocument {
    pub year: i32,
    pub device: &'static str,
    pub layout: &'static str,
    pub fit: FitReport,
    pub expected_pages: usize,
    pub pages: Vec<PlannerPage>,
}

/// Pages a planner year will contain under `layout`.
///
/// `1 + 12 + week segment pages + days in year`
pub fn expected_page_count(year: i32, layout: &LayoutProfile) -> Result<usize> {
    let mut weeks = 0;
    for month in 1..=12 {
        let matrix = build_month_matrix(year, month)?;
        weeks += matrix
            .weeks
            .iter()
            .map(|week| plan_week_segments(week, layout).len())
            .sum::<usize>();
    }
    Ok(1 + 12 + weeks + dates_of_year(year)?.len())
}

/// Work item for one page.
#[derive(Debug, Clone)]
enum PageJob {
    Cover,
    Month(u32),
    Week { month: u32, segment: WeekSegment },
    Day(CalendarDate),
}

fn plan_jobs(year: i32, layout: &LayoutProfile) -> Result<Vec<PageJob>> {
    let mut jobs = vec![PageJob::Cover];
    jobs.extend((1..=12).map(PageJob::Month));
    for month in 1..=12 {
        let matrix = build_month_matrix(year, month)?;
        for week in &matrix.weeks {
            jobs.extend(
                plan_week_segments(week, layout)
                    .into_iter()
                    .map(|segment| PageJob::Week { month, segment }),
            );
        }
    }
    jobs.extend(dates_of_year(year)?.into_iter().map(PageJob::Day));
    Ok(jobs)
}

fn month_name(month: u32) -> &'static str {
    MONTH_NAMES[(month as usize).saturating_sub(1) % 12]
}

impl PageJob {
    fn build(
        &self,
        frame: &PlannerFrame<'_>,
        params: &ResolvedParams,
        year: i32,
    ) -> Result<PlannerPage> {
        let (kind, title, subtitle, active, body) = match self {
            PageJob::Cover => (
                PageKind::Cover,
                year.to_string(),
                format!("Planner for {}", frame.device.name),
                None,
                chrome::cover_body(frame, year)?,
            ),
            PageJob::Month(month) => (
                PageKind::Month,
                format!("{} {year}", month_name(*month)),
                "Month overview".to_string(),
                Some(*month),
                month::month_body(frame, &build_month_matrix(year, *month)?)?,
            ),
            PageJob::Week { month, segment } => {
                let week = segment.first_date().map(|d| d.iso_week().1).unwrap_or(0);
                (
                    PageKind::Week,
                    format!("{} {year} · Week {week}", month_name(*month)),
                    segment.label.clone(),
                    Some(*month),
                    week::week_body(frame, segment)?,
                )
            }
            PageJob::Day(date) => (
                PageKind::Day,
                format!(
                    "{} {} {}",
                    date.weekday().short_label(),
                    date.day(),
                    month_name(date.month())
                ),
                date.iso_string(),
                Some(date.month()),
                day::day_body(frame, params, *date)?,
            ),
        };
        Ok(PlannerPage {
            kind,
            geometry: chrome::page(frame, active, &title, &subtitle, body)?,
            title,
        })
    }
}

/// Validate the layout, then build every page of the year.
///
/// Pages are built in parallel and returned in document order. Fails with
/// `Rejected` when no layout fits (or the requested one fails in strict
/// mode).
pub fn build_year(registry: &ProfileRegistry, request: &PlannerRequest) -> Result<PlannerDocument> {
    check_year(request.year)?;
    let fit = validate_fit(
        registry,
        &request.device,
        request.layout.as_deref(),
        FitTarget::Planner,
        &request.params,
        request.mode,
    )?;
    let device = registry.resolve_device(&request.device)?;
    let layout = fit.result.clone().into_layout()?;
    let params = request.params.resolve(device, layout)?;
    let frame = PlannerFrame::new(device, layout)?;

    let jobs = plan_jobs(request.year, layout)?;
    let pages = jobs
        .par_iter()
        .map(|job| job.build(&frame, &params, request.year))
        .collect::<Result<Vec<_>>>()?;

    Ok(PlannerDocument {
        year: request.year,
        device: device.key,
        layout: layout.name,
        fit,
        expected_pages: expected_page_count(request.year, layout)?,
        pages,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InkplanError;

    #[test]
    fn test_expected_page_count_full() {
        // 2025: 365 days; full layout has one page per month week row
        let weeks: usize = (1..=12)
            .map(|m| build_month_matrix(2025, m).unwrap().weeks.len())
            .sum();
        assert_eq!(
            expected_page_count(2025, &LayoutProfile::FULL).unwrap(),
            1 + 12 + weeks + 365
        );
    }

    #[test]
    fn test_compact_has_more_week_pages() {
        let full = expected_page_count(2024, &LayoutProfile::FULL).unwrap();
        let compact = expected_page_count(2024, &LayoutProfile::COMPACT).unwrap();
        assert!(compact > full);
    }

    #[test]
    fn test_build_year_document_order() {
        let request = PlannerRequest::new("remarkable", 2024).with_layout("full");
        let doc = build_year(ProfileRegistry::builtin(), &request).unwrap();
        assert_eq!(doc.pages.len(), doc.expected_pages);
        assert_eq!(doc.pages[0].kind, PageKind::Cover);
        assert!(doc.pages[1..13].iter().all(|p| p.kind == PageKind::Month));
        assert_eq!(doc.pages[1].title, "January 2024");
        let last = doc.pages.last().unwrap();
        assert_eq!(last.kind, PageKind::Day);
        assert!(last.geometry.find_group("2024-12-31").is_some());
    }

    #[test]
    fn test_build_year_falls_back() {
        let request = PlannerRequest::new("palma", 2025).with_layout("full");
        let doc = build_year(ProfileRegistry::builtin(), &request).unwrap();
        assert_eq!(doc.layout, "compact");
        assert!(doc.fit.result.is_fallback());
    }

    #[test]
    fn test_build_year_strict_rejects() {
        let request = PlannerRequest::new("palma", 2025)
            .with_layout("full")
            .with_mode(FitMode::Strict);
        assert!(matches!(
            build_year(ProfileRegistry::builtin(), &request),
            Err(InkplanError::Rejected(_))
        ));
    }

    #[test]
    fn test_pages_have_disjoint_regions() {
        let request = PlannerRequest::new("scribe", 2025);
        let doc = build_year(ProfileRegistry::builtin(), &request).unwrap();
        for page in doc.pages.iter().step_by(37) {
            let frames: Vec<_> =
                page.geometry.children().iter().filter_map(|c| c.frame()).collect();
            assert_eq!(frames.len(), 3);
            assert!(!frames[0].intersects(&frames[1]));
            assert!(!frames[1].intersects(&frames[2]));
            assert!(!frames[0].intersects(&frames[2]));
        }
    }
}
