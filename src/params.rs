//! # Template Parameters
//!
//! The closed set of recognized template parameters, parsed and validated at
//! the boundary. Unknown keys and out-of-range values are rejected when a
//! [`TemplateParams`] is built; nothing is silently clamped.
//!
//! ## Layering
//!
//! ```text
//! layout defaults  →  device defaults  →  explicit overrides  =  ResolvedParams
//! (full/balanced/     (e.g. palma:         (--param k=v)
//!  compact table)      margin 3mm, 9–19)
//! ```

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::{InkplanError, Result};
use crate::profile::{DeviceProfile, LayoutProfile};

/// Upper bound for `checklist_rows` and `priorities_rows`.
///
/// Well above any layout's `max_rows`, so oversized counts still reach the
/// fit check and are rejected there.
pub const MAX_ROW_COUNT: u32 = 1000;

// ============================================================================
// KEYS
// ============================================================================

/// A recognized template parameter key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKey {
    MarginMm,
    HeaderHeightMm,
    LineSpacingMm,
    GridSpacingMm,
    DotSpacingMm,
    DotRadiusMm,
    ChecklistRows,
    PrioritiesRows,
    ScheduleStartHour,
    ScheduleEndHour,
    NotesFill,
}

impl ParamKey {
    /// All keys, in documentation order.
    pub const ALL: [ParamKey; 11] = [
        ParamKey::MarginMm,
        ParamKey::HeaderHeightMm,
        ParamKey::LineSpacingMm,
        ParamKey::GridSpacingMm,
        ParamKey::DotSpacingMm,
        ParamKey::DotRadiusMm,
        ParamKey::ChecklistRows,
        ParamKey::PrioritiesRows,
        ParamKey::ScheduleStartHour,
        ParamKey::ScheduleEndHour,
        ParamKey::NotesFill,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ParamKey::MarginMm => "margin_mm",
            ParamKey::HeaderHeightMm => "header_height_mm",
            ParamKey::LineSpacingMm => "line_spacing_mm",
            ParamKey::GridSpacingMm => "grid_spacing_mm",
            ParamKey::DotSpacingMm => "dot_spacing_mm",
            ParamKey::DotRadiusMm => "dot_radius_mm",
            ParamKey::ChecklistRows => "checklist_rows",
            ParamKey::PrioritiesRows => "priorities_rows",
            ParamKey::ScheduleStartHour => "schedule_start_hour",
            ParamKey::ScheduleEndHour => "schedule_end_hour",
            ParamKey::NotesFill => "notes_fill",
        }
    }

    /// Human-readable description with units and domain.
    pub fn description(&self) -> &'static str {
        match self {
            ParamKey::MarginMm => "Page margin in millimeters (> 0)",
            ParamKey::HeaderHeightMm => "Header band height in millimeters (>= 0)",
            ParamKey::LineSpacingMm => "Writing line spacing in millimeters (> 0)",
            ParamKey::GridSpacingMm => "Grid spacing in millimeters (> 0)",
            ParamKey::DotSpacingMm => "Dot spacing in millimeters (> 0)",
            ParamKey::DotRadiusMm => "Dot radius in millimeters (> 0)",
            ParamKey::ChecklistRows => "Checklist row count (integer, 0-1000)",
            ParamKey::PrioritiesRows => "Priority row count (integer, 0-1000)",
            ParamKey::ScheduleStartHour => "Schedule start hour, 24h (0-23)",
            ParamKey::ScheduleEndHour => "Schedule end hour, 24h, inclusive (0-23)",
            ParamKey::NotesFill => "Notes fill: lines, grid, dotted-grid, millimeter",
        }
    }
}

impl fmt::Display for ParamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParamKey {
    type Err = InkplanError;

    fn from_str(s: &str) -> Result<Self> {
        ParamKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| {
                let supported: Vec<&str> = ParamKey::ALL.iter().map(|k| k.as_str()).collect();
                InkplanError::invalid_param(
                    s,
                    "",
                    format!("unknown parameter (supported: {})", supported.join(", ")),
                )
            })
    }
}

// ============================================================================
// NOTES FILL
// ============================================================================

/// Fill pattern for the notes template and notes regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotesFill {
    #[default]
    Lines,
    Grid,
    DottedGrid,
    Millimeter,
}

impl NotesFill {
    pub const ALL: [NotesFill; 4] = [
        NotesFill::Lines,
        NotesFill::Grid,
        NotesFill::DottedGrid,
        NotesFill::Millimeter,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NotesFill::Lines => "lines",
            NotesFill::Grid => "grid",
            NotesFill::DottedGrid => "dotted-grid",
            NotesFill::Millimeter => "millimeter",
        }
    }
}

impl FromStr for NotesFill {
    type Err = InkplanError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase();
        NotesFill::ALL
            .into_iter()
            .find(|fill| fill.as_str() == normalized)
            .ok_or_else(|| {
                InkplanError::invalid_param(
                    ParamKey::NotesFill.as_str(),
                    s,
                    "expected one of lines, grid, dotted-grid, millimeter",
                )
            })
    }
}

// ============================================================================
// PARSING
// ============================================================================

/// Split one `key=value` CLI pair.
///
/// Whitespace around key and value is trimmed. The value may contain `=`.
pub fn parse_param_pair(raw: &str) -> Result<(ParamKey, String)> {
    let (key, value) = raw.split_once('=').ok_or_else(|| {
        InkplanError::invalid_param(raw, "", "expected key=value")
    })?;
    let key = key.trim();
    if key.is_empty() {
        return Err(InkplanError::invalid_param(raw, value, "key cannot be empty"));
    }
    Ok((key.parse()?, value.trim().to_string()))
}

fn parse_positive_mm(key: ParamKey, raw: &str, allow_zero: bool) -> Result<f64> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| InkplanError::invalid_param(key.as_str(), raw, "expected a number"))?;
    check_mm(key, value, allow_zero)?;
    Ok(value)
}

fn check_mm(key: ParamKey, value: f64, allow_zero: bool) -> Result<()> {
    if !value.is_finite() {
        return Err(InkplanError::invalid_param(key.as_str(), value, "must be finite"));
    }
    if allow_zero && value < 0.0 {
        return Err(InkplanError::invalid_param(key.as_str(), value, "must be >= 0"));
    }
    if !allow_zero && value <= 0.0 {
        return Err(InkplanError::invalid_param(key.as_str(), value, "must be > 0"));
    }
    Ok(())
}

fn parse_count(key: ParamKey, raw: &str) -> Result<u32> {
    let rows: u32 = raw.trim().parse().map_err(|_| {
        InkplanError::invalid_param(key.as_str(), raw, "expected a non-negative integer")
    })?;
    check_count(key, rows)?;
    Ok(rows)
}

fn check_count(key: ParamKey, rows: u32) -> Result<()> {
    if rows > MAX_ROW_COUNT {
        return Err(InkplanError::invalid_param(
            key.as_str(),
            rows,
            format!("must be at most {MAX_ROW_COUNT}"),
        ));
    }
    Ok(())
}

fn parse_hour(key: ParamKey, raw: &str) -> Result<u32> {
    let hour: u32 = raw
        .trim()
        .parse()
        .map_err(|_| InkplanError::invalid_param(key.as_str(), raw, "expected an hour 0-23"))?;
    check_hour(key, hour)?;
    Ok(hour)
}

fn check_hour(key: ParamKey, hour: u32) -> Result<()> {
    if hour > 23 {
        return Err(InkplanError::invalid_param(key.as_str(), hour, "must be between 0 and 23"));
    }
    Ok(())
}

fn check_hour_order(start: u32, end: u32) -> Result<()> {
    if end < start {
        return Err(InkplanError::invalid_param(
            ParamKey::ScheduleEndHour.as_str(),
            end,
            format!("must be >= schedule_start_hour ({start})"),
        ));
    }
    Ok(())
}

// ============================================================================
// TEMPLATE PARAMS
// ============================================================================

/// Validated, partial parameter set.
///
/// Every present value has already passed its domain check. Absent values are
/// filled from device and layout defaults by [`TemplateParams::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct TemplateParams {
    pub(crate) margin_mm: Option<f64>,
    pub(crate) header_height_mm: Option<f64>,
    pub(crate) line_spacing_mm: Option<f64>,
    pub(crate) grid_spacing_mm: Option<f64>,
    pub(crate) dot_spacing_mm: Option<f64>,
    pub(crate) dot_radius_mm: Option<f64>,
    pub(crate) checklist_rows: Option<u32>,
    pub(crate) priorities_rows: Option<u32>,
    pub(crate) schedule_start_hour: Option<u32>,
    pub(crate) schedule_end_hour: Option<u32>,
    pub(crate) notes_fill: Option<NotesFill>,
}

impl TemplateParams {
    /// No overrides.
    pub const EMPTY: Self = Self {
        margin_mm: None,
        header_height_mm: None,
        line_spacing_mm: None,
        grid_spacing_mm: None,
        dot_spacing_mm: None,
        dot_radius_mm: None,
        checklist_rows: None,
        priorities_rows: None,
        schedule_start_hour: None,
        schedule_end_hour: None,
        notes_fill: None,
    };

    /// Build from `(key, value)` string pairs.
    ///
    /// ```
    /// use inkplan::params::TemplateParams;
    ///
    /// let params =
    ///     TemplateParams::from_pairs([("schedule_start_hour", "6"), ("schedule_end_hour", "22")])
    ///         .unwrap();
    /// assert_eq!(params.schedule_hours(), (Some(6), Some(22)));
    ///
    /// assert!(TemplateParams::from_pairs([("colour", "red")]).is_err());
    /// ```
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Result<Self> {
        let mut params = Self::default();
        for (key, value) in pairs {
            params.set(key.trim().parse()?, value)?;
        }
        params.check_hours()?;
        Ok(params)
    }

    /// Build from raw `key=value` strings, as passed on the command line.
    pub fn from_cli_pairs(raw: &[String]) -> Result<Self> {
        let mut params = Self::default();
        for pair in raw {
            let (key, value) = parse_param_pair(pair)?;
            params.set(key, &value)?;
        }
        params.check_hours()?;
        Ok(params)
    }

    /// Set one parameter from its raw string value, validating its domain.
    pub fn set(&mut self, key: ParamKey, raw: &str) -> Result<()> {
        match key {
            ParamKey::MarginMm => self.margin_mm = Some(parse_positive_mm(key, raw, false)?),
            ParamKey::HeaderHeightMm => {
                self.header_height_mm = Some(parse_positive_mm(key, raw, true)?)
            }
            ParamKey::LineSpacingMm => {
                self.line_spacing_mm = Some(parse_positive_mm(key, raw, false)?)
            }
            ParamKey::GridSpacingMm => {
                self.grid_spacing_mm = Some(parse_positive_mm(key, raw, false)?)
            }
            ParamKey::DotSpacingMm => {
                self.dot_spacing_mm = Some(parse_positive_mm(key, raw, false)?)
            }
            ParamKey::DotRadiusMm => self.dot_radius_mm = Some(parse_positive_mm(key, raw, false)?),
            ParamKey::ChecklistRows => self.checklist_rows = Some(parse_count(key, raw)?),
            ParamKey::PrioritiesRows => self.priorities_rows = Some(parse_count(key, raw)?),
            ParamKey::ScheduleStartHour => self.schedule_start_hour = Some(parse_hour(key, raw)?),
            ParamKey::ScheduleEndHour => self.schedule_end_hour = Some(parse_hour(key, raw)?),
            ParamKey::NotesFill => self.notes_fill = Some(raw.parse()?),
        }
        Ok(())
    }

    fn check_hours(&self) -> Result<()> {
        if let (Some(start), Some(end)) = (self.schedule_start_hour, self.schedule_end_hour) {
            check_hour_order(start, end)?;
        }
        Ok(())
    }

    /// Explicit schedule hours, if given.
    pub fn schedule_hours(&self) -> (Option<u32>, Option<u32>) {
        (self.schedule_start_hour, self.schedule_end_hour)
    }

    pub fn notes_fill(&self) -> Option<NotesFill> {
        self.notes_fill
    }

    /// Whether no parameter is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }

    /// Layer `other` on top of `self`; values present in `other` win.
    pub fn overlay(&self, other: &TemplateParams) -> TemplateParams {
        TemplateParams {
            margin_mm: other.margin_mm.or(self.margin_mm),
            header_height_mm: other.header_height_mm.or(self.header_height_mm),
            line_spacing_mm: other.line_spacing_mm.or(self.line_spacing_mm),
            grid_spacing_mm: other.grid_spacing_mm.or(self.grid_spacing_mm),
            dot_spacing_mm: other.dot_spacing_mm.or(self.dot_spacing_mm),
            dot_radius_mm: other.dot_radius_mm.or(self.dot_radius_mm),
            checklist_rows: other.checklist_rows.or(self.checklist_rows),
            priorities_rows: other.priorities_rows.or(self.priorities_rows),
            schedule_start_hour: other.schedule_start_hour.or(self.schedule_start_hour),
            schedule_end_hour: other.schedule_end_hour.or(self.schedule_end_hour),
            notes_fill: other.notes_fill.or(self.notes_fill),
        }
    }

    /// Resolve against a device and layout into a complete parameter set.
    pub fn resolve(
        &self,
        device: &DeviceProfile,
        layout: &LayoutProfile,
    ) -> Result<ResolvedParams> {
        let layered = device.template_defaults.overlay(self);
        let base = layout.template_defaults;
        let resolved = ResolvedParams {
            margin_mm: layered.margin_mm.unwrap_or(base.margin_mm),
            header_height_mm: layered.header_height_mm.unwrap_or(base.header_height_mm),
            line_spacing_mm: layered.line_spacing_mm.unwrap_or(base.line_spacing_mm),
            grid_spacing_mm: layered.grid_spacing_mm.unwrap_or(base.grid_spacing_mm),
            dot_spacing_mm: layered.dot_spacing_mm.unwrap_or(base.dot_spacing_mm),
            dot_radius_mm: layered.dot_radius_mm.unwrap_or(base.dot_radius_mm),
            checklist_rows: layered.checklist_rows.unwrap_or(base.checklist_rows),
            priorities_rows: layered.priorities_rows.unwrap_or(base.priorities_rows),
            schedule_start_hour: layered.schedule_start_hour.unwrap_or(base.schedule_start_hour),
            schedule_end_hour: layered.schedule_end_hour.unwrap_or(base.schedule_end_hour),
            notes_fill: layered.notes_fill.unwrap_or(base.notes_fill),
        };
        resolved.validate()?;
        Ok(resolved)
    }
}

// ============================================================================
// RESOLVED PARAMS
// ============================================================================

/// Complete parameter set consumed by the geometry builders.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResolvedParams {
    pub margin_mm: f64,
    pub header_height_mm: f64,
    pub line_spacing_mm: f64,
    pub grid_spacing_mm: f64,
    pub dot_spacing_mm: f64,
    pub dot_radius_mm: f64,
    pub checklist_rows: u32,
    pub priorities_rows: u32,
    pub schedule_start_hour: u32,
    pub schedule_end_hour: u32,
    pub notes_fill: NotesFill,
}

impl ResolvedParams {
    /// Re-check every domain constraint.
    ///
    /// Fields are public, so builders call this before trusting them.
    pub fn validate(&self) -> Result<()> {
        check_mm(ParamKey::MarginMm, self.margin_mm, false)?;
        check_mm(ParamKey::HeaderHeightMm, self.header_height_mm, true)?;
        check_mm(ParamKey::LineSpacingMm, self.line_spacing_mm, false)?;
        check_mm(ParamKey::GridSpacingMm, self.grid_spacing_mm, false)?;
        check_mm(ParamKey::DotSpacingMm, self.dot_spacing_mm, false)?;
        check_mm(ParamKey::DotRadiusMm, self.dot_radius_mm, false)?;
        check_count(ParamKey::ChecklistRows, self.checklist_rows)?;
        check_count(ParamKey::PrioritiesRows, self.priorities_rows)?;
        check_hour(ParamKey::ScheduleStartHour, self.schedule_start_hour)?;
        check_hour(ParamKey::ScheduleEndHour, self.schedule_end_hour)?;
        check_hour_order(self.schedule_start_hour, self.schedule_end_hour)
    }

    /// Hours covered by the schedule, inclusive of the end hour.
    pub fn schedule_hours(&self) -> std::ops::RangeInclusive<u32> {
        self.schedule_start_hour..=self.schedule_end_hour
    }

    /// Number of schedule rows.
    pub fn schedule_row_count(&self) -> u32 {
        self.schedule_end_hour.saturating_sub(self.schedule_start_hour) + 1
    }

    /// Fail unless a row-count parameter is between one and [`MAX_ROW_COUNT`].
    pub fn require_rows(key: ParamKey, rows: u32) -> Result<u32> {
        if rows == 0 {
            return Err(InkplanError::invalid_param(key.as_str(), rows, "must be >= 1"));
        }
        check_count(key, rows)?;
        Ok(rows)
    }
}
