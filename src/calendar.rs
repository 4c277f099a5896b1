//! # Calendar Matrix
//!
//! Month grids and week rows, computed directly from the Gregorian rules.
//!
//! ## Month Matrix
//!
//! ```text
//! February 2024 (Monday start)
//!
//!  MON TUE WED THU FRI SAT SUN
//!   .   .   .   1   2   3   4
//!   5   6   7   8   9  10  11
//!  12  13  14  15  16  17  18
//!  19  20  21  22  23  24  25
//!  26  27  28  29   .   .   .
//! ```
//!
//! Blanks appear only in the leading slots of the first week and the trailing
//! slots of the last week.

use serde::Serialize;
use std::fmt;
use std::ops::RangeInclusive;

use crate::error::{InkplanError, Result};

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Years accepted by [`CalendarDate::new`] and the grid builders.
///
/// Every week touching a supported year, including ISO weeks that spill into
/// the neighbouring year, stays within 0001-01-01 ..= 9999-12-31.
pub const SUPPORTED_YEARS: RangeInclusive<i32> = 2..=9998;

pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

// ============================================================================
// ARITHMETIC
// ============================================================================

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn days_in_month(year: i32, month: u32) -> Result<u32> {
    check_year_month(year, month)?;
    Ok(match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        _ if is_leap_year(year) => 29,
        _ => 28,
    })
}

pub fn days_in_year(year: i32) -> u32 {
    if is_leap_year(year) { 366 } else { 365 }
}

/// Fail unless `year` is in [`SUPPORTED_YEARS`].
pub fn check_year(year: i32) -> Result<()> {
    if !SUPPORTED_YEARS.contains(&year) {
        return Err(InkplanError::invalid_param(
            "year",
            year,
            format!(
                "must be between {} and {}",
                SUPPORTED_YEARS.start(),
                SUPPORTED_YEARS.end()
            ),
        ));
    }
    Ok(())
}

fn check_year_month(year: i32, month: u32) -> Result<()> {
    if year < 1 {
        return Err(InkplanError::invalid_param("year", year, "must be >= 1"));
    }
    if !(1..=12).contains(&month) {
        return Err(InkplanError::invalid_param("month", month, "must be between 1 and 12"));
    }
    Ok(())
}

/// Days since 0001-01-01 (a Monday in the proleptic Gregorian calendar).
fn ordinal_days(year: i32, month: u32, day: u32) -> i64 {
    let y = (year - 1) as i64;
    let mut days = y * 365 + y / 4 - y / 100 + y / 400;
    for m in 1..month {
        // Month already validated by the caller
        days += days_in_month(year, m).unwrap_or(0) as i64;
    }
    days + (day as i64 - 1)
}

// ============================================================================
// WEEKDAY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Days since Monday (Monday = 0).
    pub fn index_from_monday(&self) -> usize {
        *self as usize
    }

    pub fn from_monday_index(index: usize) -> Weekday {
        Self::ALL[index % 7]
    }

    /// Three-letter upper-case label.
    pub fn short_label(&self) -> &'static str {
        ["MON", "TUE", "WED", "THU", "FRI", "SAT", "SUN"][self.index_from_monday()]
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_label())
    }
}

/// First column of a week row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekStart {
    /// ISO weeks
    #[default]
    Monday,
    Sunday,
}

impl WeekStart {
    /// Column of `weekday` in a row starting on this day.
    pub fn column_of(&self, weekday: Weekday) -> usize {
        match self {
            WeekStart::Monday => weekday.index_from_monday(),
            WeekStart::Sunday => (weekday.index_from_monday() + 1) % 7,
        }
    }

    /// Weekdays in column order.
    pub fn weekdays(&self) -> [Weekday; 7] {
        let offset = match self {
            WeekStart::Monday => 0,
            WeekStart::Sunday => 6,
        };
        std::array::from_fn(|i| Weekday::from_monday_index(i + offset))
    }
}

// ============================================================================
// DATE
// ============================================================================

/// A validated Gregorian date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct CalendarDate {
    year: i32,
    month: u32,
    day: u32,
}

impl CalendarDate {
    /// Fails with `InvalidParam` outside [`SUPPORTED_YEARS`] or for a day
    /// the month does not have.
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self> {
        check_year(year)?;
        let length = days_in_month(year, month)?;
        if day == 0 || day > length {
            return Err(InkplanError::invalid_param(
                "day",
                day,
                format!("must be between 1 and {length} for {year}-{month:02}"),
            ));
        }
        Ok(Self { year, month, day })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn weekday(&self) -> Weekday {
        let days = ordinal_days(self.year, self.month, self.day);
        Weekday::from_monday_index(days.rem_euclid(7) as usize)
    }

    /// 1-based day of the year.
    pub fn day_of_year(&self) -> u32 {
        (ordinal_days(self.year, self.month, self.day) - ordinal_days(self.year, 1, 1)) as u32 + 1
    }

    /// Next calendar day.
    pub fn succ(&self) -> CalendarDate {
        let length = days_in_month(self.year, self.month).unwrap_or(31);
        if self.day < length {
            Self { day: self.day + 1, ..*self }
        } else if self.month < 12 {
            Self { month: self.month + 1, day: 1, ..*self }
        } else {
            Self { year: self.year + 1, month: 1, day: 1 }
        }
    }

    /// Previous calendar day.
    pub fn pred(&self) -> CalendarDate {
        if self.day > 1 {
            Self { day: self.day - 1, ..*self }
        } else if self.month > 1 {
            let month = self.month - 1;
            let day = days_in_month(self.year, month).unwrap_or(28);
            Self { month, day, ..*self }
        } else if self.year > 1 {
            Self { year: self.year - 1, month: 12, day: 31 }
        } else {
            *self
        }
    }

    /// ISO 8601 week number and week-based year.
    ///
    /// ```
    /// use inkplan::calendar::CalendarDate;
    ///
    /// // 2021-01-03 is a Sunday belonging to week 53 of 2020
    /// let date = CalendarDate::new(2021, 1, 3).unwrap();
    /// assert_eq!(date.iso_week(), (2020, 53));
    /// ```
    pub fn iso_week(&self) -> (i32, u32) {
        let weekday = self.weekday().index_from_monday() as i64 + 1;
        let ordinal = self.day_of_year() as i64;
        let week = (ordinal - weekday + 10) / 7;
        if week < 1 {
            let previous = self.year - 1;
            (previous, iso_weeks_in_year(previous))
        } else if week > iso_weeks_in_year(self.year) as i64 {
            (self.year + 1, 1)
        } else {
            (self.year, week as u32)
        }
    }

    /// `YYYY-MM-DD`
    pub fn iso_string(&self) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.iso_string())
    }
}

/// 52 or 53.
pub fn iso_weeks_in_year(year: i32) -> u32 {
    // A year has 53 ISO weeks when it starts on a Thursday, or on a
    // Wednesday in a leap year.
    let jan1 = Weekday::from_monday_index(ordinal_days(year.max(1), 1, 1).rem_euclid(7) as usize);
    match jan1 {
        Weekday::Thursday => 53,
        Weekday::Wednesday if is_leap_year(year) => 53,
        _ => 52,
    }
}

// ============================================================================
// MATRIX
// ============================================================================

/// One slot of a month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DayCell {
    Blank,
    Day { date: CalendarDate },
}

impl DayCell {
    pub fn date(&self) -> Option<CalendarDate> {
        match self {
            DayCell::Blank => None,
            DayCell::Day { date } => Some(*date),
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, DayCell::Blank)
    }
}

/// Ordered weeks of exactly seven cells.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarMatrix {
    pub year: i32,
    pub month: u32,
    pub week_start: WeekStart,
    pub weeks: Vec<[DayCell; 7]>,
}

impl CalendarMatrix {
    /// Number of non-blank cells.
    pub fn day_count(&self) -> usize {
        self.weeks
            .iter()
            .flat_map(|week| week.iter())
            .filter(|cell| !cell.is_blank())
            .count()
    }

    /// All dates in grid order.
    pub fn dates(&self) -> impl Iterator<Item = CalendarDate> + '_ {
        self.weeks.iter().flat_map(|week| week.iter().filter_map(DayCell::date))
    }
}

/// Month grid with ISO (Monday) week start.
///
/// ```
/// use inkplan::calendar::build_month_matrix;
///
/// let feb = build_month_matrix(2024, 2).unwrap();
/// assert_eq!(feb.day_count(), 29);
/// assert!(feb.weeks.iter().all(|w| w.len() == 7));
/// ```
pub fn build_month_matrix(year: i32, month: u32) -> Result<CalendarMatrix> {
    build_month_matrix_with_start(year, month, WeekStart::Monday)
}

pub fn build_month_matrix_with_start(
    year: i32,
    month: u32,
    week_start: WeekStart,
) -> Result<CalendarMatrix> {
    let first = CalendarDate::new(year, month, 1)?;
    let length = days_in_month(year, month)?;
    let lead = week_start.column_of(first.weekday());

    let mut cells: Vec<DayCell> = vec![DayCell::Blank; lead];
    let mut date = first;
    for day in 1..=length {
        cells.push(DayCell::Day { date });
        if day < length {
            date = date.succ();
        }
    }
    while cells.len() % 7 != 0 {
        cells.push(DayCell::Blank);
    }

    let weeks = cells
        .chunks_exact(7)
        .map(|chunk| std::array::from_fn(|i| chunk[i]))
        .collect();

    Ok(CalendarMatrix {
        year,
        month,
        week_start,
        weeks,
    })
}

/// The seven dates of the week containing `year-month-day`.
///
/// Dates outside the month (or year) are real dates in the adjacent period.
pub fn build_week_rows(
    year: i32,
    month: u32,
    day: u32,
    week_start: WeekStart,
) -> Result<[CalendarDate; 7]> {
    let date = CalendarDate::new(year, month, day)?;
    let mut first = date;
    for _ in 0..week_start.column_of(date.weekday()) {
        first = first.pred();
    }
    let mut week = [first; 7];
    for i in 1..7 {
        week[i] = week[i - 1].succ();
    }
    Ok(week)
}

/// Every date of a year, in order.
pub fn dates_of_year(year: i32) -> Result<Vec<CalendarDate>> {
    let mut date = CalendarDate::new(year, 1, 1)?;
    let total = days_in_year(year);
    let mut dates = Vec::with_capacity(total as usize);
    for i in 0..total {
        dates.push(date);
        if i + 1 < total {
            date = date.succ();
        }
    }
    Ok(dates)
}
