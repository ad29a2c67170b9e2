//! Calendar math
//!
//! Pure date arithmetic for the agenda views: visible range per view,
//! Monday-first month grid, and anchor navigation. Appointments are
//! matched against the range elsewhere; nothing here touches storage.

use chrono::{Datelike, Duration, Local, Months, NaiveDate, TimeZone, Utc, Weekday};

/// Agenda view granularity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CalendarView {
    Day,
    #[default]
    Week,
    Month,
}

impl CalendarView {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Day => "Día",
            Self::Week => "Semana",
            Self::Month => "Mes",
        }
    }
}

/// Calendar cursor: a view granularity plus an anchor date
#[derive(Debug, Clone, Copy)]
pub struct Calendar {
    pub view: CalendarView,
    pub anchor: NaiveDate,
}

impl Default for Calendar {
    fn default() -> Self {
        Self { view: CalendarView::default(), anchor: Local::now().date_naive() }
    }
}

impl Calendar {
    pub fn new(view: CalendarView, anchor: NaiveDate) -> Self {
        Self { view, anchor }
    }

    /// Visible date range as half-open `[from, to)` days.
    ///
    /// Day: the anchor day. Week: Monday through Sunday containing the
    /// anchor. Month: the anchor's calendar month.
    pub fn range(&self) -> (NaiveDate, NaiveDate) {
        match self.view {
            CalendarView::Day => (self.anchor, self.anchor + Duration::days(1)),
            CalendarView::Week => {
                let monday = week_monday(self.anchor);
                (monday, monday + Duration::days(7))
            }
            CalendarView::Month => {
                let first = first_of_month(self.anchor);
                // clamping the day to 1 makes the month add infallible
                (first, first + Months::new(1))
            }
        }
    }

    /// Visible range as UTC instants, for filtering stored appointments.
    /// Bounds are local midnights; a DST gap at midnight falls back to
    /// interpreting the time as UTC.
    pub fn utc_range(&self) -> (chrono::DateTime<Utc>, chrono::DateTime<Utc>) {
        let (from, to) = self.range();
        (local_midnight_utc(from), local_midnight_utc(to))
    }

    /// Step the anchor backwards one view unit
    pub fn prev(&mut self) {
        self.anchor = match self.view {
            CalendarView::Day => self.anchor - Duration::days(1),
            CalendarView::Week => self.anchor - Duration::days(7),
            CalendarView::Month => self.anchor - Months::new(1),
        };
    }

    /// Step the anchor forwards one view unit
    pub fn next(&mut self) {
        self.anchor = match self.view {
            CalendarView::Day => self.anchor + Duration::days(1),
            CalendarView::Week => self.anchor + Duration::days(7),
            CalendarView::Month => self.anchor + Months::new(1),
        };
    }

    pub fn today(&mut self) {
        self.anchor = Local::now().date_naive();
    }
}

/// Monday-first month grid for the anchor's month.
///
/// Starts on the Monday on or before the 1st and covers a whole number
/// of weeks — just enough to fit the month, so the length is 28, 35 or
/// 42 cells. Cells outside the month belong to the neighbor months.
pub fn month_grid(anchor: NaiveDate) -> Vec<NaiveDate> {
    let first = first_of_month(anchor);
    let lead = first.weekday().num_days_from_monday() as i64;
    let days_in_month = ((first + Months::new(1)) - first).num_days();
    let cells = (lead + days_in_month + 6) / 7 * 7;

    let grid_start = first - Duration::days(lead);
    (0..cells).map(|i| grid_start + Duration::days(i)).collect()
}

/// Monday of the week containing `date`
pub fn week_monday(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn local_midnight_utc(date: NaiveDate) -> chrono::DateTime<Utc> {
    let naive = date.and_hms_opt(0, 0, 0).unwrap_or_default();
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&naive))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn week_range_is_monday_through_sunday() {
        // 2026-03-11 is a Wednesday
        let cal = Calendar::new(CalendarView::Week, d(2026, 3, 11));
        let (from, to) = cal.range();
        assert_eq!(from, d(2026, 3, 9));
        assert_eq!(to, d(2026, 3, 16));
        assert_eq!(from.weekday(), Weekday::Mon);
    }

    #[test]
    fn month_range_covers_whole_month() {
        let cal = Calendar::new(CalendarView::Month, d(2026, 2, 15));
        let (from, to) = cal.range();
        assert_eq!(from, d(2026, 2, 1));
        assert_eq!(to, d(2026, 3, 1));
    }

    #[test]
    fn grid_is_whole_weeks_starting_monday() {
        for month in 1..=12 {
            let grid = month_grid(d(2026, month, 10));
            assert_eq!(grid.len() % 7, 0, "month {month}");
            assert_eq!(grid[0].weekday(), Weekday::Mon, "month {month}");
        }
    }

    #[test]
    fn grid_contains_every_day_of_month_once() {
        let grid = month_grid(d(2026, 2, 1));
        for day in 1..=28 {
            let count = grid.iter().filter(|c| **c == d(2026, 2, day)).count();
            assert_eq!(count, 1, "day {day}");
        }
    }

    #[test]
    fn grid_is_minimal() {
        // Feb 2027 starts on a Monday and has 28 days: exactly 4 weeks
        assert_eq!(month_grid(d(2027, 2, 10)).len(), 28);
        // Sep 2026 starts on a Tuesday and has 30 days: 5 weeks
        assert_eq!(month_grid(d(2026, 9, 10)).len(), 35);
        // Aug 2026 starts on a Saturday and has 31 days: 6 weeks
        assert_eq!(month_grid(d(2026, 8, 10)).len(), 42);
    }

    #[test]
    fn month_navigation_clamps_day() {
        let mut cal = Calendar::new(CalendarView::Month, d(2026, 3, 31));
        cal.prev();
        assert_eq!(cal.anchor, d(2026, 2, 28));
        cal.next();
        assert_eq!(cal.anchor, d(2026, 3, 28));
    }

    #[test]
    fn day_navigation_steps_one_day() {
        let mut cal = Calendar::new(CalendarView::Day, d(2026, 1, 1));
        cal.prev();
        assert_eq!(cal.anchor, d(2025, 12, 31));
        cal.next();
        cal.next();
        assert_eq!(cal.anchor, d(2026, 1, 2));
    }
}
