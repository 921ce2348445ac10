use chrono::{Datelike, Duration, Months, NaiveDate, Weekday};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::collections::HashMap;

use super::holidays::HolidayCalendar;
use crate::models::{DateField, DividendEvent};

/// Events shown in a single day cell before the rest collapse behind
/// a "show N more" link.
pub const DEFAULT_CELL_CAP: usize = 6;

/// Monday through Friday.
pub const WEEKDAY_COLUMNS: usize = 5;

/// Anything that can be placed on the calendar.
pub trait CalendarEntry {
    fn symbol(&self) -> &str;

    /// ISO `YYYY-MM-DD` string the entry is bucketed on. Compared by exact
    /// string equality, so a malformed value never lands in any cell.
    fn date_key(&self, field: DateField) -> Option<&str>;
}

impl CalendarEntry for DividendEvent {
    fn symbol(&self) -> &str {
        &self.symbol
    }

    fn date_key(&self, field: DateField) -> Option<&str> {
        self.date(field)
    }
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Number of empty cells rendered before the first day of a month.
///
/// The weekday is taken Sunday-first (Sunday = 0) and remapped so that
/// Monday is column 0. A month that starts on a Saturday or Sunday gets no
/// padding: those leading weekend days are trimmed and the grid opens on
/// the following Monday.
pub fn leading_padding(first_of_month: NaiveDate) -> usize {
    let sunday_based = first_of_month.weekday().num_days_from_sunday() as usize;
    let monday_based = (sunday_based + 6) % 7;
    if monday_based >= WEEKDAY_COLUMNS {
        0
    } else {
        monday_based
    }
}

/// Monday of the week containing `today`. Saturday and Sunday belong to the
/// week that started on the preceding Monday.
pub fn week_start(today: NaiveDate) -> NaiveDate {
    today - Duration::days(today.weekday().num_days_from_monday() as i64)
}

fn iso_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

// ---------------------------------------------------------------------------
// MonthCursor
// ---------------------------------------------------------------------------

/// A (year, month) position. Navigation returns a fresh cursor; nothing is
/// carried over between months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonthCursor {
    first: NaiveDate,
}

impl MonthCursor {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first| Self { first })
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first: date - Duration::days(date.day0() as i64),
        }
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn last_day(&self) -> NaiveDate {
        self.next().first.pred_opt().unwrap_or(self.first)
    }

    /// Following month. Saturates at the end of the representable range.
    pub fn next(self) -> Self {
        self.first
            .checked_add_months(Months::new(1))
            .map(|first| Self { first })
            .unwrap_or(self)
    }

    /// Preceding month. Saturates at the start of the representable range.
    pub fn prev(self) -> Self {
        self.first
            .checked_sub_months(Months::new(1))
            .map(|first| Self { first })
            .unwrap_or(self)
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        let month = self.month();
        self.first.iter_days().take_while(move |d| d.month() == month)
    }
}

impl Serialize for MonthCursor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut st = serializer.serialize_struct("MonthCursor", 2)?;
        st.serialize_field("year", &self.year())?;
        st.serialize_field("month", &self.month())?;
        st.end()
    }
}

// ---------------------------------------------------------------------------
// Cells
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySlot<T> {
    pub date: NaiveDate,
    pub weekday: Weekday,
    pub holiday: Option<String>,
    /// At most `cell_cap` events, sorted by symbol.
    pub events: Vec<T>,
    /// Events hidden behind the "show N more" link.
    pub overflow: usize,
}

impl<T> DaySlot<T> {
    pub fn total_events(&self) -> usize {
        self.events.len() + self.overflow
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DayCell<T> {
    Padding,
    Day(DaySlot<T>),
}

impl<T> DayCell<T> {
    pub fn slot(&self) -> Option<&DaySlot<T>> {
        match self {
            DayCell::Padding => None,
            DayCell::Day(slot) => Some(slot),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthGrid<T> {
    pub cursor: MonthCursor,
    pub prev: MonthCursor,
    pub next: MonthCursor,
    pub field: DateField,
    /// Row-major, `WEEKDAY_COLUMNS` cells per row.
    pub cells: Vec<DayCell<T>>,
}

impl<T> MonthGrid<T> {
    pub fn weeks(&self) -> impl Iterator<Item = &[DayCell<T>]> {
        self.cells.chunks(WEEKDAY_COLUMNS)
    }

    pub fn days(&self) -> impl Iterator<Item = &DaySlot<T>> {
        self.cells.iter().filter_map(DayCell::slot)
    }

    pub fn slot_for(&self, date: NaiveDate) -> Option<&DaySlot<T>> {
        self.days().find(|s| s.date == date)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekGrid<T> {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub field: DateField,
    pub days: Vec<DaySlot<T>>,
}

// ---------------------------------------------------------------------------
// GridBuilder
// ---------------------------------------------------------------------------

/// Buckets dated entries into business-day cells.
#[derive(Debug, Clone, Copy)]
pub struct GridBuilder<'a> {
    field: DateField,
    cell_cap: usize,
    holidays: Option<&'a HolidayCalendar>,
}

impl<'a> GridBuilder<'a> {
    pub fn new(field: DateField) -> Self {
        Self {
            field,
            cell_cap: DEFAULT_CELL_CAP,
            holidays: None,
        }
    }

    pub fn cell_cap(mut self, cap: usize) -> Self {
        self.cell_cap = cap;
        self
    }

    pub fn holidays(mut self, holidays: &'a HolidayCalendar) -> Self {
        self.holidays = Some(holidays);
        self
    }

    /// Month view: leading padding, one cell per weekday of the month,
    /// trailing padding to complete the last row.
    pub fn month<T: CalendarEntry + Clone>(&self, cursor: MonthCursor, entries: &[T]) -> MonthGrid<T> {
        let buckets = self.bucket(entries);

        let mut cells: Vec<DayCell<T>> = (0..leading_padding(cursor.first_day()))
            .map(|_| DayCell::Padding)
            .collect();

        for date in cursor.days().filter(|d| !is_weekend(*d)) {
            cells.push(DayCell::Day(self.slot(date, &buckets)));
        }

        while cells.len() % WEEKDAY_COLUMNS != 0 {
            cells.push(DayCell::Padding);
        }

        MonthGrid {
            cursor,
            prev: cursor.prev(),
            next: cursor.next(),
            field: self.field,
            cells,
        }
    }

    /// Week view: the Monday to Friday window containing `today`, regardless of
    /// which month is being browsed.
    pub fn week<T: CalendarEntry + Clone>(&self, today: NaiveDate, entries: &[T]) -> WeekGrid<T> {
        let buckets = self.bucket(entries);
        let start = week_start(today);

        let days: Vec<DaySlot<T>> = (0..WEEKDAY_COLUMNS as i64)
            .map(|i| self.slot(start + Duration::days(i), &buckets))
            .collect();

        WeekGrid {
            start,
            end: start + Duration::days(WEEKDAY_COLUMNS as i64 - 1),
            field: self.field,
            days,
        }
    }

    /// Every entry for one date, uncapped. Backs the "show N more" view.
    pub fn day<T: CalendarEntry + Clone>(&self, date: NaiveDate, entries: &[T]) -> Vec<T> {
        let key = iso_key(date);
        let mut matching: Vec<T> = entries
            .iter()
            .filter(|e| e.date_key(self.field) == Some(key.as_str()))
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.symbol().cmp(b.symbol()));
        matching
    }

    fn bucket<'e, T: CalendarEntry>(&self, entries: &'e [T]) -> HashMap<&'e str, Vec<&'e T>> {
        let mut buckets: HashMap<&str, Vec<&T>> = HashMap::new();
        for entry in entries {
            if let Some(key) = entry.date_key(self.field) {
                buckets.entry(key).or_default().push(entry);
            }
        }
        buckets
    }

    fn slot<T: CalendarEntry + Clone>(&self, date: NaiveDate, buckets: &HashMap<&str, Vec<&T>>) -> DaySlot<T> {
        let key = iso_key(date);
        let mut events: Vec<T> = buckets
            .get(key.as_str())
            .map(|v| v.iter().map(|e| (*e).clone()).collect())
            .unwrap_or_default();
        events.sort_by(|a, b| a.symbol().cmp(b.symbol()));

        let overflow = events.len().saturating_sub(self.cell_cap);
        events.truncate(self.cell_cap);

        DaySlot {
            date,
            weekday: date.weekday(),
            holiday: self
                .holidays
                .and_then(|h| h.name_for(date))
                .map(str::to_string),
            events,
            overflow,
        }
    }
}
