pub mod grid;
pub mod holidays;

pub use grid::{
    is_weekend, leading_padding, week_start, CalendarEntry, DayCell, DaySlot, GridBuilder,
    MonthCursor, MonthGrid, WeekGrid, DEFAULT_CELL_CAP, WEEKDAY_COLUMNS,
};
pub use holidays::{Holiday, HolidayCalendar};
