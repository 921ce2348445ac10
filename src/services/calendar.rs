use chrono::{Duration, NaiveDate};

use super::loader;
use crate::calendar::{week_start, GridBuilder, MonthCursor, MonthGrid, WeekGrid, WEEKDAY_COLUMNS};
use crate::mapper::{dividend_views, DividendEventView};
use crate::models::DateField;
use crate::AppState;

async fn views_between(
    state: &AppState,
    field: DateField,
    from: NaiveDate,
    to: NaiveDate,
) -> anyhow::Result<Vec<DividendEventView>> {
    let (events, logos) = tokio::join!(
        loader::dividend_events_between(state, field, from, to),
        loader::logo_index(state),
    );
    Ok(dividend_views(&events?, &logos, &state.config.fallback_logo_url))
}

fn builder(state: &AppState, field: DateField) -> GridBuilder<'_> {
    GridBuilder::new(field)
        .cell_cap(state.config.calendar_cell_cap)
        .holidays(&state.holidays)
}

pub async fn month_view(
    state: &AppState,
    cursor: MonthCursor,
    field: DateField,
) -> anyhow::Result<MonthGrid<DividendEventView>> {
    let views = views_between(state, field, cursor.first_day(), cursor.last_day()).await?;
    Ok(builder(state, field).month(cursor, &views))
}

pub async fn week_view(
    state: &AppState,
    today: NaiveDate,
    field: DateField,
) -> anyhow::Result<WeekGrid<DividendEventView>> {
    let start = week_start(today);
    let end = start + Duration::days(WEEKDAY_COLUMNS as i64 - 1);
    let views = views_between(state, field, start, end).await?;
    Ok(builder(state, field).week(today, &views))
}

/// Every event on one date, for the "show N more" listing.
pub async fn day_view(
    state: &AppState,
    date: NaiveDate,
    field: DateField,
) -> anyhow::Result<Vec<DividendEventView>> {
    let views = views_between(state, field, date, date).await?;
    Ok(builder(state, field).day(date, &views))
}
