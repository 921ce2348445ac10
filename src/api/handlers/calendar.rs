use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use super::{respond, ApiResponse};
use crate::calendar::{Holiday, MonthCursor, MonthGrid, WeekGrid};
use crate::errors::AppError;
use crate::mapper::DividendEventView;
use crate::models::DateField;
use crate::services::calendar;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct FieldQuery {
    pub field: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MonthQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub field: Option<String>,
}

fn parse_field(raw: Option<&str>) -> Result<DateField, AppError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(DateField::default()),
        Some(s) => DateField::from_query_str(s)
            .ok_or_else(|| AppError::BadRequest(format!("unknown date field '{s}'"))),
    }
}

/// Month grid; defaults to the current month when year or month is omitted.
pub async fn month(
    State(state): State<AppState>,
    Query(q): Query<MonthQuery>,
) -> Result<Json<ApiResponse<MonthGrid<DividendEventView>>>, AppError> {
    let field = parse_field(q.field.as_deref())?;
    let current = MonthCursor::containing(Utc::now().date_naive());
    let year = q.year.unwrap_or(current.year());
    let month = q.month.unwrap_or(current.month());
    let cursor = MonthCursor::new(year, month)
        .ok_or_else(|| AppError::BadRequest(format!("invalid month {year}-{month}")))?;

    Ok(respond(calendar::month_view(&state, cursor, field).await, "month calendar"))
}

pub async fn week(
    State(state): State<AppState>,
    Query(q): Query<FieldQuery>,
) -> Result<Json<ApiResponse<WeekGrid<DividendEventView>>>, AppError> {
    let field = parse_field(q.field.as_deref())?;
    let today = Utc::now().date_naive();
    Ok(respond(calendar::week_view(&state, today, field).await, "week calendar"))
}

pub async fn day(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Query(q): Query<FieldQuery>,
) -> Result<Json<ApiResponse<Vec<DividendEventView>>>, AppError> {
    let field = parse_field(q.field.as_deref())?;
    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::BadRequest(format!("invalid date '{date}', expected YYYY-MM-DD")))?;
    Ok(respond(calendar::day_view(&state, date, field).await, "day events"))
}

pub async fn holidays(State(state): State<AppState>) -> Json<ApiResponse<Vec<Holiday>>> {
    ApiResponse::ok(state.holidays.entries())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_field_defaults_and_rejects() {
        assert_eq!(parse_field(None).unwrap(), DateField::ExDividend);
        assert_eq!(parse_field(Some("  ")).unwrap(), DateField::ExDividend);
        assert_eq!(parse_field(Some("payout")).unwrap(), DateField::Payout);
        assert!(matches!(parse_field(Some("split")), Err(AppError::BadRequest(_))));
    }
}
