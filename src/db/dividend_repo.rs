use chrono::NaiveDate;
use sqlx::PgPool;

use crate::models::{symbol_key, DateField, DividendEvent};

const COLUMNS: &str = "symbol, company_name, ex_dividend_date, payout_date, earnings_date, \
    dividend_amount, earnings_low, earnings_high, earnings_average, \
    revenue_low, revenue_high, revenue_average";

/// Events whose `field` date string falls in `[from, to]`.
///
/// Dates are stored as text, so this is a lexicographic range over ISO
/// strings. Malformed values may slip into the range; the calendar drops
/// them when it buckets by exact date.
pub async fn get_events_between(
    pool: &PgPool,
    field: DateField,
    from: NaiveDate,
    to: NaiveDate,
) -> anyhow::Result<Vec<DividendEvent>> {
    let column = field.column();
    let sql = format!(
        "SELECT {COLUMNS} FROM dividend_events WHERE {column} >= $1 AND {column} <= $2 ORDER BY {column}, symbol"
    );

    let events = sqlx::query_as::<_, DividendEvent>(&sql)
        .bind(from.format("%Y-%m-%d").to_string())
        .bind(to.format("%Y-%m-%d").to_string())
        .fetch_all(pool)
        .await?;

    Ok(events)
}

/// All events for one symbol, newest ex-dividend date first.
pub async fn get_events_for_symbol(pool: &PgPool, symbol: &str) -> anyhow::Result<Vec<DividendEvent>> {
    let sql = format!(
        "SELECT {COLUMNS} FROM dividend_events WHERE UPPER(symbol) = $1 ORDER BY ex_dividend_date DESC NULLS LAST"
    );

    let events = sqlx::query_as::<_, DividendEvent>(&sql)
        .bind(symbol_key(symbol))
        .fetch_all(pool)
        .await?;

    Ok(events)
}
