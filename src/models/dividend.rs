use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

/// Database row for the `dividend_events` table.
///
/// Dates are stored as ISO `YYYY-MM-DD` strings and estimates as numeric
/// strings. Either may be absent or malformed; the mapper decides what to do.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
pub struct DividendEvent {
    pub symbol: String,
    pub company_name: Option<String>,
    pub ex_dividend_date: Option<String>,
    pub payout_date: Option<String>,
    pub earnings_date: Option<String>,
    pub dividend_amount: Option<String>,
    pub earnings_low: Option<String>,
    pub earnings_high: Option<String>,
    pub earnings_average: Option<String>,
    pub revenue_low: Option<String>,
    pub revenue_high: Option<String>,
    pub revenue_average: Option<String>,
}

impl DividendEvent {
    pub fn date(&self, field: DateField) -> Option<&str> {
        match field {
            DateField::ExDividend => self.ex_dividend_date.as_deref(),
            DateField::Payout => self.payout_date.as_deref(),
            DateField::Earnings => self.earnings_date.as_deref(),
        }
    }
}

// ---------------------------------------------------------------------------
// DateField: which date column a calendar buckets on
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateField {
    #[default]
    ExDividend,
    Payout,
    Earnings,
}

impl DateField {
    /// Column name in `dividend_events`. Only these three strings are ever
    /// interpolated into SQL.
    pub fn column(self) -> &'static str {
        match self {
            DateField::ExDividend => "ex_dividend_date",
            DateField::Payout => "payout_date",
            DateField::Earnings => "earnings_date",
        }
    }

    pub fn from_query_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "ex_dividend" | "ex-dividend" | "exdividend" | "ex_dividend_date" => {
                Some(DateField::ExDividend)
            }
            "payout" | "payout_date" | "payment" => Some(DateField::Payout),
            "earnings" | "earnings_date" => Some(DateField::Earnings),
            _ => None,
        }
    }
}

impl fmt::Display for DateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateField::ExDividend => write!(f, "ex_dividend"),
            DateField::Payout => write!(f, "payout"),
            DateField::Earnings => write!(f, "earnings"),
        }
    }
}
