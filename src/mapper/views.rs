use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

use super::coerce::{parse_decimal, text_or_na};
use super::logos::LogoIndex;
use crate::calendar::CalendarEntry;
use crate::models::{
    symbol_key, DateField, DividendEvent, RankingSnapshot, SimilarCompany, StockMetrics,
    StockRecord,
};
use crate::screener::ScreenerRow;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EstimateRange {
    pub low: Option<Decimal>,
    pub high: Option<Decimal>,
    pub average: Option<Decimal>,
}

impl EstimateRange {
    fn parse(low: Option<&str>, high: Option<&str>, average: Option<&str>) -> Self {
        Self {
            low: parse_decimal(low),
            high: parse_decimal(high),
            average: parse_decimal(average),
        }
    }
}

/// Display form of a dividend calendar event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DividendEventView {
    pub symbol: String,
    pub company_name: String,
    pub logo_url: String,
    pub ex_dividend_date: Option<String>,
    pub payout_date: Option<String>,
    pub earnings_date: Option<String>,
    pub dividend_amount: Option<Decimal>,
    pub earnings: EstimateRange,
    pub revenue: EstimateRange,
}

impl DividendEventView {
    pub fn from_row(row: &DividendEvent, logos: &LogoIndex, fallback_logo: &str) -> Self {
        Self {
            symbol: symbol_key(&row.symbol),
            company_name: text_or_na(row.company_name.as_deref()),
            logo_url: logos.url_or(&row.symbol, fallback_logo),
            ex_dividend_date: row.ex_dividend_date.clone(),
            payout_date: row.payout_date.clone(),
            earnings_date: row.earnings_date.clone(),
            dividend_amount: parse_decimal(row.dividend_amount.as_deref()),
            earnings: EstimateRange::parse(
                row.earnings_low.as_deref(),
                row.earnings_high.as_deref(),
                row.earnings_average.as_deref(),
            ),
            revenue: EstimateRange::parse(
                row.revenue_low.as_deref(),
                row.revenue_high.as_deref(),
                row.revenue_average.as_deref(),
            ),
        }
    }

    /// Ex-dividend date, if it parses.
    pub fn ex_dividend_day(&self) -> Option<NaiveDate> {
        self.ex_dividend_date
            .as_deref()
            .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
    }
}

impl CalendarEntry for DividendEventView {
    fn symbol(&self) -> &str {
        &self.symbol
    }

    fn date_key(&self, field: DateField) -> Option<&str> {
        match field {
            DateField::ExDividend => self.ex_dividend_date.as_deref(),
            DateField::Payout => self.payout_date.as_deref(),
            DateField::Earnings => self.earnings_date.as_deref(),
        }
    }
}

pub fn dividend_views(rows: &[DividendEvent], logos: &LogoIndex, fallback_logo: &str) -> Vec<DividendEventView> {
    rows.iter()
        .map(|r| DividendEventView::from_row(r, logos, fallback_logo))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarCompanyView {
    pub symbol: String,
    pub similar_symbol: String,
    pub company_name: String,
    pub logo_url: String,
    pub revenue_estimate: Option<Decimal>,
    pub dividend_yield: Option<Decimal>,
    pub risk: String,
}

pub fn similar_views(rows: &[SimilarCompany], logos: &LogoIndex, fallback_logo: &str) -> Vec<SimilarCompanyView> {
    rows.iter()
        .map(|r| SimilarCompanyView {
            symbol: symbol_key(&r.symbol),
            similar_symbol: symbol_key(&r.similar_symbol),
            company_name: text_or_na(r.company_name.as_deref()),
            logo_url: logos.url_or(&r.similar_symbol, fallback_logo),
            revenue_estimate: parse_decimal(r.revenue_estimate.as_deref()),
            dividend_yield: parse_decimal(r.dividend_yield.as_deref()),
            risk: text_or_na(r.risk.as_deref()),
        })
        .collect()
}

/// Join stocks with their metrics side-table rows by uppercased symbol.
/// Stocks without a metrics row keep `None` metric fields.
pub fn screener_rows(stocks: &[StockRecord], metrics: &[StockMetrics], logos: &LogoIndex) -> Vec<ScreenerRow> {
    let by_symbol: HashMap<String, &StockMetrics> =
        metrics.iter().map(|m| (symbol_key(&m.symbol), m)).collect();

    stocks
        .iter()
        .map(|s| {
            let key = symbol_key(&s.symbol);
            let m = by_symbol.get(&key);
            ScreenerRow {
                logo_url: logos.get(&key).map(str::to_string),
                symbol: key,
                company_name: s.company_name.clone(),
                sector: s.sector.clone(),
                industry: s.industry.clone(),
                exchange: s.exchange.clone(),
                price: s.price,
                dividend_yield: m.and_then(|m| m.dividend_yield),
                payout_ratio: m.and_then(|m| m.payout_ratio),
                health_score: m.and_then(|m| m.health_score),
                debt_level: m.and_then(|m| m.debt()),
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingView {
    pub rank: i32,
    pub symbol: String,
    pub score: Option<Decimal>,
    pub snapshot_date: NaiveDate,
    pub logo_url: String,
}

pub fn ranking_views(rows: &[RankingSnapshot], logos: &LogoIndex, fallback_logo: &str) -> Vec<RankingView> {
    let mut out: Vec<RankingView> = rows
        .iter()
        .map(|r| RankingView {
            rank: r.rank,
            symbol: symbol_key(&r.symbol),
            score: r.score,
            snapshot_date: r.snapshot_date,
            logo_url: logos.url_or(&r.symbol, fallback_logo),
        })
        .collect();
    out.sort_by_key(|r| r.rank);
    out
}
