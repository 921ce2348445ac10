//! Row → view-model mapping: logo joins, numeric coercion and defaults.

pub mod coerce;
pub mod logos;
pub mod views;

pub use coerce::{parse_decimal, text_or_na, NOT_AVAILABLE};
pub use logos::LogoIndex;
pub use views::{
    dividend_views, ranking_views, screener_rows, similar_views, DividendEventView,
    EstimateRange, RankingView, SimilarCompanyView,
};
