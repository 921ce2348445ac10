use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Database row for `similar_companies`. A denormalized join result; the
/// numeric columns arrive as text.
#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow)]
pub struct SimilarCompany {
    pub symbol: String,
    pub similar_symbol: String,
    pub company_name: Option<String>,
    pub revenue_estimate: Option<String>,
    pub dividend_yield: Option<String>,
    pub risk: Option<String>,
}
