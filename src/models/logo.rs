use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Database row for `company_logos`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CompanyLogo {
    pub symbol: String,
    pub logo_url: Option<String>,
}
