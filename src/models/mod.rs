pub mod dividend;
pub mod history;
pub mod logo;
pub mod ranking;
pub mod saved_stock;
pub mod similar;
pub mod stock;

pub use dividend::{DateField, DividendEvent};
pub use history::DividendHistoryPoint;
pub use logo::CompanyLogo;
pub use ranking::RankingSnapshot;
pub use saved_stock::{NewSavedStock, SavedStock, SavedStockUpdate};
pub use similar::SimilarCompany;
pub use stock::{DebtLevel, StockMetrics, StockRecord};

/// Normalize a ticker for joins: trimmed and uppercased.
pub fn symbol_key(symbol: &str) -> String {
    symbol.trim().to_uppercase()
}
