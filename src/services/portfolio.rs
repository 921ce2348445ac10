use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use super::loader;
use crate::api::ws_types::{CacheInvalidation, DashboardEvent, PortfolioAction, PortfolioChange};
use crate::cache::tables;
use crate::mapper::LogoIndex;
use crate::models::{NewSavedStock, SavedStock, SavedStockUpdate};
use crate::AppState;

#[derive(Debug, Clone, Serialize)]
pub struct SavedStockView {
    #[serde(flatten)]
    pub stock: SavedStock,
    pub logo_url: String,
    /// quantity × dividend rate; `None` when the rate is unknown.
    pub annual_income: Option<Decimal>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PortfolioSummary {
    pub positions: usize,
    pub favorites: usize,
    pub projected_annual_income: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct PortfolioView {
    pub user_id: Uuid,
    pub summary: PortfolioSummary,
    pub positions: Vec<SavedStockView>,
}

pub fn annual_income(stock: &SavedStock) -> Option<Decimal> {
    stock.dividend_rate.map(|rate| stock.quantity * rate)
}

/// Totals over a user's saved stocks. Unknown dividend rates contribute 0.
pub fn summarize(stocks: &[SavedStock]) -> PortfolioSummary {
    PortfolioSummary {
        positions: stocks.len(),
        favorites: stocks.iter().filter(|s| s.is_favorite).count(),
        projected_annual_income: stocks.iter().filter_map(annual_income).sum(),
    }
}

/// Favorites first, then by symbol.
pub fn order_positions(stocks: &mut [SavedStock]) {
    stocks.sort_by(|a, b| {
        b.is_favorite
            .cmp(&a.is_favorite)
            .then_with(|| a.symbol.cmp(&b.symbol))
    });
}

pub fn build_view(user_id: Uuid, stocks: &[SavedStock], logos: &LogoIndex, fallback_logo: &str) -> PortfolioView {
    let mut ordered = stocks.to_vec();
    order_positions(&mut ordered);

    PortfolioView {
        user_id,
        summary: summarize(&ordered),
        positions: ordered
            .into_iter()
            .map(|stock| SavedStockView {
                logo_url: logos.url_or(&stock.symbol, fallback_logo),
                annual_income: annual_income(&stock),
                stock,
            })
            .collect(),
    }
}

pub async fn load_portfolio(state: &AppState, user_id: Uuid) -> anyhow::Result<PortfolioView> {
    let (stocks, logos) = tokio::join!(loader::saved_stocks(state, user_id), loader::logo_index(state));
    Ok(build_view(user_id, &stocks?, &logos, &state.config.fallback_logo_url))
}

/// Drop cached saved-stock reads and tell subscribers what changed.
async fn after_mutation(state: &AppState, user_id: Uuid, stock_id: Uuid, action: PortfolioAction, symbol: Option<String>) {
    metrics::counter!("portfolio_mutations_total").increment(1);

    let entries = state.cache.invalidate_table(tables::SAVED_STOCKS).await;
    state.publish(DashboardEvent::CacheInvalidated(CacheInvalidation {
        table: tables::SAVED_STOCKS.into(),
        entries,
    }));
    state.publish(DashboardEvent::PortfolioChanged(PortfolioChange {
        user_id,
        stock_id,
        action,
        symbol,
    }));

    tracing::info!(user_id = %user_id, stock_id = %stock_id, action = ?action, "Portfolio changed");
}

pub async fn add_stock(state: &AppState, user_id: Uuid, new: &NewSavedStock) -> anyhow::Result<SavedStock> {
    let saved = state.tables.insert_saved_stock(user_id, new).await?;
    after_mutation(state, user_id, saved.id, PortfolioAction::Added, Some(saved.symbol.clone())).await;
    Ok(saved)
}

pub async fn update_stock(
    state: &AppState,
    user_id: Uuid,
    id: Uuid,
    update: &SavedStockUpdate,
) -> anyhow::Result<Option<SavedStock>> {
    let updated = state.tables.update_saved_stock(user_id, id, update).await?;
    if let Some(stock) = &updated {
        after_mutation(state, user_id, id, PortfolioAction::Updated, Some(stock.symbol.clone())).await;
    }
    Ok(updated)
}

pub async fn remove_stock(state: &AppState, user_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
    let removed = state.tables.delete_saved_stock(user_id, id).await?;
    if removed {
        after_mutation(state, user_id, id, PortfolioAction::Removed, None).await;
    }
    Ok(removed)
}

/// Set the favorite flag, or flip it when `favorite` is `None`. A direct
/// write with no version check.
pub async fn set_favorite(
    state: &AppState,
    user_id: Uuid,
    id: Uuid,
    favorite: Option<bool>,
) -> anyhow::Result<Option<SavedStock>> {
    let updated = state.tables.set_favorite(user_id, id, favorite).await?;
    if let Some(stock) = &updated {
        after_mutation(state, user_id, id, PortfolioAction::FavoriteChanged, Some(stock.symbol.clone())).await;
    }
    Ok(updated)
}
