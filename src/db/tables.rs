use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use super::{
    dividend_repo, history_repo, logo_repo, ranking_repo, saved_stock_repo, similar_repo,
    stock_repo,
};
use crate::models::{
    CompanyLogo, DateField, DividendEvent, DividendHistoryPoint, NewSavedStock, RankingSnapshot,
    SavedStock, SavedStockUpdate, SimilarCompany, StockMetrics, StockRecord,
};

/// The hosted tables, as the rest of the crate sees them.
///
/// `PgTables` talks to the hosted Postgres; tests substitute an in-memory
/// implementation.
#[async_trait]
pub trait TableSource: Send + Sync {
    async fn ping(&self) -> anyhow::Result<()>;

    async fn dividend_events_between(
        &self,
        field: DateField,
        from: NaiveDate,
        to: NaiveDate,
    ) -> anyhow::Result<Vec<DividendEvent>>;

    async fn dividend_events_for_symbol(&self, symbol: &str) -> anyhow::Result<Vec<DividendEvent>>;

    async fn company_logos(&self) -> anyhow::Result<Vec<CompanyLogo>>;

    async fn similar_companies(&self, symbol: &str) -> anyhow::Result<Vec<SimilarCompany>>;

    async fn latest_rankings(&self, limit: i64) -> anyhow::Result<Vec<RankingSnapshot>>;

    async fn dividend_history(&self, symbol: &str) -> anyhow::Result<Vec<DividendHistoryPoint>>;

    async fn stocks(&self) -> anyhow::Result<Vec<StockRecord>>;

    async fn stock_metrics(&self) -> anyhow::Result<Vec<StockMetrics>>;

    async fn saved_stocks(&self, user_id: Uuid) -> anyhow::Result<Vec<SavedStock>>;

    async fn insert_saved_stock(&self, user_id: Uuid, new: &NewSavedStock) -> anyhow::Result<SavedStock>;

    async fn update_saved_stock(
        &self,
        user_id: Uuid,
        id: Uuid,
        update: &SavedStockUpdate,
    ) -> anyhow::Result<Option<SavedStock>>;

    async fn delete_saved_stock(&self, user_id: Uuid, id: Uuid) -> anyhow::Result<bool>;

    async fn set_favorite(
        &self,
        user_id: Uuid,
        id: Uuid,
        favorite: Option<bool>,
    ) -> anyhow::Result<Option<SavedStock>>;
}

#[derive(Debug, Clone)]
pub struct PgTables {
    pool: PgPool,
}

impl PgTables {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl TableSource for PgTables {
    async fn ping(&self) -> anyhow::Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn dividend_events_between(
        &self,
        field: DateField,
        from: NaiveDate,
        to: NaiveDate,
    ) -> anyhow::Result<Vec<DividendEvent>> {
        dividend_repo::get_events_between(&self.pool, field, from, to).await
    }

    async fn dividend_events_for_symbol(&self, symbol: &str) -> anyhow::Result<Vec<DividendEvent>> {
        dividend_repo::get_events_for_symbol(&self.pool, symbol).await
    }

    async fn company_logos(&self) -> anyhow::Result<Vec<CompanyLogo>> {
        logo_repo::get_all_logos(&self.pool).await
    }

    async fn similar_companies(&self, symbol: &str) -> anyhow::Result<Vec<SimilarCompany>> {
        similar_repo::get_similar(&self.pool, symbol).await
    }

    async fn latest_rankings(&self, limit: i64) -> anyhow::Result<Vec<RankingSnapshot>> {
        ranking_repo::get_latest_rankings(&self.pool, limit).await
    }

    async fn dividend_history(&self, symbol: &str) -> anyhow::Result<Vec<DividendHistoryPoint>> {
        history_repo::get_history(&self.pool, symbol).await
    }

    async fn stocks(&self) -> anyhow::Result<Vec<StockRecord>> {
        stock_repo::get_all_stocks(&self.pool).await
    }

    async fn stock_metrics(&self) -> anyhow::Result<Vec<StockMetrics>> {
        stock_repo::get_all_metrics(&self.pool).await
    }

    async fn saved_stocks(&self, user_id: Uuid) -> anyhow::Result<Vec<SavedStock>> {
        saved_stock_repo::get_for_user(&self.pool, user_id).await
    }

    async fn insert_saved_stock(&self, user_id: Uuid, new: &NewSavedStock) -> anyhow::Result<SavedStock> {
        saved_stock_repo::insert(&self.pool, user_id, new).await
    }

    async fn update_saved_stock(
        &self,
        user_id: Uuid,
        id: Uuid,
        update: &SavedStockUpdate,
    ) -> anyhow::Result<Option<SavedStock>> {
        saved_stock_repo::update(&self.pool, user_id, id, update).await
    }

    async fn delete_saved_stock(&self, user_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
        saved_stock_repo::delete(&self.pool, user_id, id).await
    }

    async fn set_favorite(
        &self,
        user_id: Uuid,
        id: Uuid,
        favorite: Option<bool>,
    ) -> anyhow::Result<Option<SavedStock>> {
        saved_stock_repo::set_favorite(&self.pool, user_id, id, favorite).await
    }
}
