use async_trait::async_trait;
use contracts::domain::a002_shop_remainder::aggregate::InventoryItem;
use sea_orm::DatabaseConnection;
use thiserror::Error;

use crate::domain::{a001_shop, a002_shop_remainder};

/// Failures of a category analysis
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Record source unavailable: {0}")]
    SourceUnavailable(String),
}

/// Inventory data of shops, looked up by shop name
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Items of the shop whose name matches exactly; no ordering guarantee
    async fn fetch_items(&self, shop_name: &str) -> Result<Vec<InventoryItem>, AnalysisError>;

    /// Distinct shop names available for analysis
    async fn list_shops(&self) -> Result<Vec<String>, AnalysisError>;
}

/// Record source backed by the `tab_tab` / `tab_shop_rem` tables
pub struct SeaOrmRecordSource<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SeaOrmRecordSource<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RecordSource for SeaOrmRecordSource<'_> {
    async fn fetch_items(&self, shop_name: &str) -> Result<Vec<InventoryItem>, AnalysisError> {
        let rows = a002_shop_remainder::repository::find_by_shop_name(self.db, shop_name)
            .await
            .map_err(|e| AnalysisError::SourceUnavailable(e.to_string()))?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_shops(&self) -> Result<Vec<String>, AnalysisError> {
        a001_shop::repository::list_names(self.db)
            .await
            .map_err(|e| AnalysisError::SourceUnavailable(e.to_string()))
    }
}
