use crate::domain::entities::sale::ArticleRef;
use crate::domain::error::DomainError;
use crate::domain::ports::inventory_api::InventoryApi;
use crate::domain::values::replenishment::{
    compute_replenishment, ReplenishmentInputs, ReplenishmentMetrics, StockStatus,
};
use serde::Serialize;
use std::sync::Arc;

/// Replenishment report ready for display: the backend metrics plus the
/// locally classified stock status.
#[derive(Debug, Clone, Serialize)]
pub struct ReplenishmentView {
    pub article: ArticleRef,
    pub metrics: ReplenishmentMetrics,
    pub status: StockStatus,
}

pub struct ReplenishmentUseCase {
    api: Arc<dyn InventoryApi>,
}

impl ReplenishmentUseCase {
    pub fn new(api: Arc<dyn InventoryApi>) -> Self {
        Self { api }
    }

    pub async fn by_article(&self, article_id: &str) -> Result<ReplenishmentView, DomainError> {
        if article_id.trim().is_empty() {
            return Err(DomainError::Validation(
                "Please enter a SKU or article id".into(),
            ));
        }
        let report = self.api.replenishment_by_article(article_id.trim()).await?;
        let status = report.metrics.stock_status();
        Ok(ReplenishmentView {
            article: report.article,
            metrics: report.metrics,
            status,
        })
    }

    pub async fn by_sku(&self, sku: &str) -> Result<ReplenishmentView, DomainError> {
        if sku.trim().is_empty() {
            return Err(DomainError::Validation(
                "Please enter a SKU or article id".into(),
            ));
        }
        let report = self.api.replenishment_by_sku(sku.trim()).await?;
        let status = report.metrics.stock_status();
        Ok(ReplenishmentView {
            article: report.article,
            metrics: report.metrics,
            status,
        })
    }

    /// Evaluate the reorder-point formula locally for caller-supplied
    /// numbers, without touching the backend.
    pub fn evaluate(
        &self,
        inputs: &ReplenishmentInputs,
    ) -> Result<ReplenishmentMetrics, DomainError> {
        compute_replenishment(inputs)
    }
}
