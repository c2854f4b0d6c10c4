use crate::domain::entities::movement::{MovementSummary, NewMovement, StockMovement};
use crate::domain::entities::sale::{NewSale, SaleRecord, SalesSummary, TopSellingReport};
use crate::domain::error::DomainError;
use crate::domain::events::DataEvent;
use crate::domain::ports::event_bus::EventBus;
use crate::domain::ports::inventory_api::{HistoryQuery, InventoryApi, PageSlice};
use std::sync::Arc;

/// Sale and movement recording plus the history listings and summaries.
pub struct HistoryUseCase {
    api: Arc<dyn InventoryApi>,
    bus: Arc<dyn EventBus>,
}

impl HistoryUseCase {
    pub fn new(api: Arc<dyn InventoryApi>, bus: Arc<dyn EventBus>) -> Self {
        Self { api, bus }
    }

    pub async fn record_sale(&self, data: &NewSale) -> Result<SaleRecord, DomainError> {
        if data.id_article.trim().is_empty() || data.id_stockroom.trim().is_empty() {
            return Err(DomainError::Validation(
                "Article and stockroom are required".into(),
            ));
        }
        if data.quantity <= 0 {
            return Err(DomainError::Validation(format!(
                "Quantity must be positive, got {}",
                data.quantity
            )));
        }
        if data.unit_price.is_some_and(|p| p < 0.0) {
            return Err(DomainError::Validation(
                "Unit price must be non-negative".into(),
            ));
        }

        let sale = self.api.create_sale(data).await?;
        self.bus.publish(&DataEvent::SaleRecorded {
            article_id: sale.id_article.clone(),
        });
        Ok(sale)
    }

    pub async fn record_movement(&self, data: &NewMovement) -> Result<StockMovement, DomainError> {
        if data.id_article.trim().is_empty() || data.id_stockroom.trim().is_empty() {
            return Err(DomainError::Validation(
                "Article and stockroom are required".into(),
            ));
        }
        if data.quantity <= 0 {
            return Err(DomainError::Validation(format!(
                "Quantity must be positive, got {}",
                data.quantity
            )));
        }

        let movement = self.api.create_movement(data).await?;
        self.bus.publish(&DataEvent::MovementRecorded {
            article_id: movement.id_article.clone(),
        });
        Ok(movement)
    }

    pub async fn sales(&self, query: &HistoryQuery) -> Result<PageSlice<SaleRecord>, DomainError> {
        self.api.list_sales(query).await
    }

    pub async fn sales_summary(&self, query: &HistoryQuery) -> Result<SalesSummary, DomainError> {
        self.api.sales_summary(query).await
    }

    pub async fn top_selling(
        &self,
        stockroom_id: Option<&str>,
        days: Option<u32>,
        limit: Option<u32>,
    ) -> Result<TopSellingReport, DomainError> {
        self.api.top_selling(stockroom_id, days, limit).await
    }

    pub async fn movements(
        &self,
        query: &HistoryQuery,
    ) -> Result<PageSlice<StockMovement>, DomainError> {
        self.api.list_movements(query).await
    }

    pub async fn movement_summary(
        &self,
        query: &HistoryQuery,
    ) -> Result<MovementSummary, DomainError> {
        self.api.movement_summary(query).await
    }
}
