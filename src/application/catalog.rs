use crate::domain::entities::article::{Article, ArticleUpdate, NewArticle};
use crate::domain::entities::category::{Category, NewCategory};
use crate::domain::entities::stockroom::{NewStockroom, Stockroom, StockroomUpdate};
use crate::domain::entities::supplier::{NewSupplier, Supplier, SupplierUpdate};
use crate::domain::error::DomainError;
use crate::domain::events::DataEvent;
use crate::domain::ports::event_bus::EventBus;
use crate::domain::ports::inventory_api::{ArticleQuery, InventoryApi, ListQuery, Paged};
use std::sync::Arc;
use tracing::debug;

/// Page size for fetch-all loops.
pub const FETCH_ALL_PER_PAGE: u32 = 100;

/// Default page cap for fetch-all loops when the caller has no opinion.
pub const DEFAULT_PAGE_CAP: u32 = 50;

/// Fetch every page of the active-article listing, sequentially, up to
/// `max_pages`. Hitting the cap with pages still outstanding is an error,
/// never a silent truncation.
pub async fn fetch_all_articles(
    api: &dyn InventoryApi,
    max_pages: u32,
) -> Result<Vec<Article>, DomainError> {
    if max_pages == 0 {
        return Err(DomainError::Validation("max_pages must be at least 1".into()));
    }

    let mut all = Vec::new();
    let mut page = 1u32;
    loop {
        let response = api
            .list_articles(&ArticleQuery {
                page: Some(page),
                per_page: Some(FETCH_ALL_PER_PAGE),
                is_active: Some(true),
                ..Default::default()
            })
            .await?;

        all.extend(response.items);
        let has_more = response.meta.current_page < response.meta.total_pages;
        if !has_more {
            break;
        }
        if page >= max_pages {
            return Err(DomainError::PageCapExceeded {
                fetched: page,
                total_pages: response.meta.total_pages,
                cap: max_pages,
            });
        }
        page += 1;
    }

    debug!("fetched {} articles over {page} page(s)", all.len());
    Ok(all)
}

/// Article/category/supplier/stockroom CRUD over the API, with input
/// validation and creation events.
pub struct CatalogUseCase {
    api: Arc<dyn InventoryApi>,
    bus: Arc<dyn EventBus>,
}

impl CatalogUseCase {
    pub fn new(api: Arc<dyn InventoryApi>, bus: Arc<dyn EventBus>) -> Self {
        Self { api, bus }
    }

    pub async fn create_article(&self, data: &NewArticle) -> Result<Article, DomainError> {
        if data.sku.trim().is_empty() || data.name.trim().is_empty() {
            return Err(DomainError::Validation("SKU and name are required".into()));
        }
        if data.unit_price < 0.0 || data.unit_cost < 0.0 {
            return Err(DomainError::Validation(
                "Unit price and unit cost must be non-negative".into(),
            ));
        }
        if data.stock.is_some_and(|s| s < 0) {
            return Err(DomainError::Validation("Stock must be non-negative".into()));
        }

        let article = self.api.create_article(data).await?;
        self.bus.publish(&DataEvent::ArticleCreated {
            article_id: article.id.clone(),
        });
        Ok(article)
    }

    pub async fn list_articles(&self, query: &ArticleQuery) -> Result<Paged<Article>, DomainError> {
        self.api.list_articles(query).await
    }

    pub async fn get_article(&self, id: &str) -> Result<Article, DomainError> {
        self.api.get_article(id).await
    }

    pub async fn update_article(
        &self,
        id: &str,
        data: &ArticleUpdate,
    ) -> Result<Article, DomainError> {
        self.api.update_article(id, data).await
    }

    pub async fn delete_article(&self, id: &str) -> Result<(), DomainError> {
        self.api.delete_article(id).await
    }

    pub async fn fetch_all_articles(&self, max_pages: u32) -> Result<Vec<Article>, DomainError> {
        fetch_all_articles(self.api.as_ref(), max_pages).await
    }

    pub async fn create_category(&self, data: &NewCategory) -> Result<Category, DomainError> {
        if data.name.trim().is_empty() {
            return Err(DomainError::Validation("Category name is required".into()));
        }
        self.api.create_category(data).await
    }

    pub async fn list_categories(&self, query: &ListQuery) -> Result<Paged<Category>, DomainError> {
        self.api.list_categories(query).await
    }

    pub async fn create_supplier(&self, data: &NewSupplier) -> Result<Supplier, DomainError> {
        if data.name.trim().is_empty() || data.nit.trim().is_empty() {
            return Err(DomainError::Validation(
                "Supplier name and NIT are required".into(),
            ));
        }
        self.api.create_supplier(data).await
    }

    pub async fn list_suppliers(&self, query: &ListQuery) -> Result<Paged<Supplier>, DomainError> {
        self.api.list_suppliers(query).await
    }

    pub async fn update_supplier(
        &self,
        id: &str,
        data: &SupplierUpdate,
    ) -> Result<Supplier, DomainError> {
        self.api.update_supplier(id, data).await
    }

    pub async fn create_stockroom(&self, data: &NewStockroom) -> Result<Stockroom, DomainError> {
        if data.name.trim().is_empty() {
            return Err(DomainError::Validation("Stockroom name is required".into()));
        }
        self.api.create_stockroom(data).await
    }

    pub async fn list_stockrooms(&self, query: &ListQuery) -> Result<Paged<Stockroom>, DomainError> {
        self.api.list_stockrooms(query).await
    }

    pub async fn update_stockroom(
        &self,
        id: &str,
        data: &StockroomUpdate,
    ) -> Result<Stockroom, DomainError> {
        self.api.update_stockroom(id, data).await
    }
}
