use crate::domain::entities::article::{Article, ArticleUpdate, NewArticle};
use crate::domain::entities::category::{Category, NewCategory};
use crate::domain::entities::movement::{
    MovementSummary, MovementType, NewMovement, StockMovement,
};
use crate::domain::entities::purchase_order::{
    NewPurchaseOrder, NewPurchaseOrderLine, PurchaseOrder,
};
use crate::domain::entities::sale::{ArticleRef, NewSale, SaleRecord, SalesSummary, TopSellingReport};
use crate::domain::entities::stock_alert::StockAlert;
use crate::domain::entities::stockroom::{NewStockroom, Stockroom, StockroomUpdate};
use crate::domain::entities::supplier::{NewSupplier, Supplier, SupplierUpdate};
use crate::domain::entities::user::{LoginPayload, Registration, User, UserUpdate};
use crate::domain::error::DomainError;
use crate::domain::values::replenishment::ReplenishmentMetrics;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Pagination metadata on enveloped list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageMeta {
    pub total_results: u32,
    pub total_pages: u32,
    pub current_page: u32,
    pub per_page: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paged<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}

/// Bare page envelope used by the history listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageSlice<T> {
    pub rows: Vec<T>,
    pub count: u32,
    pub limit: u32,
    pub offset: u32,
}

#[derive(Debug, Clone, Default)]
pub struct ArticleQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub sku: Option<String>,
    pub name: Option<String>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub name: Option<String>,
    pub is_active: Option<bool>,
}

/// Window + paging for sales and movement history. `movement_type` is
/// only meaningful on the movements listing.
#[derive(Debug, Clone, Default)]
pub struct HistoryQuery {
    pub article_id: Option<String>,
    pub stockroom_id: Option<String>,
    pub movement_type: Option<MovementType>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

/// Replenishment endpoint payload: article identity plus computed metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplenishmentReport {
    pub article: ArticleRef,
    pub metrics: ReplenishmentMetrics,
}

/// Typed surface of the inventory REST backend. Stateless apart from the
/// bearer token, which is replaced on login/logout.
#[async_trait]
pub trait InventoryApi: Send + Sync {
    fn set_token(&self, token: Option<String>);

    // Auth
    async fn login(&self, email: &str, password: &str) -> Result<LoginPayload, DomainError>;
    async fn register(&self, data: &Registration) -> Result<User, DomainError>;
    async fn update_user(&self, data: &UserUpdate) -> Result<(), DomainError>;
    async fn request_recovery(&self, email: &str) -> Result<bool, DomainError>;
    async fn login_with_temp_code(
        &self,
        email: &str,
        code: &str,
    ) -> Result<LoginPayload, DomainError>;
    async fn health(&self) -> Result<String, DomainError>;

    // Articles
    async fn create_article(&self, data: &NewArticle) -> Result<Article, DomainError>;
    async fn list_articles(&self, query: &ArticleQuery) -> Result<Paged<Article>, DomainError>;
    async fn get_article(&self, id: &str) -> Result<Article, DomainError>;
    async fn update_article(
        &self,
        id: &str,
        data: &ArticleUpdate,
    ) -> Result<Article, DomainError>;
    async fn delete_article(&self, id: &str) -> Result<(), DomainError>;

    // Categories
    async fn create_category(&self, data: &NewCategory) -> Result<Category, DomainError>;
    async fn list_categories(&self, query: &ListQuery) -> Result<Paged<Category>, DomainError>;

    // Suppliers
    async fn create_supplier(&self, data: &NewSupplier) -> Result<Supplier, DomainError>;
    async fn list_suppliers(&self, query: &ListQuery) -> Result<Paged<Supplier>, DomainError>;
    async fn update_supplier(
        &self,
        id: &str,
        data: &SupplierUpdate,
    ) -> Result<Supplier, DomainError>;

    // Stockrooms
    async fn create_stockroom(&self, data: &NewStockroom) -> Result<Stockroom, DomainError>;
    async fn list_stockrooms(&self, query: &ListQuery) -> Result<Paged<Stockroom>, DomainError>;
    async fn update_stockroom(
        &self,
        id: &str,
        data: &StockroomUpdate,
    ) -> Result<Stockroom, DomainError>;

    // Sales history
    async fn create_sale(&self, data: &NewSale) -> Result<SaleRecord, DomainError>;
    async fn list_sales(&self, query: &HistoryQuery) -> Result<PageSlice<SaleRecord>, DomainError>;
    async fn sales_summary(&self, query: &HistoryQuery) -> Result<SalesSummary, DomainError>;
    async fn top_selling(
        &self,
        stockroom_id: Option<&str>,
        days: Option<u32>,
        limit: Option<u32>,
    ) -> Result<TopSellingReport, DomainError>;

    // Stock movements
    async fn create_movement(&self, data: &NewMovement) -> Result<StockMovement, DomainError>;
    async fn list_movements(
        &self,
        query: &HistoryQuery,
    ) -> Result<PageSlice<StockMovement>, DomainError>;
    async fn movement_summary(&self, query: &HistoryQuery)
        -> Result<MovementSummary, DomainError>;

    // Replenishment
    async fn replenishment_by_article(
        &self,
        article_id: &str,
    ) -> Result<ReplenishmentReport, DomainError>;
    async fn replenishment_by_sku(&self, sku: &str) -> Result<ReplenishmentReport, DomainError>;

    // Stock alerts
    async fn list_stock_alerts(&self, active_only: bool) -> Result<Vec<StockAlert>, DomainError>;

    // Purchase orders
    async fn next_po_number(&self) -> Result<String, DomainError>;
    async fn create_purchase_order(
        &self,
        data: &NewPurchaseOrder,
    ) -> Result<PurchaseOrder, DomainError>;
    async fn create_purchase_order_lines(
        &self,
        lines: &[NewPurchaseOrderLine],
    ) -> Result<(), DomainError>;
}
