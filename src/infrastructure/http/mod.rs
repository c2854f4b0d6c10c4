//! reqwest implementation of the inventory REST API port.
//!
//! Stateless apart from the bearer token. Every response is mapped into
//! the domain error taxonomy; a 401 clears the token and broadcasts
//! [`DataEvent::Unauthorized`] so the session layer can finish the
//! forced logout. No retries: a failed request is the caller's problem.

mod envelope;

use crate::domain::entities::article::{Article, ArticleUpdate, NewArticle};
use crate::domain::entities::category::{Category, NewCategory};
use crate::domain::entities::movement::{
    MovementSummary, NewMovement, StockMovement,
};
use crate::domain::entities::purchase_order::{
    NewPurchaseOrder, NewPurchaseOrderLine, PurchaseOrder,
};
use crate::domain::entities::sale::{NewSale, SaleRecord, SalesSummary, TopSellingReport};
use crate::domain::entities::stock_alert::StockAlert;
use crate::domain::entities::stockroom::{NewStockroom, Stockroom, StockroomUpdate};
use crate::domain::entities::supplier::{NewSupplier, Supplier, SupplierUpdate};
use crate::domain::entities::user::{LoginPayload, Registration, User, UserUpdate};
use crate::domain::error::DomainError;
use crate::domain::events::DataEvent;
use crate::domain::ports::event_bus::EventBus;
use crate::domain::ports::inventory_api::{
    ArticleQuery, HistoryQuery, InventoryApi, ListQuery, Paged, PageSlice, ReplenishmentReport,
};
use async_trait::async_trait;
use envelope::{ApiErrorBody, Envelope};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use std::sync::{Arc, RwLock};
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api/v1";

pub struct HttpInventoryApi {
    base_url: String,
    client: reqwest::Client,
    token: RwLock<Option<String>>,
    bus: Arc<dyn EventBus>,
}

impl HttpInventoryApi {
    pub fn new(base_url: impl Into<String>, bus: Arc<dyn EventBus>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::builder()
                .user_agent("medstock/0.1")
                .build()
                .unwrap_or_default(),
            token: RwLock::new(None),
            bus,
        }
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let token = self.token.read().ok().and_then(|t| t.clone());
        match token {
            Some(t) => req.bearer_auth(t),
            None => req,
        }
    }

    /// Send a request and decode the body, applying the error taxonomy.
    async fn dispatch<T: DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
    ) -> Result<T, DomainError> {
        let resp = self
            .authorize(req)
            .send()
            .await
            .map_err(|e| DomainError::Network(e.to_string()))?;

        let status = resp.status();
        if status.as_u16() == 401 {
            // Token expired or invalid: drop it and tell everyone.
            if let Ok(mut token) = self.token.write() {
                *token = None;
            }
            self.bus.publish(&DataEvent::Unauthorized);
            return Err(DomainError::Unauthorized(
                "Session expired. Please log in again.".into(),
            ));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| DomainError::Network(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .ok()
                .and_then(|b| b.error.or(b.message))
                .unwrap_or_else(|| "An error occurred".into());
            return Err(DomainError::Remote {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| DomainError::Parse(e.to_string()))
    }

    /// Enveloped endpoints: unwrap `{code, success, message, data, error}`.
    async fn dispatch_enveloped<T: DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
    ) -> Result<T, DomainError> {
        let envelope: Envelope<T> = self.dispatch(req).await?;
        envelope.into_data()
    }

    fn get(&self, endpoint: &str) -> reqwest::RequestBuilder {
        debug!("GET {endpoint}");
        self.client.get(self.url(endpoint))
    }

    fn post<B: serde::Serialize>(&self, endpoint: &str, body: &B) -> reqwest::RequestBuilder {
        debug!("POST {endpoint}");
        self.client.post(self.url(endpoint)).json(body)
    }

    fn put<B: serde::Serialize>(&self, endpoint: &str, body: &B) -> reqwest::RequestBuilder {
        debug!("PUT {endpoint}");
        self.client.put(self.url(endpoint)).json(body)
    }

    fn delete(&self, endpoint: &str) -> reqwest::RequestBuilder {
        debug!("DELETE {endpoint}");
        self.client.delete(self.url(endpoint))
    }
}

fn list_query_pairs(query: &ListQuery) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    push_opt(&mut pairs, "page", query.page);
    push_opt(&mut pairs, "perPage", query.per_page);
    push_opt(&mut pairs, "name", query.name.clone());
    push_opt(&mut pairs, "isActive", query.is_active);
    pairs
}

fn history_query_pairs(query: &HistoryQuery, with_type: bool) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    push_opt(&mut pairs, "articleId", query.article_id.clone());
    push_opt(&mut pairs, "stockroomId", query.stockroom_id.clone());
    if with_type {
        push_opt(&mut pairs, "type", query.movement_type);
    }
    push_opt(&mut pairs, "from", query.from.map(|d| d.to_rfc3339()));
    push_opt(&mut pairs, "to", query.to.map(|d| d.to_rfc3339()));
    push_opt(&mut pairs, "limit", query.limit);
    push_opt(&mut pairs, "offset", query.offset);
    pairs
}

fn push_opt<V: ToString>(pairs: &mut Vec<(String, String)>, key: &str, value: Option<V>) {
    if let Some(v) = value {
        pairs.push((key.to_string(), v.to_string()));
    }
}

#[derive(Deserialize)]
struct RegisteredUser {
    user: User,
}

#[derive(Deserialize)]
struct RecoverySent {
    sent: bool,
}

#[derive(Deserialize)]
struct HealthStatus {
    status: String,
}

#[derive(Deserialize)]
struct AllocatedPoNumber {
    po_number: String,
}

#[async_trait]
impl InventoryApi for HttpInventoryApi {
    fn set_token(&self, token: Option<String>) {
        if let Ok(mut slot) = self.token.write() {
            *slot = token;
        }
    }

    async fn login(&self, email: &str, password: &str) -> Result<LoginPayload, DomainError> {
        let body = json!({ "email": email, "password": password });
        self.dispatch_enveloped(self.post("/auth/login", &body)).await
    }

    async fn register(&self, data: &Registration) -> Result<User, DomainError> {
        let registered: RegisteredUser =
            self.dispatch_enveloped(self.post("/auth/register", data)).await?;
        Ok(registered.user)
    }

    async fn update_user(&self, data: &UserUpdate) -> Result<(), DomainError> {
        let _: serde_json::Value = self.dispatch_enveloped(self.put("/auth/update", data)).await?;
        Ok(())
    }

    async fn request_recovery(&self, email: &str) -> Result<bool, DomainError> {
        let body = json!({ "email": email });
        let sent: RecoverySent = self.dispatch_enveloped(self.post("/auth/recover", &body)).await?;
        Ok(sent.sent)
    }

    async fn login_with_temp_code(
        &self,
        email: &str,
        code: &str,
    ) -> Result<LoginPayload, DomainError> {
        let body = json!({ "email": email, "password": code });
        self.dispatch_enveloped(self.post("/auth/login-temp", &body)).await
    }

    async fn health(&self) -> Result<String, DomainError> {
        let health: HealthStatus = self.dispatch_enveloped(self.get("/health")).await?;
        Ok(health.status)
    }

    async fn create_article(&self, data: &NewArticle) -> Result<Article, DomainError> {
        self.dispatch_enveloped(self.post("/articles", data)).await
    }

    async fn list_articles(&self, query: &ArticleQuery) -> Result<Paged<Article>, DomainError> {
        let mut pairs = Vec::new();
        push_opt(&mut pairs, "page", query.page);
        push_opt(&mut pairs, "perPage", query.per_page);
        push_opt(&mut pairs, "sku", query.sku.clone());
        push_opt(&mut pairs, "name", query.name.clone());
        push_opt(&mut pairs, "priceMin", query.price_min);
        push_opt(&mut pairs, "priceMax", query.price_max);
        push_opt(&mut pairs, "isActive", query.is_active);
        self.dispatch_enveloped(self.get("/articles").query(&pairs)).await
    }

    async fn get_article(&self, id: &str) -> Result<Article, DomainError> {
        self.dispatch_enveloped(self.get(&format!("/articles/{id}"))).await
    }

    async fn update_article(
        &self,
        id: &str,
        data: &ArticleUpdate,
    ) -> Result<Article, DomainError> {
        self.dispatch_enveloped(self.put(&format!("/articles/{id}"), data)).await
    }

    async fn delete_article(&self, id: &str) -> Result<(), DomainError> {
        let _: serde_json::Value = self
            .dispatch_enveloped(self.delete(&format!("/articles/{id}")))
            .await?;
        Ok(())
    }

    async fn create_category(&self, data: &NewCategory) -> Result<Category, DomainError> {
        self.dispatch_enveloped(self.post("/categories", data)).await
    }

    async fn list_categories(&self, query: &ListQuery) -> Result<Paged<Category>, DomainError> {
        self.dispatch_enveloped(self.get("/categories").query(&list_query_pairs(query)))
            .await
    }

    async fn create_supplier(&self, data: &NewSupplier) -> Result<Supplier, DomainError> {
        self.dispatch_enveloped(self.post("/suppliers", data)).await
    }

    async fn list_suppliers(&self, query: &ListQuery) -> Result<Paged<Supplier>, DomainError> {
        self.dispatch_enveloped(self.get("/suppliers").query(&list_query_pairs(query)))
            .await
    }

    async fn update_supplier(
        &self,
        id: &str,
        data: &SupplierUpdate,
    ) -> Result<Supplier, DomainError> {
        self.dispatch_enveloped(self.put(&format!("/suppliers/{id}"), data)).await
    }

    async fn create_stockroom(&self, data: &NewStockroom) -> Result<Stockroom, DomainError> {
        self.dispatch_enveloped(self.post("/stockroom", data)).await
    }

    async fn list_stockrooms(&self, query: &ListQuery) -> Result<Paged<Stockroom>, DomainError> {
        self.dispatch_enveloped(self.get("/stockroom").query(&list_query_pairs(query)))
            .await
    }

    async fn update_stockroom(
        &self,
        id: &str,
        data: &StockroomUpdate,
    ) -> Result<Stockroom, DomainError> {
        self.dispatch_enveloped(self.put(&format!("/stockroom/{id}"), data)).await
    }

    async fn create_sale(&self, data: &NewSale) -> Result<SaleRecord, DomainError> {
        // History endpoints return bare records, no envelope.
        self.dispatch(self.post("/inventory-history/sales", data)).await
    }

    async fn list_sales(&self, query: &HistoryQuery) -> Result<PageSlice<SaleRecord>, DomainError> {
        let pairs = history_query_pairs(query, false);
        self.dispatch(self.get("/inventory-history/sales").query(&pairs)).await
    }

    async fn sales_summary(&self, query: &HistoryQuery) -> Result<SalesSummary, DomainError> {
        let pairs = history_query_pairs(query, false);
        self.dispatch(self.get("/inventory-history/sales/summary").query(&pairs))
            .await
    }

    async fn top_selling(
        &self,
        stockroom_id: Option<&str>,
        days: Option<u32>,
        limit: Option<u32>,
    ) -> Result<TopSellingReport, DomainError> {
        let mut pairs = Vec::new();
        push_opt(&mut pairs, "stockroomId", stockroom_id.map(str::to_string));
        push_opt(&mut pairs, "days", days);
        push_opt(&mut pairs, "limit", limit);
        self.dispatch(self.get("/inventory-history/sales/top").query(&pairs)).await
    }

    async fn create_movement(&self, data: &NewMovement) -> Result<StockMovement, DomainError> {
        self.dispatch(self.post("/inventory-history/movements", data)).await
    }

    async fn list_movements(
        &self,
        query: &HistoryQuery,
    ) -> Result<PageSlice<StockMovement>, DomainError> {
        let pairs = history_query_pairs(query, true);
        self.dispatch(self.get("/inventory-history/movements").query(&pairs)).await
    }

    async fn movement_summary(
        &self,
        query: &HistoryQuery,
    ) -> Result<MovementSummary, DomainError> {
        let pairs = history_query_pairs(query, false);
        self.dispatch(self.get("/inventory-history/movements/summary").query(&pairs))
            .await
    }

    async fn replenishment_by_article(
        &self,
        article_id: &str,
    ) -> Result<ReplenishmentReport, DomainError> {
        self.dispatch_enveloped(self.get(&format!("/replenishment/articles/{article_id}")))
            .await
    }

    async fn replenishment_by_sku(&self, sku: &str) -> Result<ReplenishmentReport, DomainError> {
        self.dispatch_enveloped(self.get(&format!("/replenishment/articles/by-sku/{sku}")))
            .await
    }

    async fn list_stock_alerts(&self, active_only: bool) -> Result<Vec<StockAlert>, DomainError> {
        let pairs = vec![("isActive".to_string(), active_only.to_string())];
        self.dispatch_enveloped(self.get("/stock-alerts").query(&pairs)).await
    }

    async fn next_po_number(&self) -> Result<String, DomainError> {
        let allocated: AllocatedPoNumber = self
            .dispatch_enveloped(self.post("/purchase-orders/next-number", &json!({})))
            .await?;
        Ok(allocated.po_number)
    }

    async fn create_purchase_order(
        &self,
        data: &NewPurchaseOrder,
    ) -> Result<PurchaseOrder, DomainError> {
        self.dispatch_enveloped(self.post("/purchase-orders", data)).await
    }

    async fn create_purchase_order_lines(
        &self,
        lines: &[NewPurchaseOrderLine],
    ) -> Result<(), DomainError> {
        let _: serde_json::Value = self
            .dispatch_enveloped(self.post("/purchase-orders/items", &lines))
            .await?;
        Ok(())
    }
}
