pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;

use crate::application::alerts::AlertsUseCase;
use crate::application::catalog::CatalogUseCase;
use crate::application::chat::{ChatReply, ChatUseCase};
use crate::application::history::HistoryUseCase;
use crate::application::kpi::{KpiSnapshot, KpiUseCase};
use crate::application::purchase_orders::{
    ExportDocument, PurchaseOrderPlan, PurchaseOrderUseCase, SubmitFailure,
};
use crate::application::replenishment::{ReplenishmentUseCase, ReplenishmentView};
use crate::application::session::SessionUseCase;
use crate::domain::entities::article::{Article, ArticleUpdate, NewArticle};
use crate::domain::entities::category::{Category, NewCategory};
use crate::domain::entities::movement::{MovementSummary, NewMovement, StockMovement};
use crate::domain::entities::purchase_order::PurchaseOrder;
use crate::domain::entities::sale::{NewSale, SaleRecord, SalesSummary, TopSellingReport};
use crate::domain::entities::stock_alert::StockAlert;
use crate::domain::entities::stockroom::{NewStockroom, Stockroom, StockroomUpdate};
use crate::domain::entities::supplier::{NewSupplier, Supplier, SupplierUpdate};
use crate::domain::entities::user::{LoginPayload, Registration, UserUpdate};
use crate::domain::error::DomainError;
use crate::domain::ports::chat_gateway::ChatGateway;
use crate::domain::ports::event_bus::EventBus;
use crate::domain::ports::inventory_api::{
    ArticleQuery, HistoryQuery, InventoryApi, ListQuery, Paged, PageSlice,
};
use crate::domain::ports::local_store::{ChatLogStore, Session, SessionStore};
use crate::domain::values::filters::DashboardFilters;
use crate::domain::values::replenishment::{ReplenishmentInputs, ReplenishmentMetrics};
use crate::infrastructure::events::InProcessEventBus;
use crate::infrastructure::gateway::noop::NoopGateway;
use crate::infrastructure::gateway::openai_chat::OpenAiChatGateway;
use crate::infrastructure::http::HttpInventoryApi;
use crate::infrastructure::sqlite::chat_log_repo::SqliteChatLog;
use crate::infrastructure::sqlite::migrations::run_migrations;
use crate::infrastructure::sqlite::session_repo::SqliteSessionStore;
use chrono::NaiveDate;
use rusqlite::Connection;
use std::collections::HashMap;
use std::sync::Arc;

pub struct MedStock {
    session_uc: SessionUseCase,
    catalog_uc: CatalogUseCase,
    history_uc: HistoryUseCase,
    replenishment_uc: ReplenishmentUseCase,
    alerts_uc: AlertsUseCase,
    po_uc: PurchaseOrderUseCase,
    kpi_uc: KpiUseCase,
    chat_uc: ChatUseCase,
    api: Arc<dyn InventoryApi>,
}

impl MedStock {
    /// Wire everything from the environment: HTTP client against
    /// `api_base_url`, local SQLite store at `db_path`, and an AI gateway
    /// chosen by `MEDSTOCK_AI_PROVIDER` / `MEDSTOCK_AI_API_KEY`.
    pub fn new(api_base_url: &str, db_path: &str) -> Result<Self, DomainError> {
        let provider =
            std::env::var("MEDSTOCK_AI_PROVIDER").unwrap_or_else(|_| "openai".into());
        let api_key = std::env::var("MEDSTOCK_AI_API_KEY").unwrap_or_default();
        let endpoint = std::env::var("MEDSTOCK_AI_GATEWAY_URL").ok();
        let model = std::env::var("MEDSTOCK_AI_MODEL").ok();

        let gateway: Arc<dyn ChatGateway> = match provider.as_str() {
            "openai" if !api_key.is_empty() => {
                Arc::new(OpenAiChatGateway::new(api_key, endpoint, model))
            }
            _ => Arc::new(NoopGateway),
        };

        let bus: Arc<dyn EventBus> = Arc::new(InProcessEventBus::new());
        let api: Arc<dyn InventoryApi> =
            Arc::new(HttpInventoryApi::new(api_base_url, bus.clone()));

        let conn1 = open_store(db_path)?;
        let conn2 = open_store(db_path)?;
        run_migrations(&conn1).map_err(DomainError::Storage)?;
        let sessions: Arc<dyn SessionStore> = Arc::new(SqliteSessionStore::new(conn1));
        let chat_log: Arc<dyn ChatLogStore> = Arc::new(SqliteChatLog::new(conn2));

        let ms = Self::with_providers(api, gateway, sessions, chat_log, bus);
        ms.session_uc.restore()?;
        Ok(ms)
    }

    /// Pure wiring over explicit ports; used by tests and embedders.
    pub fn with_providers(
        api: Arc<dyn InventoryApi>,
        gateway: Arc<dyn ChatGateway>,
        sessions: Arc<dyn SessionStore>,
        chat_log: Arc<dyn ChatLogStore>,
        bus: Arc<dyn EventBus>,
    ) -> Self {
        Self {
            session_uc: SessionUseCase::new(api.clone(), sessions, bus.as_ref()),
            catalog_uc: CatalogUseCase::new(api.clone(), bus.clone()),
            history_uc: HistoryUseCase::new(api.clone(), bus.clone()),
            replenishment_uc: ReplenishmentUseCase::new(api.clone()),
            alerts_uc: AlertsUseCase::new(api.clone()),
            po_uc: PurchaseOrderUseCase::new(api.clone()),
            kpi_uc: KpiUseCase::new(api.clone()),
            chat_uc: ChatUseCase::new(api.clone(), gateway, chat_log),
            api,
        }
    }

    // Session
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginPayload, DomainError> {
        self.session_uc.login(email, password).await
    }

    pub async fn register(&self, data: &Registration) -> Result<LoginPayload, DomainError> {
        self.session_uc.register(data).await
    }

    pub fn logout(&self) -> Result<(), DomainError> {
        self.session_uc.logout()
    }

    pub fn current_session(&self) -> Result<Option<Session>, DomainError> {
        self.session_uc.current()
    }

    pub async fn update_profile(&self, data: &UserUpdate) -> Result<(), DomainError> {
        self.session_uc.update_profile(data).await
    }

    pub async fn request_recovery(&self, email: &str) -> Result<bool, DomainError> {
        self.session_uc.request_recovery(email).await
    }

    pub async fn login_with_temp_code(
        &self,
        email: &str,
        code: &str,
    ) -> Result<LoginPayload, DomainError> {
        self.session_uc.login_with_temp_code(email, code).await
    }

    pub async fn health(&self) -> Result<String, DomainError> {
        self.api.health().await
    }

    // Catalog
    pub async fn create_article(&self, data: &NewArticle) -> Result<Article, DomainError> {
        self.catalog_uc.create_article(data).await
    }

    pub async fn list_articles(&self, query: &ArticleQuery) -> Result<Paged<Article>, DomainError> {
        self.catalog_uc.list_articles(query).await
    }

    pub async fn get_article(&self, id: &str) -> Result<Article, DomainError> {
        self.catalog_uc.get_article(id).await
    }

    pub async fn update_article(
        &self,
        id: &str,
        data: &ArticleUpdate,
    ) -> Result<Article, DomainError> {
        self.catalog_uc.update_article(id, data).await
    }

    pub async fn delete_article(&self, id: &str) -> Result<(), DomainError> {
        self.catalog_uc.delete_article(id).await
    }

    pub async fn fetch_all_articles(&self, max_pages: u32) -> Result<Vec<Article>, DomainError> {
        self.catalog_uc.fetch_all_articles(max_pages).await
    }

    pub async fn create_category(&self, data: &NewCategory) -> Result<Category, DomainError> {
        self.catalog_uc.create_category(data).await
    }

    pub async fn list_categories(&self, query: &ListQuery) -> Result<Paged<Category>, DomainError> {
        self.catalog_uc.list_categories(query).await
    }

    pub async fn create_supplier(&self, data: &NewSupplier) -> Result<Supplier, DomainError> {
        self.catalog_uc.create_supplier(data).await
    }

    pub async fn list_suppliers(&self, query: &ListQuery) -> Result<Paged<Supplier>, DomainError> {
        self.catalog_uc.list_suppliers(query).await
    }

    pub async fn update_supplier(
        &self,
        id: &str,
        data: &SupplierUpdate,
    ) -> Result<Supplier, DomainError> {
        self.catalog_uc.update_supplier(id, data).await
    }

    pub async fn create_stockroom(&self, data: &NewStockroom) -> Result<Stockroom, DomainError> {
        self.catalog_uc.create_stockroom(data).await
    }

    pub async fn list_stockrooms(&self, query: &ListQuery) -> Result<Paged<Stockroom>, DomainError> {
        self.catalog_uc.list_stockrooms(query).await
    }

    pub async fn update_stockroom(
        &self,
        id: &str,
        data: &StockroomUpdate,
    ) -> Result<Stockroom, DomainError> {
        self.catalog_uc.update_stockroom(id, data).await
    }

    // History
    pub async fn record_sale(&self, data: &NewSale) -> Result<SaleRecord, DomainError> {
        self.history_uc.record_sale(data).await
    }

    pub async fn sales(&self, query: &HistoryQuery) -> Result<PageSlice<SaleRecord>, DomainError> {
        self.history_uc.sales(query).await
    }

    pub async fn sales_summary(&self, query: &HistoryQuery) -> Result<SalesSummary, DomainError> {
        self.history_uc.sales_summary(query).await
    }

    pub async fn top_selling(
        &self,
        stockroom_id: Option<&str>,
        days: Option<u32>,
        limit: Option<u32>,
    ) -> Result<TopSellingReport, DomainError> {
        self.history_uc.top_selling(stockroom_id, days, limit).await
    }

    pub async fn record_movement(&self, data: &NewMovement) -> Result<StockMovement, DomainError> {
        self.history_uc.record_movement(data).await
    }

    pub async fn movements(
        &self,
        query: &HistoryQuery,
    ) -> Result<PageSlice<StockMovement>, DomainError> {
        self.history_uc.movements(query).await
    }

    pub async fn movement_summary(
        &self,
        query: &HistoryQuery,
    ) -> Result<MovementSummary, DomainError> {
        self.history_uc.movement_summary(query).await
    }

    // Replenishment
    pub async fn replenishment_by_article(
        &self,
        article_id: &str,
    ) -> Result<ReplenishmentView, DomainError> {
        self.replenishment_uc.by_article(article_id).await
    }

    pub async fn replenishment_by_sku(&self, sku: &str) -> Result<ReplenishmentView, DomainError> {
        self.replenishment_uc.by_sku(sku).await
    }

    pub fn evaluate_replenishment(
        &self,
        inputs: &ReplenishmentInputs,
    ) -> Result<ReplenishmentMetrics, DomainError> {
        self.replenishment_uc.evaluate(inputs)
    }

    // Alerts and purchase orders
    pub async fn active_alerts(
        &self,
        filters: &DashboardFilters,
    ) -> Result<Vec<StockAlert>, DomainError> {
        self.alerts_uc.active(filters).await
    }

    pub fn default_po_selection(alerts: &[StockAlert]) -> Vec<StockAlert> {
        PurchaseOrderUseCase::default_selection(alerts)
    }

    pub fn plan_purchase_orders(
        &self,
        selected: &[StockAlert],
        quantities: &HashMap<String, i64>,
        notes: Option<String>,
        expected_delivery_date: Option<NaiveDate>,
    ) -> Result<PurchaseOrderPlan, DomainError> {
        self.po_uc.plan(selected, quantities, notes, expected_delivery_date)
    }

    pub async fn submit_purchase_orders(
        &self,
        plan: &PurchaseOrderPlan,
        created_by: Option<&str>,
    ) -> Result<Vec<PurchaseOrder>, SubmitFailure> {
        self.po_uc.submit(plan, created_by).await
    }

    pub fn export_purchase_orders(
        plan: &PurchaseOrderPlan,
        created: &[PurchaseOrder],
    ) -> ExportDocument {
        PurchaseOrderUseCase::export(plan, created)
    }

    // KPIs and chat
    pub async fn kpi_snapshot(
        &self,
        filters: &DashboardFilters,
        max_pages: u32,
    ) -> Result<KpiSnapshot, DomainError> {
        self.kpi_uc.snapshot(filters, max_pages).await
    }

    pub async fn chat(&self, message: &str) -> Result<ChatReply, DomainError> {
        self.chat_uc.ask(message).await
    }

    pub fn clear_chat_history(&self) -> Result<(), DomainError> {
        self.chat_uc.clear_history()
    }
}

fn open_store(db_path: &str) -> Result<Connection, DomainError> {
    let conn = Connection::open(db_path)
        .map_err(|e| DomainError::Storage(format!("DB error: {e}")))?;
    conn.pragma_update(None, "journal_mode", "WAL")
        .map_err(|e| DomainError::Storage(format!("WAL error: {e}")))?;
    Ok(conn)
}
