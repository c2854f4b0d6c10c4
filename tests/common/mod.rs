//! Shared test helpers: an in-memory inventory API and fixtures.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use medstock::domain::entities::article::{Article, ArticleUpdate, NewArticle};
use medstock::domain::entities::category::{Category, NewCategory};
use medstock::domain::entities::movement::{
    MovementSummary, MovementTotals, NewMovement, StockMovement,
};
use medstock::domain::entities::purchase_order::{
    NewPurchaseOrder, NewPurchaseOrderLine, PurchaseOrder,
};
use medstock::domain::entities::sale::{
    ArticleRef, NewSale, SaleRecord, SalesSummary, TopSellingReport,
};
use medstock::domain::entities::stock_alert::{AlertArticle, StockAlert};
use medstock::domain::entities::stockroom::{NewStockroom, Stockroom, StockroomUpdate};
use medstock::domain::entities::supplier::{NewSupplier, Supplier, SupplierUpdate};
use medstock::domain::entities::user::{LoginPayload, Registration, User, UserUpdate};
use medstock::domain::error::DomainError;
use medstock::domain::ports::chat_gateway::ChatGateway;
use medstock::domain::ports::event_bus::EventBus;
use medstock::domain::ports::inventory_api::{
    ArticleQuery, HistoryQuery, InventoryApi, ListQuery, PageMeta, PageSlice, Paged,
    ReplenishmentReport,
};
use medstock::domain::ports::local_store::{ChatLogStore, SessionStore};
use medstock::domain::values::severity::AlertSeverity;
use medstock::infrastructure::events::InProcessEventBus;
use medstock::infrastructure::gateway::noop::NoopGateway;
use medstock::infrastructure::sqlite::chat_log_repo::SqliteChatLog;
use medstock::infrastructure::sqlite::migrations::run_migrations;
use medstock::infrastructure::sqlite::session_repo::SqliteSessionStore;
use medstock::MedStock;
use rusqlite::Connection;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

/// In-memory stand-in for the inventory backend. Mutate the public
/// fields to stage fixtures; inspect them to assert on writes.
#[derive(Default)]
pub struct MockInventoryApi {
    pub token: Mutex<Option<String>>,
    pub articles: Mutex<Vec<Article>>,
    pub alerts: Mutex<Vec<StockAlert>>,
    pub sales_summary: Mutex<Option<SalesSummary>>,
    pub replenishment: Mutex<Option<ReplenishmentReport>>,
    pub created_orders: Mutex<Vec<PurchaseOrder>>,
    pub created_lines: Mutex<Vec<NewPurchaseOrderLine>>,
    /// Creating an order for this supplier fails with a remote error.
    pub fail_order_for_supplier: Mutex<Option<String>>,
    po_counter: AtomicU32,
    pub list_calls: AtomicU32,
}

impl MockInventoryApi {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InventoryApi for MockInventoryApi {
    fn set_token(&self, token: Option<String>) {
        *self.token.lock().unwrap() = token;
    }

    async fn login(&self, email: &str, _password: &str) -> Result<LoginPayload, DomainError> {
        Ok(LoginPayload {
            user: make_user(email),
            token: "tok-test".into(),
        })
    }

    async fn register(&self, data: &Registration) -> Result<User, DomainError> {
        Ok(make_user(&data.email))
    }

    async fn update_user(&self, _data: &UserUpdate) -> Result<(), DomainError> {
        Ok(())
    }

    async fn request_recovery(&self, _email: &str) -> Result<bool, DomainError> {
        Ok(true)
    }

    async fn login_with_temp_code(
        &self,
        email: &str,
        _code: &str,
    ) -> Result<LoginPayload, DomainError> {
        Ok(LoginPayload {
            user: make_user(email),
            token: "tok-temp".into(),
        })
    }

    async fn health(&self) -> Result<String, DomainError> {
        Ok("ok".into())
    }

    async fn create_article(&self, data: &NewArticle) -> Result<Article, DomainError> {
        let article = make_article(
            &format!("art-{}", self.articles.lock().unwrap().len() + 1),
            &data.sku,
            &data.name,
            data.stock.unwrap_or(0),
            data.reorder_point,
        );
        self.articles.lock().unwrap().push(article.clone());
        Ok(article)
    }

    async fn list_articles(&self, query: &ArticleQuery) -> Result<Paged<Article>, DomainError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let articles = self.articles.lock().unwrap();
        let per_page = query.per_page.unwrap_or(100).max(1);
        let page = query.page.unwrap_or(1).max(1);
        let total = articles.len() as u32;
        let total_pages = total.div_ceil(per_page).max(1);

        let start = ((page - 1) * per_page) as usize;
        let items = articles
            .iter()
            .skip(start)
            .take(per_page as usize)
            .cloned()
            .collect();

        Ok(Paged {
            items,
            meta: PageMeta {
                total_results: total,
                total_pages,
                current_page: page,
                per_page,
            },
        })
    }

    async fn get_article(&self, id: &str) -> Result<Article, DomainError> {
        self.articles
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(|| DomainError::NotFound(format!("article {id}")))
    }

    async fn update_article(
        &self,
        id: &str,
        data: &ArticleUpdate,
    ) -> Result<Article, DomainError> {
        let mut articles = self.articles.lock().unwrap();
        let article = articles
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| DomainError::NotFound(format!("article {id}")))?;
        if let Some(stock) = data.stock {
            article.stock = stock;
        }
        if let Some(name) = &data.name {
            article.name = name.clone();
        }
        Ok(article.clone())
    }

    async fn delete_article(&self, id: &str) -> Result<(), DomainError> {
        self.articles.lock().unwrap().retain(|a| a.id != id);
        Ok(())
    }

    async fn create_category(&self, data: &NewCategory) -> Result<Category, DomainError> {
        Ok(Category {
            id: "cat-1".into(),
            name: data.name.clone(),
            description: data.description.clone(),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        })
    }

    async fn list_categories(&self, _query: &ListQuery) -> Result<Paged<Category>, DomainError> {
        Ok(empty_page())
    }

    async fn create_supplier(&self, data: &NewSupplier) -> Result<Supplier, DomainError> {
        Ok(Supplier {
            id: "sup-1".into(),
            name: data.name.clone(),
            nit: data.nit.clone(),
            address: data.address.clone(),
            phone: data.phone.clone(),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        })
    }

    async fn list_suppliers(&self, _query: &ListQuery) -> Result<Paged<Supplier>, DomainError> {
        Ok(empty_page())
    }

    async fn update_supplier(
        &self,
        id: &str,
        _data: &SupplierUpdate,
    ) -> Result<Supplier, DomainError> {
        Err(DomainError::NotFound(format!("supplier {id}")))
    }

    async fn create_stockroom(&self, data: &NewStockroom) -> Result<Stockroom, DomainError> {
        Ok(Stockroom {
            id: "room-1".into(),
            name: data.name.clone(),
            address: data.address.clone(),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        })
    }

    async fn list_stockrooms(&self, _query: &ListQuery) -> Result<Paged<Stockroom>, DomainError> {
        Ok(empty_page())
    }

    async fn update_stockroom(
        &self,
        id: &str,
        _data: &StockroomUpdate,
    ) -> Result<Stockroom, DomainError> {
        Err(DomainError::NotFound(format!("stockroom {id}")))
    }

    async fn create_sale(&self, data: &NewSale) -> Result<SaleRecord, DomainError> {
        Ok(SaleRecord {
            id: "sale-1".into(),
            id_article: data.id_article.clone(),
            id_stockroom: data.id_stockroom.clone(),
            quantity: data.quantity,
            sold_at: data.sold_at,
            unit_price: data.unit_price,
            metadata: data.metadata.clone(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        })
    }

    async fn list_sales(
        &self,
        _query: &HistoryQuery,
    ) -> Result<PageSlice<SaleRecord>, DomainError> {
        Ok(empty_slice())
    }

    async fn sales_summary(&self, _query: &HistoryQuery) -> Result<SalesSummary, DomainError> {
        Ok(self.sales_summary.lock().unwrap().clone().unwrap_or(SalesSummary {
            transactions: 0,
            units_sold: 0,
            first_sale_at: None,
            last_sale_at: None,
            window_days: None,
            avg_daily_units: None,
        }))
    }

    async fn top_selling(
        &self,
        _stockroom_id: Option<&str>,
        days: Option<u32>,
        limit: Option<u32>,
    ) -> Result<TopSellingReport, DomainError> {
        Ok(TopSellingReport {
            days: days.unwrap_or(30) as i64,
            limit: limit.unwrap_or(5) as i64,
            data: vec![],
        })
    }

    async fn create_movement(&self, data: &NewMovement) -> Result<StockMovement, DomainError> {
        Ok(StockMovement {
            id: "mov-1".into(),
            id_article: data.id_article.clone(),
            id_stockroom: data.id_stockroom.clone(),
            movement_type: data.movement_type,
            quantity: data.quantity,
            moved_at: data.moved_at,
            reference: data.reference.clone(),
            metadata: data.metadata.clone(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        })
    }

    async fn list_movements(
        &self,
        _query: &HistoryQuery,
    ) -> Result<PageSlice<StockMovement>, DomainError> {
        Ok(empty_slice())
    }

    async fn movement_summary(
        &self,
        _query: &HistoryQuery,
    ) -> Result<MovementSummary, DomainError> {
        Ok(MovementSummary {
            article_id: None,
            stockroom_id: None,
            from: None,
            to: None,
            totals: MovementTotals::default(),
        })
    }

    async fn replenishment_by_article(
        &self,
        article_id: &str,
    ) -> Result<ReplenishmentReport, DomainError> {
        self.replenishment
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| DomainError::NotFound(format!("article {article_id}")))
    }

    async fn replenishment_by_sku(&self, sku: &str) -> Result<ReplenishmentReport, DomainError> {
        self.replenishment
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| DomainError::NotFound(format!("sku {sku}")))
    }

    async fn list_stock_alerts(&self, active_only: bool) -> Result<Vec<StockAlert>, DomainError> {
        let alerts = self.alerts.lock().unwrap();
        Ok(alerts
            .iter()
            .filter(|a| !active_only || a.is_active)
            .cloned()
            .collect())
    }

    async fn next_po_number(&self) -> Result<String, DomainError> {
        let n = self.po_counter.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("PO-2025-{n:03}"))
    }

    async fn create_purchase_order(
        &self,
        data: &NewPurchaseOrder,
    ) -> Result<PurchaseOrder, DomainError> {
        if self
            .fail_order_for_supplier
            .lock()
            .unwrap()
            .as_deref()
            .is_some_and(|s| s == data.supplier)
        {
            return Err(DomainError::Remote {
                status: 500,
                message: format!("order rejected for {}", data.supplier),
            });
        }

        let order = PurchaseOrder {
            id: format!("po-{}", data.po_number),
            po_number: data.po_number.clone(),
            supplier: data.supplier.clone(),
            total_amount: data.total_amount,
            notes: data.notes.clone(),
            expected_delivery_date: data.expected_delivery_date,
            status: data.status,
            created_by: data.created_by.clone(),
        };
        self.created_orders.lock().unwrap().push(order.clone());
        Ok(order)
    }

    async fn create_purchase_order_lines(
        &self,
        lines: &[NewPurchaseOrderLine],
    ) -> Result<(), DomainError> {
        self.created_lines.lock().unwrap().extend_from_slice(lines);
        Ok(())
    }
}

fn empty_page<T>() -> Paged<T> {
    Paged {
        items: vec![],
        meta: PageMeta {
            total_results: 0,
            total_pages: 1,
            current_page: 1,
            per_page: 100,
        },
    }
}

fn empty_slice<T>() -> PageSlice<T> {
    PageSlice {
        rows: vec![],
        count: 0,
        limit: 50,
        offset: 0,
    }
}

pub fn make_user(email: &str) -> User {
    User {
        id: "user-1".into(),
        name: "Test User".into(),
        email: email.to_string(),
        phone: None,
        address: None,
        is_active: true,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn make_article(
    id: &str,
    sku: &str,
    name: &str,
    stock: i64,
    reorder_point: Option<i64>,
) -> Article {
    Article {
        id: id.to_string(),
        sku: sku.to_string(),
        name: name.to_string(),
        id_category: "cat-1".into(),
        id_supplier: "sup-1".into(),
        id_stockroom: "room-1".into(),
        reorder_point,
        lead_time: Some(5),
        description: None,
        unit_price: 12.5,
        unit_cost: 8.0,
        stock,
        is_active: true,
        is_delete: false,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[allow(clippy::too_many_arguments)]
pub fn make_alert(
    id: &str,
    sku: &str,
    name: &str,
    site: &str,
    supplier: &str,
    unit_cost: f64,
    severity: AlertSeverity,
    coverage_days: f64,
    suggested_qty: i64,
) -> StockAlert {
    StockAlert {
        id: id.to_string(),
        alert_type: "low_stock".into(),
        severity,
        message: format!("{name} is running low"),
        days_of_coverage: coverage_days,
        current_stock: 10,
        suggested_reorder_qty: suggested_qty,
        suggested_po_date: None,
        is_active: true,
        article: AlertArticle {
            id: format!("art-{id}"),
            sku: sku.to_string(),
            name: name.to_string(),
            site: site.to_string(),
            supplier: supplier.to_string(),
            unit_cost,
            reorder_point: Some(40),
        },
    }
}

pub fn make_replenishment_report() -> ReplenishmentReport {
    use medstock::domain::values::replenishment::ReplenishmentMetrics;
    ReplenishmentReport {
        article: ArticleRef {
            id: "art-1".into(),
            sku: "GZ-10".into(),
            name: "Sterile gauze 10cm".into(),
        },
        metrics: ReplenishmentMetrics {
            current_stock: 40,
            avg_daily_demand: 10.0,
            demand_std_dev: 2.0,
            lead_time_days: 5,
            service_level: 0.95,
            z_score: 1.6449,
            expected_lead_time_demand: 50.0,
            lead_time_std_dev: 4.4721,
            safety_stock: 7,
            configured_reorder_point: None,
            recommended_reorder_point: 57,
            suggested_reorder_qty: 17,
        },
    }
}

/// MedStock wired against the mock API, a noop gateway, in-memory SQLite
/// stores and a fresh in-process bus.
pub fn setup_with(api: Arc<MockInventoryApi>) -> MedStock {
    setup_with_gateway(api, Arc::new(NoopGateway))
}

pub fn setup_with_gateway(api: Arc<MockInventoryApi>, gateway: Arc<dyn ChatGateway>) -> MedStock {
    let sessions: Arc<dyn SessionStore> = Arc::new(SqliteSessionStore::new(memory_db()));
    let chat_log: Arc<dyn ChatLogStore> = Arc::new(SqliteChatLog::new(memory_db()));
    let bus: Arc<dyn EventBus> = Arc::new(InProcessEventBus::new());
    MedStock::with_providers(api, gateway, sessions, chat_log, bus)
}

pub fn memory_db() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    run_migrations(&conn).unwrap();
    conn
}
