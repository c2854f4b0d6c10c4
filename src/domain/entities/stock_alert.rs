use crate::domain::values::severity::AlertSeverity;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Article fields embedded in an alert, enough to build a purchase-order
/// line without a second lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertArticle {
    pub id: String,
    pub sku: String,
    pub name: String,
    /// Site (stockroom) name the alert was raised for.
    pub site: String,
    /// Supplier name; purchase orders are grouped on this.
    pub supplier: String,
    pub unit_cost: f64,
    #[serde(default)]
    pub reorder_point: Option<i64>,
}

/// Low-stock alert raised by the backend. Read-only here; resolving one
/// is the backend's business.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockAlert {
    pub id: String,
    pub alert_type: String,
    pub severity: AlertSeverity,
    pub message: String,
    pub days_of_coverage: f64,
    pub current_stock: i64,
    pub suggested_reorder_qty: i64,
    #[serde(default)]
    pub suggested_po_date: Option<NaiveDate>,
    pub is_active: bool,
    pub article: AlertArticle,
}
