use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleRecord {
    pub id: String,
    pub id_article: String,
    pub id_stockroom: String,
    pub quantity: i64,
    pub sold_at: DateTime<Utc>,
    #[serde(default)]
    pub unit_price: Option<f64>,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSale {
    pub id_article: String,
    pub id_stockroom: String,
    pub quantity: i64,
    pub sold_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

/// Aggregate over a sales window, as computed by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesSummary {
    pub transactions: i64,
    pub units_sold: i64,
    pub first_sale_at: Option<DateTime<Utc>>,
    pub last_sale_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub window_days: Option<i64>,
    #[serde(default)]
    pub avg_daily_units: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleRef {
    pub id: String,
    pub sku: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopSellingItem {
    pub id_article: String,
    pub total_quantity: i64,
    #[serde(default)]
    pub article: Option<ArticleRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopSellingReport {
    pub days: i64,
    pub limit: i64,
    pub data: Vec<TopSellingItem>,
}
