use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Inventory article as the backend returns it. Owned by the remote
/// store; read-only on this side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub sku: String,
    pub name: String,
    pub id_category: String,
    pub id_supplier: String,
    pub id_stockroom: String,
    #[serde(default)]
    pub reorder_point: Option<i64>,
    /// Days between placing and receiving an order.
    #[serde(default)]
    pub lead_time: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    pub unit_price: f64,
    pub unit_cost: f64,
    pub stock: i64,
    #[serde(rename = "isActive")]
    pub is_active: bool,
    #[serde(rename = "isDelete", default)]
    pub is_delete: bool,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewArticle {
    pub sku: String,
    pub name: String,
    pub id_category: String,
    pub id_supplier: String,
    pub id_stockroom: String,
    pub unit_price: f64,
    pub unit_cost: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reorder_point: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lead_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Partial update; only present fields are sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArticleUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_supplier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_stockroom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reorder_point: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lead_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "isActive", skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}
