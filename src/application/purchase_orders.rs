//! Purchase-order consolidation: selected stock alerts become one draft
//! order per supplier. Submission is sequential and non-atomic across
//! suppliers: a failure aborts the rest of the loop and earlier orders
//! stay committed.

use crate::application::alerts::LOW_COVERAGE_DAYS;
use crate::domain::entities::purchase_order::{
    NewPurchaseOrder, NewPurchaseOrderLine, OrderStatus, PurchaseOrder,
};
use crate::domain::entities::stock_alert::StockAlert;
use crate::domain::error::DomainError;
use crate::domain::ports::inventory_api::InventoryApi;
use crate::domain::values::severity::AlertSeverity;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone, Serialize)]
pub struct OrderLinePlan {
    pub alert_id: String,
    pub article_id: String,
    pub sku: String,
    pub name: String,
    pub quantity: i64,
    pub unit_cost: f64,
    pub subtotal: f64,
}

/// One pending order: every selected alert for a single supplier.
#[derive(Debug, Clone, Serialize)]
pub struct SupplierOrderPlan {
    pub supplier: String,
    pub lines: Vec<OrderLinePlan>,
    pub total: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PurchaseOrderPlan {
    pub orders: Vec<SupplierOrderPlan>,
    pub grand_total: f64,
    pub notes: Option<String>,
    pub expected_delivery_date: Option<NaiveDate>,
}

/// A submission that stopped partway: `committed` orders already exist on
/// the backend and are not rolled back.
#[derive(Debug)]
pub struct SubmitFailure {
    pub supplier: String,
    pub committed: Vec<PurchaseOrder>,
    pub source: DomainError,
}

impl fmt::Display for SubmitFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Order for supplier '{}' failed ({}); {} earlier order(s) remain committed",
            self.supplier,
            self.source,
            self.committed.len()
        )
    }
}

impl std::error::Error for SubmitFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Itemized export document, grouped by supplier.
#[derive(Debug, Clone, Serialize)]
pub struct ExportSection {
    pub supplier: String,
    pub po_number: Option<String>,
    pub lines: Vec<OrderLinePlan>,
    pub total: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportDocument {
    pub id: String,
    pub generated_at: DateTime<Utc>,
    pub notes: Option<String>,
    pub expected_delivery_date: Option<NaiveDate>,
    pub sections: Vec<ExportSection>,
    pub grand_total: f64,
}

impl ExportDocument {
    /// Plain-text rendering for download or stdout.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        out.push_str("PURCHASE ORDERS\n");
        out.push_str(&format!(
            "Generated: {}\n",
            self.generated_at.format("%Y-%m-%d %H:%M UTC")
        ));
        if let Some(date) = self.expected_delivery_date {
            out.push_str(&format!("Expected delivery: {date}\n"));
        }
        if let Some(notes) = &self.notes {
            out.push_str(&format!("Notes: {notes}\n"));
        }

        for section in &self.sections {
            out.push('\n');
            match &section.po_number {
                Some(n) => out.push_str(&format!("Supplier: {} ({n})\n", section.supplier)),
                None => out.push_str(&format!("Supplier: {}\n", section.supplier)),
            }
            for line in &section.lines {
                out.push_str(&format!(
                    "  {} [{}]  {} x {:.2} = {:.2}\n",
                    line.name, line.sku, line.quantity, line.unit_cost, line.subtotal
                ));
            }
            out.push_str(&format!("  Total: {:.2}\n", section.total));
        }

        out.push_str(&format!("\nGrand total: {:.2}\n", self.grand_total));
        out
    }
}

pub struct PurchaseOrderUseCase {
    api: Arc<dyn InventoryApi>,
}

impl PurchaseOrderUseCase {
    pub fn new(api: Arc<dyn InventoryApi>) -> Self {
        Self { api }
    }

    /// The dashboard's default pre-selection: high or medium severity, or
    /// coverage under the urgency threshold.
    pub fn default_selection(alerts: &[StockAlert]) -> Vec<StockAlert> {
        alerts
            .iter()
            .filter(|a| {
                matches!(a.severity, AlertSeverity::High | AlertSeverity::Medium)
                    || a.days_of_coverage < LOW_COVERAGE_DAYS
            })
            .cloned()
            .collect()
    }

    /// Group the selected alerts into one pending order per supplier.
    /// `quantities` overrides line quantities by alert id; unlisted lines
    /// default to the alert's suggested reorder quantity.
    pub fn plan(
        &self,
        selected: &[StockAlert],
        quantities: &HashMap<String, i64>,
        notes: Option<String>,
        expected_delivery_date: Option<NaiveDate>,
    ) -> Result<PurchaseOrderPlan, DomainError> {
        if selected.is_empty() {
            return Err(DomainError::Validation("Select at least one product".into()));
        }

        // Supplier groups in first-seen order, so submission and export
        // are deterministic.
        let mut orders: Vec<SupplierOrderPlan> = Vec::new();
        for alert in selected {
            let quantity = quantities
                .get(&alert.id)
                .copied()
                .unwrap_or(alert.suggested_reorder_qty);
            if quantity < 0 {
                return Err(DomainError::Validation(format!(
                    "Quantity for {} must be non-negative, got {quantity}",
                    alert.article.sku
                )));
            }

            let line = OrderLinePlan {
                alert_id: alert.id.clone(),
                article_id: alert.article.id.clone(),
                sku: alert.article.sku.clone(),
                name: alert.article.name.clone(),
                quantity,
                unit_cost: alert.article.unit_cost,
                subtotal: quantity as f64 * alert.article.unit_cost,
            };

            match orders
                .iter_mut()
                .find(|o| o.supplier == alert.article.supplier)
            {
                Some(order) => {
                    order.total += line.subtotal;
                    order.lines.push(line);
                }
                None => orders.push(SupplierOrderPlan {
                    supplier: alert.article.supplier.clone(),
                    total: line.subtotal,
                    lines: vec![line],
                }),
            }
        }

        let grand_total = orders.iter().map(|o| o.total).sum();
        Ok(PurchaseOrderPlan {
            orders,
            grand_total,
            notes,
            expected_delivery_date,
        })
    }

    /// Create one draft order per supplier group, in order. Each group is
    /// an independent remote transaction: allocate an order number, write
    /// the header, write the lines. The first failure stops the loop.
    pub async fn submit(
        &self,
        plan: &PurchaseOrderPlan,
        created_by: Option<&str>,
    ) -> Result<Vec<PurchaseOrder>, SubmitFailure> {
        let mut committed = Vec::new();

        for order in &plan.orders {
            match self.submit_one(plan, order, created_by).await {
                Ok(po) => {
                    info!(supplier = %order.supplier, po_number = %po.po_number, "purchase order created");
                    committed.push(po);
                }
                Err(source) => {
                    return Err(SubmitFailure {
                        supplier: order.supplier.clone(),
                        committed,
                        source,
                    });
                }
            }
        }

        Ok(committed)
    }

    async fn submit_one(
        &self,
        plan: &PurchaseOrderPlan,
        order: &SupplierOrderPlan,
        created_by: Option<&str>,
    ) -> Result<PurchaseOrder, DomainError> {
        let po_number = self.api.next_po_number().await?;

        let po = self
            .api
            .create_purchase_order(&NewPurchaseOrder {
                po_number,
                supplier: order.supplier.clone(),
                total_amount: order.total,
                notes: plan.notes.clone(),
                expected_delivery_date: plan.expected_delivery_date,
                created_by: created_by.map(str::to_string),
                status: OrderStatus::Draft,
            })
            .await?;

        let lines: Vec<NewPurchaseOrderLine> = order
            .lines
            .iter()
            .map(|l| NewPurchaseOrderLine {
                purchase_order_id: po.id.clone(),
                article_id: l.article_id.clone(),
                quantity: l.quantity,
                unit_cost: l.unit_cost,
                subtotal: l.subtotal,
                alert_id: l.alert_id.clone(),
            })
            .collect();
        self.api.create_purchase_order_lines(&lines).await?;

        Ok(po)
    }

    /// Build the downloadable document from a plan and whatever orders
    /// actually got created (matched by supplier name).
    pub fn export(plan: &PurchaseOrderPlan, created: &[PurchaseOrder]) -> ExportDocument {
        let sections = plan
            .orders
            .iter()
            .map(|o| ExportSection {
                supplier: o.supplier.clone(),
                po_number: created
                    .iter()
                    .find(|po| po.supplier == o.supplier)
                    .map(|po| po.po_number.clone()),
                lines: o.lines.clone(),
                total: o.total,
            })
            .collect();

        ExportDocument {
            id: uuid::Uuid::new_v4().to_string(),
            generated_at: Utc::now(),
            notes: plan.notes.clone(),
            expected_delivery_date: plan.expected_delivery_date,
            sections,
            grand_total: plan.grand_total,
        }
    }
}
