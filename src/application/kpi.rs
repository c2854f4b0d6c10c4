use crate::application::catalog::fetch_all_articles;
use crate::domain::error::DomainError;
use crate::domain::ports::inventory_api::{HistoryQuery, InventoryApi};
use crate::domain::values::filters::DashboardFilters;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Sentinel coverage when there is no demand in the window: effectively
/// "never runs out", rendered as 999 days.
pub const NO_DEMAND_COVERAGE_DAYS: i64 = 999;

#[derive(Debug, Clone, Serialize)]
pub struct KpiSnapshot {
    pub total_stock: i64,
    /// Units expected to move in the next 30 days at the observed rate.
    pub projected_demand_30d: i64,
    pub average_coverage_days: i64,
    /// Articles at or below their configured reorder point.
    pub at_risk_count: usize,
}

/// Dashboard KPI tiles, computed from the sales summary plus a bounded
/// fetch of the whole active-article listing.
pub struct KpiUseCase {
    api: Arc<dyn InventoryApi>,
}

impl KpiUseCase {
    pub fn new(api: Arc<dyn InventoryApi>) -> Self {
        Self { api }
    }

    pub async fn snapshot(
        &self,
        filters: &DashboardFilters,
        max_pages: u32,
    ) -> Result<KpiSnapshot, DomainError> {
        let summary = self
            .api
            .sales_summary(&HistoryQuery {
                from: Some(filters.from),
                to: Some(filters.to),
                ..Default::default()
            })
            .await?;

        let articles = fetch_all_articles(self.api.as_ref(), max_pages).await?;
        let total_stock: i64 = articles.iter().map(|a| a.stock).sum();

        // Window length from the observed sales when present, else from
        // the filter range. Never below one day.
        let days_in_range = match (summary.first_sale_at, summary.last_sale_at) {
            (Some(first), Some(last)) => ceil_days(last - first),
            _ => ceil_days(filters.to - filters.from),
        }
        .max(1);

        let avg_daily_units = if summary.units_sold > 0 {
            summary.units_sold as f64 / days_in_range as f64
        } else {
            0.0
        };

        let average_coverage_days = if avg_daily_units > 0.0 {
            (total_stock as f64 / avg_daily_units).round() as i64
        } else {
            NO_DEMAND_COVERAGE_DAYS
        };

        let at_risk_count = articles
            .iter()
            .filter(|a| match a.reorder_point {
                Some(rp) if rp > 0 => a.stock <= rp,
                _ => false,
            })
            .count();

        let projected_demand_30d = (avg_daily_units * 30.0).round() as i64;

        debug!(
            total_stock,
            projected_demand_30d, average_coverage_days, at_risk_count, "kpi snapshot"
        );

        Ok(KpiSnapshot {
            total_stock,
            projected_demand_30d,
            average_coverage_days,
            at_risk_count,
        })
    }
}

fn ceil_days(delta: chrono::Duration) -> i64 {
    (delta.num_seconds() as f64 / 86_400.0).ceil() as i64
}
