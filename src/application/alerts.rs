use crate::domain::entities::stock_alert::StockAlert;
use crate::domain::error::DomainError;
use crate::domain::ports::inventory_api::InventoryApi;
use crate::domain::values::filters::DashboardFilters;
use crate::domain::values::severity::AlertSeverity;
use std::sync::Arc;

/// Coverage threshold (days) below which an item counts as urgent: the
/// alerts-only filter and the purchase-order pre-selection both use it.
pub const LOW_COVERAGE_DAYS: f64 = 15.0;

/// Active stock alerts, filtered and sorted for display. All filtering is
/// predicate composition over the already-fetched list.
pub struct AlertsUseCase {
    api: Arc<dyn InventoryApi>,
}

impl AlertsUseCase {
    pub fn new(api: Arc<dyn InventoryApi>) -> Self {
        Self { api }
    }

    pub async fn active(
        &self,
        filters: &DashboardFilters,
    ) -> Result<Vec<StockAlert>, DomainError> {
        let alerts = self.api.list_stock_alerts(true).await?;
        Ok(apply_filters(alerts, filters))
    }
}

/// Site equality, case-insensitive SKU/name containment, the alerts-only
/// coverage cutoff, then a stable severity sort (high first).
pub fn apply_filters(mut alerts: Vec<StockAlert>, filters: &DashboardFilters) -> Vec<StockAlert> {
    if let Some(site) = &filters.site {
        alerts.retain(|a| &a.article.site == site);
    }

    if let Some(search) = &filters.search {
        let needle = search.to_lowercase();
        if !needle.is_empty() {
            alerts.retain(|a| {
                a.article.sku.to_lowercase().contains(&needle)
                    || a.article.name.to_lowercase().contains(&needle)
            });
        }
    }

    if filters.alerts_only {
        alerts.retain(|a| a.days_of_coverage < LOW_COVERAGE_DAYS);
    }

    alerts.sort_by_key(|a| a.severity);
    alerts
}

/// High and medium counts for the alert header badges.
pub fn severity_counts(alerts: &[StockAlert]) -> (usize, usize) {
    let high = alerts
        .iter()
        .filter(|a| a.severity == AlertSeverity::High)
        .count();
    let medium = alerts
        .iter()
        .filter(|a| a.severity == AlertSeverity::Medium)
        .count();
    (high, medium)
}
