//! Reorder-point and safety-stock statistics.
//!
//! Translates a demand profile into a replenishment recommendation:
//! - expected lead-time demand `D_LT = d̄ × L`
//! - demand deviation over lead time `σ_LT = σ_d × √L`, assuming
//!   day-to-day demand independence (a simplifying assumption, not
//!   derived from data)
//! - safety stock `SS = z × σ_LT` for the target service level
//! - reorder point `ROP = D_LT + SS`, rounded up
//! - suggested order quantity `max(0, ROP − stock)`
//!
//! Everything here is a pure function over caller-supplied numbers,
//! re-evaluated per request and never persisted.

use crate::domain::error::DomainError;
use crate::domain::values::service_level::ServiceLevel;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Inputs to the replenishment calculation.
#[derive(Debug, Clone)]
pub struct ReplenishmentInputs {
    pub current_stock: i64,
    /// Mean daily demand in units.
    pub avg_daily_demand: f64,
    /// Standard deviation of daily demand in units.
    pub demand_std_dev: f64,
    /// Days between placing and receiving an order.
    pub lead_time_days: i64,
    pub service_level: ServiceLevel,
    /// Reorder point already configured on the article, if any.
    pub configured_reorder_point: Option<i64>,
}

/// Computed replenishment metrics. Field names on the wire match the
/// backend's replenishment endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplenishmentMetrics {
    #[serde(rename = "stock_actual")]
    pub current_stock: i64,
    #[serde(rename = "demanda_promedio_diaria")]
    pub avg_daily_demand: f64,
    #[serde(rename = "desviacion_demanda_diaria")]
    pub demand_std_dev: f64,
    #[serde(rename = "lead_time_dias")]
    pub lead_time_days: i64,
    #[serde(rename = "nivel_servicio")]
    pub service_level: f64,
    pub z_score: f64,
    #[serde(rename = "demanda_esperada_en_lead_time")]
    pub expected_lead_time_demand: f64,
    #[serde(rename = "desviacion_en_lead_time")]
    pub lead_time_std_dev: f64,
    #[serde(rename = "stock_seguridad")]
    pub safety_stock: i64,
    #[serde(rename = "reorder_point_actual")]
    pub configured_reorder_point: Option<i64>,
    #[serde(rename = "reorder_point_recomendado")]
    pub recommended_reorder_point: i64,
    #[serde(rename = "cantidad_reorden_sugerida")]
    pub suggested_reorder_qty: i64,
}

impl ReplenishmentMetrics {
    /// Stock status against the effective reorder point.
    pub fn stock_status(&self) -> StockStatus {
        StockStatus::classify(
            self.current_stock,
            self.configured_reorder_point,
            self.recommended_reorder_point,
        )
    }
}

/// Evaluate the replenishment formula for one article.
pub fn compute_replenishment(
    inputs: &ReplenishmentInputs,
) -> Result<ReplenishmentMetrics, DomainError> {
    if inputs.current_stock < 0 {
        return Err(DomainError::Validation(format!(
            "Current stock must be non-negative, got {}",
            inputs.current_stock
        )));
    }
    if !inputs.avg_daily_demand.is_finite() || inputs.avg_daily_demand < 0.0 {
        return Err(DomainError::Validation(format!(
            "Average daily demand must be non-negative, got {}",
            inputs.avg_daily_demand
        )));
    }
    if !inputs.demand_std_dev.is_finite() || inputs.demand_std_dev < 0.0 {
        return Err(DomainError::Validation(format!(
            "Demand standard deviation must be non-negative, got {}",
            inputs.demand_std_dev
        )));
    }
    if inputs.lead_time_days < 0 {
        return Err(DomainError::Validation(format!(
            "Lead time must be non-negative, got {} days",
            inputs.lead_time_days
        )));
    }

    let lead_time = inputs.lead_time_days as f64;
    let z = inputs.service_level.z_score();
    let expected = inputs.avg_daily_demand * lead_time;
    let sigma_lt = inputs.demand_std_dev * lead_time.sqrt();

    // z can be negative for service levels below 0.5; safety stock never is.
    let safety_stock = ((z * sigma_lt).round() as i64).max(0);
    let recommended = (expected + safety_stock as f64).ceil() as i64;
    let suggested_qty = (recommended - inputs.current_stock).max(0);

    Ok(ReplenishmentMetrics {
        current_stock: inputs.current_stock,
        avg_daily_demand: inputs.avg_daily_demand,
        demand_std_dev: inputs.demand_std_dev,
        lead_time_days: inputs.lead_time_days,
        service_level: inputs.service_level.value(),
        z_score: z,
        expected_lead_time_demand: expected,
        lead_time_std_dev: sigma_lt,
        safety_stock,
        configured_reorder_point: inputs.configured_reorder_point,
        recommended_reorder_point: recommended,
        suggested_reorder_qty: suggested_qty,
    })
}

/// Stock level relative to the effective reorder point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockStatus {
    Critical,
    Low,
    Adequate,
    Good,
}

impl StockStatus {
    /// Classify stock against the configured reorder point when one is
    /// set and positive, else against the recommended one. Boundaries are
    /// inclusive: stock exactly at half the reorder point is Critical.
    pub fn classify(stock: i64, configured_rop: Option<i64>, recommended_rop: i64) -> Self {
        let rop = configured_rop.filter(|&v| v > 0).unwrap_or(recommended_rop) as f64;
        let stock = stock as f64;
        if stock <= rop * 0.5 {
            StockStatus::Critical
        } else if stock <= rop {
            StockStatus::Low
        } else if stock <= rop * 1.5 {
            StockStatus::Adequate
        } else {
            StockStatus::Good
        }
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StockStatus::Critical => write!(f, "Critical"),
            StockStatus::Low => write!(f, "Low"),
            StockStatus::Adequate => write!(f, "Adequate"),
            StockStatus::Good => write!(f, "Good"),
        }
    }
}

/// Days of cover at the current mean demand. None when demand is zero.
pub fn coverage_days(stock: i64, avg_daily_demand: f64) -> Option<f64> {
    if avg_daily_demand > 0.0 {
        Some(stock as f64 / avg_daily_demand)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(stock: i64, demand: f64, std_dev: f64, lead_time: i64, level: f64) -> ReplenishmentInputs {
        ReplenishmentInputs {
            current_stock: stock,
            avg_daily_demand: demand,
            demand_std_dev: std_dev,
            lead_time_days: lead_time,
            service_level: ServiceLevel::new(level).unwrap(),
            configured_reorder_point: None,
        }
    }

    #[test]
    fn worked_example() {
        // Demand 10/day, σ 2, lead time 5 days, 95% service, stock 40:
        // D_LT = 50, σ_LT = 2√5 ≈ 4.472, SS = round(1.645 × 4.472) = 7,
        // ROP = 57, suggested qty = 17.
        let m = compute_replenishment(&inputs(40, 10.0, 2.0, 5, 0.95)).unwrap();
        assert!((m.expected_lead_time_demand - 50.0).abs() < 1e-9);
        assert!((m.lead_time_std_dev - 4.4721).abs() < 1e-3);
        assert_eq!(m.safety_stock, 7);
        assert_eq!(m.recommended_reorder_point, 57);
        assert_eq!(m.suggested_reorder_qty, 17);
    }

    #[test]
    fn suggested_qty_never_negative() {
        let m = compute_replenishment(&inputs(500, 10.0, 2.0, 5, 0.95)).unwrap();
        assert_eq!(m.suggested_reorder_qty, 0);
    }

    #[test]
    fn zero_std_dev_means_zero_safety_stock() {
        for level in [0.6, 0.9, 0.99] {
            let m = compute_replenishment(&inputs(0, 10.0, 0.0, 5, level)).unwrap();
            assert_eq!(m.safety_stock, 0);
            assert_eq!(m.recommended_reorder_point, 50);
        }
    }

    #[test]
    fn safety_stock_monotone_in_service_level() {
        let mut prev = i64::MIN;
        for level in [0.55, 0.75, 0.9, 0.95, 0.99] {
            let m = compute_replenishment(&inputs(0, 10.0, 4.0, 9, level)).unwrap();
            assert!(
                m.safety_stock >= prev,
                "safety stock fell from {prev} to {} at level {level}",
                m.safety_stock
            );
            prev = m.safety_stock;
        }
    }

    #[test]
    fn low_service_level_clamps_safety_stock_at_zero() {
        let m = compute_replenishment(&inputs(0, 10.0, 4.0, 9, 0.2)).unwrap();
        assert_eq!(m.safety_stock, 0);
    }

    #[test]
    fn zero_lead_time() {
        let m = compute_replenishment(&inputs(3, 10.0, 2.0, 0, 0.95)).unwrap();
        assert_eq!(m.recommended_reorder_point, 0);
        assert_eq!(m.suggested_reorder_qty, 0);
    }

    #[test]
    fn invalid_inputs_rejected() {
        assert!(compute_replenishment(&inputs(-1, 10.0, 2.0, 5, 0.95)).is_err());
        assert!(compute_replenishment(&inputs(0, -1.0, 2.0, 5, 0.95)).is_err());
        assert!(compute_replenishment(&inputs(0, 10.0, -2.0, 5, 0.95)).is_err());
        assert!(compute_replenishment(&inputs(0, 10.0, 2.0, -5, 0.95)).is_err());
        assert!(compute_replenishment(&inputs(0, f64::NAN, 2.0, 5, 0.95)).is_err());
    }

    #[test]
    fn classification_boundaries_inclusive() {
        // ROP 40: ≤20 Critical, ≤40 Low, ≤60 Adequate, else Good.
        assert_eq!(StockStatus::classify(20, Some(40), 99), StockStatus::Critical);
        assert_eq!(StockStatus::classify(21, Some(40), 99), StockStatus::Low);
        assert_eq!(StockStatus::classify(40, Some(40), 99), StockStatus::Low);
        assert_eq!(StockStatus::classify(41, Some(40), 99), StockStatus::Adequate);
        assert_eq!(StockStatus::classify(60, Some(40), 99), StockStatus::Adequate);
        assert_eq!(StockStatus::classify(61, Some(40), 99), StockStatus::Good);
    }

    #[test]
    fn zero_configured_rop_falls_back_to_recommended() {
        // A configured reorder point of 0 counts as unset.
        assert_eq!(StockStatus::classify(10, Some(0), 40), StockStatus::Critical);
        assert_eq!(StockStatus::classify(10, None, 40), StockStatus::Critical);
        assert_eq!(StockStatus::classify(10, Some(12), 40), StockStatus::Low);
    }

    #[test]
    fn metrics_use_backend_field_names() {
        let m = compute_replenishment(&inputs(40, 10.0, 2.0, 5, 0.95)).unwrap();
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json["stock_actual"], 40);
        assert_eq!(json["demanda_promedio_diaria"], 10.0);
        assert_eq!(json["stock_seguridad"], 7);
        assert_eq!(json["reorder_point_recomendado"], 57);
        assert_eq!(json["cantidad_reorden_sugerida"], 17);
        assert!(json["reorder_point_actual"].is_null());
    }

    #[test]
    fn coverage_days_helper() {
        assert_eq!(coverage_days(30, 10.0), Some(3.0));
        assert_eq!(coverage_days(30, 0.0), None);
    }
}
