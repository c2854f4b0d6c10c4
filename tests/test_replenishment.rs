mod common;

use common::{make_replenishment_report, setup_with, MockInventoryApi};
use medstock::domain::error::DomainError;
use medstock::domain::values::replenishment::{ReplenishmentInputs, StockStatus};
use medstock::domain::values::service_level::ServiceLevel;
use std::sync::Arc;

#[tokio::test]
async fn lookup_by_sku_classifies_status_locally() {
    let api = Arc::new(MockInventoryApi::new());
    *api.replenishment.lock().unwrap() = Some(make_replenishment_report());
    let ms = setup_with(api);

    let view = ms.replenishment_by_sku("GZ-10").await.unwrap();
    assert_eq!(view.article.sku, "GZ-10");
    assert_eq!(view.metrics.recommended_reorder_point, 57);
    // Stock 40 against an effective reorder point of 57: above half,
    // at or below the point itself.
    assert_eq!(view.status, StockStatus::Low);
}

#[tokio::test]
async fn configured_reorder_point_wins_over_recommended() {
    let api = Arc::new(MockInventoryApi::new());
    let mut report = make_replenishment_report();
    report.metrics.configured_reorder_point = Some(200);
    *api.replenishment.lock().unwrap() = Some(report);
    let ms = setup_with(api);

    let view = ms.replenishment_by_article("art-1").await.unwrap();
    // Stock 40 is under half of the configured 200.
    assert_eq!(view.status, StockStatus::Critical);
}

#[tokio::test]
async fn blank_identifier_is_a_validation_error() {
    let api = Arc::new(MockInventoryApi::new());
    let ms = setup_with(api);
    assert!(matches!(
        ms.replenishment_by_sku("  ").await,
        Err(DomainError::Validation(_))
    ));
}

#[tokio::test]
async fn unknown_article_propagates_not_found() {
    let api = Arc::new(MockInventoryApi::new());
    let ms = setup_with(api);
    assert!(matches!(
        ms.replenishment_by_article("nope").await,
        Err(DomainError::NotFound(_))
    ));
}

#[tokio::test]
async fn local_evaluation_matches_the_reference_example() {
    let api = Arc::new(MockInventoryApi::new());
    let ms = setup_with(api);

    let metrics = ms
        .evaluate_replenishment(&ReplenishmentInputs {
            current_stock: 40,
            avg_daily_demand: 10.0,
            demand_std_dev: 2.0,
            lead_time_days: 5,
            service_level: ServiceLevel::new(0.95).unwrap(),
            configured_reorder_point: None,
        })
        .unwrap();

    assert_eq!(metrics.safety_stock, 7);
    assert_eq!(metrics.recommended_reorder_point, 57);
    assert_eq!(metrics.suggested_reorder_qty, 17);
}

#[tokio::test]
async fn local_evaluation_rejects_negative_lead_time() {
    let api = Arc::new(MockInventoryApi::new());
    let ms = setup_with(api);

    let err = ms
        .evaluate_replenishment(&ReplenishmentInputs {
            current_stock: 10,
            avg_daily_demand: 1.0,
            demand_std_dev: 0.5,
            lead_time_days: -1,
            service_level: ServiceLevel::new(0.9).unwrap(),
            configured_reorder_point: None,
        })
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
}
