mod common;

use common::{make_alert, setup_with, MockInventoryApi};
use medstock::application::alerts::{apply_filters, severity_counts};
use medstock::domain::values::filters::DashboardFilters;
use medstock::domain::values::severity::AlertSeverity;
use std::sync::Arc;

fn staged() -> Vec<medstock::domain::entities::stock_alert::StockAlert> {
    vec![
        make_alert("al-1", "GZ-10", "Sterile gauze", "Main", "MedSup A", 5.0, AlertSeverity::Low, 20.0, 5),
        make_alert("al-2", "SY-05", "Syringe 5ml", "North", "MedSup A", 3.0, AlertSeverity::High, 4.0, 30),
        make_alert("al-3", "IV-01", "IV catheter", "Main", "PharmaX", 20.0, AlertSeverity::Medium, 12.0, 8),
        make_alert("al-4", "GL-20", "Nitrile gloves", "Main", "PharmaX", 9.0, AlertSeverity::High, 7.0, 40),
    ]
}

#[tokio::test]
async fn sorts_by_severity_high_first() {
    let api = Arc::new(MockInventoryApi::new());
    *api.alerts.lock().unwrap() = staged();
    let ms = setup_with(api);

    let alerts = ms.active_alerts(&DashboardFilters::new()).await.unwrap();
    let severities: Vec<AlertSeverity> = alerts.iter().map(|a| a.severity).collect();
    assert_eq!(
        severities,
        [
            AlertSeverity::High,
            AlertSeverity::High,
            AlertSeverity::Medium,
            AlertSeverity::Low
        ]
    );
    // Stable within the same severity: al-2 was staged before al-4.
    assert_eq!(alerts[0].id, "al-2");
    assert_eq!(alerts[1].id, "al-4");
}

#[tokio::test]
async fn site_filter_is_exact_match() {
    let api = Arc::new(MockInventoryApi::new());
    *api.alerts.lock().unwrap() = staged();
    let ms = setup_with(api);

    let mut filters = DashboardFilters::new();
    filters.site = Some("North".into());
    let alerts = ms.active_alerts(&filters).await.unwrap();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].id, "al-2");
}

#[tokio::test]
async fn search_matches_sku_and_name_case_insensitively() {
    let api = Arc::new(MockInventoryApi::new());
    *api.alerts.lock().unwrap() = staged();
    let ms = setup_with(api);

    let mut filters = DashboardFilters::new();
    filters.search = Some("gauze".into());
    let by_name = ms.active_alerts(&filters).await.unwrap();
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].id, "al-1");

    filters.search = Some("iv-".into());
    let by_sku = ms.active_alerts(&filters).await.unwrap();
    assert_eq!(by_sku.len(), 1);
    assert_eq!(by_sku[0].id, "al-3");
}

#[tokio::test]
async fn alerts_only_keeps_coverage_below_fifteen_days() {
    let api = Arc::new(MockInventoryApi::new());
    let mut alerts = staged();
    // Exactly at the threshold: excluded (the cutoff is strict).
    alerts.push(make_alert(
        "al-5", "XX-01", "Edge case", "Main", "PharmaX", 1.0,
        AlertSeverity::Low, 15.0, 1,
    ));
    *api.alerts.lock().unwrap() = alerts;
    let ms = setup_with(api);

    let mut filters = DashboardFilters::new();
    filters.alerts_only = true;
    let filtered = ms.active_alerts(&filters).await.unwrap();
    let ids: Vec<&str> = filtered.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, ["al-2", "al-4", "al-3"]);
}

#[tokio::test]
async fn inactive_alerts_are_never_returned() {
    let api = Arc::new(MockInventoryApi::new());
    let mut alerts = staged();
    alerts[0].is_active = false;
    *api.alerts.lock().unwrap() = alerts;
    let ms = setup_with(api);

    let active = ms.active_alerts(&DashboardFilters::new()).await.unwrap();
    assert!(active.iter().all(|a| a.id != "al-1"));
    assert_eq!(active.len(), 3);
}

#[test]
fn filters_compose() {
    let mut filters = DashboardFilters::new();
    filters.site = Some("Main".into());
    filters.alerts_only = true;
    let result = apply_filters(staged(), &filters);
    // Main site with coverage under 15: the catheter and the gloves.
    let ids: Vec<&str> = result.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, ["al-4", "al-3"]);
}

#[test]
fn counts_for_badges() {
    let (high, medium) = severity_counts(&staged());
    assert_eq!(high, 2);
    assert_eq!(medium, 1);
}
