use serde_json::json;
use wealthboard::engine::HistoryStatus;
use wealthboard::{
    Dashboard, Decimal, GroupedPositions, Grouping, HistorySource, RawSnapshot, TrendSelection,
    ViewMode,
};

#[test]
fn test_empty_assets_with_history() {
    let snapshot = RawSnapshot::from_json(json!({
        "assets": [],
        "historyByCategory": [{"date": "2024-01", "現金・預金": 10}]
    }))
    .unwrap();

    let dashboard = Dashboard::build(&snapshot, Grouping::Owner, &mut TrendSelection::default());

    assert!(dashboard.positions.is_empty());
    assert_eq!(dashboard.summary.total_assets, Decimal::zero());
    assert_eq!(dashboard.summary.net_worth, Decimal::zero());
    assert_eq!(dashboard.summary.total_profit_or_loss_rate, Decimal::zero());
    assert!(dashboard.summary.category_breakdown.is_empty());
    assert_eq!(dashboard.grouped, GroupedPositions::Groups(vec![]));
    assert_eq!(dashboard.history.status, HistoryStatus::Ready);
    assert_eq!(dashboard.chart.series_keys, vec!["現金・預金"]);
}

#[test]
fn test_focus_request_consumed_by_build() {
    let snapshot = RawSnapshot::from_slice(
        r#"{
            "assets": [{"name": "Toyota", "type": "株式(現物)", "shares": 1, "currentPrice": 10}],
            "history": [
                {"date": "2024-01", "Toyota": 10, "Sony": 3},
                {"date": "2024-02", "Toyota": 12}
            ]
        }"#
        .as_bytes(),
    )
    .unwrap();
    assert_eq!(snapshot.history_source, HistorySource::Legacy);

    let mut selection = TrendSelection::default();
    selection.request_focus("Sony");

    let first = Dashboard::build(&snapshot, Grouping::None, &mut selection);
    assert_eq!(first.chart.view_mode, ViewMode::Instrument);
    assert_eq!(first.chart.series_keys, vec!["Sony"]);
    assert!(selection.focus_request.is_none());

    // Rebuilding keeps the focused selection without re-applying the request.
    let second = Dashboard::build(&snapshot, Grouping::None, &mut selection);
    assert_eq!(second.chart.series_keys, vec!["Sony"]);
    assert_eq!(second.history.processed_points[1].get("Sony"), Decimal::zero());
}

#[test]
fn test_rebuild_is_deterministic() {
    let snapshot = RawSnapshot::from_json(json!({
        "assets": [
            {"name": "Bank", "type": "現金・預金", "value": "1,000"},
            {"name": "Fund", "type": "投資信託", "shares": 3, "currentPrice": 100, "avgPurchasePrice": 90}
        ],
        "historyByCategory": [{"date": "2024-01", "現金・預金": 1, "投資信託": 300}]
    }))
    .unwrap();

    let a = Dashboard::build(&snapshot, Grouping::Name, &mut TrendSelection::default());
    let b = Dashboard::build(&snapshot, Grouping::Name, &mut TrendSelection::default());
    assert_eq!(a, b);
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}
