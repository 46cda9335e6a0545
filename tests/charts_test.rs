//! Integration tests for the rendered SVG charts.

mod common;

use axum::http::StatusCode;
use common::TestClient;

#[tokio::test]
async fn test_expense_pie_svg() {
    let client = TestClient::new();
    let (status, content_type, body) = client.get_with_type("/charts/expense-pie.svg").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type, "image/svg+xml");
    assert!(body.starts_with("<svg"));
    assert!(body.contains("<title>Expenses, Jun 2025</title>"));
    assert_eq!(body.matches("<path").count(), 3);
    assert!(body.contains("Rent: $1,500.00 (46.9%)"));
    assert!(body.contains("fill=\"#F59E0B\""));
}

#[tokio::test]
async fn test_income_pie_svg_full_circle() {
    let client = TestClient::new();
    let (status, _, body) = client.get_with_type("/charts/income-pie.svg").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("M 100 10 A 90 90 0 1 1 100 190 A 90 90 0 1 1 100 10 Z"));
    assert!(body.contains("$5,000.00 · 100.0%"));
}

#[tokio::test]
async fn test_pie_svg_without_data() {
    let client = TestClient::new();
    let (status, _, body) = client
        .get_with_type("/charts/income-pie.svg?period=annual&year=2019")
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No data available"));
    assert!(!body.contains("<path"));
}

#[tokio::test]
async fn test_comparison_svg() {
    let client = TestClient::new();
    let (status, content_type, body) = client.get_with_type("/charts/comparison.svg").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type, "image/svg+xml");
    assert!(body.contains("Expenses, May 2025 vs Jun 2025"));
    assert_eq!(body.matches("<polyline").count(), 2);
    // one marker per category and series
    assert_eq!(body.matches("<circle").count(), 6);
    assert!(body.contains("Transport: $700.00 (+$700.00)"));
    assert!(body.contains("$1,500.00"));
}

#[tokio::test]
async fn test_comparison_svg_without_data() {
    let client = TestClient::new();
    let (status, _, body) = client
        .get_with_type("/charts/comparison.svg?month=1&year=2019")
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No data available"));
    assert!(!body.contains("<polyline"));
}
