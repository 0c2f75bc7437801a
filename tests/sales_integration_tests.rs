use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::NaiveDate;
use retail_insight::{
    database::entities::Sale,
    forecast::SalesForecast,
    test_utils::{create_test_sale, TestServerBuilder},
    Server,
};
use rust_decimal::Decimal;
use serde_json::json;
use tower::ServiceExt;

struct TestSetup {
    server: Server,
    app: Router,
}

impl TestSetup {
    async fn new() -> Self {
        let server = TestServerBuilder::new().build().await;
        let app = server.create_app();
        Self { server, app }
    }

    async fn make_request(&self, request: Request<Body>) -> axum::response::Response {
        self.app.clone().oneshot(request).await.unwrap()
    }

    async fn get(&self, uri: &str) -> axum::response::Response {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.make_request(request).await
    }

    async fn post_json(&self, uri: &str, body: serde_json::Value) -> axum::response::Response {
        let request = Request::builder()
            .uri(uri)
            .method("POST")
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.make_request(request).await
    }
}

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

#[tokio::test]
async fn test_submit_sale_round_trip() {
    let setup = TestSetup::new().await;

    let response = setup
        .post_json(
            "/sales/submit/",
            json!({
                "date": "2024-01-05",
                "total_sales": 1200,
                "holiday_season": true,
                "economic_indicator": 1.02
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let stored: Sale = body_json(response).await;
    assert!(stored.id > 0);
    assert_eq!(stored.date, date(2024, 1, 5));
    assert_eq!(stored.total_sales, Decimal::from(1200));
    assert!(stored.holiday_season);
    assert!(!stored.promo_active);

    let response = setup.get("/sales/history/").await;
    assert_eq!(response.status(), StatusCode::OK);

    let history: Vec<Sale> = body_json(response).await;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].id, stored.id);
}

#[tokio::test]
async fn test_submit_sale_missing_fields_returns_field_errors() {
    let setup = TestSetup::new().await;

    let response = setup.post_json("/sales/submit/", json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let errors: serde_json::Value = body_json(response).await;
    assert!(errors.get("date").is_some());
    assert!(errors.get("total_sales").is_some());
    assert!(errors.get("economic_indicator").is_some());
}

#[tokio::test]
async fn test_submit_sale_rejects_negative_total() {
    let setup = TestSetup::new().await;

    let response = setup
        .post_json(
            "/sales/submit/",
            json!({
                "date": "2024-01-05",
                "total_sales": -50,
                "economic_indicator": 1.0
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let errors: serde_json::Value = body_json(response).await;
    assert!(errors.get("total_sales").is_some());
    assert!(errors.get("date").is_none());
}

#[tokio::test]
async fn test_sales_history_ordered_by_date_descending() {
    let setup = TestSetup::new().await;
    let db = &setup.server.database;
    create_test_sale(db, date(2024, 1, 1), Decimal::from(100)).await;
    create_test_sale(db, date(2024, 3, 1), Decimal::from(300)).await;
    create_test_sale(db, date(2024, 2, 1), Decimal::from(200)).await;

    let response = setup.get("/sales/history/").await;
    assert_eq!(response.status(), StatusCode::OK);

    let history: Vec<Sale> = body_json(response).await;
    let dates: Vec<NaiveDate> = history.iter().map(|sale| sale.date).collect();
    assert_eq!(
        dates,
        vec![date(2024, 3, 1), date(2024, 2, 1), date(2024, 1, 1)]
    );
}

#[tokio::test]
async fn test_predict_without_sales_returns_not_found() {
    let setup = TestSetup::new().await;

    let response = setup.get("/sales/predict/").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: serde_json::Value = body_json(response).await;
    assert_eq!(
        body["error"],
        json!("No sales data available for prediction")
    );
}

#[tokio::test]
async fn test_predict_uses_latest_sale() {
    let setup = TestSetup::new().await;
    let db = &setup.server.database;
    // Older sale with a wildly different total must not drive the forecast
    create_test_sale(db, date(2024, 1, 1), Decimal::from(1_000_000)).await;
    create_test_sale(db, date(2024, 2, 1), Decimal::from(1000)).await;

    let response = setup.get("/sales/predict/").await;
    assert_eq!(response.status(), StatusCode::OK);

    let forecast: SalesForecast = body_json(response).await;
    assert!(forecast.monthly >= Decimal::from(900));
    assert!(forecast.monthly <= Decimal::from(1100));

    assert_eq!(forecast.yearly.len(), 12);
    for projection in &forecast.yearly {
        assert!(projection.predicted_sales >= Decimal::from(800));
        assert!(projection.predicted_sales <= Decimal::from(1200));
    }
}
