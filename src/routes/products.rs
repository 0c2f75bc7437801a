use crate::{
    database::entities::{Product, Purchase},
    error::{AppError, FieldErrors},
    insights::{self, RecommendationReport},
    server::Server,
};
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use chrono::{FixedOffset, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::error;
use uuid::Uuid;

/// Purchase timestamps are stored as a rendered local-time string with a
/// hardcoded UTC+8 label, matching the existing records.
const PURCHASE_TIMESTAMP_FORMAT: &str = "%B %d, %Y at %I:%M:%S %p UTC+8";

/// Create product API routes
pub fn create_product_routes() -> Router<Server> {
    Router::new()
        .route("/", get(list_products))
        .route("/purchase/", post(submit_purchase))
        .route("/history/", get(purchase_history))
        .route("/recommendations/", get(product_recommendations))
}

/// Request body for submitting a purchase. Only `product` and `quantity`
/// are required; the remaining fields are stored as submitted, with no
/// enrichment from the referenced product.
#[derive(Debug, Deserialize)]
pub struct SubmitPurchaseRequest {
    pub product: Option<String>,
    pub quantity: Option<i64>,
    pub category: Option<String>,
    pub customer_id: Option<String>,
    pub date: Option<NaiveDate>,
    pub item_name: Option<String>,
    pub unit_price: Option<Decimal>,
    pub total: Option<Decimal>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PurchaseHistoryItem {
    pub id: String,
    pub product: String,
    pub product_name: String,
    pub product_category: String,
    pub quantity: i32,
    pub date: NaiveDate,
}

/// List all products, no filtering or pagination
async fn list_products(State(server): State<Server>) -> Result<Json<Vec<Product>>, AppError> {
    let products = server.database.products().list().await?;
    Ok(Json(products))
}

/// Submit a purchase record
async fn submit_purchase(
    State(server): State<Server>,
    Json(request): Json<SubmitPurchaseRequest>,
) -> Result<(StatusCode, Json<Purchase>), AppError> {
    let (product_id, quantity) = validate_purchase(&request)?;

    let unit_price = request.unit_price.unwrap_or(Decimal::ZERO);
    let total = request
        .total
        .unwrap_or_else(|| unit_price * Decimal::from(quantity));

    let record = Purchase {
        id: Uuid::new_v4().simple().to_string(),
        product_id,
        category: request.category.unwrap_or_default(),
        customer_id: request.customer_id,
        date: request.date.unwrap_or_else(|| Utc::now().date_naive()),
        item_name: request.item_name.unwrap_or_default(),
        quantity,
        unit_price,
        total,
        timestamp: creation_timestamp(),
    };

    let stored = server.database.purchases().store(&record).await?;
    Ok((StatusCode::CREATED, Json(stored)))
}

/// List purchases ordered by business date descending
async fn purchase_history(
    State(server): State<Server>,
) -> Result<Json<Vec<PurchaseHistoryItem>>, AppError> {
    let purchases = server.database.purchases().list_by_date_desc().await?;

    let items = purchases
        .into_iter()
        .map(|p| PurchaseHistoryItem {
            id: p.id,
            product: p.product_id,
            product_name: p.item_name,
            product_category: p.category,
            quantity: p.quantity,
            date: p.date,
        })
        .collect();

    Ok(Json(items))
}

/// Build the recommendation report over the full purchase list
async fn product_recommendations(
    State(server): State<Server>,
) -> Result<Json<RecommendationReport>, AppError> {
    let purchases = server.database.purchases().list_all().await.map_err(|e| {
        error!("Error in product_recommendations: {}", e);
        AppError::Internal("Failed to generate product recommendations".to_string())
    })?;

    Ok(Json(insights::build_report(&purchases)))
}

fn validate_purchase(request: &SubmitPurchaseRequest) -> Result<(String, i32), AppError> {
    let mut errors = FieldErrors::new();

    let product = match request.product.as_deref() {
        Some(p) if !p.trim().is_empty() => Some(p.to_string()),
        Some(_) => {
            errors
                .entry("product".to_string())
                .or_default()
                .push("This field may not be blank.".to_string());
            None
        }
        None => {
            errors
                .entry("product".to_string())
                .or_default()
                .push("This field is required.".to_string());
            None
        }
    };

    let quantity = match request.quantity {
        Some(q) if (1..=i64::from(i32::MAX)).contains(&q) => Some(q as i32),
        Some(_) => {
            errors
                .entry("quantity".to_string())
                .or_default()
                .push("Ensure this value is greater than or equal to 1.".to_string());
            None
        }
        None => {
            errors
                .entry("quantity".to_string())
                .or_default()
                .push("This field is required.".to_string());
            None
        }
    };

    match (product, quantity) {
        (Some(product), Some(quantity)) => Ok((product, quantity)),
        _ => Err(AppError::Validation(errors)),
    }
}

fn creation_timestamp() -> String {
    let offset = FixedOffset::east_opt(8 * 3600).expect("UTC+8 is a valid offset");
    Utc::now()
        .with_timezone(&offset)
        .format(PURCHASE_TIMESTAMP_FORMAT)
        .to_string()
}
