use crate::{
    database::entities::Sale,
    error::{AppError, FieldErrors},
    forecast::SalesForecast,
    server::Server,
};
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

/// Create sales API routes
pub fn create_sales_routes() -> Router<Server> {
    Router::new()
        .route("/submit/", post(submit_sales))
        .route("/history/", get(sales_history))
        .route("/predict/", get(sales_prediction))
}

#[derive(Debug, Deserialize)]
pub struct SubmitSaleRequest {
    pub date: Option<NaiveDate>,
    pub total_sales: Option<Decimal>,
    #[serde(default)]
    pub holiday_season: bool,
    #[serde(default)]
    pub promo_active: bool,
    pub economic_indicator: Option<f64>,
}

/// Submit a daily sales record
async fn submit_sales(
    State(server): State<Server>,
    Json(request): Json<SubmitSaleRequest>,
) -> Result<(StatusCode, Json<Sale>), AppError> {
    let (date, total_sales, economic_indicator) = validate_sale(&request)?;

    let sale = Sale {
        id: 0,
        date,
        total_sales,
        holiday_season: request.holiday_season,
        promo_active: request.promo_active,
        economic_indicator,
    };

    let stored = server.database.sales().store(&sale).await?;
    Ok((StatusCode::CREATED, Json(stored)))
}

/// List sales ordered by date descending
async fn sales_history(State(server): State<Server>) -> Result<Json<Vec<Sale>>, AppError> {
    let sales = server.database.sales().list_by_date_desc().await?;
    Ok(Json(sales))
}

/// Project future sales from the latest recorded sale
async fn sales_prediction(
    State(server): State<Server>,
) -> Result<Json<SalesForecast>, AppError> {
    let latest = server
        .database
        .sales()
        .latest()
        .await?
        .ok_or_else(|| AppError::NotFound("No sales data available for prediction".to_string()))?;

    Ok(Json(server.forecaster.forecast(&latest)))
}

fn validate_sale(request: &SubmitSaleRequest) -> Result<(NaiveDate, Decimal, f64), AppError> {
    let mut errors = FieldErrors::new();

    if request.date.is_none() {
        errors
            .entry("date".to_string())
            .or_default()
            .push("This field is required.".to_string());
    }

    let total_sales = match request.total_sales {
        Some(total) if total >= Decimal::ZERO => Some(total),
        Some(_) => {
            errors
                .entry("total_sales".to_string())
                .or_default()
                .push("Ensure this value is greater than or equal to 0.".to_string());
            None
        }
        None => {
            errors
                .entry("total_sales".to_string())
                .or_default()
                .push("This field is required.".to_string());
            None
        }
    };

    if request.economic_indicator.is_none() {
        errors
            .entry("economic_indicator".to_string())
            .or_default()
            .push("This field is required.".to_string());
    }

    match (request.date, total_sales, request.economic_indicator) {
        (Some(date), Some(total), Some(indicator)) => Ok((date, total, indicator)),
        _ => Err(AppError::Validation(errors)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_with(
        date: Option<NaiveDate>,
        total_sales: Option<Decimal>,
        economic_indicator: Option<f64>,
    ) -> SubmitSaleRequest {
        SubmitSaleRequest {
            date,
            total_sales,
            holiday_season: false,
            promo_active: false,
            economic_indicator,
        }
    }

    #[test]
    fn test_validate_sale_accepts_complete_request() {
        let request = request_with(
            NaiveDate::from_ymd_opt(2024, 1, 5),
            Some(Decimal::from(1200)),
            Some(1.02),
        );

        let (date, total, indicator) = validate_sale(&request).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        assert_eq!(total, Decimal::from(1200));
        assert_eq!(indicator, 1.02);
    }

    #[test]
    fn test_validate_sale_reports_all_missing_fields() {
        let request = request_with(None, None, None);
        let err = validate_sale(&request).unwrap_err();

        match err {
            AppError::Validation(errors) => {
                assert!(errors.contains_key("date"));
                assert!(errors.contains_key("total_sales"));
                assert!(errors.contains_key("economic_indicator"));
            }
            other => panic!("expected validation error, got {}", other),
        }
    }

    #[test]
    fn test_validate_sale_rejects_negative_total() {
        let request = request_with(
            NaiveDate::from_ymd_opt(2024, 1, 5),
            Some(Decimal::from(-1)),
            Some(1.0),
        );

        let err = validate_sale(&request).unwrap_err();
        match err {
            AppError::Validation(errors) => {
                assert!(errors.contains_key("total_sales"));
                assert!(!errors.contains_key("date"));
            }
            other => panic!("expected validation error, got {}", other),
        }
    }
}
