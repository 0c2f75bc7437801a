//! Placeholder sales projections.
//!
//! Not a statistical model: projections are random perturbations of the
//! latest sale's total. The `SalesForecaster` trait keeps the boundary
//! narrow so a real model can replace this without touching the routes.

use crate::database::entities::Sale;
use chrono::{Datelike, Duration};
use rand::Rng;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyProjection {
    pub year: i32,
    pub month: u32,
    pub predicted_sales: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesForecast {
    pub monthly: Decimal,
    pub yearly: Vec<MonthlyProjection>,
}

/// Projects future sales from the latest recorded sale.
pub trait SalesForecaster: Send + Sync {
    fn forecast(&self, latest: &Sale) -> SalesForecast;
}

/// Random multiplicative perturbation of the latest total: +/-10% for the
/// monthly figure, +/-20% for each of the twelve 30-day steps ahead.
pub struct RandomWalkForecaster;

impl SalesForecaster for RandomWalkForecaster {
    fn forecast(&self, latest: &Sale) -> SalesForecast {
        let mut rng = rand::thread_rng();
        let base = latest.total_sales.to_f64().unwrap_or(0.0);

        let monthly = perturb(base, &mut rng, 0.9, 1.1);

        let mut yearly = Vec::with_capacity(12);
        for step in 1..=12i64 {
            let projection_date = latest.date + Duration::days(30 * step);
            yearly.push(MonthlyProjection {
                year: projection_date.year(),
                month: projection_date.month(),
                predicted_sales: perturb(base, &mut rng, 0.8, 1.2),
            });
        }

        SalesForecast { monthly, yearly }
    }
}

fn perturb(base: f64, rng: &mut impl Rng, low: f64, high: f64) -> Decimal {
    let factor = rng.gen_range(low..=high);
    Decimal::from_f64(base * factor)
        .unwrap_or_default()
        .round_dp(2)
}
