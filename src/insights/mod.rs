//! Recommendation views derived from the purchase history.
//!
//! Pure computation: a single pass over the purchase records produces the
//! per-category recommendations, the global popularity ranking, and the
//! price-bucket listing. No I/O happens here; callers fetch the records
//! and decide how failures surface.

use crate::database::entities::Purchase;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRecommendation {
    pub name: String,
    pub quantity_sold: i64,
    pub price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopularProduct {
    pub name: String,
    pub total_sold: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub name: String,
    pub price: Decimal,
}

/// The three fixed price buckets. An item lands in a bucket once per
/// distinct name; the first price seen for it in that bucket is kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceRanges {
    #[serde(rename = "P0-500")]
    pub p0_500: Vec<PricePoint>,
    #[serde(rename = "P501-1000")]
    pub p501_1000: Vec<PricePoint>,
    #[serde(rename = "P1000+")]
    pub p1000_plus: Vec<PricePoint>,
}

impl PriceRanges {
    fn bucket_mut(&mut self, unit_price: Decimal) -> &mut Vec<PricePoint> {
        if unit_price <= Decimal::from(500) {
            &mut self.p0_500
        } else if unit_price <= Decimal::from(1000) {
            &mut self.p501_1000
        } else {
            &mut self.p1000_plus
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendationReport {
    pub category_recommendations: BTreeMap<String, Vec<CategoryRecommendation>>,
    pub most_popular_products: Vec<PopularProduct>,
    pub price_ranges: PriceRanges,
}

/// Build the recommendation report from the full purchase list.
///
/// Quantities and prices are taken as stored; zero or negative values flow
/// through unfiltered. Note the intentional asymmetry between the views:
/// the per-category price is last-write-wins across repeated purchases of
/// an item, while the price-bucket entry for an item is first-write-wins.
pub fn build_report(purchases: &[Purchase]) -> RecommendationReport {
    let mut categories: BTreeMap<String, Vec<CategoryRecommendation>> = BTreeMap::new();
    let mut category_index: HashMap<(String, String), usize> = HashMap::new();

    let mut popular: Vec<PopularProduct> = Vec::new();
    let mut popular_index: HashMap<String, usize> = HashMap::new();

    let mut price_ranges = PriceRanges::default();

    for purchase in purchases {
        let quantity = i64::from(purchase.quantity);

        // Per-category summary, one entry per item name in first-seen order
        let entries = categories.entry(purchase.category.clone()).or_default();
        match category_index.entry((purchase.category.clone(), purchase.item_name.clone())) {
            Entry::Occupied(slot) => {
                let entry = &mut entries[*slot.get()];
                entry.quantity_sold += quantity;
                entry.price = purchase.unit_price;
            }
            Entry::Vacant(slot) => {
                slot.insert(entries.len());
                entries.push(CategoryRecommendation {
                    name: purchase.item_name.clone(),
                    quantity_sold: quantity,
                    price: purchase.unit_price,
                });
            }
        }

        // Global popularity, accumulated in first-seen order
        match popular_index.entry(purchase.item_name.clone()) {
            Entry::Occupied(slot) => {
                popular[*slot.get()].total_sold += quantity;
            }
            Entry::Vacant(slot) => {
                slot.insert(popular.len());
                popular.push(PopularProduct {
                    name: purchase.item_name.clone(),
                    total_sold: quantity,
                });
            }
        }

        // Price buckets, deduplicated by name within each bucket
        let bucket = price_ranges.bucket_mut(purchase.unit_price);
        if !bucket.iter().any(|p| p.name == purchase.item_name) {
            bucket.push(PricePoint {
                name: purchase.item_name.clone(),
                price: purchase.unit_price,
            });
        }
    }

    // Stable sort keeps first-seen order among equal totals
    popular.sort_by(|a, b| b.total_sold.cmp(&a.total_sold));

    RecommendationReport {
        category_recommendations: categories,
        most_popular_products: popular,
        price_ranges,
    }
}
