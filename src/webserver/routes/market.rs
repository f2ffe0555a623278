use axum::extract::State;
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use serde::Serialize;
use serde_json::json;

use crate::database::InventoryItem;
use crate::logger::{self, LogTag};
use crate::webserver::{state::AppState, utils::success_response};

/// Items priced this far above their category average are flagged SELL
const OVERVALUED_RATIO: f64 = 1.2;

/// Items priced this far below their category average are flagged HOLD
const UNDERVALUED_RATIO: f64 = 0.8;

/// Maximum recommendations returned
const MAX_RECOMMENDATIONS: usize = 5;

#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub item_name: String,
    pub action: &'static str,
    pub reason: String,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/market/analysis", get(market_analysis))
}

/// GET /market/analysis
///
/// Price-per-weight efficiency recommendations: an item well above its
/// category average is a sell candidate, well below is worth holding.
async fn market_analysis(State(state): State<AppState>) -> Response {
    let inventory = match state.db.list_inventory().await {
        Ok(items) => items,
        Err(e) => {
            logger::warning(LogTag::Webserver, &format!("Inventory read failed: {}", e));
            return success_response(json!({
                "recommendations": [],
                "message": "Error fetching market analysis.",
            }));
        }
    };

    if inventory.is_empty() {
        return success_response(json!({
            "recommendations": [],
            "message": "No items in inventory.",
        }));
    }

    let mut recommendations = Vec::new();
    for item in &inventory {
        if item.weight <= 0.0 {
            continue;
        }
        let efficiency = item.current_price / item.weight;

        let avg = match state
            .db
            .avg_efficiency(&item.rarity, &item.source, &item.name)
            .await
        {
            Ok(Some(avg)) => avg,
            Ok(None) => efficiency,
            Err(e) => {
                logger::warning(
                    LogTag::Webserver,
                    &format!("Efficiency lookup failed for {}: {}", item.name, e),
                );
                continue;
            }
        };

        if let Some(rec) = classify(item, efficiency, avg) {
            recommendations.push(rec);
        }
    }

    recommendations.truncate(MAX_RECOMMENDATIONS);

    if recommendations.is_empty() {
        return success_response(json!({
            "recommendations": [],
            "message": "No recommendations available.",
        }));
    }

    success_response(json!({
        "recommendations": recommendations,
        "message": null,
    }))
}

/// Compare an item's efficiency to its category average
fn classify(item: &InventoryItem, efficiency: f64, avg_efficiency: f64) -> Option<Recommendation> {
    if efficiency > avg_efficiency * OVERVALUED_RATIO {
        Some(Recommendation {
            item_name: item.name.clone(),
            action: "SELL",
            reason: format!(
                "Overvalued vs similar {} {} items",
                item.rarity, item.source
            ),
        })
    } else if efficiency < avg_efficiency * UNDERVALUED_RATIO {
        Some(Recommendation {
            item_name: item.name.clone(),
            action: "HOLD",
            reason: format!(
                "Undervalued vs similar {} {} items",
                item.rarity, item.source
            ),
        })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, price: f64, weight: f64) -> InventoryItem {
        InventoryItem {
            id: 0,
            name: name.to_string(),
            quantity: 1,
            rarity: "grey".to_string(),
            source: "quest".to_string(),
            current_price: price,
            weight,
            tier: None,
        }
    }

    #[test]
    fn test_classify_overvalued_item() {
        let it = item("Wooden Crate", 130.0, 1.0);
        let rec = classify(&it, 130.0, 100.0).unwrap();
        assert_eq!(rec.action, "SELL");
    }

    #[test]
    fn test_classify_undervalued_item() {
        let it = item("Wooden Torch", 70.0, 1.0);
        let rec = classify(&it, 70.0, 100.0).unwrap();
        assert_eq!(rec.action, "HOLD");
    }

    #[test]
    fn test_classify_fairly_priced_item() {
        let it = item("Broken Skull", 100.0, 1.0);
        assert!(classify(&it, 100.0, 100.0).is_none());
        assert!(classify(&it, 119.0, 100.0).is_none());
        assert!(classify(&it, 81.0, 100.0).is_none());
    }
}
