//! Outfitter catalog: items, typed effects, and pricing.

use serde::{Deserialize, Serialize};

use crate::numbers::{i64_to_f64, round_f64_to_i64};
use crate::power::{DeviceKind, FuelKind};

/// What buying an item actually does. Effects are typed so gameplay never
/// parses strings to decide what an item grants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemEffect {
    AddFood { rations: u32 },
    AddWater { liters: f32 },
    AddSolarWatts { watts: f32 },
    AddWindWatts { watts: f32 },
    AddEvRange { miles: f32 },
    AddStorage { water_l: f32, rations: u32 },
    GrantTent,
    GrantDevice { device: DeviceKind },
    AddFuel { fuel: FuelKind, amount: f32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: String,
    pub label: String,
    pub price_cents: i64,
    pub effect: ItemEffect,
    /// Career shop discounts apply only to discountable items.
    #[serde(default)]
    pub discountable: bool,
    #[serde(default)]
    pub min_level: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub items: Vec<CatalogItem>,
}

impl Catalog {
    /// Load the catalog from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed or fails validation.
    pub fn from_json(json_str: &str) -> Result<Self, String> {
        let catalog: Self =
            serde_json::from_str(json_str).map_err(|e| format!("JSON parse error: {e}"))?;
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> Result<(), String> {
        if self.items.is_empty() {
            return Err("Catalog must not be empty".into());
        }
        for item in &self.items {
            if item.price_cents < 0 {
                return Err(format!("Item '{}' has a negative price", item.id));
            }
            if self.items.iter().filter(|i| i.id == item.id).count() > 1 {
                return Err(format!("Duplicate item id '{}'", item.id));
            }
        }
        Ok(())
    }

    /// Embedded default catalog.
    ///
    /// # Panics
    ///
    /// Panics if the bundled asset is invalid, which is a build defect.
    #[must_use]
    pub fn default_config() -> Self {
        Self::from_json(include_str!("../assets/store.json")).expect("bundled store.json is valid")
    }

    /// Resolve player input to an item: exact id first, then
    /// case-insensitive label substring.
    #[must_use]
    pub fn find(&self, query: &str) -> Option<&CatalogItem> {
        let q = query.trim();
        if let Some(item) = self.items.iter().find(|i| i.id == q) {
            return Some(item);
        }
        let q_lower = q.to_lowercase();
        self.items
            .iter()
            .find(|i| i.label.to_lowercase().contains(&q_lower))
    }
}

/// Price after the career discount, rounded to whole cents. Never negative.
#[must_use]
pub fn effective_price_cents(item: &CatalogItem, shop_discount: f32) -> i64 {
    if !item.discountable || shop_discount <= 0.0 {
        return item.price_cents;
    }
    let price = i64_to_f64(item.price_cents);
    let discounted = price * (1.0 - f64::from(shop_discount.clamp(0.0, 1.0)));
    round_f64_to_i64(discounted).max(0)
}
