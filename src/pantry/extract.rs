use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::clients::NutritionLookup;

/// Grocery category an extracted ingredient lands in. Classification walks
/// the keyword tables in this exact order; first hit wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Protein,
    Grains,
    Vegetables,
    Fruits,
    Dairy,
    Other,
}

const PROTEIN_KEYWORDS: [&str; 12] = [
    "chicken", "beef", "fish", "egg", "pork", "turkey", "tofu", "salmon", "tuna", "shrimp",
    "bean", "lentil",
];
const GRAIN_KEYWORDS: [&str; 8] = [
    "rice", "bread", "pasta", "oat", "quinoa", "tortilla", "cereal", "flour",
];
const VEGETABLE_KEYWORDS: [&str; 11] = [
    "spinach", "broccoli", "carrot", "tomato", "onion", "pepper", "lettuce", "cucumber",
    "potato", "kale", "zucchini",
];
const FRUIT_KEYWORDS: [&str; 9] = [
    "apple", "banana", "berry", "berries", "orange", "mango", "grape", "avocado", "lemon",
];
const DAIRY_KEYWORDS: [&str; 5] = ["milk", "cheese", "yogurt", "butter", "cream"];

impl Category {
    pub fn classify(text: &str) -> Self {
        let lower = text.to_lowercase();
        let tables = [
            (Category::Protein, PROTEIN_KEYWORDS.as_slice()),
            (Category::Grains, GRAIN_KEYWORDS.as_slice()),
            (Category::Vegetables, VEGETABLE_KEYWORDS.as_slice()),
            (Category::Fruits, FRUIT_KEYWORDS.as_slice()),
            (Category::Dairy, DAIRY_KEYWORDS.as_slice()),
        ];
        for (category, keywords) in tables {
            if keywords.iter().any(|k| lower.contains(k)) {
                return category;
            }
        }
        Category::Other
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Protein => "Protein",
            Category::Grains => "Grains",
            Category::Vegetables => "Vegetables",
            Category::Fruits => "Fruits",
            Category::Dairy => "Dairy",
            Category::Other => "Other",
        }
    }
}

/// One required ingredient, aggregated across every meal that mentions it.
#[derive(Debug, Clone, PartialEq)]
pub struct Requirement {
    pub quantity: f64,
    pub category: Category,
}

/// Walk the meal texts through the nutrient lookup and aggregate required
/// quantities keyed by lowercased food name.
///
/// Lookups run one text at a time; a failed lookup contributes nothing and
/// never aborts the remaining texts.
pub async fn extract_requirements(
    lookup: &dyn NutritionLookup,
    texts: &[String],
) -> BTreeMap<String, Requirement> {
    let mut requirements: BTreeMap<String, Requirement> = BTreeMap::new();

    for text in texts {
        let foods = match lookup.search(text).await {
            Ok(foods) => foods,
            Err(e) => {
                warn!(error = %e, query = %text, "nutrient lookup failed, skipping meal");
                continue;
            }
        };

        for food in foods {
            let key = food.food_name.trim().to_lowercase();
            if key.is_empty() {
                continue;
            }
            let quantity = food.serving_qty.unwrap_or(1.0);
            let tag = food.tags.as_ref().and_then(|t| t.item.as_deref());
            // the first occurrence of a food fixes its category
            requirements
                .entry(key)
                .and_modify(|r| r.quantity += quantity)
                .or_insert_with(|| Requirement {
                    quantity,
                    category: Category::classify(tag.unwrap_or(&food.food_name)),
                });
        }
    }

    requirements
}
