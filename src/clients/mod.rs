pub mod completion;
pub mod nutritionix;

pub use completion::{ChatCompletion, CompletionClient};
pub use nutritionix::{FoodRecord, NutritionLookup, NutritionixClient};
