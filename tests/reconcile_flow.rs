//! Plan-to-shopping-list flow exercised through fake lookup and completion
//! clients, without a database.

use std::collections::{BTreeMap, HashMap};

use axum::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use fitfoodie::clients::{CompletionClient, FoodRecord, NutritionLookup};
use fitfoodie::pantry::extract::extract_requirements;
use fitfoodie::pantry::reconcile::reconcile;
use fitfoodie::pantry::repo::{PantryItem, ShoppingListItem};
use fitfoodie::pantry::services::ReconcileOutcome;
use fitfoodie::plans::model::{DayPlan, Meal, Plan};
use fitfoodie::plans::services::generate_plan;
use fitfoodie::profile::repo::UserProfile;

struct FakeLookup {
    by_query: HashMap<String, Vec<FoodRecord>>,
}

#[async_trait]
impl NutritionLookup for FakeLookup {
    async fn search(&self, query: &str) -> anyhow::Result<Vec<FoodRecord>> {
        match self.by_query.get(query) {
            Some(foods) => Ok(foods.clone()),
            None => anyhow::bail!("no foods matched"),
        }
    }
}

struct CannedCompletion(String);

#[async_trait]
impl CompletionClient for CannedCompletion {
    async fn complete(&self, _prompt: &str) -> anyhow::Result<String> {
        Ok(self.0.clone())
    }
}

fn meal(title: &str, description: Option<&str>) -> Meal {
    Meal {
        title: title.into(),
        description: description.map(Into::into),
        calories: None,
        protein: None,
        completed: false,
    }
}

fn one_meal_plan(title: &str, description: Option<&str>) -> Plan {
    let mut meals = BTreeMap::new();
    meals.insert("breakfast".to_string(), meal(title, description));
    Plan {
        days: vec![DayPlan {
            day: "Day 1".into(),
            meals,
        }],
    }
}

fn pantry_item(name: &str, quantity: f64) -> PantryItem {
    PantryItem {
        id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        name: name.into(),
        quantity,
        category: None,
        created_at: OffsetDateTime::UNIX_EPOCH,
    }
}

fn food(name: &str, qty: f64) -> FoodRecord {
    FoodRecord {
        food_name: name.into(),
        serving_qty: Some(qty),
        tags: None,
    }
}

#[tokio::test]
async fn omelette_plan_fills_the_shopping_list() {
    // one meal, description "2 eggs and spinach"; pantry holds one "eggs"
    let plan = one_meal_plan("Omelette", Some("2 eggs and spinach"));
    let lookup = FakeLookup {
        by_query: HashMap::from([(
            "2 eggs and spinach".to_string(),
            vec![food("egg", 2.0), food("spinach", 1.0)],
        )]),
    };

    let texts = plan.analysis_texts();
    assert_eq!(texts, vec!["2 eggs and spinach".to_string()]);

    let requirements = extract_requirements(&lookup, &texts).await;
    assert_eq!(requirements.len(), 2);

    let pantry = vec![pantry_item("eggs", 1.0)];
    let shopping: Vec<ShoppingListItem> = Vec::new();
    let additions = reconcile(&requirements, &pantry, &shopping);

    assert_eq!(additions.len(), 2);
    let egg = additions.iter().find(|a| a.name == "Egg").unwrap();
    assert_eq!(egg.quantity, 1);
    assert_eq!(egg.category, "Protein");
    let spinach = additions.iter().find(|a| a.name == "Spinach").unwrap();
    assert_eq!(spinach.quantity, 1);
    assert_eq!(spinach.category, "Vegetables");

    let outcome = ReconcileOutcome::Added { total: 2, added: 2 };
    let message = outcome.message();
    assert!(message.contains("Added 2"));
    assert!(message.contains("0 of 2"));
}

#[tokio::test]
async fn meal_without_description_analyzes_its_title() {
    let plan = one_meal_plan("Omelette", None);
    let lookup = FakeLookup {
        by_query: HashMap::from([("Omelette".to_string(), vec![food("egg", 2.0)])]),
    };

    let requirements = extract_requirements(&lookup, &plan.analysis_texts()).await;
    assert_eq!(requirements["egg"].quantity, 2.0);
}

#[tokio::test]
async fn generated_plan_flows_into_extraction() {
    let days: Vec<String> = (1..=7)
        .map(|i| {
            format!(
                r#"{{"day": "Day {i}", "meals": {{"breakfast": {{"title": "Toast", "description": "two slices of bread"}}}}}}"#
            )
        })
        .collect();
    let completion = CannedCompletion(format!(r#"{{"days": [{}]}}"#, days.join(",")));
    let profile = UserProfile::empty(Uuid::new_v4());

    let plan = generate_plan(&completion, &profile).await.unwrap();
    assert_eq!(plan.days.len(), 7);

    let lookup = FakeLookup {
        by_query: HashMap::from([(
            "two slices of bread".to_string(),
            vec![food("bread", 2.0)],
        )]),
    };
    let requirements = extract_requirements(&lookup, &plan.analysis_texts()).await;
    // the same meal appears on all seven days, quantities accumulate
    assert_eq!(requirements["bread"].quantity, 14.0);
    assert_eq!(requirements["bread"].category.as_str(), "Grains");
}
