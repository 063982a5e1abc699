use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const DAYS_PER_PLAN: usize = 7;

/// Slot names rendered/processed in this order; unknown slots follow,
/// alphabetically.
const SLOT_ORDER: [&str; 4] = ["breakfast", "lunch", "snack", "dinner"];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Meal {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein: Option<f64>,
    #[serde(default)]
    pub completed: bool,
}

impl Meal {
    /// Text the ingredient extractor analyzes: description when present and
    /// non-empty, otherwise the title.
    pub fn analysis_text(&self) -> &str {
        match self.description.as_deref() {
            Some(d) if !d.trim().is_empty() => d,
            _ => &self.title,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DayPlan {
    /// Display label only ("Day 1", "Monday", ...); never validated against
    /// a calendar.
    pub day: String,
    pub meals: BTreeMap<String, Meal>,
}

impl DayPlan {
    /// Meals in conventional slot order (breakfast, lunch, snack, dinner),
    /// then any other slots.
    pub fn meals_in_order(&self) -> Vec<(&str, &Meal)> {
        let mut out: Vec<(&str, &Meal)> = Vec::with_capacity(self.meals.len());
        for slot in SLOT_ORDER {
            if let Some(meal) = self.meals.get(slot) {
                out.push((slot, meal));
            }
        }
        for (slot, meal) in &self.meals {
            if !SLOT_ORDER.contains(&slot.as_str()) {
                out.push((slot.as_str(), meal));
            }
        }
        out
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Plan {
    pub days: Vec<DayPlan>,
}

impl Plan {
    /// Shape check applied after parsing generator output: exactly seven
    /// days. Slot names and per-meal fields stay unconstrained.
    pub fn validate(&self) -> Result<(), String> {
        if self.days.len() != DAYS_PER_PLAN {
            return Err(format!(
                "expected {} days, got {}",
                DAYS_PER_PLAN,
                self.days.len()
            ));
        }
        Ok(())
    }

    /// Every meal's analysis text, in day/slot order.
    pub fn analysis_texts(&self) -> Vec<String> {
        self.days
            .iter()
            .flat_map(|day| {
                day.meals_in_order()
                    .into_iter()
                    .map(|(_, meal)| meal.analysis_text().to_string())
            })
            .collect()
    }
}
