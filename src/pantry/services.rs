use serde::Serialize;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::clients::NutritionLookup;
use crate::plans;

use super::{extract, reconcile, repo};

/// What a reconciliation run meant for the user. "Nothing to analyze" is a
/// different outcome from "everything already available" and the UI shows a
/// different message for each.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ReconcileOutcome {
    NothingToAnalyze,
    AllAvailable { total: usize },
    Added { total: usize, added: usize },
}

impl ReconcileOutcome {
    pub fn message(&self) -> String {
        match self {
            ReconcileOutcome::NothingToAnalyze => {
                "No meal descriptions to analyze. Generate a meal plan first.".to_string()
            }
            // total can be 0 when every lookup failed or matched no foods;
            // claiming "all 0 are covered" would misread that run
            ReconcileOutcome::AllAvailable { total: 0 } => {
                "No ingredients could be identified from your meal plan.".to_string()
            }
            ReconcileOutcome::AllAvailable { total } => format!(
                "All {total} ingredients are already covered by your pantry or shopping list."
            ),
            ReconcileOutcome::Added { total, added } => format!(
                "Added {added} items to your shopping list ({} of {total} already available).",
                total - added
            ),
        }
    }
}

fn classify_outcome(total: usize, added: usize) -> ReconcileOutcome {
    if added == 0 {
        ReconcileOutcome::AllAvailable { total }
    } else {
        ReconcileOutcome::Added { total, added }
    }
}

/// Load the stored plan, extract its ingredient requirements, diff them
/// against pantry and shopping-list snapshots, and persist the additions.
///
/// The snapshots are read once up front and not re-read mid-run; writes that
/// land in between are picked up by the next run.
pub async fn run_reconciliation(
    db: &PgPool,
    lookup: &dyn NutritionLookup,
    user_id: Uuid,
) -> anyhow::Result<ReconcileOutcome> {
    let Some(stored) = plans::repo::load(db, user_id).await? else {
        return Ok(ReconcileOutcome::NothingToAnalyze);
    };

    let texts = stored.plan.analysis_texts();
    if texts.is_empty() {
        return Ok(ReconcileOutcome::NothingToAnalyze);
    }

    let requirements = extract::extract_requirements(lookup, &texts).await;
    let total = requirements.len();

    let pantry = repo::list_pantry(db, user_id).await?;
    let shopping = repo::list_shopping(db, user_id).await?;

    let additions = reconcile::reconcile(&requirements, &pantry, &shopping);
    if !additions.is_empty() {
        repo::insert_shopping_items(db, user_id, &additions).await?;
    }

    let outcome = classify_outcome(total, additions.len());
    info!(%user_id, total, added = additions.len(), "pantry reconciliation finished");
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_additions_classifies_as_all_available() {
        assert_eq!(
            classify_outcome(4, 0),
            ReconcileOutcome::AllAvailable { total: 4 }
        );
    }

    #[test]
    fn additions_report_already_available_count() {
        let outcome = classify_outcome(5, 2);
        assert_eq!(outcome, ReconcileOutcome::Added { total: 5, added: 2 });
        assert!(outcome.message().contains("Added 2"));
        assert!(outcome.message().contains("3 of 5"));
    }

    #[test]
    fn nothing_to_analyze_has_its_own_message() {
        let nothing = ReconcileOutcome::NothingToAnalyze.message();
        let available = ReconcileOutcome::AllAvailable { total: 0 }.message();
        assert_ne!(nothing, available);
    }

    #[test]
    fn zero_identified_ingredients_does_not_claim_coverage() {
        let outcome = classify_outcome(0, 0);
        assert_eq!(outcome, ReconcileOutcome::AllAvailable { total: 0 });
        let message = outcome.message();
        assert!(message.contains("No ingredients could be identified"));
        assert!(!message.contains("covered"));
    }
}
