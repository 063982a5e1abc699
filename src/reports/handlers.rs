use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    routing::get,
    Router,
};
use time::macros::format_description;
use tracing::{error, instrument};
use uuid::Uuid;

use crate::plans;
use crate::state::AppState;

use super::layout::ReportLayout;
use super::pdf::PdfCanvas;

pub fn routes() -> Router<AppState> {
    Router::new().route("/reports/meal-plan/:user_id", get(meal_plan_report))
}

#[instrument(skip(state))]
pub async fn meal_plan_report(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<(HeaderMap, Vec<u8>), (StatusCode, String)> {
    let stored = plans::repo::load(&state.db, user_id)
        .await
        .map_err(|e| {
            error!(error = %e, %user_id, "loading meal plan failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?
        .ok_or((
            StatusCode::NOT_FOUND,
            "No meal plan found for this user".to_string(),
        ))?;

    let generated_at = stored
        .generated_at
        .format(format_description!("[year]-[month]-[day] [hour]:[minute] UTC"))
        .unwrap_or_else(|_| stored.generated_at.to_string());

    let bytes = render_pdf(&stored.plan, &generated_at).map_err(|e| {
        error!(error = %e, %user_id, "rendering meal plan pdf failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "could not render report".to_string(),
        )
    })?;

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, "application/pdf".parse().unwrap());
    headers.insert(
        header::CONTENT_DISPOSITION,
        format!("attachment; filename=\"MealPlan-{user_id}.pdf\"")
            .parse()
            .unwrap(),
    );
    Ok((headers, bytes))
}

fn render_pdf(plan: &plans::model::Plan, generated_at: &str) -> anyhow::Result<Vec<u8>> {
    let mut canvas = PdfCanvas::new("Meal Plan")?;
    ReportLayout::new(&mut canvas).render(plan, generated_at);
    canvas.finish()
}
