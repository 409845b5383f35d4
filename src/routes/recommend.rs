use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{models::UnifiedRecommendation, services::aggregator, state::AppState};

#[derive(Debug, Deserialize)]
pub struct RecommendQuery {
    mood: Option<String>,
}

/// Mood recommendation payload: `{items}` on success, `{items: [],
/// error}` when the aggregation fails. Always a success status; a missing
/// or unknown mood is not a client error.
#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    pub items: Vec<UnifiedRecommendation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Handler for the mood recommendation endpoint
pub async fn recommend(
    State(state): State<AppState>,
    Query(params): Query<RecommendQuery>,
) -> Json<RecommendResponse> {
    let Some(mood) = params.mood else {
        return Json(RecommendResponse {
            items: Vec::new(),
            error: Some("No mood parameter".to_string()),
        });
    };

    match aggregator::recommend_by_mood(state.movie_tv.as_ref(), state.anime.as_ref(), &mood).await
    {
        Ok(items) => Json(RecommendResponse { items, error: None }),
        Err(e) => {
            tracing::error!(mood = %mood, error = %e, "Mood aggregation failed");
            Json(RecommendResponse {
                items: Vec::new(),
                error: Some(e.to_string()),
            })
        }
    }
}
