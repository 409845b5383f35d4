use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{models::UnifiedRecommendation, services::aggregator, state::AppState};

#[derive(Debug, Deserialize)]
pub struct TrendingQuery {
    page: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct TrendingResponse {
    pub items: Vec<UnifiedRecommendation>,
}

/// Handler for the trending endpoint
///
/// Provider failures degrade to an empty item list with no error field;
/// the landing feed treats an empty page as "no more data".
pub async fn trending(
    State(state): State<AppState>,
    Query(params): Query<TrendingQuery>,
) -> Json<TrendingResponse> {
    let page = params.page.unwrap_or(1).max(1);

    let items =
        match aggregator::trending_page(state.movie_tv.as_ref(), state.anime.as_ref(), page).await
        {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(page, error = %e, "Trending aggregation failed");
                Vec::new()
            }
        };

    Json(TrendingResponse { items })
}
