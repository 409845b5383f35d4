use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    error::{AppError, AppResult},
    models::{MediaDetails, MediaKind},
    state::AppState,
};

/// Handler for the media details endpoint
///
/// The path carries a media kind and a numeric id; both are validated
/// before any provider work happens.
pub async fn details(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
) -> AppResult<Json<MediaDetails>> {
    let id: i64 = id
        .parse()
        .map_err(|_| AppError::InvalidInput("Invalid ID".to_string()))?;
    let kind =
        MediaKind::parse(&kind).ok_or_else(|| AppError::InvalidInput("Invalid type".to_string()))?;

    let details = match kind {
        MediaKind::Movie => state.movie_tv.movie_details(id).await?,
        MediaKind::Tv => state.movie_tv.tv_details(id).await?,
        MediaKind::Anime => state.anime.details(id).await?,
    };

    Ok(Json(details))
}
