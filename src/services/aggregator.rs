//! Recommendation aggregation
//!
//! Fans out to the movie/TV and anime catalogs concurrently and merges
//! their results in fixed provider order. No de-duplication, no
//! re-ranking, no score normalization: ratings stay on each provider's
//! native scale.

use crate::{
    error::AppResult,
    models::UnifiedRecommendation,
    moods,
    services::providers::{AnimeCatalog, MovieTvCatalog},
};

/// Items per trending page: what the landing grid renders per fetch.
pub const TRENDING_PAGE_SIZE: usize = 12;

/// Mood-driven recommendations: both catalogs queried concurrently,
/// movie/TV results first, anime after.
///
/// Unknown moods yield an empty list without touching either provider.
/// One failing catalog call fails the whole aggregation; the caller
/// surfaces an empty item list plus the error reason.
pub async fn recommend_by_mood(
    movie_tv: &dyn MovieTvCatalog,
    anime: &dyn AnimeCatalog,
    mood: &str,
) -> AppResult<Vec<UnifiedRecommendation>> {
    let Some(mapping) = moods::genres_for_mood(mood) else {
        tracing::debug!(mood = %mood, "Unknown mood, returning empty");
        return Ok(Vec::new());
    };

    let (mut items, anime_items) = tokio::try_join!(
        movie_tv.discover(mapping.tmdb_movie, mapping.tmdb_tv, 1),
        anime.by_genres(mapping.jikan, 1),
    )?;

    tracing::info!(
        mood = %mood,
        movie_tv = items.len(),
        anime = anime_items.len(),
        "Mood aggregation completed"
    );

    items.extend(anime_items);
    Ok(items)
}

/// One page of the trending feed: three concurrent catalog queries
/// (trending movies, trending TV, top anime), concatenated in that order
/// and truncated to [`TRENDING_PAGE_SIZE`].
///
/// Page numbers are 1-based and passed through to each provider
/// unchanged; an empty page means "no more data", not an error.
pub async fn trending_page(
    movie_tv: &dyn MovieTvCatalog,
    anime: &dyn AnimeCatalog,
    page: u32,
) -> AppResult<Vec<UnifiedRecommendation>> {
    let (movies, tv, top) = tokio::try_join!(
        movie_tv.trending_movies(page),
        movie_tv.trending_tv(page),
        anime.top_page(page),
    )?;

    tracing::info!(
        page,
        movies = movies.len(),
        tv = tv.len(),
        anime = top.len(),
        "Trending aggregation completed"
    );

    let mut items = movies;
    items.extend(tv);
    items.extend(top);
    items.truncate(TRENDING_PAGE_SIZE);
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::AppError,
        models::MediaKind,
        services::providers::{MockAnimeCatalog, MockMovieTvCatalog},
    };

    fn rec(id: i64, kind: MediaKind, title: &str) -> UnifiedRecommendation {
        UnifiedRecommendation {
            id,
            title: title.to_string(),
            poster_url: "/placeholder-poster.svg".to_string(),
            rating: 7.5,
            year: Some(2020),
            kind,
            overview: String::new(),
        }
    }

    #[tokio::test]
    async fn test_recommend_by_mood_concatenates_in_provider_order() {
        let mut movie_tv = MockMovieTvCatalog::new();
        movie_tv
            .expect_discover()
            .times(1)
            .withf(|movie, tv, page| {
                movie == [18u32, 10749].as_slice()
                    && tv == [18u32, 10749].as_slice()
                    && *page == 1
            })
            .returning(|_, _, _| {
                Ok(vec![
                    rec(1, MediaKind::Movie, "Movie One"),
                    rec(2, MediaKind::Tv, "Show Two"),
                ])
            });

        let mut anime = MockAnimeCatalog::new();
        anime
            .expect_by_genres()
            .times(1)
            .withf(|genres, page| genres == [8u32, 22, 36].as_slice() && *page == 1)
            .returning(|_, _| Ok(vec![rec(3, MediaKind::Anime, "Anime Three")]));

        let items = recommend_by_mood(&movie_tv, &anime, "rainy").await.unwrap();

        assert_eq!(items.len(), 3);
        assert_eq!(items[0].id, 1);
        assert_eq!(items[1].id, 2);
        assert_eq!(items[2].id, 3);
        assert_eq!(items[2].kind, MediaKind::Anime);
    }

    #[tokio::test]
    async fn test_recommend_by_mood_issues_two_calls_for_every_known_mood() {
        for mood in crate::moods::MOOD_IDS {
            let mut movie_tv = MockMovieTvCatalog::new();
            movie_tv
                .expect_discover()
                .times(1)
                .returning(|_, _, _| Ok(Vec::new()));

            let mut anime = MockAnimeCatalog::new();
            anime
                .expect_by_genres()
                .times(1)
                .returning(|_, _| Ok(Vec::new()));

            let items = recommend_by_mood(&movie_tv, &anime, mood).await.unwrap();
            assert!(items.is_empty(), "unexpected items for {mood}");
        }
    }

    #[tokio::test]
    async fn test_recommend_by_mood_unknown_mood_makes_no_provider_calls() {
        // No expectations set: any provider call would panic
        let movie_tv = MockMovieTvCatalog::new();
        let anime = MockAnimeCatalog::new();

        let items = recommend_by_mood(&movie_tv, &anime, "bored").await.unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_recommend_by_mood_single_failure_fails_the_join() {
        let mut movie_tv = MockMovieTvCatalog::new();
        movie_tv.expect_discover().returning(|_, _, _| {
            Err(AppError::ExternalApi(
                "TMDB API returned status 500".to_string(),
            ))
        });

        let mut anime = MockAnimeCatalog::new();
        anime
            .expect_by_genres()
            .returning(|_, _| Ok(vec![rec(3, MediaKind::Anime, "Anime Three")]));

        let result = recommend_by_mood(&movie_tv, &anime, "funny").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_trending_page_truncates_to_page_size() {
        let mut movie_tv = MockMovieTvCatalog::new();
        movie_tv.expect_trending_movies().returning(|_| {
            Ok((0..10)
                .map(|i| rec(100 + i, MediaKind::Movie, "Movie"))
                .collect())
        });
        movie_tv.expect_trending_tv().returning(|_| {
            Ok((0..10)
                .map(|i| rec(200 + i, MediaKind::Tv, "Show"))
                .collect())
        });

        let mut anime = MockAnimeCatalog::new();
        anime.expect_top_page().returning(|_| {
            Ok((0..10)
                .map(|i| rec(300 + i, MediaKind::Anime, "Anime"))
                .collect())
        });

        let items = trending_page(&movie_tv, &anime, 1).await.unwrap();

        assert_eq!(items.len(), TRENDING_PAGE_SIZE);
        assert_eq!(items[0].id, 100);
        assert_eq!(items[9].id, 109);
        // The tail of the page comes from the next provider in order
        assert_eq!(items[10].id, 200);
        assert_eq!(items[11].id, 201);
    }

    #[tokio::test]
    async fn test_trending_page_passes_page_through_to_all_providers() {
        let mut movie_tv = MockMovieTvCatalog::new();
        movie_tv
            .expect_trending_movies()
            .times(1)
            .withf(|page| *page == 4)
            .returning(|_| Ok(Vec::new()));
        movie_tv
            .expect_trending_tv()
            .times(1)
            .withf(|page| *page == 4)
            .returning(|_| Ok(Vec::new()));

        let mut anime = MockAnimeCatalog::new();
        anime
            .expect_top_page()
            .times(1)
            .withf(|page| *page == 4)
            .returning(|_| Ok(Vec::new()));

        let items = trending_page(&movie_tv, &anime, 4).await.unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_trending_page_empty_result_is_not_an_error() {
        let mut movie_tv = MockMovieTvCatalog::new();
        movie_tv
            .expect_trending_movies()
            .returning(|_| Ok(Vec::new()));
        movie_tv.expect_trending_tv().returning(|_| Ok(Vec::new()));

        let mut anime = MockAnimeCatalog::new();
        anime.expect_top_page().returning(|_| Ok(Vec::new()));

        let items = trending_page(&movie_tv, &anime, 99).await.unwrap();
        assert!(items.is_empty());
    }
}
