//! TMDB catalog client (movies & TV)
//!
//! Mood queries use /discover with OR-joined genre ids to broaden
//! results; the landing feed uses /trending with a day window. Detail
//! lookups join the base record with videos, credits and watch
//! providers, fetched concurrently.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{
        details::{TmdbCredits, TmdbMovieInfo, TmdbTvInfo, TmdbVideos, TmdbWatchProviderResults},
        CastMember, Genre, MediaDetails, TmdbMovie, TmdbPage, TmdbTv, UnifiedRecommendation,
        WatchProvider, WatchProviders,
    },
    services::providers::MovieTvCatalog,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const WATCH_REGION: &str = "US";
const CAST_LIMIT: usize = 5;

#[derive(Clone)]
pub struct TmdbCatalog {
    http_client: HttpClient,
    api_key: Option<String>,
    api_url: String,
}

impl TmdbCatalog {
    pub fn new(config: &Config) -> Self {
        Self {
            http_client: HttpClient::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_default(),
            api_key: config.tmdb_api_key.clone(),
            api_url: config.tmdb_api_url.clone(),
        }
    }

    fn api_key(&self) -> AppResult<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| AppError::Configuration("TMDB_API_KEY is not set".to_string()))
    }

    async fn request(
        &self,
        path: &str,
        extra: &[(&str, String)],
    ) -> AppResult<reqwest::Response> {
        let key = self.api_key()?;
        let url = format!("{}{}", self.api_url, path);
        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", key), ("language", "en-US")])
            .query(extra)
            .send()
            .await?;
        Ok(response)
    }

    /// GET that treats a non-success status as an error.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        extra: &[(&str, String)],
    ) -> AppResult<T> {
        let response = self.request(path, extra).await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB API returned status {}: {}",
                status, body
            )));
        }
        Ok(response.json().await?)
    }

    /// GET that swallows a non-success status to `None`. Transport errors
    /// still propagate. The trending feed inherits this lenient policy.
    async fn get_json_lenient<T: DeserializeOwned>(
        &self,
        path: &str,
        extra: &[(&str, String)],
    ) -> AppResult<Option<T>> {
        let response = self.request(path, extra).await?;
        if !response.status().is_success() {
            tracing::warn!(
                path = %path,
                status = %response.status(),
                provider = "tmdb",
                "Request failed, returning empty"
            );
            return Ok(None);
        }
        Ok(Some(response.json().await?))
    }

    async fn discover_movies(
        &self,
        genres: &[u32],
        page: u32,
    ) -> AppResult<Vec<UnifiedRecommendation>> {
        if genres.is_empty() {
            return Ok(Vec::new());
        }

        let query = [
            ("sort_by", "popularity.desc".to_string()),
            ("include_adult", "false".to_string()),
            ("page", page.to_string()),
            ("with_genres", join_genre_ids(genres, "|")),
        ];
        let data: TmdbPage<TmdbMovie> = self.get_json("/discover/movie", &query).await?;
        Ok(data
            .results
            .into_iter()
            .map(UnifiedRecommendation::from)
            .collect())
    }

    async fn discover_tv(&self, genres: &[u32], page: u32) -> AppResult<Vec<UnifiedRecommendation>> {
        if genres.is_empty() {
            return Ok(Vec::new());
        }

        let query = [
            ("sort_by", "popularity.desc".to_string()),
            ("include_adult", "false".to_string()),
            ("page", page.to_string()),
            ("with_genres", join_genre_ids(genres, "|")),
        ];
        let data: TmdbPage<TmdbTv> = self.get_json("/discover/tv", &query).await?;
        Ok(data
            .results
            .into_iter()
            .map(UnifiedRecommendation::from)
            .collect())
    }
}

#[async_trait]
impl MovieTvCatalog for TmdbCatalog {
    async fn discover(
        &self,
        movie_genres: &[u32],
        tv_genres: &[u32],
        page: u32,
    ) -> AppResult<Vec<UnifiedRecommendation>> {
        let (mut movies, tv) = tokio::try_join!(
            self.discover_movies(movie_genres, page),
            self.discover_tv(tv_genres, page),
        )?;

        tracing::info!(
            movies = movies.len(),
            tv = tv.len(),
            page,
            provider = "tmdb",
            "Discover completed"
        );

        movies.extend(tv);
        Ok(movies)
    }

    async fn trending_movies(&self, page: u32) -> AppResult<Vec<UnifiedRecommendation>> {
        let query = [("page", page.to_string())];
        let data: Option<TmdbPage<TmdbMovie>> =
            self.get_json_lenient("/trending/movie/day", &query).await?;
        Ok(data
            .map(|p| {
                p.results
                    .into_iter()
                    .map(UnifiedRecommendation::from)
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn trending_tv(&self, page: u32) -> AppResult<Vec<UnifiedRecommendation>> {
        let query = [("page", page.to_string())];
        let data: Option<TmdbPage<TmdbTv>> =
            self.get_json_lenient("/trending/tv/day", &query).await?;
        Ok(data
            .map(|p| {
                p.results
                    .into_iter()
                    .map(UnifiedRecommendation::from)
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn movie_details(&self, id: i64) -> AppResult<MediaDetails> {
        let info_path = format!("/movie/{id}");
        let videos_path = format!("/movie/{id}/videos");
        let credits_path = format!("/movie/{id}/credits");
        let providers_path = format!("/movie/{id}/watch/providers");
        let (info, videos, credits, providers) = tokio::try_join!(
            self.get_json::<TmdbMovieInfo>(&info_path, &[]),
            self.get_json::<TmdbVideos>(&videos_path, &[]),
            self.get_json::<TmdbCredits>(&credits_path, &[]),
            self.get_json::<TmdbWatchProviderResults>(&providers_path, &[]),
        )?;

        Ok(assemble_details(
            id,
            info.title,
            info.overview,
            info.genres,
            videos,
            credits,
            providers,
            false,
        ))
    }

    async fn tv_details(&self, id: i64) -> AppResult<MediaDetails> {
        let info_path = format!("/tv/{id}");
        let videos_path = format!("/tv/{id}/videos");
        let credits_path = format!("/tv/{id}/credits");
        let providers_path = format!("/tv/{id}/watch/providers");
        let (info, videos, credits, providers) = tokio::try_join!(
            self.get_json::<TmdbTvInfo>(&info_path, &[]),
            self.get_json::<TmdbVideos>(&videos_path, &[]),
            self.get_json::<TmdbCredits>(&credits_path, &[]),
            self.get_json::<TmdbWatchProviderResults>(&providers_path, &[]),
        )?;

        Ok(assemble_details(
            id,
            info.name,
            info.overview,
            info.genres,
            videos,
            credits,
            providers,
            true,
        ))
    }
}

fn join_genre_ids(genres: &[u32], separator: &str) -> String {
    genres
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(separator)
}

#[allow(clippy::too_many_arguments)]
fn assemble_details(
    id: i64,
    title: String,
    overview: Option<String>,
    genres: Vec<Genre>,
    videos: TmdbVideos,
    credits: TmdbCredits,
    providers: TmdbWatchProviderResults,
    tv: bool,
) -> MediaDetails {
    let trailer_key = videos
        .results
        .into_iter()
        .find(|v| v.site == "YouTube" && (v.kind == "Trailer" || v.kind == "Teaser"))
        .map(|v| v.key);

    // TV shows rarely credit a single director; fall back to the EP
    let director = credits
        .crew
        .iter()
        .find(|c| c.job == "Director")
        .or_else(|| {
            tv.then(|| credits.crew.iter().find(|c| c.job == "Executive Producer"))
                .flatten()
        })
        .map(|c| c.name.clone());

    let cast = credits
        .cast
        .into_iter()
        .take(CAST_LIMIT)
        .map(|c| CastMember {
            name: c.name,
            character: c.character,
        })
        .collect();

    let region = providers
        .results
        .get(WATCH_REGION)
        .cloned()
        .unwrap_or_default();

    MediaDetails {
        id,
        title,
        overview: overview.unwrap_or_default(),
        genres,
        trailer_key,
        director,
        cast,
        watch_providers: WatchProviders {
            flatrate: region.flatrate.map(map_provider_entries),
            rent: region.rent.map(map_provider_entries),
        },
    }
}

fn map_provider_entries(
    entries: Vec<crate::models::details::TmdbProviderEntry>,
) -> Vec<WatchProvider> {
    entries
        .into_iter()
        .map(|p| WatchProvider {
            id: p.provider_id,
            name: p.provider_name,
            logo_path: p.logo_path.unwrap_or_default(),
        })
        .collect()
}
