//! Jikan catalog client (anime)
//!
//! Jikan is a keyless front for MyAnimeList. Genre discovery uses the
//! /anime endpoint with comma-joined MAL genre ids; the landing feed uses
//! the paged /top/anime ranking.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{
        details::JikanFullEnvelope, Genre, JikanPage, MediaDetails, UnifiedRecommendation,
        WatchProviders,
    },
    services::providers::AnimeCatalog,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const GENRE_PAGE_LIMIT: u32 = 20;
const TOP_PAGE_LIMIT: u32 = 25;

#[derive(Clone)]
pub struct JikanCatalog {
    http_client: HttpClient,
    api_url: String,
}

impl JikanCatalog {
    pub fn new(config: &Config) -> Self {
        Self {
            http_client: HttpClient::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_default(),
            api_url: config.jikan_api_url.clone(),
        }
    }

    fn map_page(data: JikanPage) -> Vec<UnifiedRecommendation> {
        data.data
            .into_iter()
            .map(UnifiedRecommendation::from)
            .collect()
    }
}

#[async_trait]
impl AnimeCatalog for JikanCatalog {
    async fn by_genres(&self, genres: &[u32], page: u32) -> AppResult<Vec<UnifiedRecommendation>> {
        if genres.is_empty() {
            return Ok(Vec::new());
        }

        let genre_list = genres
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        let url = format!("{}/anime", self.api_url);
        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("genres", genre_list),
                ("page", page.to_string()),
                ("limit", GENRE_PAGE_LIMIT.to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Jikan API returned status {}: {}",
                status, body
            )));
        }

        let data: JikanPage = response.json().await?;
        let items = Self::map_page(data);

        tracing::info!(
            results = items.len(),
            page,
            provider = "jikan",
            "Genre query completed"
        );

        Ok(items)
    }

    async fn top_page(&self, page: u32) -> AppResult<Vec<UnifiedRecommendation>> {
        let url = format!("{}/top/anime", self.api_url);
        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("page", page.to_string()),
                ("limit", TOP_PAGE_LIMIT.to_string()),
            ])
            .send()
            .await?;

        // The top feed degrades to empty rather than failing the page
        if !response.status().is_success() {
            tracing::warn!(
                status = %response.status(),
                provider = "jikan",
                "Top anime request failed, returning empty"
            );
            return Ok(Vec::new());
        }

        let data: JikanPage = response.json().await?;
        Ok(Self::map_page(data))
    }

    async fn details(&self, id: i64) -> AppResult<MediaDetails> {
        let url = format!("{}/anime/{}/full", self.api_url, id);
        let response = self.http_client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Jikan API returned status {}: {}",
                status, body
            )));
        }

        let envelope: JikanFullEnvelope = response.json().await?;
        let data = envelope.data;

        // MAL has no director, cast or watch-provider data
        Ok(MediaDetails {
            id: data.mal_id,
            title: data.title,
            overview: data.synopsis.unwrap_or_default(),
            genres: data
                .genres
                .into_iter()
                .map(|g| Genre {
                    id: g.mal_id,
                    name: g.name,
                })
                .collect(),
            trailer_key: data.trailer.and_then(|t| t.youtube_id),
            director: None,
            cast: Vec::new(),
            watch_providers: WatchProviders::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{JikanAnime, JikanImage, JikanImages};

    #[test]
    fn test_map_page_preserves_order() {
        let page = JikanPage {
            data: vec![
                JikanAnime {
                    mal_id: 1,
                    title: "Cowboy Bebop".to_string(),
                    synopsis: None,
                    images: JikanImages {
                        jpg: JikanImage {
                            image_url: Some("https://cdn.myanimelist.net/cb.jpg".to_string()),
                        },
                    },
                    score: Some(8.8),
                    year: Some(1998),
                    aired: None,
                },
                JikanAnime {
                    mal_id: 21,
                    title: "One Piece".to_string(),
                    synopsis: None,
                    images: JikanImages::default(),
                    score: Some(8.7),
                    year: Some(1999),
                    aired: None,
                },
            ],
        };

        let items = JikanCatalog::map_page(page);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, 1);
        assert_eq!(items[1].id, 21);
    }
}
