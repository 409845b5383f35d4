use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Normalized detail record served by the media endpoint.
///
/// `director`, `cast` and `watch_providers` only carry data for TMDB
/// media; the anime catalog has none of the three and serves the empty
/// defaults.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaDetails {
    pub id: i64,
    pub title: String,
    pub overview: String,
    pub genres: Vec<Genre>,
    pub trailer_key: Option<String>,
    pub director: Option<String>,
    pub cast: Vec<CastMember>,
    pub watch_providers: WatchProviders,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CastMember {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub character: Option<String>,
}

/// US watch options split into subscription and rental buckets.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WatchProviders {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flatrate: Option<Vec<WatchProvider>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rent: Option<Vec<WatchProvider>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchProvider {
    pub id: i64,
    pub name: String,
    pub logo_path: String,
}

// ============================================================================
// TMDB wire types (detail endpoints)
// ============================================================================

/// Base record from /movie/{id}
#[derive(Debug, Deserialize)]
pub struct TmdbMovieInfo {
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub genres: Vec<Genre>,
}

/// Base record from /tv/{id}
#[derive(Debug, Deserialize)]
pub struct TmdbTvInfo {
    pub name: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub genres: Vec<Genre>,
}

/// Response from /{kind}/{id}/videos
#[derive(Debug, Default, Deserialize)]
pub struct TmdbVideos {
    #[serde(default)]
    pub results: Vec<TmdbVideo>,
}

#[derive(Debug, Deserialize)]
pub struct TmdbVideo {
    pub key: String,
    pub site: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Response from /{kind}/{id}/credits
#[derive(Debug, Default, Deserialize)]
pub struct TmdbCredits {
    #[serde(default)]
    pub crew: Vec<TmdbCrewMember>,
    #[serde(default)]
    pub cast: Vec<TmdbCastMember>,
}

#[derive(Debug, Deserialize)]
pub struct TmdbCrewMember {
    pub job: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct TmdbCastMember {
    pub name: String,
    #[serde(default)]
    pub character: Option<String>,
}

/// Response from /{kind}/{id}/watch/providers, keyed by region code
#[derive(Debug, Default, Deserialize)]
pub struct TmdbWatchProviderResults {
    #[serde(default)]
    pub results: HashMap<String, TmdbRegionProviders>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbRegionProviders {
    #[serde(default)]
    pub flatrate: Option<Vec<TmdbProviderEntry>>,
    #[serde(default)]
    pub rent: Option<Vec<TmdbProviderEntry>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbProviderEntry {
    pub provider_id: i64,
    pub provider_name: String,
    #[serde(default)]
    pub logo_path: Option<String>,
}

// ============================================================================
// Jikan wire types (full detail endpoint)
// ============================================================================

/// Envelope from /anime/{id}/full
#[derive(Debug, Deserialize)]
pub struct JikanFullEnvelope {
    pub data: JikanFull,
}

#[derive(Debug, Deserialize)]
pub struct JikanFull {
    pub mal_id: i64,
    pub title: String,
    #[serde(default)]
    pub synopsis: Option<String>,
    #[serde(default)]
    pub trailer: Option<JikanTrailer>,
    #[serde(default)]
    pub genres: Vec<JikanGenre>,
}

#[derive(Debug, Default, Deserialize)]
pub struct JikanTrailer {
    #[serde(default)]
    pub youtube_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct JikanGenre {
    pub mal_id: i64,
    pub name: String,
}
