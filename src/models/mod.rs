use serde::{Deserialize, Serialize};

pub mod chat;
pub mod details;

pub use chat::{ChatMessage, ChatRole, DisplaySegment, RecCard};
pub use details::{CastMember, Genre, MediaDetails, WatchProvider, WatchProviders};

/// Poster value substituted when a provider has no artwork for an item.
pub const PLACEHOLDER_POSTER: &str = "/placeholder-poster.svg";

const TMDB_IMAGE_BASE: &str = "https://image.tmdb.org/t/p";
const POSTER_SIZE: &str = "w342";

/// Media kind tag shared by every provider. Closed set, never extended
/// at runtime; `(kind, id)` is the uniqueness key for a record since ids
/// are only provider-scoped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Movie,
    Tv,
    Anime,
}

impl MediaKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "movie" => Some(Self::Movie),
            "tv" => Some(Self::Tv),
            "anime" => Some(Self::Anime),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Tv => "tv",
            Self::Anime => "anime",
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The common record every provider normalizes into.
///
/// Every field except `year` is always populated: normalization
/// substitutes a defined default (placeholder poster, 0 rating, empty
/// overview) when the upstream response omits a value. A rating of 0
/// means "unrated", not "rated zero".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnifiedRecommendation {
    pub id: i64,
    pub title: String,
    pub poster_url: String,
    pub rating: f64,
    pub year: Option<i32>,
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub overview: String,
}

fn tmdb_poster_url(path: Option<&str>) -> String {
    match path {
        Some(p) => format!("{TMDB_IMAGE_BASE}/{POSTER_SIZE}{p}"),
        None => PLACEHOLDER_POSTER.to_string(),
    }
}

/// First four characters of a provider date string, as a year.
fn year_from_date(date: &str) -> Option<i32> {
    date.get(..4).and_then(|y| y.parse().ok())
}

// ============================================================================
// TMDB wire types (discover / trending)
// ============================================================================

/// Raw TMDB movie entry from /discover/movie and /trending/movie
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovie {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
}

impl From<TmdbMovie> for UnifiedRecommendation {
    fn from(m: TmdbMovie) -> Self {
        Self {
            id: m.id,
            title: m.title,
            poster_url: tmdb_poster_url(m.poster_path.as_deref()),
            rating: m.vote_average,
            year: m.release_date.as_deref().and_then(year_from_date),
            kind: MediaKind::Movie,
            overview: m.overview.unwrap_or_default(),
        }
    }
}

/// Raw TMDB TV entry from /discover/tv and /trending/tv
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbTv {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
}

impl From<TmdbTv> for UnifiedRecommendation {
    fn from(t: TmdbTv) -> Self {
        Self {
            id: t.id,
            title: t.name,
            poster_url: tmdb_poster_url(t.poster_path.as_deref()),
            rating: t.vote_average,
            year: t.first_air_date.as_deref().and_then(year_from_date),
            kind: MediaKind::Tv,
            overview: t.overview.unwrap_or_default(),
        }
    }
}

/// Paged TMDB response envelope
#[derive(Debug, Deserialize)]
pub struct TmdbPage<T> {
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

// ============================================================================
// Jikan wire types (anime search / top)
// ============================================================================

/// Raw Jikan anime entry from /anime and /top/anime
#[derive(Debug, Clone, Deserialize)]
pub struct JikanAnime {
    pub mal_id: i64,
    pub title: String,
    #[serde(default)]
    pub synopsis: Option<String>,
    #[serde(default)]
    pub images: JikanImages,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub aired: Option<JikanAired>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JikanImages {
    #[serde(default)]
    pub jpg: JikanImage,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JikanImage {
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JikanAired {
    #[serde(default)]
    pub from: Option<String>,
}

impl From<JikanAnime> for UnifiedRecommendation {
    fn from(a: JikanAnime) -> Self {
        // MAL entries without an explicit year usually still carry an air date
        let year = a.year.or_else(|| {
            a.aired
                .as_ref()
                .and_then(|aired| aired.from.as_deref())
                .and_then(year_from_date)
        });

        Self {
            id: a.mal_id,
            title: a.title,
            poster_url: a
                .images
                .jpg
                .image_url
                .unwrap_or_else(|| PLACEHOLDER_POSTER.to_string()),
            rating: a.score.unwrap_or(0.0),
            year,
            kind: MediaKind::Anime,
            overview: a.synopsis.unwrap_or_default(),
        }
    }
}

/// Paged Jikan response envelope
#[derive(Debug, Deserialize)]
pub struct JikanPage {
    #[serde(default = "Vec::new")]
    pub data: Vec<JikanAnime>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_kind_parse() {
        assert_eq!(MediaKind::parse("movie"), Some(MediaKind::Movie));
        assert_eq!(MediaKind::parse("tv"), Some(MediaKind::Tv));
        assert_eq!(MediaKind::parse("anime"), Some(MediaKind::Anime));
        assert_eq!(MediaKind::parse("book"), None);
        assert_eq!(MediaKind::parse("Movie"), None);
    }

    #[test]
    fn test_tmdb_movie_to_unified() {
        let movie = TmdbMovie {
            id: 27205,
            title: "Inception".to_string(),
            overview: Some("A thief who steals corporate secrets".to_string()),
            poster_path: Some("/inception.jpg".to_string()),
            release_date: Some("2010-07-15".to_string()),
            vote_average: 8.4,
        };

        let rec: UnifiedRecommendation = movie.into();
        assert_eq!(rec.id, 27205);
        assert_eq!(rec.kind, MediaKind::Movie);
        assert_eq!(
            rec.poster_url,
            "https://image.tmdb.org/t/p/w342/inception.jpg"
        );
        assert_eq!(rec.year, Some(2010));
        assert_eq!(rec.rating, 8.4);
    }

    #[test]
    fn test_tmdb_movie_defaults_when_fields_missing() {
        let movie = TmdbMovie {
            id: 1,
            title: "Obscure".to_string(),
            overview: None,
            poster_path: None,
            release_date: None,
            vote_average: 0.0,
        };

        let rec: UnifiedRecommendation = movie.into();
        assert_eq!(rec.poster_url, PLACEHOLDER_POSTER);
        assert_eq!(rec.overview, "");
        assert_eq!(rec.year, None);
        assert_eq!(rec.rating, 0.0);
    }

    #[test]
    fn test_tmdb_movie_empty_release_date_has_no_year() {
        let movie = TmdbMovie {
            id: 2,
            title: "Unreleased".to_string(),
            overview: None,
            poster_path: None,
            release_date: Some(String::new()),
            vote_average: 0.0,
        };

        let rec: UnifiedRecommendation = movie.into();
        assert_eq!(rec.year, None);
    }

    #[test]
    fn test_tmdb_tv_to_unified() {
        let tv = TmdbTv {
            id: 1396,
            name: "Breaking Bad".to_string(),
            overview: Some("A chemistry teacher turns to crime".to_string()),
            poster_path: Some("/bb.jpg".to_string()),
            first_air_date: Some("2008-01-20".to_string()),
            vote_average: 8.9,
        };

        let rec: UnifiedRecommendation = tv.into();
        assert_eq!(rec.title, "Breaking Bad");
        assert_eq!(rec.kind, MediaKind::Tv);
        assert_eq!(rec.year, Some(2008));
    }

    #[test]
    fn test_jikan_anime_year_falls_back_to_air_date() {
        let anime = JikanAnime {
            mal_id: 5114,
            title: "Fullmetal Alchemist: Brotherhood".to_string(),
            synopsis: None,
            images: JikanImages {
                jpg: JikanImage {
                    image_url: Some("https://cdn.myanimelist.net/fma.jpg".to_string()),
                },
            },
            score: Some(9.1),
            year: None,
            aired: Some(JikanAired {
                from: Some("2009-04-05T00:00:00+00:00".to_string()),
            }),
        };

        let rec: UnifiedRecommendation = anime.into();
        assert_eq!(rec.year, Some(2009));
        assert_eq!(rec.kind, MediaKind::Anime);
        assert_eq!(rec.rating, 9.1);
    }

    #[test]
    fn test_jikan_anime_unscored_defaults_to_zero() {
        let anime = JikanAnime {
            mal_id: 1,
            title: "Unscored".to_string(),
            synopsis: None,
            images: JikanImages::default(),
            score: None,
            year: None,
            aired: None,
        };

        let rec: UnifiedRecommendation = anime.into();
        assert_eq!(rec.rating, 0.0);
        assert_eq!(rec.poster_url, PLACEHOLDER_POSTER);
        assert_eq!(rec.year, None);
    }

    #[test]
    fn test_jikan_anime_deserialization() {
        let json = r#"{
            "mal_id": 21,
            "title": "One Piece",
            "synopsis": "Pirates chase a legendary treasure.",
            "images": { "jpg": { "image_url": "https://cdn.myanimelist.net/op.jpg" } },
            "score": 8.7,
            "year": 1999
        }"#;

        let anime: JikanAnime = serde_json::from_str(json).unwrap();
        assert_eq!(anime.mal_id, 21);
        assert_eq!(anime.score, Some(8.7));
        assert_eq!(anime.year, Some(1999));
    }

    #[test]
    fn test_unified_recommendation_wire_shape() {
        let rec = UnifiedRecommendation {
            id: 42,
            title: "Spirited Away".to_string(),
            poster_url: "/placeholder-poster.svg".to_string(),
            rating: 8.8,
            year: Some(2001),
            kind: MediaKind::Anime,
            overview: String::new(),
        };

        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["posterUrl"], "/placeholder-poster.svg");
        assert_eq!(json["type"], "anime");
        assert_eq!(json["year"], 2001);
        assert_eq!(json["overview"], "");
    }
}
