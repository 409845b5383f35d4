//! Mood to genre-id table.
//!
//! TMDB ids come from /genre/movie/list and /genre/tv/list; anime ids
//! are MAL genre ids as served by Jikan. Defined once, read-only.

/// Genre-id lists for one mood, one list per catalog query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoodGenres {
    pub tmdb_movie: &'static [u32],
    pub tmdb_tv: &'static [u32],
    pub jikan: &'static [u32],
}

/// The closed set of mood ids the service understands.
pub const MOOD_IDS: [&str; 8] = [
    "rainy",
    "cry",
    "hype",
    "date",
    "sleepless",
    "adventure",
    "funny",
    "mindblowing",
];

/// Looks up the genre mapping for a mood id.
///
/// Unknown ids yield `None`; callers treat that as an empty result, not
/// a failure.
//
// TMDB movie: Action=28, Adventure=12, Comedy=35, Drama=18, Horror=27,
// Romance=10749, Sci-Fi=878, Thriller=53, Mystery=9648, Fantasy=14.
// TMDB TV shares most ids plus Action&Adventure=10759, Sci-Fi&Fantasy=10765.
// MAL: Action=1, Adventure=2, Comedy=4, Mystery=7, Drama=8, Fantasy=10,
// Horror=14, Romance=22, Sci-Fi=24, Sports=30, Slice of Life=36,
// Psychological=40.
pub fn genres_for_mood(mood: &str) -> Option<&'static MoodGenres> {
    match mood {
        "rainy" => Some(&MoodGenres {
            tmdb_movie: &[18, 10749],
            tmdb_tv: &[18, 10749],
            jikan: &[8, 22, 36],
        }),
        "cry" => Some(&MoodGenres {
            tmdb_movie: &[18, 10749],
            tmdb_tv: &[18, 10749],
            jikan: &[8, 22],
        }),
        "hype" => Some(&MoodGenres {
            tmdb_movie: &[28, 12],
            tmdb_tv: &[10759, 35],
            jikan: &[1, 2, 30],
        }),
        "date" => Some(&MoodGenres {
            tmdb_movie: &[10749, 35],
            tmdb_tv: &[10749, 35],
            jikan: &[22, 4],
        }),
        "sleepless" => Some(&MoodGenres {
            tmdb_movie: &[27, 53, 9648],
            tmdb_tv: &[9648, 10765],
            jikan: &[14, 7],
        }),
        "adventure" => Some(&MoodGenres {
            tmdb_movie: &[12, 14, 28],
            tmdb_tv: &[10759, 10765],
            jikan: &[2, 10, 1],
        }),
        "funny" => Some(&MoodGenres {
            tmdb_movie: &[35],
            tmdb_tv: &[35],
            jikan: &[4],
        }),
        "mindblowing" => Some(&MoodGenres {
            tmdb_movie: &[878, 9648],
            tmdb_tv: &[10765, 9648],
            jikan: &[24, 7, 40],
        }),
        _ => None,
    }
}
