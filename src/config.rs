use serde::Deserialize;

/// Application configuration loaded from environment variables
///
/// Provider credentials are optional at load time: a missing key only
/// becomes an error when the capability that needs it is exercised, and
/// the error names the missing variable.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// TMDB API key (movies & TV)
    #[serde(default)]
    pub tmdb_api_key: Option<String>,

    /// Gemini API key (chat)
    #[serde(default)]
    pub gemini_api_key: Option<String>,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Jikan API base URL (no key required)
    #[serde(default = "default_jikan_api_url")]
    pub jikan_api_url: String,

    /// Gemini API base URL
    #[serde(default = "default_gemini_api_url")]
    pub gemini_api_url: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_jikan_api_url() -> String {
    "https://api.jikan.moe/v4".to_string()
}

fn default_gemini_api_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}
