use std::env;

const DEFAULT_FALLBACK_LOGO: &str = "/static/img/logo-placeholder.png";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,

    // Bearer token for /api and /ws (optional, auth disabled when unset)
    pub api_token: Option<String>,

    // Static assets: file path or http(s) URL
    pub logo_csv_source: Option<String>,
    pub holidays_source: Option<String>,
    pub fallback_logo_url: String,

    // Data layer
    pub cache_ttl_secs: u64,
    pub event_channel_capacity: usize,

    // Views
    pub calendar_cell_cap: usize,
    pub max_compare_symbols: usize,
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn non_empty(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()?,

            api_token: non_empty("API_TOKEN"),

            logo_csv_source: non_empty("LOGO_CSV_SOURCE"),
            holidays_source: non_empty("HOLIDAYS_SOURCE"),
            fallback_logo_url: env::var("FALLBACK_LOGO_URL")
                .unwrap_or_else(|_| DEFAULT_FALLBACK_LOGO.into()),

            cache_ttl_secs: parse_or("CACHE_TTL_SECS", 300),
            event_channel_capacity: parse_or("EVENT_CHANNEL_CAPACITY", 256),

            calendar_cell_cap: parse_or("CALENDAR_CELL_CAP", crate::calendar::DEFAULT_CELL_CAP),
            max_compare_symbols: parse_or("MAX_COMPARE_SYMBOLS", 5),
        })
    }

    /// Defaults for everything except the database URL. Used by tests and
    /// tooling that do not read the environment.
    pub fn with_database_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            host: "127.0.0.1".into(),
            port: 0,
            api_token: None,
            logo_csv_source: None,
            holidays_source: None,
            fallback_logo_url: DEFAULT_FALLBACK_LOGO.into(),
            cache_ttl_secs: 300,
            event_channel_capacity: 256,
            calendar_cell_cap: crate::calendar::DEFAULT_CELL_CAP,
            max_compare_symbols: 5,
        }
    }
}
