use std::env;

#[derive(Clone)]
pub struct Config {
    /// PostgreSQL connection string; the in-memory backend is used when unset
    pub database_url: Option<String>,
    /// HS256 secret for session tokens
    pub signing_key: String,
    /// Session token lifetime in seconds
    pub token_ttl_secs: i64,
    pub port: u16,
    /// Base URL for the API (used for Location headers)
    pub api_base_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8090);

        Self {
            database_url: env::var("DATABASE_URL").ok().filter(|s| !s.is_empty()),
            signing_key: env::var("AUTH_SIGNING_KEY")
                .unwrap_or_else(|_| "dev-key-not-for-production".to_string()),
            token_ttl_secs: env::var("TOKEN_TTL_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(86_400),
            port,
            api_base_url: env::var("API_BASE_URL")
                .unwrap_or_else(|_| format!("http://localhost:{}", port)),
        }
    }

    /// Check if the PostgreSQL backend is configured
    pub fn uses_postgres(&self) -> bool {
        self.database_url.is_some()
    }
}
