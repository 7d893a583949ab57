use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_ttl_hours: i64,
    pub bypass_token_ttl_minutes: i64,
    pub revenue_chart_days: u32,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")?;
        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET is not set"))?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        Ok(Self {
            port,
            database_url,
            host,
            jwt_secret,
            jwt_ttl_hours: parse_or("JWT_TTL_HOURS", 24),
            bypass_token_ttl_minutes: parse_or("BYPASS_TOKEN_TTL_MINUTES", 60),
            revenue_chart_days: parse_or("REVENUE_CHART_DAYS", 7),
        })
    }

    /// Configuration for tests and tooling that never touch the environment.
    pub fn for_database(database_url: impl Into<String>, jwt_secret: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            host: "127.0.0.1".to_string(),
            port: 3000,
            jwt_secret: jwt_secret.into(),
            jwt_ttl_hours: 24,
            bypass_token_ttl_minutes: 60,
            revenue_chart_days: 7,
        }
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}
