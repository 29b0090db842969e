use crate::auth::jwt::JwtConfig;

/// Process configuration, loaded once from the environment.
///
/// Mutable business rules (resumption time, fine amount, maintenance flag)
/// live in the `system_config` table instead and are editable at runtime.
///
/// | Environment variable | Default | Meaning |
/// |----------------------|---------|---------|
/// | WORK_DIR | /var/lib/onepass | work directory (database, logs) |
/// | DATABASE_PATH | <WORK_DIR>/onepass.db | SQLite database file |
/// | HTTP_PORT | 3000 | HTTP API port |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | JWT_SECRET / JWT_EXPIRATION_MINUTES / JWT_ISSUER / JWT_AUDIENCE | — | token service |
/// | ASSISTANT_ENDPOINT | unset | chat-completion endpoint (assistant disabled when unset) |
/// | ASSISTANT_MODEL | gpt-4o-mini | model name sent to the endpoint |
/// | ASSISTANT_API_KEY | unset | bearer token for the endpoint |
#[derive(Debug, Clone)]
pub struct Config {
    pub work_dir: String,
    pub database_path: String,
    pub http_port: u16,
    pub environment: String,
    pub jwt: JwtConfig,
    pub assistant_endpoint: Option<String>,
    pub assistant_model: String,
    pub assistant_api_key: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        let work_dir = std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/onepass".into());
        let database_path = std::env::var("DATABASE_PATH")
            .unwrap_or_else(|_| format!("{work_dir}/onepass.db"));
        Self {
            work_dir,
            database_path,
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            jwt: JwtConfig::default(),
            assistant_endpoint: std::env::var("ASSISTANT_ENDPOINT").ok(),
            assistant_model: std::env::var("ASSISTANT_MODEL")
                .unwrap_or_else(|_| "gpt-4o-mini".into()),
            assistant_api_key: std::env::var("ASSISTANT_API_KEY").ok(),
        }
    }

    /// Override the data paths, for tests.
    pub fn with_database_path(database_path: impl Into<String>) -> Self {
        let mut config = Self::from_env();
        config.database_path = database_path.into();
        config
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
