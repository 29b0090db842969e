use std::sync::Arc;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::services::AssistantService;
use crate::sync_engine::SheetClient;
use crate::utils::AppResult;

/// Shared server state. `Clone` is shallow: the pool and services are
/// reference-counted, so every handler gets the same singletons.
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: DbService,
    pub jwt_service: Arc<JwtService>,
    pub assistant: AssistantService,
    pub sheet: SheetClient,
}

impl ServerState {
    /// Open the database, run migrations, and wire up the services.
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        if let Some(parent) = std::path::Path::new(&config.database_path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    crate::utils::AppError::internal(format!(
                        "Failed to create work directory {}: {e}",
                        parent.display()
                    ))
                })?;
            }
        }

        let db = DbService::new(&config.database_path).await?;
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let assistant = AssistantService::new(
            config.assistant_endpoint.clone(),
            config.assistant_model.clone(),
            config.assistant_api_key.clone(),
        );

        Ok(Self {
            config: config.clone(),
            db,
            jwt_service,
            assistant,
            sheet: SheetClient::new(),
        })
    }

    pub fn pool(&self) -> &sqlx::SqlitePool {
        &self.db.pool
    }
}
