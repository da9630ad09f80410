//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::ports::{
    CategoryRepository, CommentRepository, LocationRepository, PostRepository, UserRepository,
};
use quill_infra::database::{DatabaseConfig, DatabaseConnections};
use quill_infra::memory::InMemoryStore;

#[cfg(feature = "postgres")]
use quill_infra::database::{
    PostgresCategoryRepository, PostgresCommentRepository, PostgresLocationRepository,
    PostgresPostRepository, PostgresUserRepository,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub locations: Arc<dyn LocationRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub db: Option<Arc<DatabaseConnections>>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        #[cfg(feature = "postgres")]
        {
            if let Some(config) = db_config {
                match DatabaseConnections::init(config).await {
                    Ok(connections) => {
                        let conn = Arc::new(connections);
                        let state = Self {
                            users: Arc::new(PostgresUserRepository::new(conn.main.clone())),
                            posts: Arc::new(PostgresPostRepository::new(conn.main.clone())),
                            categories: Arc::new(PostgresCategoryRepository::new(
                                conn.main.clone(),
                            )),
                            locations: Arc::new(PostgresLocationRepository::new(
                                conn.main.clone(),
                            )),
                            comments: Arc::new(PostgresCommentRepository::new(conn.main.clone())),
                            db: Some(conn),
                        };
                        tracing::info!("Application state initialized (postgres)");
                        return state;
                    }
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory fallback.",
                            e
                        );
                    }
                }
            } else {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            }
        }

        #[cfg(not(feature = "postgres"))]
        {
            let _ = db_config;
            tracing::info!("Running without postgres feature - using in-memory repositories");
        }

        Self::in_memory()
    }

    /// State backed entirely by the in-memory store. Also the backend the
    /// handler tests run against.
    pub fn in_memory() -> Self {
        let store = InMemoryStore::new();
        Self {
            users: store.clone(),
            posts: store.clone(),
            categories: store.clone(),
            locations: store.clone(),
            comments: store,
            db: None,
        }
    }
}
