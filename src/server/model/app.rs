use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::server::query::QueryCache;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub query_cache: Arc<QueryCache>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, query_cache: QueryCache) -> Self {
        Self {
            db,
            query_cache: Arc::new(query_cache),
        }
    }
}

/// Builds state with a cache using the default dedup interval
impl From<DatabaseConnection> for AppState {
    fn from(db: DatabaseConnection) -> Self {
        Self::new(db, QueryCache::default())
    }
}
