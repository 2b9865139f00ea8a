use sea_orm::{DatabaseConnection, JsonValue};

use crate::server::{
    error::query::QueryError,
    query::{QueryBuilder, QueryCache, QueryConfig, QueryState},
};

/// Runs [`QueryConfig`]s through the shared [`QueryCache`].
pub struct QueryService<'a> {
    db: &'a DatabaseConnection,
    cache: &'a QueryCache,
}

impl<'a> QueryService<'a> {
    /// Creates a new instance of [`QueryService`]
    pub fn new(db: &'a DatabaseConnection, cache: &'a QueryCache) -> Self {
        Self { db, cache }
    }

    /// Validates `config`, fetches its rows through the cache and returns the cache state.
    ///
    /// Database failures do not fail the call: they are reported in [`QueryState::error`]
    /// next to whatever data was cached before.
    ///
    /// # Returns
    /// - `Ok(QueryState)` - Snapshot after the fetch completed
    /// - `Err(QueryError)` - The configuration names an unknown table or column, or a
    ///   filter value does not fit its operator
    pub async fn query(&self, config: &QueryConfig) -> Result<QueryState, QueryError> {
        let resolved = config.resolve()?;
        let key = config.cache_key();
        let tables = resolved.tables();
        let db = self.db.clone();

        let _ = self
            .cache
            .fetch(&key, tables, move || async move {
                QueryBuilder::new(&db)
                    .execute(&resolved)
                    .await
                    .map(JsonValue::Array)
                    .map_err(|err| {
                        tracing::error!("Query on {} failed: {}", resolved.table, err);

                        err.to_string()
                    })
            })
            .await;

        Ok(self.cache.state(&key))
    }
}
