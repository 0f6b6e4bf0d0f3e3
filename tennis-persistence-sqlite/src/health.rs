use sqlx::{Pool, Sqlite};
use tennis_server_domain::{ServiceError, ServiceResult, health::HealthCheckRepository};

use crate::create_player_db_pool;

pub struct SqliteHealthCheckRepository {
    pool: Pool<Sqlite>,
}

impl SqliteHealthCheckRepository {
    pub fn new() -> Self {
        let pool = create_player_db_pool();
        Self { pool }
    }
}

impl Default for SqliteHealthCheckRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl HealthCheckRepository for SqliteHealthCheckRepository {
    async fn count_connections(&self) -> ServiceResult<i64> {
        // one row per attached database; fails when the store file is gone
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM pragma_database_list")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| ServiceError::DataAccess(e.to_string()))
    }
}
