//! Repository for the `print_requests` table.

use async_trait::async_trait;
use sqlx::PgPool;
use threedee_core::types::DbId;

use crate::config::DbConfig;
use crate::models::print_request::PrintRequest;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, item_name, \
    est_weight AS estimated_weight, \
    est_filament_length AS estimated_filament_length, \
    est_duration AS estimated_duration, \
    file_url, requestor, status";

/// Store operations the HTTP layer needs for print requests.
///
/// Every failure is the underlying `sqlx::Error`; nothing is retried.
#[async_trait]
pub trait PrintRequestStore: Send + Sync {
    /// Every active print request, in store order.
    async fn list_active(&self) -> Result<Vec<PrintRequest>, sqlx::Error>;

    /// The row with `id`, active or not.
    async fn find_by_id(&self, id: DbId) -> Result<Option<PrintRequest>, sqlx::Error>;

    /// Insert everything except `id` and `status`; returns the new id.
    async fn create(&self, input: &PrintRequest) -> Result<DbId, sqlx::Error>;

    /// Write every field, `status` included, keyed by `record.id`.
    ///
    /// Returns `false` if no row has that id.
    async fn update(&self, record: &PrintRequest) -> Result<bool, sqlx::Error>;

    /// Soft delete. Returns `false` if no row has that id.
    async fn deactivate(&self, id: DbId) -> Result<bool, sqlx::Error>;

    /// Cheap connectivity probe.
    async fn ping(&self) -> Result<(), sqlx::Error>;
}

/// PostgreSQL-backed [`PrintRequestStore`].
///
/// Each call checks a connection out of the pool for that one statement.
#[derive(Debug, Clone)]
pub struct PrintRequestRepo {
    pool: PgPool,
}

impl PrintRequestRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool from `config` and wrap it.
    pub async fn connect(config: &DbConfig) -> Result<Self, sqlx::Error> {
        crate::create_pool(config).await.map(Self::new)
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl PrintRequestStore for PrintRequestRepo {
    async fn list_active(&self) -> Result<Vec<PrintRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM print_requests WHERE is_active = true");
        sqlx::query_as::<_, PrintRequest>(&query)
            .fetch_all(&self.pool)
            .await
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<PrintRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM print_requests WHERE id = $1");
        sqlx::query_as::<_, PrintRequest>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn create(&self, input: &PrintRequest) -> Result<DbId, sqlx::Error> {
        let id = sqlx::query_scalar::<_, DbId>(
            "INSERT INTO print_requests \
                (item_name, est_weight, est_filament_length, est_duration, file_url, requestor) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING id",
        )
        .bind(&input.item_name)
        .bind(input.estimated_weight)
        .bind(input.estimated_filament_length)
        .bind(input.estimated_duration)
        .bind(&input.file_url)
        .bind(&input.requestor)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(id, "Inserted print request");
        Ok(id)
    }

    async fn update(&self, record: &PrintRequest) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE print_requests SET \
                item_name = $2, \
                est_weight = $3, \
                est_filament_length = $4, \
                est_duration = $5, \
                file_url = $6, \
                requestor = $7, \
                status = $8, \
                updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(record.id)
        .bind(&record.item_name)
        .bind(record.estimated_weight)
        .bind(record.estimated_filament_length)
        .bind(record.estimated_duration)
        .bind(&record.file_url)
        .bind(&record.requestor)
        .bind(&record.status)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn deactivate(&self, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE print_requests SET is_active = false, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        crate::health_check(&self.pool).await
    }
}
