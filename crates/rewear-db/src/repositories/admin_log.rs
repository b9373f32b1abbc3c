//! PostgreSQL implementation of AdminLogRepository

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use tracing::instrument;

use rewear_core::entities::{AdminLog, NewAdminLog};
use rewear_core::traits::{AdminLogRepository, RepoResult};
use rewear_core::value_objects::ItemId;

use crate::models::AdminLogModel;

use super::error::map_db_error;

/// Append a log row on the given connection
pub(crate) async fn insert_log(conn: &mut PgConnection, log: &NewAdminLog) -> RepoResult<AdminLog> {
    let model = sqlx::query_as::<_, AdminLogModel>(
        r"
        INSERT INTO admin_logs (action, item_id, admin_id, details)
        VALUES ($1, $2, $3, $4)
        RETURNING id, action, item_id, admin_id, details, created_at
        ",
    )
    .bind(log.action.as_str())
    .bind(log.item_id.map(ItemId::into_inner))
    .bind(log.admin_id.into_inner())
    .bind(&log.details)
    .fetch_one(&mut *conn)
    .await
    .map_err(map_db_error)?;

    Ok(AdminLog::from(model))
}

/// PostgreSQL implementation of AdminLogRepository
#[derive(Clone)]
pub struct PgAdminLogRepository {
    pool: PgPool,
}

impl PgAdminLogRepository {
    /// Create a new PgAdminLogRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AdminLogRepository for PgAdminLogRepository {
    #[instrument(skip(self, log), fields(action = %log.action, admin_id = %log.admin_id))]
    async fn record(&self, log: &NewAdminLog) -> RepoResult<AdminLog> {
        let mut conn = self.pool.acquire().await.map_err(map_db_error)?;
        insert_log(&mut conn, log).await
    }

    #[instrument(skip(self))]
    async fn recent(&self, limit: i64) -> RepoResult<Vec<AdminLog>> {
        let models = sqlx::query_as::<_, AdminLogModel>(
            r"
            SELECT id, action, item_id, admin_id, details, created_at
            FROM admin_logs
            ORDER BY created_at DESC, id DESC
            LIMIT $1
            ",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(models.into_iter().map(AdminLog::from).collect())
    }
}
