//! PostgreSQL implementation of ItemRepository

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use tracing::instrument;

use rewear_core::entities::{AdminLog, Item, ItemListing, ItemQuery, NewAdminLog, NewItem};
use rewear_core::traits::{ItemRepository, RepoResult};
use rewear_core::value_objects::{ItemId, UserId};

use crate::models::{ItemListingModel, ItemModel};

use super::admin_log::insert_log;
use super::error::{item_not_found, map_db_error};

/// Escape `%`, `_` and `\` so user input matches literally inside ILIKE
pub(crate) fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len() + 2);
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// PostgreSQL implementation of ItemRepository
#[derive(Clone)]
pub struct PgItemRepository {
    pool: PgPool,
}

impl PgItemRepository {
    /// Create a new PgItemRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ItemRepository for PgItemRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: ItemId) -> RepoResult<Option<Item>> {
        let result = sqlx::query_as::<_, ItemModel>(
            r"
            SELECT id, title, description, images, category, size, condition, tags,
                   uploader_id, status, points_value, created_at, updated_at
            FROM items
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Item::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_listing(&self, id: ItemId) -> RepoResult<Option<ItemListing>> {
        let result = sqlx::query_as::<_, ItemListingModel>(
            r"
            SELECT i.id, i.title, i.description, i.images, i.category, i.size, i.condition,
                   i.tags, i.uploader_id, i.status, i.points_value, i.created_at, i.updated_at,
                   u.name AS uploader_name
            FROM items i
            JOIN users u ON u.id = i.uploader_id
            WHERE i.id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(ItemListing::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn list(&self, query: &ItemQuery) -> RepoResult<(Vec<ItemListing>, i64)> {
        let category = query.category.map(|c| c.as_str());
        let pattern = query.search.as_deref().map(|s| format!("%{}%", escape_like(s)));

        let models = sqlx::query_as::<_, ItemListingModel>(
            r"
            SELECT i.id, i.title, i.description, i.images, i.category, i.size, i.condition,
                   i.tags, i.uploader_id, i.status, i.points_value, i.created_at, i.updated_at,
                   u.name AS uploader_name
            FROM items i
            JOIN users u ON u.id = i.uploader_id
            WHERE i.status = $1
              AND ($2::TEXT IS NULL OR i.category = $2)
              AND ($3::TEXT IS NULL
                   OR i.title ILIKE $3
                   OR i.description ILIKE $3
                   OR i.tags && ARRAY[$4::TEXT])
            ORDER BY i.created_at DESC, i.id DESC
            LIMIT $5 OFFSET $6
            ",
        )
        .bind(query.status.as_str())
        .bind(category)
        .bind(&pattern)
        .bind(&query.search)
        .bind(i64::from(query.limit))
        .bind(query.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let total = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*)
            FROM items i
            WHERE i.status = $1
              AND ($2::TEXT IS NULL OR i.category = $2)
              AND ($3::TEXT IS NULL
                   OR i.title ILIKE $3
                   OR i.description ILIKE $3
                   OR i.tags && ARRAY[$4::TEXT])
            ",
        )
        .bind(query.status.as_str())
        .bind(category)
        .bind(&pattern)
        .bind(&query.search)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        let items = models
            .into_iter()
            .map(ItemListing::try_from)
            .collect::<RepoResult<Vec<_>>>()?;

        Ok((items, total))
    }

    #[instrument(skip(self))]
    async fn newest_available(&self, limit: i64) -> RepoResult<Vec<ItemListing>> {
        let models = sqlx::query_as::<_, ItemListingModel>(
            r"
            SELECT i.id, i.title, i.description, i.images, i.category, i.size, i.condition,
                   i.tags, i.uploader_id, i.status, i.points_value, i.created_at, i.updated_at,
                   u.name AS uploader_name
            FROM items i
            JOIN users u ON u.id = i.uploader_id
            WHERE i.status = 'available'
            ORDER BY i.created_at DESC, i.id DESC
            LIMIT $1
            ",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        models.into_iter().map(ItemListing::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn find_by_uploader(&self, uploader_id: UserId) -> RepoResult<Vec<Item>> {
        let models = sqlx::query_as::<_, ItemModel>(
            r"
            SELECT id, title, description, images, category, size, condition, tags,
                   uploader_id, status, points_value, created_at, updated_at
            FROM items
            WHERE uploader_id = $1
            ORDER BY created_at DESC, id DESC
            ",
        )
        .bind(uploader_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        models.into_iter().map(Item::try_from).collect()
    }

    #[instrument(skip(self, item), fields(uploader_id = %item.uploader_id))]
    async fn create(&self, item: &NewItem) -> RepoResult<Item> {
        let model = sqlx::query_as::<_, ItemModel>(
            r"
            INSERT INTO items (title, description, images, category, size, condition, tags,
                               uploader_id, points_value)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, title, description, images, category, size, condition, tags,
                      uploader_id, status, points_value, created_at, updated_at
            ",
        )
        .bind(&item.title)
        .bind(&item.description)
        .bind(&item.images)
        .bind(item.category.as_str())
        .bind(&item.size)
        .bind(item.condition.as_str())
        .bind(&item.tags)
        .bind(item.uploader_id.into_inner())
        .bind(item.points_value)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Item::try_from(model)
    }

    #[instrument(skip(self, item), fields(item_id = %item.id))]
    async fn update(&self, item: &Item) -> RepoResult<()> {
        let mut conn = self.pool.acquire().await.map_err(map_db_error)?;
        write_item(&mut *conn, item).await
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ItemId) -> RepoResult<()> {
        let mut conn = self.pool.acquire().await.map_err(map_db_error)?;
        remove_item(&mut *conn, id).await
    }

    #[instrument(skip(self, item, log), fields(item_id = %item.id, admin_id = %log.admin_id))]
    async fn update_logged(&self, item: &Item, log: &NewAdminLog) -> RepoResult<AdminLog> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        write_item(&mut *tx, item).await?;
        let log = insert_log(&mut *tx, log).await?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(log)
    }

    #[instrument(skip(self, log), fields(admin_id = %log.admin_id))]
    async fn delete_logged(&self, id: ItemId, log: &NewAdminLog) -> RepoResult<AdminLog> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // The log row references the item, so it goes in before the delete
        let log = insert_log(&mut *tx, log).await?;
        remove_item(&mut *tx, id).await?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(AdminLog { item_id: None, ..log })
    }
}

/// Write the editable fields of an item
async fn write_item(conn: &mut PgConnection, item: &Item) -> RepoResult<()> {
    let result = sqlx::query(
        r"
        UPDATE items
        SET title = $2, description = $3, images = $4, category = $5, size = $6,
            condition = $7, tags = $8, points_value = $9, updated_at = NOW()
        WHERE id = $1
        ",
    )
    .bind(item.id.into_inner())
    .bind(&item.title)
    .bind(&item.description)
    .bind(&item.images)
    .bind(item.category.as_str())
    .bind(&item.size)
    .bind(item.condition.as_str())
    .bind(&item.tags)
    .bind(item.points_value)
    .execute(&mut *conn)
    .await
    .map_err(map_db_error)?;

    if result.rows_affected() == 0 {
        return Err(item_not_found(item.id));
    }

    Ok(())
}

/// Delete an item; swap requests cascade, ledger and log rows keep a null item
async fn remove_item(conn: &mut PgConnection, id: ItemId) -> RepoResult<()> {
    let result = sqlx::query(
        r"
        DELETE FROM items WHERE id = $1
        ",
    )
    .bind(id.into_inner())
    .execute(&mut *conn)
    .await
    .map_err(map_db_error)?;

    if result.rows_affected() == 0 {
        return Err(item_not_found(id));
    }

    Ok(())
}
