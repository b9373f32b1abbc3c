//! PostgreSQL implementation of LedgerRepository
//!
//! Every balance change goes through [`apply_entry`], which updates the
//! balance and appends the transaction row on the same connection. Callers
//! run it inside a transaction so both writes commit together.

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use tracing::instrument;

use rewear_core::entities::{
    AdminLog, Item, LedgerEntry, LedgerReceipt, NewAdminLog, PointsTransaction, Redemption,
    TransactionWithItem, User,
};
use rewear_core::traits::{LedgerRepository, RepoResult};
use rewear_core::value_objects::{ItemId, ItemStatus, UserId};

use crate::models::{ItemModel, PointsTransactionModel, TransactionWithItemModel, UserModel};

use super::admin_log::insert_log;
use super::error::{item_not_found, map_db_error, user_not_found};

/// Lock an item row for the rest of the transaction
pub(crate) async fn lock_item(conn: &mut PgConnection, id: ItemId) -> RepoResult<Item> {
    let model = sqlx::query_as::<_, ItemModel>(
        r"
        SELECT id, title, description, images, category, size, condition, tags,
               uploader_id, status, points_value, created_at, updated_at
        FROM items
        WHERE id = $1
        FOR UPDATE
        ",
    )
    .bind(id.into_inner())
    .fetch_optional(&mut *conn)
    .await
    .map_err(map_db_error)?
    .ok_or_else(|| item_not_found(id))?;

    Item::try_from(model)
}

/// Lock user rows for the rest of the transaction
///
/// Rows are locked in id order, so two transactions touching the same pair
/// of users cannot deadlock on each other.
pub(crate) async fn lock_users(conn: &mut PgConnection, ids: &[UserId]) -> RepoResult<Vec<User>> {
    let raw_ids: Vec<i64> = ids.iter().map(|id| id.into_inner()).collect();

    let models = sqlx::query_as::<_, UserModel>(
        r"
        SELECT id, name, email, points, is_admin, external_id, created_at, updated_at
        FROM users
        WHERE id = ANY($1)
        ORDER BY id
        FOR UPDATE
        ",
    )
    .bind(&raw_ids)
    .fetch_all(&mut *conn)
    .await
    .map_err(map_db_error)?;

    let users: Vec<User> = models.into_iter().map(User::from).collect();

    if let Some(missing) = ids.iter().find(|id| !users.iter().any(|u| u.id == **id)) {
        return Err(user_not_found(*missing));
    }

    Ok(users)
}

/// Set an item's status
pub(crate) async fn set_item_status(
    conn: &mut PgConnection,
    id: ItemId,
    status: ItemStatus,
) -> RepoResult<()> {
    sqlx::query(
        r"
        UPDATE items SET status = $2, updated_at = NOW() WHERE id = $1
        ",
    )
    .bind(id.into_inner())
    .bind(status.as_str())
    .execute(&mut *conn)
    .await
    .map_err(map_db_error)?;

    Ok(())
}

/// Apply a ledger entry: adjust the balance, then append the transaction row
pub(crate) async fn apply_entry(
    conn: &mut PgConnection,
    entry: &LedgerEntry,
) -> RepoResult<LedgerReceipt> {
    let balance = sqlx::query_scalar::<_, i32>(
        r"
        UPDATE users
        SET points = points + $2, updated_at = NOW()
        WHERE id = $1
        RETURNING points
        ",
    )
    .bind(entry.user_id.into_inner())
    .bind(entry.amount)
    .fetch_optional(&mut *conn)
    .await
    .map_err(map_db_error)?
    .ok_or_else(|| user_not_found(entry.user_id))?;

    let model = sqlx::query_as::<_, PointsTransactionModel>(
        r"
        INSERT INTO points_transactions (user_id, amount, reason, item_id)
        VALUES ($1, $2, $3, $4)
        RETURNING id, user_id, amount, reason, item_id, created_at
        ",
    )
    .bind(entry.user_id.into_inner())
    .bind(entry.amount)
    .bind(&entry.reason)
    .bind(entry.item_id.map(ItemId::into_inner))
    .fetch_one(&mut *conn)
    .await
    .map_err(map_db_error)?;

    Ok(LedgerReceipt {
        balance,
        transaction: PointsTransaction::from(model),
    })
}

/// PostgreSQL implementation of LedgerRepository
#[derive(Clone)]
pub struct PgLedgerRepository {
    pool: PgPool,
}

impl PgLedgerRepository {
    /// Create a new PgLedgerRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LedgerRepository for PgLedgerRepository {
    #[instrument(skip(self, entry), fields(user_id = %entry.user_id, amount = entry.amount))]
    async fn add_points(&self, entry: &LedgerEntry) -> RepoResult<LedgerReceipt> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let receipt = apply_entry(&mut *tx, entry).await?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(receipt)
    }

    #[instrument(skip(self, entry, log), fields(user_id = %entry.user_id, amount = entry.amount))]
    async fn add_points_logged(
        &self,
        entry: &LedgerEntry,
        log: &NewAdminLog,
    ) -> RepoResult<(LedgerReceipt, AdminLog)> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let receipt = apply_entry(&mut *tx, entry).await?;
        let log = insert_log(&mut *tx, log).await?;

        tx.commit().await.map_err(map_db_error)?;

        Ok((receipt, log))
    }

    #[instrument(skip(self))]
    async fn redeem(&self, item_id: ItemId, buyer_id: UserId) -> RepoResult<Redemption> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Item first: concurrent redemptions of one item queue here
        let mut item = lock_item(&mut *tx, item_id).await?;
        let users = lock_users(&mut *tx, &[buyer_id, item.uploader_id]).await?;
        let buyer = users
            .into_iter()
            .find(|u| u.id == buyer_id)
            .ok_or_else(|| user_not_found(buyer_id))?;

        let [debit, credit] = item.plan_redemption(&buyer)?;

        let receipt = apply_entry(&mut *tx, &debit).await?;
        apply_entry(&mut *tx, &credit).await?;
        set_item_status(&mut *tx, item.id, ItemStatus::Swapped).await?;

        tx.commit().await.map_err(map_db_error)?;

        item.mark_swapped();

        Ok(Redemption {
            points_spent: item.points_value,
            remaining_points: receipt.balance,
            item,
        })
    }

    #[instrument(skip(self))]
    async fn find_by_user(
        &self,
        user_id: UserId,
        limit: i64,
    ) -> RepoResult<Vec<TransactionWithItem>> {
        let models = sqlx::query_as::<_, TransactionWithItemModel>(
            r"
            SELECT t.id, t.user_id, t.amount, t.reason, t.item_id, t.created_at,
                   i.title AS item_title
            FROM points_transactions t
            LEFT JOIN items i ON i.id = t.item_id
            WHERE t.user_id = $1
            ORDER BY t.created_at DESC, t.id DESC
            LIMIT $2
            ",
        )
        .bind(user_id.into_inner())
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(models.into_iter().map(TransactionWithItem::from).collect())
    }
}
