//! PostgreSQL implementation of SwapRequestRepository

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use tracing::instrument;

use rewear_core::entities::{
    RequestWithItem, RequestWithRequester, SwapApproval, SwapRequest,
};
use rewear_core::error::DomainError;
use rewear_core::traits::{RepoResult, SwapRequestRepository};
use rewear_core::value_objects::{ItemId, ItemStatus, SwapRequestId, UserId};

use crate::models::{SwapRequestJoinModel, SwapRequestModel};

use super::error::{map_db_error, map_unique_violation, swap_request_not_found};
use super::ledger::{apply_entry, lock_item, lock_users, set_item_status};

/// Lock a swap request row for the rest of the transaction
async fn lock_request(conn: &mut PgConnection, id: SwapRequestId) -> RepoResult<SwapRequest> {
    let model = sqlx::query_as::<_, SwapRequestModel>(
        r"
        SELECT id, item_id, requester_id, status, created_at, updated_at
        FROM swap_requests
        WHERE id = $1
        FOR UPDATE
        ",
    )
    .bind(id.into_inner())
    .fetch_optional(&mut *conn)
    .await
    .map_err(map_db_error)?
    .ok_or_else(|| swap_request_not_found(id))?;

    SwapRequest::try_from(model)
}

/// Persist a request's status
async fn save_status(conn: &mut PgConnection, request: &SwapRequest) -> RepoResult<()> {
    sqlx::query(
        r"
        UPDATE swap_requests SET status = $2, updated_at = $3 WHERE id = $1
        ",
    )
    .bind(request.id.into_inner())
    .bind(request.status.as_str())
    .bind(request.updated_at)
    .execute(&mut *conn)
    .await
    .map_err(map_db_error)?;

    Ok(())
}

/// PostgreSQL implementation of SwapRequestRepository
#[derive(Clone)]
pub struct PgSwapRequestRepository {
    pool: PgPool,
}

impl PgSwapRequestRepository {
    /// Create a new PgSwapRequestRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SwapRequestRepository for PgSwapRequestRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: SwapRequestId) -> RepoResult<Option<SwapRequest>> {
        let result = sqlx::query_as::<_, SwapRequestModel>(
            r"
            SELECT id, item_id, requester_id, status, created_at, updated_at
            FROM swap_requests
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(SwapRequest::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_pending(
        &self,
        item_id: ItemId,
        requester_id: UserId,
    ) -> RepoResult<Option<SwapRequest>> {
        let result = sqlx::query_as::<_, SwapRequestModel>(
            r"
            SELECT id, item_id, requester_id, status, created_at, updated_at
            FROM swap_requests
            WHERE item_id = $1 AND requester_id = $2 AND status = 'pending'
            ",
        )
        .bind(item_id.into_inner())
        .bind(requester_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(SwapRequest::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn create(&self, item_id: ItemId, requester_id: UserId) -> RepoResult<SwapRequest> {
        let model = sqlx::query_as::<_, SwapRequestModel>(
            r"
            INSERT INTO swap_requests (item_id, requester_id)
            VALUES ($1, $2)
            RETURNING id, item_id, requester_id, status, created_at, updated_at
            ",
        )
        .bind(item_id.into_inner())
        .bind(requester_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::DuplicateSwapRequest))?;

        SwapRequest::try_from(model)
    }

    #[instrument(skip(self))]
    async fn approve(&self, id: SwapRequestId, actor: UserId) -> RepoResult<SwapApproval> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let mut request = lock_request(&mut *tx, id).await?;
        let item = lock_item(&mut *tx, request.item_id).await?;
        lock_users(&mut *tx, &[request.requester_id, item.uploader_id]).await?;

        let [to_requester, to_owner] = request.approve(actor, &item)?;

        save_status(&mut *tx, &request).await?;
        set_item_status(&mut *tx, item.id, ItemStatus::Swapped).await?;
        let requester_receipt = apply_entry(&mut *tx, &to_requester).await?;
        let owner_receipt = apply_entry(&mut *tx, &to_owner).await?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(SwapApproval {
            request,
            requester_balance: requester_receipt.balance,
            owner_balance: owner_receipt.balance,
        })
    }

    #[instrument(skip(self))]
    async fn reject(&self, id: SwapRequestId, actor: UserId) -> RepoResult<SwapRequest> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let mut request = lock_request(&mut *tx, id).await?;
        let item = lock_item(&mut *tx, request.item_id).await?;

        request.reject(actor, &item)?;
        save_status(&mut *tx, &request).await?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(request)
    }

    #[instrument(skip(self))]
    async fn complete(
        &self,
        id: SwapRequestId,
        party: Option<UserId>,
    ) -> RepoResult<SwapRequest> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let mut request = lock_request(&mut *tx, id).await?;
        if let Some(actor) = party {
            let item = lock_item(&mut *tx, request.item_id).await?;
            request.ensure_party(actor, &item)?;
        }

        request.complete()?;
        save_status(&mut *tx, &request).await?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(request)
    }

    #[instrument(skip(self))]
    async fn find_by_requester(&self, requester_id: UserId) -> RepoResult<Vec<RequestWithItem>> {
        let models = sqlx::query_as::<_, SwapRequestJoinModel>(
            r"
            SELECT sr.id AS request_id, sr.requester_id, sr.status AS request_status,
                   sr.created_at AS request_created_at, sr.updated_at AS request_updated_at,
                   i.id, i.title, i.description, i.images, i.category, i.size, i.condition,
                   i.tags, i.uploader_id, i.status, i.points_value, i.created_at, i.updated_at,
                   u.id AS party_id, u.name AS party_name
            FROM swap_requests sr
            JOIN items i ON i.id = sr.item_id
            JOIN users u ON u.id = i.uploader_id
            WHERE sr.requester_id = $1
            ORDER BY sr.created_at DESC, sr.id DESC
            ",
        )
        .bind(requester_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        models.into_iter().map(RequestWithItem::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn find_pending_for_owner(
        &self,
        owner_id: UserId,
    ) -> RepoResult<Vec<RequestWithRequester>> {
        let models = sqlx::query_as::<_, SwapRequestJoinModel>(
            r"
            SELECT sr.id AS request_id, sr.requester_id, sr.status AS request_status,
                   sr.created_at AS request_created_at, sr.updated_at AS request_updated_at,
                   i.id, i.title, i.description, i.images, i.category, i.size, i.condition,
                   i.tags, i.uploader_id, i.status, i.points_value, i.created_at, i.updated_at,
                   u.id AS party_id, u.name AS party_name
            FROM swap_requests sr
            JOIN items i ON i.id = sr.item_id
            JOIN users u ON u.id = sr.requester_id
            WHERE i.uploader_id = $1 AND sr.status = 'pending'
            ORDER BY sr.created_at DESC, sr.id DESC
            ",
        )
        .bind(owner_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        models.into_iter().map(RequestWithRequester::try_from).collect()
    }
}
