//! Points service
//!
//! Redemptions, balances, history and admin grants.

use rewear_core::entities::{AdminAction, LedgerEntry, NewAdminLog, User};
use rewear_core::{ItemId, UserId};
use tracing::{info, instrument};

use crate::dto::{
    AddPointsRequest, AddPointsResponse, BalanceResponse, BalanceUser, RedemptionResponse,
    TransactionResponse, UserPointsResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Rows returned by the transaction history
const HISTORY_LIMIT: i64 = 50;

/// Rows returned by the leaderboard
const LEADERBOARD_SIZE: i64 = 10;

/// Points service
pub struct PointsService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PointsService<'a> {
    /// Create a new PointsService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Spend points on an item: the buyer pays the owner and the item is swapped
    #[instrument(skip(self))]
    pub async fn redeem(
        &self,
        buyer_id: UserId,
        item_id: ItemId,
    ) -> ServiceResult<RedemptionResponse> {
        let redemption = self.ctx.ledger_repo().redeem(item_id, buyer_id).await?;

        info!(
            item_id = %item_id,
            buyer_id = %buyer_id,
            owner_id = %redemption.item.uploader_id,
            points = redemption.points_spent,
            "Item redeemed"
        );

        Ok(RedemptionResponse {
            message: "Item redeemed successfully".to_string(),
            item_id,
            points_spent: redemption.points_spent,
            remaining_points: redemption.remaining_points,
        })
    }

    /// Current balance
    #[instrument(skip(self))]
    pub async fn balance(&self, user_id: UserId) -> ServiceResult<BalanceResponse> {
        let user = self.load_user(user_id).await?;

        Ok(BalanceResponse {
            points: user.points,
            user: BalanceUser {
                id: user.id,
                name: user.name,
                email: user.email,
            },
        })
    }

    /// Latest ledger rows, newest first
    #[instrument(skip(self))]
    pub async fn transactions(&self, user_id: UserId) -> ServiceResult<Vec<TransactionResponse>> {
        let rows = self
            .ctx
            .ledger_repo()
            .find_by_user(user_id, HISTORY_LIMIT)
            .await?;
        Ok(rows.into_iter().map(TransactionResponse::from).collect())
    }

    /// Users with the most points
    #[instrument(skip(self))]
    pub async fn leaderboard(&self) -> ServiceResult<Vec<UserPointsResponse>> {
        let users = self.ctx.user_repo().leaderboard(LEADERBOARD_SIZE).await?;
        Ok(users.iter().map(UserPointsResponse::from).collect())
    }

    /// Grant (or take) points on behalf of an admin
    #[instrument(skip(self, request), fields(user_id = %request.user_id, amount = request.amount))]
    pub async fn admin_add_points(
        &self,
        admin_id: UserId,
        request: AddPointsRequest,
    ) -> ServiceResult<AddPointsResponse> {
        let reason = request.reason.trim().to_string();
        let log = NewAdminLog::new(AdminAction::AddPoints, admin_id).details(format!(
            "{} points to user {}: {}",
            request.amount, request.user_id, reason
        ));

        let (receipt, _) = self
            .ctx
            .ledger_repo()
            .add_points_logged(
                &LedgerEntry::new(request.user_id, request.amount, reason),
                &log,
            )
            .await?;

        let user = self.load_user(request.user_id).await?;

        info!(
            admin_id = %admin_id,
            user_id = %request.user_id,
            balance = receipt.balance,
            "Admin adjusted points"
        );

        Ok(AddPointsResponse {
            message: "Points added successfully".to_string(),
            user: UserPointsResponse::from(&user),
            transaction: receipt.transaction.into(),
        })
    }

    async fn load_user(&self, user_id: UserId) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))
    }
}
