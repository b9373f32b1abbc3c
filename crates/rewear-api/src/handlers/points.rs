//! Points handlers

use axum::{extract::State, Json};
use rewear_service::dto::{
    AddPointsRequest, AddPointsResponse, BalanceResponse, TransactionResponse, UserPointsResponse,
};
use rewear_service::PointsService;

use crate::extractors::{AdminUser, AuthUser, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// GET /api/points/balance
pub async fn balance(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<BalanceResponse>> {
    let service = PointsService::new(state.service_context());
    Ok(Json(service.balance(auth.user_id).await?))
}

/// GET /api/points/transactions
pub async fn transactions(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<TransactionResponse>>> {
    let service = PointsService::new(state.service_context());
    Ok(Json(service.transactions(auth.user_id).await?))
}

/// GET /api/points/leaderboard
pub async fn leaderboard(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<Json<Vec<UserPointsResponse>>> {
    let service = PointsService::new(state.service_context());
    Ok(Json(service.leaderboard().await?))
}

/// POST /api/points/admin/add-points
pub async fn add_points(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    ValidatedJson(request): ValidatedJson<AddPointsRequest>,
) -> ApiResult<Json<AddPointsResponse>> {
    let service = PointsService::new(state.service_context());
    Ok(Json(service.admin_add_points(admin.user_id, request).await?))
}
