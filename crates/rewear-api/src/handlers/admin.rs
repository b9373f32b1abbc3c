//! Admin handlers

use axum::{extract::State, Json};
use rewear_service::dto::AdminLogResponse;
use rewear_service::AdminService;

use crate::extractors::{AdminUser, LimitParams, QueryParams};
use crate::response::ApiResult;
use crate::state::AppState;

/// Recent admin actions
///
/// GET /api/admin/logs?limit
pub async fn recent_logs(
    State(state): State<AppState>,
    _admin: AdminUser,
    QueryParams(params): QueryParams<LimitParams>,
) -> ApiResult<Json<Vec<AdminLogResponse>>> {
    let service = AdminService::new(state.service_context());
    Ok(Json(service.recent_logs(params.limit).await?))
}
