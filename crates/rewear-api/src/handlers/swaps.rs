//! Swap request handlers

use axum::{extract::State, Json};
use rewear_core::{ItemId, SwapRequestId};
use rewear_service::dto::{
    IncomingSwapRequestResponse, OutgoingSwapRequestResponse, SwapRequestResponse,
};
use rewear_service::SwapService;

use crate::extractors::{AuthUser, IdPath};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Ask the owner of an item for a swap
///
/// POST /api/swaps/items/:item_id/request
pub async fn create_request(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(item_id): IdPath<ItemId>,
) -> ApiResult<Created<Json<SwapRequestResponse>>> {
    let service = SwapService::new(state.service_context());
    let request = service.create_request(auth.user_id, item_id).await?;
    Ok(Created(Json(request)))
}

/// PUT /api/swaps/requests/:id/approve
pub async fn approve_request(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(request_id): IdPath<SwapRequestId>,
) -> ApiResult<Json<SwapRequestResponse>> {
    let service = SwapService::new(state.service_context());
    Ok(Json(service.approve(auth.user_id, request_id).await?))
}

/// PUT /api/swaps/requests/:id/reject
pub async fn reject_request(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(request_id): IdPath<SwapRequestId>,
) -> ApiResult<Json<SwapRequestResponse>> {
    let service = SwapService::new(state.service_context());
    Ok(Json(service.reject(auth.user_id, request_id).await?))
}

/// PUT /api/swaps/requests/:id/complete
pub async fn complete_request(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(request_id): IdPath<SwapRequestId>,
) -> ApiResult<Json<SwapRequestResponse>> {
    let service = SwapService::new(state.service_context());
    Ok(Json(service.complete(auth.user_id, request_id).await?))
}

/// Requests the caller has made
///
/// GET /api/swaps/user/requests
pub async fn my_requests(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<OutgoingSwapRequestResponse>>> {
    let service = SwapService::new(state.service_context());
    Ok(Json(service.list_for_requester(auth.user_id).await?))
}

/// Pending requests on the caller's items
///
/// GET /api/swaps/user/pending-requests
pub async fn pending_requests(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<IncomingSwapRequestResponse>>> {
    let service = SwapService::new(state.service_context());
    Ok(Json(service.list_pending_for_owner(auth.user_id).await?))
}
