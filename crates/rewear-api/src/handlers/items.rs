//! Item handlers
//!
//! Browsing, listing, editing and redeeming garments.

use axum::{extract::State, Json};
use rewear_core::ItemId;
use rewear_service::dto::{
    CreateItemRequest, FeaturedItemsResponse, ItemPage, ItemResponse, ListItemsQuery,
    RedemptionResponse, UpdateItemRequest,
};
use rewear_service::{ItemService, PointsService};

use crate::extractors::{AuthUser, IdPath, QueryParams, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Browse items
///
/// GET /api/items?page&limit&category&search&status
pub async fn list_items(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ListItemsQuery>,
) -> ApiResult<Json<ItemPage>> {
    let service = ItemService::new(state.service_context());
    Ok(Json(service.list(query).await?))
}

/// Landing page rows
///
/// GET /api/items/featured
pub async fn featured_items(
    State(state): State<AppState>,
) -> ApiResult<Json<FeaturedItemsResponse>> {
    let service = ItemService::new(state.service_context());
    Ok(Json(service.featured().await?))
}

/// Items listed by the caller
///
/// GET /api/items/user/items
pub async fn my_items(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<ItemResponse>>> {
    let service = ItemService::new(state.service_context());
    Ok(Json(service.list_for_user(auth.user_id).await?))
}

/// Get one item
///
/// GET /api/items/:id
pub async fn get_item(
    State(state): State<AppState>,
    IdPath(item_id): IdPath<ItemId>,
) -> ApiResult<Json<ItemResponse>> {
    let service = ItemService::new(state.service_context());
    Ok(Json(service.get(item_id).await?))
}

/// List a new item
///
/// POST /api/items
pub async fn create_item(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateItemRequest>,
) -> ApiResult<Created<Json<ItemResponse>>> {
    let service = ItemService::new(state.service_context());
    let item = service.create(auth.user_id, request).await?;
    Ok(Created(Json(item)))
}

/// Edit an item
///
/// PUT /api/items/:id
pub async fn update_item(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(item_id): IdPath<ItemId>,
    ValidatedJson(request): ValidatedJson<UpdateItemRequest>,
) -> ApiResult<Json<ItemResponse>> {
    let service = ItemService::new(state.service_context());
    Ok(Json(service.update(auth.user_id, item_id, request).await?))
}

/// Delete an item
///
/// DELETE /api/items/:id
pub async fn delete_item(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(item_id): IdPath<ItemId>,
) -> ApiResult<NoContent> {
    let service = ItemService::new(state.service_context());
    service.delete(auth.user_id, item_id).await?;
    Ok(NoContent)
}

/// Redeem an item with points
///
/// POST /api/items/:id/redeem
pub async fn redeem_item(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(item_id): IdPath<ItemId>,
) -> ApiResult<Json<RedemptionResponse>> {
    let service = PointsService::new(state.service_context());
    Ok(Json(service.redeem(auth.user_id, item_id).await?))
}
