//! Item service
//!
//! Browsing, listing and managing garments.

use rewear_core::entities::{AdminAction, Item, ItemChanges, ItemQuery, NewAdminLog, NewItem, User};
use rewear_core::{DomainError, ItemCategory, ItemId, ItemStatus, UserId};
use tracing::{info, instrument};

use crate::dto::{
    CreateItemRequest, FeaturedItemsResponse, ItemPage, ItemResponse, ListItemsQuery,
    UpdateItemRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Number of items on the landing page, split between the two rows
const FEATURED_COUNT: i64 = 6;

/// Item service
pub struct ItemService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ItemService<'a> {
    /// Create a new ItemService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Browse items, newest first
    #[instrument(skip(self))]
    pub async fn list(&self, params: ListItemsQuery) -> ServiceResult<ItemPage> {
        let query = build_query(params)?;
        let (rows, total) = self.ctx.item_repo().list(&query).await?;

        Ok(ItemPage {
            items: rows.into_iter().map(ItemResponse::from).collect(),
            total,
            current_page: query.page,
            total_pages: query.total_pages(total),
        })
    }

    /// Landing page rows
    #[instrument(skip(self))]
    pub async fn featured(&self) -> ServiceResult<FeaturedItemsResponse> {
        let mut newest: Vec<ItemResponse> = self
            .ctx
            .item_repo()
            .newest_available(FEATURED_COUNT)
            .await?
            .into_iter()
            .map(ItemResponse::from)
            .collect();

        // No popularity signal is tracked yet, so the next three newest stand in
        let popular = newest.split_off(newest.len().min(3));

        Ok(FeaturedItemsResponse { newest, popular })
    }

    /// Get one item with its uploader
    #[instrument(skip(self))]
    pub async fn get(&self, item_id: ItemId) -> ServiceResult<ItemResponse> {
        let listing = self
            .ctx
            .item_repo()
            .find_listing(item_id)
            .await?
            .ok_or(DomainError::ItemNotFound(item_id))?;

        Ok(listing.into())
    }

    /// List a new item for `uploader_id`
    #[instrument(skip(self, request), fields(title = %request.title))]
    pub async fn create(
        &self,
        uploader_id: UserId,
        request: CreateItemRequest,
    ) -> ServiceResult<ItemResponse> {
        let title = Item::normalize_title(&request.title)?;
        let points_value = Item::validate_points_value(
            request.points_value.unwrap_or(Item::DEFAULT_POINTS_VALUE),
        )?;

        let item = self
            .ctx
            .item_repo()
            .create(&NewItem {
                title,
                description: request.description,
                images: request.images,
                category: request.category,
                size: request.size,
                condition: request.condition,
                tags: request.tags,
                uploader_id,
                points_value,
            })
            .await?;

        info!(item_id = %item.id, uploader_id = %uploader_id, "Item listed");
        Ok(item.into())
    }

    /// Edit an item; allowed for its owner and for admins
    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        actor_id: UserId,
        item_id: ItemId,
        request: UpdateItemRequest,
    ) -> ServiceResult<ItemResponse> {
        let (actor, mut item) = self.load_managed(actor_id, item_id).await?;

        let changes = ItemChanges {
            title: request
                .title
                .as_deref()
                .map(Item::normalize_title)
                .transpose()?,
            description: request.description,
            images: request.images,
            category: request.category,
            size: request.size,
            condition: request.condition,
            tags: request.tags,
            points_value: request
                .points_value
                .map(Item::validate_points_value)
                .transpose()?,
        };
        if changes.is_empty() {
            return Ok(item.into());
        }

        item.apply(changes);
        if item.is_owned_by(actor.id) {
            self.ctx.item_repo().update(&item).await?;
        } else {
            let log = admin_log(&actor, AdminAction::UpdateItem, &item);
            self.ctx.item_repo().update_logged(&item, &log).await?;
        }

        info!(item_id = %item_id, actor_id = %actor_id, "Item updated");
        Ok(item.into())
    }

    /// Delete an item; allowed for its owner and for admins
    #[instrument(skip(self))]
    pub async fn delete(&self, actor_id: UserId, item_id: ItemId) -> ServiceResult<()> {
        let (actor, item) = self.load_managed(actor_id, item_id).await?;

        if item.is_owned_by(actor.id) {
            self.ctx.item_repo().delete(item_id).await?;
        } else {
            let log = admin_log(&actor, AdminAction::DeleteItem, &item);
            self.ctx.item_repo().delete_logged(item_id, &log).await?;
        }

        info!(item_id = %item_id, actor_id = %actor_id, "Item deleted");
        Ok(())
    }

    /// Items listed by a user, newest first
    #[instrument(skip(self))]
    pub async fn list_for_user(&self, user_id: UserId) -> ServiceResult<Vec<ItemResponse>> {
        let items = self.ctx.item_repo().find_by_uploader(user_id).await?;
        Ok(items.into_iter().map(ItemResponse::from).collect())
    }

    async fn load_managed(&self, actor_id: UserId, item_id: ItemId) -> ServiceResult<(User, Item)> {
        let item = self
            .ctx
            .item_repo()
            .find_by_id(item_id)
            .await?
            .ok_or(DomainError::ItemNotFound(item_id))?;
        let actor = self
            .ctx
            .user_repo()
            .find_by_id(actor_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", actor_id.to_string()))?;

        if !item.can_be_managed_by(&actor) {
            return Err(DomainError::NotItemOwner.into());
        }
        Ok((actor, item))
    }
}

/// Audit row for an admin acting on someone else's item
fn admin_log(admin: &User, action: AdminAction, item: &Item) -> NewAdminLog {
    NewAdminLog::new(action, admin.id)
        .item(item.id)
        .details(format!("{} \"{}\" owned by user {}", action, item.title, item.uploader_id))
}

/// Turn raw query parameters into a validated browse query
fn build_query(params: ListItemsQuery) -> ServiceResult<ItemQuery> {
    let mut query = ItemQuery::new(params.page, params.limit);

    if let Some(status) = non_empty(params.status) {
        query.status = status.parse::<ItemStatus>()?;
    }
    if let Some(category) = non_empty(params.category) {
        query.category = Some(category.parse::<ItemCategory>()?);
    }
    query.search = non_empty(params.search);

    Ok(query)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
