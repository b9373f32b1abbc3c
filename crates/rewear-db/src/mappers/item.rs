//! Item model -> entity mappers

use rewear_core::entities::{Item, ItemListing, UserSummary};
use rewear_core::error::DomainError;
use rewear_core::value_objects::{ItemId, UserId};

use crate::models::{ItemListingModel, ItemModel};

use super::corrupt_row;

impl TryFrom<ItemModel> for Item {
    type Error = DomainError;

    fn try_from(model: ItemModel) -> Result<Self, Self::Error> {
        Ok(Item {
            id: ItemId::new(model.id),
            title: model.title,
            description: model.description,
            images: model.images,
            category: model.category.parse().map_err(|e| corrupt_row("items", e))?,
            size: model.size,
            condition: model.condition.parse().map_err(|e| corrupt_row("items", e))?,
            tags: model.tags,
            uploader_id: UserId::new(model.uploader_id),
            status: model.status.parse().map_err(|e| corrupt_row("items", e))?,
            points_value: model.points_value,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl TryFrom<ItemListingModel> for ItemListing {
    type Error = DomainError;

    fn try_from(model: ItemListingModel) -> Result<Self, Self::Error> {
        let item = Item::try_from(model.item)?;
        Ok(ItemListing {
            uploader: UserSummary {
                id: item.uploader_id,
                name: model.uploader_name,
            },
            item,
        })
    }
}
