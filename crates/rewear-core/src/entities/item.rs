//! Item entity - a listed garment and the rules for exchanging it

use chrono::{DateTime, Utc};

use crate::entities::{LedgerEntry, User, UserSummary};
use crate::error::DomainError;
use crate::value_objects::{ItemCategory, ItemCondition, ItemId, ItemStatus, UserId};

/// Listed garment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    pub description: Option<String>,
    pub images: Vec<String>,
    pub category: ItemCategory,
    pub size: Option<String>,
    pub condition: ItemCondition,
    pub tags: Vec<String>,
    pub uploader_id: UserId,
    pub status: ItemStatus,
    pub points_value: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// Points value when the lister does not set one
    pub const DEFAULT_POINTS_VALUE: i32 = 50;
    pub const MIN_POINTS_VALUE: i32 = 10;
    pub const MAX_POINTS_VALUE: i32 = 500;
    pub const MIN_TITLE_LEN: usize = 3;
    pub const MAX_TITLE_LEN: usize = 255;

    /// Reject points values outside the allowed range
    pub fn validate_points_value(value: i32) -> Result<i32, DomainError> {
        if (Self::MIN_POINTS_VALUE..=Self::MAX_POINTS_VALUE).contains(&value) {
            Ok(value)
        } else {
            Err(DomainError::PointsOutOfRange {
                min: Self::MIN_POINTS_VALUE,
                max: Self::MAX_POINTS_VALUE,
            })
        }
    }

    /// Trim a title and check its length
    pub fn normalize_title(title: &str) -> Result<String, DomainError> {
        let title = title.trim();
        let len = title.chars().count();
        if (Self::MIN_TITLE_LEN..=Self::MAX_TITLE_LEN).contains(&len) {
            Ok(title.to_string())
        } else {
            Err(DomainError::ValidationError(format!(
                "Title must be between {} and {} characters",
                Self::MIN_TITLE_LEN,
                Self::MAX_TITLE_LEN
            )))
        }
    }

    #[inline]
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.uploader_id == user_id
    }

    #[inline]
    pub fn is_available(&self) -> bool {
        self.status == ItemStatus::Available
    }

    /// Owners and admins may edit or delete an item
    pub fn can_be_managed_by(&self, user: &User) -> bool {
        user.is_admin || self.is_owned_by(user.id)
    }

    /// Check that `requester` may open a swap request on this item
    pub fn ensure_swappable_by(&self, requester: UserId) -> Result<(), DomainError> {
        if !self.is_available() {
            return Err(DomainError::ItemNotAvailable);
        }
        if self.is_owned_by(requester) {
            return Err(DomainError::CannotSwapOwnItem);
        }
        Ok(())
    }

    /// Plan a points redemption of this item by `buyer`
    ///
    /// Returns the buyer debit followed by the owner credit. Ownership is
    /// checked before the balance, so redeeming one's own item fails the same
    /// way whatever the balance.
    pub fn plan_redemption(&self, buyer: &User) -> Result<[LedgerEntry; 2], DomainError> {
        if !self.is_available() {
            return Err(DomainError::ItemNotAvailable);
        }
        if self.is_owned_by(buyer.id) {
            return Err(DomainError::CannotRedeemOwnItem);
        }
        if !buyer.can_afford(self.points_value) {
            return Err(DomainError::InsufficientPoints {
                required: self.points_value,
                available: buyer.points,
            });
        }

        Ok([
            LedgerEntry::new(
                buyer.id,
                -self.points_value,
                format!("Redeemed item: {}", self.title),
            )
            .for_item(self.id),
            LedgerEntry::new(
                self.uploader_id,
                self.points_value,
                format!("Item redeemed: {}", self.title),
            )
            .for_item(self.id),
        ])
    }

    /// Mark the item as exchanged
    pub fn mark_swapped(&mut self) {
        self.status = ItemStatus::Swapped;
        self.updated_at = Utc::now();
    }

    /// Apply a partial update
    pub fn apply(&mut self, changes: ItemChanges) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(description) = changes.description {
            self.description = Some(description);
        }
        if let Some(images) = changes.images {
            self.images = images;
        }
        if let Some(category) = changes.category {
            self.category = category;
        }
        if let Some(size) = changes.size {
            self.size = Some(size);
        }
        if let Some(condition) = changes.condition {
            self.condition = condition;
        }
        if let Some(tags) = changes.tags {
            self.tags = tags;
        }
        if let Some(points_value) = changes.points_value {
            self.points_value = points_value;
        }
        self.updated_at = Utc::now();
    }
}

/// Fields required to insert an item
#[derive(Debug, Clone)]
pub struct NewItem {
    pub title: String,
    pub description: Option<String>,
    pub images: Vec<String>,
    pub category: ItemCategory,
    pub size: Option<String>,
    pub condition: ItemCondition,
    pub tags: Vec<String>,
    pub uploader_id: UserId,
    pub points_value: i32,
}

/// Partial update of an item; `None` leaves a field unchanged
#[derive(Debug, Clone, Default)]
pub struct ItemChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub images: Option<Vec<String>>,
    pub category: Option<ItemCategory>,
    pub size: Option<String>,
    pub condition: Option<ItemCondition>,
    pub tags: Option<Vec<String>>,
    pub points_value: Option<i32>,
}

impl ItemChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.images.is_none()
            && self.category.is_none()
            && self.size.is_none()
            && self.condition.is_none()
            && self.tags.is_none()
            && self.points_value.is_none()
    }
}

/// An item together with its uploader's public name tag
#[derive(Debug, Clone)]
pub struct ItemListing {
    pub item: Item,
    pub uploader: UserSummary,
}

/// Filters and paging for the item browse query
#[derive(Debug, Clone)]
pub struct ItemQuery {
    /// 1-based page number
    pub page: u32,
    pub limit: u32,
    pub status: ItemStatus,
    pub category: Option<ItemCategory>,
    /// Case-insensitive substring of title or description, or an exact tag
    pub search: Option<String>,
}

impl ItemQuery {
    pub const DEFAULT_LIMIT: u32 = 12;
    pub const MAX_LIMIT: u32 = 100;

    /// Build a query, clamping page and limit into range
    pub fn new(page: Option<u32>, limit: Option<u32>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            limit: limit
                .unwrap_or(Self::DEFAULT_LIMIT)
                .clamp(1, Self::MAX_LIMIT),
            status: ItemStatus::Available,
            category: None,
            search: None,
        }
    }

    #[inline]
    pub fn offset(&self) -> i64 {
        i64::from(self.page - 1) * i64::from(self.limit)
    }

    /// Number of pages needed to show `total` rows
    pub fn total_pages(&self, total: i64) -> i64 {
        let limit = i64::from(self.limit);
        (total + limit - 1) / limit
    }
}

impl Default for ItemQuery {
    fn default() -> Self {
        Self::new(None, None)
    }
}
