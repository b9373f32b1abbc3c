//! Admin log entity - append-only record of administrative actions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;
use crate::value_objects::{AdminLogId, ItemId, UserId};

/// Kind of administrative action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminAction {
    AddPoints,
    UpdateItem,
    DeleteItem,
}

impl AdminAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AddPoints => "add_points",
            Self::UpdateItem => "update_item",
            Self::DeleteItem => "delete_item",
        }
    }
}

impl FromStr for AdminAction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add_points" => Ok(Self::AddPoints),
            "update_item" => Ok(Self::UpdateItem),
            "delete_item" => Ok(Self::DeleteItem),
            other => Err(DomainError::ValidationError(format!(
                "unknown admin action: {other}"
            ))),
        }
    }
}

impl fmt::Display for AdminAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored admin log row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminLog {
    pub id: AdminLogId,
    /// Action name; rows written before an action was modelled keep their raw text
    pub action: String,
    pub item_id: Option<ItemId>,
    pub admin_id: Option<UserId>,
    pub details: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields required to record an admin action
#[derive(Debug, Clone)]
pub struct NewAdminLog {
    pub action: AdminAction,
    pub item_id: Option<ItemId>,
    pub admin_id: UserId,
    pub details: Option<String>,
}

impl NewAdminLog {
    pub fn new(action: AdminAction, admin_id: UserId) -> Self {
        Self {
            action,
            item_id: None,
            admin_id,
            details: None,
        }
    }

    #[must_use]
    pub fn item(mut self, item_id: ItemId) -> Self {
        self.item_id = Some(item_id);
        self
    }

    #[must_use]
    pub fn details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}
