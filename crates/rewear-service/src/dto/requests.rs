//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use rewear_core::{ItemCategory, ItemCondition, UserId};
use serde::{Deserialize, Deserializer};
use validator::Validate;

// ============================================================================
// Auth Requests
// ============================================================================

/// User registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 2, max = 100, message = "Name must be between 2 and 100 characters"))]
    pub name: String,

    #[validate(email(message = "Please provide a valid email"))]
    pub email: String,

    #[validate(length(min = 6, max = 72, message = "Password must be 6-72 characters"))]
    pub password: String,
}

/// User login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Please provide a valid email"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Token refresh request
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// Logout request; `all` ends every session of the caller
#[derive(Debug, Clone, Deserialize, Default)]
pub struct LogoutRequest {
    #[serde(default)]
    pub all: bool,
}

// ============================================================================
// Item Requests
// ============================================================================

/// Browse query for `GET /api/items`
///
/// Filters arrive as raw strings so an empty `category=` means "any".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListItemsQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub category: Option<String>,
    pub search: Option<String>,
    pub status: Option<String>,
}

/// Create item request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateItemRequest {
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 3, max = 255, message = "Title must be between 3 and 255 characters"))]
    pub title: String,

    #[validate(length(max = 1000, message = "Description must be less than 1000 characters"))]
    pub description: Option<String>,

    /// Image URLs
    #[serde(default)]
    pub images: Vec<String>,

    pub category: ItemCategory,

    #[validate(length(max = 50, message = "Size must be less than 50 characters"))]
    pub size: Option<String>,

    pub condition: ItemCondition,

    /// JSON array or comma-separated string
    #[serde(default, deserialize_with = "deserialize_tags")]
    pub tags: Vec<String>,

    #[validate(range(min = 10, max = 500, message = "Points value must be between 10 and 500"))]
    pub points_value: Option<i32>,
}

/// Update item request; absent fields keep their value
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateItemRequest {
    #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
    #[validate(length(min = 3, max = 255, message = "Title must be between 3 and 255 characters"))]
    pub title: Option<String>,

    #[validate(length(max = 1000, message = "Description must be less than 1000 characters"))]
    pub description: Option<String>,

    pub images: Option<Vec<String>>,

    pub category: Option<ItemCategory>,

    #[validate(length(max = 50, message = "Size must be less than 50 characters"))]
    pub size: Option<String>,

    pub condition: Option<ItemCondition>,

    #[serde(default, deserialize_with = "deserialize_optional_tags")]
    pub tags: Option<Vec<String>>,

    #[validate(range(min = 10, max = 500, message = "Points value must be between 10 and 500"))]
    pub points_value: Option<i32>,
}

// ============================================================================
// Points Requests
// ============================================================================

/// Admin balance adjustment; `amount` may be negative
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddPointsRequest {
    pub user_id: UserId,

    #[validate(range(min = -100_000, max = 100_000, message = "Amount must be between -100000 and 100000"))]
    pub amount: i32,

    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 1, max = 255, message = "Reason must be 1-255 characters"))]
    pub reason: String,
}

// ============================================================================
// Field parsing
// ============================================================================

fn deserialize_trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(String::deserialize(deserializer)?.trim().to_string())
}

fn deserialize_optional_trimmed<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.map(|s| s.trim().to_string()))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TagsInput {
    List(Vec<String>),
    Csv(String),
}

impl TagsInput {
    fn into_tags(self) -> Vec<String> {
        let raw: Vec<String> = match self {
            Self::List(tags) => tags,
            Self::Csv(csv) => csv.split(',').map(str::to_string).collect(),
        };
        raw.into_iter()
            .map(|tag| tag.trim().to_string())
            .filter(|tag| !tag.is_empty())
            .collect()
    }
}

fn deserialize_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<TagsInput>::deserialize(deserializer)?
        .map(TagsInput::into_tags)
        .unwrap_or_default())
}

fn deserialize_optional_tags<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<TagsInput>::deserialize(deserializer)?.map(TagsInput::into_tags))
}
