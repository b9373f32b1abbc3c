//! Test fixtures and data generators
//!
//! Request bodies, response shapes and setup shortcuts shared by the API tests.

use anyhow::Result;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::helpers::{assert_json, TestServer, ADMIN_PASSWORD};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data, distinct across test runs
pub fn unique_suffix() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_nanos());
    format!("{nanos}{}", COUNTER.fetch_add(1, Ordering::SeqCst))
}

// ============================================================================
// Requests
// ============================================================================

/// Registration request
#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            name: format!("Tester {suffix}"),
            email: format!("test{suffix}@example.com"),
            password: "TestPass123".to_string(),
        }
    }
}

/// Login request
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_register(reg: &RegisterRequest) -> Self {
        Self {
            email: reg.email.clone(),
            password: reg.password.clone(),
        }
    }
}

/// Body for `POST /api/items`
pub fn item_body(title: &str, points_value: i32) -> serde_json::Value {
    json!({
        "title": title,
        "description": "Gently worn",
        "images": ["/uploads/item.jpg"],
        "category": "tops",
        "size": "M",
        "condition": "good",
        "tags": ["cotton", "summer"],
        "points_value": points_value,
    })
}

// ============================================================================
// Responses
// ============================================================================

/// Auth response
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: UserResponse,
}

/// User profile
#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub points: i32,
    pub is_admin: bool,
}

/// Item uploader
#[derive(Debug, Deserialize)]
pub struct UploaderResponse {
    pub id: i64,
    pub name: String,
}

/// Item
#[derive(Debug, Deserialize)]
pub struct ItemResponse {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub condition: String,
    pub tags: Vec<String>,
    pub uploader_id: i64,
    pub status: String,
    pub points_value: i32,
    pub uploader: Option<UploaderResponse>,
}

/// Paginated item list
#[derive(Debug, Deserialize)]
pub struct ItemPage {
    pub items: Vec<ItemResponse>,
    pub total: i64,
    pub current_page: u32,
    pub total_pages: i64,
}

/// Swap request
#[derive(Debug, Deserialize)]
pub struct SwapRequestResponse {
    pub id: i64,
    pub item_id: i64,
    pub requester_id: i64,
    pub status: String,
}

/// Points balance
#[derive(Debug, Deserialize)]
pub struct BalanceResponse {
    pub points: i32,
}

/// Redemption result
#[derive(Debug, Deserialize)]
pub struct RedemptionResponse {
    pub item_id: i64,
    pub points_spent: i32,
    pub remaining_points: i32,
}

/// Ledger row
#[derive(Debug, Deserialize)]
pub struct TransactionResponse {
    pub amount: i32,
    pub reason: String,
    pub item_id: Option<i64>,
}

/// Error envelope
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

// ============================================================================
// Setup shortcuts
// ============================================================================

/// Register a fresh user
pub async fn register_user(server: &TestServer) -> Result<AuthResponse> {
    let response = server
        .post("/api/auth/register", &RegisterRequest::unique())
        .await?;
    assert_json(response, StatusCode::CREATED).await
}

/// Log in as the bootstrapped admin
pub async fn login_admin(server: &TestServer) -> Result<AuthResponse> {
    let response = server
        .post(
            "/api/auth/login",
            &LoginRequest {
                email: server.admin_email.clone(),
                password: ADMIN_PASSWORD.to_string(),
            },
        )
        .await?;
    assert_json(response, StatusCode::OK).await
}

/// List an item for the token's owner
pub async fn create_item(
    server: &TestServer,
    token: &str,
    title: &str,
    points_value: i32,
) -> Result<ItemResponse> {
    let response = server
        .post_auth("/api/items", token, &item_body(title, points_value))
        .await?;
    assert_json(response, StatusCode::CREATED).await
}

/// Current balance of the token's owner
pub async fn balance_of(server: &TestServer, token: &str) -> Result<i32> {
    let response = server.get_auth("/api/points/balance", token).await?;
    let balance: BalanceResponse = assert_json(response, StatusCode::OK).await?;
    Ok(balance.points)
}
