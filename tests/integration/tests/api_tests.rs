//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variables: DATABASE_URL, JWT_SECRET
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_json, assert_status, balance_of, check_test_env, create_item, fixtures::*, login_admin,
    register_user, unique_suffix, TestServer,
};
use reqwest::StatusCode;
use serde_json::json;

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert!(response.headers().contains_key("x-request-id"));

    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["checks"]["database"], "healthy");
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_register_user() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();

    let response = server.post("/api/auth/register", &request).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(auth.user.name, request.name);
    assert_eq!(auth.user.points, 100);
    assert!(!auth.user.is_admin);
    assert_eq!(auth.token_type, "Bearer");
    assert!(auth.expires_in > 0);
    assert!(!auth.access_token.is_empty());
    assert!(!auth.refresh_token.is_empty());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();

    server.post("/api/auth/register", &request).await.unwrap();

    // Same address in different case
    let again = RegisterRequest {
        email: request.email.to_uppercase(),
        ..RegisterRequest::unique()
    };
    let response = server.post("/api/auth/register", &again).await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "EMAIL_ALREADY_EXISTS");
}

#[tokio::test]
async fn test_register_validation_errors() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .post(
            "/api/auth/register",
            &json!({ "name": "A", "email": "nope", "password": "123" }),
        )
        .await
        .unwrap();

    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "VALIDATION_ERROR");
    let details = body.error.details.unwrap();
    assert!(details.get("password").is_some());
}

#[tokio::test]
async fn test_login() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let register_req = RegisterRequest::unique();
    server.post("/api/auth/register", &register_req).await.unwrap();

    let login_req = LoginRequest::from_register(&register_req);
    let response = server.post("/api/auth/login", &login_req).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(auth.user.email, register_req.email);
    assert!(!auth.access_token.is_empty());
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let register_req = RegisterRequest::unique();
    server.post("/api/auth/register", &register_req).await.unwrap();

    let wrong_password = LoginRequest {
        email: register_req.email.clone(),
        password: "wrongpass".to_string(),
    };
    let response = server.post("/api/auth/login", &wrong_password).await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(body.error.message, "Invalid credentials");

    let unknown = LoginRequest {
        email: format!("nobody{}@example.com", unique_suffix()),
        password: "wrongpass".to_string(),
    };
    let response = server.post("/api/auth/login", &unknown).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_refresh_token_rotates_session() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = register_user(&server).await.unwrap();

    let body = json!({ "refresh_token": auth.refresh_token });
    let response = server.post("/api/auth/refresh", &body).await.unwrap();
    let refreshed: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_ne!(refreshed.refresh_token, auth.refresh_token);

    // The old pair belongs to a revoked session
    let response = server.post("/api/auth/refresh", &body).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
    let response = server.get_auth("/api/auth/me", &auth.access_token).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let response = server
        .get_auth("/api/auth/me", &refreshed.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_logout_revokes_token() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = register_user(&server).await.unwrap();

    let response = server
        .post_empty_auth("/api/auth/logout", &auth.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.get_auth("/api/auth/me", &auth.access_token).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_logout_all_sessions() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let register_req = RegisterRequest::unique();
    let response = server.post("/api/auth/register", &register_req).await.unwrap();
    let first: AuthResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post("/api/auth/login", &LoginRequest::from_register(&register_req))
        .await
        .unwrap();
    let second: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();

    let response = server
        .post_auth("/api/auth/logout", &first.access_token, &json!({ "all": true }))
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.get_auth("/api/auth/me", &second.access_token).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_me() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = register_user(&server).await.unwrap();

    let response = server.get_auth("/api/auth/me", &auth.access_token).await.unwrap();
    let me: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(me.id, auth.user.id);
    assert_eq!(me.points, 100);
}

#[tokio::test]
async fn test_unauthorized_access() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/api/auth/me").await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(body.error.code, "MISSING_AUTHORIZATION");

    let response = server.get_auth("/api/auth/me", "invalid-token").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Item Tests
// ============================================================================

#[tokio::test]
async fn test_create_and_get_item() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = register_user(&server).await.unwrap();

    let item = create_item(&server, &auth.access_token, "Striped Tee", 40)
        .await
        .unwrap();
    assert_eq!(item.status, "available");
    assert_eq!(item.points_value, 40);
    assert_eq!(item.uploader_id, auth.user.id);
    assert_eq!(item.tags, vec!["cotton", "summer"]);

    let response = server.get(&format!("/api/items/{}", item.id)).await.unwrap();
    let fetched: ItemResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.title, "Striped Tee");
    assert_eq!(fetched.category, "tops");
    assert_eq!(fetched.condition, "good");
    assert_eq!(fetched.uploader.unwrap().name, auth.user.name);
}

#[tokio::test]
async fn test_create_item_default_points_and_csv_tags() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = register_user(&server).await.unwrap();

    let body = json!({
        "title": "Rain Jacket",
        "category": "outerwear",
        "condition": "like-new",
        "tags": "waterproof, hiking",
    });
    let response = server
        .post_auth("/api/items", &auth.access_token, &body)
        .await
        .unwrap();
    let item: ItemResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(item.points_value, 50);
    assert_eq!(item.tags, vec!["waterproof", "hiking"]);
}

#[tokio::test]
async fn test_create_item_validation() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = register_user(&server).await.unwrap();

    let response = server
        .post_auth("/api/items", &auth.access_token, &item_body("Hat", 5))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server.post("/api/items", &item_body("No Token", 50)).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_get_missing_item() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/api/items/999999999").await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(body.error.code, "UNKNOWN_ITEM");

    let response = server.get("/api/items/not-a-number").await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_list_items_search_and_paging() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = register_user(&server).await.unwrap();
    let marker = format!("Marker{}", unique_suffix());

    for n in 0..3 {
        create_item(&server, &auth.access_token, &format!("{marker} {n}"), 20)
            .await
            .unwrap();
    }

    let response = server
        .get(&format!("/api/items?search={marker}&limit=2"))
        .await
        .unwrap();
    let page: ItemPage = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.total, 3);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.current_page, 1);
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0].title, format!("{marker} 2"));

    let response = server
        .get(&format!("/api/items?search={marker}&limit=2&page=2"))
        .await
        .unwrap();
    let page: ItemPage = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.items.len(), 1);

    let response = server.get("/api/items?category=hats").await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_featured_items() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = register_user(&server).await.unwrap();
    create_item(&server, &auth.access_token, "Fresh Listing", 20)
        .await
        .unwrap();

    let response = server.get("/api/items/featured").await.unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    let newest = body["newest"].as_array().unwrap();
    assert!(!newest.is_empty() && newest.len() <= 3);
    assert!(body["popular"].as_array().unwrap().len() <= 3);
}

#[tokio::test]
async fn test_my_items() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = register_user(&server).await.unwrap();
    create_item(&server, &auth.access_token, "First Piece", 20)
        .await
        .unwrap();
    create_item(&server, &auth.access_token, "Second Piece", 20)
        .await
        .unwrap();

    let response = server
        .get_auth("/api/items/user/items", &auth.access_token)
        .await
        .unwrap();
    let items: Vec<ItemResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    let titles: Vec<_> = items.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, ["Second Piece", "First Piece"]);
}

#[tokio::test]
async fn test_update_and_delete_item_permissions() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let owner = register_user(&server).await.unwrap();
    let stranger = register_user(&server).await.unwrap();
    let item = create_item(&server, &owner.access_token, "Wool Coat", 120)
        .await
        .unwrap();
    let path = format!("/api/items/{}", item.id);

    let response = server
        .put_auth(&path, &stranger.access_token, &json!({ "title": "Mine" }))
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server.delete_auth(&path, &stranger.access_token).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .put_auth(
            &path,
            &owner.access_token,
            &json!({ "title": "Wool Coat (long)", "points_value": 150 }),
        )
        .await
        .unwrap();
    let updated: ItemResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.title, "Wool Coat (long)");
    assert_eq!(updated.points_value, 150);
    assert_eq!(updated.description.as_deref(), Some("Gently worn"));

    let response = server.delete_auth(&path, &owner.access_token).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.get(&path).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Points Tests
// ============================================================================

#[tokio::test]
async fn test_redeem_item() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let owner = register_user(&server).await.unwrap();
    let buyer = register_user(&server).await.unwrap();
    let item = create_item(&server, &owner.access_token, "Canvas Tote", 40)
        .await
        .unwrap();

    let response = server
        .post_empty_auth(&format!("/api/items/{}/redeem", item.id), &buyer.access_token)
        .await
        .unwrap();
    let result: RedemptionResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(result.item_id, item.id);
    assert_eq!(result.points_spent, 40);
    assert_eq!(result.remaining_points, 60);

    assert_eq!(balance_of(&server, &buyer.access_token).await.unwrap(), 60);
    assert_eq!(balance_of(&server, &owner.access_token).await.unwrap(), 140);

    let response = server.get(&format!("/api/items/{}", item.id)).await.unwrap();
    let fetched: ItemResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.status, "swapped");

    let response = server
        .get_auth("/api/points/transactions", &buyer.access_token)
        .await
        .unwrap();
    let rows: Vec<TransactionResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].amount, -40);
    assert_eq!(rows[0].reason, "Redeemed item: Canvas Tote");
    assert_eq!(rows[0].item_id, Some(item.id));

    // Second buyer via the points path sees the item as gone
    let late = register_user(&server).await.unwrap();
    let response = server
        .post_empty_auth(
            &format!("/api/points/items/{}/redeem", item.id),
            &late.access_token,
        )
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "ITEM_NOT_AVAILABLE");

    let response = server
        .post_empty_auth(
            &format!("/api/items/{}/redeem-equivalent", item.id),
            &late.access_token,
        )
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "ITEM_NOT_AVAILABLE");
}

#[tokio::test]
async fn test_redeem_insufficient_points() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let owner = register_user(&server).await.unwrap();
    let buyer = register_user(&server).await.unwrap();
    let item = create_item(&server, &owner.access_token, "Designer Boots", 300)
        .await
        .unwrap();

    let response = server
        .post_empty_auth(&format!("/api/items/{}/redeem", item.id), &buyer.access_token)
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "INSUFFICIENT_POINTS");
    let details = body.error.details.unwrap();
    assert_eq!(details["required"], 300);
    assert_eq!(details["available"], 100);

    assert_eq!(balance_of(&server, &buyer.access_token).await.unwrap(), 100);
    assert_eq!(balance_of(&server, &owner.access_token).await.unwrap(), 100);
}

#[tokio::test]
async fn test_redeem_own_item() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let owner = register_user(&server).await.unwrap();
    let item = create_item(&server, &owner.access_token, "My Own Scarf", 20)
        .await
        .unwrap();

    let response = server
        .post_empty_auth(&format!("/api/items/{}/redeem", item.id), &owner.access_token)
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "CANNOT_REDEEM_OWN_ITEM");
}

#[tokio::test]
async fn test_leaderboard() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = register_user(&server).await.unwrap();

    let response = server
        .get_auth("/api/points/leaderboard", &auth.access_token)
        .await
        .unwrap();
    let board: Vec<serde_json::Value> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!board.is_empty() && board.len() <= 10);
    let points: Vec<i64> = board.iter().filter_map(|u| u["points"].as_i64()).collect();
    assert!(points.windows(2).all(|w| w[0] >= w[1]));
}

// ============================================================================
// Swap Tests
// ============================================================================

#[tokio::test]
async fn test_swap_approve_and_complete() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let owner = register_user(&server).await.unwrap();
    let requester = register_user(&server).await.unwrap();
    let item = create_item(&server, &owner.access_token, "Denim Jacket", 50)
        .await
        .unwrap();

    let response = server
        .post_empty_auth(
            &format!("/api/swaps/items/{}/request", item.id),
            &requester.access_token,
        )
        .await
        .unwrap();
    let request: SwapRequestResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(request.status, "pending");
    assert_eq!(request.item_id, item.id);
    assert_eq!(request.requester_id, requester.user.id);

    // Completing before approval is refused
    let complete_path = format!("/api/swaps/requests/{}/complete", request.id);
    let response = server
        .put_empty_auth(&complete_path, &owner.access_token)
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.message, "Swap request must be approved first");

    // Only the owner approves
    let approve_path = format!("/api/swaps/requests/{}/approve", request.id);
    let response = server
        .put_empty_auth(&approve_path, &requester.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .put_empty_auth(&approve_path, &owner.access_token)
        .await
        .unwrap();
    let approved: SwapRequestResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(approved.status, "approved");

    assert_eq!(balance_of(&server, &owner.access_token).await.unwrap(), 150);
    assert_eq!(balance_of(&server, &requester.access_token).await.unwrap(), 150);

    let response = server.get(&format!("/api/items/{}", item.id)).await.unwrap();
    let fetched: ItemResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.status, "swapped");

    let response = server
        .put_empty_auth(&complete_path, &requester.access_token)
        .await
        .unwrap();
    let completed: SwapRequestResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(completed.status, "completed");
}

#[tokio::test]
async fn test_swap_reject_leaves_state() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let owner = register_user(&server).await.unwrap();
    let requester = register_user(&server).await.unwrap();
    let item = create_item(&server, &owner.access_token, "Linen Shirt", 50)
        .await
        .unwrap();

    let response = server
        .post_empty_auth(
            &format!("/api/swaps/items/{}/request", item.id),
            &requester.access_token,
        )
        .await
        .unwrap();
    let request: SwapRequestResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .put_empty_auth(
            &format!("/api/swaps/requests/{}/reject", request.id),
            &owner.access_token,
        )
        .await
        .unwrap();
    let rejected: SwapRequestResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(rejected.status, "rejected");

    assert_eq!(balance_of(&server, &owner.access_token).await.unwrap(), 100);
    assert_eq!(balance_of(&server, &requester.access_token).await.unwrap(), 100);

    let response = server.get(&format!("/api/items/{}", item.id)).await.unwrap();
    let fetched: ItemResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.status, "available");
}

#[tokio::test]
async fn test_swap_request_rules() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let owner = register_user(&server).await.unwrap();
    let requester = register_user(&server).await.unwrap();
    let item = create_item(&server, &owner.access_token, "Silk Blouse", 60)
        .await
        .unwrap();
    let path = format!("/api/swaps/items/{}/request", item.id);

    let response = server.post_empty_auth(&path, &owner.access_token).await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "CANNOT_SWAP_OWN_ITEM");

    let response = server
        .post_empty_auth(&path, &requester.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post_empty_auth(&path, &requester.access_token)
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "DUPLICATE_SWAP_REQUEST");

    let response = server
        .post_empty_auth("/api/swaps/items/999999999/request", &requester.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_swap_request_listings() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let owner = register_user(&server).await.unwrap();
    let requester = register_user(&server).await.unwrap();
    let item = create_item(&server, &owner.access_token, "Corduroy Pants", 70)
        .await
        .unwrap();

    server
        .post_empty_auth(
            &format!("/api/swaps/items/{}/request", item.id),
            &requester.access_token,
        )
        .await
        .unwrap();

    let response = server
        .get_auth("/api/swaps/user/requests", &requester.access_token)
        .await
        .unwrap();
    let outgoing: Vec<serde_json::Value> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(outgoing.len(), 1);
    assert_eq!(outgoing[0]["status"], "pending");
    assert_eq!(outgoing[0]["item"]["title"], "Corduroy Pants");
    assert_eq!(outgoing[0]["item"]["uploader"]["id"], owner.user.id);

    let response = server
        .get_auth("/api/swaps/user/pending-requests", &owner.access_token)
        .await
        .unwrap();
    let incoming: Vec<serde_json::Value> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(incoming.len(), 1);
    assert_eq!(incoming[0]["requester"]["name"], requester.user.name);
    assert_eq!(incoming[0]["item"]["id"], item.id);
}

// ============================================================================
// Admin Tests
// ============================================================================

#[tokio::test]
async fn test_admin_add_points_and_logs() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = login_admin(&server).await.unwrap();
    assert!(admin.user.is_admin);
    let user = register_user(&server).await.unwrap();

    let body = json!({ "user_id": user.user.id, "amount": 25, "reason": "Welcome bonus" });
    let response = server
        .post_auth("/api/points/admin/add-points", &admin.access_token, &body)
        .await
        .unwrap();
    let result: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(result["user"]["points"], 125);
    assert_eq!(result["transaction"]["amount"], 25);
    assert_eq!(result["transaction"]["reason"], "Welcome bonus");

    assert_eq!(balance_of(&server, &user.access_token).await.unwrap(), 125);

    let response = server
        .get_auth("/api/admin/logs?limit=5", &admin.access_token)
        .await
        .unwrap();
    let logs: Vec<serde_json::Value> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(logs
        .iter()
        .any(|l| l["action"] == "add_points" && l["admin_id"] == admin.user.id));
}

#[tokio::test]
async fn test_admin_routes_require_admin() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let user = register_user(&server).await.unwrap();

    let body = json!({ "user_id": user.user.id, "amount": 1000, "reason": "Self grant" });
    let response = server
        .post_auth("/api/points/admin/add-points", &user.access_token, &body)
        .await
        .unwrap();
    let err: ErrorBody = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(err.error.code, "ADMIN_REQUIRED");

    let response = server
        .get_auth("/api/admin/logs", &user.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    assert_eq!(balance_of(&server, &user.access_token).await.unwrap(), 100);
}

#[tokio::test]
async fn test_admin_moderates_item() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = login_admin(&server).await.unwrap();
    let owner = register_user(&server).await.unwrap();
    let item = create_item(&server, &owner.access_token, "Questionable Listing", 20)
        .await
        .unwrap();

    let response = server
        .delete_auth(&format!("/api/items/{}", item.id), &admin.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server
        .get_auth("/api/admin/logs", &admin.access_token)
        .await
        .unwrap();
    let logs: Vec<serde_json::Value> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(logs.iter().any(|l| l["action"] == "delete_item"
        && l["details"]
            .as_str()
            .is_some_and(|d| d.contains("Questionable Listing"))));
}
