//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance with the application schema
//! - Environment variables: DATABASE_URL, DISCORD_BOT_TOKEN, API_PORT
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{assert_status, check_test_env, TestServer};
use reqwest::StatusCode;
use serde_json::{json, Value};

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Sync Status Tests
// ============================================================================

#[tokio::test]
async fn test_sync_status_unknown_guild_is_404() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .get("/api/v1/admin/guilds/never-synced-guild/sync")
        .await
        .expect("Request failed");
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Member Directory Tests
// ============================================================================

#[tokio::test]
async fn test_list_members_empty_guild() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .get("/api/v1/admin/guilds/never-synced-guild/members")
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
    assert_eq!(body["pagination"]["total"], 0);
}

#[tokio::test]
async fn test_list_members_rejects_negative_skip() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .get("/api/v1/admin/guilds/g/members?skip=-5")
        .await
        .expect("Request failed");
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_link_member_rejects_malformed_body() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .put(
            "/api/v1/admin/guilds/g/members/1/link",
            &json!({ "user_id": "not-a-uuid" }),
        )
        .await
        .expect("Request failed");
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_unlink_unknown_member_is_404() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .delete("/api/v1/admin/guilds/g/members/no-such-member/link")
        .await
        .expect("Request failed");
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}
