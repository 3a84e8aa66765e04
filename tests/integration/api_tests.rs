//! API integration tests
//!
//! These run against a live server backed by a migrated database:
//! `cargo test -- --ignored`

use std::time::{SystemTime, UNIX_EPOCH};

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:3000";

/// Suffix that keeps usernames and titles unique across runs
fn unique(prefix: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Clock before epoch")
        .as_nanos();
    format!("{}-{}", prefix, nanos)
}

/// Register a fresh member with password "secret", returning the username
async fn register(client: &Client, prefix: &str) -> String {
    let username = unique(prefix);

    let response = client
        .post(format!("{}/api/register", BASE_URL))
        .json(&json!({
            "username": username,
            "password": "secret",
            "fullName": format!("{} Tester", prefix)
        }))
        .send()
        .await
        .expect("Failed to send register request");
    assert!(response.status().is_success());

    username
}

/// Register a member and log in, returning the member id
async fn register_and_login(client: &Client, prefix: &str) -> i64 {
    let username = register(client, prefix).await;

    let response = client
        .post(format!("{}/api/login", BASE_URL))
        .json(&json!({ "username": username, "password": "secret" }))
        .send()
        .await
        .expect("Failed to send login request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse login response");
    body["user"]["id"].as_i64().expect("No member id in login response")
}

/// Add a book and return its row as listed by the catalog
async fn add_book(client: &Client, title: &str) -> Value {
    let response = client
        .post(format!("{}/api/books", BASE_URL))
        .json(&json!({ "title": title, "author": "Herbert", "cover_url": "url1" }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    find_book(client, title).await.expect("Added book not listed")
}

async fn find_book(client: &Client, title: &str) -> Option<Value> {
    let books: Value = client
        .get(format!("{}/api/books", BASE_URL))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    books
        .as_array()
        .expect("Books is not an array")
        .iter()
        .find(|b| b["title"] == title)
        .cloned()
}

async fn post_loan(client: &Client, action: &str, member_id: i64, book_id: i64) -> reqwest::Response {
    client
        .post(format!("{}/api/{}", BASE_URL, action))
        .json(&json!({ "member_id": member_id, "book_id": book_id }))
        .send()
        .await
        .expect("Failed to send request")
}

async fn get_json(client: &Client, path: &str) -> Value {
    client
        .get(format!("{}{}", BASE_URL, path))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let body = get_json(&client, "/health").await;
    assert_eq!(body["status"], "healthy");

    let body = get_json(&client, "/ready").await;
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
#[ignore]
async fn test_login_returns_member_identity() {
    let client = Client::new();
    let username = unique("login");

    client
        .post(format!("{}/api/register", BASE_URL))
        .json(&json!({ "username": username, "password": "pw", "fullName": "Malee Sukjai" }))
        .send()
        .await
        .expect("Failed to send request");

    let response = client
        .post(format!("{}/api/login", BASE_URL))
        .json(&json!({ "username": username, "password": "pw" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["name"], "Malee Sukjai");
    assert_eq!(body["user"]["role"], "user");
    assert!(body["user"]["id"].is_number());
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let client = Client::new();
    let username = register(&client, "badpw").await;
    let unknown = unique("nobody");

    for (username, password) in [(unknown.as_str(), "secret"), (username.as_str(), "Secret")] {
        let response = client
            .post(format!("{}/api/login", BASE_URL))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Failed to send request");

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body["success"], false);
        assert!(body["message"].is_string());
        assert!(body.get("user").is_none());
    }
}

#[tokio::test]
#[ignore]
async fn test_register_validation_and_duplicates() {
    let client = Client::new();
    let username = unique("dup");

    let response = client
        .post(format!("{}/api/register", BASE_URL))
        .json(&json!({ "username": username, "password": "", "fullName": "X" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let register = || {
        client
            .post(format!("{}/api/register", BASE_URL))
            .json(&json!({ "username": username, "password": "pw", "fullName": "First" }))
            .send()
    };

    let first = register().await.expect("Failed to send request");
    assert_eq!(first.status(), StatusCode::OK);

    let second = register().await.expect("Failed to send request");
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
    let body: Value = second.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], false);
}

#[tokio::test]
#[ignore]
async fn test_members_list_hides_passwords() {
    let client = Client::new();
    let member_id = register_and_login(&client, "listed").await;

    let members = get_json(&client, "/api/members").await;
    let members = members.as_array().expect("Members is not an array");

    let ids: Vec<i64> = members.iter().filter_map(|m| m["member_id"].as_i64()).collect();
    assert!(ids.contains(&member_id));
    assert!(ids.windows(2).all(|w| w[0] > w[1]));
    assert!(members.iter().all(|m| m.get("password").is_none()));
}

#[tokio::test]
#[ignore]
async fn test_add_book_is_listed_as_available() {
    let client = Client::new();
    let title = unique("Dune");

    let book = add_book(&client, &title).await;
    assert_eq!(book["author"], "Herbert");
    assert_eq!(book["cover_url"], "url1");
    assert_eq!(book["status"], "available");
}

#[tokio::test]
#[ignore]
async fn test_borrow_and_return_cycle() {
    let client = Client::new();
    let member_id = register_and_login(&client, "borrower").await;
    let title = unique("Foundation");
    let book_id = add_book(&client, &title).await["book_id"]
        .as_i64()
        .expect("No book id");

    let response = post_loan(&client, "borrow", member_id, book_id).await;
    assert_eq!(response.status(), StatusCode::OK);

    let book = find_book(&client, &title).await.expect("Book missing");
    assert_eq!(book["status"], "borrowed");

    let active = get_json(&client, &format!("/api/borrowed/{}", member_id)).await;
    let active = active.as_array().expect("Not an array");
    assert_eq!(active.len(), 1);
    assert_eq!(active[0]["book_id"], book_id);
    assert_eq!(active[0]["title"], title.as_str());

    let outstanding = get_json(&client, "/api/borrowed-all").await;
    assert!(outstanding
        .as_array()
        .expect("Not an array")
        .iter()
        .any(|row| row["title"] == title.as_str() && row["full_name"] == "borrower Tester"));

    let response = post_loan(&client, "return", member_id, book_id).await;
    assert_eq!(response.status(), StatusCode::OK);

    let book = find_book(&client, &title).await.expect("Book missing");
    assert_eq!(book["status"], "available");

    let active = get_json(&client, &format!("/api/borrowed/{}", member_id)).await;
    assert!(active.as_array().expect("Not an array").is_empty());

    let history = get_json(&client, &format!("/api/history/{}", member_id)).await;
    let history = history.as_array().expect("Not an array");
    assert_eq!(history.len(), 1);
    assert!(history[0]["return_date"].is_string());
}

#[tokio::test]
#[ignore]
async fn test_second_borrow_of_same_book_is_rejected() {
    let client = Client::new();
    let first = register_and_login(&client, "first").await;
    let second = register_and_login(&client, "second").await;
    let title = unique("Hyperion");
    let book_id = add_book(&client, &title).await["book_id"]
        .as_i64()
        .expect("No book id");

    let response = post_loan(&client, "borrow", first, book_id).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post_loan(&client, "borrow", second, book_id).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], false);

    let active = get_json(&client, &format!("/api/borrowed/{}", second)).await;
    assert!(active.as_array().expect("Not an array").is_empty());
}

#[tokio::test]
#[ignore]
async fn test_borrow_unknown_book_or_member() {
    let client = Client::new();
    let member_id = register_and_login(&client, "ghost").await;

    let response = post_loan(&client, "borrow", member_id, i32::MAX as i64).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let title = unique("Solaris");
    let book_id = add_book(&client, &title).await["book_id"]
        .as_i64()
        .expect("No book id");

    let response = post_loan(&client, "borrow", i32::MAX as i64, book_id).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // The failed borrow left the book untouched
    let book = find_book(&client, &title).await.expect("Book missing");
    assert_eq!(book["status"], "available");
}

#[tokio::test]
#[ignore]
async fn test_return_without_open_borrow_still_succeeds() {
    let client = Client::new();
    let member_id = register_and_login(&client, "returner").await;
    let title = unique("Neuromancer");
    let book_id = add_book(&client, &title).await["book_id"]
        .as_i64()
        .expect("No book id");

    let response = post_loan(&client, "return", member_id, book_id).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], true);
}

#[tokio::test]
#[ignore]
async fn test_history_is_most_recent_first() {
    let client = Client::new();
    let member_id = register_and_login(&client, "reader").await;

    for name in ["Ubik", "Valis"] {
        let title = unique(name);
        let book_id = add_book(&client, &title).await["book_id"]
            .as_i64()
            .expect("No book id");
        assert_eq!(post_loan(&client, "borrow", member_id, book_id).await.status(), StatusCode::OK);
    }

    let history = get_json(&client, &format!("/api/history/{}", member_id)).await;
    let history = history.as_array().expect("Not an array");
    assert_eq!(history.len(), 2);
    assert!(history[0]["title"].as_str().unwrap_or_default().starts_with("Valis"));
    assert!(history[1]["title"].as_str().unwrap_or_default().starts_with("Ubik"));
    assert!(history.iter().all(|h| h["return_date"].is_null()));
}
