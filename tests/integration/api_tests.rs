//! API integration tests
//!
//! These run against a live server with a seeded database and an admin
//! account (admin@readnest.app / admin123!). Several tests touch the shared
//! `max_books_allowed` config, so run single-threaded:
//! cargo test -- --ignored --test-threads=1

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Helper to get an admin bearer token
async fn get_admin_token(client: &Client) -> String {
    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "email": "admin@readnest.app",
            "password": "admin123!"
        }))
        .send()
        .await
        .expect("Failed to send login request");

    let body: Value = response.json().await.expect("Failed to parse login response");
    body["token"].as_str().expect("No token in response").to_string()
}

/// Helper: signup a fresh user and approve them via the admin surface.
/// Returns (email, password, token).
async fn signup_approved_user(client: &Client, admin_token: &str) -> (String, String, String) {
    let nonce = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let email = format!("student{}@university.edu", nonce);
    let password = "reading4life".to_string();

    // Distinct forwarded address per signup keeps the fixed-window rate
    // limiter out of the suite's way
    let response = client
        .post(format!("{}/auth/signup", BASE_URL))
        .header("x-forwarded-for", format!("10.1.{}.{}", nonce % 250, (nonce / 250) % 250))
        .json(&json!({
            "full_name": "Test Student",
            "email": email,
            "university_id": 12345,
            "password": password,
            "university_card": "cards/test.png"
        }))
        .send()
        .await
        .expect("Failed to send signup request");
    assert_eq!(response.status(), 201);

    // Find the pending request and approve it
    let requests: Value = client
        .get(format!("{}/account-requests", BASE_URL))
        .header("Authorization", format!("Bearer {}", admin_token))
        .send()
        .await
        .expect("Failed to list account requests")
        .json()
        .await
        .expect("Failed to parse account requests");

    let user_id = requests
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["email"] == email.as_str())
        .expect("Signup not in pending requests")["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = client
        .post(format!("{}/account-requests/{}/approve", BASE_URL, user_id))
        .header("Authorization", format!("Bearer {}", admin_token))
        .send()
        .await
        .expect("Failed to approve request");
    assert!(response.status().is_success());

    // Login as the approved user
    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({ "email": email, "password": password }))
        .send()
        .await
        .expect("Failed to login as user");
    let body: Value = response.json().await.expect("Failed to parse login response");
    let token = body["token"].as_str().expect("No token").to_string();

    (email, password, token)
}

/// Helper: create a book as admin, returning its id
async fn create_book(client: &Client, admin_token: &str, total_copies: i64) -> String {
    let response = client
        .post(format!("{}/books", BASE_URL))
        .header("Authorization", format!("Bearer {}", admin_token))
        .json(&json!({
            "title": "Integration Test Book",
            "author": "Test Author",
            "genre": "Testing",
            "rating": 4,
            "total_copies": total_copies,
            "description": "A book created by the integration tests",
            "summary": "Testing",
            "cover_url": "https://example.com/cover.jpg",
            "cover_color": "#123456"
        }))
        .send()
        .await
        .expect("Failed to create book");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse book response");
    body["id"].as_str().expect("No book id").to_string()
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "email": "admin@readnest.app",
            "password": "wrong"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], false);
}

#[tokio::test]
#[ignore]
async fn test_unauthorized_access() {
    let client = Client::new();

    let response = client
        .get(format!("{}/books", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_non_admin_cannot_list_users() {
    let client = Client::new();
    let admin_token = get_admin_token(&client).await;
    let (_, _, user_token) = signup_approved_user(&client, &admin_token).await;

    let response = client
        .get(format!("{}/users", BASE_URL))
        .header("Authorization", format!("Bearer {}", user_token))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 403);
}

#[tokio::test]
#[ignore]
async fn test_signup_duplicate_email() {
    let client = Client::new();
    let admin_token = get_admin_token(&client).await;
    let (email, _, _) = signup_approved_user(&client, &admin_token).await;

    let response = client
        .post(format!("{}/auth/signup", BASE_URL))
        .header("x-forwarded-for", "10.2.0.1")
        .json(&json!({
            "full_name": "Another Student",
            "email": email,
            "university_id": 54321,
            "password": "password123",
            "university_card": ""
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_signup_invalid_payload() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/signup", BASE_URL))
        .header("x-forwarded-for", "10.3.0.1")
        .json(&json!({
            "full_name": "X",
            "email": "not-an-email",
            "university_id": 1,
            "password": "short",
            "university_card": ""
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_pending_user_cannot_borrow() {
    let client = Client::new();
    let admin_token = get_admin_token(&client).await;
    let book_id = create_book(&client, &admin_token, 1).await;

    // Signup but do NOT approve
    let nonce = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let email = format!("pending{}@university.edu", nonce);
    let response = client
        .post(format!("{}/auth/signup", BASE_URL))
        .header("x-forwarded-for", format!("10.4.{}.{}", nonce % 250, (nonce / 250) % 250))
        .json(&json!({
            "full_name": "Pending Student",
            "email": email,
            "university_id": 999,
            "password": "reading4life",
            "university_card": ""
        }))
        .send()
        .await
        .expect("Failed to signup");
    assert_eq!(response.status(), 201);

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({ "email": email, "password": "reading4life" }))
        .send()
        .await
        .expect("Failed to login");
    let body: Value = response.json().await.unwrap();
    let token = body["token"].as_str().unwrap();
    let user_id = body["user"]["id"].as_str().unwrap();

    let response = client
        .post(format!("{}/borrows", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "user_id": user_id, "book_id": book_id }))
        .send()
        .await
        .expect("Failed to send borrow request");

    assert_eq!(response.status(), 403);
}

#[tokio::test]
#[ignore]
async fn test_borrow_and_return_cycle() {
    let client = Client::new();
    let admin_token = get_admin_token(&client).await;
    let book_id = create_book(&client, &admin_token, 1).await;
    let (_, _, user_token) = signup_approved_user(&client, &admin_token).await;

    // Who am I?
    let me: Value = client
        .get(format!("{}/auth/me", BASE_URL))
        .header("Authorization", format!("Bearer {}", user_token))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let user_id = me["id"].as_str().unwrap();

    // Borrow the single copy
    let response = client
        .post(format!("{}/borrows", BASE_URL))
        .header("Authorization", format!("Bearer {}", user_token))
        .json(&json!({ "user_id": user_id, "book_id": book_id }))
        .send()
        .await
        .expect("Failed to borrow");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "BORROWED");
    let record_id = body["data"]["id"].as_str().unwrap().to_string();

    // Availability dropped to zero
    let book: Value = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", user_token))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(book["available_copies"], 0);

    // A second borrow of the same book fails for any user: no copies left
    let (_, _, other_token) = signup_approved_user(&client, &admin_token).await;
    let other: Value = client
        .get(format!("{}/auth/me", BASE_URL))
        .header("Authorization", format!("Bearer {}", other_token))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let response = client
        .post(format!("{}/borrows", BASE_URL))
        .header("Authorization", format!("Bearer {}", other_token))
        .json(&json!({ "user_id": other["id"], "book_id": book_id }))
        .send()
        .await
        .expect("Failed to send second borrow");
    assert_eq!(response.status(), 422);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Book is not available for borrowing.");

    // Return it
    let response = client
        .post(format!("{}/borrows/{}/return", BASE_URL, record_id))
        .header("Authorization", format!("Bearer {}", user_token))
        .send()
        .await
        .expect("Failed to return");
    assert!(response.status().is_success());

    // Availability is restored
    let book: Value = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", user_token))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(book["available_copies"], 1);

    // Returning again is rejected, and availability stays put
    let response = client
        .post(format!("{}/borrows/{}/return", BASE_URL, record_id))
        .header("Authorization", format!("Bearer {}", user_token))
        .send()
        .await
        .expect("Failed to send second return");
    assert_eq!(response.status(), 409);

    let book: Value = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", user_token))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(book["available_copies"], 1);

    // Cleanup
    let _ = client
        .delete(format!("{}/books/{}", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", admin_token))
        .send()
        .await;
}

#[tokio::test]
#[ignore]
async fn test_cannot_return_someone_elses_record() {
    let client = Client::new();
    let admin_token = get_admin_token(&client).await;
    let book_id = create_book(&client, &admin_token, 2).await;
    let (_, _, owner_token) = signup_approved_user(&client, &admin_token).await;
    let (_, _, other_token) = signup_approved_user(&client, &admin_token).await;

    let me: Value = client
        .get(format!("{}/auth/me", BASE_URL))
        .header("Authorization", format!("Bearer {}", owner_token))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let owner_id = me["id"].as_str().unwrap();

    let body: Value = client
        .post(format!("{}/borrows", BASE_URL))
        .header("Authorization", format!("Bearer {}", owner_token))
        .json(&json!({ "user_id": owner_id, "book_id": book_id }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let record_id = body["data"]["id"].as_str().unwrap();

    let response = client
        .post(format!("{}/borrows/{}/return", BASE_URL, record_id))
        .header("Authorization", format!("Bearer {}", other_token))
        .send()
        .await
        .expect("Failed to send return");
    assert_eq!(response.status(), 403);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Unauthorized.");

    // Admin may return it on the owner's behalf
    let response = client
        .post(format!("{}/borrows/{}/return", BASE_URL, record_id))
        .header("Authorization", format!("Bearer {}", admin_token))
        .send()
        .await
        .expect("Failed to send admin return");
    assert!(response.status().is_success());

    let _ = client
        .delete(format!("{}/books/{}", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", admin_token))
        .send()
        .await;
}

#[tokio::test]
#[ignore]
async fn test_quota_endpoint_reflects_config() {
    let client = Client::new();
    let admin_token = get_admin_token(&client).await;
    let (_, _, user_token) = signup_approved_user(&client, &admin_token).await;

    // Set quota to 3
    let response = client
        .put(format!("{}/settings", BASE_URL))
        .header("Authorization", format!("Bearer {}", admin_token))
        .json(&json!({ "key": "max_books_allowed", "value": "3" }))
        .send()
        .await
        .expect("Failed to update settings");
    assert!(response.status().is_success());

    let quota: Value = client
        .get(format!("{}/me/quota", BASE_URL))
        .header("Authorization", format!("Bearer {}", user_token))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(quota["max_books"], 3);
    assert_eq!(quota["can_borrow"], true);

    // Restore default
    let _ = client
        .put(format!("{}/settings", BASE_URL))
        .header("Authorization", format!("Bearer {}", admin_token))
        .json(&json!({ "key": "max_books_allowed", "value": "5" }))
        .send()
        .await;
}

#[tokio::test]
#[ignore]
async fn test_borrow_rejected_when_quota_exhausted() {
    let client = Client::new();
    let admin_token = get_admin_token(&client).await;
    let first_book = create_book(&client, &admin_token, 3).await;
    let second_book = create_book(&client, &admin_token, 3).await;
    let (_, _, user_token) = signup_approved_user(&client, &admin_token).await;

    // Quota of one book
    let response = client
        .put(format!("{}/settings", BASE_URL))
        .header("Authorization", format!("Bearer {}", admin_token))
        .json(&json!({ "key": "max_books_allowed", "value": "1" }))
        .send()
        .await
        .expect("Failed to update settings");
    assert!(response.status().is_success());

    let me: Value = client
        .get(format!("{}/auth/me", BASE_URL))
        .header("Authorization", format!("Bearer {}", user_token))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let user_id = me["id"].as_str().unwrap();

    let response = client
        .post(format!("{}/borrows", BASE_URL))
        .header("Authorization", format!("Bearer {}", user_token))
        .json(&json!({ "user_id": user_id, "book_id": first_book }))
        .send()
        .await
        .expect("Failed to borrow");
    assert_eq!(response.status(), 201);

    // Second borrow breaches the quota; the message names the limit
    let response = client
        .post(format!("{}/borrows", BASE_URL))
        .header("Authorization", format!("Bearer {}", user_token))
        .json(&json!({ "user_id": user_id, "book_id": second_book }))
        .send()
        .await
        .expect("Failed to send second borrow");
    assert_eq!(response.status(), 422);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("borrowing limit of 1"));

    // Second book untouched
    let book: Value = client
        .get(format!("{}/books/{}", BASE_URL, second_book))
        .header("Authorization", format!("Bearer {}", user_token))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(book["available_copies"], 3);

    // Restore default and cleanup
    let _ = client
        .put(format!("{}/settings", BASE_URL))
        .header("Authorization", format!("Bearer {}", admin_token))
        .json(&json!({ "key": "max_books_allowed", "value": "5" }))
        .send()
        .await;
    for book_id in [first_book, second_book] {
        let _ = client
            .delete(format!("{}/books/{}", BASE_URL, book_id))
            .header("Authorization", format!("Bearer {}", admin_token))
            .send()
            .await;
    }
}

#[tokio::test]
#[ignore]
async fn test_list_books_with_filters() {
    let client = Client::new();
    let admin_token = get_admin_token(&client).await;

    let response = client
        .get(format!("{}/books?sort_by=highest_rated&per_page=5", BASE_URL))
        .header("Authorization", format!("Bearer {}", admin_token))
        .send()
        .await
        .expect("Failed to list books");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let books = body["books"].as_array().expect("No books array");
    assert!(body["pagination"]["total_books"].is_number());

    let ratings: Vec<i64> = books.iter().map(|b| b["rating"].as_i64().unwrap()).collect();
    let mut sorted = ratings.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(ratings, sorted);
}

#[tokio::test]
#[ignore]
async fn test_imagekit_auth_params() {
    let client = Client::new();

    let response = client
        .get(format!("{}/uploads/imagekit", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    if response.status().is_success() {
        let body: Value = response.json().await.expect("Failed to parse response");
        assert!(body["token"].is_string());
        assert!(body["expire"].is_number());
        assert_eq!(body["signature"].as_str().unwrap().len(), 40);
    }
}
