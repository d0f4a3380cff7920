use serde_json::Value;
use warp::http::StatusCode;

use bookrack::routes::routes;
use bookrack::state::AppState;
use bookrack::storage::traits::{BookRecord, BookStore, UserRecord, UserStore};

const TEST_SECRET: &str = "integration-test-signing-key-0123456789";

fn body_json<B: AsRef<[u8]>>(res: &warp::http::Response<B>) -> Value {
    serde_json::from_slice(res.body().as_ref()).unwrap()
}

async fn seed_user(state: &AppState, username: &str, email: &str) -> (String, String) {
    let hash = state.passwords.hash("secret1").unwrap();
    let user = UserRecord::new(
        username.to_string(),
        email.to_string(),
        hash,
        String::new(),
    );
    let id = state.users.create_user(user).await.unwrap();
    let token = state.tokens.issue(&id).unwrap();
    (id, token)
}

/// Seeds one user owning `count` books titled book-1 .. book-count, created
/// in that order. Returns the owner's bearer token.
async fn seed_books(state: &AppState, count: usize) -> String {
    let (id, token) = seed_user(state, "raj", "raj@x.com").await;
    for i in 1..=count {
        let book = BookRecord::new(
            format!("book-{}", i),
            "c".to_string(),
            format!("https://covers.test/{}.jpg", i),
            3.0,
            id.clone(),
        );
        state.books.create_book(book).await.unwrap();
    }
    token
}

fn titles(page: &Value) -> Vec<String> {
    page["books"]
        .as_array()
        .unwrap()
        .iter()
        .map(|book| book["title"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_second_page_holds_ranks_six_to_ten() {
    let state = AppState::in_memory(TEST_SECRET);
    let api = routes(state.clone());
    let token = seed_books(&state, 12).await;

    let res = warp::test::request()
        .method("GET")
        .path("/api/books?page=2&limit=5")
        .header("authorization", format!("Bearer {}", token))
        .reply(&api)
        .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(&res);
    assert_eq!(body["currentPage"], 2);
    assert_eq!(body["totalBooks"], 12);
    assert_eq!(body["totalPages"], 3);
    // Most recent first, so ranks 6-10 are book-7 .. book-3
    assert_eq!(
        titles(&body),
        vec!["book-7", "book-6", "book-5", "book-4", "book-3"]
    );
}

#[tokio::test]
async fn test_all_pages_concatenate_to_every_book_exactly_once() {
    let state = AppState::in_memory(TEST_SECRET);
    let api = routes(state.clone());
    let token = seed_books(&state, 12).await;

    let mut seen = Vec::new();
    for page in 1..=3 {
        let res = warp::test::request()
            .method("GET")
            .path(&format!("/api/books?page={}&limit=5", page))
            .header("authorization", format!("Bearer {}", token))
            .reply(&api)
            .await;
        seen.extend(titles(&body_json(&res)));
    }

    let expected: Vec<String> = (1..=12).rev().map(|i| format!("book-{}", i)).collect();
    assert_eq!(seen, expected);
}

#[tokio::test]
async fn test_page_beyond_the_end_is_empty_and_echoes_the_request() {
    let state = AppState::in_memory(TEST_SECRET);
    let api = routes(state.clone());
    let token = seed_books(&state, 3).await;

    let res = warp::test::request()
        .method("GET")
        .path("/api/books?page=9&limit=5")
        .header("authorization", format!("Bearer {}", token))
        .reply(&api)
        .await;

    let body = body_json(&res);
    assert_eq!(body["currentPage"], 9);
    assert_eq!(body["totalBooks"], 3);
    assert_eq!(body["totalPages"], 1);
    assert!(body["books"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_unparseable_parameters_fall_back_to_defaults() {
    let state = AppState::in_memory(TEST_SECRET);
    let api = routes(state.clone());
    let token = seed_books(&state, 7).await;

    let res = warp::test::request()
        .method("GET")
        .path("/api/books?page=abc&limit=-2")
        .header("authorization", format!("Bearer {}", token))
        .reply(&api)
        .await;

    let body = body_json(&res);
    assert_eq!(body["currentPage"], 1);
    assert_eq!(body["books"].as_array().unwrap().len(), 5);
    assert_eq!(body["totalPages"], 2);
}

#[tokio::test]
async fn test_listing_joins_owner_without_sensitive_fields() {
    let state = AppState::in_memory(TEST_SECRET);
    let api = routes(state.clone());
    let token = seed_books(&state, 1).await;

    let res = warp::test::request()
        .method("GET")
        .path("/api/books")
        .header("authorization", format!("Bearer {}", token))
        .reply(&api)
        .await;

    let body = body_json(&res);
    let owner = &body["books"][0]["user"];
    assert_eq!(owner["username"], "raj");
    assert!(owner["profileImage"].is_string());
    // Neither the email nor any password material is joined in
    assert!(owner["email"].is_null());
    assert!(owner["password"].is_null());
    assert!(owner["passwordHash"].is_null());
}
