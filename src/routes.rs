//! HTTP route wiring and rejection handling

use std::convert::Infallible;
use warp::http::StatusCode;
use warp::{Filter, Rejection, Reply};

use crate::auth::middleware::with_auth;
use crate::constants::{MAX_AUTH_BODY_BYTES, MAX_BOOK_BODY_BYTES};
use crate::error::BookrackError;
use crate::handlers::{auth, books};
use crate::state::AppState;

impl warp::reject::Reject for BookrackError {}

/// Builds the API filter chain without rejection handling applied
pub fn api_routes(
    state: AppState,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    let register = warp::path!("api" / "auth" / "register")
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_AUTH_BODY_BYTES))
        .and(warp::body::json())
        .and(with_state(state.clone()))
        .and_then(auth::handle_register);

    let login = warp::path!("api" / "auth" / "login")
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_AUTH_BODY_BYTES))
        .and(warp::body::json())
        .and(with_state(state.clone()))
        .and_then(auth::handle_login);

    let create_book = warp::path!("api" / "books")
        .and(warp::post())
        .and(with_auth(state.clone()))
        .and(warp::body::content_length_limit(MAX_BOOK_BODY_BYTES))
        .and(warp::body::json())
        .and(with_state(state.clone()))
        .and_then(books::handle_create_book);

    let list_books = warp::path!("api" / "books")
        .and(warp::get())
        .and(with_auth(state.clone()))
        .and(warp::query::<books::ListQuery>())
        .and(with_state(state.clone()))
        .and_then(books::handle_list_books);

    let my_books = warp::path!("api" / "books" / "mine")
        .and(warp::get())
        .and(with_auth(state.clone()))
        .and(with_state(state.clone()))
        .and_then(books::handle_my_books);

    let delete_book = warp::path!("api" / "books" / String)
        .and(warp::delete())
        .and(with_auth(state.clone()))
        .and(with_state(state))
        .and_then(books::handle_delete_book);

    let health = warp::path!("health").and(warp::get()).map(|| "OK");

    register
        .or(login)
        .or(create_book)
        .or(my_books)
        .or(list_books)
        .or(delete_book)
        .or(health)
}

/// Complete route tree with rejection handling applied
pub fn routes(
    state: AppState,
) -> impl Filter<Extract = impl Reply, Error = Infallible> + Clone {
    api_routes(state).recover(handle_rejection)
}

// Helper function to include shared state in a request
fn with_state(
    state: AppState,
) -> impl Filter<Extract = (AppState,), Error = Infallible> + Clone {
    warp::any().map(move || state.clone())
}

/// Maps rejections to the uniform JSON error envelope.
///
/// Domain errors carry their own status; everything unexpected becomes a
/// generic 500 with the detail logged server-side only.
pub async fn handle_rejection(err: Rejection) -> std::result::Result<impl Reply, Infallible> {
    let (status, message) = if let Some(api_err) = err.find::<BookrackError>() {
        let status = StatusCode::from_u16(api_err.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            log::error!("Internal error while handling request: {}", api_err);
        }
        (status, api_err.public_message())
    } else if err.is_not_found() {
        (StatusCode::NOT_FOUND, "Not found".to_string())
    } else if let Some(e) = err.find::<warp::filters::body::BodyDeserializeError>() {
        log::debug!("Request body rejected: {}", e);
        (StatusCode::BAD_REQUEST, "Invalid request body".to_string())
    } else if err.find::<warp::reject::InvalidHeader>().is_some() {
        (StatusCode::BAD_REQUEST, "Invalid request header".to_string())
    } else if err.find::<warp::reject::LengthRequired>().is_some() {
        (
            StatusCode::LENGTH_REQUIRED,
            "Content length is required".to_string(),
        )
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        (
            StatusCode::PAYLOAD_TOO_LARGE,
            "Request body too large".to_string(),
        )
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (
            StatusCode::METHOD_NOT_ALLOWED,
            "Method not allowed".to_string(),
        )
    } else {
        log::error!("Unhandled rejection: {:?}", err);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error".to_string(),
        )
    };

    let body = warp::reply::json(&serde_json::json!({
        "success": false,
        "message": message,
    }));

    Ok(warp::reply::with_status(body, status))
}
