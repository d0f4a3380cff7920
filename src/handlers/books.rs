//! Book creation, listing and deletion handlers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use warp::http::StatusCode;
use warp::Reply;

use super::{required, WebResult};
use crate::auth::user::AuthenticatedUser;
use crate::constants::{DEFAULT_PAGE, DEFAULT_PAGE_LIMIT};
use crate::error::{BookrackError, Result};
use crate::media::{public_id_from_reference, validate_image_payload, MediaStorage};
use crate::state::AppState;
use crate::storage::traits::{BookRecord, BookStore, UserStore};

#[derive(Debug, Deserialize)]
pub struct CreateBookRequest {
    pub title: Option<String>,
    pub caption: Option<String>,
    pub image: Option<String>,
    pub rating: Option<f64>,
}

/// Raw pagination query parameters; anything unparseable falls back to the
/// defaults rather than rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerSummary {
    pub id: String,
    pub username: String,
    pub profile_image: String,
}

/// A book joined with the non-sensitive fields of its owner
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookWithOwner {
    pub id: String,
    pub title: String,
    pub caption: String,
    pub image: String,
    pub rating: f64,
    pub user: Option<OwnerSummary>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookPage {
    pub books: Vec<BookWithOwner>,
    pub current_page: u64,
    pub total_books: usize,
    pub total_pages: usize,
}

pub async fn handle_create_book(
    user: AuthenticatedUser,
    body: CreateBookRequest,
    state: AppState,
) -> WebResult<impl Reply> {
    let book = create_book(user, body, &state)
        .await
        .map_err(warp::reject::custom)?;
    Ok(warp::reply::with_status(
        warp::reply::json(&book),
        StatusCode::CREATED,
    ))
}

async fn create_book(
    user: AuthenticatedUser,
    body: CreateBookRequest,
    state: &AppState,
) -> Result<BookRecord> {
    let (title, caption, image, rating) = match (
        required(body.title),
        required(body.caption),
        required(body.image),
        body.rating,
    ) {
        (Some(title), Some(caption), Some(image), Some(rating)) => {
            (title, caption, image, rating)
        }
        _ => {
            return Err(BookrackError::ValidationError(
                "All fields are required!".to_string(),
            ))
        }
    };

    if !(1.0..=5.0).contains(&rating) {
        return Err(BookrackError::ValidationError(
            "Rating must be between 1 and 5".to_string(),
        ));
    }

    validate_image_payload(&image)?;

    // The raw payload goes to object storage; only the stable reference URL
    // it returns is persisted.
    let image_url = state.media.upload(&image).await?;

    let book = BookRecord::new(title, caption, image_url, rating, user.id);
    state.books.create_book(book.clone()).await?;

    log::info!("User {} created book {}", book.owner, book.id);

    Ok(book)
}

pub async fn handle_list_books(
    _user: AuthenticatedUser,
    query: ListQuery,
    state: AppState,
) -> WebResult<impl Reply> {
    let page = list_books(query, &state).await.map_err(warp::reject::custom)?;
    Ok(warp::reply::json(&page))
}

async fn list_books(query: ListQuery, state: &AppState) -> Result<BookPage> {
    let page = parse_param(query.page.as_deref(), DEFAULT_PAGE);
    let limit = parse_param(query.limit.as_deref(), DEFAULT_PAGE_LIMIT as u64) as usize;
    let skip = (page.saturating_sub(1) as usize).saturating_mul(limit);

    let records = state.books.list_books(skip, limit).await?;
    let total_books = state.books.count_books().await?;
    let total_pages = (total_books + limit - 1) / limit;

    let mut books = Vec::with_capacity(records.len());
    for record in records {
        books.push(join_owner(record, state).await?);
    }

    Ok(BookPage {
        books,
        current_page: page,
        total_books,
        total_pages,
    })
}

/// Resolves the owning user's public fields for a listed book. The owner's
/// password hash and email never appear in the joined shape.
async fn join_owner(record: BookRecord, state: &AppState) -> Result<BookWithOwner> {
    let owner = state
        .users
        .find_user(&record.owner)
        .await?
        .map(|user| OwnerSummary {
            id: user.id,
            username: user.username,
            profile_image: user.profile_image,
        });

    Ok(BookWithOwner {
        id: record.id,
        title: record.title,
        caption: record.caption,
        image: record.image,
        rating: record.rating,
        user: owner,
        created_at: record.created_at,
    })
}

/// Parses a positive integer query parameter, falling back to `default`
fn parse_param(raw: Option<&str>, default: u64) -> u64 {
    raw.and_then(|value| value.parse::<u64>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(default)
}

pub async fn handle_my_books(user: AuthenticatedUser, state: AppState) -> WebResult<impl Reply> {
    let books = state
        .books
        .list_books_by_owner(&user.id)
        .await
        .map_err(warp::reject::custom)?;
    Ok(warp::reply::json(&books))
}

pub async fn handle_delete_book(
    book_id: String,
    user: AuthenticatedUser,
    state: AppState,
) -> WebResult<impl Reply> {
    delete_book(&book_id, &user, &state)
        .await
        .map_err(warp::reject::custom)?;
    Ok(warp::reply::json(&serde_json::json!({
        "success": true,
        "message": "Book deleted successfully!"
    })))
}

async fn delete_book(book_id: &str, user: &AuthenticatedUser, state: &AppState) -> Result<()> {
    let book = match state.books.find_book(book_id).await? {
        Some(book) => book,
        None => return Err(BookrackError::NotFound("Book not found".to_string())),
    };

    // Owner comparison is by id value; the record and the session subject may
    // come from different in-memory representations.
    if book.owner != user.id {
        return Err(BookrackError::Forbidden(
            "You are not authorized to delete this book".to_string(),
        ));
    }

    // Best-effort asset cleanup, detached from the authoritative record
    // deletion. Failures are logged and never surfaced to the client.
    if !book.image.is_empty() && state.media.owns_reference(&book.image) {
        match public_id_from_reference(&book.image) {
            Some(public_id) => {
                let media = state.media.clone();
                let image = book.image.clone();
                tokio::spawn(async move {
                    if let Err(e) = media.delete(&public_id).await {
                        log::warn!("Failed to delete image {} from object storage: {}", image, e);
                    }
                });
            }
            None => log::warn!(
                "Could not derive a public id from image reference {}",
                book.image
            ),
        }
    }

    state.books.delete_book(book_id).await?;

    log::info!("User {} deleted book {}", user.id, book_id);

    Ok(())
}
