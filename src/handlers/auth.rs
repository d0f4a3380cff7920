//! Registration and login handlers

use serde::{Deserialize, Serialize};
use std::time::Duration;
use warp::http::StatusCode;
use warp::Reply;

use super::{required, WebResult};
use crate::constants::{LOGIN_MIN_DURATION_MS, MIN_PASSWORD_LENGTH, MIN_USERNAME_LENGTH};
use crate::error::{BookrackError, Result};
use crate::security::AuthTimer;
use crate::state::AppState;
use crate::storage::traits::{UserRecord, UserStore};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Non-sensitive user fields echoed back alongside a fresh token
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    pub email: String,
    pub profile_image: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub token: String,
    pub user: UserProfile,
}

impl From<&UserRecord> for UserProfile {
    fn from(user: &UserRecord) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            profile_image: user.profile_image.clone(),
        }
    }
}

/// Derives the deterministic default avatar reference for a new account
fn default_avatar(username: &str) -> String {
    format!("https://api.dicebear.com/7.x/avataaars/svg?seed={}", username)
}

pub async fn handle_register(body: RegisterRequest, state: AppState) -> WebResult<impl Reply> {
    let session = register(body, &state).await.map_err(warp::reject::custom)?;
    Ok(warp::reply::with_status(
        warp::reply::json(&session),
        StatusCode::CREATED,
    ))
}

async fn register(body: RegisterRequest, state: &AppState) -> Result<SessionResponse> {
    let (username, email, password) = match (
        required(body.username),
        required(body.email),
        required(body.password),
    ) {
        (Some(username), Some(email), Some(password)) => (username, email, password),
        _ => {
            return Err(BookrackError::ValidationError(
                "All fields are required".to_string(),
            ))
        }
    };

    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(BookrackError::ValidationError(
            "Password must be at least 6 characters long".to_string(),
        ));
    }
    if username.len() < MIN_USERNAME_LENGTH {
        return Err(BookrackError::ValidationError(
            "Username must be at least 3 characters long".to_string(),
        ));
    }

    // Two separate lookups, email first, so the error names the colliding
    // field. The store enforces uniqueness again on insert, which closes the
    // race two concurrent registrations would otherwise win together.
    if state.users.find_user_by_email(&email).await?.is_some() {
        return Err(BookrackError::Conflict("Email already exists!".to_string()));
    }
    if state.users.find_user_by_username(&username).await?.is_some() {
        return Err(BookrackError::Conflict("Username already taken!".to_string()));
    }

    let password_hash = state.passwords.hash(&password)?;
    let profile_image = default_avatar(&username);
    let user = UserRecord::new(username, email, password_hash, profile_image);

    state.users.create_user(user.clone()).await?;
    let token = state.tokens.issue(&user.id)?;

    log::info!("Registered new user {}", user.id);

    Ok(SessionResponse {
        token,
        user: UserProfile::from(&user),
    })
}

pub async fn handle_login(body: LoginRequest, state: AppState) -> WebResult<impl Reply> {
    let session = login(body, &state).await.map_err(warp::reject::custom)?;
    Ok(warp::reply::with_status(
        warp::reply::json(&session),
        StatusCode::OK,
    ))
}

async fn login(body: LoginRequest, state: &AppState) -> Result<SessionResponse> {
    let timer = AuthTimer::new(Duration::from_millis(LOGIN_MIN_DURATION_MS));

    let (email, password) = match (required(body.email), required(body.password)) {
        (Some(email), Some(password)) => (email, password),
        _ => {
            return Err(BookrackError::ValidationError(
                "All fields are required!".to_string(),
            ))
        }
    };

    // Unknown email and wrong password collapse into the same response and
    // the same minimum latency, so account existence cannot be probed.
    let user = match state.users.find_user_by_email(&email).await? {
        Some(user) => user,
        None => {
            timer.wait().await;
            return Err(BookrackError::InvalidCredentials);
        }
    };

    if !state.passwords.verify(&password, &user.password_hash)? {
        timer.wait().await;
        return Err(BookrackError::InvalidCredentials);
    }

    let token = state.tokens.issue(&user.id)?;

    log::debug!("User {} logged in", user.id);

    Ok(SessionResponse {
        token,
        user: UserProfile::from(&user),
    })
}
