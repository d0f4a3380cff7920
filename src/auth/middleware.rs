//! Access control middleware for protected routes

use warp::{Filter, Rejection};

use crate::auth::token::extract_bearer_token;
use crate::auth::user::AuthenticatedUser;
use crate::constants::MAX_TOKEN_LENGTH;
use crate::error::{BookrackError, Result};
use crate::state::AppState;
use crate::storage::traits::UserStore;

/// Warp filter that authenticates the request and extracts the current user.
///
/// Rejects before the inner handler runs; a handler behind this filter never
/// sees an unauthenticated request.
pub fn with_auth(
    state: AppState,
) -> impl Filter<Extract = (AuthenticatedUser,), Error = Rejection> + Clone {
    warp::header::optional::<String>("authorization").and_then(move |header: Option<String>| {
        let state = state.clone();
        async move {
            authenticate_request(header.as_deref(), &state)
                .await
                .map_err(warp::reject::custom)
        }
    })
}

/// Resolves an Authorization header to a full user record.
///
/// Steps, in order: extract the bearer token, verify it, resolve the subject
/// id to a stored user (password hash excluded). Any failure short-circuits
/// with `Unauthenticated`; unexpected store faults keep their own kind and
/// surface as 500 at the boundary.
pub async fn authenticate_request(
    auth_header: Option<&str>,
    state: &AppState,
) -> Result<AuthenticatedUser> {
    let token = auth_header.and_then(extract_bearer_token).ok_or_else(|| {
        BookrackError::Unauthenticated("No authentication token found, access denied!".to_string())
    })?;

    // Basic token hygiene before any cryptographic work
    if token.len() > MAX_TOKEN_LENGTH || token.chars().any(|c| c.is_control()) {
        return Err(BookrackError::Unauthenticated("Token is invalid!".to_string()));
    }

    let user_id = state.tokens.verify(&token)?;

    let user = match state.users.find_user(&user_id).await? {
        Some(user) => user,
        None => {
            log::debug!("Token subject {} has no stored user", user_id);
            return Err(BookrackError::Unauthenticated(
                "User not found, Token is invalid!".to_string(),
            ));
        }
    };

    Ok(AuthenticatedUser::from(user))
}
