use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::storage::traits::UserRecord;

/// The user identity attached to a request after token verification.
///
/// Built from the stored record with the password hash excluded; this value
/// is threaded explicitly into downstream handlers rather than stashed in
/// shared mutable state.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedUser {
    pub id: String,
    pub username: String,
    pub email: String,
    pub profile_image: String,
    pub created_at: DateTime<Utc>,
}

impl From<UserRecord> for AuthenticatedUser {
    fn from(user: UserRecord) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            profile_image: user.profile_image,
            created_at: user.created_at,
        }
    }
}
