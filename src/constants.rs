// Fundamental configuration constants
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;

// Session token lifetime: 15 days, after which clients must log in again
pub const TOKEN_TTL_SECS: usize = 15 * 24 * 60 * 60;
pub const MAX_TOKEN_LENGTH: usize = 1000;

// Credential validation thresholds
pub const MIN_USERNAME_LENGTH: usize = 3;
pub const MIN_PASSWORD_LENGTH: usize = 6;
pub const MIN_SECRET_LENGTH: usize = 32;

// Pagination defaults
pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_PAGE_LIMIT: usize = 5;

// Request body limits; book bodies carry base64 cover images
pub const MAX_AUTH_BODY_BYTES: u64 = 16 * 1024;
pub const MAX_BOOK_BODY_BYTES: u64 = 12 * 1024 * 1024;
pub const MAX_IMAGE_PAYLOAD_BYTES: usize = 10 * 1024 * 1024;

// External collaborator tuning
pub const MEDIA_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const KEEPALIVE_INTERVAL_SECS: u64 = 14 * 60;
pub const KEEPALIVE_REQUEST_TIMEOUT_SECS: u64 = 30;

// Minimum observable duration of a failed login attempt
pub const LOGIN_MIN_DURATION_MS: u64 = 100;
