/// Route prefix shared by every versioned endpoint
pub const API_PREFIX: &str = "/v1";

/// SQLite file used when DATABASE_PATH is unset
pub const DEFAULT_DATABASE_PATH: &str = "./data/conflict_data.db";

/// Default page size for the paginated conflict listing
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Smallest accepted page size
pub const MIN_PAGE_SIZE: i64 = 1;

/// Largest accepted page size
pub const MAX_PAGE_SIZE: i64 = 100;

/// Row cap for the single-country listing.
/// Larger result sets are truncated and flagged with a warning.
pub const MAX_COUNTRY_ROWS: i64 = 1000;

/// Feedback text length bounds (characters)
pub const MIN_FEEDBACK_CHARS: usize = 10;
pub const MAX_FEEDBACK_CHARS: usize = 500;

/// Minimum password length accepted at registration
pub const MIN_PASSWORD_CHARS: usize = 4;

/// Maximum email length (matches the users table column)
pub const MAX_EMAIL_CHARS: usize = 255;

// =============================================================================
// Error Messages
// =============================================================================

/// Login failure, deliberately identical for unknown email and wrong password
pub const ERR_INVALID_CREDENTIALS: &str = "invalid credentials";

/// Registration with an email that is already taken
pub const ERR_EMAIL_TAKEN: &str = "user already registered to email address";

/// Authorization header absent or not of the form `Bearer <token>`
pub const ERR_MISSING_CREDENTIAL: &str = "missing or invalid authorisation header";

/// Token failed signature, expiry or parse checks
pub const ERR_INVALID_CREDENTIAL: &str = "invalid token";

/// Token was valid but its subject no longer exists
pub const ERR_UNKNOWN_SUBJECT: &str = "user not found";

/// Authenticated user lacks the admin flag
pub const ERR_ADMIN_REQUIRED: &str = "admin privileges required";

/// Warning attached to truncated country listings
pub const WARN_TRUNCATED_LISTING: &str =
    "Please use paginated endpoint /conflictdata for the full result set.";
