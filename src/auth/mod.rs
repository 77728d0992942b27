pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use validator::Validate;

// Re-export necessary items
pub use extractors::AuthenticatedUserId;
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use token::{Claims, TokenKeys};

lazy_static! {
    // Regex for username validation: alphanumeric, underscores, hyphens
    static ref USERNAME_REGEX: regex::Regex = regex::Regex::new(r"^[a-zA-Z0-9_-]+$").unwrap();
}

/// Payload for a new account registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    /// Desired username. Between 3 and 50 characters, alphanumeric with
    /// underscores or hyphens.
    #[validate(
        length(min = 3, max = 50, message = "Username should be at least of 3 characters"),
        regex(
            path = "USERNAME_REGEX",
            message = "Username must be alphanumeric, underscores, or hyphens"
        )
    )]
    pub username: String,
    /// Email address. Must be a valid email format.
    #[validate(email(message = "Email should be valid"))]
    pub email: String,
    /// Password. Must be at least 6 characters long.
    #[validate(length(min = 6, message = "password should be at least of 6 characters"))]
    pub password: String,
}

/// Payload for a signin request.
///
/// Unlike signup there is no length rule on the password here; presence is
/// enough, and a mismatch is reported by verification, not validation.
#[derive(Debug, Deserialize, Validate)]
pub struct SigninRequest {
    #[validate(email(message = "Email should be valid!"))]
    pub email: String,
    pub password: String,
}

/// Response for a successful signin: the bearer token the client stores and
/// attaches to every protected request.
#[derive(Debug, Serialize, Deserialize)]
pub struct SigninResponse {
    pub message: String,
    pub token: String,
}
