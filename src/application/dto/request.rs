//! Request DTOs
//!
//! Data structures for API request bodies.

use serde::Deserialize;
use validator::Validate;

/// Registration request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, max = 64, message = "Display name must be 1-64 characters"))]
    pub display_name: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// New conversation turn
#[derive(Debug, Deserialize, Validate)]
pub struct ChatRequest {
    #[validate(length(min = 1, max = 4000, message = "Message must be 1-4000 characters"))]
    pub message: String,
}

/// Update profile request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 64, message = "Display name must be 1-64 characters"))]
    pub display_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_rejects_malformed_email() {
        let request = RegisterRequest {
            email: "not-an-email".into(),
            display_name: "A".into(),
            password: "longenough".into(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn register_rejects_short_password() {
        let request = RegisterRequest {
            email: "a@b.c".into(),
            display_name: "A".into(),
            password: "short".into(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn chat_rejects_blank_message() {
        let request = ChatRequest { message: "".into() };
        assert!(request.validate().is_err());
    }

    #[test]
    fn valid_requests_pass_validation() {
        let register = RegisterRequest {
            email: "a@b.c".into(),
            display_name: "A".into(),
            password: "longenough".into(),
        };
        assert!(register.validate().is_ok());

        let chat = ChatRequest {
            message: "I would like to talk".into(),
        };
        assert!(chat.validate().is_ok());
    }
}
