//! Request and response bodies for `/api/auth`
//!
//! All bodies use camelCase field names on the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use re_core::domain::entities::user::UserProfile;
use re_core::domain::value_objects::AuthResponse;
use re_core::services::{LoginAttempt, NewAccount};
use re_shared::utils::validation::{check_password_strength, MIN_PASSWORD_LENGTH};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    /// Extends the refresh token lifetime to the configured number of days
    #[serde(default)]
    pub remember_me: bool,
}

impl From<LoginRequest> for LoginAttempt {
    fn from(request: LoginRequest) -> Self {
        Self {
            email: request.email,
            password: request.password,
            remember_me: request.remember_me,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    pub confirm_password: String,

    #[validate(length(min = 1, max = 50, message = "First name must be 1 to 50 characters"))]
    pub first_name: String,

    #[validate(length(min = 1, max = 50, message = "Last name must be 1 to 50 characters"))]
    pub last_name: String,

    #[serde(default)]
    pub role: Option<String>,
}

impl RegisterRequest {
    /// Derived rules plus password complexity and confirmation
    pub fn validate_all(&self) -> Result<(), ValidationErrors> {
        let mut errors = match self.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };

        // Complexity is only reported once the length rule passes
        if self.password.chars().count() >= MIN_PASSWORD_LENGTH {
            if let Err(issue) = check_password_strength(&self.password) {
                errors.add("password", field_error("password_strength", issue.message()));
            }
        }

        if self.confirm_password != self.password {
            errors.add(
                "confirm_password",
                field_error("must_match", "Passwords do not match"),
            );
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl From<RegisterRequest> for NewAccount {
    fn from(request: RegisterRequest) -> Self {
        Self {
            email: request.email,
            password: request.password,
            confirm_password: request.confirm_password,
            first_name: request.first_name,
            last_name: request.last_name,
            role: request.role,
        }
    }
}

fn field_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

/// Body of `/refresh` and `/revoke`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

/// Body of `/validate`: either a bare JSON string or `{ "token": "..." }`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValidateTokenRequest {
    Bare(String),
    Wrapped { token: String },
}

impl ValidateTokenRequest {
    pub fn token(&self) -> &str {
        match self {
            Self::Bare(token) | Self::Wrapped { token } => token,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub role: String,
    pub permissions: Vec<String>,
    pub is_active: bool,
    pub is_email_verified: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<UserProfile> for UserDto {
    fn from(profile: UserProfile) -> Self {
        Self {
            id: profile.id,
            email: profile.email,
            first_name: profile.first_name,
            last_name: profile.last_name,
            full_name: profile.full_name,
            role: profile.role,
            permissions: profile.permissions,
            is_active: profile.is_active,
            is_email_verified: profile.is_email_verified,
            last_login: profile.last_login,
            created_at: profile.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponseDto {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token expiry
    pub expires_at: DateTime<Utc>,
    pub user: UserDto,
}

impl From<AuthResponse> for AuthResponseDto {
    fn from(response: AuthResponse) -> Self {
        Self {
            access_token: response.access_token,
            refresh_token: response.refresh_token,
            expires_at: response.expires_at,
            user: response.user.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateTokenResponse {
    pub message: String,
    pub is_valid: bool,
}
