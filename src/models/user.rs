//! User identity and profile validation

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::UserId;

/// Avatar shown when the user has not uploaded a picture
pub const DEFAULT_PROFILE_PICTURE: &str =
    "https://images.unsplash.com/photo-1472099645785-5658abf4ff4e?w=400&h=400&fit=crop";

const MIN_NAME_LEN: usize = 2;
const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    User,
    Admin,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

/// The signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
}

impl User {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: UserId::new(),
            name: name.into(),
            email: email.into(),
            role: UserRole::User,
            profile_picture: Some(DEFAULT_PROFILE_PICTURE.to_string()),
        }
    }

    /// Whether the picture is a user upload rather than the default avatar
    pub fn has_custom_picture(&self) -> bool {
        matches!(&self.profile_picture, Some(p) if p != DEFAULT_PROFILE_PICTURE)
    }
}

/// Validation errors for sign-in and profile forms
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    NameTooShort,
    InvalidEmail,
    PasswordTooShort,
    PasswordMismatch,
    InvalidImage(String),
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NameTooShort => write!(f, "Name must be at least {} characters", MIN_NAME_LEN),
            Self::InvalidEmail => write!(f, "Invalid email address"),
            Self::PasswordTooShort => {
                write!(f, "Password must be at least {} characters", MIN_PASSWORD_LEN)
            }
            Self::PasswordMismatch => write!(f, "Passwords don't match"),
            Self::InvalidImage(reason) => write!(f, "Invalid image: {}", reason),
        }
    }
}

impl std::error::Error for UserValidationError {}

pub fn validate_name(name: &str) -> Result<(), UserValidationError> {
    if name.trim().chars().count() < MIN_NAME_LEN {
        return Err(UserValidationError::NameTooShort);
    }
    Ok(())
}

/// One `@`, a non-empty local part, and a dotted domain
pub fn validate_email(email: &str) -> Result<(), UserValidationError> {
    let email = email.trim();
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && !email.contains(char::is_whitespace)
                && domain
                    .split_once('.')
                    .map(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
                    .unwrap_or(false)
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(UserValidationError::InvalidEmail)
    }
}

pub fn validate_password(password: &str) -> Result<(), UserValidationError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(UserValidationError::PasswordTooShort);
    }
    Ok(())
}

pub fn validate_password_confirmation(
    password: &str,
    confirmation: &str,
) -> Result<(), UserValidationError> {
    if password != confirmation {
        return Err(UserValidationError::PasswordMismatch);
    }
    Ok(())
}

/// Accepts `data:image/<subtype>;base64,<payload>` with a decodable payload
pub fn validate_image_data_uri(uri: &str) -> Result<(), UserValidationError> {
    let rest = uri
        .strip_prefix("data:image/")
        .ok_or_else(|| UserValidationError::InvalidImage("expected a data:image/ URI".into()))?;

    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| UserValidationError::InvalidImage("missing data payload".into()))?;

    if !meta.ends_with(";base64") || meta.len() == ";base64".len() {
        return Err(UserValidationError::InvalidImage(
            "expected an image subtype with base64 encoding".into(),
        ));
    }

    if payload.is_empty() {
        return Err(UserValidationError::InvalidImage("empty payload".into()));
    }

    STANDARD
        .decode(payload)
        .map_err(|e| UserValidationError::InvalidImage(e.to_string()))?;

    Ok(())
}

/// Build a data URI for raw image bytes
pub fn image_data_uri(mime_subtype: &str, bytes: &[u8]) -> String {
    format!("data:image/{};base64,{}", mime_subtype, STANDARD.encode(bytes))
}
