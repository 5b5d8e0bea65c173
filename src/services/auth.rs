//! Mock authentication and profile management
//!
//! There is no credential check. Login resolves to a canned user, sign-up to
//! the submitted name, and the result is kept as the session user until
//! logout. Passwords are validated for shape and then discarded.

use tracing::info;

use crate::audit::EntityType;
use crate::error::{FintrackError, FintrackResult};
use crate::models::user::{
    validate_email, validate_image_data_uri, validate_name, validate_password,
    validate_password_confirmation, UserValidationError, DEFAULT_PROFILE_PICTURE,
};
use crate::models::User;
use crate::storage::Storage;

/// Name given to every user who logs in without signing up
pub const MOCK_USER_NAME: &str = "John Doe";

pub struct AuthService<'a> {
    storage: &'a Storage,
}

fn invalid(e: UserValidationError) -> FintrackError {
    FintrackError::Validation(e.to_string())
}

impl<'a> AuthService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn login(&self, email: &str, password: &str) -> FintrackResult<User> {
        validate_email(email).map_err(invalid)?;
        validate_password(password).map_err(invalid)?;

        let user = User::new(MOCK_USER_NAME, email.trim());
        self.start_session(user)
    }

    pub fn sign_up(
        &self,
        name: &str,
        email: &str,
        password: &str,
        confirmation: &str,
    ) -> FintrackResult<User> {
        validate_name(name).map_err(invalid)?;
        validate_email(email).map_err(invalid)?;
        validate_password(password).map_err(invalid)?;
        validate_password_confirmation(password, confirmation).map_err(invalid)?;

        let user = User::new(name.trim(), email.trim());
        self.start_session(user)
    }

    /// End the session; `None` when nobody was signed in
    pub fn logout(&self) -> FintrackResult<Option<User>> {
        let previous = self.storage.session.set(None)?;
        self.storage.session.save()?;

        if let Some(user) = &previous {
            self.storage.log_delete(
                EntityType::Session,
                user.id.to_string(),
                Some(user.email.clone()),
                user,
            )?;
            info!(user = %user.id, "logged out");
        }
        Ok(previous)
    }

    pub fn current_user(&self) -> FintrackResult<Option<User>> {
        self.storage.session.current()
    }

    pub fn update_profile(&self, name: &str, email: &str) -> FintrackResult<User> {
        validate_name(name).map_err(invalid)?;
        validate_email(email).map_err(invalid)?;

        self.modify_user("profile", |user| {
            user.name = name.trim().to_string();
            user.email = email.trim().to_string();
        })
    }

    pub fn update_profile_picture(&self, data_uri: &str) -> FintrackResult<User> {
        validate_image_data_uri(data_uri).map_err(invalid)?;

        self.modify_user("profile picture", |user| {
            user.profile_picture = Some(data_uri.to_string());
        })
    }

    /// Reset the picture to the default avatar
    pub fn remove_profile_picture(&self) -> FintrackResult<User> {
        self.modify_user("profile picture", |user| {
            user.profile_picture = Some(DEFAULT_PROFILE_PICTURE.to_string());
        })
    }

    fn require_user(&self) -> FintrackResult<User> {
        self.current_user()?
            .ok_or_else(|| FintrackError::Auth("Not logged in".into()))
    }

    fn start_session(&self, user: User) -> FintrackResult<User> {
        self.storage.session.set(Some(user.clone()))?;
        self.storage.session.save()?;

        self.storage.log_create(
            EntityType::Session,
            user.id.to_string(),
            Some(user.email.clone()),
            &user,
        )?;
        info!(user = %user.id, "session started");
        Ok(user)
    }

    fn modify_user<F>(&self, what: &str, change: F) -> FintrackResult<User>
    where
        F: FnOnce(&mut User),
    {
        let before = self.require_user()?;
        let mut after = before.clone();
        change(&mut after);

        self.storage.session.set(Some(after.clone()))?;
        self.storage.session.save()?;

        self.storage.log_update(
            EntityType::Session,
            after.id.to_string(),
            Some(after.email.clone()),
            &before,
            &after,
            Some(format!("{} updated", what)),
        )?;
        info!(user = %after.id, "{} updated", what);
        Ok(after)
    }
}
