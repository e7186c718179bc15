//! The user profile, and the forms that change it.
//!
//! Each form is an independent state record, committed against the [`IdentityProvider`] it is given.

use crate::config::MIN_PASSWORD_LENGTH;
use crate::error::{Error, ValidationError};
use crate::task::OwnerId;
use crate::traits::{AuthUser, IdentityProvider};

/// What is displayed about the signed-in user
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthProfile {
    user: AuthUser,
    username: String,
}

impl AuthProfile {
    /// Build the profile of the signed-in user
    pub fn load<I>(identity: &I) -> Result<Self, Error>
    where
        I: IdentityProvider + ?Sized,
    {
        let user = identity.current_user().ok_or(Error::NotAuthenticated)?;
        let username = match &user.display_name {
            Some(name) => name.clone(),
            None => user.email.split('@').next().unwrap_or_default().to_string(),
        };
        Ok(Self { user, username })
    }

    pub fn uid(&self) -> &OwnerId   { &self.user.uid }
    pub fn email(&self) -> &str     { &self.user.email }
    pub fn username(&self) -> &str  { &self.username }
}


#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UsernameChangeForm {
    new_username: String,
}

impl UsernameChangeForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_username(&self) -> &str {
        &self.new_username
    }

    pub fn set_new_username(&mut self, username: String) {
        self.new_username = username;
    }

    pub async fn commit<I>(&mut self, identity: &I, profile: &mut AuthProfile) -> Result<(), Error>
    where
        I: IdentityProvider + ?Sized,
    {
        if self.new_username.is_empty() {
            return Err(ValidationError::EmptyUsername.into());
        }

        identity.update_display_name(&self.new_username).await?;
        log::info!("Username of {} changed to {:?}", profile.uid(), self.new_username);
        profile.username = std::mem::take(&mut self.new_username);
        Ok(())
    }
}


#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PasswordChangeForm {
    old_password: String,
    new_password: String,
    confirm_password: String,
    /// The message of the last failed attempt
    error: Option<String>,
}

impl PasswordChangeForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_old_password(&mut self, password: String)      { self.old_password = password; }
    pub fn set_new_password(&mut self, password: String)      { self.new_password = password; }
    pub fn set_confirm_password(&mut self, password: String)  { self.confirm_password = password; }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.old_password.is_empty() || self.new_password.is_empty() || self.confirm_password.is_empty() {
            return Err(ValidationError::MissingPasswordFields);
        }
        if self.new_password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        if self.new_password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(ValidationError::PasswordTooShort(MIN_PASSWORD_LENGTH));
        }
        Ok(())
    }

    /// Check the old password, then set the new one.
    ///
    /// On success every field is cleared. On failure, the error message is also kept in [`Self::error`].
    pub async fn commit<I>(&mut self, identity: &I, profile: &AuthProfile) -> Result<(), Error>
    where
        I: IdentityProvider + ?Sized,
    {
        let result = self.try_commit(identity, profile).await;
        match &result {
            Ok(()) => {
                log::info!("Password of {} changed", profile.uid());
                *self = Self::default();
            },
            Err(err) => {
                self.error = Some(err.to_string());
            },
        }
        result
    }

    async fn try_commit<I>(&self, identity: &I, profile: &AuthProfile) -> Result<(), Error>
    where
        I: IdentityProvider + ?Sized,
    {
        self.validate()?;
        identity.reauthenticate(profile.email(), &self.old_password).await?;
        identity.update_password(&self.new_password).await
    }
}
