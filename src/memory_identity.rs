//! An in-memory identity provider, used in tests and demos

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::watch;

use crate::error::Error;
use crate::mock_behaviour::MockBehaviour;
use crate::task::OwnerId;
use crate::traits::{AuthUser, IdentityProvider};

struct Account {
    user: AuthUser,
    password: String,
}

/// An [`IdentityProvider`] that keeps its accounts in memory
pub struct MemoryIdentity {
    accounts: Mutex<HashMap<String, Account>>,
    state: watch::Sender<Option<AuthUser>>,
    mock_behaviour: Option<Arc<Mutex<MockBehaviour>>>,
}

impl Default for MemoryIdentity {
    fn default() -> Self {
        let (state, _) = watch::channel(None);
        Self { accounts: Mutex::new(HashMap::new()), state, mock_behaviour: None }
    }
}

impl MemoryIdentity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_with_mock_behaviour(mock_behaviour: Arc<Mutex<MockBehaviour>>) -> Self {
        Self { mock_behaviour: Some(mock_behaviour), ..Self::default() }
    }

    /// Create an account. The new user is not signed in.
    pub fn register(&self, email: &str, password: &str) -> AuthUser {
        let user = AuthUser {
            uid: OwnerId::from(uuid::Uuid::new_v4().to_hyphenated().to_string()),
            email: email.to_string(),
            display_name: None,
        };
        self.accounts.lock().unwrap().insert(
            email.to_string(),
            Account { user: user.clone(), password: password.to_string() },
        );
        user
    }

    pub fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, Error> {
        let user = self.check_credentials(email, password)?;
        log::info!("{} signed in", email);
        self.state.send_replace(Some(user.clone()));
        Ok(user)
    }

    pub fn sign_out(&self) {
        if let Some(user) = self.state.send_replace(None) {
            log::info!("{} signed out", user.email);
        }
    }

    fn check_credentials(&self, email: &str, password: &str) -> Result<AuthUser, Error> {
        match self.accounts.lock().unwrap().get(email) {
            Some(account) if account.password == password => Ok(account.user.clone()),
            _ => Err(Error::Backend("Incorrect email or password.".to_string())),
        }
    }

    /// Apply `f` to the account of the signed-in user, in the account list and in the current state
    fn modify_current_account<F>(&self, f: F) -> Result<(), Error>
    where
        F: FnOnce(&mut Account),
    {
        let email = match self.current_user() {
            None => return Err(Error::NotAuthenticated),
            Some(user) => user.email,
        };

        let mut accounts = self.accounts.lock().unwrap();
        let account = accounts.get_mut(&email).ok_or(Error::NotAuthenticated)?;
        f(account);
        self.state.send_replace(Some(account.user.clone()));
        Ok(())
    }

    fn check_behaviour<F>(&self, check: F) -> Result<(), Error>
    where
        F: FnOnce(&mut MockBehaviour) -> Result<(), Error>,
    {
        match &self.mock_behaviour {
            None => Ok(()),
            Some(behaviour) => check(&mut behaviour.lock().unwrap()),
        }
    }
}

#[async_trait]
impl IdentityProvider for MemoryIdentity {
    fn current_user(&self) -> Option<AuthUser> {
        self.state.borrow().clone()
    }

    fn auth_state(&self) -> watch::Receiver<Option<AuthUser>> {
        self.state.subscribe()
    }

    async fn update_display_name(&self, display_name: &str) -> Result<(), Error> {
        self.check_behaviour(MockBehaviour::can_update_profile)?;
        self.modify_current_account(|account| {
            account.user.display_name = Some(display_name.to_string());
        })
    }

    async fn reauthenticate(&self, email: &str, password: &str) -> Result<(), Error> {
        self.check_behaviour(MockBehaviour::can_reauthenticate)?;
        match self.current_user() {
            Some(user) if user.email == email => {
                self.check_credentials(email, password)?;
                Ok(())
            },
            _ => Err(Error::NotAuthenticated),
        }
    }

    async fn update_password(&self, new_password: &str) -> Result<(), Error> {
        self.check_behaviour(MockBehaviour::can_update_password)?;
        self.modify_current_account(|account| {
            account.password = new_password.to_string();
        })
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sign_in_and_out_are_notified() {
        let identity = MemoryIdentity::new();
        let registered = identity.register("jane@example.com", "secret1");
        let mut state = identity.auth_state();
        assert_eq!(identity.current_user(), None);

        assert!(identity.sign_in("jane@example.com", "wrong").is_err());
        identity.sign_in("jane@example.com", "secret1").unwrap();
        state.changed().await.unwrap();
        assert_eq!(state.borrow_and_update().as_ref(), Some(&registered));

        identity.sign_out();
        state.changed().await.unwrap();
        assert_eq!(*state.borrow(), None);
    }

    #[tokio::test]
    async fn account_updates_require_a_user() {
        let identity = MemoryIdentity::new();
        identity.register("jane@example.com", "secret1");
        assert!(matches!(identity.update_password("another").await, Err(Error::NotAuthenticated)));

        identity.sign_in("jane@example.com", "secret1").unwrap();
        identity.update_display_name("Jane").await.unwrap();
        assert_eq!(identity.current_user().unwrap().display_name.as_deref(), Some("Jane"));

        identity.update_password("another").await.unwrap();
        assert!(identity.reauthenticate("jane@example.com", "secret1").await.is_err());
        assert!(identity.reauthenticate("jane@example.com", "another").await.is_ok());
    }

    #[tokio::test]
    async fn reauthentication_failures_can_be_injected() {
        let behaviour = Arc::new(Mutex::new(MockBehaviour {
            reauthenticate_behaviour: (0, 1),
            ..MockBehaviour::default()
        }));
        let identity = MemoryIdentity::new_with_mock_behaviour(Arc::clone(&behaviour));
        identity.register("jane@example.com", "secret1");
        identity.sign_in("jane@example.com", "secret1").unwrap();

        let err = identity.reauthenticate("jane@example.com", "secret1").await.unwrap_err();
        assert!(matches!(err, Error::Backend(_)));
        assert!(identity.reauthenticate("jane@example.com", "secret1").await.is_ok());
    }
}
