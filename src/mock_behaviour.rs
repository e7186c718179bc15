//! Failure injection for the in-memory backends, so that tests can exercise error paths

use crate::error::Error;

/// How the in-memory backends answer their next calls.
///
/// Each operation has a `(successes, failures)` pair: the operation first succeeds `successes` times, then fails
/// `failures` times, then succeeds forever.
#[derive(Default, Clone, Debug)]
pub struct MockBehaviour {
    /// While this is true, every operation succeeds and no counter moves
    pub is_suspended: bool,

    // TaskStore
    pub subscribe_behaviour: (u32, u32),
    pub create_behaviour: (u32, u32),
    pub update_behaviour: (u32, u32),
    pub delete_behaviour: (u32, u32),

    // IdentityProvider
    pub update_profile_behaviour: (u32, u32),
    pub reauthenticate_behaviour: (u32, u32),
    pub update_password_behaviour: (u32, u32),
}

impl MockBehaviour {
    pub fn new() -> Self {
        Self::default()
    }

    /// The next `n_fails` calls of every operation fail
    pub fn fail_now(n_fails: u32) -> Self {
        Self {
            is_suspended: false,
            subscribe_behaviour: (0, n_fails),
            create_behaviour: (0, n_fails),
            update_behaviour: (0, n_fails),
            delete_behaviour: (0, n_fails),
            update_profile_behaviour: (0, n_fails),
            reauthenticate_behaviour: (0, n_fails),
            update_password_behaviour: (0, n_fails),
        }
    }

    pub fn suspend(&mut self) {
        self.is_suspended = true;
    }

    pub fn resume(&mut self) {
        self.is_suspended = false;
    }

    pub fn can_subscribe(&mut self) -> Result<(), Error> {
        self.consume(|b| &mut b.subscribe_behaviour, "subscribe")
    }
    pub fn can_create(&mut self) -> Result<(), Error> {
        self.consume(|b| &mut b.create_behaviour, "create")
    }
    pub fn can_update(&mut self) -> Result<(), Error> {
        self.consume(|b| &mut b.update_behaviour, "update")
    }
    pub fn can_delete(&mut self) -> Result<(), Error> {
        self.consume(|b| &mut b.delete_behaviour, "delete")
    }
    pub fn can_update_profile(&mut self) -> Result<(), Error> {
        self.consume(|b| &mut b.update_profile_behaviour, "profile update")
    }
    pub fn can_reauthenticate(&mut self) -> Result<(), Error> {
        self.consume(|b| &mut b.reauthenticate_behaviour, "reauthentication")
    }
    pub fn can_update_password(&mut self) -> Result<(), Error> {
        self.consume(|b| &mut b.update_password_behaviour, "password update")
    }

    fn consume<F>(&mut self, counter: F, operation: &str) -> Result<(), Error>
    where
        F: FnOnce(&mut Self) -> &mut (u32, u32),
    {
        if self.is_suspended {
            return Ok(());
        }
        let (successes, failures) = counter(self);

        if *successes > 0 {
            *successes -= 1;
        } else if *failures > 0 {
            *failures -= 1;
            log::debug!("Mock behaviour: {} fails ({} more to fail)", operation, failures);
            return Err(Error::Backend(format!("injected {} failure", operation)));
        }
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn succeeds_then_fails_then_recovers() {
        let mut behaviour = MockBehaviour {
            update_behaviour: (1, 2),
            ..MockBehaviour::default()
        };
        assert!(behaviour.can_update().is_ok());
        assert!(matches!(behaviour.can_update(), Err(Error::Backend(_))));
        assert!(behaviour.can_update().is_err());
        assert!(behaviour.can_update().is_ok());
        // Other operations are not affected
        assert!(behaviour.can_create().is_ok());
    }

    #[test]
    fn fail_now_covers_every_operation() {
        let mut behaviour = MockBehaviour::fail_now(1);
        assert!(behaviour.can_subscribe().is_err());
        assert!(behaviour.can_delete().is_err());
        assert!(behaviour.can_reauthenticate().is_err());
        assert!(behaviour.can_reauthenticate().is_ok());
    }

    #[test]
    fn suspended_behaviour_keeps_its_counters() {
        let mut behaviour = MockBehaviour::fail_now(1);
        behaviour.suspend();
        assert!(behaviour.can_update_password().is_ok());
        behaviour.resume();
        assert!(behaviour.can_update_password().is_err());
        assert!(behaviour.can_update_password().is_ok());
    }
}
