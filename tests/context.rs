//! A client context wired to in-memory backends, going through sign-in and sign-out

use std::sync::Arc;
use std::time::Instant;

use task_calendar::config::Settings;
use task_calendar::profile::UsernameChangeForm;
use task_calendar::traits::IdentityProvider;
use task_calendar::{ClientContext, Error, MemoryIdentity, MemoryStore};

fn context() -> ClientContext<MemoryStore, MemoryIdentity> {
    let _ = env_logger::builder().is_test(true).try_init();

    let identity = MemoryIdentity::new();
    identity.register("jane@example.com", "secret1");
    identity.register("john@example.com", "secret2");
    ClientContext::init(Arc::new(MemoryStore::new()), Arc::new(identity), Settings::default())
}

#[tokio::test]
async fn task_list_requires_a_signed_in_user() {
    let context = context();
    assert!(matches!(context.open_task_list().await, Err(Error::NotAuthenticated)));
    assert!(matches!(context.profile(), Err(Error::NotAuthenticated)));
    context.teardown();
}

#[tokio::test]
async fn each_user_sees_their_own_tasks() {
    let context = context();
    let mut auth_state = context.auth_state();

    let jane = context.identity().sign_in("jane@example.com", "secret1").unwrap();
    auth_state.changed().await.unwrap();
    let mut screen = context.open_task_list().await.unwrap();
    assert_eq!(screen.owner(), &jane.uid);

    screen.open_for_create();
    screen.edit_session_mut().set_task_name("Jane's task".to_string());
    screen.commit_edit().await.unwrap();
    assert!(screen.refresh(Instant::now()).await);
    assert_eq!(screen.tasks().len(), 1);

    // Signing out discards the task list, signing in as someone else mounts a new one
    context.identity().sign_out();
    auth_state.changed().await.unwrap();
    assert!(auth_state.borrow().is_none());
    screen.unmount();
    assert_eq!(context.store().subscriber_count(&jane.uid), 0);

    let john = context.identity().sign_in("john@example.com", "secret2").unwrap();
    let screen = context.open_task_list().await.unwrap();
    assert_eq!(screen.owner(), &john.uid);
    assert!(screen.tasks().is_empty());

    screen.unmount();
    context.teardown();
}

#[tokio::test]
async fn profile_reflects_username_changes() {
    let context = context();
    context.identity().sign_in("jane@example.com", "secret1").unwrap();

    let mut profile = context.profile().unwrap();
    assert_eq!(profile.username(), "jane");

    let mut form = UsernameChangeForm::new();
    form.set_new_username("Jane D.".to_string());
    form.commit(&**context.identity(), &mut profile).await.unwrap();

    assert_eq!(profile.username(), "Jane D.");
    assert_eq!(context.current_user().unwrap().display_name.as_deref(), Some("Jane D."));
    assert_eq!(context.identity().current_user().unwrap().display_name.as_deref(), Some("Jane D."));
}
