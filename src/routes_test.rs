use std::sync::Arc;

use super::*;
use crate::storage::MemoryStorage;

fn guard(authenticated: bool) -> RouteGuard {
    let storage = if authenticated {
        MemoryStorage::with_token("tok")
    } else {
        MemoryStorage::new()
    };
    RouteGuard::new(Arc::new(storage))
}

#[test]
fn protected_views_require_credential() {
    let guard = guard(false);
    assert_eq!(guard.check(&Route::Lobby), Navigation::Redirect(Route::Login));
    assert_eq!(
        guard.check(&Route::Game("g1".to_owned())),
        Navigation::Redirect(Route::Login)
    );
}

#[test]
fn protected_views_pass_with_credential() {
    let guard = guard(true);
    assert_eq!(guard.check(&Route::Lobby), Navigation::Allow);
    assert_eq!(guard.check(&Route::Game("g1".to_owned())), Navigation::Allow);
}

#[test]
fn auth_views_redirect_when_already_authenticated() {
    let guard = guard(true);
    assert_eq!(guard.check(&Route::Login), Navigation::Redirect(Route::Lobby));
    assert_eq!(guard.check(&Route::Register), Navigation::Redirect(Route::Lobby));
}

#[test]
fn auth_views_pass_when_anonymous() {
    let guard = guard(false);
    assert_eq!(guard.check(&Route::Login), Navigation::Allow);
    assert_eq!(guard.check(&Route::Register), Navigation::Allow);
}

#[test]
fn guard_reacts_to_session_teardown() {
    let storage = Arc::new(MemoryStorage::with_token("tok"));
    let guard = RouteGuard::new(storage.clone());

    assert_eq!(guard.check(&Route::Lobby), Navigation::Allow);
    storage.clear_session();
    assert_eq!(guard.check(&Route::Lobby), Navigation::Redirect(Route::Login));
}

#[test]
fn stale_token_still_passes_guard() {
    // The guard performs no remote validation; presence is the only signal.
    let guard = guard(true);
    assert_eq!(guard.check(&Route::Lobby), Navigation::Allow);
}

#[test]
fn requires_auth_matrix() {
    assert!(!Route::Login.requires_auth());
    assert!(!Route::Register.requires_auth());
    assert!(Route::Lobby.requires_auth());
    assert!(Route::Game("g1".to_owned()).requires_auth());
}
