//! Navigation-time access control based on credential presence.
//!
//! The check is synchronous and consults only the durable credential; it
//! never validates the token remotely. An expired-but-present token passes
//! the guard and is caught later by the transport's 401 teardown.

#[cfg(test)]
#[path = "routes_test.rs"]
mod tests;

use std::sync::Arc;

use crate::storage::SessionStorage;

/// Navigable views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    /// Default authenticated landing view.
    Lobby,
    Game(String),
}

impl Route {
    /// Whether the view is reachable only with a credential present.
    #[must_use]
    pub fn requires_auth(&self) -> bool {
        match self {
            Self::Login | Self::Register => false,
            Self::Lobby | Self::Game(_) => true,
        }
    }

    fn is_auth_view(&self) -> bool {
        matches!(self, Self::Login | Self::Register)
    }
}

/// Outcome of one navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Allow,
    Redirect(Route),
}

/// Gate for view transitions, consulted before each navigation.
pub struct RouteGuard {
    storage: Arc<dyn SessionStorage>,
}

impl RouteGuard {
    #[must_use]
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self { storage }
    }

    /// Decide whether the transition to `target` proceeds.
    ///
    /// Protected views without a credential redirect to login; the auth
    /// views with a credential present redirect to the lobby (an
    /// authenticated session never re-enters them); everything else passes
    /// through unchanged.
    #[must_use]
    pub fn check(&self, target: &Route) -> Navigation {
        let authenticated = self.storage.token().is_some();

        if target.requires_auth() && !authenticated {
            Navigation::Redirect(Route::Login)
        } else if target.is_auth_view() && authenticated {
            Navigation::Redirect(Route::Lobby)
        } else {
            Navigation::Allow
        }
    }
}
