use super::{RouteMatch, Router};
use crate::auth::{SessionObserver, User};
use crate::errors::AppResult;

pub const LOGIN_PATH: &str = "/login";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Proceed(RouteMatch),
    Redirect { from: String, to: String },
}

/// Decide one navigation from the route metadata and the current user.
pub fn guard(target: RouteMatch, user: Option<&User>) -> Navigation {
    if target.requires_auth && user.is_none() {
        return Navigation::Redirect {
            from: target.path,
            to: LOGIN_PATH.to_string(),
        };
    }
    Navigation::Proceed(target)
}

/// Runs before every navigation. Reads the cached session only.
pub struct AuthGate<'a> {
    router: &'a Router,
    session: &'a SessionObserver,
}

impl<'a> AuthGate<'a> {
    pub fn new(router: &'a Router, session: &'a SessionObserver) -> Self {
        Self { router, session }
    }

    pub fn navigate(&self, path: &str) -> AppResult<Navigation> {
        let target = self.router.resolve(path)?;
        Ok(guard(target, self.session.current_user()))
    }
}
