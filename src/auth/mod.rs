//! Authentication provider seam and the cached session observer.

pub mod local;
pub mod session;

use crate::errors::AppResult;

pub use local::LocalAuth;
pub use session::SessionObserver;

/// The signed-in account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub email: String,
    pub signed_in_at: String,
}

pub trait AuthProvider {
    /// Current session state as the provider sees it.
    fn current_user(&self) -> AppResult<Option<User>>;

    /// Create an account and sign it in.
    fn sign_up(&self, email: &str, password: &str) -> AppResult<User>;

    fn sign_in(&self, email: &str, password: &str) -> AppResult<User>;

    fn sign_out(&self) -> AppResult<()>;
}
