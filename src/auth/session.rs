use super::{AuthProvider, User};
use crate::errors::AppResult;

/// Process-wide view of the session.
///
/// The provider is asked once, when the observer is attached at startup.
/// Sign-in and sign-out go through the observer so the cached state follows
/// every change; the navigation gate then reads it without touching the
/// provider again.
#[derive(Debug, Clone, Default)]
pub struct SessionObserver {
    user: Option<User>,
}

impl SessionObserver {
    pub fn attach(provider: &dyn AuthProvider) -> AppResult<Self> {
        Ok(Self {
            user: provider.current_user()?,
        })
    }

    /// Observer with a fixed state, for callers that manage the session themselves.
    pub fn with_user(user: Option<User>) -> Self {
        Self { user }
    }

    pub fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn on_auth_state_changed(&mut self, user: Option<User>) {
        self.user = user;
    }

    pub fn sign_up(
        &mut self,
        provider: &dyn AuthProvider,
        email: &str,
        password: &str,
    ) -> AppResult<&User> {
        let user = provider.sign_up(email, password)?;
        Ok(self.user.insert(user))
    }

    pub fn sign_in(
        &mut self,
        provider: &dyn AuthProvider,
        email: &str,
        password: &str,
    ) -> AppResult<&User> {
        let user = provider.sign_in(email, password)?;
        Ok(self.user.insert(user))
    }

    pub fn sign_out(&mut self, provider: &dyn AuthProvider) -> AppResult<()> {
        provider.sign_out()?;
        self.on_auth_state_changed(None);
        Ok(())
    }
}
