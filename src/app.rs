//! Services shared by every command, created once in `run()` and passed
//! explicitly to the handlers.

use crate::auth::{AuthProvider, SessionObserver};
use crate::config::Config;
use crate::core::models::ModelRegistry;
use crate::core::platforms::PlatformRegistry;
use crate::core::shifts::ShiftLedger;
use crate::errors::{AppError, AppResult};
use crate::router::{AuthGate, Navigation, RouteMatch, Router};
use crate::store::DocumentStore;
use crate::ui::messages::warning;

pub struct App<'a> {
    pub cfg: &'a Config,
    pub store: &'a dyn DocumentStore,
    pub auth: &'a dyn AuthProvider,
    pub session: SessionObserver,
    pub router: Router,
}

impl<'a> App<'a> {
    /// Attach the session observer; this is the only time the provider's
    /// session state is read.
    pub fn new(
        cfg: &'a Config,
        store: &'a dyn DocumentStore,
        auth: &'a dyn AuthProvider,
    ) -> AppResult<Self> {
        Ok(Self {
            cfg,
            store,
            auth,
            session: SessionObserver::attach(auth)?,
            router: Router::default(),
        })
    }

    pub fn platforms(&self) -> PlatformRegistry<'a> {
        PlatformRegistry::new(self.store)
    }

    pub fn models(&self) -> ModelRegistry<'a> {
        ModelRegistry::new(self.store)
    }

    pub fn shifts(&self) -> ShiftLedger<'a> {
        ShiftLedger::new(self.store)
    }

    /// Run the auth gate for `path`. A redirect ends the command.
    pub fn navigate(&self, path: &str) -> AppResult<RouteMatch> {
        match AuthGate::new(&self.router, &self.session).navigate(path)? {
            Navigation::Proceed(target) => Ok(target),
            Navigation::Redirect { from, to } => {
                warning(format!(
                    "{} requires authentication, redirecting to {}",
                    from, to
                ));
                warning("Sign in with: shiftdesk login --email <EMAIL> --password <PASSWORD>");
                Err(AppError::AuthRequired { redirect: to })
            }
        }
    }

    pub fn fmt_time(&self, ts: &crate::models::timestamp::Timestamp) -> String {
        ts.format(&self.cfg.datetime_format)
    }

    pub fn fmt_amount(&self, amount: f64) -> String {
        crate::utils::formatting::format_amount(&self.cfg.currency, amount)
    }
}
