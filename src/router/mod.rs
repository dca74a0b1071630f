//! Route table and path matching.

pub mod guard;

use crate::errors::{AppError, AppResult};
use std::collections::BTreeMap;

pub use guard::{AuthGate, LOGIN_PATH, Navigation};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Home,
    Login,
    FinishShift,
    Dashboard,
    Platforms,
    ModelDetail,
    ShiftDetail,
    ModelCreate,
    ModelEdit,
}

#[derive(Debug, Clone, Copy)]
pub struct Route {
    pub path: &'static str,
    pub view: View,
    pub requires_auth: bool,
}

const fn route(path: &'static str, view: View, requires_auth: bool) -> Route {
    Route {
        path,
        view,
        requires_auth,
    }
}

pub const ROUTES: &[Route] = &[
    route("/", View::Home, false),
    route("/login", View::Login, false),
    route("/finalizar", View::FinishShift, false),
    route("/modelos", View::Dashboard, true),
    route("/plataformas", View::Platforms, true),
    route("/modelos/:id", View::ModelDetail, true),
    route("/turnos/:id", View::ShiftDetail, true),
    route("/modelos/create", View::ModelCreate, true),
    route("/modelos/edit/:id", View::ModelEdit, true),
];

/// A resolved navigation target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub path: String,
    pub pattern: &'static str,
    pub view: View,
    pub requires_auth: bool,
    pub params: BTreeMap<String, String>,
}

impl RouteMatch {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

pub struct Router {
    routes: Vec<Route>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new(ROUTES.to_vec())
    }
}

fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Drop query string and fragment.
fn clean_path(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    &path[..end]
}

impl Router {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Match a path against the table. Static segments outrank `:param`
    /// segments; on a tie the earlier route wins.
    pub fn resolve(&self, path: &str) -> AppResult<RouteMatch> {
        let path = clean_path(path.trim());
        let wanted = segments(path);

        let mut best: Option<(usize, &Route, BTreeMap<String, String>)> = None;

        for r in &self.routes {
            let pattern = segments(r.path);
            if pattern.len() != wanted.len() {
                continue;
            }

            let mut params = BTreeMap::new();
            let mut score = 0;
            let mut matched = true;

            for (p, w) in pattern.iter().zip(&wanted) {
                if let Some(name) = p.strip_prefix(':') {
                    params.insert(name.to_string(), (*w).to_string());
                } else if p == w {
                    score += 1;
                } else {
                    matched = false;
                    break;
                }
            }

            if matched && best.as_ref().is_none_or(|(s, _, _)| score > *s) {
                best = Some((score, r, params));
            }
        }

        let (_, r, params) = best.ok_or_else(|| AppError::RouteNotFound(path.to_string()))?;

        Ok(RouteMatch {
            path: format!("/{}", wanted.join("/")),
            pattern: r.path,
            view: r.view,
            requires_auth: r.requires_auth,
            params,
        })
    }
}
