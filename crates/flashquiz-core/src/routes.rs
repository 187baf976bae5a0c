//! Named application routes and the authentication guard.

use serde::Serialize;

/// Who may visit a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Access {
    /// Only authenticated sessions.
    RequiresAuth,
    /// Only sessions without a user (e.g. the login page).
    RequiresGuest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Route {
    pub name: &'static str,
    /// Path pattern; `:param` matches one non-empty segment.
    pub path: &'static str,
    pub access: Access,
}

pub const LOGIN: &str = "login";
pub const HOME: &str = "home";

pub static ROUTES: &[Route] = &[
    Route {
        name: LOGIN,
        path: "/login",
        access: Access::RequiresGuest,
    },
    Route {
        name: HOME,
        path: "/",
        access: Access::RequiresAuth,
    },
    Route {
        name: "cards",
        path: "/cards",
        access: Access::RequiresAuth,
    },
    Route {
        name: "create-card",
        path: "/cards/create",
        access: Access::RequiresAuth,
    },
    Route {
        name: "edit-card",
        path: "/cards/:id/edit",
        access: Access::RequiresAuth,
    },
    Route {
        name: "labels",
        path: "/labels",
        access: Access::RequiresAuth,
    },
    Route {
        name: "create-label",
        path: "/labels/create",
        access: Access::RequiresAuth,
    },
    Route {
        name: "share-labels",
        path: "/labels/share",
        access: Access::RequiresAuth,
    },
    Route {
        name: "quiz",
        path: "/quiz",
        access: Access::RequiresAuth,
    },
    Route {
        name: "quiz-history",
        path: "/quiz/history",
        access: Access::RequiresAuth,
    },
];

impl Route {
    /// Look up a route by name.
    pub fn find(name: &str) -> Option<&'static Route> {
        ROUTES.iter().find(|r| r.name == name)
    }

    /// Find the route whose pattern matches `path`. Literal patterns win over
    /// parameterised ones because they come first in the table.
    pub fn match_path(path: &str) -> Option<&'static Route> {
        ROUTES.iter().find(|r| r.matches(path))
    }

    pub fn requires_auth(&self) -> bool {
        self.access == Access::RequiresAuth
    }

    fn matches(&self, path: &str) -> bool {
        let want: Vec<&str> = self.path.split('/').filter(|s| !s.is_empty()).collect();
        let got: Vec<&str> = path
            .split('?')
            .next()
            .unwrap_or_default()
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();
        want.len() == got.len()
            && want
                .iter()
                .zip(&got)
                .all(|(w, g)| w.starts_with(':') || w == g)
    }
}

/// Outcome of the navigation guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Proceed,
    /// Go to the named route instead.
    Redirect(&'static str),
}

/// Decide whether a session may enter `route`.
pub fn guard(route: &Route, is_authenticated: bool) -> Navigation {
    match route.access {
        Access::RequiresAuth if !is_authenticated => Navigation::Redirect(LOGIN),
        Access::RequiresGuest if is_authenticated => Navigation::Redirect(HOME),
        _ => Navigation::Proceed,
    }
}
