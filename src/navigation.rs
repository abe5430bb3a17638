//! Client-side routes and the navigator that moves between them.

use std::fmt;
use std::sync::{Arc, RwLock};

use tracing::debug;

/// Every view the client can show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Front,
    Popular,
    Latest,
    Tags,
    Tag(String),
    Search(String),
    Owner { id: i64, name: String },
    Detail(i64),
    Upload,
    Login,
    RecoverPass,
    ChangePass,
    Signup,
}

impl Route {
    /// Views that bounce anonymous users to the login page.
    pub fn login_required(&self) -> bool {
        matches!(self, Route::Upload)
    }

    /// Parse a client path such as `/detail/12`. Unknown paths fall back to
    /// the front page.
    pub fn parse(path: &str) -> Route {
        let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
        match segments.as_slice() {
            ["popular"] => Route::Popular,
            ["latest"] => Route::Latest,
            ["tags"] => Route::Tags,
            ["tag", tag] => Route::Tag((*tag).to_string()),
            ["search", q] => Route::Search((*q).to_string()),
            ["owner", id, name] => match id.parse() {
                Ok(id) => Route::Owner {
                    id,
                    name: (*name).to_string(),
                },
                Err(_) => Route::Front,
            },
            ["detail", id] => id.parse().map(Route::Detail).unwrap_or(Route::Front),
            ["upload"] => Route::Upload,
            ["login"] => Route::Login,
            ["recoverpass"] => Route::RecoverPass,
            ["changepass"] => Route::ChangePass,
            ["signup"] => Route::Signup,
            _ => Route::Front,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Front => write!(f, "/"),
            Route::Popular => write!(f, "/popular"),
            Route::Latest => write!(f, "/latest"),
            Route::Tags => write!(f, "/tags"),
            Route::Tag(tag) => write!(f, "/tag/{}", tag),
            Route::Search(q) => write!(f, "/search/{}", q),
            Route::Owner { id, name } => write!(f, "/owner/{}/{}", id, name),
            Route::Detail(id) => write!(f, "/detail/{}", id),
            Route::Upload => write!(f, "/upload"),
            Route::Login => write!(f, "/login"),
            Route::RecoverPass => write!(f, "/recoverpass"),
            Route::ChangePass => write!(f, "/changepass"),
            Route::Signup => write!(f, "/signup"),
        }
    }
}

#[derive(Debug)]
struct NavState {
    current: Route,
    last_login_url: Option<Route>,
}

/// Tracks the current route and where to return to after logging in.
#[derive(Clone)]
pub struct Navigator {
    state: Arc<RwLock<NavState>>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(NavState {
                current: Route::Front,
                last_login_url: None,
            })),
        }
    }

    pub fn current(&self) -> Route {
        self.state
            .read()
            .unwrap_or_else(|p| p.into_inner())
            .current
            .clone()
    }

    pub fn go(&self, route: Route) {
        debug!("Navigating to {}", route);
        self.state.write().unwrap_or_else(|p| p.into_inner()).current = route;
    }

    /// Remember the current route so a successful login can come back to it.
    pub fn set_last_login_url(&self) {
        let mut state = self.state.write().unwrap_or_else(|p| p.into_inner());
        if state.current != Route::Login {
            state.last_login_url = Some(state.current.clone());
        }
    }

    pub fn last_login_url(&self) -> Option<Route> {
        self.state
            .read()
            .unwrap_or_else(|p| p.into_inner())
            .last_login_url
            .clone()
    }

    pub fn redirect_to_login(&self) {
        self.set_last_login_url();
        self.go(Route::Login);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_round_trip() {
        let routes = [
            Route::Front,
            Route::Tag("beach".into()),
            Route::Owner {
                id: 3,
                name: "ann".into(),
            },
            Route::Detail(42),
            Route::ChangePass,
        ];
        for route in routes {
            assert_eq!(Route::parse(&route.to_string()), route);
        }
    }

    #[test]
    fn test_unknown_path_is_front() {
        assert_eq!(Route::parse("/nowhere/at/all"), Route::Front);
        assert_eq!(Route::parse("/detail/abc"), Route::Front);
    }

    #[test]
    fn test_redirect_to_login_remembers_origin() {
        let nav = Navigator::new();
        nav.go(Route::Upload);
        nav.redirect_to_login();
        assert_eq!(nav.current(), Route::Login);
        assert_eq!(nav.last_login_url(), Some(Route::Upload));

        // A second redirect from the login page keeps the original origin.
        nav.redirect_to_login();
        assert_eq!(nav.last_login_url(), Some(Route::Upload));
    }
}
