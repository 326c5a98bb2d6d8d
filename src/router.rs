//! # Route Table and Navigation Guard
//!
//! The application surface is a fixed set of routes, each flagged with
//! whether it requires an authenticated session. Before dispatching a
//! command, the CLI evaluates the guard for the command's route exactly the
//! way the web shell evaluates it before every navigation:
//!
//! 1. target requires auth and no token is stored → redirect to `/login`;
//! 2. target is `/login` and a token is stored → redirect to `/`;
//! 3. otherwise proceed.
//!
//! There is no other guard logic: no role checks and no token expiry
//! validation beyond presence.

/// Login route path
pub const LOGIN_PATH: &str = "/login";

/// Home route path
pub const HOME_PATH: &str = "/";

/// Document chunking workspace
pub const DOCUMENT_CHUNKING_PATH: &str = "/document-chunking";

/// RAG Q&A workspace
pub const RAG_QA_PATH: &str = "/rag-qa";

/// Document library listing
pub const DOCUMENT_LIBRARY_PATH: &str = "/document-library";

/// A single entry in the route table
#[derive(Debug, Clone, Copy)]
pub struct Route {
    /// Route path; `:name` segments match any single path segment
    pub path: &'static str,
    /// Route name
    pub name: &'static str,
    /// Whether navigation to this route requires a stored token
    pub requires_auth: bool,
}

/// The application's route table, fixed at startup and never mutated.
pub const ROUTES: &[Route] = &[
    Route {
        path: LOGIN_PATH,
        name: "login",
        requires_auth: false,
    },
    Route {
        path: HOME_PATH,
        name: "home",
        requires_auth: true,
    },
    Route {
        path: DOCUMENT_CHUNKING_PATH,
        name: "document-chunking",
        requires_auth: true,
    },
    Route {
        path: RAG_QA_PATH,
        name: "rag-qa",
        requires_auth: true,
    },
    Route {
        path: DOCUMENT_LIBRARY_PATH,
        name: "document-library",
        requires_auth: true,
    },
    Route {
        path: "/permanent-document/:document_id",
        name: "permanent-document",
        requires_auth: true,
    },
];

/// Outcome of a guard evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    /// Continue to the requested target
    Proceed,
    /// Navigate to the carried path instead
    Redirect(&'static str),
}

/// Look up the route matching a target path.
pub fn find_route(target: &str) -> Option<&'static Route> {
    ROUTES.iter().find(|route| matches_path(route.path, target))
}

/// Segment-wise path match; `:name` pattern segments match any single
/// non-empty target segment.
fn matches_path(pattern: &str, target: &str) -> bool {
    let pattern: Vec<&str> = pattern.trim_matches('/').split('/').collect();
    let target: Vec<&str> = target.trim_matches('/').split('/').collect();

    pattern.len() == target.len()
        && pattern
            .iter()
            .zip(&target)
            .all(|(p, t)| (p.starts_with(':') && !t.is_empty()) || p == t)
}

/// Evaluate the navigation guard for a target path.
///
/// Unknown paths carry no auth requirement and proceed.
pub fn check_navigation(target: &str, authenticated: bool) -> Guard {
    let requires_auth = find_route(target).map(|r| r.requires_auth).unwrap_or(false);

    if requires_auth && !authenticated {
        Guard::Redirect(LOGIN_PATH)
    } else if target == LOGIN_PATH && authenticated {
        Guard::Redirect(HOME_PATH)
    } else {
        Guard::Proceed
    }
}

/// Navigation collaborator.
///
/// Consumed by guard callers and by the unauthorized-response handler in the
/// HTTP client; the terminal implementation reports where a browser shell
/// would navigate.
pub trait Navigator: Send + Sync {
    /// Navigate to a route path.
    fn redirect(&self, path: &str);
}

/// Navigator that reports redirects on the terminal.
#[derive(Debug, Default)]
pub struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn redirect(&self, path: &str) {
        if path == LOGIN_PATH {
            crate::errors::display_warning("Session expired. Run `ragdoc login` to authenticate again.");
        } else {
            log::debug!("[router] redirect to {}", path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protected_route_without_token_redirects_to_login() {
        assert_eq!(
            check_navigation("/document-library", false),
            Guard::Redirect(LOGIN_PATH)
        );
    }

    #[test]
    fn test_login_with_token_redirects_home() {
        assert_eq!(check_navigation("/login", true), Guard::Redirect(HOME_PATH));
    }

    #[test]
    fn test_login_without_token_proceeds() {
        assert_eq!(check_navigation("/login", false), Guard::Proceed);
    }

    #[test]
    fn test_protected_route_with_token_proceeds() {
        assert_eq!(check_navigation("/rag-qa", true), Guard::Proceed);
        assert_eq!(check_navigation("/", true), Guard::Proceed);
    }

    #[test]
    fn test_home_without_token_redirects_to_login() {
        assert_eq!(check_navigation("/", false), Guard::Redirect(LOGIN_PATH));
    }

    #[test]
    fn test_param_route_matches_any_id() {
        let route = find_route("/permanent-document/doc_abc123").unwrap();
        assert_eq!(route.name, "permanent-document");
        assert!(route.requires_auth);

        assert_eq!(
            check_navigation("/permanent-document/doc_abc123", false),
            Guard::Redirect(LOGIN_PATH)
        );
    }

    #[test]
    fn test_param_route_requires_the_segment() {
        assert!(find_route("/permanent-document").is_none());
        assert!(find_route("/permanent-document/").is_none());
        assert!(find_route("/permanent-document/a/b").is_none());
    }

    #[test]
    fn test_unknown_route_proceeds() {
        assert_eq!(check_navigation("/not-a-route", false), Guard::Proceed);
    }

    #[test]
    fn test_route_table_paths_are_distinct() {
        for (i, a) in ROUTES.iter().enumerate() {
            for (j, b) in ROUTES.iter().enumerate() {
                if i != j {
                    assert_ne!(a.path, b.path);
                }
            }
        }
    }
}
