use crate::edge;
use crate::roles::RolePolicy;
use crate::routes::RouteTable;

/// what the guard needs to know about the current session
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionView<'a> {
    pub token: Option<&'a str>,
    pub role: Option<&'a str>,
    pub loading: bool,
}

impl<'a> SessionView<'a> {
    pub fn is_authenticated(&self) -> bool {
        self.token.map(|t| !t.is_empty()).unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogoutReason {
    /// the role of the user is not allowed to use the application
    RoleNotAllowed(String),
    /// the role is allowed but not for the requested path
    RouteDenied {
        role: String,
        prefix: String,
    },
}

impl std::fmt::Display for LogoutReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogoutReason::RoleNotAllowed(role) => write!(
                f, "role \"{}\" is not allowed to use the admin application", role
            ),
            LogoutReason::RouteDenied { role, prefix } => write!(
                f, "role \"{}\" is not allowed to access {}", role, prefix
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// the session has not finished loading
    Pending,
    Render,
    RedirectToLogin {
        return_to: String,
    },
    ForceLogout {
        reason: LogoutReason,
    },
}

#[derive(Debug, Clone, Default)]
pub struct RouteGuard {
    roles: RolePolicy,
    routes: RouteTable,
}

impl RouteGuard {
    pub fn new(roles: RolePolicy, routes: RouteTable) -> Self {
        RouteGuard { roles, routes }
    }

    pub fn roles(&self) -> &RolePolicy {
        &self.roles
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn evaluate(&self, path: &str, session: &SessionView<'_>) -> Decision {
        if session.loading {
            return Decision::Pending;
        }

        if !session.is_authenticated() {
            return Decision::RedirectToLogin {
                return_to: edge::login_redirect(path)
            };
        }

        let given = session.role.unwrap_or_default();

        let Some(role) = self.roles.resolve(given) else {
            return Decision::ForceLogout {
                reason: LogoutReason::RoleNotAllowed(given.to_owned())
            };
        };

        if let Some(rule) = self.routes.find(path) {
            if !rule.permits(&role) {
                return Decision::ForceLogout {
                    reason: LogoutReason::RouteDenied {
                        role: role.to_string(),
                        prefix: rule.prefix.clone(),
                    }
                };
            }
        }

        Decision::Render
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::roles::Role;
    use crate::routes::{RouteRule, PrefixMatch};

    fn view<'a>(token: Option<&'a str>, role: Option<&'a str>) -> SessionView<'a> {
        SessionView {
            token,
            role,
            loading: false,
        }
    }

    #[test]
    fn pending_while_loading() {
        let guard = RouteGuard::default();
        let session = SessionView {
            token: Some("abc"),
            role: Some("admin"),
            loading: true,
        };

        assert_eq!(guard.evaluate("/events", &session), Decision::Pending);
    }

    #[test]
    fn unauthenticated_redirects_with_return_path() {
        let guard = RouteGuard::default();

        for token in [None, Some("")] {
            let result = guard.evaluate("/events/3", &view(token, Some("admin")));

            let Decision::RedirectToLogin { return_to } = result else {
                panic!("expected redirect for token {:?}", token);
            };

            assert_eq!(edge::redirect_target(&return_to).as_deref(), Some("/events/3"));
        }
    }

    #[test]
    fn unknown_role_is_logged_out_everywhere() {
        let guard = RouteGuard::default();

        for path in ["/", "/events", "/dashboard", "/profile"] {
            assert_eq!(
                guard.evaluate(path, &view(Some("tok"), Some("user"))),
                Decision::ForceLogout {
                    reason: LogoutReason::RoleNotAllowed(String::from("user"))
                },
                "path {:?}",
                path
            );
        }

        assert!(matches!(
            guard.evaluate("/", &view(Some("tok"), None)),
            Decision::ForceLogout { reason: LogoutReason::RoleNotAllowed(_) }
        ));
    }

    #[test]
    fn route_roles_are_enforced() {
        let guard = RouteGuard::default();

        assert_eq!(
            guard.evaluate("/reports/2", &view(Some("tok"), Some("Organizer"))),
            Decision::ForceLogout {
                reason: LogoutReason::RouteDenied {
                    role: String::from("organizer"),
                    prefix: String::from("/reports"),
                }
            }
        );
        assert_eq!(guard.evaluate("/reports/2", &view(Some("tok"), Some("ADMIN"))), Decision::Render);
        assert_eq!(guard.evaluate("/events", &view(Some("tok"), Some("organizer"))), Decision::Render);
    }

    #[test]
    fn unmatched_route_renders_for_allowed_roles() {
        let guard = RouteGuard::default();

        for role in ["admin", "organizer", "authservice"] {
            assert_eq!(guard.evaluate("/dashboard", &view(Some("tok"), Some(role))), Decision::Render);
        }
    }

    #[test]
    fn precedence_policy_changes_outcome() {
        let rules = vec![
            RouteRule::new("/events", [Role::Admin, Role::Organizer]),
            RouteRule::new("/events/moderation", [Role::Admin]),
        ];
        let session = view(Some("tok"), Some("organizer"));

        let longest = RouteGuard::new(
            RolePolicy::default(),
            RouteTable::new(rules.clone(), PrefixMatch::Longest)
        );
        let first = RouteGuard::new(
            RolePolicy::default(),
            RouteTable::new(rules, PrefixMatch::First)
        );

        assert!(matches!(
            longest.evaluate("/events/moderation", &session),
            Decision::ForceLogout { .. }
        ));
        assert_eq!(first.evaluate("/events/moderation", &session), Decision::Render);
    }
}
