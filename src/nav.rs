//! decides what happens when a command navigates to a route path

use veevent_lib::edge::{self, EdgeDecision};
use veevent_lib::{Decision, RouteGuard, SessionView};

/// runs the edge check and then the route guard. public paths never reach
/// the guard
pub fn resolve(path: &str, session: &SessionView<'_>, guard: &RouteGuard) -> Decision {
    if edge::is_public(path) {
        return Decision::Render;
    }

    if let EdgeDecision::Redirect(location) = edge::check(path, session.is_authenticated()) {
        return Decision::RedirectToLogin {
            return_to: location
        };
    }

    let decision = guard.evaluate(path, session);

    tracing::debug!("navigation {} -> {:?}", path, decision);

    decision
}

/// the path to continue with once a login completes
pub fn return_path(return_to: &str, attempted: &str) -> String {
    edge::redirect_target(return_to).unwrap_or_else(|| attempted.to_owned())
}
