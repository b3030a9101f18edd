pub mod error;
pub mod ids;
pub mod serde;
pub mod validation;

pub mod roles;
pub mod routes;
pub mod edge;
pub mod guard;

pub use roles::{Role, RolePolicy};
pub use routes::{PrefixMatch, RouteRule, RouteTable};
pub use guard::{Decision, LogoutReason, RouteGuard, SessionView};
