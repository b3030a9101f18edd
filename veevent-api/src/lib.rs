pub mod error;
pub use error::{ApiError, ApiErrorKind, Detail};

pub mod traits;
pub use traits::Validator;

pub mod hal;
pub use hal::{HalError, Link, Links, Resource};

mod payload;
pub use payload::{Payload, PageInfo};

pub mod query;
pub use query::PageQuery;

pub mod auth;
pub mod users;
pub mod categories;
pub mod cities;
pub mod places;
pub mod events;
pub mod reports;
pub mod invitations;
pub mod tickets;

#[cfg(feature = "client")]
pub mod client;
