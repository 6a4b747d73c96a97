//! HTTP plumbing shared by every slice.

mod error;
mod health;
mod pagination;
pub mod router;
mod state;

pub use error::{ErrorBody, error_response};
pub use pagination::{PaginationError, PaginationQuery};
pub use state::{ApiState, ApiStateBuilder, ApiStateError, ApiStateInner};
