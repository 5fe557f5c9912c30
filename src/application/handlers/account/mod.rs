//! Account handlers - session creation and current-user lookup.

mod create_session;
mod get_current_user;

pub use create_session::{CreateSessionCommand, CreateSessionHandler};
pub use get_current_user::{GetCurrentUserHandler, GetCurrentUserQuery};
