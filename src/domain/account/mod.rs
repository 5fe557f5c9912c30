//! Account domain - users, credit balances, and collaborator errors.

mod credits;
mod errors;
mod user_account;

pub use credits::Credits;
pub use errors::{DirectoryError, LedgerError, StoreError};
pub use user_account::{Identity, UserAccount};
