//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, state machine)
//! - `redesign` - Style catalog, images, room analysis, projects, pipeline phases,
//!   and the error classifier
//! - `account` - User accounts, credit balances, and persistence errors

pub mod account;
pub mod foundation;
pub mod redesign;
