//! Domain types and pure logic for the record catalog.
//!
//! Nothing in this crate touches the database, so it can be shared by the
//! store, the HTTP layer, and tests alike.

pub mod album;
pub mod error;
pub mod filters;
pub mod types;
pub mod validator;
