//! Domain types and framework-free logic shared across the staybook crates.
//!
//! Everything in this crate is pure: no database access, no HTTP, no async.

pub mod booking;
pub mod error;
pub mod pagination;
pub mod reference;
pub mod roles;
pub mod types;
