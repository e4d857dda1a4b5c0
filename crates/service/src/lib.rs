//! Service layer for the intern portal.
//! - `interns`: repository abstraction with memory and JSON-file backends,
//!   plus ranking and profile views.
//! - `auth`: signup and login workflows on top of the same repository.
//! - Clear error types that the HTTP layer maps onto status codes.

pub mod errors;
pub mod auth;
pub mod interns;
pub mod runtime;
pub mod storage;
