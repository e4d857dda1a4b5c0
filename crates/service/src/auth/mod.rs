//! Auth module: input types, errors and the signup/login service.
//!
//! There are no sessions; a successful login simply returns the intern.

pub mod domain;
pub mod errors;
pub mod service;

pub use service::{AuthConfig, AuthService};
