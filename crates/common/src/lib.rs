//! Shared building blocks for the portal crates: the JSON response
//! envelope, logging setup and startup environment checks.

pub mod types;
pub mod utils;
pub mod env;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health::running();
        assert!(h.success);
        assert_eq!(h.message, "Server is running!");
    }
}
