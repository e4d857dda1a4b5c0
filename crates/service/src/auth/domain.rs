use serde::{Deserialize, Serialize};

/// Login input. Missing fields deserialize as empty strings so the service
/// decides how to reject them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginInput {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Signup input
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignupInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}
