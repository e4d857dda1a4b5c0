use std::sync::Arc;

use argon2::{
    password_hash::{PasswordHasher, PasswordVerifier, SaltString},
    Argon2, PasswordHash,
};
use models::{
    errors::ModelError,
    intern::{normalize_email, referral_code, validate_email, validate_name},
    InternRecord, NewIntern,
};
use rand::rngs::OsRng;
use tracing::{debug, info, instrument};

use super::domain::{LoginInput, SignupInput};
use super::errors::AuthError;
use crate::interns::InternRepository;

/// Auth service configuration
#[derive(Clone, Debug)]
pub struct AuthConfig {
    /// Password accepted for accounts without a stored hash (seeded demo data).
    /// `None` lets those accounts in by email alone.
    pub demo_password: Option<String>,
    pub min_password_len: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self { demo_password: Some("password123".into()), min_password_len: 8 }
    }
}

/// Signup and login, independent of the web framework.
pub struct AuthService {
    repo: Arc<dyn InternRepository>,
    cfg: AuthConfig,
}

fn validation(e: ModelError) -> AuthError {
    match e {
        ModelError::Validation(msg) => AuthError::Validation(msg),
    }
}

impl AuthService {
    pub fn new(repo: Arc<dyn InternRepository>, cfg: AuthConfig) -> Self {
        Self { repo, cfg }
    }

    /// Create an intern with zero donations and a hashed password.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn signup(&self, input: SignupInput) -> Result<InternRecord, AuthError> {
        if input.name.trim().is_empty() || input.email.trim().is_empty() || input.password.is_empty() {
            return Err(AuthError::Validation("name, email and password are required".into()));
        }
        validate_name(&input.name).map_err(validation)?;
        validate_email(&input.email).map_err(validation)?;
        if input.password.chars().count() < self.cfg.min_password_len {
            return Err(AuthError::Validation(format!(
                "password too short (>={})",
                self.cfg.min_password_len
            )));
        }

        let email = normalize_email(&input.email);
        if let Some(existing) = self.repo.find_by_email(&email).await? {
            debug!("intern exists: {}", existing.email);
            return Err(AuthError::Conflict);
        }

        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(input.password.as_bytes(), &salt)
            .map_err(|e| AuthError::HashError(e.to_string()))?
            .to_string();

        let name = input.name.trim().to_string();
        let intern = self
            .repo
            .insert(NewIntern { referral_code: referral_code(&name), name, email, password_hash: Some(hash) })
            .await?;
        info!(intern_id = intern.id, email = %intern.email, referral_code = %intern.referral_code, "intern_registered");
        Ok(intern)
    }

    /// Authenticate by email. Accounts with a stored hash are verified with
    /// argon2; the rest are checked against the demo password when one is set.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: LoginInput) -> Result<InternRecord, AuthError> {
        let intern = self
            .repo
            .find_by_email(&input.email)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        match (&intern.password_hash, &self.cfg.demo_password) {
            (Some(hash), _) => {
                let parsed = PasswordHash::new(hash).map_err(|e| AuthError::HashError(e.to_string()))?;
                if Argon2::default().verify_password(input.password.as_bytes(), &parsed).is_err() {
                    return Err(AuthError::Unauthorized);
                }
            }
            (None, Some(demo)) if input.password != *demo => return Err(AuthError::Unauthorized),
            (None, _) => {}
        }

        info!(intern_id = intern.id, "intern_logged_in");
        Ok(intern)
    }
}
