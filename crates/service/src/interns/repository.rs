use async_trait::async_trait;
use chrono::Utc;
use models::{intern::normalize_email, InternRecord, NewIntern};

use crate::errors::ServiceError;

/// Persistence abstraction for interns.
#[async_trait]
pub trait InternRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<InternRecord>, ServiceError>;
    async fn find_by_id(&self, id: u32) -> Result<Option<InternRecord>, ServiceError>;
    /// Case-insensitive lookup.
    async fn find_by_email(&self, email: &str) -> Result<Option<InternRecord>, ServiceError>;
    /// Assign an id and join date and store the intern. Fails with
    /// `ServiceError::Conflict` when the email is already registered.
    async fn insert(&self, new: NewIntern) -> Result<InternRecord, ServiceError>;
}

pub(crate) fn find_email<'a>(interns: &'a [InternRecord], email: &str) -> Option<&'a InternRecord> {
    let email = normalize_email(email);
    interns.iter().find(|i| normalize_email(&i.email) == email)
}

/// Append `new` to `interns`, shared by every backend so they agree on ids,
/// duplicate detection and referral code collisions.
pub(crate) fn append_intern(interns: &mut Vec<InternRecord>, new: NewIntern) -> Result<InternRecord, ServiceError> {
    if find_email(interns, &new.email).is_some() {
        return Err(ServiceError::Conflict(format!("email {}", new.email)));
    }
    let id = interns
        .iter()
        .map(|i| i.id)
        .max()
        .unwrap_or(0)
        .checked_add(1)
        .ok_or_else(|| ServiceError::Storage("intern id space exhausted".into()))?;
    let code_taken = interns.iter().any(|i| i.referral_code == new.referral_code);
    let record = new.into_record(id, Utc::now().date_naive(), code_taken);
    interns.push(record.clone());
    Ok(record)
}
