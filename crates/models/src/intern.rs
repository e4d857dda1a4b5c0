use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::reward::{RewardCatalog, RewardStatus};

/// Suffix appended to every referral code.
pub const REFERRAL_SUFFIX: &str = "2025";

/// Intern as persisted by a repository.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternRecord {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub referral_code: String,
    #[serde(default)]
    pub total_donations: f64,
    pub join_date: NaiveDate,
    /// argon2 PHC string; absent for seeded demo accounts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
}

/// Everything a repository needs to create an intern; id and join date are
/// assigned on insert.
#[derive(Clone, Debug)]
pub struct NewIntern {
    pub name: String,
    pub email: String,
    pub referral_code: String,
    pub password_hash: Option<String>,
}

impl NewIntern {
    /// Build the record for `id` joining on `join_date`. A referral code already held
    /// by someone else gets the id appended.
    pub fn into_record(self, id: u32, join_date: NaiveDate, code_taken: bool) -> InternRecord {
        let referral_code = if code_taken { format!("{}{}", self.referral_code, id) } else { self.referral_code };
        InternRecord {
            id,
            name: self.name,
            email: self.email,
            referral_code,
            total_donations: 0.0,
            join_date,
            password_hash: self.password_hash,
        }
    }
}

/// Public view of an intern with their badge progress.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternProfile {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub referral_code: String,
    pub total_donations: f64,
    pub join_date: NaiveDate,
    pub rewards: Vec<RewardStatus>,
}

impl InternProfile {
    pub fn from_record(record: &InternRecord, catalog: &RewardCatalog) -> Self {
        Self {
            id: record.id,
            name: record.name.clone(),
            email: record.email.clone(),
            referral_code: record.referral_code.clone(),
            total_donations: record.total_donations,
            join_date: record.join_date,
            rewards: catalog.evaluate(record.total_donations),
        }
    }
}

/// One leaderboard row. `rank` is 1-based.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub id: u32,
    pub name: String,
    pub referral_code: String,
    pub total_donations: f64,
    pub badges: Vec<String>,
}

/// Sort interns by total donations, highest first. Equal totals keep no
/// particular order.
pub fn sort_by_donations(interns: &mut [InternRecord]) {
    interns.sort_by(|a, b| b.total_donations.total_cmp(&a.total_donations));
}

/// Rank interns by donations and turn them into leaderboard rows.
pub fn leaderboard(mut interns: Vec<InternRecord>, catalog: &RewardCatalog) -> Vec<LeaderboardEntry> {
    sort_by_donations(&mut interns);
    interns
        .into_iter()
        .zip(1u32..)
        .map(|(i, rank)| LeaderboardEntry {
            rank,
            badges: catalog.unlocked_names(i.total_donations),
            id: i.id,
            name: i.name,
            referral_code: i.referral_code,
            total_donations: i.total_donations,
        })
        .collect()
}

/// Lower-cased name with all whitespace removed, plus the yearly suffix.
pub fn referral_code(name: &str) -> String {
    let slug: String = name.chars().filter(|c| !c.is_whitespace()).flat_map(char::to_lowercase).collect();
    format!("{slug}{REFERRAL_SUFFIX}")
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn validate_email(email: &str) -> Result<(), ModelError> {
    let email = email.trim();
    let Some((local, domain)) = email.split_once('@') else {
        return Err(ModelError::Validation("invalid email".into()));
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') || email.contains(char::is_whitespace) {
        return Err(ModelError::Validation("invalid email".into()));
    }
    Ok(())
}

pub fn validate_name(name: &str) -> Result<(), ModelError> {
    if name.trim().is_empty() {
        return Err(ModelError::Validation("name required".into()));
    }
    if name.chars().count() > 100 {
        return Err(ModelError::Validation("name too long (<=100)".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u32, name: &str, total: f64) -> InternRecord {
        InternRecord {
            id,
            name: name.into(),
            email: format!("{}@example.com", name.to_lowercase()),
            referral_code: referral_code(name),
            total_donations: total,
            join_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            password_hash: None,
        }
    }

    #[test]
    fn referral_code_strips_whitespace_and_lowercases() {
        assert_eq!(referral_code("John Doe"), "johndoe2025");
        assert_eq!(referral_code("  Mary  Ann\tLee "), "maryannlee2025");
    }

    #[test]
    fn email_validation() {
        assert!(validate_email("a@b.com").is_ok());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@b.com").is_err());
        assert!(validate_email("a@").is_err());
        assert!(validate_email("a b@c.com").is_err());
        assert_eq!(normalize_email("  Alex@Example.COM "), "alex@example.com");
    }

    #[test]
    fn name_validation() {
        assert!(validate_name("Alex").is_ok());
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"x".repeat(101)).is_err());
    }

    #[test]
    fn leaderboard_sorted_descending_with_consecutive_ranks() {
        let rows = leaderboard(
            vec![record(1, "Low", 10.0), record(2, "High", 9000.0), record(3, "Mid", 2500.0)],
            &RewardCatalog::standard(),
        );
        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["High", "Mid", "Low"]);
        assert_eq!(rows.iter().map(|r| r.rank).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(rows[0].badges, vec!["Bronze Fundraiser", "Silver Fundraiser", "Gold Fundraiser"]);
        assert!(rows[2].badges.is_empty());
    }

    #[test]
    fn tied_totals_still_get_consecutive_ranks() {
        let rows = leaderboard(
            vec![record(1, "Ann", 500.0), record(2, "Bob", 1500.0), record(3, "Cal", 500.0)],
            &RewardCatalog::standard(),
        );
        assert_eq!(rows.iter().map(|r| r.rank).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(rows[0].name, "Bob");
        assert!(rows.windows(2).all(|w| w[0].total_donations >= w[1].total_donations));
        assert_eq!(rows[1].total_donations, rows[2].total_donations);
    }

    #[test]
    fn taken_referral_code_gets_id_suffix() {
        let new = NewIntern {
            name: "John Doe".into(),
            email: "john@example.com".into(),
            referral_code: referral_code("John Doe"),
            password_hash: None,
        };
        let rec = new.clone().into_record(7, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(), true);
        assert_eq!(rec.referral_code, "johndoe20257");
        assert_eq!(rec.total_donations, 0.0);
        let rec = new.into_record(7, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(), false);
        assert_eq!(rec.referral_code, "johndoe2025");
    }

    #[test]
    fn profile_hides_password_hash() {
        let mut r = record(1, "Alex", 1200.0);
        r.password_hash = Some("$argon2id$secret".into());
        let json = serde_json::to_value(InternProfile::from_record(&r, &RewardCatalog::standard())).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert_eq!(json["referralCode"], "alex2025");
        assert_eq!(json["joinDate"], "2025-01-01");
        assert_eq!(json["rewards"][0]["unlocked"], true);
        assert_eq!(json["rewards"][1]["unlocked"], false);
    }
}
