//! Demo dataset used when no data file exists yet.

use chrono::NaiveDate;

use crate::intern::{referral_code, InternRecord};

const DEMO: &[(&str, &str, f64, (i32, u32, u32))] = &[
    ("Alex Johnson", "alex@example.com", 12500.0, (2024, 6, 1)),
    ("Priya Sharma", "priya@example.com", 8750.5, (2024, 6, 3)),
    ("Marcus Lee", "marcus@example.com", 5200.0, (2024, 6, 10)),
    ("Sofia Garcia", "sofia@example.com", 3400.25, (2024, 6, 15)),
    ("Daniel Kim", "daniel@example.com", 1850.0, (2024, 7, 1)),
    ("Emma Brown", "emma@example.com", 640.0, (2024, 7, 8)),
];

/// Six interns spread across every badge tier, with ids 1..=6.
pub fn demo_interns() -> Vec<InternRecord> {
    DEMO.iter()
        .zip(1u32..)
        .filter_map(|(&(name, email, total, (y, m, d)), id)| {
            Some(InternRecord {
                id,
                name: name.into(),
                email: email.into(),
                referral_code: referral_code(name),
                total_donations: total,
                join_date: NaiveDate::from_ymd_opt(y, m, d)?,
                password_hash: None,
            })
        })
        .collect()
}
