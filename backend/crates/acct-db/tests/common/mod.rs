#![allow(dead_code)]

use acct_core::UserProfile;

use chrono::{DateTime, TimeZone, Utc};
use sqlx::SqlitePool;

/// In-memory SQLite pool with migrations applied
pub async fn create_test_pool() -> SqlitePool {
    acct_db::connect("sqlite::memory:", 1)
        .await
        .expect("Failed to create test pool")
}

/// Fixed, whole-second instant so stored timestamps compare equal
pub fn test_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, 14, 9, 30, 0).unwrap()
}

/// A registered profile with an email and a placeholder hash
pub fn create_test_profile(uid: &str, email: &str) -> UserProfile {
    let mut profile = UserProfile::registered(
        uid.to_string(),
        "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
        test_instant(),
    );
    profile.email = Some(email.to_string());
    profile.first_name = Some("Ada".to_string());
    profile.last_name = Some("Lovelace".to_string());
    profile.country = Some("GB".to_string());
    profile
}
