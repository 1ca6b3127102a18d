use crate::{DbError, ProfileStore, Result as DbErrorResult};

use acct_core::{ProfileUpdate, UserProfile};

use std::panic::Location;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use error_location::ErrorLocation;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

const SELECT_PROFILE: &str = r#"
    SELECT uid, email, phone_number, is_email_verified, is_phone_verified,
        is_guest_user, is_billable_user, is_2f_needed, password_hash,
        first_name, last_name, country, address, created_at, last_login_at
    FROM user_profiles
"#;

pub struct ProfileRepository {
    pool: SqlitePool,
}

impl ProfileRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn find_where(&self, column: &str, value: &str) -> DbErrorResult<Option<UserProfile>> {
        let sql = format!("{} WHERE {} = ?", SELECT_PROFILE, column);

        let row = sqlx::query(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(profile_from_row).transpose()
    }
}

#[async_trait]
impl ProfileStore for ProfileRepository {
    async fn create(&self, profile: &UserProfile) -> DbErrorResult<()> {
        sqlx::query(
            r#"
                INSERT INTO user_profiles (
                    uid, email, phone_number, is_email_verified, is_phone_verified,
                    is_guest_user, is_billable_user, is_2f_needed, password_hash,
                    first_name, last_name, country, address, created_at, last_login_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&profile.uid)
        .bind(&profile.email)
        .bind(&profile.phone_number)
        .bind(profile.is_email_verified)
        .bind(profile.is_phone_verified)
        .bind(profile.is_guest_user)
        .bind(profile.is_billable_user)
        .bind(profile.is_2f_needed)
        .bind(&profile.password_hash)
        .bind(&profile.first_name)
        .bind(&profile.last_name)
        .bind(&profile.country)
        .bind(&profile.address)
        .bind(profile.created_at.timestamp())
        .bind(profile.last_login_at.timestamp())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_uid(&self, uid: &str) -> DbErrorResult<Option<UserProfile>> {
        self.find_where("uid", uid).await
    }

    async fn find_by_email(&self, email: &str) -> DbErrorResult<Option<UserProfile>> {
        self.find_where("email", email).await
    }

    async fn find_by_phone(&self, phone_number: &str) -> DbErrorResult<Option<UserProfile>> {
        self.find_where("phone_number", phone_number).await
    }

    async fn update(&self, uid: &str, update: &ProfileUpdate) -> DbErrorResult<bool> {
        // COALESCE keeps the stored value for every field left unset
        let result = sqlx::query(
            r#"
                UPDATE user_profiles SET
                    email = COALESCE(?, email),
                    phone_number = COALESCE(?, phone_number),
                    is_email_verified = COALESCE(?, is_email_verified),
                    is_phone_verified = COALESCE(?, is_phone_verified),
                    is_2f_needed = COALESCE(?, is_2f_needed),
                    password_hash = COALESCE(?, password_hash),
                    last_login_at = COALESCE(?, last_login_at)
                WHERE uid = ?
            "#,
        )
        .bind(&update.email)
        .bind(&update.phone_number)
        .bind(update.is_email_verified)
        .bind(update.is_phone_verified)
        .bind(update.is_2f_needed)
        .bind(&update.password_hash)
        .bind(update.last_login_at.map(|at| at.timestamp()))
        .bind(uid)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn profile_from_row(row: &SqliteRow) -> DbErrorResult<UserProfile> {
    Ok(UserProfile {
        uid: row.try_get("uid")?,
        email: row.try_get("email")?,
        phone_number: row.try_get("phone_number")?,
        is_email_verified: row.try_get("is_email_verified")?,
        is_phone_verified: row.try_get("is_phone_verified")?,
        is_guest_user: row.try_get("is_guest_user")?,
        is_billable_user: row.try_get("is_billable_user")?,
        is_2f_needed: row.try_get("is_2f_needed")?,
        password_hash: row.try_get("password_hash")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        country: row.try_get("country")?,
        address: row.try_get("address")?,
        created_at: timestamp(row.try_get("created_at")?, "created_at")?,
        last_login_at: timestamp(row.try_get("last_login_at")?, "last_login_at")?,
    })
}

#[track_caller]
fn timestamp(secs: i64, column: &str) -> DbErrorResult<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0).ok_or_else(|| DbError::Initialization {
        message: format!("Invalid timestamp in user_profiles.{}", column),
        location: ErrorLocation::from(Location::caller()),
    })
}
