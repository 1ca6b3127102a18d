pub mod identifier;
pub mod password_rule;
pub mod profile_update;
pub mod user_profile;
