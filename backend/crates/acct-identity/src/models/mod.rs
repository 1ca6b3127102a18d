pub mod identity_record;
pub mod identity_update;
pub mod new_identity;
