pub mod firebase;
pub mod in_memory;
pub mod service_account;
