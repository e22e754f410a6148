// handlers/protected/mod.rs - endpoints behind account_auth_middleware
//
// By the time these run, the x-jwt-token header has been validated and its
// bank number matched against the account named in the path.
pub mod account;

pub use account::{account_delete, account_get};
