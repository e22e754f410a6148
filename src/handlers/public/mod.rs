// handlers/public/mod.rs - endpoints that need no token
//
// Login is how a token is obtained; account creation and listing stay open,
// and transfer is accepted but not yet applied to balances.
pub mod account;
pub mod health;
pub mod login;
pub mod transfer;

pub use account::{account_create, account_list, CreateAccountRequest};
pub use health::health;
pub use login::{login, LoginRequest, LoginResponse};
pub use transfer::{transfer, TransferRequest};
