pub mod auth;
pub mod response;

pub use auth::{account_auth_middleware, Denial, TOKEN_HEADER};
pub use response::{ApiResponse, ApiResult};
