pub mod memory;
pub mod models;
pub mod postgres;
pub mod store;

pub use memory::InMemoryStore;
pub use models::Account;
pub use postgres::PostgresStore;
pub use store::{StoreError, Storage};
