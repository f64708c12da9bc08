pub mod models;

pub use models::{ApiToken, Credentials, RawCredentials};
