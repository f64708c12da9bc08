pub mod api;
pub mod config;
pub mod ddns;
pub mod error;
pub mod git;
pub mod logging;
pub mod monman;
pub mod title;

pub use error::{Error, Result};

#[cfg(test)]
mod tests;
