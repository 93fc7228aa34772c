//! Database access layer shared by the quotd services

mod init;
pub mod models;
pub mod quotes;

pub use init::{connect_memory, create_quotes_table, init_database};
