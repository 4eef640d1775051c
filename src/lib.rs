pub mod cascade;
pub mod config;
pub mod error;
pub mod fetch;
pub mod ingest;
pub mod output;
pub mod pipeline;
pub mod schema;
pub mod table;
