pub mod handlers;
pub mod models;
pub mod parsers;
pub mod routes;
pub mod stats_client;


pub use stats_client::{SearchOutcome, StatsClient};
