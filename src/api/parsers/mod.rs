pub mod dashboard;
pub mod players;
pub mod result_set;

pub use result_set::{ResultSet, Row};
