pub mod models;
pub mod season;

pub use models::{PaginationMeta, Player, PlayerStats, SearchEnvelope, round_one_decimal};
pub use season::Season;
