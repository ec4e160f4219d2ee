pub mod calculator;
pub mod session;
mod source;

pub use calculator::{ShotCalculation, calculate};
pub use session::{Phase, PlayerSource, SearchSession, ViewState};
