use serde::Serialize;

use crate::domain::{PlayerStats, round_one_decimal};

/// Points the calculation aims for
pub const TARGET_POINTS: f64 = 30.0;

/// Shots a player needs to reach [`TARGET_POINTS`] at their season efficiency
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShotCalculation {
    pub shots: f64,
    pub points_per_shot: f64,
    pub player_name: String,
    pub pts: f64,
    pub fga: f64,
}

/// `None` when either average is zero
pub fn calculate(stats: &PlayerStats) -> Option<ShotCalculation> {
    if stats.pts <= 0.0 || stats.fga <= 0.0 {
        return None;
    }

    let points_per_shot = stats.pts / stats.fga;
    Some(ShotCalculation {
        shots: round_one_decimal(TARGET_POINTS / points_per_shot),
        points_per_shot,
        player_name: stats.player.full_name(),
        pts: stats.pts,
        fga: stats.fga,
    })
}
