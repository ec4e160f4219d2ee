use anyhow::{Result, bail};
use log::info;

use crate::api::StatsClient;
use crate::config::AppConfig;
use crate::ui::{Phase, SearchSession, ShotCalculation};

/// Terminal rendition of typing a name and pressing Enter
pub struct LookupService {
    config: AppConfig,
}

impl LookupService {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub async fn run(&self, query: &str) -> Result<()> {
        let client = StatsClient::new(self.config.stats.clone())?;
        let session = SearchSession::new(client);

        session.input(query).await;
        session.submit().await;

        match session.view().await.phase {
            Phase::Calculated(calculation) => {
                println!("{}", render(&calculation));
                Ok(())
            }
            Phase::NoMatches => bail!("No players found for '{}'", query),
            Phase::Failed(message) => bail!(message),
            other => {
                info!("Lookup stopped in phase {:?}", other);
                bail!("Nothing to show for '{}'", query)
            }
        }
    }
}

fn render(calculation: &ShotCalculation) -> String {
    format!(
        "{} needs {} shots to score 30 points ({} PPG on {} FGA, {:.3} points per shot)",
        calculation.player_name,
        calculation.shots,
        calculation.pts,
        calculation.fga,
        calculation.points_per_shot
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render() {
        let calculation = ShotCalculation {
            shots: 21.8,
            points_per_shot: 1.375,
            player_name: "LeBron James".to_string(),
            pts: 27.5,
            fga: 20.0,
        };
        assert_eq!(
            render(&calculation),
            "LeBron James needs 21.8 shots to score 30 points (27.5 PPG on 20 FGA, 1.375 points per shot)"
        );
    }
}
