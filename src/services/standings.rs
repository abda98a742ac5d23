use anyhow::Result;
use colored::Colorize;
use log::info;

use crate::config::settings::AppConfig;
use crate::engine::Engine;
use crate::stats;
use crate::store::SnapshotStore;

/// Prints the medal table to the terminal.
pub struct StandingsService {
    config: AppConfig,
}

impl StandingsService {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn run(&self, input: Option<&str>) -> Result<()> {
        let input = input.unwrap_or(&self.config.store.snapshot_path);
        let result_set = SnapshotStore::new(input).load()?;
        info!(
            "Standings over {} scored competitions",
            result_set.scored_competitions().count()
        );

        let engine = Engine::new(crate::achievements::Catalogue::standard(), &self.config.cache);
        let all_stats = engine.compute_all_stats(&result_set);
        let awards = engine.compute_achievements(&result_set);

        println!(
            "{:<4} {:<24} {:>4} {:>6} {:>6} {:>6} {:>7}",
            "#", "Name", "Gold", "Silver", "Bronze", "Total", "Points"
        );
        for (i, row) in stats::medal_table(&result_set, &all_stats).iter().enumerate() {
            let points = awards
                .get(&row.participant_id)
                .map(|ids| engine.achievement_points(ids))
                .unwrap_or(0);
            println!(
                "{:<4} {:<24} {:>4} {:>6} {:>6} {:>6} {:>7}",
                i + 1,
                row.display_name,
                row.gold.to_string().yellow().bold(),
                row.silver.to_string().bright_white(),
                row.bronze.to_string().truecolor(205, 127, 50),
                row.total,
                points
            );
        }

        Ok(())
    }
}
