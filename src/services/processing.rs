use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Result;
use log::info;
use serde::Serialize;

use crate::config::settings::AppConfig;
use crate::domain::ParticipantId;
use crate::engine::Engine;
use crate::stats::{self, CompetitionStats, MedalTableRow, ParticipantStats};
use crate::store::{self, SnapshotStore};
use crate::trend::TrendSummary;

/// Everything the UI layer renders, derived in one pass.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedBundle {
    pub medal_table: Vec<MedalTableRow>,
    pub competitions: Vec<CompetitionStats>,
    pub stats: BTreeMap<ParticipantId, ParticipantStats>,
    pub trends: BTreeMap<ParticipantId, TrendSummary>,
    pub awards: BTreeMap<ParticipantId, Vec<String>>,
    pub points: BTreeMap<ParticipantId, u32>,
}

pub struct ProcessingService {
    config: AppConfig,
    engine: Engine,
}

impl ProcessingService {
    pub fn new(config: AppConfig) -> Self {
        let engine = Engine::new(crate::achievements::Catalogue::standard(), &config.cache);
        Self { config, engine }
    }

    /// Loads the snapshot, runs the full pipeline, and atomically replaces
    /// the derived output file.
    pub fn run(&self, input: Option<&str>, output: Option<&str>) -> Result<()> {
        let input = input.unwrap_or(&self.config.store.snapshot_path);
        let output = output.unwrap_or(&self.config.store.derived_path);

        info!("=== Starting Derivation Pass ===");
        info!("Snapshot: {}, Output: {}", input, output);

        let result_set = SnapshotStore::new(input).load()?;
        let bundle = self.derive(&result_set);

        store::write_atomic(Path::new(output), &bundle)?;
        info!("=== Derivation Complete ===");
        Ok(())
    }

    pub fn derive(&self, result_set: &crate::domain::ResultSet) -> DerivedBundle {
        let all_stats = self.engine.compute_all_stats(result_set);
        let trends = self.engine.compute_trends(result_set);
        let awards = self.engine.compute_achievements(result_set);

        info!(
            "  → Derived stats for {} participants",
            all_stats.len()
        );

        let points: BTreeMap<ParticipantId, u32> = awards
            .iter()
            .map(|(&id, ids)| (id, self.engine.achievement_points(ids)))
            .collect();

        let named_awards: BTreeMap<ParticipantId, Vec<String>> = awards
            .iter()
            .map(|(&id, ids)| (id, ids.iter().map(|a| a.to_string()).collect()))
            .collect();

        let roster_size = result_set.participants().len();
        DerivedBundle {
            medal_table: stats::medal_table(result_set, &all_stats),
            competitions: result_set
                .competitions()
                .iter()
                .map(|c| stats::compute_competition_stats(c, roster_size))
                .collect(),
            stats: (*all_stats).clone(),
            trends,
            awards: named_awards,
            points,
        }
    }
}
