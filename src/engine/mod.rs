use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::time::Duration;

use log::info;

use crate::achievements::{self, AchievementDef, AchievementId, Catalogue};
use crate::cache::{Fingerprint, ResultCache};
use crate::config::CacheSettings;
use crate::domain::{ParticipantId, ResultSet};
use crate::stats::{self, ParticipantStats};
use crate::trend::{self, TrendSummary};

pub type StatsMap = BTreeMap<ParticipantId, ParticipantStats>;
pub type TrendMap = BTreeMap<ParticipantId, TrendSummary>;
pub type AwardMap = BTreeMap<ParticipantId, BTreeSet<AchievementId>>;

/// Single entry point for everything derived from a ResultSet snapshot.
///
/// Each computation is one complete, synchronous pass over one immutable
/// snapshot: stats per participant, trend per participant, pattern rules,
/// then comparative rules, merged into the award map. Both outputs are
/// memoized by snapshot fingerprint.
pub struct Engine {
    catalogue: Catalogue,
    stats_cache: ResultCache<StatsMap>,
    award_cache: ResultCache<AwardMap>,
}

impl Engine {
    pub fn new(catalogue: Catalogue, settings: &CacheSettings) -> Self {
        let ttl = Duration::from_secs(settings.ttl_secs);
        Self {
            catalogue,
            stats_cache: ResultCache::new(ttl),
            award_cache: ResultCache::new(ttl),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(Catalogue::standard(), &CacheSettings::default())
    }

    pub fn compute_all_stats(&self, result_set: &ResultSet) -> Arc<StatsMap> {
        let fingerprint = Fingerprint::of(result_set);
        self.stats_cache
            .get_or_compute(fingerprint, || build_stats(result_set))
    }

    pub fn compute_achievements(&self, result_set: &ResultSet) -> Arc<AwardMap> {
        let fingerprint = Fingerprint::of(result_set);
        self.award_cache.get_or_compute(fingerprint, || {
            let all_stats = self.compute_all_stats(result_set);
            self.build_awards(result_set, &all_stats)
        })
    }

    /// Trend summaries are cheap enough to derive on demand from cached
    /// stats; they are not separately memoized.
    pub fn compute_trends(&self, result_set: &ResultSet) -> TrendMap {
        let all_stats = self.compute_all_stats(result_set);
        let years = result_set.scored_years();
        all_stats
            .iter()
            .map(|(&id, stats)| (id, trend::compute_trend(stats, &years)))
            .collect()
    }

    pub fn catalogue(&self) -> &[AchievementDef] {
        self.catalogue.defs()
    }

    pub fn lookup_achievement(&self, id: &str) -> Option<&AchievementDef> {
        self.catalogue.lookup(id)
    }

    pub fn achievement_points(&self, ids: &BTreeSet<AchievementId>) -> u32 {
        self.catalogue.points_for(ids)
    }

    /// Forwarded to both memo layers; the next computation starts fresh.
    pub fn invalidate(&self) {
        self.stats_cache.invalidate();
        self.award_cache.invalidate();
    }

    fn build_awards(&self, result_set: &ResultSet, all_stats: &StatsMap) -> AwardMap {
        info!(
            "Evaluating achievements for {} participants over {} competitions",
            result_set.participants().len(),
            result_set.competitions().len()
        );

        let years = result_set.scored_years();
        let mut awards: AwardMap = result_set
            .participants()
            .iter()
            .map(|p| (p.id, BTreeSet::new()))
            .collect();

        for participant in result_set.participants() {
            let Some(stats) = all_stats.get(&participant.id) else {
                continue;
            };
            let trend = trend::compute_trend(stats, &years);
            let matched =
                achievements::patterns::evaluate(&self.catalogue, stats, &trend, result_set);
            awards
                .entry(participant.id)
                .or_default()
                .extend(matched);
        }

        let comparative =
            achievements::comparative::evaluate(&self.catalogue, all_stats, result_set);
        for (id, ids) in comparative {
            awards.entry(id).or_default().extend(ids);
        }

        awards
    }
}

fn build_stats(result_set: &ResultSet) -> StatsMap {
    result_set
        .participants()
        .iter()
        .map(|p| (p.id, stats::compute_stats(p, result_set)))
        .collect()
}
