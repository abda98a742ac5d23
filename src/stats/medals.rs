use std::collections::BTreeMap;

use crate::domain::{ParticipantId, ResultSet};

use super::types::{MedalTableRow, ParticipantStats};

/// Aggregate medal table across the roster.
///
/// Sort order is (gold desc, silver desc, bronze desc, total desc) —
/// the tie-break order the UI depends on. Participants tied on all four
/// keys keep their roster order.
pub fn medal_table(
    result_set: &ResultSet,
    all_stats: &BTreeMap<ParticipantId, ParticipantStats>,
) -> Vec<MedalTableRow> {
    let mut rows: Vec<MedalTableRow> = result_set
        .participants()
        .iter()
        .filter_map(|p| {
            let stats = all_stats.get(&p.id)?;
            Some(MedalTableRow {
                participant_id: p.id,
                display_name: p.display_name.clone(),
                gold: stats.gold,
                silver: stats.silver,
                bronze: stats.bronze,
                total: stats.total_medals(),
            })
        })
        .collect();

    rows.sort_by(|a, b| {
        b.gold
            .cmp(&a.gold)
            .then(b.silver.cmp(&a.silver))
            .then(b.bronze.cmp(&a.bronze))
            .then(b.total.cmp(&a.total))
    });
    rows
}
