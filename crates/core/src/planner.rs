use crate::candidate::{build_file_preview, RenameCandidate};
use crate::schema::Schema;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewEntry {
    pub path: String,
    pub original_name: String,
    pub new_name: String,
    /// Ordinal assigned within a collision group.
    pub sequence: Option<usize>,
    pub changed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PreviewStats {
    pub candidates: usize,
    pub changed: usize,
    pub unchanged: usize,
    pub collision_groups: usize,
    /// Entries whose final name is still shared with another entry.
    pub unresolved_duplicates: usize,
}

/// Final names for a batch, in the batch's order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenamePreview {
    pub entries: Vec<PreviewEntry>,
    pub stats: PreviewStats,
}

impl RenamePreview {
    pub fn name_for(&self, path: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.path == path)
            .map(|entry| entry.new_name.as_str())
    }

    pub fn to_map(&self) -> HashMap<String, String> {
        self.entries
            .iter()
            .map(|entry| (entry.path.clone(), entry.new_name.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Computes collision-aware names for every candidate.
///
/// Base names are rendered without a sequence value. Every base name shared
/// by more than one candidate is re-rendered with ordinals `1..=N`, handed
/// out in batch order. Without a `sequence` component the re-render is
/// identical to the base name and the duplicates are returned as-is.
pub fn build_all_previews(
    candidates: &[RenameCandidate],
    schema: &Schema,
    now: DateTime<Local>,
) -> RenamePreview {
    let base_names: Vec<String> = candidates
        .iter()
        .map(|candidate| build_file_preview(schema, candidate, now, None))
        .collect();

    let mut counts = HashMap::<&str, usize>::new();
    for base in &base_names {
        *counts.entry(base.as_str()).or_default() += 1;
    }

    let mut next_ordinal = HashMap::<&str, usize>::new();
    let mut entries = Vec::with_capacity(candidates.len());
    for (candidate, base) in candidates.iter().zip(&base_names) {
        let (new_name, sequence) = if counts[base.as_str()] > 1 {
            let ordinal = next_ordinal.entry(base.as_str()).or_insert(0);
            *ordinal += 1;
            let seq = *ordinal;
            (build_file_preview(schema, candidate, now, Some(seq)), Some(seq))
        } else {
            (base.clone(), None)
        };

        entries.push(PreviewEntry {
            path: candidate.path.clone(),
            original_name: candidate.name.clone(),
            changed: new_name != candidate.name,
            new_name,
            sequence,
        });
    }

    let stats = collect_stats(&entries, &counts);
    if stats.unresolved_duplicates > 0 {
        log::warn!(
            "{} preview names remain duplicated (schema has sequence component: {})",
            stats.unresolved_duplicates,
            schema.has_sequence()
        );
    }
    log::debug!(
        "preview built: candidates={} changed={} collision_groups={}",
        stats.candidates,
        stats.changed,
        stats.collision_groups
    );

    RenamePreview { entries, stats }
}

/// [`build_all_previews`] with the current wall-clock time as "now".
pub fn build_all_previews_now(candidates: &[RenameCandidate], schema: &Schema) -> RenamePreview {
    build_all_previews(candidates, schema, Local::now())
}

fn collect_stats(entries: &[PreviewEntry], base_counts: &HashMap<&str, usize>) -> PreviewStats {
    let mut final_counts = HashMap::<&str, usize>::new();
    for entry in entries {
        *final_counts.entry(entry.new_name.as_str()).or_default() += 1;
    }

    let changed = entries.iter().filter(|entry| entry.changed).count();
    PreviewStats {
        candidates: entries.len(),
        changed,
        unchanged: entries.len() - changed,
        collision_groups: base_counts.values().filter(|&&n| n > 1).count(),
        unresolved_duplicates: final_counts.values().filter(|&&n| n > 1).sum(),
    }
}
