//! Pantry Aggregation
//!
//! Folds every processed image's detections, minus user-removed items, plus
//! user-added items, into a single count-per-label mapping. Aggregation is a
//! pure recomputation over the full history: inputs are small and bounded by
//! user-driven event counts, so there is no incremental bookkeeping to get
//! wrong.

use std::collections::HashSet;

use crate::detect::ImageDetectionResult;

/// User edits layered on top of detections.
///
/// `removed` suppresses every past and future detection of a label until the
/// edits are undone; `added` is a sequence, not a set, because adding the
/// same item twice means two of it.
#[derive(Debug, Clone, Default)]
pub struct EditSet {
    removed: Vec<String>,
    added: Vec<String>,
}

impl EditSet {
    /// Suppress a label. Idempotent; input is trimmed and lowercased.
    pub fn remove(&mut self, label: &str) {
        let key = label.trim().to_lowercase();
        if key.is_empty() || self.removed.contains(&key) {
            return;
        }
        self.removed.push(key);
    }

    /// Manually add an item. Input is trimmed and lowercased; empty input is
    /// ignored. Duplicates are kept and each counts.
    pub fn add(&mut self, label: &str) {
        let key = label.trim().to_lowercase();
        if key.is_empty() {
            return;
        }
        self.added.push(key);
    }

    /// Undo all edits: clears both `removed` and `added` atomically.
    pub fn undo(&mut self) {
        self.removed.clear();
        self.added.clear();
    }

    pub fn removed(&self) -> &[String] {
        &self.removed
    }

    pub fn added(&self) -> &[String] {
        &self.added
    }

    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.added.is_empty()
    }
}

/// Count-per-canonical-label mapping, the user's currently believed
/// available ingredients.
///
/// Entries keep insertion order for stable UI listing; equality is
/// order-independent. No entry ever has a count of zero.
#[derive(Debug, Clone, Default)]
pub struct PantryState {
    entries: Vec<(String, u32)>,
}

impl PantryState {
    /// Count for a label, zero if absent.
    pub fn count(&self, label: &str) -> u32 {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, c)| *c)
            .unwrap_or(0)
    }

    /// Whether the pantry holds at least one of the label.
    pub fn has(&self, label: &str) -> bool {
        self.count(label) > 0
    }

    /// (label, count) pairs in insertion order.
    pub fn entries(&self) -> &[(String, u32)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn increment(&mut self, label: &str) {
        if let Some(entry) = self.entries.iter_mut().find(|(l, _)| l == label) {
            entry.1 += 1;
        } else {
            self.entries.push((label.to_string(), 1));
        }
    }
}

impl PartialEq for PantryState {
    fn eq(&self, other: &Self) -> bool {
        // Labels are distinct per state, so equal length plus matching
        // counts in one direction implies the mappings are identical.
        self.entries.len() == other.entries.len()
            && self.entries.iter().all(|(l, c)| other.count(l) == *c)
    }
}

impl Eq for PantryState {}

/// Recompute the pantry from the full detection history and edit set.
///
/// One increment per image that contains a label; removed labels are
/// suppressed entirely; manual additions count once per occurrence and are
/// never suppressed. Pure: neither input is mutated.
pub fn aggregate(history: &[ImageDetectionResult], edits: &EditSet) -> PantryState {
    let removed: HashSet<&str> = edits.removed().iter().map(String::as_str).collect();

    let mut pantry = PantryState::default();
    for image in history {
        for label in image.labels() {
            if removed.contains(label.as_str()) {
                continue;
            }
            pantry.increment(label);
        }
    }

    for label in edits.added() {
        pantry.increment(label);
    }

    pantry
}
