//! Session State
//!
//! One explicit object owning everything the hosting front end mutates:
//! photo references, per-image detection history, user edits, and the last
//! computed ranking. The three pipeline stages stay pure; the session is the
//! single place state changes happen, so the host can serialize mutation
//! relative to reads.

use tracing::{debug, info};
use uuid::Uuid;

use crate::detect::{
    filter_image_labels, ImageDetectionResult, RawDetection, DEFAULT_CONFIDENCE_THRESHOLD,
};
use crate::pantry::{aggregate, EditSet, PantryState};
use crate::recipes::{rank, RankingConfig, RecipeDefinition, ScoredRecipe};

/// Opaque reference to a captured or picked image. The core never interprets
/// the uri; it exists so the UI can show thumbnails next to results.
#[derive(Debug, Clone)]
pub struct PhotoRef {
    pub id: Uuid,
    pub uri: String,
}

/// Mutable session owned by the hosting layer.
#[derive(Debug, Clone)]
pub struct SnapSession {
    photos: Vec<PhotoRef>,
    history: Vec<ImageDetectionResult>,
    edits: EditSet,
    ranking: Vec<ScoredRecipe>,
    confidence_threshold: f32,
    ranking_config: RankingConfig,
}

impl Default for SnapSession {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIDENCE_THRESHOLD, RankingConfig::default())
    }
}

impl SnapSession {
    /// Create a session with explicit thresholds (see `config::AppConfig`).
    pub fn new(confidence_threshold: f32, ranking_config: RankingConfig) -> Self {
        Self {
            photos: Vec::new(),
            history: Vec::new(),
            edits: EditSet::default(),
            ranking: Vec::new(),
            confidence_threshold,
            ranking_config,
        }
    }

    /// Record one processed photo and its raw classifier output.
    ///
    /// The detections are gated, normalized, and deduped before being
    /// appended to the history. A photo whose classification failed should
    /// be recorded with an empty slice: it keeps its place in the session
    /// without invalidating any other image.
    pub fn record_photo(&mut self, uri: &str, detections: &[RawDetection]) -> &ImageDetectionResult {
        let photo = PhotoRef {
            id: Uuid::new_v4(),
            uri: uri.to_string(),
        };
        let result = filter_image_labels(detections, self.confidence_threshold);

        info!(
            "Photo {} yielded {} pantry label(s) from {} detection(s)",
            photo.id,
            result.len(),
            detections.len()
        );

        self.photos.push(photo);
        self.history.push(result);
        self.history.last().expect("just pushed")
    }

    /// Suppress an ingredient ("tap the chip's X"). Idempotent.
    pub fn remove_item(&mut self, label: &str) {
        self.edits.remove(label);
    }

    /// Manually add an ingredient from free text; trimmed and lowercased,
    /// empty input ignored. Adding twice means two of it.
    pub fn add_item(&mut self, label: &str) {
        self.edits.add(label);
    }

    /// Undo all manual edits in one step.
    pub fn undo_edits(&mut self) {
        debug!("Undoing all pantry edits");
        self.edits.undo();
    }

    /// Clear photos, detection history, edits, and the cached ranking.
    pub fn clear_all(&mut self) {
        info!("Clearing session");
        self.photos.clear();
        self.history.clear();
        self.edits.undo();
        self.ranking.clear();
    }

    /// Current pantry, recomputed from history and edits on every call.
    pub fn pantry(&self) -> PantryState {
        aggregate(&self.history, &self.edits)
    }

    /// Rank the catalog against the current pantry and cache the result for
    /// display.
    pub fn find_recipes(&mut self, catalog: &[RecipeDefinition]) -> &[ScoredRecipe] {
        let pantry = self.pantry();
        self.ranking = rank(&pantry, catalog, &self.ranking_config);
        &self.ranking
    }

    /// The last ranking computed by [`Self::find_recipes`].
    pub fn recipes(&self) -> &[ScoredRecipe] {
        &self.ranking
    }

    pub fn photos(&self) -> &[PhotoRef] {
        &self.photos
    }

    pub fn history(&self) -> &[ImageDetectionResult] {
        &self.history
    }

    pub fn edits(&self) -> &EditSet {
        &self.edits
    }
}
