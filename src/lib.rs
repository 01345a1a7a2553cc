//! SnapCook Core - photographed objects to ranked recipe ideas
//!
//! An in-process library behind an interactive front end. The front end owns
//! capture, permissions, and model inference; this core takes the raw
//! label/confidence output per image and turns it into a pantry and a ranked
//! recipe list:
//!
//! 1. [`normalize`](mod@normalize) - collapse noisy classifier labels to
//!    canonical pantry terms, discarding non-food objects.
//! 2. [`pantry`] - fold all per-image detections plus user edits into a
//!    count-per-label pantry.
//! 3. [`recipes`] - score and rank the recipe catalog against that pantry.
//!
//! [`session::SnapSession`] ties the stages together for a host that wants a
//! single stateful object; the stages themselves are pure and re-entrant.

pub mod config;
pub mod detect;
pub mod normalize;
pub mod pantry;
pub mod recipes;
pub mod session;

pub use detect::{filter_image_labels, ImageDetectionResult, RawDetection};
pub use normalize::normalize;
pub use pantry::{aggregate, EditSet, PantryState};
pub use recipes::{builtin_catalog, rank, RankingConfig, RecipeDefinition, ScoredRecipe};
pub use session::SnapSession;
