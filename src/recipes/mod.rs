//! Recipe Catalog and Ranking
//!
//! Holds the static recipe catalog and scores it against the current pantry.
//! A recipe scores the fraction of its ingredients present in the pantry,
//! plus a flat bonus for quick recipes; the bonus can rank a partial-match
//! quick recipe above a full-match slow one, which is intentional.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::pantry::PantryState;

/// Recipes at or under this many minutes get the quick bonus.
pub const DEFAULT_QUICK_MINUTES: u32 = 20;

/// Flat score bonus for quick recipes.
pub const DEFAULT_QUICK_BONUS: f64 = 0.12;

/// Default cap on ranked results.
pub const DEFAULT_RESULT_LIMIT: usize = 20;

/// A catalog recipe. Loaded at startup, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeDefinition {
    /// Catalog identifier
    pub id: String,
    /// Display title
    pub title: String,
    /// Preparation time in minutes
    pub minutes: u32,
    /// Ingredient display names
    pub ingredients: Vec<String>,
    /// Preparation steps
    pub steps: Vec<String>,
}

/// A recipe with its computed match score; recomputed on every ranking.
#[derive(Debug, Clone)]
pub struct ScoredRecipe {
    pub recipe: RecipeDefinition,
    pub score: f64,
}

impl ScoredRecipe {
    /// Ingredients joined for display ("Tomato, Mozzarella, Basil").
    pub fn ingredients_line(&self) -> String {
        self.recipe.ingredients.join(", ")
    }

    /// Steps joined for display.
    pub fn steps_line(&self) -> String {
        self.recipe.steps.join(" ")
    }
}

/// Knobs for scoring and ranking. Defaults preserve the shipped behavior.
#[derive(Debug, Clone)]
pub struct RankingConfig {
    /// Minutes at or below which the quick bonus applies
    pub quick_minutes: u32,
    /// Flat bonus added to quick recipes
    pub quick_bonus: f64,
    /// Maximum number of ranked results
    pub limit: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            quick_minutes: DEFAULT_QUICK_MINUTES,
            quick_bonus: DEFAULT_QUICK_BONUS,
            limit: DEFAULT_RESULT_LIMIT,
        }
    }
}

/// Score one recipe against the pantry.
///
/// Each ingredient is a binary hit on its lowercase form (pantry counts
/// beyond one never raise the score). A recipe with no ingredients scores
/// 0.0 outright rather than dividing by zero.
pub fn score_recipe(
    recipe: &RecipeDefinition,
    pantry: &PantryState,
    config: &RankingConfig,
) -> f64 {
    if recipe.ingredients.is_empty() {
        return 0.0;
    }

    let hits = recipe
        .ingredients
        .iter()
        .filter(|ingredient| pantry.has(&ingredient.to_lowercase()))
        .count();

    let base = hits as f64 / recipe.ingredients.len() as f64;
    let bonus = if recipe.minutes <= config.quick_minutes {
        config.quick_bonus
    } else {
        0.0
    };

    base + bonus
}

/// Rank the catalog against the pantry, highest score first.
///
/// The sort is stable, so equal scores keep the catalog's original order.
/// The result is truncated to `config.limit`. An empty pantry is not an
/// error; every recipe simply scores its bonus or zero.
pub fn rank(
    pantry: &PantryState,
    catalog: &[RecipeDefinition],
    config: &RankingConfig,
) -> Vec<ScoredRecipe> {
    let mut scored: Vec<ScoredRecipe> = catalog
        .iter()
        .map(|recipe| ScoredRecipe {
            recipe: recipe.clone(),
            score: score_recipe(recipe, pantry, config),
        })
        .collect();

    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(config.limit);

    debug!(
        "Ranked {} recipes, kept {} (limit {})",
        catalog.len(),
        scored.len(),
        config.limit
    );

    scored
}

/// Structural problems in a recipe catalog, caught at load time.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog contains no recipes")]
    Empty,
    #[error("duplicate recipe id '{0}'")]
    DuplicateId(String),
    #[error("recipe '{0}' has non-positive minutes")]
    InvalidMinutes(String),
}

/// Validate catalog structure: non-empty, unique ids, positive minutes.
pub fn validate_catalog(catalog: &[RecipeDefinition]) -> std::result::Result<(), CatalogError> {
    if catalog.is_empty() {
        return Err(CatalogError::Empty);
    }

    let mut seen = HashSet::new();
    for recipe in catalog {
        if !seen.insert(recipe.id.as_str()) {
            return Err(CatalogError::DuplicateId(recipe.id.clone()));
        }
        if recipe.minutes == 0 {
            return Err(CatalogError::InvalidMinutes(recipe.id.clone()));
        }
    }

    Ok(())
}

/// Load and validate a recipe catalog from a JSON file.
pub fn load_catalog(path: &Path) -> Result<Vec<RecipeDefinition>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog file: {:?}", path))?;
    let catalog: Vec<RecipeDefinition> = serde_json::from_str(&content)?;
    validate_catalog(&catalog)?;
    Ok(catalog)
}

/// Save a recipe catalog to a JSON file.
pub fn save_catalog(catalog: &[RecipeDefinition], path: &Path) -> Result<()> {
    let content = serde_json::to_string_pretty(catalog)?;
    std::fs::write(path, content)?;
    Ok(())
}

fn recipe(
    id: &str,
    title: &str,
    minutes: u32,
    ingredients: &[&str],
    steps: &[&str],
) -> RecipeDefinition {
    RecipeDefinition {
        id: id.to_string(),
        title: title.to_string(),
        minutes,
        ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
        steps: steps.iter().map(|s| s.to_string()).collect(),
    }
}

/// The built-in recipe catalog.
pub fn builtin_catalog() -> Vec<RecipeDefinition> {
    vec![
        recipe(
            "caprese",
            "Quick Caprese Salad",
            10,
            &["Tomato", "Mozzarella", "Basil", "Olive Oil", "Salt", "Pepper"],
            &[
                "Slice tomatoes & mozzarella.",
                "Layer with basil.",
                "Drizzle olive oil; season.",
            ],
        ),
        recipe(
            "margherita",
            "Margherita Flatbread",
            18,
            &["Flatbread", "Tomato", "Mozzarella", "Basil", "Olive Oil", "Garlic"],
            &[
                "Heat oven 450°F.",
                "Oil+garlic flatbread.",
                "Top with tomato+mozzarella; bake 8–10m.",
                "Finish with basil.",
            ],
        ),
        recipe(
            "omelet",
            "Tomato Basil Omelet",
            12,
            &["Eggs", "Tomato", "Mozzarella", "Basil", "Butter", "Salt"],
            &["Beat eggs.", "Cook until almost set.", "Add fillings; fold."],
        ),
        recipe(
            "lemon-chicken",
            "Garlic Lemon Chicken Skillet",
            22,
            &["Chicken Breast", "Garlic", "Lemon", "Olive Oil", "Salt", "Pepper"],
            &["Sear chicken 4–5m/side.", "Add garlic 30s.", "Add lemon; simmer."],
        ),
        recipe(
            "stirfry",
            "Weeknight Veggie Stir-Fry",
            16,
            &["Broccoli", "Carrot", "Bell Pepper", "Soy Sauce", "Garlic", "Ginger", "Rice"],
            &[
                "Stir-fry veg.",
                "Add garlic+ginger.",
                "Add soy; toss; serve with rice.",
            ],
        ),
        recipe(
            "garlic-broccoli-pasta",
            "Garlic Broccoli Pasta",
            20,
            &["Pasta", "Broccoli", "Garlic", "Olive Oil", "Parmesan (optional)"],
            &[
                "Boil pasta.",
                "Sauté broccoli+garlic.",
                "Toss with oil+pasta water; finish.",
            ],
        ),
        recipe(
            "rice-bowl",
            "15-Min Rice & Egg Bowl",
            15,
            &["Rice", "Eggs", "Soy Sauce", "Scallion (optional)"],
            &[
                "Cook/heat rice.",
                "Fry/soft-scramble eggs.",
                "Top rice with eggs+soy.",
            ],
        ),
        recipe(
            "beans-on-toast",
            "Smoky Beans on Toast",
            12,
            &[
                "Bread",
                "Canned Beans",
                "Tomato Paste (or salsa)",
                "Olive Oil",
                "Garlic",
                "Paprika",
            ],
            &["Warm beans with tomato/garlic/paprika.", "Serve on toast."],
        ),
        recipe(
            "tuna-pasta",
            "Pantry Tuna Pasta",
            17,
            &["Pasta", "Canned Tuna", "Olive Oil", "Garlic", "Lemon", "Parsley (optional)"],
            &[
                "Boil pasta.",
                "Sauté garlic in oil.",
                "Add tuna+lemon; toss with pasta.",
            ],
        ),
        recipe(
            "quick-soup",
            "Quick Veg Soup",
            20,
            &["Broth", "Carrot", "Onion", "Celery", "Pasta or Rice", "Salt", "Pepper"],
            &["Sauté aromatics.", "Add broth+starch; simmer."],
        ),
        recipe(
            "curry-chickpea",
            "Fast Chickpea Curry",
            18,
            &["Canned Chickpeas", "Coconut Milk", "Curry Powder", "Garlic", "Rice"],
            &[
                "Sauté curry+garlic.",
                "Add chickpeas+coconut milk; simmer 10m.",
                "Serve with rice.",
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::ImageDetectionResult;
    use crate::pantry::{aggregate, EditSet};
    use tempfile::NamedTempFile;

    fn pantry_of(labels: &[&str]) -> PantryState {
        let image = ImageDetectionResult::from_labels(labels.iter().copied());
        aggregate(&[image], &EditSet::default())
    }

    #[test]
    fn test_score_is_hit_fraction_plus_quick_bonus() {
        let pantry = pantry_of(&["tomato", "basil"]);
        let config = RankingConfig::default();

        let quick = recipe("q", "Quick", 15, &["Tomato", "Basil", "Garlic"], &[]);
        let slow = recipe("s", "Slow", 30, &["Tomato", "Basil", "Garlic"], &[]);

        let quick_score = score_recipe(&quick, &pantry, &config);
        let slow_score = score_recipe(&slow, &pantry, &config);

        assert!((slow_score - 2.0 / 3.0).abs() < 1e-9);
        assert!((quick_score - (2.0 / 3.0 + 0.12)).abs() < 1e-9);
    }

    #[test]
    fn test_pantry_count_beyond_one_is_still_one_hit() {
        let image_a = ImageDetectionResult::from_labels(["tomato"]);
        let image_b = ImageDetectionResult::from_labels(["tomato"]);
        let pantry = aggregate(&[image_a, image_b], &EditSet::default());
        assert_eq!(pantry.count("tomato"), 2);

        let r = recipe("r", "R", 30, &["Tomato", "Basil"], &[]);
        let score = score_recipe(&r, &pantry, &RankingConfig::default());
        assert!((score - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_zero_ingredient_recipe_scores_zero() {
        let pantry = pantry_of(&["tomato"]);
        let degenerate = recipe("d", "Degenerate", 5, &[], &[]);
        let score = score_recipe(&degenerate, &pantry, &RankingConfig::default());
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_quick_bonus_ordering() {
        let pantry = pantry_of(&["tomato"]);
        let catalog = vec![
            recipe("no-hit-slow", "A", 30, &["Rice", "Beans", "Corn", "Peas", "Oats"], &[]),
            recipe("no-hit-quick", "B", 15, &["Rice", "Beans", "Corn"], &[]),
            recipe("one-hit-slow", "C", 30, &["Tomato", "Beans", "Corn"], &[]),
        ];

        let ranked = rank(&pantry, &catalog, &RankingConfig::default());
        let ids: Vec<&str> = ranked.iter().map(|s| s.recipe.id.as_str()).collect();

        // 1/3 hits (0.333) beats the quick bonus alone (0.12) beats zero
        assert_eq!(ids, ["one-hit-slow", "no-hit-quick", "no-hit-slow"]);
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let pantry = PantryState::default();
        let catalog = vec![
            recipe("first", "First", 30, &["Rice"], &[]),
            recipe("second", "Second", 30, &["Beans"], &[]),
            recipe("third", "Third", 30, &["Corn"], &[]),
        ];

        let ranked = rank(&pantry, &catalog, &RankingConfig::default());
        let ids: Vec<&str> = ranked.iter().map(|s| s.recipe.id.as_str()).collect();
        assert_eq!(ids, ["first", "second", "third"]);
    }

    #[test]
    fn test_limit_caps_results() {
        let pantry = pantry_of(&["tomato"]);
        let mut catalog = Vec::new();
        for i in 0..25 {
            // Every fifth recipe hits the pantry so the kept set is the
            // highest-scoring one, not just the first twenty
            let ingredients: &[&str] = if i % 5 == 0 { &["Tomato"] } else { &["Rice"] };
            catalog.push(recipe(&format!("r{}", i), "R", 30, ingredients, &[]));
        }

        let ranked = rank(&pantry, &catalog, &RankingConfig::default());
        assert_eq!(ranked.len(), 20);

        // All five full hits survive the cut, in catalog order up front
        let hits: Vec<&str> = ranked[..5].iter().map(|s| s.recipe.id.as_str()).collect();
        assert_eq!(hits, ["r0", "r5", "r10", "r15", "r20"]);
    }

    #[test]
    fn test_empty_pantry_scores_every_recipe() {
        let pantry = PantryState::default();
        let ranked = rank(&pantry, &builtin_catalog(), &RankingConfig::default());

        assert_eq!(ranked.len(), builtin_catalog().len());
        for scored in &ranked {
            let expected = if scored.recipe.minutes <= 20 { 0.12 } else { 0.0 };
            assert!((scored.score - expected).abs() < 1e-9, "{}", scored.recipe.id);
        }
    }

    #[test]
    fn test_caprese_pantry_ranks_caprese_first() {
        let pantry = pantry_of(&["tomato", "mozzarella", "basil", "olive oil", "salt", "pepper"]);
        let ranked = rank(&pantry, &builtin_catalog(), &RankingConfig::default());

        assert_eq!(ranked[0].recipe.id, "caprese");
        assert!((ranked[0].score - 1.12).abs() < 1e-9);
    }

    #[test]
    fn test_display_lines() {
        let scored = ScoredRecipe {
            recipe: recipe("r", "R", 10, &["Tomato", "Basil"], &["Chop.", "Mix."]),
            score: 1.0,
        };
        assert_eq!(scored.ingredients_line(), "Tomato, Basil");
        assert_eq!(scored.steps_line(), "Chop. Mix.");
    }

    #[test]
    fn test_builtin_catalog_is_valid() {
        assert!(validate_catalog(&builtin_catalog()).is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_catalogs() {
        assert!(matches!(validate_catalog(&[]), Err(CatalogError::Empty)));

        let dup = vec![recipe("a", "A", 5, &["X"], &[]), recipe("a", "B", 5, &["Y"], &[])];
        assert!(matches!(validate_catalog(&dup), Err(CatalogError::DuplicateId(_))));

        let zero = vec![recipe("a", "A", 0, &["X"], &[])];
        assert!(matches!(validate_catalog(&zero), Err(CatalogError::InvalidMinutes(_))));
    }

    #[test]
    fn test_catalog_save_and_load_roundtrip() {
        let catalog = builtin_catalog();
        let temp_file = NamedTempFile::new().unwrap();

        save_catalog(&catalog, temp_file.path()).unwrap();
        let loaded = load_catalog(temp_file.path()).unwrap();

        assert_eq!(loaded.len(), catalog.len());
        assert_eq!(loaded[0].id, "caprese");
        assert_eq!(loaded[0].ingredients, catalog[0].ingredients);
    }

    #[test]
    fn test_load_catalog_rejects_invalid_json() {
        let temp_file = NamedTempFile::new().unwrap();
        std::fs::write(temp_file.path(), "not json").unwrap();
        assert!(load_catalog(temp_file.path()).is_err());
    }
}
