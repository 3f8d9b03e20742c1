use serde::{Deserialize, Serialize};
use std::fmt;

fn default_grams() -> f64 {
    100.0
}

fn default_density() -> f64 {
    1.0
}

/// Bounding region of a detected item in the source image, in pixels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// A food item produced by the upstream detector (image or manual entry).
/// Immutable once created; later stages only wrap it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectedItem {
    pub name: String,
    pub confidence: f64,
    #[serde(default = "default_grams")]
    pub estimated_grams: f64,
    /// Portion density in g/ml, used to derive volume. 1.0 for mixed foods.
    #[serde(default = "default_density")]
    pub estimated_portion_density: f64,
    #[serde(default)]
    pub cooking_method: Option<String>,
    #[serde(default)]
    pub cuisine_type: Option<String>,
    #[serde(default)]
    pub bounding_box: Option<BoundingBox>,
}

/// One dish in a manually entered list (no image involved).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManualDishInput {
    pub name: String,
    #[serde(default = "default_grams")]
    pub estimated_grams: f64,
    #[serde(default)]
    pub cooking_method: Option<String>,
}

impl ManualDishInput {
    /// Manual entries carry high detection confidence since the user named
    /// the dish directly.
    pub fn into_detected(self) -> DetectedItem {
        DetectedItem {
            name: self.name,
            confidence: 0.9,
            estimated_grams: self.estimated_grams,
            estimated_portion_density: 1.0,
            cooking_method: self.cooking_method,
            cuisine_type: None,
            bounding_box: None,
        }
    }
}

/// Per-100g nutrition values attached by the enricher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NutritionProfile {
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
    pub fiber: f64,
    pub glycemic_load: f64,
    /// Lookup confidence: 0.9 exact match, 0.7 partial, 0.5 fallback.
    pub confidence: f64,
}

/// Item enriched with nutrition data (stage 1 output).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NourishedItem {
    #[serde(flatten)]
    pub item: DetectedItem,
    pub nutrition_per_100g: NutritionProfile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestionSpeed {
    Fast,
    Medium,
    Slow,
}

impl fmt::Display for DigestionSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DigestionSpeed::Fast => write!(f, "fast"),
            DigestionSpeed::Medium => write!(f, "medium"),
            DigestionSpeed::Slow => write!(f, "slow"),
        }
    }
}

/// Physiological estimates attached by the stomach model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysiologicalImpact {
    pub volume_ml: f64,
    pub satiety_score: f64,
    pub digestion_speed: DigestionSpeed,
    /// Fraction of stomach capacity one portion consumes, clamped to 1.0.
    pub fullness_contribution: f64,
}

/// Fully annotated item: detection + nutrition + physiology (stage 2 output).
/// The unit the allocator and planner operate on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedItem {
    #[serde(flatten)]
    pub item: DetectedItem,
    pub nutrition_per_100g: NutritionProfile,
    pub stomach_impact: PhysiologicalImpact,
}

/// Optimization goal. Unrecognized tags fall back to `EnjoymentFirst`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    FatLoss,
    MuscleGain,
    BloodSugar,
    #[default]
    EnjoymentFirst,
}

impl Goal {
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "fat_loss" => Goal::FatLoss,
            "muscle_gain" => Goal::MuscleGain,
            "blood_sugar" => Goal::BloodSugar,
            _ => Goal::EnjoymentFirst,
        }
    }
}

/// Why an item was removed before greedy selection ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipCause {
    Allergen,
    DietaryFilter,
}

#[derive(Debug, Clone)]
pub struct ExcludedItem {
    pub item: EnrichedItem,
    pub cause: SkipCause,
}

/// Output of the allocator. `selected` is in descending score order,
/// `skipped` keeps the filtered input order, and together they partition
/// the post-filter item set. `excluded` holds allergen/dietary removals.
#[derive(Debug, Clone, Default)]
pub struct AllocationResult {
    pub selected: Vec<EnrichedItem>,
    pub skipped: Vec<EnrichedItem>,
    pub excluded: Vec<ExcludedItem>,
}

/// Eating phases in serving order. Variant order doubles as the total order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PhaseName {
    Starter,
    Protein,
    Vegetables,
    Carbs,
    Treats,
}

impl PhaseName {
    pub fn order(self) -> u8 {
        match self {
            PhaseName::Starter => 1,
            PhaseName::Protein => 2,
            PhaseName::Vegetables => 3,
            PhaseName::Carbs => 4,
            PhaseName::Treats => 5,
        }
    }
}

impl fmt::Display for PhaseName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhaseName::Starter => write!(f, "Starter"),
            PhaseName::Protein => write!(f, "Protein"),
            PhaseName::Vegetables => write!(f, "Vegetables"),
            PhaseName::Carbs => write!(f, "Carbs"),
            PhaseName::Treats => write!(f, "Treats"),
        }
    }
}

/// One dish at its planned portion, with macros scaled to that portion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortionedItem {
    pub dish_name: String,
    pub portion_grams: f64,
    pub portion_ml: f64,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Phase {
    pub phase_name: PhaseName,
    pub phase_order: u8,
    pub items: Vec<PortionedItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedItem {
    pub name: String,
    pub reason: String,
}

/// The final eating plan: non-empty phases in serving order plus bookkeeping.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Plan {
    pub phases: Vec<Phase>,
    pub skip: Vec<SkippedItem>,
    pub total_calories: f64,
    pub stomach_used_ml: f64,
    /// Volume used over capacity, clamped to [0, 1].
    pub fullness_score: f64,
}

/// Nutrition totals across every detected item, scaled by estimated mass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NutritionSummary {
    pub total_available_calories: f64,
    pub total_protein_g: f64,
    pub total_fat_g: f64,
    pub total_carbs_g: f64,
    pub total_fiber_g: f64,
    pub total_glycemic_load: f64,
    pub dish_count: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DigestionCounts {
    pub fast: usize,
    pub medium: usize,
    pub slow: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StomachSummary {
    pub total_volume_ml: f64,
    pub selected_volume_ml: f64,
    pub capacity_ml: f64,
    pub avg_satiety_score: f64,
    pub digestion_profiles: DigestionCounts,
}

/// Complete pipeline output handed to the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyResponse {
    pub items: Vec<EnrichedItem>,
    pub nutrition_summary: NutritionSummary,
    pub stomach_summary: StomachSummary,
    pub plan: Plan,
    pub explanation: String,
    pub confidence_overall: f64,
}
