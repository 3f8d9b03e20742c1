use crate::domain::model::{AllocationResult, EnrichedItem, ExcludedItem, Goal, SkipCause};
use std::cmp::Ordering;
use std::collections::HashSet;

/// Gastric elasticity: selection may overshoot nominal capacity by 10%.
const VOLUME_OVERSHOOT: f64 = 1.10;

/// Keyword sets for the simplified dietary filters. Vegan excludes dairy and
/// eggs on top of animal flesh; vegetarian only excludes flesh.
const NON_VEGAN_KEYWORDS: &[&str] = &[
    "chicken", "meat", "fish", "salmon", "steak", "eggs", "cheese",
];
const NON_VEGETARIAN_KEYWORDS: &[&str] = &[
    "chicken", "meat", "fish", "salmon", "steak", "hot dog",
];

/// Goal-constrained greedy selection. Sorts by goal reward and fills the
/// stomach until either the calorie budget or elastic volume limit would be
/// breached. Deliberately a single-pass heuristic, not a knapsack solver:
/// the planner's explanation text assumes the greedy order, so do not
/// replace this with true optimization.
pub struct Allocator {
    calorie_limit: f64,
    stomach_capacity_ml: f64,
}

impl Allocator {
    pub fn new(calorie_limit: f64, stomach_capacity_ml: f64) -> Self {
        Self {
            calorie_limit,
            stomach_capacity_ml,
        }
    }

    pub fn allocate(
        &self,
        items: &[EnrichedItem],
        goal: Goal,
        allergies: &[String],
        dietary_filters: &[String],
    ) -> AllocationResult {
        let mut excluded = Vec::new();
        let remaining = Self::filter_allergens(items, allergies, &mut excluded);
        let remaining = Self::filter_dietary(remaining, dietary_filters, &mut excluded);

        if remaining.is_empty() {
            return AllocationResult {
                selected: Vec::new(),
                skipped: Vec::new(),
                excluded,
            };
        }

        let mut scored: Vec<(f64, usize)> = remaining
            .iter()
            .enumerate()
            .map(|(idx, item)| (Self::goal_reward(item, goal), idx))
            .collect();
        // Stable sort: ties keep original relative order
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));

        let mut selected = Vec::new();
        let mut selected_idx = HashSet::new();
        let mut total_calories = 0.0;
        let mut total_volume = 0.0;

        for (_, idx) in &scored {
            let item = remaining[*idx];
            let calories = item.nutrition_per_100g.calories * (item.item.estimated_grams / 100.0);
            let volume = item.stomach_impact.volume_ml;
            let fits_calories = total_calories + calories <= self.calorie_limit;
            let fits_volume =
                total_volume + volume <= self.stomach_capacity_ml * VOLUME_OVERSHOOT;
            if fits_calories && fits_volume {
                selected.push(item.clone());
                selected_idx.insert(*idx);
                total_calories += calories;
                total_volume += volume;
            }
        }

        let skipped = remaining
            .iter()
            .enumerate()
            .filter(|(idx, _)| !selected_idx.contains(idx))
            .map(|(_, item)| (*item).clone())
            .collect();

        AllocationResult {
            selected,
            skipped,
            excluded,
        }
    }

    fn filter_allergens<'a>(
        items: &'a [EnrichedItem],
        allergies: &[String],
        excluded: &mut Vec<ExcludedItem>,
    ) -> Vec<&'a EnrichedItem> {
        let keywords: Vec<String> = allergies
            .iter()
            .map(|a| a.trim().to_lowercase())
            .filter(|a| !a.is_empty())
            .collect();
        if keywords.is_empty() {
            return items.iter().collect();
        }

        let mut remaining = Vec::new();
        for item in items {
            let name = item.item.name.to_lowercase();
            if keywords.iter().any(|kw| name.contains(kw)) {
                excluded.push(ExcludedItem {
                    item: item.clone(),
                    cause: SkipCause::Allergen,
                });
            } else {
                remaining.push(item);
            }
        }
        remaining
    }

    fn filter_dietary<'a>(
        items: Vec<&'a EnrichedItem>,
        dietary_filters: &[String],
        excluded: &mut Vec<ExcludedItem>,
    ) -> Vec<&'a EnrichedItem> {
        let tags: Vec<String> = dietary_filters.iter().map(|f| f.trim().to_lowercase()).collect();
        // Vegan takes precedence when both tags are present; unrecognized
        // tags are no-ops.
        let keywords: &[&str] = if tags.iter().any(|t| t == "vegan") {
            NON_VEGAN_KEYWORDS
        } else if tags.iter().any(|t| t == "vegetarian") {
            NON_VEGETARIAN_KEYWORDS
        } else {
            return items;
        };

        let mut remaining = Vec::new();
        for item in items {
            let name = item.item.name.to_lowercase();
            if keywords.iter().any(|kw| name.contains(kw)) {
                excluded.push(ExcludedItem {
                    item: item.clone(),
                    cause: SkipCause::DietaryFilter,
                });
            } else {
                remaining.push(item);
            }
        }
        remaining
    }

    /// Reward per item for the chosen goal, scaled by the portion-mass
    /// fraction so bigger servings of good items outrank small ones.
    fn goal_reward(item: &EnrichedItem, goal: Goal) -> f64 {
        let n = &item.nutrition_per_100g;
        let fraction = item.item.estimated_grams / 100.0;
        match goal {
            Goal::FatLoss => (n.protein * 2.0 + n.fiber * 2.0 - n.calories / 50.0) * fraction,
            Goal::MuscleGain => (n.protein * 3.0 + n.carbs * 0.5) * fraction,
            Goal::BloodSugar => (10.0 - n.glycemic_load + n.fiber * 2.0) * fraction,
            Goal::EnjoymentFirst => {
                (item.stomach_impact.satiety_score + n.protein * 0.5) * fraction
            }
        }
    }
}
