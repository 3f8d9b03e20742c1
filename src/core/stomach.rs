use crate::core::{round2, round3};
use crate::domain::model::{
    DetectedItem, DigestionSpeed, EnrichedItem, NourishedItem, NutritionProfile,
    PhysiologicalImpact,
};

/// Minimum calorie divisor; keeps the inverse-density term bounded for
/// near-zero-calorie foods (broths, leafy greens).
const MIN_CALORIE_DIVISOR: f64 = 10.0;

fn is_broth_like(n: &NutritionProfile) -> bool {
    n.calories < 60.0 && n.fat < 2.0
}

fn is_fat_heavy(n: &NutritionProfile) -> bool {
    n.fat > 15.0
}

/// Ordered rule chain, first match wins. Anything unmatched digests at
/// medium speed; fiber alone does not change the class.
const DIGESTION_RULES: &[(fn(&NutritionProfile) -> bool, DigestionSpeed)] = &[
    (is_broth_like, DigestionSpeed::Fast),
    (is_fat_heavy, DigestionSpeed::Slow),
];

/// Models the stomach as a fixed-capacity vessel and attaches a
/// `PhysiologicalImpact` to each item. Never fails; every division is
/// guarded.
pub struct StomachModel {
    capacity_ml: f64,
}

impl StomachModel {
    pub fn new(capacity_ml: f64) -> Self {
        Self { capacity_ml }
    }

    pub fn model(&self, items: Vec<NourishedItem>) -> Vec<EnrichedItem> {
        items
            .into_iter()
            .map(|nourished| {
                let volume = Self::volume_ml(&nourished.item);
                let satiety = Self::satiety_score(&nourished.nutrition_per_100g);
                let speed = Self::digestion_speed(&nourished.nutrition_per_100g);
                let fullness = (volume / self.capacity_ml) * (1.0 + satiety * 0.1);

                let impact = PhysiologicalImpact {
                    volume_ml: volume,
                    satiety_score: round2(satiety),
                    digestion_speed: speed,
                    fullness_contribution: round3(fullness.min(1.0)),
                };
                EnrichedItem {
                    item: nourished.item,
                    nutrition_per_100g: nourished.nutrition_per_100g,
                    stomach_impact: impact,
                }
            })
            .collect()
    }

    /// Volume from mass and density. A non-positive density is invalid and
    /// substituted with 1.0 g/ml rather than dividing by zero.
    fn volume_ml(item: &DetectedItem) -> f64 {
        let density = if item.estimated_portion_density > 0.0 {
            item.estimated_portion_density
        } else {
            1.0
        };
        item.estimated_grams / density
    }

    /// Satiety per 100g: protein and fiber drive fullness, low calorie
    /// density fills volume cheaply, fat is penalized as calorie-dense but
    /// not especially filling per gram. Floored at zero.
    fn satiety_score(n: &NutritionProfile) -> f64 {
        let calories = n.calories.max(MIN_CALORIE_DIVISOR);
        let protein_score = n.protein * 2.0;
        let fiber_score = n.fiber * 3.0;
        let volume_score = (100.0 / calories) * 100.0;
        let fat_penalty = n.fat * 0.5;
        (protein_score + fiber_score + volume_score - fat_penalty).max(0.0)
    }

    fn digestion_speed(n: &NutritionProfile) -> DigestionSpeed {
        for (rule, speed) in DIGESTION_RULES {
            if rule(n) {
                return *speed;
            }
        }
        DigestionSpeed::Medium
    }
}
