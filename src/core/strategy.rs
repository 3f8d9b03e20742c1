use crate::core::{round1, round2};
use crate::domain::model::{
    AllocationResult, EnrichedItem, Goal, Phase, PhaseName, Plan, PortionedItem, SkipCause,
    SkippedItem,
};
use std::collections::BTreeMap;

/// Per-item serving bounds in grams. Budgets exhausted or not, an item is
/// never planned below a minimal meaningful serving, so cumulative totals
/// may slightly exceed nominal budgets.
const MIN_PORTION_G: f64 = 20.0;
const MAX_PORTION_G: f64 = 250.0;

/// Sentinel cap when a per-100g rate is zero and no budget bound applies.
const UNBOUNDED_PORTION_G: f64 = 500.0;

const STARTER_KEYWORDS: &[&str] = &["soup", "salad", "broth", "consomme"];
const PROTEIN_KEYWORDS: &[&str] = &["chicken", "fish", "steak", "salmon", "meat", "eggs"];
const TREAT_KEYWORDS: &[&str] = &["dessert", "cake", "donut", "cookie", "pastry"];
const CARB_KEYWORDS: &[&str] = &["rice", "pasta", "bread", "potato", "quinoa", "beans"];
const VEGETABLE_KEYWORDS: &[&str] = &["vegetable", "broccoli", "carrot"];

const SKIP_REASON_BUDGET: &str = "Lower priority for goal or exceeded volume/calorie limit";
const SKIP_REASON_ALLERGEN: &str = "Contains a flagged allergen";
const SKIP_REASON_DIETARY: &str = "Excluded by dietary filter";

const FALLBACK_EXPLANATION: &str =
    "Follow the phases in order for optimal satiety and nutrition.";

fn name_contains_any(name: &str, keywords: &[&str]) -> bool {
    let lower = name.to_lowercase();
    keywords.iter().any(|kw| lower.contains(kw))
}

fn is_starter_dish(item: &EnrichedItem) -> bool {
    name_contains_any(&item.item.name, STARTER_KEYWORDS)
}

fn is_protein_dish(item: &EnrichedItem) -> bool {
    item.nutrition_per_100g.protein > 15.0 || name_contains_any(&item.item.name, PROTEIN_KEYWORDS)
}

fn is_treat_dish(item: &EnrichedItem) -> bool {
    name_contains_any(&item.item.name, TREAT_KEYWORDS)
}

fn is_carb_dish(item: &EnrichedItem) -> bool {
    name_contains_any(&item.item.name, CARB_KEYWORDS)
}

fn is_vegetable_dish(item: &EnrichedItem) -> bool {
    name_contains_any(&item.item.name, VEGETABLE_KEYWORDS)
}

fn is_protein_rich(item: &EnrichedItem) -> bool {
    item.nutrition_per_100g.protein > 10.0
}

fn is_carb_heavy(item: &EnrichedItem) -> bool {
    item.nutrition_per_100g.carbs > 20.0
}

/// Ordered classification chain, first match wins; unmatched items land in
/// the vegetables phase.
const PHASE_RULES: &[(fn(&EnrichedItem) -> bool, PhaseName)] = &[
    (is_starter_dish, PhaseName::Starter),
    (is_protein_dish, PhaseName::Protein),
    (is_treat_dish, PhaseName::Treats),
    (is_carb_dish, PhaseName::Carbs),
    (is_vegetable_dish, PhaseName::Vegetables),
    (is_protein_rich, PhaseName::Protein),
    (is_carb_heavy, PhaseName::Carbs),
];

/// Turns the allocator's partition into an ordered, portioned plan with a
/// templated natural-language rationale. Deterministic for identical inputs;
/// never fails.
pub struct StrategyPlanner {
    stomach_capacity_ml: f64,
}

impl StrategyPlanner {
    pub fn new(stomach_capacity_ml: f64) -> Self {
        Self { stomach_capacity_ml }
    }

    pub fn plan(
        &self,
        allocation: &AllocationResult,
        goal: Goal,
        calorie_limit: f64,
    ) -> (Plan, String) {
        let mut groups: BTreeMap<PhaseName, Vec<&EnrichedItem>> = BTreeMap::new();
        for item in &allocation.selected {
            groups.entry(Self::classify_phase(item)).or_default().push(item);
        }

        let mut phases = Vec::new();
        let mut total_calories = 0.0;
        let mut stomach_used_ml = 0.0;

        // BTreeMap iterates in phase order, so the two running budgets are
        // threaded starter-first through to treats.
        for (phase_name, items) in &groups {
            let mut portioned = Vec::new();
            for item in items {
                let calorie_remaining = calorie_limit - total_calories;
                let volume_remaining = self.stomach_capacity_ml - stomach_used_ml;
                let (portion, reason) =
                    Self::compute_portion(item, calorie_remaining, volume_remaining);

                let n = &item.nutrition_per_100g;
                let factor = portion / 100.0;
                let portion_ml = if item.item.estimated_grams > 0.0 {
                    round1(item.stomach_impact.volume_ml * (portion / item.item.estimated_grams))
                } else {
                    portion
                };
                let entry = PortionedItem {
                    dish_name: item.item.name.clone(),
                    portion_grams: portion,
                    portion_ml,
                    calories: round1(n.calories * factor),
                    protein: round1(n.protein * factor),
                    carbs: round1(n.carbs * factor),
                    fat: round1(n.fat * factor),
                    reason,
                };
                total_calories += entry.calories;
                stomach_used_ml += entry.portion_ml;
                portioned.push(entry);
            }
            phases.push(Phase {
                phase_name: *phase_name,
                phase_order: phase_name.order(),
                items: portioned,
            });
        }

        let mut skip = Vec::new();
        for item in &allocation.skipped {
            skip.push(SkippedItem {
                name: item.item.name.clone(),
                reason: SKIP_REASON_BUDGET.to_string(),
            });
        }
        for excluded in &allocation.excluded {
            let reason = match excluded.cause {
                SkipCause::Allergen => SKIP_REASON_ALLERGEN,
                SkipCause::DietaryFilter => SKIP_REASON_DIETARY,
            };
            skip.push(SkippedItem {
                name: excluded.item.item.name.clone(),
                reason: reason.to_string(),
            });
        }

        let fullness_score = (stomach_used_ml / self.stomach_capacity_ml).min(1.0);
        let explanation = Self::build_explanation(&phases, &skip, goal);
        let plan = Plan {
            phases,
            skip,
            total_calories: round1(total_calories),
            stomach_used_ml: round1(stomach_used_ml),
            fullness_score: round2(fullness_score),
        };
        (plan, explanation)
    }

    fn classify_phase(item: &EnrichedItem) -> PhaseName {
        for (rule, phase) in PHASE_RULES {
            if rule(item) {
                return *phase;
            }
        }
        PhaseName::Vegetables
    }

    /// Candidate portion capped by the original estimate, both remaining
    /// budgets and the absolute ceiling, then rounded and floored.
    fn compute_portion(
        item: &EnrichedItem,
        calorie_remaining: f64,
        volume_remaining: f64,
    ) -> (f64, String) {
        let n = &item.nutrition_per_100g;
        let grams = item.item.estimated_grams;
        let vol_per_100 = if grams > 0.0 {
            item.stomach_impact.volume_ml / (grams / 100.0)
        } else {
            100.0
        };

        let max_by_calories = if n.calories > 0.0 {
            (calorie_remaining / n.calories) * 100.0
        } else {
            UNBOUNDED_PORTION_G
        };
        let max_by_volume = if vol_per_100 > 0.0 {
            (volume_remaining / vol_per_100) * 100.0
        } else {
            UNBOUNDED_PORTION_G
        };

        let portion = grams
            .min(max_by_calories)
            .min(max_by_volume)
            .min(MAX_PORTION_G)
            .round()
            .max(MIN_PORTION_G);

        let name = item.item.name.to_lowercase();
        let reason = if name.contains("soup") || name.contains("salad") {
            "Volume-fill to increase satiety with low calories".to_string()
        } else if n.protein > 15.0 {
            format!("High protein ({}g/100g) for satiety", n.protein)
        } else if n.glycemic_load < 5.0 {
            format!("Low glycemic load ({}) for blood sugar", n.glycemic_load)
        } else {
            "Balanced portion for variety".to_string()
        };

        (portion, reason)
    }

    /// Fixed-order templated narrative. Concatenation of parts keyed off
    /// phase contents, the skip list and the goal; byte-identical output for
    /// identical inputs.
    fn build_explanation(phases: &[Phase], skip: &[SkippedItem], goal: Goal) -> String {
        if phases.is_empty() && skip.is_empty() {
            return FALLBACK_EXPLANATION.to_string();
        }

        let mut parts: Vec<String> = Vec::new();
        let phase_items = |name: PhaseName| -> Option<&Phase> {
            phases.iter().find(|p| p.phase_name == name && !p.items.is_empty())
        };

        if phase_items(PhaseName::Starter).is_some() {
            parts.push(
                "Start with soup or salad to fill volume cheaply (low calories, high satiety). "
                    .to_string(),
            );
        }

        if let Some(phase) = phase_items(PhaseName::Protein) {
            let names: Vec<&str> = phase.items.iter().map(|i| i.dish_name.as_str()).collect();
            parts.push(format!(
                "Then prioritize protein ({}) for satiety and muscle support. ",
                names.join(", ")
            ));
        }

        for phase in phases {
            if matches!(phase.phase_name, PhaseName::Vegetables | PhaseName::Carbs)
                && !phase.items.is_empty()
            {
                let names: Vec<&str> = phase.items.iter().map(|i| i.dish_name.as_str()).collect();
                parts.push(format!("Add {} for energy and fiber. ", names.join(", ")));
            }
        }

        if phase_items(PhaseName::Treats).is_some() {
            parts.push(
                "Save dessert for last—your stomach will be fuller, so you'll eat less. "
                    .to_string(),
            );
        }

        if !skip.is_empty() {
            let names: Vec<&str> = skip.iter().take(5).map(|s| s.name.as_str()).collect();
            parts.push(format!("Skip or minimize: {}. ", names.join(", ")));
        }

        let goal_hint = match goal {
            Goal::FatLoss => "Strategy favors high-protein, high-fiber, low-calorie-density items.",
            Goal::MuscleGain => "Strategy prioritizes protein and moderate carbs for recovery.",
            Goal::BloodSugar => "Strategy selects low-glycemic items and pairs carbs with fiber.",
            Goal::EnjoymentFirst => "Strategy balances satiety with variety for maximum enjoyment.",
        };
        parts.push(goal_hint.to_string());

        let text = parts.concat().trim().to_string();
        if text.is_empty() {
            FALLBACK_EXPLANATION.to_string()
        } else {
            text
        }
    }
}
