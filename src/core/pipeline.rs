use crate::core::allocator::Allocator;
use crate::core::nutrition::NutritionEnricher;
use crate::core::stomach::StomachModel;
use crate::core::strategy::StrategyPlanner;
use crate::core::{round1, round2};
use crate::domain::model::{
    DetectedItem, DigestionSpeed, EnrichedItem, Goal, NutritionSummary, Plan, StomachSummary,
    StrategyResponse,
};
use crate::domain::ports::PlannerSettings;

/// Fixed explanation for the short-circuit response when nothing was
/// detected.
pub const NO_ITEMS_EXPLANATION: &str = "No dishes detected.";

pub const DEFAULT_CALORIE_LIMIT: f64 = 2000.0;
pub const DEFAULT_STOMACH_CAPACITY_ML: f64 = 1350.0;

/// Everything the pipeline needs besides the items themselves.
#[derive(Debug, Clone)]
pub struct PlanRequest {
    pub goal: Goal,
    pub calorie_limit: f64,
    pub stomach_capacity_ml: f64,
    pub allergies: Vec<String>,
    pub dietary_filters: Vec<String>,
}

impl Default for PlanRequest {
    fn default() -> Self {
        Self {
            goal: Goal::default(),
            calorie_limit: DEFAULT_CALORIE_LIMIT,
            stomach_capacity_ml: DEFAULT_STOMACH_CAPACITY_ML,
            allergies: Vec::new(),
            dietary_filters: Vec::new(),
        }
    }
}

impl PlanRequest {
    pub fn from_settings(settings: &impl PlannerSettings) -> Self {
        Self {
            goal: Goal::from_tag(settings.goal()),
            calorie_limit: settings.calorie_limit(),
            stomach_capacity_ml: settings.stomach_capacity_ml(),
            allergies: settings.allergies().to_vec(),
            dietary_filters: settings.dietary_filters().to_vec(),
        }
    }
}

/// Runs the four decision stages in order and assembles the response.
/// Synchronous and side-effect-free: identical inputs produce identical
/// output, so invocations may run concurrently without coordination.
pub fn plan_strategy(items: Vec<DetectedItem>, request: &PlanRequest) -> StrategyResponse {
    if items.is_empty() {
        tracing::debug!("no detected items, returning empty response");
        return empty_response();
    }

    let confidence =
        round2(items.iter().map(|i| i.confidence).sum::<f64>() / items.len() as f64);

    let nourished = NutritionEnricher::new().enrich(items);
    let enriched = StomachModel::new(request.stomach_capacity_ml).model(nourished);

    let allocator = Allocator::new(request.calorie_limit, request.stomach_capacity_ml);
    let allocation = allocator.allocate(
        &enriched,
        request.goal,
        &request.allergies,
        &request.dietary_filters,
    );
    tracing::debug!(
        selected = allocation.selected.len(),
        skipped = allocation.skipped.len(),
        excluded = allocation.excluded.len(),
        "allocation complete"
    );

    let planner = StrategyPlanner::new(request.stomach_capacity_ml);
    let (plan, explanation) = planner.plan(&allocation, request.goal, request.calorie_limit);

    let nutrition_summary = build_nutrition_summary(&enriched);
    let stomach_summary =
        build_stomach_summary(&enriched, &allocation.selected, request.stomach_capacity_ml);

    StrategyResponse {
        items: enriched,
        nutrition_summary,
        stomach_summary,
        plan,
        explanation,
        confidence_overall: confidence,
    }
}

fn empty_response() -> StrategyResponse {
    StrategyResponse {
        items: Vec::new(),
        nutrition_summary: NutritionSummary::default(),
        stomach_summary: StomachSummary::default(),
        plan: Plan::default(),
        explanation: NO_ITEMS_EXPLANATION.to_string(),
        confidence_overall: 0.0,
    }
}

/// Nutrition totals across every detected item, each scaled by its
/// estimated mass.
fn build_nutrition_summary(items: &[EnrichedItem]) -> NutritionSummary {
    let mut summary = NutritionSummary {
        dish_count: items.len(),
        ..NutritionSummary::default()
    };
    for enriched in items {
        let factor = enriched.item.estimated_grams / 100.0;
        let n = &enriched.nutrition_per_100g;
        summary.total_available_calories += n.calories * factor;
        summary.total_protein_g += n.protein * factor;
        summary.total_fat_g += n.fat * factor;
        summary.total_carbs_g += n.carbs * factor;
        summary.total_fiber_g += n.fiber * factor;
        summary.total_glycemic_load += n.glycemic_load * factor;
    }
    summary.total_available_calories = round1(summary.total_available_calories);
    summary.total_protein_g = round1(summary.total_protein_g);
    summary.total_fat_g = round1(summary.total_fat_g);
    summary.total_carbs_g = round1(summary.total_carbs_g);
    summary.total_fiber_g = round1(summary.total_fiber_g);
    summary.total_glycemic_load = round1(summary.total_glycemic_load);
    summary
}

fn build_stomach_summary(
    all: &[EnrichedItem],
    selected: &[EnrichedItem],
    capacity_ml: f64,
) -> StomachSummary {
    let total_volume: f64 = all.iter().map(|i| i.stomach_impact.volume_ml).sum();
    let selected_volume: f64 = selected.iter().map(|i| i.stomach_impact.volume_ml).sum();
    let avg_satiety = if selected.is_empty() {
        0.0
    } else {
        selected.iter().map(|i| i.stomach_impact.satiety_score).sum::<f64>()
            / selected.len() as f64
    };

    let mut summary = StomachSummary {
        total_volume_ml: round1(total_volume),
        selected_volume_ml: round1(selected_volume),
        capacity_ml,
        avg_satiety_score: round2(avg_satiety),
        ..StomachSummary::default()
    };
    for item in selected {
        match item.stomach_impact.digestion_speed {
            DigestionSpeed::Fast => summary.digestion_profiles.fast += 1,
            DigestionSpeed::Medium => summary.digestion_profiles.medium += 1,
            DigestionSpeed::Slow => summary.digestion_profiles.slow += 1,
        }
    }
    summary
}
