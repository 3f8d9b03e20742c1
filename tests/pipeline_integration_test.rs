use buffet_planner::adapters::{LocalStorage, ManualDetector, SampleDetector};
use buffet_planner::core::engine::StrategyEngine;
use buffet_planner::core::pipeline::PlanRequest;
use buffet_planner::domain::model::{Goal, PhaseName, StrategyResponse};
use tempfile::TempDir;

async fn run_from_json(dishes: &str, request: &PlanRequest) -> StrategyResponse {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("dishes.json"), dishes).unwrap();

    let storage = LocalStorage::new(dir.path().to_str().unwrap().to_string());
    let detector = ManualDetector::new(storage, "dishes.json".to_string());
    StrategyEngine::new(detector).run(request).await.unwrap()
}

const BUFFET_TRIO: &str = r#"[
    {"name": "mixed salad", "estimated_grams": 80},
    {"name": "grilled chicken", "estimated_grams": 150},
    {"name": "dessert", "estimated_grams": 80}
]"#;

#[tokio::test]
async fn test_fat_loss_strategy_from_dish_file() {
    let request = PlanRequest {
        goal: Goal::FatLoss,
        ..PlanRequest::default()
    };
    let response = run_from_json(BUFFET_TRIO, &request).await;

    // Everything fits the default budgets, so nothing is skipped and the
    // phases come out in serving order.
    let phase_names: Vec<PhaseName> = response.plan.phases.iter().map(|p| p.phase_name).collect();
    assert_eq!(
        phase_names,
        vec![PhaseName::Starter, PhaseName::Protein, PhaseName::Treats]
    );
    assert!(response.plan.skip.is_empty());

    assert_eq!(response.nutrition_summary.dish_count, 3);
    assert_eq!(response.nutrition_summary.total_available_calories, 541.9);
    assert_eq!(response.stomach_summary.selected_volume_ml, 310.0);
    assert_eq!(response.plan.fullness_score, 0.23);

    // Manually entered dishes all carry 0.9 confidence
    assert_eq!(response.confidence_overall, 0.9);
    assert!(!response.explanation.is_empty());
}

#[tokio::test]
async fn test_allergy_moves_dish_to_skip_list() {
    let request = PlanRequest {
        goal: Goal::FatLoss,
        allergies: vec!["chicken".to_string()],
        ..PlanRequest::default()
    };
    let response = run_from_json(BUFFET_TRIO, &request).await;

    for phase in &response.plan.phases {
        assert!(phase
            .items
            .iter()
            .all(|i| !i.dish_name.to_lowercase().contains("chicken")));
    }
    let skipped = response
        .plan
        .skip
        .iter()
        .find(|s| s.name == "grilled chicken")
        .expect("allergen dish should appear in the skip list");
    assert_eq!(skipped.reason, "Contains a flagged allergen");
}

#[tokio::test]
async fn test_vegan_filter_skips_animal_products() {
    let dishes = r#"[
        {"name": "eggs", "estimated_grams": 100},
        {"name": "cheese", "estimated_grams": 50},
        {"name": "rice", "estimated_grams": 120}
    ]"#;
    let request = PlanRequest {
        dietary_filters: vec!["vegan".to_string()],
        ..PlanRequest::default()
    };
    let response = run_from_json(dishes, &request).await;

    for name in ["eggs", "cheese"] {
        for phase in &response.plan.phases {
            assert!(phase.items.iter().all(|i| i.dish_name != name));
        }
        let skipped = response.plan.skip.iter().find(|s| s.name == name).unwrap();
        assert_eq!(skipped.reason, "Excluded by dietary filter");
    }
    // rice is vegan and should survive into a phase
    assert!(response
        .plan
        .phases
        .iter()
        .any(|p| p.items.iter().any(|i| i.dish_name == "rice")));
}

#[tokio::test]
async fn test_empty_dish_list_short_circuits() {
    let response = run_from_json("[]", &PlanRequest::default()).await;

    assert!(response.items.is_empty());
    assert!(response.plan.phases.is_empty());
    assert_eq!(response.explanation, "No dishes detected.");
    assert_eq!(response.confidence_overall, 0.0);
}

#[tokio::test]
async fn test_identical_inputs_give_identical_responses() {
    let request = PlanRequest {
        goal: Goal::MuscleGain,
        ..PlanRequest::default()
    };
    let first = run_from_json(BUFFET_TRIO, &request).await;
    let second = run_from_json(BUFFET_TRIO, &request).await;

    let a = serde_json::to_string(&first).unwrap();
    let b = serde_json::to_string(&second).unwrap();
    assert_eq!(a, b);
}

#[tokio::test]
async fn test_demo_buffet_end_to_end() {
    let engine = StrategyEngine::new(SampleDetector);
    let response = engine.run(&PlanRequest::default()).await.unwrap();

    assert_eq!(response.items.len(), 8);
    assert!(!response.plan.phases.is_empty());

    // Phases must come out strictly ordered and only contain planned items
    let orders: Vec<u8> = response.plan.phases.iter().map(|p| p.phase_order).collect();
    let mut sorted = orders.clone();
    sorted.sort_unstable();
    sorted.dedup();
    assert_eq!(orders, sorted);

    let planned: usize = response.plan.phases.iter().map(|p| p.items.len()).sum();
    assert_eq!(planned + response.plan.skip.len(), 8);
    assert!(response.plan.fullness_score >= 0.0 && response.plan.fullness_score <= 1.0);
}
