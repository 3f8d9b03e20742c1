use crate::core::pipeline::{plan_strategy, PlanRequest};
use crate::domain::model::StrategyResponse;
use crate::domain::ports::ItemDetector;
use crate::utils::error::Result;

/// Sequences detection and planning. The detector is the only fallible,
/// asynchronous piece; the decision pipeline itself is pure.
pub struct StrategyEngine<D: ItemDetector> {
    detector: D,
}

impl<D: ItemDetector> StrategyEngine<D> {
    pub fn new(detector: D) -> Self {
        Self { detector }
    }

    pub async fn run(&self, request: &PlanRequest) -> Result<StrategyResponse> {
        tracing::info!("Detecting food items...");
        let items = self.detector.detect().await?;
        tracing::info!("Detected {} items", items.len());

        tracing::info!(goal = ?request.goal, "Planning eating strategy...");
        let response = plan_strategy(items, request);
        tracing::info!(
            "Planned {} phases, {} items skipped",
            response.plan.phases.len(),
            response.plan.skip.len()
        );

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::DetectedItem;
    use crate::utils::error::PlannerError;
    use async_trait::async_trait;

    struct MockDetector {
        items: Vec<DetectedItem>,
        fail: bool,
    }

    #[async_trait]
    impl ItemDetector for MockDetector {
        async fn detect(&self) -> Result<Vec<DetectedItem>> {
            if self.fail {
                return Err(PlannerError::InputValidationError {
                    message: "detector offline".to_string(),
                });
            }
            Ok(self.items.clone())
        }
    }

    fn detected(name: &str, grams: f64) -> DetectedItem {
        DetectedItem {
            name: name.to_string(),
            confidence: 0.9,
            estimated_grams: grams,
            estimated_portion_density: 1.0,
            cooking_method: None,
            cuisine_type: None,
            bounding_box: None,
        }
    }

    #[tokio::test]
    async fn test_engine_runs_detection_then_planning() {
        let detector = MockDetector {
            items: vec![detected("soup", 200.0), detected("grilled chicken", 150.0)],
            fail: false,
        };
        let engine = StrategyEngine::new(detector);
        let response = engine.run(&PlanRequest::default()).await.unwrap();

        assert_eq!(response.items.len(), 2);
        assert!(!response.plan.phases.is_empty());
    }

    #[tokio::test]
    async fn test_engine_propagates_detector_failure() {
        let detector = MockDetector {
            items: Vec::new(),
            fail: true,
        };
        let engine = StrategyEngine::new(detector);
        let result = engine.run(&PlanRequest::default()).await;

        assert!(result.is_err());
    }
}
