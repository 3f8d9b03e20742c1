// Adapters layer: concrete implementations of the domain ports (storage,
// item detection).

use crate::domain::model::{DetectedItem, ManualDishInput};
use crate::domain::ports::{ItemDetector, Storage};
use crate::utils::error::{PlannerError, Result};
use crate::utils::validation;
use async_trait::async_trait;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = Path::new(&self.base_path).join(path);
        let data = fs::read(full_path)?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, data)?;
        Ok(())
    }
}

/// Detector backed by a manually entered dish list: a JSON array of
/// `{name, estimated_grams?, cooking_method?}` objects read through the
/// storage port. Entries are validated here so the downstream pipeline only
/// ever sees well-typed, positive-valued items.
pub struct ManualDetector<S: Storage> {
    storage: S,
    path: String,
}

impl<S: Storage> ManualDetector<S> {
    pub fn new(storage: S, path: String) -> Self {
        Self { storage, path }
    }

    fn validate(dish: &ManualDishInput) -> Result<()> {
        validation::validate_non_empty_string("name", &dish.name)?;
        validation::validate_positive("estimated_grams", dish.estimated_grams)?;
        Ok(())
    }
}

#[async_trait]
impl<S: Storage> ItemDetector for ManualDetector<S> {
    async fn detect(&self) -> Result<Vec<DetectedItem>> {
        tracing::debug!("Reading dish list from {}", self.path);
        let data = self.storage.read_file(&self.path).await?;
        let dishes: Vec<ManualDishInput> =
            serde_json::from_slice(&data).map_err(|e| PlannerError::InputValidationError {
                message: format!("dish list is not a valid JSON array: {}", e),
            })?;

        for dish in &dishes {
            Self::validate(dish)?;
        }

        Ok(dishes.into_iter().map(ManualDishInput::into_detected).collect())
    }
}

/// Canned demo buffet used when no input is given and no vision model is
/// wired up. Mirrors a typical hotel spread.
#[derive(Debug, Clone, Default)]
pub struct SampleDetector;

#[async_trait]
impl ItemDetector for SampleDetector {
    async fn detect(&self) -> Result<Vec<DetectedItem>> {
        let sample = |name: &str, confidence: f64, grams: f64| DetectedItem {
            name: name.to_string(),
            confidence,
            estimated_grams: grams,
            estimated_portion_density: 1.0,
            cooking_method: None,
            cuisine_type: None,
            bounding_box: None,
        };
        Ok(vec![
            sample("Mixed Salad", 0.7, 80.0),
            sample("Grilled Chicken", 0.7, 150.0),
            sample("Roasted Vegetables", 0.7, 100.0),
            sample("Rice", 0.7, 120.0),
            sample("Bread Roll", 0.7, 50.0),
            sample("Soup", 0.7, 200.0),
            sample("Pasta", 0.7, 150.0),
            sample("Dessert", 0.6, 80.0),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_local_storage_round_trip() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path().to_str().unwrap().to_string());

        storage.write_file("plan.json", b"{}").await.unwrap();
        let data = storage.read_file("plan.json").await.unwrap();
        assert_eq!(data, b"{}");
    }

    #[tokio::test]
    async fn test_manual_detector_parses_dish_list() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dishes.json");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(
            br#"[
                {"name": "mixed salad", "estimated_grams": 80},
                {"name": "grilled chicken", "estimated_grams": 150, "cooking_method": "grilled"},
                {"name": "soup"}
            ]"#,
        )
        .unwrap();

        let storage = LocalStorage::new(dir.path().to_str().unwrap().to_string());
        let detector = ManualDetector::new(storage, "dishes.json".to_string());
        let items = detector.detect().await.unwrap();

        assert_eq!(items.len(), 3);
        assert_eq!(items[0].name, "mixed salad");
        assert_eq!(items[0].confidence, 0.9);
        assert_eq!(items[1].cooking_method.as_deref(), Some("grilled"));
        // grams default to 100 when omitted
        assert_eq!(items[2].estimated_grams, 100.0);
    }

    #[tokio::test]
    async fn test_manual_detector_rejects_invalid_entries() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dishes.json");
        std::fs::write(&path, br#"[{"name": "", "estimated_grams": 80}]"#).unwrap();

        let storage = LocalStorage::new(dir.path().to_str().unwrap().to_string());
        let detector = ManualDetector::new(storage, "dishes.json".to_string());
        assert!(detector.detect().await.is_err());

        std::fs::write(&path, br#"[{"name": "soup", "estimated_grams": -5}]"#).unwrap();
        let detector = ManualDetector::new(
            LocalStorage::new(dir.path().to_str().unwrap().to_string()),
            "dishes.json".to_string(),
        );
        assert!(detector.detect().await.is_err());
    }

    #[tokio::test]
    async fn test_manual_detector_rejects_malformed_json() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("dishes.json"), b"not json").unwrap();

        let storage = LocalStorage::new(dir.path().to_str().unwrap().to_string());
        let detector = ManualDetector::new(storage, "dishes.json".to_string());
        assert!(matches!(
            detector.detect().await,
            Err(PlannerError::InputValidationError { .. })
        ));
    }

    #[tokio::test]
    async fn test_sample_detector_yields_demo_buffet() {
        let items = SampleDetector.detect().await.unwrap();
        assert_eq!(items.len(), 8);
        assert!(items.iter().all(|i| i.estimated_grams > 0.0));
    }
}
