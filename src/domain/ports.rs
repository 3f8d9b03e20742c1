use crate::domain::model::DetectedItem;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Upstream producer of food items. The planner treats detection as an
/// opaque capability; implementations may read a file, call a vision model,
/// or return canned demo data.
#[async_trait]
pub trait ItemDetector: Send + Sync {
    async fn detect(&self) -> Result<Vec<DetectedItem>>;
}

pub trait PlannerSettings: Send + Sync {
    fn goal(&self) -> &str;
    fn calorie_limit(&self) -> f64;
    fn stomach_capacity_ml(&self) -> f64;
    fn allergies(&self) -> &[String];
    fn dietary_filters(&self) -> &[String];
}
