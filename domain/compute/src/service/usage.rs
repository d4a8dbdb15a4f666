use async_trait::async_trait;

use crate::{exception::ComputeResult, model::vo::Usage};

#[async_trait]
/// Usage accounting service.
pub trait UsageService: Send + Sync {
    /// Resources reserved by every vm `principal_id` owns, running or stopped.
    async fn usage(&self, principal_id: &str) -> ComputeResult<Usage>;
}
