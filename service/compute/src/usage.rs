use async_trait::async_trait;
use domain_compute::{
    exception::ComputeResult, model::vo::Usage, repository::VmLedgerRepo, service::UsageService,
};
use std::sync::Arc;
use typed_builder::TypedBuilder;

#[derive(TypedBuilder)]
pub struct UsageServiceImpl {
    ledger: Arc<dyn VmLedgerRepo>,
    /// Sum the whole ledger on every call instead of reading the ledger's per owner counters.
    #[builder(default)]
    recompute: bool,
}

#[async_trait]
impl UsageService for UsageServiceImpl {
    async fn usage(&self, principal_id: &str) -> ComputeResult<Usage> {
        if self.recompute {
            let vms = self.ledger.get_all().await?;
            return Ok(Usage::of(&vms, principal_id));
        }
        self.ledger.usage_of(principal_id).await
    }
}
