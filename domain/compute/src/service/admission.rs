use async_trait::async_trait;

use crate::{
    command::CreateVmCommand,
    exception::ComputeResult,
    model::vo::{Decision, Principal},
};

#[async_trait]
/// Admission control service.
///
/// Checks ram first, then storage, and reports the first exceeded resource only.
/// The decision holds only as long as the ledger doesn't change, so a caller that acts on it
/// has to keep the ledger locked in between.
pub trait AdmissionService: Send + Sync {
    /// Decide whether `command` fits into the remaining quota of `principal`.
    async fn evaluate(
        &self,
        command: &CreateVmCommand,
        principal: &Principal,
    ) -> ComputeResult<Decision>;
}
