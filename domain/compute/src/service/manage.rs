use async_trait::async_trait;

use crate::{
    command::CreateVmCommand,
    exception::ComputeResult,
    model::{
        entity::Vm,
        vo::{Decision, Principal, UsageSnapshot},
    },
};

#[async_trait]
/// Vm management service, the operations offered to the presentation layer.
///
/// Creation is split in two: `evaluate_create` only answers, `commit_create` mutates.
/// Lifecycle operations are only allowed on vms the caller owns.
pub trait VmManageService: Send + Sync {
    /// Current usage of `principal` next to its limits.
    async fn get_usage_snapshot(&self, principal: &Principal) -> ComputeResult<UsageSnapshot>;

    /// Vms owned by `principal_id` in creation order.
    async fn list_owned_vms(&self, principal_id: &str) -> ComputeResult<Vec<Vm>>;

    /// Validate and evaluate a creation request without changing anything.
    async fn evaluate_create(
        &self,
        command: &CreateVmCommand,
        principal: &Principal,
    ) -> ComputeResult<Decision>;

    /// Create the vm. The request is evaluated again atomically with the insertion,
    /// `QuotaExceeded` if it doesn't fit anymore.
    async fn commit_create(
        &self,
        command: &CreateVmCommand,
        principal: &Principal,
    ) -> ComputeResult<Vm>;

    /// Flip stopped and running, return the vm with its new status.
    async fn toggle_status(&self, caller: &Principal, vm_id: u64) -> ComputeResult<Vm>;

    /// Start a vm, a running vm stays running.
    async fn start_vm(&self, caller: &Principal, vm_id: u64) -> ComputeResult<Vm>;

    /// Stop a vm, a stopped vm stays stopped.
    async fn stop_vm(&self, caller: &Principal, vm_id: u64) -> ComputeResult<Vm>;

    /// Delete a vm for good, releasing its reservation.
    async fn delete_vm(&self, caller: &Principal, vm_id: u64) -> ComputeResult<()>;

    /// Os identifiers a vm can be created with.
    fn os_catalog(&self) -> Vec<String>;
}
