use async_trait::async_trait;
use domain_compute::{
    command::CreateVmCommand,
    exception::{ComputeException, ComputeResult},
    model::{
        entity::{Vm, VmStatus},
        vo::{Decision, OsCatalog, Principal, UsageSnapshot},
    },
    repository::VmLedgerRepo,
    service::{AdmissionService, QuotaService, UsageService, VmManageService},
};
use std::sync::Arc;
use tokio::sync::Mutex;
use typed_builder::TypedBuilder;

#[derive(TypedBuilder)]
pub struct VmManageServiceImpl {
    ledger: Arc<dyn VmLedgerRepo>,
    quota_service: Arc<dyn QuotaService>,
    usage_service: Arc<dyn UsageService>,
    admission_service: Arc<dyn AdmissionService>,
    #[builder(default)]
    os_catalog: OsCatalog,
    /// Held from reading usage until the ledger is written, so no two creations
    /// are admitted against the same usage.
    #[builder(default, setter(skip))]
    ledger_lock: Mutex<()>,
}

impl VmManageServiceImpl {
    /// Fetch a vm the caller owns. Must be called with the ledger lock held.
    async fn owned_vm(&self, caller: &Principal, vm_id: u64) -> ComputeResult<Vm> {
        let vm = self.ledger.get_by_id(vm_id).await?;
        if !vm.is_owned_by(&caller.id) {
            tracing::warn!(vm_id, caller = %caller.id, owner = %vm.owner, "vm access denied");
            return Err(ComputeException::PermissionDenied {
                vm_id,
                principal_id: caller.id.to_owned(),
            });
        }
        Ok(vm)
    }

    async fn change_status(
        &self,
        caller: &Principal,
        vm_id: u64,
        status: impl FnOnce(VmStatus) -> VmStatus + Send,
    ) -> ComputeResult<Vm> {
        let _guard = self.ledger_lock.lock().await;
        let vm = self.owned_vm(caller, vm_id).await?;
        let new_status = status(vm.status);
        if new_status == vm.status {
            return Ok(vm);
        }
        let vm = self.ledger.set_status(vm_id, new_status).await?;
        tracing::info!(vm_id, status = ?vm.status, "vm status changed");
        Ok(vm)
    }
}

#[async_trait]
impl VmManageService for VmManageServiceImpl {
    async fn get_usage_snapshot(&self, principal: &Principal) -> ComputeResult<UsageSnapshot> {
        let quota = self.quota_service.resolve(&principal.role)?;
        let usage = self.usage_service.usage(&principal.id).await?;
        Ok(UsageSnapshot::new(usage, quota))
    }

    async fn list_owned_vms(&self, principal_id: &str) -> ComputeResult<Vec<Vm>> {
        self.ledger.list_by_owner(principal_id).await
    }

    async fn evaluate_create(
        &self,
        command: &CreateVmCommand,
        principal: &Principal,
    ) -> ComputeResult<Decision> {
        command.validate(&self.os_catalog)?;
        self.admission_service.evaluate(command, principal).await
    }

    #[tracing::instrument(skip_all, fields(principal = %principal.id, name = %command.name))]
    async fn commit_create(
        &self,
        command: &CreateVmCommand,
        principal: &Principal,
    ) -> ComputeResult<Vm> {
        command.validate(&self.os_catalog)?;
        let _guard = self.ledger_lock.lock().await;
        let decision = self.admission_service.evaluate(command, principal).await?;
        if let Decision::Rejected {
            reason,
            requested,
            remaining,
            ..
        } = decision
        {
            tracing::warn!(%reason, requested, remaining, "vm creation rejected");
        }
        decision.into_result()?;

        let id = self.ledger.next_id().await?;
        let vm = Vm::build(command, principal, id);
        self.ledger.insert(&vm).await?;
        tracing::info!(vm_id = vm.id, "vm created");
        Ok(vm)
    }

    #[tracing::instrument(skip(self, caller), fields(caller = %caller.id))]
    async fn toggle_status(&self, caller: &Principal, vm_id: u64) -> ComputeResult<Vm> {
        self.change_status(caller, vm_id, VmStatus::toggled).await
    }

    #[tracing::instrument(skip(self, caller), fields(caller = %caller.id))]
    async fn start_vm(&self, caller: &Principal, vm_id: u64) -> ComputeResult<Vm> {
        self.change_status(caller, vm_id, |_| VmStatus::Running).await
    }

    #[tracing::instrument(skip(self, caller), fields(caller = %caller.id))]
    async fn stop_vm(&self, caller: &Principal, vm_id: u64) -> ComputeResult<Vm> {
        self.change_status(caller, vm_id, |_| VmStatus::Stopped).await
    }

    #[tracing::instrument(skip(self, caller), fields(caller = %caller.id))]
    async fn delete_vm(&self, caller: &Principal, vm_id: u64) -> ComputeResult<()> {
        let _guard = self.ledger_lock.lock().await;
        self.owned_vm(caller, vm_id).await?;
        let vm = self.ledger.remove(vm_id).await?;
        tracing::info!(vm_id, ram_mib = vm.ram_mib, storage_gib = vm.total_storage_gib(), "vm deleted");
        Ok(())
    }

    fn os_catalog(&self) -> Vec<String> {
        self.os_catalog.identifiers().to_vec()
    }
}
