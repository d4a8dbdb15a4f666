use async_trait::async_trait;
use domain_compute::{
    command::CreateVmCommand,
    exception::ComputeResult,
    model::vo::{Decision, Principal, Quota, RejectReason, Resource, Usage},
    service::{AdmissionService, QuotaService, UsageService},
};
use std::sync::Arc;
use typed_builder::TypedBuilder;

#[derive(TypedBuilder)]
pub struct AdmissionControllerImpl {
    quota_service: Arc<dyn QuotaService>,
    usage_service: Arc<dyn UsageService>,
}

/// Admission decision for `command` given the current `usage` and the `quota` of its owner.
pub fn decide(quota: &Quota, usage: &Usage, command: &CreateVmCommand) -> Decision {
    if usage.used_ram_mib.saturating_add(command.ram_mib) > quota.ram_limit_mib {
        return Decision::Rejected {
            reason: RejectReason::RamQuotaExceeded,
            resource: Resource::Ram,
            requested: command.ram_mib,
            remaining: quota.ram_limit_mib.saturating_sub(usage.used_ram_mib),
        };
    }
    let disk = command.total_disk_gib();
    if usage.used_storage_gib.saturating_add(disk) > quota.storage_limit_gib {
        return Decision::Rejected {
            reason: RejectReason::StorageQuotaExceeded,
            resource: Resource::Storage,
            requested: disk,
            remaining: quota.storage_limit_gib.saturating_sub(usage.used_storage_gib),
        };
    }
    Decision::Accepted
}

#[async_trait]
impl AdmissionService for AdmissionControllerImpl {
    async fn evaluate(
        &self,
        command: &CreateVmCommand,
        principal: &Principal,
    ) -> ComputeResult<Decision> {
        let quota = self.quota_service.resolve(&principal.role)?;
        let usage = self.usage_service.usage(&principal.id).await?;
        let decision = decide(&quota, &usage, command);
        tracing::debug!(
            principal = %principal.id,
            used_ram_mib = usage.used_ram_mib,
            used_storage_gib = usage.used_storage_gib,
            ?decision,
            "evaluated vm creation"
        );
        Ok(decision)
    }
}
