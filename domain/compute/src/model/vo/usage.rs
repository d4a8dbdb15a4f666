use serde::{Deserialize, Serialize};

use super::Quota;
use crate::model::entity::Vm;

/// Resources currently reserved by one principal's vms.
///
/// A vm reserves its ram and storage for as long as it exists, whether it is running or not.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Usage {
    pub used_ram_mib: u64,
    pub used_storage_gib: u64,
}

impl Usage {
    /// Sum the reservations of every vm in `vms` owned by `principal_id`.
    pub fn of<'a>(vms: impl IntoIterator<Item = &'a Vm>, principal_id: &str) -> Self {
        vms.into_iter()
            .filter(|vm| vm.owner == principal_id)
            .fold(Self::default(), |mut usage, vm| {
                usage.reserve(vm);
                usage
            })
    }

    pub fn reserve(&mut self, vm: &Vm) {
        self.used_ram_mib = self.used_ram_mib.saturating_add(vm.ram_mib);
        self.used_storage_gib = self.used_storage_gib.saturating_add(vm.total_storage_gib());
    }

    pub fn release(&mut self, vm: &Vm) {
        self.used_ram_mib = self.used_ram_mib.saturating_sub(vm.ram_mib);
        self.used_storage_gib = self.used_storage_gib.saturating_sub(vm.total_storage_gib());
    }

    pub fn is_empty(&self) -> bool {
        self.used_ram_mib == 0 && self.used_storage_gib == 0
    }
}

/// Usage of a principal next to the limits of its role.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageSnapshot {
    pub used_ram_mib: u64,
    pub ram_limit_mib: u64,
    pub used_storage_gib: u64,
    pub storage_limit_gib: u64,
}

impl UsageSnapshot {
    pub fn new(usage: Usage, quota: Quota) -> Self {
        Self {
            used_ram_mib: usage.used_ram_mib,
            ram_limit_mib: quota.ram_limit_mib,
            used_storage_gib: usage.used_storage_gib,
            storage_limit_gib: quota.storage_limit_gib,
        }
    }

    pub fn remaining_ram_mib(&self) -> u64 {
        self.ram_limit_mib.saturating_sub(self.used_ram_mib)
    }

    pub fn remaining_storage_gib(&self) -> u64 {
        self.storage_limit_gib.saturating_sub(self.used_storage_gib)
    }
}
