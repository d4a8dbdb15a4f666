use serde::{Deserialize, Serialize};

use crate::{
    command::CreateVmCommand,
    model::vo::{NetworkInterface, Principal, StorageVolume},
};

/// Logical virtual machine record, nothing is provisioned for it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vm {
    /// Globally unique, assigned once by the ledger and never reused.
    pub id: u64,
    pub name: String,
    /// Identifier from the os catalog.
    pub os: String,
    pub cores: u32,
    pub ram_mib: u64,
    pub primary_disk_gib: u64,
    pub network_interfaces: Vec<NetworkInterface>,
    pub storage_volumes: Vec<StorageVolume>,
    pub status: VmStatus,
    /// Id of the owning principal, never changes after creation.
    pub owner: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VmStatus {
    #[default]
    Stopped,
    Running,
}

impl VmStatus {
    pub fn toggled(self) -> Self {
        match self {
            VmStatus::Stopped => VmStatus::Running,
            VmStatus::Running => VmStatus::Stopped,
        }
    }
}

impl Vm {
    /// Mint the record of an accepted creation request.
    ///
    /// A new vm is always stopped and owned by `principal`.
    pub fn build(command: &CreateVmCommand, principal: &Principal, id: u64) -> Self {
        let CreateVmCommand {
            name,
            os,
            cores,
            ram_mib,
            primary_disk_gib,
            network_interfaces,
            storage_volumes,
        } = command.to_owned();

        Self {
            id,
            name,
            os,
            cores,
            ram_mib,
            primary_disk_gib,
            network_interfaces,
            storage_volumes,
            status: VmStatus::Stopped,
            owner: principal.id.to_owned(),
        }
    }

    /// Primary disk plus every extra volume.
    pub fn total_storage_gib(&self) -> u64 {
        self.storage_volumes
            .iter()
            .fold(self.primary_disk_gib, |acc, el| acc.saturating_add(el.size_gib))
    }

    pub fn is_owned_by(&self, principal_id: &str) -> bool {
        self.owner == principal_id
    }
}
