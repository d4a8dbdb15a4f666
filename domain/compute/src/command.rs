use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::{
    exception::{ComputeException, ComputeResult},
    model::vo::{NetworkInterface, OsCatalog, StorageVolume},
};

/// Request to create a vm.
#[derive(Clone, Debug, PartialEq, Eq, TypedBuilder, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVmCommand {
    #[builder(setter(into))]
    pub name: String,
    /// Identifier from the os catalog.
    #[builder(setter(into))]
    pub os: String,
    #[builder(default = 2)]
    #[serde(default = "default_cores")]
    pub cores: u32,
    #[builder(default = 2048)]
    #[serde(default = "default_ram_mib")]
    pub ram_mib: u64,
    #[builder(default = 20)]
    #[serde(default = "default_primary_disk_gib")]
    pub primary_disk_gib: u64,
    #[builder(default = vec![NetworkInterface::default()])]
    #[serde(default = "default_network_interfaces")]
    pub network_interfaces: Vec<NetworkInterface>,
    #[builder(default)]
    #[serde(default)]
    pub storage_volumes: Vec<StorageVolume>,
}

fn default_cores() -> u32 {
    2
}

fn default_ram_mib() -> u64 {
    2048
}

fn default_primary_disk_gib() -> u64 {
    20
}

fn default_network_interfaces() -> Vec<NetworkInterface> {
    vec![NetworkInterface::default()]
}

fn check_index(field: &'static str, index: usize, len: usize) -> ComputeResult<()> {
    if index >= len {
        return Err(ComputeException::IndexOutOfRange { field, index, len });
    }
    Ok(())
}

impl CreateVmCommand {
    /// Storage the request reserves: primary disk plus every extra volume, saturating at `u64::MAX`.
    pub fn total_disk_gib(&self) -> u64 {
        self.storage_volumes
            .iter()
            .fold(self.primary_disk_gib, |acc, el| acc.saturating_add(el.size_gib))
    }

    pub fn add_network_interface(&mut self, interface: NetworkInterface) {
        self.network_interfaces.push(interface);
    }

    pub fn update_network_interface(
        &mut self,
        index: usize,
        interface: NetworkInterface,
    ) -> ComputeResult<()> {
        check_index("network_interfaces", index, self.network_interfaces.len())?;
        self.network_interfaces[index] = interface;
        Ok(())
    }

    pub fn remove_network_interface(&mut self, index: usize) -> ComputeResult<NetworkInterface> {
        check_index("network_interfaces", index, self.network_interfaces.len())?;
        Ok(self.network_interfaces.remove(index))
    }

    pub fn add_storage_volume(&mut self, volume: StorageVolume) {
        self.storage_volumes.push(volume);
    }

    pub fn update_storage_volume(&mut self, index: usize, volume: StorageVolume) -> ComputeResult<()> {
        check_index("storage_volumes", index, self.storage_volumes.len())?;
        self.storage_volumes[index] = volume;
        Ok(())
    }

    pub fn remove_storage_volume(&mut self, index: usize) -> ComputeResult<StorageVolume> {
        check_index("storage_volumes", index, self.storage_volumes.len())?;
        Ok(self.storage_volumes.remove(index))
    }

    /// Reject requests that could never describe a real vm.
    pub fn validate(&self, catalog: &OsCatalog) -> ComputeResult<()> {
        if self.name.trim().is_empty() {
            return Err(ComputeException::invalid_request("vm name is empty"));
        }
        if !catalog.contains(&self.os) {
            return Err(ComputeException::invalid_request(format!(
                "os: {} is not in the catalog",
                self.os
            )));
        }
        if self.cores == 0 {
            return Err(ComputeException::invalid_request("cores must be positive"));
        }
        if self.ram_mib == 0 {
            return Err(ComputeException::invalid_request("ram must be positive"));
        }
        if self.primary_disk_gib == 0 {
            return Err(ComputeException::invalid_request("primary disk must be positive"));
        }
        if let Some(nth) = self.storage_volumes.iter().position(|el| el.size_gib == 0) {
            return Err(ComputeException::invalid_request(format!(
                "storage volume {nth} must have a positive size"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command() -> CreateVmCommand {
        CreateVmCommand::builder().name("db").os("ubuntu-22.04").build()
    }

    #[test]
    fn builder_defaults() {
        let command = command();
        assert_eq!(command.cores, 2);
        assert_eq!(command.ram_mib, 2048);
        assert_eq!(command.primary_disk_gib, 20);
        assert_eq!(command.network_interfaces, vec![NetworkInterface::new("vmbr0", "virtio")]);
        assert!(command.storage_volumes.is_empty());
    }

    #[test]
    fn deserialize_with_defaults() {
        let command: CreateVmCommand =
            serde_json::from_str(r#"{"name":"db","os":"ubuntu-22.04"}"#).unwrap();
        assert_eq!(command, self::command());
    }

    #[test]
    fn update_by_index() {
        let mut command = command();
        command.add_storage_volume(StorageVolume::default());
        command.update_storage_volume(0, StorageVolume::new(40, "ceph")).unwrap();
        assert_eq!(command.total_disk_gib(), 60);

        command.update_network_interface(0, NetworkInterface::new("vmbr1", "e1000")).unwrap();
        assert_eq!(command.network_interfaces[0].bridge, "vmbr1");

        let err = command.update_storage_volume(3, StorageVolume::default()).unwrap_err();
        assert!(matches!(
            err,
            ComputeException::IndexOutOfRange {
                field: "storage_volumes",
                index: 3,
                len: 1
            }
        ));
        assert_eq!(command.storage_volumes, vec![StorageVolume::new(40, "ceph")]);

        assert_eq!(command.remove_network_interface(0).unwrap().model, "e1000");
        assert!(command.remove_network_interface(0).is_err());
    }

    #[test]
    fn validate() {
        let catalog = OsCatalog::default();
        assert!(command().validate(&catalog).is_ok());

        let mut bad = command();
        bad.name = "  ".into();
        assert!(matches!(bad.validate(&catalog), Err(ComputeException::InvalidRequest { .. })));

        let mut bad = command();
        bad.os = "plan9".into();
        assert!(matches!(bad.validate(&catalog), Err(ComputeException::InvalidRequest { .. })));

        let mut bad = command();
        bad.cores = 0;
        assert!(bad.validate(&catalog).is_err());

        let mut bad = command();
        bad.add_storage_volume(StorageVolume::new(0, "local-lvm"));
        assert!(bad.validate(&catalog).is_err());
    }
}
