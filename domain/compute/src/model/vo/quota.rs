use serde::{Deserialize, Serialize};

/// Resource ceiling of a role.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quota {
    /// Memory ceiling in MiB.
    pub ram_limit_mib: u64,
    /// Primary disks plus extra volumes, in GiB.
    pub storage_limit_gib: u64,
}

impl Quota {
    pub const fn new(ram_limit_mib: u64, storage_limit_gib: u64) -> Self {
        Self {
            ram_limit_mib,
            storage_limit_gib,
        }
    }
}
