use serde::{Deserialize, Serialize};

/// Virtual network card. Descriptive only, it costs nothing against quota.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkInterface {
    /// Host bridge, e.g. `vmbr0`.
    pub bridge: String,
    /// Emulated card model, e.g. `virtio`.
    pub model: String,
}

impl NetworkInterface {
    pub fn new(bridge: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            bridge: bridge.into(),
            model: model.into(),
        }
    }
}

impl Default for NetworkInterface {
    fn default() -> Self {
        Self::new("vmbr0", "virtio")
    }
}

/// Extra disk attached besides the primary one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageVolume {
    pub size_gib: u64,
    /// Storage backend name, e.g. `local-lvm`.
    pub storage: String,
}

impl StorageVolume {
    pub fn new(size_gib: u64, storage: impl Into<String>) -> Self {
        Self {
            size_gib,
            storage: storage.into(),
        }
    }
}

impl Default for StorageVolume {
    fn default() -> Self {
        Self::new(10, "local-lvm")
    }
}
