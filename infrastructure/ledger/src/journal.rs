use chrono::{DateTime, Utc};
use domain_compute::model::entity::{Vm, VmStatus};
use serde::{Deserialize, Serialize};

/// One entry of the append-only ledger journal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEvent {
    pub at: DateTime<Utc>,
    #[serde(flatten)]
    pub change: LedgerChange,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum LedgerChange {
    Created {
        vm: Vm,
    },
    #[serde(rename_all = "camelCase")]
    StatusChanged {
        vm_id: u64,
        status: VmStatus,
    },
    #[serde(rename_all = "camelCase")]
    Removed {
        vm_id: u64,
    },
}

impl LedgerEvent {
    pub fn now(change: LedgerChange) -> Self {
        Self {
            at: Utc::now(),
            change,
        }
    }
}
