use serde::{Deserialize, Serialize};
use std::fmt;

use crate::exception::{ComputeException, ComputeResult};

/// Outcome of an admission check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Decision {
    Accepted,
    #[serde(rename_all = "camelCase")]
    Rejected {
        reason: RejectReason,
        resource: Resource,
        /// Amount the request asked for.
        requested: u64,
        /// Headroom left before the request.
        remaining: u64,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    RamQuotaExceeded,
    StorageQuotaExceeded,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Resource {
    /// MiB of memory.
    Ram,
    /// GiB of disk.
    Storage,
}

impl Decision {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Decision::Accepted)
    }

    /// Turn a rejection into [`ComputeException::QuotaExceeded`].
    pub fn into_result(self) -> ComputeResult<()> {
        match self {
            Decision::Accepted => Ok(()),
            Decision::Rejected {
                reason,
                resource,
                requested,
                remaining,
            } => Err(ComputeException::QuotaExceeded {
                reason,
                resource,
                requested,
                remaining,
            }),
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::RamQuotaExceeded => f.write_str("Ram quota exceeded"),
            RejectReason::StorageQuotaExceeded => f.write_str("Storage quota exceeded"),
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Ram => f.write_str("MiB of ram"),
            Resource::Storage => f.write_str("GiB of storage"),
        }
    }
}
