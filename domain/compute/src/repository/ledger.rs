use async_trait::async_trait;

use crate::{
    exception::ComputeResult,
    model::{
        entity::{Vm, VmStatus},
        vo::Usage,
    },
};

/// Authoritative collection of vm records.
///
/// Implementations synchronise every call on their own, but a caller that needs
/// several calls to observe one consistent state has to serialise them itself.
#[async_trait]
pub trait VmLedgerRepo: Send + Sync {
    /// Hand out a fresh vm id, shared by all principals and never reissued.
    async fn next_id(&self) -> ComputeResult<u64>;
    /// Add a record, `DuplicateId` if its id is already taken.
    async fn insert(&self, vm: &Vm) -> ComputeResult<()>;
    /// Change the status of a record and return the updated record.
    async fn set_status(&self, id: u64, status: VmStatus) -> ComputeResult<Vm>;
    /// Delete a record for good and return it.
    async fn remove(&self, id: u64) -> ComputeResult<Vm>;
    async fn get_by_id(&self, id: u64) -> ComputeResult<Vm>;
    /// Records of one owner in insertion order.
    async fn list_by_owner(&self, principal_id: &str) -> ComputeResult<Vec<Vm>>;
    /// Every record in insertion order.
    async fn get_all(&self) -> ComputeResult<Vec<Vm>>;
    /// Resources reserved by the records of one owner.
    async fn usage_of(&self, principal_id: &str) -> ComputeResult<Usage>;
}
