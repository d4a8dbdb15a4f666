use async_trait::async_trait;
use mockall::mock;

use crate::{
    exception::ComputeResult,
    model::{
        entity::{Vm, VmStatus},
        vo::{Principal, Quota, Role, Usage},
    },
    repository::VmLedgerRepo,
    service::{IdentityProvider, QuotaService, UsageService},
};

mock! {
    pub VmLedgerRepo {}
    #[async_trait]
    impl VmLedgerRepo for VmLedgerRepo {
        async fn next_id(&self) -> ComputeResult<u64>;
        async fn insert(&self, vm: &Vm) -> ComputeResult<()>;
        async fn set_status(&self, id: u64, status: VmStatus) -> ComputeResult<Vm>;
        async fn remove(&self, id: u64) -> ComputeResult<Vm>;
        async fn get_by_id(&self, id: u64) -> ComputeResult<Vm>;
        async fn list_by_owner(&self, principal_id: &str) -> ComputeResult<Vec<Vm>>;
        async fn get_all(&self) -> ComputeResult<Vec<Vm>>;
        async fn usage_of(&self, principal_id: &str) -> ComputeResult<Usage>;
    }
}

mock! {
    pub QuotaService {}
    impl QuotaService for QuotaService {
        fn resolve(&self, role: &Role) -> ComputeResult<Quota>;
        fn role_of(&self, role_name: &str) -> ComputeResult<Role>;
    }
}

mock! {
    pub UsageService {}
    #[async_trait]
    impl UsageService for UsageService {
        async fn usage(&self, principal_id: &str) -> ComputeResult<Usage>;
    }
}

mock! {
    pub IdentityProvider {}
    impl IdentityProvider for IdentityProvider {
        fn current_principal(&self) -> ComputeResult<Principal>;
    }
}
