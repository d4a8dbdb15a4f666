use std::sync::Arc;

use domain_compute::{
    command::CreateVmCommand,
    exception::ComputeException,
    model::{
        entity::VmStatus,
        vo::{Decision, OsCatalog, Principal, RejectReason, Resource, Role, StorageVolume, Usage},
    },
    repository::VmLedgerRepo,
    service::VmManageService,
};
use futures::future::join_all;
use infrastructure_ledger::MemoryVmLedger;
use service_compute::{
    AdmissionControllerImpl, QuotaTableServiceImpl, UsageServiceImpl, VmManageServiceImpl,
};

fn load(ledger: Arc<MemoryVmLedger>) -> Arc<VmManageServiceImpl> {
    let quota_service = Arc::new(QuotaTableServiceImpl::default());
    let usage_service = Arc::new(UsageServiceImpl::builder().ledger(ledger.clone()).build());
    let admission_service = Arc::new(
        AdmissionControllerImpl::builder()
            .quota_service(quota_service.clone())
            .usage_service(usage_service.clone())
            .build(),
    );
    Arc::new(
        VmManageServiceImpl::builder()
            .ledger(ledger)
            .quota_service(quota_service)
            .usage_service(usage_service)
            .admission_service(admission_service)
            .os_catalog(OsCatalog::default())
            .build(),
    )
}

fn request(name: &str, ram_mib: u64) -> CreateVmCommand {
    CreateVmCommand::builder()
        .name(name)
        .os("ubuntu-22.04")
        .ram_mib(ram_mib)
        .primary_disk_gib(10)
        .build()
}

fn guest() -> Principal {
    Principal::new("guest", Role::Invited)
}

#[tokio::test]
async fn second_request_exceeds_ram_quota() {
    let service = load(Arc::new(MemoryVmLedger::new()));
    let guest = guest();

    let a = request("a", 1500);
    assert!(service.evaluate_create(&a, &guest).await.unwrap().is_accepted());
    service.commit_create(&a, &guest).await.unwrap();
    assert_eq!(service.get_usage_snapshot(&guest).await.unwrap().used_ram_mib, 1500);

    let b = request("b", 700);
    let err = service.commit_create(&b, &guest).await.unwrap_err();
    assert!(matches!(
        err,
        ComputeException::QuotaExceeded {
            reason: RejectReason::RamQuotaExceeded,
            resource: Resource::Ram,
            requested: 700,
            remaining: 548,
        }
    ));
    assert_eq!(service.list_owned_vms("guest").await.unwrap().len(), 1);
}

#[tokio::test]
async fn evaluate_create_doesnt_mutate() {
    let ledger = Arc::new(MemoryVmLedger::new());
    let service = load(ledger.clone());

    service.evaluate_create(&request("a", 512), &guest()).await.unwrap();

    assert!(ledger.get_all().await.unwrap().is_empty());
    assert!(ledger.journal().await.is_empty());
    assert_eq!(ledger.next_id().await.unwrap(), 100);
}

#[tokio::test]
async fn storage_volumes_count_against_quota() {
    let service = load(Arc::new(MemoryVmLedger::new()));
    let guest = guest();
    let mut command = request("big", 512);
    command.add_storage_volume(StorageVolume::new(30, "local-lvm"));
    service.commit_create(&command, &guest).await.unwrap();

    let snapshot = service.get_usage_snapshot(&guest).await.unwrap();
    assert_eq!(snapshot.used_storage_gib, 40);
    assert_eq!(snapshot.storage_limit_gib, 50);

    let decision = service.evaluate_create(&request("more", 512), &guest).await.unwrap();
    assert!(decision.is_accepted());
    let mut too_much = request("too-much", 512);
    too_much.primary_disk_gib = 11;
    assert!(!service.evaluate_create(&too_much, &guest).await.unwrap().is_accepted());
}

#[tokio::test]
async fn oversized_disks_are_rejected() {
    let ledger = Arc::new(MemoryVmLedger::new());
    let service = load(ledger.clone());
    let mut command = request("huge", 512);
    command.primary_disk_gib = u64::MAX;
    command.add_storage_volume(StorageVolume::new(1, "local-lvm"));

    let decision = service.evaluate_create(&command, &guest()).await.unwrap();
    assert!(matches!(
        decision,
        Decision::Rejected {
            reason: RejectReason::StorageQuotaExceeded,
            requested: u64::MAX,
            remaining: 50,
            ..
        }
    ));
    assert!(matches!(
        service.commit_create(&command, &guest()).await,
        Err(ComputeException::QuotaExceeded {
            reason: RejectReason::StorageQuotaExceeded,
            ..
        })
    ));
    assert!(ledger.get_all().await.unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creations_never_jointly_exceed_quota() {
    let service = load(Arc::new(MemoryVmLedger::new()));

    let handles = (0..2).map(|nth| {
        let service = service.clone();
        tokio::spawn(async move { service.commit_create(&request(&format!("vm-{nth}"), 1200), &guest()).await })
    });
    let results = join_all(handles).await.into_iter().map(|el| el.unwrap()).collect::<Vec<_>>();

    assert_eq!(results.iter().filter(|el| el.is_ok()).count(), 1);
    assert!(results.iter().any(|el| matches!(
        el,
        Err(ComputeException::QuotaExceeded {
            reason: RejectReason::RamQuotaExceeded,
            ..
        })
    )));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn ram_never_exceeds_quota_under_load() {
    let ledger = Arc::new(MemoryVmLedger::new());
    let service = load(ledger.clone());

    let handles = (0..32).map(|nth| {
        let service = service.clone();
        tokio::spawn(async move {
            service.commit_create(&request(&format!("vm-{nth}"), 300), &guest()).await
        })
    });
    let accepted = join_all(handles)
        .await
        .into_iter()
        .filter(|el| matches!(el, Ok(Ok(_))))
        .count();

    // 6 * 300 fits into 2048, 7 * 300 doesn't. Storage allows 5 vms of 10 GiB.
    assert_eq!(accepted, 5);
    let vms = ledger.get_all().await.unwrap();
    let usage = Usage::of(&vms, "guest");
    assert!(usage.used_ram_mib <= 2048);
    assert!(usage.used_storage_gib <= 50);
    assert_eq!(ledger.usage_of("guest").await.unwrap(), usage);
}

#[tokio::test]
async fn ids_increase_across_principals_and_deletions() {
    let service = load(Arc::new(MemoryVmLedger::new()));
    let alice = Principal::new("alice", Role::User);
    let bob = Principal::new("bob", Role::Admin);

    let first = service.commit_create(&request("a", 512), &alice).await.unwrap();
    let second = service.commit_create(&request("b", 512), &bob).await.unwrap();
    service.delete_vm(&bob, second.id).await.unwrap();
    let third = service.commit_create(&request("c", 512), &bob).await.unwrap();

    assert_eq!((first.id, second.id, third.id), (100, 101, 102));
    assert_eq!(first.status, VmStatus::Stopped);
    assert_eq!(third.owner, "bob");
}

#[tokio::test]
async fn delete_releases_usage() {
    let service = load(Arc::new(MemoryVmLedger::new()));
    let guest = guest();
    let vm = service.commit_create(&request("a", 2048), &guest).await.unwrap();
    service.toggle_status(&guest, vm.id).await.unwrap();
    assert!(!service.evaluate_create(&request("b", 1), &guest).await.unwrap().is_accepted());

    service.delete_vm(&guest, vm.id).await.unwrap();

    let snapshot = service.get_usage_snapshot(&guest).await.unwrap();
    assert_eq!((snapshot.used_ram_mib, snapshot.used_storage_gib), (0, 0));
    assert!(service.evaluate_create(&request("b", 2048), &guest).await.unwrap().is_accepted());
}

#[tokio::test]
async fn delete_missing_vm_changes_nothing() {
    let ledger = Arc::new(MemoryVmLedger::new());
    let service = load(ledger.clone());
    service.commit_create(&request("a", 512), &guest()).await.unwrap();
    let vms = ledger.get_all().await.unwrap();
    let journal = ledger.journal().await;

    let err = service.delete_vm(&guest(), 4242).await.unwrap_err();

    assert!(matches!(err, ComputeException::NotFound { vm_id: 4242 }));
    assert_eq!(ledger.get_all().await.unwrap(), vms);
    assert_eq!(ledger.journal().await, journal);

    // Deleted ids stay gone.
    let id = vms[0].id;
    service.delete_vm(&guest(), id).await.unwrap();
    assert!(matches!(
        service.delete_vm(&guest(), id).await,
        Err(ComputeException::NotFound { .. })
    ));
    assert!(matches!(
        service.toggle_status(&guest(), id).await,
        Err(ComputeException::NotFound { .. })
    ));
}

#[tokio::test]
async fn toggle_twice_restores_status() {
    let service = load(Arc::new(MemoryVmLedger::new()));
    let guest = guest();
    let vm = service.commit_create(&request("a", 512), &guest).await.unwrap();

    let once = service.toggle_status(&guest, vm.id).await.unwrap();
    assert_eq!(once.status, VmStatus::Running);
    let twice = service.toggle_status(&guest, vm.id).await.unwrap();
    assert_eq!(twice.status, VmStatus::Stopped);
    assert_eq!(twice, vm);
}

#[tokio::test]
async fn start_and_stop_are_idempotent() {
    let ledger = Arc::new(MemoryVmLedger::new());
    let service = load(ledger.clone());
    let guest = guest();
    let vm = service.commit_create(&request("a", 512), &guest).await.unwrap();

    assert_eq!(service.stop_vm(&guest, vm.id).await.unwrap().status, VmStatus::Stopped);
    assert_eq!(service.start_vm(&guest, vm.id).await.unwrap().status, VmStatus::Running);
    assert_eq!(service.start_vm(&guest, vm.id).await.unwrap().status, VmStatus::Running);
    // Create plus a single status change.
    assert_eq!(ledger.journal().await.len(), 2);
}

#[tokio::test]
async fn only_the_owner_may_touch_a_vm() {
    let service = load(Arc::new(MemoryVmLedger::new()));
    let owner = Principal::new("alice", Role::User);
    let intruder = Principal::new("mallory", Role::Admin);
    let vm = service.commit_create(&request("a", 512), &owner).await.unwrap();

    assert!(matches!(
        service.toggle_status(&intruder, vm.id).await,
        Err(ComputeException::PermissionDenied { vm_id, .. }) if vm_id == vm.id
    ));
    assert!(matches!(
        service.delete_vm(&intruder, vm.id).await,
        Err(ComputeException::PermissionDenied { .. })
    ));
    assert_eq!(service.list_owned_vms("alice").await.unwrap(), vec![vm]);
    assert!(service.list_owned_vms("mallory").await.unwrap().is_empty());
}

#[tokio::test]
async fn invalid_requests_are_refused() {
    let ledger = Arc::new(MemoryVmLedger::new());
    let service = load(ledger.clone());
    let mut command = request("a", 512);
    command.os = "haiku".into();

    assert!(matches!(
        service.evaluate_create(&command, &guest()).await,
        Err(ComputeException::InvalidRequest { .. })
    ));
    assert!(matches!(
        service.commit_create(&command, &guest()).await,
        Err(ComputeException::InvalidRequest { .. })
    ));
    assert!(ledger.get_all().await.unwrap().is_empty());
    assert_eq!(service.os_catalog().len(), 13);
}
