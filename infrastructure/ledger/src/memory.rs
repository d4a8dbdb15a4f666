use anyhow::anyhow;
use async_trait::async_trait;
use domain_compute::{
    exception::{ComputeException, ComputeResult},
    model::{
        entity::{Vm, VmStatus},
        vo::Usage,
    },
    repository::VmLedgerRepo,
};
use std::collections::HashMap;
use tokio::sync::Mutex;

use crate::journal::{LedgerChange, LedgerEvent};

/// First id handed out by a fresh ledger.
pub const FIRST_VM_ID: u64 = 100;

/// Ledger kept in process memory.
///
/// Per owner usage is maintained on every insert and remove, so reading it doesn't scan the records.
/// Every mutation is appended to a journal that [`MemoryVmLedger::replay`] can rebuild the ledger from.
pub struct MemoryVmLedger {
    state: Mutex<LedgerState>,
}

struct LedgerState {
    next_id: u64,
    vms: Vec<Vm>,
    usage: HashMap<String, Usage>,
    journal: Vec<LedgerEvent>,
}

impl Default for LedgerState {
    fn default() -> Self {
        Self {
            next_id: FIRST_VM_ID,
            vms: vec![],
            usage: HashMap::new(),
            journal: vec![],
        }
    }
}

impl LedgerState {
    fn position(&self, id: u64) -> ComputeResult<usize> {
        self.vms
            .iter()
            .position(|el| el.id == id)
            .ok_or(ComputeException::NotFound { vm_id: id })
    }

    fn apply(&mut self, event: LedgerEvent) -> ComputeResult<Option<Vm>> {
        let changed = match &event.change {
            LedgerChange::Created { vm } => {
                if self.vms.iter().any(|el| el.id == vm.id) {
                    return Err(ComputeException::DuplicateId { vm_id: vm.id });
                }
                let after = vm
                    .id
                    .checked_add(1)
                    .ok_or_else(|| anyhow!("vm id: {} leaves no id to hand out next", vm.id))?;
                self.usage.entry(vm.owner.to_owned()).or_default().reserve(vm);
                // Ids below the counter may come from replayed or foreign records, never reissue them.
                self.next_id = self.next_id.max(after);
                self.vms.push(vm.to_owned());
                None
            }
            LedgerChange::StatusChanged { vm_id, status } => {
                let nth = self.position(*vm_id)?;
                let vm = &mut self.vms[nth];
                vm.status = *status;
                Some(vm.to_owned())
            }
            LedgerChange::Removed { vm_id } => {
                let nth = self.position(*vm_id)?;
                let vm = self.vms.remove(nth);
                let released_all = match self.usage.get_mut(&vm.owner) {
                    Some(usage) => {
                        usage.release(&vm);
                        usage.is_empty()
                    }
                    None => false,
                };
                if released_all {
                    self.usage.remove(&vm.owner);
                }
                Some(vm)
            }
        };
        self.journal.push(event);
        Ok(changed)
    }
}

impl Default for MemoryVmLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryVmLedger {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(LedgerState::default()),
        }
    }

    /// Rebuild a ledger from a journal previously taken with [`MemoryVmLedger::journal`].
    ///
    /// Fails on the first event that doesn't apply to the state built so far.
    pub fn replay(events: impl IntoIterator<Item = LedgerEvent>) -> ComputeResult<Self> {
        let mut state = LedgerState::default();
        for event in events {
            state.apply(event)?;
        }
        Ok(Self {
            state: Mutex::new(state),
        })
    }

    /// Every change applied so far, oldest first.
    pub async fn journal(&self) -> Vec<LedgerEvent> {
        self.state.lock().await.journal.to_owned()
    }
}

#[async_trait]
impl VmLedgerRepo for MemoryVmLedger {
    async fn next_id(&self) -> ComputeResult<u64> {
        let mut state = self.state.lock().await;
        let id = state.next_id;
        state.next_id = id.checked_add(1).ok_or_else(|| anyhow!("vm ids are exhausted"))?;
        Ok(id)
    }

    async fn insert(&self, vm: &Vm) -> ComputeResult<()> {
        let mut state = self.state.lock().await;
        state.apply(LedgerEvent::now(LedgerChange::Created { vm: vm.to_owned() }))?;
        Ok(())
    }

    async fn set_status(&self, id: u64, status: VmStatus) -> ComputeResult<Vm> {
        let mut state = self.state.lock().await;
        state
            .apply(LedgerEvent::now(LedgerChange::StatusChanged { vm_id: id, status }))?
            .ok_or(ComputeException::NotFound { vm_id: id })
    }

    async fn remove(&self, id: u64) -> ComputeResult<Vm> {
        let mut state = self.state.lock().await;
        state
            .apply(LedgerEvent::now(LedgerChange::Removed { vm_id: id }))?
            .ok_or(ComputeException::NotFound { vm_id: id })
    }

    async fn get_by_id(&self, id: u64) -> ComputeResult<Vm> {
        let state = self.state.lock().await;
        let nth = state.position(id)?;
        Ok(state.vms[nth].to_owned())
    }

    async fn list_by_owner(&self, principal_id: &str) -> ComputeResult<Vec<Vm>> {
        let state = self.state.lock().await;
        Ok(state.vms.iter().filter(|el| el.owner == principal_id).cloned().collect())
    }

    async fn get_all(&self) -> ComputeResult<Vec<Vm>> {
        Ok(self.state.lock().await.vms.to_owned())
    }

    async fn usage_of(&self, principal_id: &str) -> ComputeResult<Usage> {
        let state = self.state.lock().await;
        Ok(state.usage.get(principal_id).copied().unwrap_or_default())
    }
}
