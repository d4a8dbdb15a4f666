//! In-memory vm ledger

mod journal;
mod memory;

pub use journal::{LedgerChange, LedgerEvent};
pub use memory::{MemoryVmLedger, FIRST_VM_ID};
