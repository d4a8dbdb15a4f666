pub mod vm;

#[rustfmt::skip]
pub use vm::{Vm, VmStatus};
