mod admission;
mod manage;
mod quota;
mod usage;

#[rustfmt::skip]
pub use {
    admission::{decide, AdmissionControllerImpl},
    manage::VmManageServiceImpl,
    quota::QuotaTableServiceImpl,
    usage::UsageServiceImpl,
};
