mod admission;
mod identity;
mod manage;
mod quota;
mod usage;

#[rustfmt::skip]
pub use {
    admission::AdmissionService,
    identity::IdentityProvider,
    manage::VmManageService,
    quota::{QuotaService, UnknownRolePolicy},
    usage::UsageService,
};
