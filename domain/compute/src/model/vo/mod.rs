mod decision;
mod device;
mod os_catalog;
mod principal;
mod quota;
mod role;
mod usage;

#[rustfmt::skip]
pub use {
    decision::{Decision, RejectReason, Resource},
    device::{NetworkInterface, StorageVolume},
    os_catalog::OsCatalog,
    principal::Principal,
    quota::Quota,
    role::Role,
    usage::{Usage, UsageSnapshot},
};
