use domain_compute::{
    exception::{ComputeException, ComputeResult},
    model::vo::{Quota, Role},
    service::{QuotaService, UnknownRolePolicy},
};
use std::collections::HashMap;
use typed_builder::TypedBuilder;

/// Quota table with the built-in quota of every role, optionally overridden per role.
#[derive(TypedBuilder, Clone, Debug, Default)]
pub struct QuotaTableServiceImpl {
    #[builder(default)]
    overrides: HashMap<Role, Quota>,
    #[builder(default)]
    unknown_role_policy: UnknownRolePolicy,
}

impl QuotaService for QuotaTableServiceImpl {
    fn resolve(&self, role: &Role) -> ComputeResult<Quota> {
        Ok(self.overrides.get(role).copied().unwrap_or_else(|| role.builtin_quota()))
    }

    fn role_of(&self, role_name: &str) -> ComputeResult<Role> {
        if let Some(role) = Role::from_name(role_name) {
            return Ok(role);
        }
        match self.unknown_role_policy {
            UnknownRolePolicy::Reject => Err(ComputeException::UnknownRole {
                role: role_name.to_owned(),
            }),
            UnknownRolePolicy::Fallback { role } => {
                tracing::warn!(role_name, fallback = %role, "unknown role, using fallback quota");
                Ok(role)
            }
        }
    }
}
