use serde::{Deserialize, Serialize};

use crate::{
    exception::ComputeResult,
    model::vo::{Quota, Role},
};

/// What to do with a role name that matches no known role.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum UnknownRolePolicy {
    /// Fail with `UnknownRole`.
    #[default]
    Reject,
    /// Treat the principal as holding `role`.
    Fallback { role: Role },
}

/// Quota table service.
pub trait QuotaService: Send + Sync {
    /// Resource ceiling of a role.
    fn resolve(&self, role: &Role) -> ComputeResult<Quota>;
    /// Map a role name from the identity provider to a role, applying the unknown role policy.
    fn role_of(&self, role_name: &str) -> ComputeResult<Role>;
}
