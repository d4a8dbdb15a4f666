use domain_compute::{
    exception::{ComputeException, ComputeResult},
    model::vo::Principal,
    service::{IdentityProvider, QuotaService},
};

use crate::config::IdentityConfig;

/// Identity provider answering with a principal fixed at startup.
#[derive(Clone, Debug, Default)]
pub struct StaticIdentityProvider {
    principal: Option<Principal>,
}

impl StaticIdentityProvider {
    pub fn new(principal: Option<Principal>) -> Self {
        Self { principal }
    }

    /// Resolve the configured role name with the quota table's unknown role policy.
    pub fn from_config(config: &IdentityConfig, quota_service: &dyn QuotaService) -> ComputeResult<Self> {
        let principal = match &config.principal_id {
            Some(id) => {
                let role = quota_service.role_of(&config.role)?;
                tracing::info!(principal = %id, role = role.display_name(), "principal signed in");
                Some(Principal::new(id, role))
            }
            None => {
                tracing::info!("no principal signed in");
                None
            }
        };
        Ok(Self::new(principal))
    }
}

impl IdentityProvider for StaticIdentityProvider {
    fn current_principal(&self) -> ComputeResult<Principal> {
        self.principal.clone().ok_or(ComputeException::Unauthenticated)
    }
}
