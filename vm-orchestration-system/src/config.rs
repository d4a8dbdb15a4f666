use config::{Config, Environment, File};
use domain_compute::{
    model::vo::{OsCatalog, Quota, Role},
    service::UnknownRolePolicy,
};
use serde::Deserialize;
use std::collections::HashMap;

use crate::telemetry::TelemetryConfig;

/// Prefix of environment variables overriding the configuration file,
/// e.g. `VMQ__IDENTITY__ROLE=admin`.
pub const ENV_PREFIX: &str = "VMQ";

#[derive(Default, Deserialize, Clone, Debug)]
pub struct AppConfig {
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    #[serde(default)]
    pub quota: QuotaConfig,
    #[serde(default)]
    pub os_catalog: OsCatalog,
    #[serde(default)]
    pub identity: IdentityConfig,
    #[serde(default)]
    pub ledger: LedgerConfig,
}

impl AppConfig {
    /// Read `path` (any format the `config` crate knows, the file may be missing)
    /// and apply environment overrides.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let config = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?;
        Self::try_from_config(config)
    }

    pub fn try_from_config(config: Config) -> anyhow::Result<Self> {
        Ok(config.try_deserialize()?)
    }
}

#[derive(Default, Deserialize, Clone, Debug)]
pub struct QuotaConfig {
    #[serde(default)]
    pub unknown_role_policy: UnknownRolePolicy,
    /// Roles listed here replace their built-in quota.
    #[serde(default)]
    pub overrides: HashMap<Role, QuotaOverride>,
}

#[derive(Deserialize, Clone, Copy, Debug)]
pub struct QuotaOverride {
    pub ram_limit_mib: u64,
    pub storage_limit_gib: u64,
}

impl From<QuotaOverride> for Quota {
    fn from(value: QuotaOverride) -> Self {
        Quota::new(value.ram_limit_mib, value.storage_limit_gib)
    }
}

impl QuotaConfig {
    pub fn quotas(&self) -> HashMap<Role, Quota> {
        self.overrides.iter().map(|(role, quota)| (*role, (*quota).into())).collect()
    }
}

/// Principal handed over by the identity provider in front of this process.
#[derive(Deserialize, Clone, Debug)]
pub struct IdentityConfig {
    /// No principal means nobody is signed in.
    #[serde(default)]
    pub principal_id: Option<String>,
    #[serde(default = "IdentityConfig::default_role")]
    pub role: String,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            principal_id: None,
            role: Self::default_role(),
        }
    }
}

impl IdentityConfig {
    fn default_role() -> String {
        Role::Invited.name().to_string()
    }
}

#[derive(Default, Deserialize, Clone, Debug)]
pub struct LedgerConfig {
    /// Recompute usage from every record on each admission check.
    #[serde(default)]
    pub recompute_usage: bool,
}
