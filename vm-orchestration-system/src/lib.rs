//! Composition root of the vm quota engine: configuration, logging and the wired service graph.

mod config;
mod identity;
mod telemetry;

use std::sync::Arc;

use domain_compute::{
    exception::ComputeResult,
    model::vo::{Principal, UsageSnapshot},
    service::{IdentityProvider, QuotaService, VmManageService},
};
use infrastructure_ledger::MemoryVmLedger;
use service_compute::{
    AdmissionControllerImpl, QuotaTableServiceImpl, UsageServiceImpl, VmManageServiceImpl,
};

#[rustfmt::skip]
pub use {
    self::config::{AppConfig, IdentityConfig, LedgerConfig, QuotaConfig, QuotaOverride, ENV_PREFIX},
    self::identity::StaticIdentityProvider,
    self::telemetry::{init_telemetry, LoggingLevel, TelemetryConfig},
};

/// Services of one process, all sharing a single ledger.
pub struct Orchestrator {
    ledger: Arc<MemoryVmLedger>,
    quota_service: Arc<dyn QuotaService>,
    manage_service: Arc<dyn VmManageService>,
    identity_provider: Arc<dyn IdentityProvider>,
}

impl Orchestrator {
    /// Load the configuration at `path`, install logging and wire the services.
    pub fn bootstrap(path: &str) -> anyhow::Result<Self> {
        let config = AppConfig::load(path)?;
        init_telemetry(&config.telemetry)?;
        let orchestrator = Self::new(&config, Arc::new(MemoryVmLedger::new()))?;
        tracing::info!(
            os_images = config.os_catalog.identifiers().len(),
            policy = ?config.quota.unknown_role_policy,
            "vm orchestration system started"
        );
        Ok(orchestrator)
    }

    /// Wire the services on top of `ledger`, which may be a replayed one.
    pub fn new(config: &AppConfig, ledger: Arc<MemoryVmLedger>) -> anyhow::Result<Self> {
        let quota_service = Arc::new(
            QuotaTableServiceImpl::builder()
                .overrides(config.quota.quotas())
                .unknown_role_policy(config.quota.unknown_role_policy)
                .build(),
        );
        let identity_provider = Arc::new(StaticIdentityProvider::from_config(
            &config.identity,
            quota_service.as_ref(),
        )?);
        let usage_service = Arc::new(
            UsageServiceImpl::builder()
                .ledger(ledger.clone())
                .recompute(config.ledger.recompute_usage)
                .build(),
        );
        let admission_service = Arc::new(
            AdmissionControllerImpl::builder()
                .quota_service(quota_service.clone())
                .usage_service(usage_service.clone())
                .build(),
        );
        let manage_service = Arc::new(
            VmManageServiceImpl::builder()
                .ledger(ledger.clone())
                .quota_service(quota_service.clone())
                .usage_service(usage_service)
                .admission_service(admission_service)
                .os_catalog(config.os_catalog.to_owned())
                .build(),
        );

        Ok(Self {
            ledger,
            quota_service,
            manage_service,
            identity_provider,
        })
    }

    pub fn ledger(&self) -> Arc<MemoryVmLedger> {
        self.ledger.clone()
    }

    pub fn quota_service(&self) -> Arc<dyn QuotaService> {
        self.quota_service.clone()
    }

    pub fn manage_service(&self) -> Arc<dyn VmManageService> {
        self.manage_service.clone()
    }

    pub fn current_principal(&self) -> ComputeResult<Principal> {
        self.identity_provider.current_principal()
    }

    /// Usage of whoever is signed in.
    pub async fn current_usage(&self) -> ComputeResult<UsageSnapshot> {
        let principal = self.current_principal()?;
        self.manage_service.get_usage_snapshot(&principal).await
    }
}
