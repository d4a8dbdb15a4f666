use anyhow::anyhow;
use serde::Deserialize;
use tracing::metadata::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Logging configuration.
#[derive(Deserialize, Clone, Debug)]
pub struct TelemetryConfig {
    /// Install a subscriber at all.
    #[serde(default = "default_enabled")]
    pub enable: bool,
    /// Global filter level.
    #[serde(default)]
    pub max_level: LoggingLevel,
    /// Extra filter directives, e.g. `service_compute=debug`.
    #[serde(default)]
    pub level_filter: String,
    /// Print file and line of each event.
    #[serde(default)]
    pub enable_debug_logging: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enable: default_enabled(),
            max_level: Default::default(),
            level_filter: Default::default(),
            enable_debug_logging: Default::default(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

#[derive(Default, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LoggingLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
    Off,
}

impl From<LoggingLevel> for LevelFilter {
    fn from(val: LoggingLevel) -> Self {
        match val {
            LoggingLevel::Error => LevelFilter::ERROR,
            LoggingLevel::Warn => LevelFilter::WARN,
            LoggingLevel::Info => LevelFilter::INFO,
            LoggingLevel::Debug => LevelFilter::DEBUG,
            LoggingLevel::Trace => LevelFilter::TRACE,
            LoggingLevel::Off => LevelFilter::OFF,
        }
    }
}

impl TelemetryConfig {
    pub fn env_filter(&self) -> anyhow::Result<EnvFilter> {
        let level: LevelFilter = self.max_level.into();
        let mut filter = EnvFilter::default().add_directive(level.into());
        for directive in self.level_filter.split(',').map(str::trim).filter(|el| !el.is_empty()) {
            filter = filter.add_directive(directive.parse()?);
        }
        Ok(filter)
    }
}

/// Install the global `fmt` subscriber described by `config`.
///
/// Fails if another subscriber is installed already.
pub fn init_telemetry(config: &TelemetryConfig) -> anyhow::Result<()> {
    if !config.enable {
        return Ok(());
    }
    tracing_subscriber::fmt()
        .with_env_filter(config.env_filter()?)
        .with_file(config.enable_debug_logging)
        .with_line_number(config.enable_debug_logging)
        .try_init()
        .map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))
}
