use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub environment: Environment,
    pub limits: LimitsConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

/// Bounds on recursive work. Malformed or hostile batches can nest
/// arbitrarily deep; every descent in the engine stops at one of these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Maximum descent into nested/legacy containers during normalization.
    pub max_nested_depth: u32,
    /// Maximum depth for tree assembly, descendant scans and breadcrumbs.
    pub max_walk_depth: u32,
    /// Optional cap on records accepted per batch.
    pub max_batch_records: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub log_anomalies: bool,
    pub debug_logging: bool,
}

impl EngineConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("MENU_MAX_NESTED_DEPTH") {
            self.limits.max_nested_depth = v.parse().unwrap_or(self.limits.max_nested_depth);
        }
        if let Ok(v) = env::var("MENU_MAX_WALK_DEPTH") {
            self.limits.max_walk_depth = v.parse().unwrap_or(self.limits.max_walk_depth);
        }
        if let Ok(v) = env::var("MENU_MAX_BATCH_RECORDS") {
            self.limits.max_batch_records = v.parse().ok();
        }
        if let Ok(v) = env::var("MENU_LOG_ANOMALIES") {
            self.logging.log_anomalies = v.parse().unwrap_or(self.logging.log_anomalies);
        }
        if let Ok(v) = env::var("MENU_DEBUG_LOGGING") {
            self.logging.debug_logging = v.parse().unwrap_or(self.logging.debug_logging);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            limits: LimitsConfig {
                max_nested_depth: 16,
                max_walk_depth: 64,
                max_batch_records: None,
            },
            logging: LoggingConfig { log_anomalies: true, debug_logging: true },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            limits: LimitsConfig {
                max_nested_depth: 12,
                max_walk_depth: 48,
                max_batch_records: Some(50_000),
            },
            logging: LoggingConfig { log_anomalies: true, debug_logging: false },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            limits: LimitsConfig {
                max_nested_depth: 8,
                max_walk_depth: 32,
                max_batch_records: Some(10_000),
            },
            logging: LoggingConfig { log_anomalies: true, debug_logging: false },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<EngineConfig> = Lazy::new(EngineConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static EngineConfig {
    &CONFIG
}
