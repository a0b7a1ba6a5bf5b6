use std::time::Duration;

use thiserror::Error;

pub const RPC_TIMEOUT_MS_VAR: &str = "WALLET_KIT_RPC_TIMEOUT_MS";
pub const POLLING_INTERVAL_MS_VAR: &str = "WALLET_KIT_POLLING_INTERVAL_MS";
pub const EIP1193_PROXY_URL_VAR: &str = "WALLET_KIT_EIP1193_PROXY_URL";
pub const RUNTIME_PROFILE_VAR: &str = "WALLET_KIT_RUNTIME_PROFILE";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RuntimeProfile {
    #[default]
    Development,
    /// No mock wallets; every connector must talk to a real runtime.
    Production,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid value for {var}: {value:?}")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterConfig {
    pub rpc_timeout_ms: u64,
    pub polling_interval_ms: u64,
    pub eip1193_proxy_url: Option<String>,
    pub runtime_profile: RuntimeProfile,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            rpc_timeout_ms: 10_000,
            polling_interval_ms: 4_000,
            eip1193_proxy_url: None,
            runtime_profile: RuntimeProfile::Development,
        }
    }
}

impl AdapterConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());
        let mut cfg = Self::default();

        if let Some(raw) = read(RPC_TIMEOUT_MS_VAR) {
            cfg.rpc_timeout_ms = parse_ms(RPC_TIMEOUT_MS_VAR, &raw)?;
        }
        if let Some(raw) = read(POLLING_INTERVAL_MS_VAR) {
            cfg.polling_interval_ms = parse_ms(POLLING_INTERVAL_MS_VAR, &raw)?;
        }
        cfg.eip1193_proxy_url = read(EIP1193_PROXY_URL_VAR);
        if let Some(raw) = read(RUNTIME_PROFILE_VAR) {
            cfg.runtime_profile = match raw.trim().to_ascii_lowercase().as_str() {
                "development" | "dev" => RuntimeProfile::Development,
                "production" | "prod" => RuntimeProfile::Production,
                _ => {
                    return Err(ConfigError {
                        var: RUNTIME_PROFILE_VAR,
                        value: raw,
                    })
                }
            };
        }
        Ok(cfg)
    }

    pub fn strict_runtime_required(&self) -> bool {
        self.runtime_profile == RuntimeProfile::Production
    }

    pub fn rpc_timeout(&self) -> Duration {
        Duration::from_millis(self.rpc_timeout_ms)
    }

    pub fn polling_interval(&self) -> Duration {
        Duration::from_millis(self.polling_interval_ms)
    }
}

fn parse_ms(var: &'static str, raw: &str) -> Result<u64, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(ms) if ms > 0 => Ok(ms),
        _ => Err(ConfigError {
            var,
            value: raw.to_owned(),
        }),
    }
}
