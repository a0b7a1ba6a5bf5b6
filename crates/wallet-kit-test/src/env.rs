//! Fork and pool settings read once from the environment.

use std::sync::LazyLock;

use crate::FixtureError;

/// Id of the current test worker; the anvil proxy routes on it.
pub const POOL_ID_VAR: &str = "WALLET_KIT_POOL_ID";
pub const FORK_URL_VAR: &str = "ANVIL_FORK_URL";
pub const FORK_BLOCK_NUMBER_VAR: &str = "ANVIL_BLOCK_NUMBER";
pub const WC_PROJECT_ID_VAR: &str = "WC_PROJECT_ID";

pub const DEFAULT_POOL_ID: u64 = 1;
pub const DEFAULT_FORK_URL: &str = "https://cloudflare-eth.com";
pub const DEFAULT_FORK_BLOCK_NUMBER: u64 = 16_280_770;
pub const DEFAULT_WC_PROJECT_ID: &str = "foobarbaz";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestEnv {
    pub pool: u64,
    pub fork_url: String,
    pub fork_block_number: u64,
    pub wallet_connect_project_id: String,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self {
            pool: DEFAULT_POOL_ID,
            fork_url: DEFAULT_FORK_URL.to_owned(),
            fork_block_number: DEFAULT_FORK_BLOCK_NUMBER,
            wallet_connect_project_id: DEFAULT_WC_PROJECT_ID.to_owned(),
        }
    }
}

impl TestEnv {
    pub fn from_env() -> Result<Self, FixtureError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Resolves every setting through `lookup`. Unset and empty values both
    /// select the default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, FixtureError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let pool = match read(POOL_ID_VAR) {
            Some(raw) => parse_u64(POOL_ID_VAR, &raw)?,
            None => defaults.pool,
        };
        let fork_block_number = match read(FORK_BLOCK_NUMBER_VAR) {
            Some(raw) => parse_u64(FORK_BLOCK_NUMBER_VAR, &raw)?,
            None => defaults.fork_block_number,
        };

        Ok(Self {
            pool,
            fork_url: read(FORK_URL_VAR).unwrap_or(defaults.fork_url),
            fork_block_number,
            wallet_connect_project_id: read(WC_PROJECT_ID_VAR)
                .unwrap_or(defaults.wallet_connect_project_id),
        })
    }

    /// RPC url of this worker's anvil instance behind the proxy on `port`.
    pub fn anvil_rpc_url(&self, port: u16) -> String {
        format!("http://127.0.0.1:{port}/{}", self.pool)
    }
}

fn parse_u64(var: &'static str, raw: &str) -> Result<u64, FixtureError> {
    let trimmed = raw.trim();
    let parsed = match trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => trimmed.parse::<u64>(),
    };
    parsed.map_err(|e| FixtureError::InvalidEnv {
        var,
        value: raw.to_owned(),
        reason: e.to_string(),
    })
}

static TEST_ENV: LazyLock<TestEnv> = LazyLock::new(|| {
    TestEnv::from_env().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "invalid test environment, using defaults");
        TestEnv::default()
    })
});

/// Process-wide settings, resolved on first use.
pub fn test_env() -> &'static TestEnv {
    &TEST_ENV
}
