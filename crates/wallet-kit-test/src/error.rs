use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FixtureError {
    #[error("invalid value for {var}: {value:?} ({reason})")]
    InvalidEnv {
        var: &'static str,
        value: String,
        reason: String,
    },
    #[error("invalid address literal: {0}")]
    InvalidAddress(String),
    #[error("account index out of range: {0}")]
    AccountIndex(usize),
    #[error("invalid private key: {0}")]
    InvalidKey(String),
    #[error("abi parse failed: {0}")]
    Abi(String),
    #[error("typed data error: {0}")]
    TypedData(String),
}
