//! Fixtures shared by the wallet-kit test suites.
//!
//! Everything here is read-only data: the pre-funded accounts of a local anvil
//! node, environment-derived fork settings, EIP-712 samples and parsed ABIs.

pub mod abi;
pub mod accounts;
pub mod chains;
pub mod env;
pub mod error;
pub mod typed_data;

pub use abi::{erc20_abi, wagmi_mint_example_abi, ERC20_SIGNATURES, WAGMI_MINT_EXAMPLE_SIGNATURES};
pub use accounts::{
    account_signer, account_signers, validate_account_literals, ACCOUNTS, ACCOUNT_KEYS,
    ACCOUNT_LITERALS, WAGMI_MINT_EXAMPLE_ADDRESS,
};
pub use env::{test_env, TestEnv};
pub use error::FixtureError;
pub use typed_data::{TypedDataFixture, TypedField};
