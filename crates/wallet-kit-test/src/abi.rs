use std::sync::LazyLock;

use alloy::json_abi::JsonAbi;

use crate::FixtureError;

pub const ERC20_SIGNATURES: &[&str] = &[
    "event Approval(address indexed owner, address indexed spender, uint256 value)",
    "event Transfer(address indexed from, address indexed to, uint256 value)",
    "function allowance(address owner, address spender) view returns (uint256)",
    "function approve(address spender, uint256 amount) returns (bool)",
    "function balanceOf(address account) view returns (uint256)",
    "function decimals() view returns (uint8)",
    "function name() view returns (string)",
    "function symbol() view returns (string)",
    "function totalSupply() view returns (uint256)",
    "function transfer(address recipient, uint256 amount) returns (bool)",
    "function transferFrom(address sender, address recipient, uint256 amount) returns (bool)",
];

pub const WAGMI_MINT_EXAMPLE_SIGNATURES: &[&str] = &[
    "constructor()",
    "event Approval(address indexed owner, address indexed approved, uint256 indexed tokenId)",
    "event ApprovalForAll(address indexed owner, address indexed operator, bool approved)",
    "event Transfer(address indexed from, address indexed to, uint256 indexed tokenId)",
    "function approve(address to, uint256 tokenId)",
    "function balanceOf(address owner) view returns (uint256)",
    "function getApproved(uint256 tokenId) view returns (address)",
    "function isApprovedForAll(address owner, address operator) view returns (bool)",
    "function mint()",
    "function name() view returns (string)",
    "function ownerOf(uint256 tokenId) view returns (address)",
    "function safeTransferFrom(address from, address to, uint256 tokenId)",
    "function safeTransferFrom(address from, address to, uint256 tokenId, bytes _data)",
    "function setApprovalForAll(address operator, bool approved)",
    "function supportsInterface(bytes4 interfaceId) view returns (bool)",
    "function symbol() view returns (string)",
    "function tokenURI(uint256 tokenId) pure returns (string)",
    "function totalSupply() view returns (uint256)",
    "function transferFrom(address from, address to, uint256 tokenId)",
];

/// Parses human-readable Solidity signatures into a structured ABI.
pub fn parse_signatures(signatures: &[&str]) -> Result<JsonAbi, FixtureError> {
    JsonAbi::parse(signatures.iter().copied()).map_err(|e| FixtureError::Abi(e.to_string()))
}

static ERC20_ABI: LazyLock<Result<JsonAbi, FixtureError>> =
    LazyLock::new(|| parse_signatures(ERC20_SIGNATURES));

static WAGMI_MINT_EXAMPLE_ABI: LazyLock<Result<JsonAbi, FixtureError>> =
    LazyLock::new(|| parse_signatures(WAGMI_MINT_EXAMPLE_SIGNATURES));

pub fn erc20_abi() -> Result<&'static JsonAbi, FixtureError> {
    ERC20_ABI.as_ref().map_err(Clone::clone)
}

pub fn wagmi_mint_example_abi() -> Result<&'static JsonAbi, FixtureError> {
    WAGMI_MINT_EXAMPLE_ABI.as_ref().map_err(Clone::clone)
}
