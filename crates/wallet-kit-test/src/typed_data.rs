//! EIP-712 samples used to check structured-data signing.
//!
//! `basic` is the canonical "Ether Mail" example. `complex` adds nested
//! structs, a fixed-size array, large integers and a byte string.

use std::collections::BTreeMap;

use alloy::dyn_abi::TypedData;
use alloy::primitives::{Address, B256, U256};
use alloy::sol_types::Eip712Domain;
use serde_json::{json, Map, Value};

use crate::FixtureError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypedField {
    pub name: &'static str,
    pub ty: &'static str,
}

const fn field(name: &'static str, ty: &'static str) -> TypedField {
    TypedField { name, ty }
}

#[derive(Debug, Clone)]
pub struct TypedDataFixture {
    pub domain: Eip712Domain,
    pub types: BTreeMap<&'static str, Vec<TypedField>>,
    pub primary_type: &'static str,
    pub message: Value,
}

pub fn basic() -> TypedDataFixture {
    TypedDataFixture {
        domain: Eip712Domain::new(
            Some("Ether Mail".into()),
            Some("1".into()),
            Some(U256::from(1u64)),
            Some(Address::ZERO),
            None,
        ),
        types: BTreeMap::from([
            (
                "Person",
                vec![field("name", "string"), field("wallet", "address")],
            ),
            (
                "Mail",
                vec![
                    field("from", "Person"),
                    field("to", "Person"),
                    field("contents", "string"),
                ],
            ),
        ]),
        primary_type: "Mail",
        message: json!({
            "from": {
                "name": "Cow",
                "wallet": "0xCD2a3d9F938E13CD947Ec05AbC7FE734Df8DD826",
            },
            "to": {
                "name": "Bob",
                "wallet": "0xbBbBBBBbbBBBbbbBbbBbbbbBBbBbbbbBbBbbBBbB",
            },
            "contents": "Hello, Bob!",
        }),
    }
}

pub fn complex() -> TypedDataFixture {
    TypedDataFixture {
        domain: Eip712Domain::new(
            Some("Ether Mail 🥵".into()),
            Some("1.1.1".into()),
            Some(U256::from(1u64)),
            Some(Address::ZERO),
            None,
        ),
        types: BTreeMap::from([
            ("Name", vec![field("first", "string"), field("last", "string")]),
            (
                "Person",
                vec![
                    field("name", "Name"),
                    field("wallet", "address"),
                    field("favoriteColors", "string[3]"),
                    field("foo", "uint256"),
                    field("age", "uint8"),
                    field("isCool", "bool"),
                ],
            ),
            (
                "Mail",
                vec![
                    field("timestamp", "uint256"),
                    field("from", "Person"),
                    field("to", "Person"),
                    field("contents", "string"),
                    field("hash", "bytes"),
                ],
            ),
        ]),
        primary_type: "Mail",
        // uint256 values are decimal strings so they survive JSON number limits.
        message: json!({
            "timestamp": "1234567890",
            "contents": "Hello, Bob! 🖤",
            "hash": "0x1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef",
            "from": {
                "name": { "first": "Cow", "last": "Burns" },
                "wallet": "0xCD2a3d9F938E13CD947Ec05AbC7FE734Df8DD826",
                "age": 69,
                "foo": "123123123123123123",
                "favoriteColors": ["red", "green", "blue"],
                "isCool": false,
            },
            "to": {
                "name": { "first": "Bob", "last": "Builder" },
                "wallet": "0xbBbBBBBbbBBBbbbBbbBbbbbBBbBbbbbBbBbbBBbB",
                "age": 70,
                "foo": "123123123123123123",
                "favoriteColors": ["orange", "yellow", "green"],
                "isCool": true,
            },
        }),
    }
}

impl TypedDataFixture {
    /// Struct references that resolve neither to an elementary Solidity type
    /// nor to an entry of `types`. The primary type counts as a reference.
    pub fn undefined_type_references(&self) -> Vec<String> {
        let mut missing = Vec::new();
        if !self.types.contains_key(self.primary_type) {
            missing.push(self.primary_type.to_owned());
        }
        for fields in self.types.values() {
            for f in fields {
                let base = strip_array_suffixes(f.ty);
                if is_elementary(base) || self.types.contains_key(base) {
                    continue;
                }
                if !missing.iter().any(|m| m == base) {
                    missing.push(base.to_owned());
                }
            }
        }
        missing
    }

    /// Standard `{types, primaryType, domain, message}` JSON, with an
    /// `EIP712Domain` entry for the domain fields that are set.
    pub fn to_json(&self) -> Value {
        let mut types = Map::new();
        types.insert("EIP712Domain".to_owned(), domain_type(&self.domain));
        for (name, fields) in &self.types {
            let entries = fields
                .iter()
                .map(|f| json!({ "name": f.name, "type": f.ty }))
                .collect();
            types.insert((*name).to_owned(), Value::Array(entries));
        }
        json!({
            "types": types,
            "primaryType": self.primary_type,
            "domain": domain_value(&self.domain),
            "message": self.message,
        })
    }

    pub fn to_typed_data(&self) -> Result<TypedData, FixtureError> {
        serde_json::from_value(self.to_json()).map_err(|e| FixtureError::TypedData(e.to_string()))
    }

    pub fn signing_hash(&self) -> Result<B256, FixtureError> {
        self.to_typed_data()?
            .eip712_signing_hash()
            .map_err(|e| FixtureError::TypedData(e.to_string()))
    }
}

fn domain_type(domain: &Eip712Domain) -> Value {
    let mut fields = Vec::new();
    if domain.name.is_some() {
        fields.push(json!({ "name": "name", "type": "string" }));
    }
    if domain.version.is_some() {
        fields.push(json!({ "name": "version", "type": "string" }));
    }
    if domain.chain_id.is_some() {
        fields.push(json!({ "name": "chainId", "type": "uint256" }));
    }
    if domain.verifying_contract.is_some() {
        fields.push(json!({ "name": "verifyingContract", "type": "address" }));
    }
    if domain.salt.is_some() {
        fields.push(json!({ "name": "salt", "type": "bytes32" }));
    }
    Value::Array(fields)
}

fn domain_value(domain: &Eip712Domain) -> Value {
    let mut out = Map::new();
    if let Some(name) = &domain.name {
        out.insert("name".to_owned(), json!(name));
    }
    if let Some(version) = &domain.version {
        out.insert("version".to_owned(), json!(version));
    }
    if let Some(chain_id) = domain.chain_id {
        let value = match u64::try_from(chain_id) {
            Ok(id) => json!(id),
            Err(_) => json!(chain_id.to_string()),
        };
        out.insert("chainId".to_owned(), value);
    }
    if let Some(contract) = domain.verifying_contract {
        out.insert("verifyingContract".to_owned(), json!(contract.to_string()));
    }
    if let Some(salt) = domain.salt {
        out.insert("salt".to_owned(), json!(salt.to_string()));
    }
    Value::Object(out)
}

fn strip_array_suffixes(ty: &str) -> &str {
    let mut base = ty;
    while base.ends_with(']') {
        match base.rfind('[') {
            Some(idx) => base = &base[..idx],
            None => break,
        }
    }
    base
}

fn is_elementary(ty: &str) -> bool {
    if matches!(ty, "address" | "bool" | "string" | "bytes" | "uint" | "int") {
        return true;
    }
    if let Some(size) = ty.strip_prefix("bytes") {
        return matches!(size.parse::<u8>(), Ok(1..=32));
    }
    let bits = ty.strip_prefix("uint").or_else(|| ty.strip_prefix("int"));
    match bits.map(str::parse::<u16>) {
        Some(Ok(bits)) => bits % 8 == 0 && (8..=256).contains(&bits),
        _ => false,
    }
}
