//! Typed contract argument values.
//!
//! A closed sum type over every value kind the client can pass to or read
//! back from a contract. Encoding to the ledger representation lives in
//! `soro-contract`.

use crate::address::Address;
use crate::amount::Amount;

/// A contract argument or return value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContractValue {
    Void,
    Bool(bool),
    U32(u32),
    I32(i32),
    U64(u64),
    I64(i64),
    U128(u128),
    I128(i128),
    Symbol(String),
    String(String),
    Bytes(Vec<u8>),
    Address(Address),
    Vec(Vec<ContractValue>),
    /// Key/value pairs in ledger order.
    Map(Vec<(ContractValue, ContractValue)>),
}

impl ContractValue {
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Symbol(name.into())
    }

    /// An amount as a signed 128-bit integer.
    pub fn amount(amount: Amount) -> Self {
        Self::I128(amount.stroops())
    }

    /// A struct-like record: a map keyed by field-name symbols.
    ///
    /// The ledger requires map keys in ascending order, so fields are sorted
    /// by name regardless of the order given.
    pub fn record<'a>(fields: impl IntoIterator<Item = (&'a str, ContractValue)>) -> Self {
        let mut entries: Vec<(&str, ContractValue)> = fields.into_iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        Self::Map(
            entries
                .into_iter()
                .map(|(name, value)| (Self::symbol(name), value))
                .collect(),
        )
    }

    /// Short name of the variant, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Void => "void",
            Self::Bool(_) => "bool",
            Self::U32(_) => "u32",
            Self::I32(_) => "i32",
            Self::U64(_) => "u64",
            Self::I64(_) => "i64",
            Self::U128(_) => "u128",
            Self::I128(_) => "i128",
            Self::Symbol(_) => "symbol",
            Self::String(_) => "string",
            Self::Bytes(_) => "bytes",
            Self::Address(_) => "address",
            Self::Vec(_) => "vec",
            Self::Map(_) => "map",
        }
    }

    /// Look up a field of a record built with [`ContractValue::record`].
    pub fn field(&self, name: &str) -> Option<&ContractValue> {
        match self {
            Self::Map(entries) => entries.iter().find_map(|(k, v)| match k {
                Self::Symbol(s) if s == name => Some(v),
                _ => None,
            }),
            _ => None,
        }
    }
}

impl From<Address> for ContractValue {
    fn from(address: Address) -> Self {
        Self::Address(address)
    }
}

impl From<u32> for ContractValue {
    fn from(v: u32) -> Self {
        Self::U32(v)
    }
}

impl From<bool> for ContractValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}
