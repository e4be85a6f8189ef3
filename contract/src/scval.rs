//! Conversion between [`ContractValue`] and the ledger's `ScVal`.
//!
//! Both directions match exhaustively on the client-side enum. Decoding
//! rejects ledger kinds (timepoints, 256-bit integers, errors, ...) that have
//! no [`ContractValue`] variant.

use soro_types::{Address, Amount, ContractId, ContractValue, PublicKey};
use stellar_xdr::curr::{
    self as xdr, AccountId, BytesM, Hash, Int128Parts, ScAddress, ScBytes, ScMap, ScMapEntry,
    ScString, ScSymbol, ScVal, ScVec, StringM, UInt128Parts, Uint256, VecM,
};

use crate::error::ContractError;

/// Longest symbol the ledger accepts.
pub const MAX_SYMBOL_LEN: usize = 32;

/// Encode a symbol, enforcing the ledger's length and character rules.
pub fn encode_symbol(name: &str) -> Result<ScSymbol, ContractError> {
    if name.len() > MAX_SYMBOL_LEN {
        return Err(ContractError::Encoding(format!(
            "symbol {name:?} is longer than {MAX_SYMBOL_LEN} characters"
        )));
    }
    if let Some(c) = name.chars().find(|c| !(c.is_ascii_alphanumeric() || *c == '_')) {
        return Err(ContractError::Encoding(format!(
            "symbol {name:?} contains invalid character {c:?}"
        )));
    }
    Ok(ScSymbol(bounded_string(name, "symbol")?))
}

pub(crate) fn bounded_string<const MAX: u32>(
    s: &str,
    what: &str,
) -> Result<StringM<MAX>, ContractError> {
    StringM::<MAX>::try_from(s).map_err(|e| ContractError::Encoding(format!("{what}: {e}")))
}

pub(crate) fn bounded_vec<T, const MAX: u32>(
    items: Vec<T>,
    what: &str,
) -> Result<VecM<T, MAX>, ContractError> {
    VecM::<T, MAX>::try_from(items).map_err(|e| ContractError::Encoding(format!("{what}: {e}")))
}

fn bounded_bytes<const MAX: u32>(bytes: &[u8], what: &str) -> Result<BytesM<MAX>, ContractError> {
    BytesM::<MAX>::try_from(bytes.to_vec())
        .map_err(|e| ContractError::Encoding(format!("{what}: {e}")))
}

/// The ledger account id for a public key.
pub fn xdr_account_id(pk: &PublicKey) -> AccountId {
    AccountId(xdr::PublicKey::PublicKeyTypeEd25519(Uint256(pk.0)))
}

pub fn encode_address(address: &Address) -> ScAddress {
    match address {
        Address::Account(pk) => ScAddress::Account(xdr_account_id(pk)),
        Address::Contract(id) => ScAddress::Contract(Hash(id.0)),
    }
}

pub fn decode_address(address: &ScAddress) -> Address {
    match address {
        ScAddress::Account(AccountId(xdr::PublicKey::PublicKeyTypeEd25519(Uint256(bytes)))) => {
            Address::Account(PublicKey(*bytes))
        }
        ScAddress::Contract(Hash(bytes)) => Address::Contract(ContractId(*bytes)),
    }
}

/// Encode a typed value into its ledger representation.
pub fn encode_value(value: &ContractValue) -> Result<ScVal, ContractError> {
    let encoded = match value {
        ContractValue::Void => ScVal::Void,
        ContractValue::Bool(b) => ScVal::Bool(*b),
        ContractValue::U32(v) => ScVal::U32(*v),
        ContractValue::I32(v) => ScVal::I32(*v),
        ContractValue::U64(v) => ScVal::U64(*v),
        ContractValue::I64(v) => ScVal::I64(*v),
        ContractValue::U128(v) => ScVal::U128(UInt128Parts {
            hi: (*v >> 64) as u64,
            lo: *v as u64,
        }),
        ContractValue::I128(v) => {
            let (hi, lo) = Amount::from_stroops(*v).hi_lo();
            ScVal::I128(Int128Parts { hi, lo })
        }
        ContractValue::Symbol(s) => ScVal::Symbol(encode_symbol(s)?),
        ContractValue::String(s) => ScVal::String(ScString(bounded_string(s, "string")?)),
        ContractValue::Bytes(bytes) => ScVal::Bytes(ScBytes(bounded_bytes(bytes, "bytes")?)),
        ContractValue::Address(address) => ScVal::Address(encode_address(address)),
        ContractValue::Vec(items) => {
            let items = items
                .iter()
                .map(encode_value)
                .collect::<Result<Vec<_>, _>>()?;
            ScVal::Vec(Some(ScVec(bounded_vec(items, "vec")?)))
        }
        ContractValue::Map(entries) => {
            let entries = entries
                .iter()
                .map(|(key, val)| {
                    Ok(ScMapEntry {
                        key: encode_value(key)?,
                        val: encode_value(val)?,
                    })
                })
                .collect::<Result<Vec<_>, ContractError>>()?;
            ScVal::Map(Some(ScMap(bounded_vec(entries, "map")?)))
        }
    };
    Ok(encoded)
}

/// Decode a ledger value into a typed value.
pub fn decode_value(value: &ScVal) -> Result<ContractValue, ContractError> {
    let decoded = match value {
        ScVal::Void => ContractValue::Void,
        ScVal::Bool(b) => ContractValue::Bool(*b),
        ScVal::U32(v) => ContractValue::U32(*v),
        ScVal::I32(v) => ContractValue::I32(*v),
        ScVal::U64(v) => ContractValue::U64(*v),
        ScVal::I64(v) => ContractValue::I64(*v),
        ScVal::U128(parts) => {
            ContractValue::U128((u128::from(parts.hi) << 64) | u128::from(parts.lo))
        }
        ScVal::I128(parts) => ContractValue::I128(Amount::from_hi_lo(parts.hi, parts.lo).stroops()),
        ScVal::Symbol(sym) => ContractValue::Symbol(
            sym.0
                .to_utf8_string()
                .map_err(|e| ContractError::Encoding(format!("symbol: {e}")))?,
        ),
        ScVal::String(s) => ContractValue::String(
            s.0.to_utf8_string()
                .map_err(|e| ContractError::Encoding(format!("string: {e}")))?,
        ),
        ScVal::Bytes(bytes) => ContractValue::Bytes(bytes.0.to_vec()),
        ScVal::Address(address) => ContractValue::Address(decode_address(address)),
        ScVal::Vec(None) => ContractValue::Vec(Vec::new()),
        ScVal::Vec(Some(items)) => ContractValue::Vec(
            items
                .0
                .iter()
                .map(decode_value)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        ScVal::Map(None) => ContractValue::Map(Vec::new()),
        ScVal::Map(Some(entries)) => ContractValue::Map(
            entries
                .0
                .iter()
                .map(|entry| Ok((decode_value(&entry.key)?, decode_value(&entry.val)?)))
                .collect::<Result<Vec<_>, ContractError>>()?,
        ),
        other => return Err(ContractError::Unsupported(other.name().to_string())),
    };
    Ok(decoded)
}
