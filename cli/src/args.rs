//! Parsing of typed contract arguments given on the command line.
//!
//! Each argument is `kind:value`, e.g. `u32:7`, `i128:-5`, `sym:deposit`,
//! `str:hello`, `addr:G...`, `bytes:00ff`, `bool:true` or `void`. An amount
//! in display units can be given as `amount:12.5`, which becomes an `i128`
//! in stroops.

use anyhow::{anyhow, bail, Context, Result};
use soro_types::{Address, Amount, ContractValue};

pub fn parse_contract_arg(input: &str) -> Result<ContractValue> {
    if input == "void" {
        return Ok(ContractValue::Void);
    }
    let (kind, value) = input
        .split_once(':')
        .ok_or_else(|| anyhow!("argument {input:?} is not of the form kind:value"))?;

    let parsed = match kind {
        "bool" => ContractValue::Bool(value.parse().context("bool")?),
        "u32" => ContractValue::U32(value.parse().context("u32")?),
        "i32" => ContractValue::I32(value.parse().context("i32")?),
        "u64" => ContractValue::U64(value.parse().context("u64")?),
        "i64" => ContractValue::I64(value.parse().context("i64")?),
        "u128" => ContractValue::U128(value.parse().context("u128")?),
        "i128" => ContractValue::I128(value.parse().context("i128")?),
        "amount" => ContractValue::I128(Amount::from_decimal_str(value)?.stroops()),
        "sym" => ContractValue::Symbol(value.to_string()),
        "str" => ContractValue::String(value.to_string()),
        "bytes" => ContractValue::Bytes(hex::decode(value).context("bytes")?),
        "addr" => ContractValue::Address(value.parse::<Address>()?),
        other => bail!("unknown argument kind {other:?}"),
    };
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_kinds() {
        assert_eq!(parse_contract_arg("u32:7").unwrap(), ContractValue::U32(7));
        assert_eq!(parse_contract_arg("i128:-5").unwrap(), ContractValue::I128(-5));
        assert_eq!(parse_contract_arg("bool:true").unwrap(), ContractValue::Bool(true));
        assert_eq!(parse_contract_arg("void").unwrap(), ContractValue::Void);
        assert_eq!(
            parse_contract_arg("sym:deposit").unwrap(),
            ContractValue::Symbol("deposit".into())
        );
        assert_eq!(
            parse_contract_arg("bytes:00ff").unwrap(),
            ContractValue::Bytes(vec![0, 255])
        );
    }

    #[test]
    fn amount_is_scaled_to_stroops() {
        assert_eq!(
            parse_contract_arg("amount:10").unwrap(),
            ContractValue::I128(100_000_000)
        );
    }

    #[test]
    fn value_may_contain_colons() {
        assert_eq!(
            parse_contract_arg("str:a:b").unwrap(),
            ContractValue::String("a:b".into())
        );
    }

    #[test]
    fn addresses() {
        let account = "GCHLHDBOKG2JWMJQBTLSL5XG6NO7ESXI2TAQKZXCXWXB5WI2X6W233PR";
        assert!(matches!(
            parse_contract_arg(&format!("addr:{account}")).unwrap(),
            ContractValue::Address(Address::Account(_))
        ));
        assert!(parse_contract_arg("addr:nope").is_err());
    }

    #[test]
    fn malformed() {
        assert!(parse_contract_arg("u32").is_err());
        assert!(parse_contract_arg("u32:-1").is_err());
        assert!(parse_contract_arg("float:1.5").is_err());
    }
}
