//! `InvokeHostFunction` operation assembly.

use soro_types::{ContractId, ContractInvocationRequest};
use stellar_xdr::curr::{
    Hash, HostFunction, InvokeContractArgs, InvokeHostFunctionOp, Operation, OperationBody,
    ScAddress, VecM,
};

use crate::error::ContractError;
use crate::scval::{bounded_vec, decode_value, encode_symbol, encode_value};

/// Encode a contract call as an operation with no authorization entries.
///
/// Authorization entries are attached later from simulation results.
pub fn build_invocation(request: &ContractInvocationRequest) -> Result<Operation, ContractError> {
    let args = request
        .args
        .iter()
        .map(encode_value)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Operation {
        source_account: None,
        body: OperationBody::InvokeHostFunction(InvokeHostFunctionOp {
            host_function: HostFunction::InvokeContract(InvokeContractArgs {
                contract_address: ScAddress::Contract(Hash(request.contract.0)),
                function_name: encode_symbol(&request.function)?,
                args: bounded_vec(args, "arguments")?,
            }),
            auth: VecM::default(),
        }),
    })
}

/// Recover the typed request from an operation built by [`build_invocation`].
pub fn decode_invocation(operation: &Operation) -> Result<ContractInvocationRequest, ContractError> {
    let OperationBody::InvokeHostFunction(InvokeHostFunctionOp {
        host_function: HostFunction::InvokeContract(call),
        ..
    }) = &operation.body
    else {
        return Err(ContractError::NotAnInvocation);
    };

    let ScAddress::Contract(Hash(contract)) = &call.contract_address else {
        return Err(ContractError::Encoding(
            "invocation target is not a contract".into(),
        ));
    };
    let function = call
        .function_name
        .0
        .to_utf8_string()
        .map_err(|e| ContractError::Encoding(format!("function name: {e}")))?;
    let args = call
        .args
        .iter()
        .map(decode_value)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ContractInvocationRequest::new(ContractId(*contract), function, args))
}

#[cfg(test)]
mod tests {
    use super::*;
    use soro_types::{Address, ContractValue, PublicKey};

    fn contract() -> ContractId {
        ContractId::from_strkey("CAZSVHNUMHVC6O5I7M2IVK2EC34CSSLCPAVHZ3MN6YRTT2LOTXXJT3AX").unwrap()
    }

    #[test]
    fn invocation_roundtrip_preserves_order_and_types() {
        let caller = Address::Account(PublicKey([3u8; 32]));
        let request = ContractInvocationRequest::new(
            contract(),
            "transfer",
            vec![
                ContractValue::Address(caller),
                ContractValue::U32(9),
                ContractValue::I128(-1),
                ContractValue::symbol("memo"),
                ContractValue::Bool(false),
            ],
        );
        let op = build_invocation(&request).unwrap();
        assert_eq!(decode_invocation(&op).unwrap(), request);
    }

    #[test]
    fn no_auth_entries_before_simulation() {
        let request = ContractInvocationRequest::new(contract(), "hello", vec![]);
        let op = build_invocation(&request).unwrap();
        let OperationBody::InvokeHostFunction(body) = op.body else {
            panic!("expected invoke host function");
        };
        assert!(body.auth.is_empty());
    }

    #[test]
    fn bad_function_name_is_encoding_error() {
        let request = ContractInvocationRequest::new(contract(), "not valid!", vec![]);
        assert!(matches!(
            build_invocation(&request),
            Err(ContractError::Encoding(_))
        ));
    }

    #[test]
    fn classic_operation_is_not_an_invocation() {
        let op = Operation {
            source_account: None,
            body: OperationBody::Inflation,
        };
        assert_eq!(decode_invocation(&op), Err(ContractError::NotAnInvocation));
    }
}
