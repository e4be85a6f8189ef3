use proptest::prelude::*;
use soro_contract::{build_invocation, decode_invocation, SubmitCall};
use soro_types::{
    Address, Amount, ContractId, ContractInvocationRequest, ContractValue, PublicKey,
};

fn scalar() -> impl Strategy<Value = ContractValue> {
    prop_oneof![
        Just(ContractValue::Void),
        any::<bool>().prop_map(ContractValue::Bool),
        any::<u32>().prop_map(ContractValue::U32),
        any::<i64>().prop_map(ContractValue::I64),
        any::<u128>().prop_map(ContractValue::U128),
        any::<i128>().prop_map(ContractValue::I128),
        "[A-Za-z0-9_]{1,32}".prop_map(ContractValue::Symbol),
        ".{0,40}".prop_map(ContractValue::String),
        proptest::collection::vec(any::<u8>(), 0..64).prop_map(ContractValue::Bytes),
        any::<[u8; 32]>().prop_map(|b| ContractValue::Address(Address::Account(PublicKey(b)))),
        any::<[u8; 32]>().prop_map(|b| ContractValue::Address(Address::Contract(ContractId(b)))),
    ]
}

fn value() -> impl Strategy<Value = ContractValue> {
    scalar().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..4).prop_map(ContractValue::Vec),
            proptest::collection::vec((inner.clone(), inner), 0..4).prop_map(ContractValue::Map),
        ]
    })
}

proptest! {
    #[test]
    fn invocation_decodes_to_the_same_request(
        contract in any::<[u8; 32]>(),
        function in "[a-z_]{1,32}",
        args in proptest::collection::vec(value(), 0..5),
    ) {
        let request = ContractInvocationRequest::new(ContractId(contract), function, args);
        let op = build_invocation(&request).unwrap();
        prop_assert_eq!(decode_invocation(&op).unwrap(), request);
    }

    #[test]
    fn deposit_amount_survives_encoding(
        depositor in any::<[u8; 32]>(),
        stroops in 1i128..=i64::MAX as i128,
    ) {
        let call = SubmitCall::deposit(
            ContractId([1; 32]),
            ContractId([2; 32]),
            PublicKey(depositor),
            Amount::from_stroops(stroops),
        );
        let decoded = decode_invocation(&build_invocation(&call.clone().into_request()).unwrap()).unwrap();
        let ContractValue::Vec(requests) = &decoded.args[3] else {
            panic!("requests are a vector");
        };
        prop_assert_eq!(requests[0].field("amount"), Some(&ContractValue::I128(stroops)));
    }
}
