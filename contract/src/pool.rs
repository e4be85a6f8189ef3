//! Lending-pool `submit` call.
//!
//! The pool exposes `submit(from, spender, to, requests)` where `requests` is
//! a vector of records `{address, amount, request_type}`. A self-funded
//! deposit uses the caller for both `from` and `spender` and the pool for `to`.

use soro_types::{Address, Amount, ContractId, ContractInvocationRequest, ContractValue, PublicKey};

/// Name of the pool entry point.
pub const SUBMIT_FUNCTION: &str = "submit";

/// `request_type` value the pool treats as a deposit.
pub const DEPOSIT_REQUEST_TYPE: u32 = 1;

/// One entry of the `requests` vector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoolRequest {
    pub request_type: u32,
    /// The reserve asset contract the request applies to.
    pub address: Address,
    pub amount: Amount,
}

impl PoolRequest {
    pub fn deposit(asset: ContractId, amount: Amount) -> Self {
        Self {
            request_type: DEPOSIT_REQUEST_TYPE,
            address: Address::Contract(asset),
            amount,
        }
    }

    pub fn to_value(&self) -> ContractValue {
        ContractValue::record([
            ("address", ContractValue::Address(self.address)),
            ("amount", ContractValue::amount(self.amount)),
            ("request_type", ContractValue::U32(self.request_type)),
        ])
    }
}

/// A full `submit` call against a pool contract.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmitCall {
    pub pool: ContractId,
    pub from: Address,
    pub spender: Address,
    pub to: Address,
    pub requests: Vec<PoolRequest>,
}

impl SubmitCall {
    /// A self-funded deposit of `amount` of `asset` by `depositor`.
    pub fn deposit(pool: ContractId, asset: ContractId, depositor: PublicKey, amount: Amount) -> Self {
        let caller = Address::Account(depositor);
        Self {
            pool,
            from: caller,
            spender: caller,
            to: Address::Contract(pool),
            requests: vec![PoolRequest::deposit(asset, amount)],
        }
    }

    pub fn into_request(self) -> ContractInvocationRequest {
        let requests = self.requests.iter().map(PoolRequest::to_value).collect();
        ContractInvocationRequest::new(
            self.pool,
            SUBMIT_FUNCTION,
            vec![
                ContractValue::Address(self.from),
                ContractValue::Address(self.spender),
                ContractValue::Address(self.to),
                ContractValue::Vec(requests),
            ],
        )
    }
}
