//! Contract invocation requests.

use crate::address::ContractId;
use crate::value::ContractValue;

/// A call of `function` on `contract` with positional arguments.
///
/// Argument order and types must match the target function's signature; no
/// schema validation happens on the client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContractInvocationRequest {
    pub contract: ContractId,
    pub function: String,
    pub args: Vec<ContractValue>,
}

impl ContractInvocationRequest {
    pub fn new(
        contract: ContractId,
        function: impl Into<String>,
        args: Vec<ContractValue>,
    ) -> Self {
        Self {
            contract,
            function: function.into(),
            args,
        }
    }
}
