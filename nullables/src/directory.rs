//! Nullable Horizon: scripted accounts and recorded classic submissions.

use std::cell::RefCell;
use std::collections::HashMap;

use soro_rpc::{AccountDirectory, ClassicSubmitter, HorizonTransactionResponse, RpcError};
use soro_types::{Account, PublicKey};

/// Accounts with fixed sequence numbers. Unknown accounts are not found.
#[derive(Default)]
pub struct NullAccountDirectory {
    accounts: RefCell<HashMap<PublicKey, i64>>,
    lookups: RefCell<Vec<PublicKey>>,
}

impl NullAccountDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_account(self, id: PublicKey, sequence: i64) -> Self {
        self.set_sequence(id, sequence);
        self
    }

    /// Simulate the ledger moving an account's sequence forward.
    pub fn set_sequence(&self, id: PublicKey, sequence: i64) {
        self.accounts.borrow_mut().insert(id, sequence);
    }

    /// Every account looked up, in order.
    pub fn lookups(&self) -> Vec<PublicKey> {
        self.lookups.borrow().clone()
    }
}

impl AccountDirectory for NullAccountDirectory {
    async fn get_account(&self, id: &PublicKey) -> Result<Account, RpcError> {
        self.lookups.borrow_mut().push(*id);
        self.accounts
            .borrow()
            .get(id)
            .map(|seq| Account::new(*id, *seq))
            .ok_or_else(|| RpcError::AccountNotFound(id.account_id()))
    }
}

/// Accepts every classic envelope and records it.
#[derive(Default)]
pub struct NullClassicSubmitter {
    submitted: RefCell<Vec<String>>,
    reject_with: RefCell<Option<(u16, String)>>,
}

impl NullClassicSubmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every later submission with an HTTP error.
    pub fn reject(&self, status: u16, body: &str) {
        *self.reject_with.borrow_mut() = Some((status, body.to_string()));
    }

    pub fn submitted(&self) -> Vec<String> {
        self.submitted.borrow().clone()
    }
}

impl ClassicSubmitter for NullClassicSubmitter {
    async fn submit_classic(
        &self,
        envelope_xdr: &str,
    ) -> Result<HorizonTransactionResponse, RpcError> {
        self.submitted.borrow_mut().push(envelope_xdr.to_string());
        if let Some((status, body)) = self.reject_with.borrow().clone() {
            return Err(RpcError::Http { status, body });
        }
        Ok(HorizonTransactionResponse {
            hash: format!("{:064x}", self.submitted.borrow().len()),
            successful: true,
            ledger: Some(1),
        })
    }
}
