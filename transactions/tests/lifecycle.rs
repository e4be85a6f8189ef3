//! The full build → simulate → finalize → sign → submit → poll pipeline,
//! run against the nullable ledger RPC.

use std::time::Duration;

use soro_contract::SubmitCall;
use soro_crypto::keypair_from_seed;
use soro_nullables::{NullLedgerRpc, RpcCall};
use soro_transactions::{
    signature_matches, transaction_hash, BuiltTransaction, SendStatus, StatusPoller, TxError,
    BASE_FEE, RPC_ERROR_STATUS,
};
use soro_types::{Account, Amount, ContractId, KeyPair, Network, TransactionStatus};
use stellar_xdr::curr::{
    Hash, InvokeContractArgs, Limits, OperationBody, ReadXdr, ScAddress, ScSymbol,
    SorobanAuthorizationEntry, SorobanAuthorizedFunction, SorobanAuthorizedInvocation,
    SorobanCredentials, TransactionEnvelope, TransactionExt, VecM, WriteXdr,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const POOL: &str = "CAZSVHNUMHVC6O5I7M2IVK2EC34CSSLCPAVHZ3MN6YRTT2LOTXXJT3AX";
const USDC: &str = "CAQCFVLOBK5GIULPNZRGATJJMIZL5BSP7X5YJVMGCPTUEPFM4AVSRCJU";

fn keypair() -> KeyPair {
    keypair_from_seed(&[11u8; 32])
}

fn deposit_tx(kp: &KeyPair) -> BuiltTransaction {
    let request = SubmitCall::deposit(
        ContractId::from_strkey(POOL).unwrap(),
        ContractId::from_strkey(USDC).unwrap(),
        kp.public,
        Amount::from_decimal_str("10").unwrap(),
    )
    .into_request();
    BuiltTransaction::invocation(&Account::new(kp.public, 500), &request, BASE_FEE).unwrap()
}

fn auth_entry() -> String {
    let entry = SorobanAuthorizationEntry {
        credentials: SorobanCredentials::SourceAccount,
        root_invocation: SorobanAuthorizedInvocation {
            function: SorobanAuthorizedFunction::ContractFn(InvokeContractArgs {
                contract_address: ScAddress::Contract(Hash([1u8; 32])),
                function_name: ScSymbol("submit".try_into().unwrap()),
                args: VecM::default(),
            }),
            sub_invocations: VecM::default(),
        },
    };
    entry.to_xdr_base64(Limits::none()).unwrap()
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

#[tokio::test]
async fn deposit_pipeline_reaches_success() {
    let rpc = NullLedgerRpc::new();
    rpc.respond_to_simulate(NullLedgerRpc::simulation_ok(58_181, vec![auth_entry()]));
    rpc.respond_to_get("NOT_FOUND");
    rpc.respond_to_get("SUCCESS");
    let kp = keypair();

    let simulated = deposit_tx(&kp).simulate(&rpc).await.unwrap();
    assert_eq!(simulated.simulation().min_resource_fee, 58_181);

    let finalized = simulated.finalize().unwrap();
    assert_eq!(finalized.fee(), BASE_FEE + 58_181);
    let tx = finalized.transaction();
    assert_eq!(tx.seq_num.0, 501);
    assert!(matches!(tx.ext, TransactionExt::V1(_)));
    let OperationBody::InvokeHostFunction(op) = &tx.operations[0].body else {
        panic!("expected invocation");
    };
    assert_eq!(op.auth.len(), 1);

    let expected_hash = finalized.hash(&Network::Testnet).unwrap();
    let signed = finalized.sign(&kp, &Network::Testnet).unwrap();
    assert_eq!(signed.hash(), expected_hash);

    let submitted = signed.submit(&rpc).await.unwrap();
    assert_eq!(submitted.status, SendStatus::Pending);
    assert_eq!(submitted.hash, expected_hash);

    let poller = StatusPoller::new(&rpc);
    let status = poller
        .wait_for_terminal(&submitted.hash, Duration::ZERO, 5)
        .await
        .unwrap();
    assert_eq!(status, TransactionStatus::Success);

    let calls = rpc.calls();
    assert!(matches!(calls[0], RpcCall::Simulate(_)));
    assert!(matches!(calls[1], RpcCall::Send(_)));
    assert_eq!(rpc.get_count(), 2);
}

#[tokio::test]
async fn submitted_envelope_carries_valid_signature() {
    let rpc = NullLedgerRpc::new();
    let kp = keypair();

    let signed = deposit_tx(&kp)
        .simulate(&rpc)
        .await
        .unwrap()
        .finalize()
        .unwrap()
        .sign(&kp, &Network::Testnet)
        .unwrap();
    signed.submit(&rpc).await.unwrap();

    let RpcCall::Send(xdr) = &rpc.calls()[1] else {
        panic!("second call must be send");
    };
    let TransactionEnvelope::Tx(env) = TransactionEnvelope::from_xdr_base64(xdr, Limits::none()).unwrap()
    else {
        panic!("expected v1 envelope");
    };
    let hash = transaction_hash(&env.tx, &Network::Testnet).unwrap();
    assert!(signature_matches(hash.as_bytes(), &env.signatures[0], &kp.public));
}

#[tokio::test]
async fn missing_resource_fee_stops_before_send() {
    let rpc = NullLedgerRpc::new();
    let mut incomplete = NullLedgerRpc::simulation_ok(0, Vec::new());
    incomplete.min_resource_fee = None;
    rpc.respond_to_simulate(incomplete);

    let err = deposit_tx(&keypair()).simulate(&rpc).await.unwrap_err();
    assert!(matches!(err, TxError::SimulationIncomplete("minResourceFee")));
    assert_eq!(rpc.simulate_count(), 1);
    assert_eq!(rpc.send_count(), 0);
}

#[tokio::test]
async fn simulation_transport_failure_propagates() {
    let rpc = NullLedgerRpc::new();
    rpc.fail_simulate("connection reset");

    let err = deposit_tx(&keypair()).simulate(&rpc).await.unwrap_err();
    assert!(matches!(err, TxError::Rpc(_)));
    assert_eq!(rpc.send_count(), 0);
}

#[tokio::test]
async fn rejected_submission_is_an_error() {
    for status in ["ERROR", "TRY_AGAIN_LATER", "SOMETHING_NEW"] {
        let rpc = NullLedgerRpc::new();
        rpc.respond_to_send(status, "");
        let kp = keypair();

        let signed = deposit_tx(&kp)
            .simulate(&rpc)
            .await
            .unwrap()
            .finalize()
            .unwrap()
            .sign(&kp, &Network::Testnet)
            .unwrap();
        match signed.submit(&rpc).await {
            Err(TxError::Submission { status: s, .. }) => assert_eq!(s, status),
            other => panic!("{status}: expected submission error, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn node_refused_simulation_is_a_simulation_error() {
    let rpc = NullLedgerRpc::new();
    rpc.refuse_simulate(-32602, "invalid params: transaction");

    let err = deposit_tx(&keypair()).simulate(&rpc).await.unwrap_err();
    match err {
        TxError::Simulation(detail) => assert!(detail.contains("-32602"), "{detail}"),
        other => panic!("expected simulation error, got {other:?}"),
    }
    assert_eq!(rpc.send_count(), 0);
}

#[tokio::test]
async fn node_refused_send_is_a_submission_error() {
    let rpc = NullLedgerRpc::new();
    rpc.refuse_send(-32602, "invalid params: transaction");
    let kp = keypair();

    let signed = deposit_tx(&kp)
        .simulate(&rpc)
        .await
        .unwrap()
        .finalize()
        .unwrap()
        .sign(&kp, &Network::Testnet)
        .unwrap();
    match signed.submit(&rpc).await {
        Err(TxError::Submission { status, detail }) => {
            assert_eq!(status, RPC_ERROR_STATUS);
            assert!(detail.contains("invalid params"), "{detail}");
        }
        other => panic!("expected submission error, got {other:?}"),
    }
}

#[tokio::test]
async fn duplicate_counts_as_accepted() {
    let rpc = NullLedgerRpc::new();
    let node_hash = "cd".repeat(32);
    rpc.respond_to_send("DUPLICATE", &node_hash);
    let kp = keypair();

    let result = deposit_tx(&kp)
        .simulate(&rpc)
        .await
        .unwrap()
        .finalize()
        .unwrap()
        .sign(&kp, &Network::Testnet)
        .unwrap()
        .submit(&rpc)
        .await
        .unwrap();
    assert_eq!(result.status, SendStatus::Duplicate);
    assert_eq!(result.hash.to_hex(), node_hash);
}

// ---------------------------------------------------------------------------
// Status polling
// ---------------------------------------------------------------------------

#[tokio::test]
async fn status_mapping_and_errors() {
    let rpc = NullLedgerRpc::new();
    rpc.respond_to_get("FAILED");
    rpc.fail_get("timeout");
    let poller = StatusPoller::new(&rpc);
    let hash = soro_types::TxHash::new([3u8; 32]);

    assert_eq!(poller.check_status(&hash).await.unwrap(), TransactionStatus::Failed);
    assert!(matches!(poller.check_status(&hash).await, Err(TxError::Rpc(_))));
    // Default null answer.
    assert_eq!(poller.check_status(&hash).await.unwrap(), TransactionStatus::NotFound);
}

#[tokio::test]
async fn polling_gives_up_after_max_polls() {
    let rpc = NullLedgerRpc::new();
    let poller = StatusPoller::new(&rpc);
    let hash = soro_types::TxHash::new([3u8; 32]);

    let err = poller
        .wait_for_terminal(&hash, Duration::ZERO, 3)
        .await
        .unwrap_err();
    assert!(matches!(err, TxError::PollTimeout { polls: 3, .. }));
    assert_eq!(rpc.get_count(), 3);
}
