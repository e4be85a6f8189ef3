//! Horizon and Soroban RPC clients against in-process axum servers.

use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use serde_json::{json, Value};
use soro_rpc::{AccountDirectory, HorizonClient, LedgerRpc, RpcError, SorobanRpcClient};
use soro_types::{PublicKey, TxHash};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn known_account() -> PublicKey {
    PublicKey([7u8; 32])
}

async fn account_handler(Path(id): Path<String>) -> (StatusCode, Json<Value>) {
    if id == known_account().account_id() {
        (
            StatusCode::OK,
            Json(json!({ "id": id, "sequence": "103720918407102567", "balances": [] })),
        )
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(json!({ "title": "Resource Missing", "status": 404 })),
        )
    }
}

async fn submit_handler(Form(form): Form<std::collections::HashMap<String, String>>) -> Json<Value> {
    let tx = form.get("tx").cloned().unwrap_or_default();
    Json(json!({ "hash": format!("{:0>64}", tx.len()), "successful": true, "ledger": 12 }))
}

/// Minimal Soroban RPC: answers by method name.
async fn rpc_handler(Json(req): Json<Value>) -> Json<Value> {
    assert_eq!(req["jsonrpc"], "2.0");
    let id = req["id"].clone();
    let result = match req["method"].as_str().unwrap_or_default() {
        "simulateTransaction" => json!({
            "transactionData": "AAAA",
            "minResourceFee": "58181",
            "results": [{ "auth": ["AUTH1"], "xdr": "AAAAAQ==" }],
            "latestLedger": 1000
        }),
        "sendTransaction" => json!({
            "hash": "ab".repeat(32),
            "status": "PENDING",
            "latestLedger": 1001
        }),
        "getTransaction" => {
            let hash = req["params"]["hash"].as_str().unwrap_or_default();
            let status = if hash == "ab".repeat(32) { "SUCCESS" } else { "NOT_FOUND" };
            json!({ "status": status, "latestLedger": 1002 })
        }
        other => {
            return Json(json!({
                "jsonrpc": "2.0",
                "id": id,
                "error": { "code": -32601, "message": format!("method not found: {other}") }
            }))
        }
    };
    Json(json!({ "jsonrpc": "2.0", "id": id, "result": result }))
}

fn horizon_app() -> Router {
    Router::new()
        .route("/accounts/:id", get(account_handler))
        .route("/transactions", post(submit_handler))
}

// ---------------------------------------------------------------------------
// Horizon
// ---------------------------------------------------------------------------

#[tokio::test]
async fn account_sequence_is_parsed() {
    let base = serve(horizon_app()).await;
    let horizon = HorizonClient::new(&base).unwrap();

    let account = horizon.get_account(&known_account()).await.unwrap();
    assert_eq!(account.id, known_account());
    assert_eq!(account.sequence, 103_720_918_407_102_567);
    assert_eq!(account.next_sequence(), 103_720_918_407_102_568);
}

#[tokio::test]
async fn missing_account_is_not_found() {
    let base = serve(horizon_app()).await;
    let horizon = HorizonClient::new(&base).unwrap();

    let err = horizon.get_account(&PublicKey([8u8; 32])).await.unwrap_err();
    assert!(matches!(err, RpcError::AccountNotFound(_)));
}

#[tokio::test]
async fn classic_submission_posts_form() {
    let base = serve(horizon_app()).await;
    let horizon = HorizonClient::new(&format!("{base}/")).unwrap();

    let resp = horizon.submit_transaction("AAAAAgAAAA==").await.unwrap();
    assert!(resp.successful);
    assert_eq!(resp.ledger, Some(12));
    assert!(resp.hash.ends_with("12"));
}

#[tokio::test]
async fn unreachable_server_is_network_error() {
    // Bind then drop to get a port nobody listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let horizon = HorizonClient::new(&format!("http://{addr}")).unwrap();
    let err = horizon.get_account(&known_account()).await.unwrap_err();
    assert!(err.is_transport(), "unexpected error: {err:?}");
}

// ---------------------------------------------------------------------------
// Soroban RPC
// ---------------------------------------------------------------------------

#[tokio::test]
async fn simulate_send_and_get() {
    let url = serve(Router::new().route("/", post(rpc_handler))).await;
    let rpc = SorobanRpcClient::new(&url).unwrap();

    let sim = rpc.simulate_transaction("ENVELOPE").await.unwrap();
    assert_eq!(sim.transaction_data.as_deref(), Some("AAAA"));
    assert_eq!(sim.min_resource_fee.unwrap().as_i64().unwrap(), 58181);
    assert_eq!(sim.results[0].auth, vec!["AUTH1".to_string()]);
    assert_eq!(sim.latest_ledger, 1000);

    let sent = rpc.send_transaction("ENVELOPE").await.unwrap();
    assert_eq!(sent.status, "PENDING");

    let hash = TxHash::from_hex(&sent.hash).unwrap();
    let status = rpc.get_transaction(&hash).await.unwrap();
    assert_eq!(status.status, "SUCCESS");

    let unknown = rpc.get_transaction(&TxHash::ZERO).await.unwrap();
    assert_eq!(unknown.status, "NOT_FOUND");
}

#[tokio::test]
async fn json_rpc_error_object_is_server_error() {
    let app = Router::new().route(
        "/",
        post(|Json(req): Json<Value>| async move {
            Json(json!({
                "jsonrpc": "2.0",
                "id": req["id"],
                "error": { "code": -32602, "message": "invalid params" }
            }))
        }),
    );
    let url = serve(app).await;
    let rpc = SorobanRpcClient::new(&url).unwrap();

    match rpc.simulate_transaction("bad").await {
        Err(RpcError::Server { code, message }) => {
            assert_eq!(code, -32602);
            assert_eq!(message, "invalid params");
        }
        other => panic!("expected server error, got {other:?}"),
    }
}

#[tokio::test]
async fn http_failure_is_reported_with_status() {
    let app = Router::new().route(
        "/",
        post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "maintenance") }),
    );
    let url = serve(app).await;
    let rpc = SorobanRpcClient::new(&url).unwrap();

    match rpc.send_transaction("x").await {
        Err(RpcError::Http { status, body }) => {
            assert_eq!(status, 503);
            assert_eq!(body, "maintenance");
        }
        other => panic!("expected http error, got {other:?}"),
    }
}
