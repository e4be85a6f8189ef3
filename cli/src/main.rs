//! soro: command-line client for a Soroban lending pool and its anchor.

mod args;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use soro_anchor::{AnchorClient, WithdrawMethod, WithdrawRequest};
use soro_rpc::{HorizonClient, SorobanRpcClient};
use soro_transactions::{RequestId, StatusPoller, TrustlineAsset};
use soro_types::{Amount, ContractId, KeyPair, Network, SystemClock, TxHash};
use soro_utils::{format_eta, init_logging, LogFormat};
use soro_wallet_core::{
    create_trustline, AnchorTransferClient, ClientConfig, ClientMetrics, LendingPoolClient,
};

#[derive(Parser)]
#[command(name = "soro", about = "Soroban lending-pool and anchor client")]
struct Cli {
    /// Path to a TOML configuration file. CLI flags and env vars override it.
    #[arg(long, env = "SORO_CONFIG")]
    config: Option<PathBuf>,

    /// Network: "public", "testnet" or "futurenet".
    #[arg(long, env = "SORO_NETWORK")]
    network: Option<Network>,

    #[arg(long, env = "SORO_HORIZON_URL")]
    horizon_url: Option<String>,

    #[arg(long, env = "SORO_RPC_URL")]
    rpc_url: Option<String>,

    /// Lending pool contract (C...).
    #[arg(long, env = "SORO_POOL_CONTRACT")]
    pool: Option<String>,

    /// Asset contract deposited into the pool (C...).
    #[arg(long, env = "SORO_ASSET_CONTRACT")]
    asset: Option<String>,

    #[arg(long, env = "SORO_ANCHOR_DOMAIN")]
    anchor_domain: Option<String>,

    /// Inclusion fee per operation, in stroops.
    #[arg(long, env = "SORO_BASE_FEE")]
    base_fee: Option<u32>,

    /// Secret seed (S...) of the signing account.
    #[arg(long = "secret", env = "SORO_SECRET_SEED", hide_env_values = true)]
    secret_seed: Option<String>,

    /// Log output: "human" or "json".
    #[arg(long, env = "SORO_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "SORO_LOG_LEVEL")]
    log_level: Option<String>,

    /// Print Prometheus metrics to stderr before exiting.
    #[arg(long)]
    print_metrics: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Deposit into the lending pool.
    Deposit {
        /// Amount in display units, e.g. "10.5".
        amount: String,
        /// Wait until the transaction succeeds or fails.
        #[arg(long)]
        wait: bool,
    },
    /// Call any contract function.
    Invoke {
        /// Contract id (C...).
        contract: ContractId,
        function: String,
        /// Arguments as kind:value, e.g. u32:7, addr:G..., amount:12.5.
        #[arg(long = "arg")]
        args: Vec<String>,
        #[arg(long)]
        wait: bool,
    },
    /// Look up a submitted transaction.
    Status {
        /// Transaction hash (hex).
        hash: TxHash,
        #[arg(long)]
        wait: bool,
    },
    /// Create a classic trustline to CODE:ISSUER.
    Trustline {
        asset: TrustlineAsset,
        /// Trust limit in display units; unlimited when omitted.
        #[arg(long)]
        limit: Option<String>,
    },
    /// Show the anchor's SEP-6 capabilities.
    AnchorInfo,
    /// Withdraw through the anchor.
    Withdraw {
        /// Asset code, e.g. SRT.
        asset_code: String,
        amount: String,
        /// Withdraw type, e.g. bank_account.
        #[arg(long = "type")]
        kind: String,
        #[arg(long)]
        dest: Option<String>,
        #[arg(long)]
        dest_extra: Option<String>,
        /// Additional anchor fields as name=value.
        #[arg(long = "field", value_parser = parse_field)]
        fields: Vec<(String, String)>,
        /// HTTP method for /withdraw: "get" or "post".
        #[arg(long, env = "SORO_WITHDRAW_METHOD")]
        method: Option<WithdrawMethod>,
    },
}

fn parse_field(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("{s:?} is not name=value"))
}

fn load_config(cli: &Cli) -> Result<ClientConfig> {
    let mut config = match &cli.config {
        Some(path) => ClientConfig::from_toml_file(path)?,
        None => ClientConfig::default(),
    };
    if let Some(network) = cli.network {
        config.network = network;
    }
    if let Some(url) = &cli.horizon_url {
        config.horizon_url = Some(url.clone());
    }
    if let Some(url) = &cli.rpc_url {
        config.rpc_url = Some(url.clone());
    }
    if let Some(pool) = &cli.pool {
        config.pool_contract = Some(pool.clone());
    }
    if let Some(asset) = &cli.asset {
        config.asset_contract = Some(asset.clone());
    }
    if let Some(domain) = &cli.anchor_domain {
        config.anchor_domain = Some(domain.clone());
    }
    if let Some(fee) = cli.base_fee {
        config.base_fee = fee;
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    config.validate()?;
    Ok(config)
}

fn signing_key(cli: &Cli) -> Result<KeyPair> {
    let seed = cli
        .secret_seed
        .as_deref()
        .context("a secret seed is required (--secret or SORO_SECRET_SEED)")?;
    Ok(soro_crypto::keypair_from_secret_seed(seed)?)
}

fn horizon(config: &ClientConfig) -> Result<HorizonClient> {
    Ok(HorizonClient::with_timeouts(
        config.horizon_url(),
        config.request_timeout(),
        config.connect_timeout(),
    )?)
}

fn soroban(config: &ClientConfig) -> Result<SorobanRpcClient> {
    Ok(SorobanRpcClient::with_timeouts(
        config.rpc_url()?,
        config.request_timeout(),
        config.connect_timeout(),
    )?)
}

fn pool_client(
    config: &ClientConfig,
    metrics: &Arc<ClientMetrics>,
) -> Result<LendingPoolClient<HorizonClient, SorobanRpcClient>> {
    Ok(LendingPoolClient::new(
        horizon(config)?,
        soroban(config)?,
        config.network,
        config.pool_contract()?,
        config.asset_contract()?,
    )
    .with_base_fee(config.base_fee)
    .with_metrics(metrics.clone()))
}

fn anchor_client(config: &ClientConfig, metrics: &Arc<ClientMetrics>) -> Result<AnchorTransferClient<SystemClock>> {
    let anchor = AnchorClient::with_timeouts(
        config.anchor_domain()?,
        config.request_timeout(),
        config.connect_timeout(),
    )?;
    Ok(AnchorTransferClient::new(anchor, config.network, SystemClock)
        .with_method(config.withdraw_method)
        .with_metrics(metrics.clone()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    init_logging(config.log_format, &config.log_level)?;

    let metrics = Arc::new(ClientMetrics::new());
    let outcome = run(&cli, &config, &metrics).await;

    if cli.print_metrics {
        eprintln!("{}", metrics.encode_text()?);
    }
    outcome
}

async fn run(cli: &Cli, config: &ClientConfig, metrics: &Arc<ClientMetrics>) -> Result<()> {
    match &cli.command {
        Command::Deposit { amount, wait } => {
            let keypair = signing_key(cli)?;
            let client = pool_client(config, metrics)?;
            let id = RequestId::new("deposit");
            let result = client.deposit(id.clone(), &keypair, amount).await?;
            println!("submitted {} ({})", result.hash, result.status.as_str());
            if *wait {
                let status = client
                    .wait_for_terminal(&id, config.poll_interval(), config.max_polls)
                    .await?;
                println!("{status}");
            }
        }
        Command::Invoke {
            contract,
            function,
            args,
            wait,
        } => {
            let keypair = signing_key(cli)?;
            let args = args
                .iter()
                .map(|a| args::parse_contract_arg(a.as_str()))
                .collect::<Result<Vec<_>>>()?;
            let client = pool_client(config, metrics)?;
            let id = RequestId::new("invoke");
            let result = client
                .invoke_contract(id.clone(), &keypair, *contract, function, args)
                .await?;
            println!("submitted {} ({})", result.hash, result.status.as_str());
            if *wait {
                let status = client
                    .wait_for_terminal(&id, config.poll_interval(), config.max_polls)
                    .await?;
                println!("{status}");
            }
        }
        Command::Status { hash, wait } => {
            let rpc = soroban(config)?;
            let poller = StatusPoller::new(&rpc);
            let status = if *wait {
                poller
                    .wait_for_terminal(hash, config.poll_interval(), config.max_polls)
                    .await?
            } else {
                poller.check_status(hash).await?
            };
            metrics.status_polls.inc();
            println!("{status}");
        }
        Command::Trustline { asset, limit } => {
            let keypair = signing_key(cli)?;
            let limit = limit
                .as_deref()
                .map(|l| -> Result<i64> {
                    let stroops = Amount::positive_from_decimal_str(l)?.stroops();
                    i64::try_from(stroops).context("trust limit is too large")
                })
                .transpose()?;
            let horizon = horizon(config)?;
            let result = create_trustline(
                &horizon,
                &horizon,
                &keypair,
                &config.network,
                asset,
                limit,
                config.base_fee,
            )
            .await?;
            match result.ledger {
                Some(ledger) => println!("trustline created in {} (ledger {ledger})", result.hash),
                None => println!("trustline created in {}", result.hash),
            }
        }
        Command::AnchorInfo => {
            let info = anchor_client(config, metrics)?.info().await?;
            for (kind, assets) in [("deposit", &info.deposit), ("withdraw", &info.withdraw)] {
                for (code, asset) in assets {
                    let types: Vec<&str> = asset.types.keys().map(String::as_str).collect();
                    println!(
                        "{kind} {code}: enabled={} auth={} types=[{}]",
                        asset.enabled.unwrap_or(true),
                        asset.authentication_required,
                        types.join(", ")
                    );
                }
            }
        }
        Command::Withdraw {
            asset_code,
            amount,
            kind,
            dest,
            dest_extra,
            fields,
            method,
        } => {
            let keypair = signing_key(cli)?;
            let amount = Amount::positive_from_decimal_str(amount)?;
            let mut request = WithdrawRequest::new(asset_code, kind, keypair.public, amount);
            if let Some(dest) = dest {
                request = request.with_dest(dest);
            }
            if let Some(extra) = dest_extra {
                request = request.with_dest_extra(extra);
            }
            for (name, value) in fields {
                request = request.with_field(name, value);
            }

            let mut client = anchor_client(config, metrics)?;
            if let Some(method) = method {
                client = client.with_method(*method);
            }
            let response = client.withdraw(&keypair, &request).await?;

            if let Some(id) = &response.id {
                println!("withdraw id: {id}");
            }
            if let Some(account) = &response.account_id {
                println!("send to:     {account}");
            }
            if let Some(memo) = &response.memo {
                println!(
                    "memo:        {memo} ({})",
                    response.memo_type.as_deref().unwrap_or("text")
                );
            }
            if let Some(eta) = response.eta {
                println!("eta:         {}", format_eta(eta));
            }
            if let Some(extra) = &response.extra_info {
                println!("extra:       {extra}");
            }
        }
    }
    Ok(())
}
