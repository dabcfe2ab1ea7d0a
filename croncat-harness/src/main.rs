//! CronCat deployment and exercise harness CLI.
//!
//! Drives a CosmWasm node CLI to instantiate the task contract, register an
//! agent, schedule two funded delegation tasks and trigger their execution.
//!
//! # Usage
//!
//! ```bash
//! # Full run against the defaults (Juno uni-3, code ID 1061)
//! croncat-harness run
//!
//! # Against a local node with a different code ID
//! croncat-harness run --node http://localhost:26657 --chain-id testing --code-id 7
//!
//! # Print every payload the run would submit, without touching a chain
//! croncat-harness plan
//! ```
//!
//! Exit code: the first failing node-CLI subprocess's exit code, 1 for any
//! other failure, 0 on success.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use croncat::NodeCli;
use croncat::msg::{Coin, ExecuteMsg, InstantiateMsg, QueryMsg, TaskRequest};
use croncat_harness::{config::Config, scenario};

/// CronCat contract deployment and exercise harness.
#[derive(Debug, Parser)]
#[command(name = "croncat-harness", version, about)]
struct Cli {
    /// Path to the TOML config file. Missing file means built-in defaults.
    #[arg(long, default_value = "harness.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
enum Command {
    /// Run the full workflow: instantiate, register, create tasks, execute.
    Run {
        /// Override the node CLI binary.
        #[arg(long)]
        binary: Option<String>,

        /// Override the Tendermint RPC endpoint.
        #[arg(long)]
        node: Option<String>,

        /// Override the chain ID.
        #[arg(long)]
        chain_id: Option<String>,

        /// Override the contract code ID.
        #[arg(long)]
        code_id: Option<u64>,
    },

    /// Print the payload of every step without invoking the node CLI.
    Plan,
}

#[tokio::main]
async fn main() {
    // Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let result = match Config::load(&cli.config) {
        Ok(cfg) => match cli.command {
            Command::Run {
                binary,
                node,
                chain_id,
                code_id,
            } => cmd_run(cfg, binary, node, chain_id, code_id).await,
            Command::Plan => cmd_plan(&cfg),
        },
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        tracing::error!(error = format!("{e:#}"), "run failed");
        #[allow(clippy::exit)]
        std::process::exit(scenario::exit_code(&e));
    }
}

/// Execute the `run` subcommand.
async fn cmd_run(
    mut cfg: Config,
    binary: Option<String>,
    node: Option<String>,
    chain_id: Option<String>,
    code_id: Option<u64>,
) -> Result<()> {
    if let Some(binary) = binary {
        cfg.node.binary = binary;
    }
    if let Some(node) = node {
        cfg.node.endpoint = node;
    }
    if let Some(chain_id) = chain_id {
        cfg.node.chain_id = chain_id;
    }
    if let Some(code_id) = code_id {
        cfg.contract.code_id = code_id;
    }

    let chain = NodeCli::new(
        &cfg.node.binary,
        &cfg.node.endpoint,
        &cfg.node.chain_id,
        &cfg.node.gas_prices,
        &cfg.node.gas_adjustment,
    );

    tracing::info!(
        binary = %cfg.node.binary,
        node = %cfg.node.endpoint,
        chain_id = %cfg.node.chain_id,
        "starting run"
    );

    scenario::run(&chain, &cfg).await
}

/// Execute the `plan` subcommand: print the exact JSON of each payload the
/// run would submit, in order.
#[allow(clippy::print_stdout)]
fn cmd_plan(cfg: &Config) -> Result<()> {
    let init = InstantiateMsg {
        denom: cfg.contract.denom.clone(),
    };
    println!(
        "instantiate (code ID {}, label {:?}, signer {}):\n  {}",
        cfg.contract.code_id,
        cfg.contract.label,
        cfg.identities.owner,
        serde_json::to_string(&init)?,
    );

    let register = ExecuteMsg::RegisterAgent {
        payable_account_id: None,
    };
    println!(
        "register agent (signer {}):\n  {}",
        cfg.identities.agent,
        serde_json::to_string(&register)?,
    );

    let deposit = Coin::new(cfg.tasks.deposit, cfg.contract.denom.as_str());
    for &amount in &cfg.tasks.amounts {
        let create = ExecuteMsg::CreateTask {
            task: TaskRequest::delegate(
                cfg.tasks.validator.as_str(),
                Coin::new(amount, cfg.contract.denom.as_str()),
            ),
        };
        println!(
            "create task (signer {}, deposit {deposit}):\n  {}",
            cfg.identities.tasker,
            serde_json::to_string(&create)?,
        );
    }

    println!(
        "query tasks:\n  {}",
        serde_json::to_string(&QueryMsg::get_tasks())?,
    );
    println!(
        "proxy call x{} (signer {}):\n  {}",
        cfg.tasks.amounts.len(),
        cfg.identities.agent,
        serde_json::to_string(&ExecuteMsg::ProxyCall {})?,
    );

    Ok(())
}
