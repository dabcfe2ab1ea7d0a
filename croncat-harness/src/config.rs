//! Runtime configuration loaded from `harness.toml`.
//!
//! Every field has a built-in default matching the Juno `uni-3` testnet
//! deployment the harness was written against, so the binary runs with no
//! config file at all. A partial file overrides only the sections it names.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use croncat::net::Network;
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Node binary and endpoint settings.
    pub node: NodeConfig,
    /// Contract instantiation settings.
    pub contract: ContractConfig,
    /// Wallet identities used to sign each kind of transaction.
    pub identities: Identities,
    /// Task definitions submitted during the run.
    pub tasks: TaskConfig,
    /// Eligibility-poll tuning.
    pub poll: PollConfig,
}

/// Node binary and endpoint settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    /// Node CLI binary name or path.
    pub binary: String,
    /// Tendermint RPC endpoint.
    pub endpoint: String,
    /// Chain ID.
    pub chain_id: String,
    /// Gas price string.
    pub gas_prices: String,
    /// Automatic gas estimate multiplier.
    pub gas_adjustment: String,
}

impl Default for NodeConfig {
    fn default() -> Self {
        let net = Network::JunoUni3;
        Self {
            binary: "junod".to_owned(),
            endpoint: net.default_rpc().to_owned(),
            chain_id: net.chain_id().to_owned(),
            gas_prices: net.gas_prices().to_owned(),
            gas_adjustment: "1.3".to_owned(),
        }
    }
}

/// Contract instantiation settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ContractConfig {
    /// Code ID of the uploaded contract binary.
    pub code_id: u64,
    /// Native denomination passed in the init message.
    pub denom: String,
    /// Human-readable contract label.
    pub label: String,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            code_id: 1061,
            denom: Network::JunoUni3.fee_denom().to_owned(),
            label: "croncat".to_owned(),
        }
    }
}

/// Wallet identities used to sign each kind of transaction. All are assumed
/// to exist in the node's keyring and to be funded.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Identities {
    /// Signs the instantiate transaction.
    pub owner: String,
    /// Registers as the agent and triggers `proxy_call`.
    pub agent: String,
    /// Creates and funds the tasks.
    pub tasker: String,
}

impl Default for Identities {
    fn default() -> Self {
        Self {
            owner: "owner".to_owned(),
            agent: "wallet6".to_owned(),
            tasker: "wallet7".to_owned(),
        }
    }
}

/// Task definitions submitted during the run.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TaskConfig {
    /// Validator the scheduled delegations target.
    pub validator: String,
    /// One delegation amount per task to create.
    pub amounts: Vec<u128>,
    /// Deposit attached to each `create_task`, funding its execution.
    pub deposit: u128,
}

impl Default for TaskConfig {
    fn default() -> Self {
        Self {
            validator: "junovaloper1w8yn8gcnfssfu9ezy0s3zcjzgcpjz2rmhceamc".to_owned(),
            amounts: vec![10_000, 20_000],
            deposit: 500_000,
        }
    }
}

/// Eligibility-poll tuning: how often `get_tasks` is re-issued while waiting
/// for tasks to become visible, and how long before the wait is fatal.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct PollConfig {
    /// Delay between consecutive `get_tasks` queries, in milliseconds.
    pub interval_ms: u64,
    /// Total time budget for one wait, in seconds.
    pub timeout_secs: u64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_ms: 2_000,
            timeout_secs: 60,
        }
    }
}

impl PollConfig {
    /// Delay between consecutive queries.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Total time budget for one wait.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// Returns [`Config::default`] if the file does not exist, allowing the
    /// binary to work without any config.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text =
            std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_uni3_deployment() {
        let cfg = Config::default();
        assert_eq!(cfg.node.binary, "junod");
        assert_eq!(cfg.node.chain_id, "uni-3");
        assert_eq!(cfg.contract.code_id, 1061);
        assert_eq!(cfg.contract.denom, "ujunox");
        assert_eq!(cfg.identities.agent, "wallet6");
        assert_eq!(cfg.identities.tasker, "wallet7");
        assert_eq!(cfg.tasks.amounts, [10_000, 20_000]);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let cfg = Config::load(Path::new("/nonexistent/harness.toml")).unwrap();
        assert_eq!(cfg.contract.code_id, 1061);
    }

    #[test]
    fn partial_file_overrides_only_named_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("harness.toml");
        std::fs::write(
            &path,
            "[node]\nbinary = \"wasmd\"\nchain_id = \"testing\"\n\n[contract]\ncode_id = 7\n",
        )
        .unwrap();

        let cfg = Config::load(&path).unwrap();
        assert_eq!(cfg.node.binary, "wasmd");
        assert_eq!(cfg.node.chain_id, "testing");
        assert_eq!(cfg.contract.code_id, 7);
        // Untouched sections keep their defaults.
        assert_eq!(cfg.contract.denom, "ujunox");
        assert_eq!(cfg.identities.owner, "owner");
        assert_eq!(cfg.poll.timeout_secs, 60);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("harness.toml");
        std::fs::write(&path, "not toml [").unwrap();
        assert!(Config::load(&path).is_err());
    }
}
