//! Subprocess client for a CosmWasm node CLI (`junod` and friends).
//!
//! Each operation spawns the node binary once with a fully materialized
//! argument vector, waits for it to exit, and treats a non-zero status as
//! fatal. Transactions are broadcast with `--broadcast-mode block`, so a
//! successful exit implies block inclusion and the caller never needs to
//! poll for a tx hash.

use async_trait::async_trait;
use tokio::process::Command;

use crate::chain::Chain;
use crate::error::Error;
use crate::msg::{Coin, ContractList, ExecuteMsg, InstantiateMsg, QueryMsg};

/// A node CLI binary plus the constant flag set shared by every invocation:
/// node endpoint, chain ID, gas pricing and broadcast mode.
#[derive(Debug, Clone)]
pub struct NodeCli {
    /// Binary name or path (e.g. `junod`).
    pub binary: String,
    /// Tendermint RPC endpoint passed as `--node`.
    pub node: String,
    /// Chain ID passed as `--chain-id`.
    pub chain_id: String,
    /// Gas price string (e.g. `0.025ujunox`).
    pub gas_prices: String,
    /// Multiplier applied to the automatic gas estimate.
    pub gas_adjustment: String,
    /// Pass `--no-admin` on instantiate, making the contract unmigatable.
    pub no_admin: bool,
}

impl NodeCli {
    /// Build a client for `binary` against the given endpoint and chain.
    pub fn new(
        binary: impl Into<String>,
        node: impl Into<String>,
        chain_id: impl Into<String>,
        gas_prices: impl Into<String>,
        gas_adjustment: impl Into<String>,
    ) -> Self {
        Self {
            binary: binary.into(),
            node: node.into(),
            chain_id: chain_id.into(),
            gas_prices: gas_prices.into(),
            gas_adjustment: gas_adjustment.into(),
            no_admin: true,
        }
    }

    /// Flags appended to every transaction.
    fn tx_flags(&self) -> Vec<String> {
        vec![
            "--gas-prices".into(),
            self.gas_prices.clone(),
            "--gas".into(),
            "auto".into(),
            "--gas-adjustment".into(),
            self.gas_adjustment.clone(),
            "--node".into(),
            self.node.clone(),
            "--chain-id".into(),
            self.chain_id.clone(),
            "--broadcast-mode".into(),
            "block".into(),
        ]
    }

    /// Flags appended to every query.
    fn node_flags(&self) -> Vec<String> {
        vec!["--node".into(), self.node.clone()]
    }

    fn instantiate_args(&self, code_id: u64, init: &str, from: &str, label: &str) -> Vec<String> {
        let mut args: Vec<String> = vec![
            "tx".into(),
            "wasm".into(),
            "instantiate".into(),
            code_id.to_string(),
            init.into(),
            "--from".into(),
            from.into(),
            "--label".into(),
            label.into(),
        ];
        args.extend(self.tx_flags());
        args.push("-y".into());
        if self.no_admin {
            args.push("--no-admin".into());
        }
        args
    }

    fn execute_args(
        &self,
        contract: &str,
        msg: &str,
        from: &str,
        funds: Option<&Coin>,
    ) -> Vec<String> {
        let mut args: Vec<String> = vec![
            "tx".into(),
            "wasm".into(),
            "execute".into(),
            contract.into(),
            msg.into(),
        ];
        if let Some(coin) = funds {
            args.push("--amount".into());
            args.push(coin.to_string());
        }
        args.push("--from".into());
        args.push(from.into());
        args.extend(self.tx_flags());
        args.push("-y".into());
        args
    }

    fn contracts_by_code_args(&self, code_id: u64) -> Vec<String> {
        let mut args: Vec<String> = vec![
            "query".into(),
            "wasm".into(),
            "list-contract-by-code".into(),
            code_id.to_string(),
        ];
        args.extend(self.node_flags());
        args.push("--output".into());
        args.push("json".into());
        args
    }

    fn query_smart_args(&self, contract: &str, query: &str) -> Vec<String> {
        let mut args: Vec<String> = vec![
            "query".into(),
            "wasm".into(),
            "contract-state".into(),
            "smart".into(),
            contract.into(),
            query.into(),
        ];
        args.extend(self.node_flags());
        args.push("--output".into());
        args.push("json".into());
        args
    }

    /// Spawn the binary, wait for exit and return captured stdout.
    ///
    /// Non-zero exit becomes [`Error::CommandFailed`] carrying the exit code
    /// and trimmed stderr; the caller propagates it unchanged.
    async fn run(&self, args: Vec<String>) -> Result<String, Error> {
        tracing::debug!(program = %self.binary, ?args, "invoking node CLI");

        let output = Command::new(&self.binary)
            .args(&args)
            .output()
            .await
            .map_err(|source| Error::Spawn {
                program: self.binary.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(Error::CommandFailed {
                program: self.binary.clone(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            });
        }

        Ok(String::from_utf8(output.stdout)?)
    }
}

#[async_trait]
impl Chain for NodeCli {
    async fn instantiate(
        &self,
        code_id: u64,
        init: &InstantiateMsg,
        from: &str,
        label: &str,
    ) -> Result<(), Error> {
        let init = serde_json::to_string(init)?;
        self.run(self.instantiate_args(code_id, &init, from, label))
            .await?;
        Ok(())
    }

    async fn contracts_by_code(&self, code_id: u64) -> Result<Vec<String>, Error> {
        let out = self.run(self.contracts_by_code_args(code_id)).await?;
        let list: ContractList = serde_json::from_str(&out)?;
        Ok(list.contracts)
    }

    async fn execute(
        &self,
        contract: &str,
        msg: &ExecuteMsg,
        from: &str,
        funds: Option<&Coin>,
    ) -> Result<(), Error> {
        let msg = serde_json::to_string(msg)?;
        self.run(self.execute_args(contract, &msg, from, funds))
            .await?;
        Ok(())
    }

    async fn query_smart(
        &self,
        contract: &str,
        query: &QueryMsg,
    ) -> Result<serde_json::Value, Error> {
        let query = serde_json::to_string(query)?;
        let out = self.run(self.query_smart_args(contract, &query)).await?;
        Ok(serde_json::from_str(&out)?)
    }
}
