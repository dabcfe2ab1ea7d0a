//! The seam between the exercise workflow and the chain it drives.
//!
//! Production runs go through [`crate::cli::NodeCli`]; tests substitute an
//! in-memory fake. The workflow code is generic over this trait the whole
//! way down, so no step can bypass it.

use async_trait::async_trait;

use crate::error::Error;
use crate::msg::{Coin, ExecuteMsg, InstantiateMsg, QueryMsg};

/// Transaction and query operations the workflow needs from a chain.
///
/// Every method blocks until the underlying call has completed (for
/// transactions: until block inclusion), so sequencing between workflow
/// steps falls out of awaiting each call.
#[async_trait]
pub trait Chain: Send + Sync {
    /// Instantiate a contract from an uploaded code ID.
    async fn instantiate(
        &self,
        code_id: u64,
        init: &InstantiateMsg,
        from: &str,
        label: &str,
    ) -> Result<(), Error>;

    /// List addresses of all contracts instantiated under `code_id`,
    /// oldest first.
    async fn contracts_by_code(&self, code_id: u64) -> Result<Vec<String>, Error>;

    /// Execute a contract entry point, optionally attaching funds.
    async fn execute(
        &self,
        contract: &str,
        msg: &ExecuteMsg,
        from: &str,
        funds: Option<&Coin>,
    ) -> Result<(), Error>;

    /// Issue a read-only smart query and return the raw JSON response.
    async fn query_smart(
        &self,
        contract: &str,
        query: &QueryMsg,
    ) -> Result<serde_json::Value, Error>;
}

/// Resolve the address of the most recently instantiated contract under
/// `code_id`: the last entry of the contract list.
///
/// Prior runs leave earlier instances under the same code ID behind, so
/// taking the last entry is what ties a run to the contract it just
/// instantiated.
///
/// # Errors
///
/// Returns [`Error::NoContracts`] when the list is empty, or the underlying
/// query error.
pub async fn resolve_latest<C: Chain + ?Sized>(chain: &C, code_id: u64) -> Result<String, Error> {
    let contracts = chain.contracts_by_code(code_id).await?;
    contracts
        .last()
        .cloned()
        .ok_or(Error::NoContracts { code_id })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedContracts(Vec<String>);

    #[async_trait]
    impl Chain for FixedContracts {
        async fn instantiate(
            &self,
            _code_id: u64,
            _init: &InstantiateMsg,
            _from: &str,
            _label: &str,
        ) -> Result<(), Error> {
            Ok(())
        }

        async fn contracts_by_code(&self, _code_id: u64) -> Result<Vec<String>, Error> {
            Ok(self.0.clone())
        }

        async fn execute(
            &self,
            _contract: &str,
            _msg: &ExecuteMsg,
            _from: &str,
            _funds: Option<&Coin>,
        ) -> Result<(), Error> {
            Ok(())
        }

        async fn query_smart(
            &self,
            _contract: &str,
            _query: &QueryMsg,
        ) -> Result<serde_json::Value, Error> {
            Ok(serde_json::Value::Null)
        }
    }

    #[tokio::test]
    async fn resolves_last_contract_in_list() {
        let chain = FixedContracts(vec!["addrA".into(), "addrB".into(), "addrC".into()]);
        let addr = resolve_latest(&chain, 1061).await.unwrap();
        assert_eq!(addr, "addrC");
    }

    #[tokio::test]
    async fn empty_contract_list_is_fatal() {
        let chain = FixedContracts(Vec::new());
        let err = resolve_latest(&chain, 1061).await.unwrap_err();
        assert!(matches!(err, Error::NoContracts { code_id: 1061 }));
    }
}
