//! Wire types for the CronCat task contract.
//!
//! These types model the JSON entry points of the on-chain contract
//! (instantiate, execute, smart query) plus the responses the harness needs
//! to read back. Serialization must stay byte-compatible with the contract
//! schema: externally tagged enums with `snake_case` tags, amounts as decimal
//! strings, and `null` for absent boundary/rules fields.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Contract initialization payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InstantiateMsg {
    /// Native denomination the contract accounts in (e.g. `"ujunox"`).
    pub denom: String,
}

/// Executable entry points of the task contract.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ExecuteMsg {
    /// Register the sender as an agent eligible to execute due tasks.
    RegisterAgent {
        /// Account rewards are paid to. Defaults to the sender when omitted.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        payable_account_id: Option<String>,
    },

    /// Store a new scheduled task, funded by the attached deposit.
    CreateTask {
        /// The task definition.
        task: TaskRequest,
    },

    /// Execute the next currently-due task on behalf of the calling agent.
    ProxyCall {},
}

/// Read-only smart queries understood by the task contract.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum QueryMsg {
    /// List stored tasks, oldest first.
    GetTasks {
        /// Number of leading entries to skip.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        from_index: Option<u64>,

        /// Maximum number of entries to return.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        limit: Option<u64>,
    },
}

impl QueryMsg {
    /// The bare `{"get_tasks":{}}` query with no paging.
    #[must_use]
    pub const fn get_tasks() -> Self {
        Self::GetTasks {
            from_index: None,
            limit: None,
        }
    }
}

/// A task definition as submitted with [`ExecuteMsg::CreateTask`].
///
/// Field order matters for byte-for-byte payload comparisons in tests;
/// it mirrors the contract schema.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskRequest {
    /// When and how often the task becomes due.
    pub interval: Interval,

    /// Optional first/last execution bounds. Serialized as `null` when unset.
    pub boundary: Option<Boundary>,

    /// Whether a failing action removes the task.
    pub stop_on_fail: bool,

    /// Messages dispatched on each execution, in order.
    pub actions: Vec<Action>,

    /// Optional execution preconditions. Serialized as `null` when unset.
    pub rules: Option<Vec<serde_json::Value>>,
}

impl TaskRequest {
    /// A one-shot, immediately-due staking delegation with no boundary,
    /// no rules and `stop_on_fail` disabled.
    #[must_use]
    pub fn delegate(validator: impl Into<String>, amount: Coin) -> Self {
        Self {
            interval: Interval::Immediate,
            boundary: None,
            stop_on_fail: false,
            actions: vec![Action {
                msg: CosmosMsg::Staking(StakingMsg::Delegate {
                    validator: validator.into(),
                    amount,
                }),
                gas_limit: None,
            }],
            rules: None,
        }
    }
}

/// Task recurrence policy.
///
/// Unit variants serialize as bare strings (`"Immediate"`), matching the
/// contract's externally tagged representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum Interval {
    /// Execute once at the first eligible slot.
    Once,
    /// Execute as soon as an agent picks the task up.
    Immediate,
    /// Execute every N blocks.
    Block(u64),
    /// Execute on a crontab-style schedule.
    Cron(String),
}

/// First/last execution bounds for a task, in block heights.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Boundary {
    /// Earliest block the task may execute in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<u64>,

    /// Latest block the task may execute in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<u64>,
}

/// One message a task dispatches when executed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Action {
    /// The wrapped chain message.
    pub msg: CosmosMsg,

    /// Per-action gas cap. Serialized as `null` when unset.
    pub gas_limit: Option<u64>,
}

/// The subset of chain messages the harness schedules.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum CosmosMsg {
    /// Bank module messages.
    Bank(BankMsg),
    /// Staking module messages.
    Staking(StakingMsg),
}

/// Bank module messages.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum BankMsg {
    /// Transfer `amount` to `to_address`.
    Send {
        /// Recipient account.
        to_address: String,
        /// Coins to transfer.
        amount: Vec<Coin>,
    },
}

/// Staking module messages.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum StakingMsg {
    /// Delegate `amount` to `validator`.
    Delegate {
        /// Validator operator address.
        validator: String,
        /// Delegated coin.
        amount: Coin,
    },
    /// Undelegate `amount` from `validator`.
    Undelegate {
        /// Validator operator address.
        validator: String,
        /// Undelegated coin.
        amount: Coin,
    },
}

/// A native coin. The amount is a decimal string, per the chain's JSON
/// encoding of `u128` values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Coin {
    /// Denomination (e.g. `"ujunox"`).
    pub denom: String,
    /// Amount in the smallest unit, as a decimal string.
    pub amount: String,
}

impl Coin {
    /// Build a coin from a numeric amount.
    #[must_use]
    pub fn new(amount: u128, denom: impl Into<String>) -> Self {
        Self {
            denom: denom.into(),
            amount: amount.to_string(),
        }
    }
}

impl fmt::Display for Coin {
    /// Formats as `<amount><denom>`, the shape the node CLI's `--amount`
    /// flag expects.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

/// Response shape of `query wasm list-contract-by-code`.
#[derive(Debug, Clone, Deserialize)]
pub struct ContractList {
    /// Addresses of all contracts instantiated under the code ID,
    /// oldest first.
    #[serde(default)]
    pub contracts: Vec<String>,
}

/// One stored task, as returned by [`QueryMsg::GetTasks`].
#[derive(Debug, Clone, Deserialize)]
pub struct TaskResponse {
    /// Deterministic hash identifying the task.
    pub task_hash: String,

    /// Account that created the task.
    pub owner_id: String,

    /// Recurrence policy.
    pub interval: Interval,

    /// Execution bounds, if any. Left untyped; the harness never reads it.
    #[serde(default)]
    pub boundary: Option<serde_json::Value>,

    /// Whether a failing action removes the task.
    pub stop_on_fail: bool,

    /// Remaining deposit funding the task.
    #[serde(default)]
    pub total_deposit: Vec<Coin>,

    /// Scheduled actions. Left untyped; the harness only counts tasks.
    #[serde(default)]
    pub actions: Vec<serde_json::Value>,

    /// Execution preconditions, if any.
    #[serde(default)]
    pub rules: Option<serde_json::Value>,
}

impl TaskResponse {
    /// Parse a `get_tasks` smart-query response into task records.
    ///
    /// The node CLI wraps smart-query results in `{"data": <resp>}`; a bare
    /// array is accepted too so fixtures and raw contract output both work.
    ///
    /// # Errors
    ///
    /// Returns an error if the response is not a task array in either shape.
    pub fn parse_list(resp: &serde_json::Value) -> Result<Vec<Self>, serde_json::Error> {
        let inner = resp.get("data").unwrap_or(resp);
        serde_json::from_value(inner.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALIDATOR: &str = "junovaloper1w8yn8gcnfssfu9ezy0s3zcjzgcpjz2rmhceamc";

    fn json(msg: &impl Serialize) -> String {
        serde_json::to_string(msg).unwrap()
    }

    #[test]
    fn register_agent_payload_is_bare() {
        let msg = ExecuteMsg::RegisterAgent {
            payable_account_id: None,
        };
        assert_eq!(json(&msg), r#"{"register_agent":{}}"#);
    }

    #[test]
    fn proxy_call_payload_is_bare() {
        assert_eq!(json(&ExecuteMsg::ProxyCall {}), r#"{"proxy_call":{}}"#);
    }

    #[test]
    fn get_tasks_payload_is_bare() {
        assert_eq!(json(&QueryMsg::get_tasks()), r#"{"get_tasks":{}}"#);
    }

    #[test]
    fn create_task_payload_matches_contract_schema() {
        let msg = ExecuteMsg::CreateTask {
            task: TaskRequest::delegate(VALIDATOR, Coin::new(10_000, "ujunox")),
        };
        assert_eq!(
            json(&msg),
            format!(
                concat!(
                    r#"{{"create_task":{{"task":{{"interval":"Immediate","boundary":null,"#,
                    r#""stop_on_fail":false,"actions":[{{"msg":{{"staking":{{"delegate":"#,
                    r#"{{"validator":"{v}","amount":{{"denom":"ujunox","amount":"10000"}}}}"#,
                    r#"}}}},"gas_limit":null}}],"rules":null}}}}}}"#,
                ),
                v = VALIDATOR
            )
        );
    }

    #[test]
    fn create_task_payloads_differ_only_in_amount() {
        let small = json(&ExecuteMsg::CreateTask {
            task: TaskRequest::delegate(VALIDATOR, Coin::new(10_000, "ujunox")),
        });
        let large = json(&ExecuteMsg::CreateTask {
            task: TaskRequest::delegate(VALIDATOR, Coin::new(20_000, "ujunox")),
        });
        assert_eq!(small.replace("10000", "20000"), large);
    }

    #[test]
    fn coin_display_matches_amount_flag_shape() {
        assert_eq!(Coin::new(500_000, "ujunox").to_string(), "500000ujunox");
    }

    #[test]
    fn contract_list_parses() {
        let list: ContractList =
            serde_json::from_str(r#"{"contracts":["addrA","addrB","addrC"]}"#).unwrap();
        assert_eq!(list.contracts, ["addrA", "addrB", "addrC"]);
    }

    #[test]
    fn task_response_parses_wrapped_and_bare() {
        let entry = serde_json::json!({
            "task_hash": "a00fd1cd6ec8e2ab",
            "owner_id": "juno1t5u0jfg3ljsjrh2m9e47d4ny2hea7eehqqxy7u",
            "interval": "Immediate",
            "boundary": null,
            "stop_on_fail": false,
            "total_deposit": [{"denom": "ujunox", "amount": "500000"}],
            "actions": [],
            "rules": null,
        });

        let wrapped = serde_json::json!({ "data": [entry] });
        let tasks = TaskResponse::parse_list(&wrapped).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].interval, Interval::Immediate);
        assert!(!tasks[0].stop_on_fail);
        assert_eq!(tasks[0].total_deposit[0].amount, "500000");

        let bare = serde_json::json!([entry]);
        assert_eq!(TaskResponse::parse_list(&bare).unwrap().len(), 1);
    }

    #[test]
    fn interval_roundtrips_through_contract_encoding() {
        assert_eq!(json(&Interval::Immediate), r#""Immediate""#);
        assert_eq!(json(&Interval::Block(100)), r#"{"Block":100}"#);
        let parsed: Interval = serde_json::from_str(r#""Once""#).unwrap();
        assert_eq!(parsed, Interval::Once);
    }
}
