//! CronCat task-contract client library.
//!
//! Provides typed wire messages for the contract's entry points ([`msg`]),
//! a subprocess client that drives a CosmWasm node CLI ([`cli`]), known
//! network presets ([`net`]) and the [`Chain`] seam the exercise workflow
//! is written against.

pub mod chain;
pub mod cli;
pub mod error;
pub mod msg;
pub mod net;

pub use chain::{Chain, resolve_latest};
pub use cli::NodeCli;
pub use error::Error;
