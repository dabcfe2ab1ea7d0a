//! CronCat deployment and exercise harness library.
//!
//! Instantiates the task contract, registers an agent, schedules funded
//! delegation tasks and triggers their execution, all through a node CLI
//! driven as subprocesses.

pub mod config;
pub mod scenario;
