//! Monte Carlo simulation of the draft lottery.
//!
//! Runs any number of independent lottery trials and reports how often each
//! team won each round and where each team ended up in the draft order.

mod config;
mod report;
mod runner;
mod stats;

pub use config::SimConfig;
pub use report::LotteryReport;
pub use runner::{run_simulation, simulate_trial};
pub use stats::LotteryStats;
