//! Draft Lottery - weighted draft lottery simulator
//!
//! This module exposes the lottery engine and the simulation driver for
//! testing and external use.

pub mod build_info;
pub mod core;
pub mod lottery;
pub mod simulator;

pub use lottery::{LotteryConfig, LotteryError, Rank};
pub use simulator::{run_simulation, LotteryReport, LotteryStats, SimConfig};
