//! Shared lottery constants.

pub mod constants;

pub use constants::*;
