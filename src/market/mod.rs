//! Simulated ingredient market: regional drift, daily price series and
//! seasonal factors.

pub mod seasonal;
pub mod simulator;
pub mod stats;

pub use simulator::MarketSimulator;
