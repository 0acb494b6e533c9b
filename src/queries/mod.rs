//! Query modules for the pricing SDK.
//!
//! Each module provides a struct that borrows the shared
//! [`PricingContext`](crate::context::PricingContext) and reads a consistent
//! copy of the catalog or market snapshot on every call.

pub mod catalog;
pub mod costs;
pub mod insights;
pub mod market;

pub use catalog::CatalogQuery;
pub use costs::CostCalculator;
pub use insights::InsightEngine;
pub use market::MarketQuery;
