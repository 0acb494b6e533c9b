//! Recipe pricing SDK for Rust.
//!
//! Estimates the cost and selling price of a dish from its ingredient list
//! and simulates an ingredient market (regional drift, seasonality, price
//! trends and forecasts) used to adjust those estimates. All state lives in
//! one [`PricingSdk`]; nothing touches the network or the filesystem.
//!
//! # Quick start
//!
//! ```
//! use recipe_pricing::models::{PricingOptions, Recipe};
//! use recipe_pricing::PricingSdk;
//!
//! let sdk = PricingSdk::builder().seed(7).build().unwrap();
//!
//! let adobo = Recipe::new("Adobo")
//!     .ingredient("Pork Belly", "500g")
//!     .ingredient("Soy Sauce", "3 tbsp")
//!     .ingredient("Vinegar", "2 tbsp");
//! let cost = sdk.costs().total_cost(&adobo, &PricingOptions::default()).unwrap();
//! assert!(cost.cost_per_serving > 0.0);
//!
//! // Simulate a fresh market snapshot, then ask for alerts
//! sdk.market().refresh().unwrap();
//! let alerts = sdk.insights().price_alerts();
//! # let _ = alerts;
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod context;
pub mod error;
pub mod market;
pub mod models;
pub mod quantity;
pub mod queries;

#[cfg(feature = "async")]
pub use async_client::AsyncPricingSdk;
pub use catalog::IngredientCatalog;
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::PricingConfig;
pub use context::PricingContext;
pub use error::{PricingError, Result};

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fmt;

// ---------------------------------------------------------------------------
// PricingSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`PricingSdk`] instance.
///
/// Use [`PricingSdk::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](PricingSdkBuilder::build) to create the SDK.
#[derive(Default)]
pub struct PricingSdkBuilder {
    config: Option<PricingConfig>,
    labor_rate: Option<f64>,
    catalog: Option<IngredientCatalog>,
    seed: Option<u64>,
    clock: Option<Box<dyn Clock>>,
}

impl PricingSdkBuilder {
    /// Replace the reference tables and tunable constants.
    pub fn config(mut self, config: PricingConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Override the hourly labor rate. Applied on top of [`config`](Self::config).
    pub fn labor_rate(mut self, per_hour: f64) -> Self {
        self.labor_rate = Some(per_hour);
        self
    }

    /// Start from a custom ingredient catalog instead of the built-in one.
    pub fn catalog(mut self, catalog: IngredientCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Seed the market simulator's random source.
    ///
    /// Two SDKs built with the same seed and clock produce identical
    /// snapshots. Without a seed the generator is seeded from the OS.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Time source for snapshot timestamps and the seasonal lookup.
    /// Defaults to [`SystemClock`].
    pub fn clock<C: Clock + 'static>(mut self, clock: C) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    /// Validate the configuration and build the SDK.
    ///
    /// The initial market snapshot carries the reference region multipliers
    /// and no price series; call [`MarketQuery::refresh`](queries::MarketQuery::refresh)
    /// to simulate one.
    pub fn build(self) -> Result<PricingSdk> {
        let mut config = self.config.unwrap_or_default();
        if let Some(rate) = self.labor_rate {
            config.labor_rate_per_hour = rate;
        }

        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let clock = self.clock.unwrap_or_else(|| Box::new(SystemClock));
        let catalog = self.catalog.unwrap_or_default();

        tracing::debug!(
            catalog_entries = catalog.len(),
            seeded = self.seed.is_some(),
            "building pricing sdk"
        );
        let ctx = PricingContext::new(config, catalog, rng, clock)?;
        Ok(PricingSdk { ctx })
    }
}

// ---------------------------------------------------------------------------
// PricingSdk
// ---------------------------------------------------------------------------

/// The main entry point for the pricing SDK.
///
/// Owns a [`PricingContext`] and exposes each component as a lightweight
/// borrowing wrapper. The SDK is `Send + Sync`; share it behind an `Arc` to
/// use it from several threads.
///
/// Created via [`PricingSdk::builder()`].
pub struct PricingSdk {
    ctx: PricingContext,
}

impl PricingSdk {
    /// Create a new builder for configuring the SDK.
    pub fn builder() -> PricingSdkBuilder {
        PricingSdkBuilder::default()
    }

    // -- Query accessors ---------------------------------------------------

    /// Recipe cost estimation.
    pub fn costs(&self) -> queries::costs::CostCalculator<'_> {
        queries::costs::CostCalculator::new(&self.ctx)
    }

    /// Ingredient catalog lookups and price updates.
    pub fn catalog(&self) -> queries::catalog::CatalogQuery<'_> {
        queries::catalog::CatalogQuery::new(&self.ctx)
    }

    /// Market snapshot access and refresh.
    pub fn market(&self) -> queries::market::MarketQuery<'_> {
        queries::market::MarketQuery::new(&self.ctx)
    }

    /// Advisory text and price alerts for the current snapshot.
    pub fn insights(&self) -> queries::insights::InsightEngine<'_> {
        queries::insights::InsightEngine::new(&self.ctx)
    }

    /// Return a reference to the underlying [`PricingContext`].
    pub fn context(&self) -> &PricingContext {
        &self.ctx
    }

    /// The validated configuration the SDK was built with.
    pub fn config(&self) -> &PricingConfig {
        &self.ctx.config
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for PricingSdk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.ctx.snapshot();
        write!(
            f,
            "PricingSdk(catalog={}, regions={}, tracked={}, last_updated={})",
            self.ctx.catalog().len(),
            snapshot.regions.len(),
            snapshot.trends.len(),
            snapshot.last_updated
        )
    }
}
