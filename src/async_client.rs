//! Async wrapper around [`PricingSdk`] for use in async runtimes (Tokio, etc.).
//!
//! Runs SDK operations on a blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free. The
//! market refresh is the main reason to use it: the caller awaits one
//! complete snapshot and never observes a partial one.
//!
//! # Example
//!
//! ```no_run
//! use recipe_pricing::AsyncPricingSdk;
//!
//! #[tokio::main]
//! async fn main() {
//!     let sdk = AsyncPricingSdk::builder().seed(42).build().await.unwrap();
//!
//!     let snapshot = sdk.refresh_market().await.unwrap();
//!     println!("{} tracked ingredients", snapshot.trends.len());
//!
//!     // Run any sync SDK method via closure
//!     let alerts = sdk.run(|s| Ok(s.insights().price_alerts())).await.unwrap();
//! }
//! ```

use std::sync::Arc;

use crate::clock::Clock;
use crate::config::PricingConfig;
use crate::error::{PricingError, Result};
use crate::models::{MarketSnapshot, PriceAlert};
use crate::{IngredientCatalog, PricingSdk};

// ---------------------------------------------------------------------------
// AsyncPricingSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncPricingSdk`] instance.
#[derive(Default)]
pub struct AsyncPricingSdkBuilder {
    inner: crate::PricingSdkBuilder,
}

impl AsyncPricingSdkBuilder {
    pub fn config(mut self, config: PricingConfig) -> Self {
        self.inner = self.inner.config(config);
        self
    }

    pub fn labor_rate(mut self, per_hour: f64) -> Self {
        self.inner = self.inner.labor_rate(per_hour);
        self
    }

    pub fn catalog(mut self, catalog: IngredientCatalog) -> Self {
        self.inner = self.inner.catalog(catalog);
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.inner = self.inner.seed(seed);
        self
    }

    pub fn clock<C: Clock + 'static>(mut self, clock: C) -> Self {
        self.inner = self.inner.clock(clock);
        self
    }

    /// Build the async SDK on the blocking thread pool.
    pub async fn build(self) -> Result<AsyncPricingSdk> {
        let builder = self.inner;
        tokio::task::spawn_blocking(move || {
            let sdk = builder.build()?;
            Ok(AsyncPricingSdk {
                inner: Arc::new(sdk),
            })
        })
        .await
        .map_err(|e| PricingError::Task(format!("Task join error: {e}")))?
    }
}

// ---------------------------------------------------------------------------
// AsyncPricingSdk
// ---------------------------------------------------------------------------

/// Async wrapper around [`PricingSdk`].
///
/// The SDK is shared through an [`Arc`]; its own locks keep catalog updates
/// and snapshot swaps consistent, so no outer mutex is needed.
#[derive(Clone)]
pub struct AsyncPricingSdk {
    inner: Arc<PricingSdk>,
}

impl AsyncPricingSdk {
    pub fn builder() -> AsyncPricingSdkBuilder {
        AsyncPricingSdkBuilder::default()
    }

    /// Run a sync SDK operation on the blocking thread pool.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&PricingSdk) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let sdk = self.inner.clone();
        tokio::task::spawn_blocking(move || f(&sdk))
            .await
            .map_err(|e| PricingError::Task(format!("Task join error: {e}")))?
    }

    /// Simulate and publish a new market snapshot.
    pub async fn refresh_market(&self) -> Result<Arc<MarketSnapshot>> {
        self.run(|s| s.market().refresh()).await
    }

    pub async fn price_alerts(&self) -> Result<Vec<PriceAlert>> {
        self.run(|s| Ok(s.insights().price_alerts())).await
    }

    /// The wrapped synchronous SDK.
    pub fn sdk(&self) -> &PricingSdk {
        &self.inner
    }
}
