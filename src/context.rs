//! Shared reference state behind every calculator and query.
//!
//! The catalog and the market snapshot are each held as an `Arc` behind a
//! lock. Readers clone the `Arc` and work on a consistent copy; writers
//! build a replacement first and then swap it in, so no reader ever sees a
//! half-updated table.

use rand::rngs::StdRng;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use crate::catalog::IngredientCatalog;
use crate::clock::Clock;
use crate::config::PricingConfig;
use crate::error::{PricingError, Result};
use crate::market::simulator::{self, MarketSimulator};
use crate::models::MarketSnapshot;

pub struct PricingContext {
    pub config: PricingConfig,
    catalog: RwLock<Arc<IngredientCatalog>>,
    snapshot: RwLock<Arc<MarketSnapshot>>,
    rng: Mutex<StdRng>,
    clock: Box<dyn Clock>,
}

impl PricingContext {
    /// Create a context with an initial market snapshot built from the
    /// reference region table.
    pub fn new(
        mut config: PricingConfig,
        catalog: IngredientCatalog,
        rng: StdRng,
        clock: Box<dyn Clock>,
    ) -> Result<Self> {
        config.normalize_names();
        config.validate()?;
        let now = clock.now()?;
        let initial = simulator::initial_snapshot(&config, now);
        Ok(Self {
            config,
            catalog: RwLock::new(Arc::new(catalog)),
            snapshot: RwLock::new(Arc::new(initial)),
            rng: Mutex::new(rng),
            clock,
        })
    }

    // -- Catalog -----------------------------------------------------------

    /// The catalog as of this call.
    pub fn catalog(&self) -> Arc<IngredientCatalog> {
        // Writers only ever swap a finished Arc, so a poisoned lock still
        // holds a complete catalog.
        self.catalog
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Apply `f` to a copy of the catalog and publish the copy if `f`
    /// succeeds. On error the published catalog is unchanged.
    pub fn update_catalog<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut IngredientCatalog) -> Result<T>,
    {
        let mut guard = self
            .catalog
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let mut next = IngredientCatalog::clone(&guard);
        let out = f(&mut next)?;
        *guard = Arc::new(next);
        Ok(out)
    }

    // -- Market ------------------------------------------------------------

    /// The market snapshot as of this call.
    pub fn snapshot(&self) -> Arc<MarketSnapshot> {
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Simulate a new market snapshot and publish it.
    ///
    /// The new snapshot is fully built before the swap. If the clock or the
    /// random source fails, the previous snapshot stays published.
    pub fn refresh_market(&self) -> Result<Arc<MarketSnapshot>> {
        let result = self.simulate();
        let fresh = match result {
            Ok(snapshot) => Arc::new(snapshot),
            Err(e) => {
                tracing::warn!(error = %e, "market refresh failed; keeping previous snapshot");
                return Err(e);
            }
        };

        *self
            .snapshot
            .write()
            .unwrap_or_else(PoisonError::into_inner) = fresh.clone();

        tracing::info!(
            regions = fresh.regions.len(),
            trends = fresh.trends.len(),
            last_updated = %fresh.last_updated,
            "market snapshot refreshed"
        );
        Ok(fresh)
    }

    fn simulate(&self) -> Result<MarketSnapshot> {
        let now = self.clock.now()?;
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| PricingError::Simulation("random source lock poisoned".into()))?;
        MarketSimulator::new(&self.config).simulate(&mut *rng, now)
    }
}
