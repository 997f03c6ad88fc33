//! Session
//!
//! Caller-owned state for building up packages and vehicles and recalculating
//! estimates, mirroring the add package / add vehicle / reset / calculate
//! actions of an input form.

use rust_decimal::Decimal;
use tracing::info;

use crate::{
    offers::OfferTable,
    packages::Package,
    pricing::DEFAULT_BASE_COST,
    scheduler::{DeliveryEstimate, ScheduleError, schedule},
    vehicles::{Fleet, Vehicle, VehicleId},
};

/// Accumulated packages and vehicles along with the last calculation.
#[derive(Debug, Clone)]
pub struct CourierSession {
    base_cost: Decimal,
    offers: OfferTable,
    packages: Vec<Package>,
    fleet: Fleet,
    results: Vec<DeliveryEstimate>,
    dispatched: Option<Fleet>,
}

impl Default for CourierSession {
    fn default() -> Self {
        Self::new(OfferTable::standard())
    }
}

impl CourierSession {
    /// Create an empty session with the default base cost.
    pub fn new(offers: OfferTable) -> Self {
        Self {
            base_cost: DEFAULT_BASE_COST,
            offers,
            packages: Vec::new(),
            fleet: Fleet::new(),
            results: Vec::new(),
            dispatched: None,
        }
    }

    /// Base delivery cost used for every package
    pub fn base_cost(&self) -> Decimal {
        self.base_cost
    }

    /// Set the base delivery cost for the next calculation.
    pub fn set_base_cost(&mut self, base_cost: Decimal) {
        self.base_cost = base_cost;
    }

    /// Offers applied by this session
    pub fn offers(&self) -> &OfferTable {
        &self.offers
    }

    /// Add a package.
    pub fn add_package(&mut self, package: Package) {
        self.packages.push(package);
    }

    /// Register a vehicle, free from time zero, and return its id.
    pub fn add_vehicle(&mut self, max_weight: Decimal, speed: Decimal) -> VehicleId {
        self.fleet.add(max_weight, speed)
    }

    /// Packages in the order they were added
    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    /// Registered vehicles, as they were before any calculation
    pub fn vehicles(&self) -> &[Vehicle] {
        self.fleet.vehicles()
    }

    /// Estimates from the last successful calculation
    pub fn results(&self) -> &[DeliveryEstimate] {
        &self.results
    }

    /// The fleet as it stood at the end of the last successful calculation
    pub fn dispatched(&self) -> Option<&Fleet> {
        self.dispatched.as_ref()
    }

    /// Clear packages, vehicles and results. Vehicle ids restart at 1.
    pub fn reset(&mut self) {
        self.packages.clear();
        self.fleet.clear();
        self.results.clear();
        self.dispatched = None;
    }

    /// Schedule every package and replace the previous results.
    ///
    /// The run works on a copy of the fleet, so registered vehicles stay free
    /// from time zero and calculating twice gives the same answer.
    ///
    /// # Errors
    ///
    /// Returns a [`ScheduleError`] if the packages or vehicles are invalid, or if
    /// there are packages but no vehicles. Previous results are cleared.
    pub fn calculate(&mut self) -> Result<&[DeliveryEstimate], ScheduleError> {
        self.results.clear();
        self.dispatched = None;

        let mut fleet = self.fleet.clone();
        let results = schedule(
            self.base_cost,
            &self.packages,
            fleet.vehicles_mut(),
            &self.offers,
        )?;

        info!(
            packages = self.packages.len(),
            vehicles = fleet.len(),
            base_cost = %self.base_cost,
            "calculated delivery estimates"
        );

        self.results = results;
        self.dispatched = Some(fleet);

        Ok(&self.results)
    }
}
