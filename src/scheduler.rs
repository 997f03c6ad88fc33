//! Fleet Scheduler
//!
//! Assigns packages to vehicles heaviest first, prices each one and estimates
//! when it is delivered. Every assignment advances the chosen vehicle's clock by
//! a full round trip.

use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    offers::OfferTable,
    packages::{Package, heaviest_first},
    pricing::{PricingError, Quote, price_of},
    vehicles::{Vehicle, VehicleId, select_vehicle},
};

/// Decimal places kept in reported costs and times.
pub const REPORTED_DECIMAL_PLACES: u32 = 2;

/// Errors from a scheduling run.
#[derive(Debug, Error, PartialEq)]
pub enum ScheduleError {
    /// A vehicle speed of zero or below would make trip durations meaningless.
    #[error("vehicle {vehicle} has speed {speed}; speed must be greater than zero")]
    InvalidSpeed {
        /// Offending vehicle
        vehicle: VehicleId,
        /// Configured speed
        speed: Decimal,
    },

    /// A package has a negative weight or distance.
    #[error("package {package} has negative {measure} {value}")]
    InvalidPackage {
        /// Offending package id
        package: String,
        /// Which measurement is negative (`weight` or `distance`)
        measure: &'static str,
        /// The negative value
        value: Decimal,
    },

    /// Packages were supplied but there are no vehicles to carry them.
    #[error("no vehicles available for {0} package(s)")]
    NoVehicleAvailable(usize),

    /// A trip duration or vehicle clock left the representable range.
    #[error("delivery time for package {0} is out of range")]
    DurationOverflow(String),

    /// A package could not be priced.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// Delivery estimate for one package, rounded for reporting.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeliveryEstimate {
    /// Package identifier
    pub package_id: String,

    /// Package weight in kg
    pub weight: Decimal,

    /// Delivery distance in km
    pub distance: Decimal,

    /// Code of the applied offer, `None` when no offer matched
    pub offer_code: Option<String>,

    /// Cost before discount
    pub delivery_cost: Decimal,

    /// Discount amount
    pub discount: Decimal,

    /// Cost after discount
    pub total_cost: Decimal,

    /// Hours from the start of the run until the package is delivered
    pub estimated_delivery_time: Decimal,

    /// Vehicle carrying the package
    pub vehicle_id: VehicleId,
}

impl DeliveryEstimate {
    fn new(
        package: &Package,
        quote: &Quote<'_>,
        delivery_time: Decimal,
        vehicle_id: VehicleId,
    ) -> Self {
        Self {
            package_id: package.id().to_string(),
            weight: package.weight(),
            distance: package.distance(),
            offer_code: quote.offer_code().map(str::to_string),
            delivery_cost: round_for_report(quote.delivery_cost),
            discount: round_for_report(quote.discount),
            total_cost: round_for_report(quote.total_cost),
            estimated_delivery_time: round_for_report(delivery_time),
            vehicle_id,
        }
    }
}

/// Rounds a value to the reported precision, midpoints away from zero.
pub fn round_for_report(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(REPORTED_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Schedules every package onto the vehicles and returns the estimates in
/// processing order (heaviest package first).
///
/// The `available_at` clock of each chosen vehicle is advanced in place, so the
/// slice reflects the fleet's state after the run.
///
/// A package heavier than every vehicle's capacity is still assigned, to the
/// earliest-free vehicle.
///
/// # Errors
///
/// Returns an error, leaving `vehicles` untouched, if:
/// - a vehicle speed is zero or negative (`ScheduleError::InvalidSpeed`).
/// - a package weight or distance is negative (`ScheduleError::InvalidPackage`).
/// - packages are given but `vehicles` is empty (`ScheduleError::NoVehicleAvailable`).
///
/// Returns `ScheduleError::DurationOverflow` if a clock update overflows, or
/// `ScheduleError::Pricing` if a package cost leaves the decimal range; the
/// vehicles assigned before that point keep their updated clocks.
#[tracing::instrument(skip_all, fields(packages = packages.len(), vehicles = vehicles.len()))]
pub fn schedule(
    base_cost: Decimal,
    packages: &[Package],
    vehicles: &mut [Vehicle],
    offers: &OfferTable,
) -> Result<Vec<DeliveryEstimate>, ScheduleError> {
    validate(packages, vehicles)?;

    let mut estimates = Vec::with_capacity(packages.len());

    for package in heaviest_first(packages) {
        let Some((idx, within_capacity)) = select_vehicle(vehicles, package.weight()) else {
            return Err(ScheduleError::NoVehicleAvailable(packages.len()));
        };

        let Some(vehicle) = vehicles.get_mut(idx) else {
            return Err(ScheduleError::NoVehicleAvailable(packages.len()));
        };

        if !within_capacity {
            warn!(
                package = package.id(),
                weight = %package.weight(),
                vehicle = %vehicle.id(),
                "package exceeds every vehicle capacity; assigning earliest free vehicle"
            );
        }

        let quote = price_of(base_cost, package, offers)?;
        let delivery_time = dispatch(vehicle, package)?;

        debug!(
            package = package.id(),
            vehicle = %vehicle.id(),
            offer = quote.offer_code().unwrap_or("none"),
            total_cost = %quote.total_cost,
            delivery_time = %delivery_time,
            available_at = %vehicle.available_at(),
            "package assigned"
        );

        estimates.push(DeliveryEstimate::new(
            package,
            &quote,
            delivery_time,
            vehicle.id(),
        ));
    }

    info!(estimates = estimates.len(), "scheduling run complete");

    Ok(estimates)
}

/// Sends the vehicle out with the package and returns the delivery time.
///
/// The vehicle is free again once it has driven back, one more trip later.
fn dispatch(vehicle: &mut Vehicle, package: &Package) -> Result<Decimal, ScheduleError> {
    let overflow = || ScheduleError::DurationOverflow(package.id().to_string());

    let trip = package
        .distance()
        .checked_div(vehicle.speed())
        .ok_or_else(overflow)?;

    let delivered_at = vehicle.available_at().checked_add(trip).ok_or_else(overflow)?;
    let free_at = delivered_at.checked_add(trip).ok_or_else(overflow)?;

    vehicle.set_available_at(free_at);

    Ok(delivered_at)
}

fn validate(packages: &[Package], vehicles: &[Vehicle]) -> Result<(), ScheduleError> {
    if let Some(vehicle) = vehicles.iter().find(|v| v.speed() <= Decimal::ZERO) {
        return Err(ScheduleError::InvalidSpeed {
            vehicle: vehicle.id(),
            speed: vehicle.speed(),
        });
    }

    for package in packages {
        for (measure, value) in [("weight", package.weight()), ("distance", package.distance())] {
            if value < Decimal::ZERO {
                return Err(ScheduleError::InvalidPackage {
                    package: package.id().to_string(),
                    measure,
                    value,
                });
            }
        }
    }

    if !packages.is_empty() && vehicles.is_empty() {
        return Err(ScheduleError::NoVehicleAvailable(packages.len()));
    }

    Ok(())
}
