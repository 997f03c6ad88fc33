//! Courier prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    fixtures::{Fixture, FixtureError},
    offers::{Offer, OfferTable},
    packages::Package,
    pricing::{PricingError, Quote, price_of},
    report::{DeliveryReport, FleetSummary, ReportError},
    scheduler::{DeliveryEstimate, ScheduleError, schedule},
    session::CourierSession,
    vehicles::{Fleet, Vehicle, VehicleId},
};
