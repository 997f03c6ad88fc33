//! Report
//!
//! Tabular rendering of delivery estimates and of the fleet after a run.

use std::io;

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    scheduler::{DeliveryEstimate, round_for_report},
    vehicles::{Fleet, VehicleId},
};

/// Shown instead of a table when there is nothing to report.
pub const EMPTY_STATE_MESSAGE: &str = "No results to display.";

/// Shown in the offer column when no offer applied.
pub const NO_OFFER: &str = "N/A";

/// Errors that can occur while rendering a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// An amount too large to display as money.
    #[error("amount {0} cannot be displayed as money")]
    AmountOutOfRange(Decimal),

    /// A report total or vehicle load left the decimal range.
    #[error("report total is out of range")]
    TotalOverflow,

    /// Writing to the output failed.
    #[error("failed to write report: {0}")]
    Io(#[from] io::Error),
}

/// Delivery estimates rendered as a table with a totals summary.
#[derive(Debug)]
pub struct DeliveryReport<'a> {
    estimates: &'a [DeliveryEstimate],
    currency: &'static Currency,
}

impl<'a> DeliveryReport<'a> {
    /// Create a report over the given estimates.
    pub fn new(estimates: &'a [DeliveryEstimate], currency: &'static Currency) -> Self {
        Self {
            estimates,
            currency,
        }
    }

    /// Sum of discounts across all estimates.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::TotalOverflow`] if the sum overflows.
    pub fn total_discount(&self) -> Result<Decimal, ReportError> {
        checked_sum(self.estimates.iter().map(|e| e.discount))
    }

    /// Sum of discounted costs across all estimates.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::TotalOverflow`] if the sum overflows.
    pub fn total_cost(&self) -> Result<Decimal, ReportError> {
        checked_sum(self.estimates.iter().map(|e| e.total_cost))
    }

    /// Writes the table and summary, or the empty-state message.
    ///
    /// # Errors
    ///
    /// Returns an error if an amount cannot be formatted as money or the output
    /// cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReportError> {
        if self.estimates.is_empty() {
            writeln!(out, "{EMPTY_STATE_MESSAGE}")?;

            return Ok(());
        }

        let mut builder = Builder::default();

        builder.push_record([
            "Package ID",
            "Weight",
            "Distance",
            "Offer Code",
            "Delivery Cost",
            "Discount",
            "Total Cost",
            "Estimated Delivery Time",
            "Vehicle ID",
        ]);

        for estimate in self.estimates {
            builder.push_record([
                estimate.package_id.clone(),
                format!("{} kg", estimate.weight),
                format!("{} km", estimate.distance),
                estimate
                    .offer_code
                    .clone()
                    .unwrap_or_else(|| NO_OFFER.to_string()),
                self.money(estimate.delivery_cost)?,
                self.money(estimate.discount)?,
                self.money(estimate.total_cost)?,
                format!("{:.2} hours", estimate.estimated_delivery_time),
                estimate.vehicle_id.to_string(),
            ]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(1..8), Alignment::right());

        writeln!(out, "\n{table}")?;

        writeln!(
            out,
            " Total discount: {}\n Total cost:     {}",
            self.money(self.total_discount()?)?,
            self.money(self.total_cost()?)?
        )?;

        Ok(())
    }

    fn money(&self, amount: Decimal) -> Result<String, ReportError> {
        format_money(amount, self.currency)
    }
}

/// Formats a decimal amount as money in the given currency, rounded to the
/// reported precision.
///
/// # Errors
///
/// Returns [`ReportError::AmountOutOfRange`] if the amount does not fit in
/// minor units.
pub fn format_money(amount: Decimal, currency: &'static Currency) -> Result<String, ReportError> {
    let minor = round_for_report(amount)
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|minor| minor.to_i64())
        .ok_or(ReportError::AmountOutOfRange(amount))?;

    Ok(Money::from_minor(minor, currency).to_string())
}

fn checked_sum(amounts: impl IntoIterator<Item = Decimal>) -> Result<Decimal, ReportError> {
    amounts.into_iter().try_fold(Decimal::ZERO, |total, amount| {
        total.checked_add(amount).ok_or(ReportError::TotalOverflow)
    })
}

/// Per-vehicle workload after a scheduling run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleLoad {
    /// Vehicle id
    pub vehicle_id: VehicleId,

    /// Packages carried, in dispatch order
    pub packages: SmallVec<[String; 4]>,

    /// Total weight carried in kg
    pub weight: Decimal,

    /// Hours until the vehicle is next free
    pub available_at: Decimal,
}

/// Fleet workload summary, one row per registered vehicle.
#[derive(Debug, Clone)]
pub struct FleetSummary {
    loads: Vec<VehicleLoad>,
}

impl FleetSummary {
    /// Summarise a dispatched fleet against the estimates that produced it.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::TotalOverflow`] if a vehicle's load overflows.
    pub fn new(fleet: &Fleet, estimates: &[DeliveryEstimate]) -> Result<Self, ReportError> {
        let mut carried: FxHashMap<VehicleId, (SmallVec<[String; 4]>, Decimal)> =
            FxHashMap::default();

        for estimate in estimates {
            let (packages, weight) = carried.entry(estimate.vehicle_id).or_default();
            packages.push(estimate.package_id.clone());
            *weight = weight
                .checked_add(estimate.weight)
                .ok_or(ReportError::TotalOverflow)?;
        }

        let loads = fleet
            .vehicles()
            .iter()
            .map(|vehicle| {
                let (packages, weight) = carried.remove(&vehicle.id()).unwrap_or_default();

                VehicleLoad {
                    vehicle_id: vehicle.id(),
                    packages,
                    weight,
                    available_at: vehicle.available_at(),
                }
            })
            .collect();

        Ok(Self { loads })
    }

    /// Rows in vehicle registration order
    pub fn loads(&self) -> &[VehicleLoad] {
        &self.loads
    }

    /// Writes the summary table.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReportError> {
        if self.loads.is_empty() {
            return Ok(());
        }

        let mut builder = Builder::default();

        builder.push_record(["Vehicle ID", "Packages", "Load", "Free At"]);

        for load in &self.loads {
            builder.push_record([
                load.vehicle_id.to_string(),
                load.packages.join(", "),
                format!("{} kg", load.weight),
                format!("{:.2} hours", round_for_report(load.available_at)),
            ]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(2..4), Alignment::right());

        writeln!(out, "\n{table}")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::GBP;
    use testresult::TestResult;

    use super::*;
    use crate::{
        offers::OfferTable, packages::Package, scheduler::schedule, vehicles::Fleet,
    };

    fn scheduled() -> Result<(Fleet, Vec<DeliveryEstimate>), crate::scheduler::ScheduleError> {
        let mut fleet = Fleet::new();
        fleet.add(Decimal::from(200), Decimal::from(50));
        fleet.add(Decimal::from(200), Decimal::from(50));

        let packages = [
            Package::new("P1", Decimal::from(100), Decimal::from(100)),
            Package::new("P2", Decimal::from(5), Decimal::from(5)),
            Package::new("P3", Decimal::from(60), Decimal::from(20)),
        ];

        let estimates = schedule(
            Decimal::from(100),
            &packages,
            fleet.vehicles_mut(),
            &OfferTable::standard(),
        )?;

        Ok((fleet, estimates))
    }

    #[test]
    fn empty_report_prints_message() -> TestResult {
        let mut out = Vec::new();

        DeliveryReport::new(&[], GBP).write_to(&mut out)?;

        assert_eq!(String::from_utf8(out)?, format!("{EMPTY_STATE_MESSAGE}\n"));

        Ok(())
    }

    #[test]
    fn report_lists_every_package() -> TestResult {
        let (_, estimates) = scheduled()?;
        let mut out = Vec::new();

        DeliveryReport::new(&estimates, GBP).write_to(&mut out)?;

        let rendered = String::from_utf8(out)?;

        for expected in ["P1", "P2", "P3", "OFR001", NO_OFFER, "2.00 hours", "100 kg"] {
            assert!(rendered.contains(expected), "missing {expected} in:\n{rendered}");
        }

        Ok(())
    }

    #[test]
    fn totals_sum_rounded_estimates() -> TestResult {
        let (_, estimates) = scheduled()?;
        let report = DeliveryReport::new(&estimates, GBP);

        // P1: 1600 - 160, P2: 175, P3: 800
        assert_eq!(report.total_discount()?, Decimal::from(160));
        assert_eq!(report.total_cost()?, Decimal::from(2415));

        Ok(())
    }

    #[test]
    fn format_money_rejects_huge_amounts() {
        let result = format_money(Decimal::MAX, GBP);

        assert!(matches!(result, Err(ReportError::AmountOutOfRange(_))));
    }

    #[test]
    fn format_money_rejects_amounts_beyond_minor_units() {
        let amount = Decimal::from(i64::MAX);

        assert!(matches!(
            format_money(amount, GBP),
            Err(ReportError::AmountOutOfRange(value)) if value == amount
        ));
    }

    #[test]
    fn overflowing_totals_are_an_error() -> TestResult {
        let (fleet, estimates) = scheduled()?;
        let huge: Vec<DeliveryEstimate> = estimates
            .into_iter()
            .map(|estimate| DeliveryEstimate {
                discount: Decimal::MAX,
                total_cost: Decimal::MAX,
                weight: Decimal::MAX,
                ..estimate
            })
            .collect();

        let report = DeliveryReport::new(&huge, GBP);

        assert!(matches!(report.total_discount(), Err(ReportError::TotalOverflow)));
        assert!(matches!(report.total_cost(), Err(ReportError::TotalOverflow)));
        assert!(matches!(
            report.write_to(Vec::new()),
            Err(ReportError::AmountOutOfRange(_))
        ));
        assert!(matches!(
            FleetSummary::new(&fleet, &huge),
            Err(ReportError::TotalOverflow)
        ));

        Ok(())
    }

    #[test]
    fn fleet_summary_groups_packages_by_vehicle() -> TestResult {
        let (fleet, estimates) = scheduled()?;
        let summary = FleetSummary::new(&fleet, &estimates)?;

        let first = summary.loads().first().ok_or("expected vehicle 1")?;
        let second = summary.loads().get(1).ok_or("expected vehicle 2")?;

        assert_eq!(first.packages.as_slice(), ["P1".to_string()]);
        assert_eq!(first.available_at, Decimal::from(4));
        assert_eq!(
            second.packages.as_slice(),
            ["P3".to_string(), "P2".to_string()]
        );
        assert_eq!(second.weight, Decimal::from(65));

        let mut out = Vec::new();
        summary.write_to(&mut out)?;
        let rendered = String::from_utf8(out)?;

        assert!(rendered.contains("P3, P2"), "missing packages in:\n{rendered}");
        assert!(rendered.contains("4.00 hours"), "missing free time in:\n{rendered}");

        Ok(())
    }
}
