//! Offers
//!
//! Discount rules matched on package weight and distance. An offer table is
//! evaluated in order and the first matching offer wins.

use std::ops::RangeInclusive;

use decimal_percentage::Percentage;
use rust_decimal::Decimal;

use crate::packages::Package;

/// A percentage discount for packages within a weight and distance band.
#[derive(Clone, Debug, PartialEq)]
pub struct Offer {
    code: String,
    discount: Percentage,
    weight: RangeInclusive<Decimal>,
    distance: RangeInclusive<Decimal>,
}

impl Offer {
    /// Create a new offer.
    ///
    /// `discount_percent` is in percent points, so `10` means 10% off.
    pub fn new(
        code: impl Into<String>,
        discount_percent: Decimal,
        weight: RangeInclusive<Decimal>,
        distance: RangeInclusive<Decimal>,
    ) -> Self {
        Self {
            code: code.into(),
            discount: Percentage::from(discount_percent / Decimal::ONE_HUNDRED),
            weight,
            distance,
        }
    }

    /// Returns the offer code
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Returns the discount as a fraction of the delivery cost
    pub fn discount(&self) -> Percentage {
        self.discount
    }

    /// Returns the discount in percent points (e.g. `10` for 10%)
    pub fn discount_percent(&self) -> Decimal {
        (self.discount * Decimal::ONE) * Decimal::ONE_HUNDRED
    }

    /// Inclusive weight band in kg
    pub fn weight_range(&self) -> &RangeInclusive<Decimal> {
        &self.weight
    }

    /// Inclusive distance band in km
    pub fn distance_range(&self) -> &RangeInclusive<Decimal> {
        &self.distance
    }

    /// Whether both the package weight and distance fall inside this offer's bands.
    pub fn applies_to(&self, package: &Package) -> bool {
        self.weight.contains(&package.weight()) && self.distance.contains(&package.distance())
    }

    /// Discount amount for the given delivery cost, or `None` if it overflows.
    pub fn discount_on(&self, delivery_cost: Decimal) -> Option<Decimal> {
        (self.discount * Decimal::ONE).checked_mul(delivery_cost)
    }
}

/// An ordered set of offers.
#[derive(Clone, Debug, Default)]
pub struct OfferTable {
    offers: Vec<Offer>,
}

impl OfferTable {
    /// Create a table, evaluated in the order given.
    pub fn new(offers: impl Into<Vec<Offer>>) -> Self {
        Self {
            offers: offers.into(),
        }
    }

    /// The standard OFR001, OFR002 and OFR003 offers.
    pub fn standard() -> Self {
        Self::new([
            Offer::new(
                "OFR001",
                Decimal::from(10),
                Decimal::from(70)..=Decimal::from(200),
                Decimal::ZERO..=Decimal::from(200),
            ),
            Offer::new(
                "OFR002",
                Decimal::from(7),
                Decimal::from(100)..=Decimal::from(250),
                Decimal::from(50)..=Decimal::from(150),
            ),
            Offer::new(
                "OFR003",
                Decimal::from(5),
                Decimal::from(10)..=Decimal::from(150),
                Decimal::from(50)..=Decimal::from(250),
            ),
        ])
    }

    /// Returns the first offer in table order that applies to the package.
    pub fn first_match(&self, package: &Package) -> Option<&Offer> {
        self.offers.iter().find(|offer| offer.applies_to(package))
    }

    /// Looks up an offer by code.
    pub fn get(&self, code: &str) -> Option<&Offer> {
        self.offers.iter().find(|offer| offer.code() == code)
    }

    /// Iterate offers in evaluation order.
    pub fn iter(&self) -> impl Iterator<Item = &Offer> {
        self.offers.iter()
    }

    /// Number of offers in the table.
    pub fn len(&self) -> usize {
        self.offers.len()
    }

    /// Check if the table has no offers.
    pub fn is_empty(&self) -> bool {
        self.offers.is_empty()
    }
}
