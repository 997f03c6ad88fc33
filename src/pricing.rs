//! Pricing
//!
//! Delivery cost for a single package: a base cost plus weight and distance
//! surcharges, less the first matching offer.
//!
//! Inputs are not validated. Zero or negative weights and distances are priced
//! with the same formula and can produce costs below the base cost. Only costs
//! that leave the decimal range are rejected.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    offers::{Offer, OfferTable},
    packages::Package,
};

/// Surcharge per kg of package weight.
pub const RATE_PER_KG: Decimal = Decimal::TEN;

/// Surcharge per km of delivery distance.
pub const RATE_PER_KM: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// Default base delivery cost.
pub const DEFAULT_BASE_COST: Decimal = Decimal::ONE_HUNDRED;

/// Errors from pricing a package.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// The cost or discount for a package is out of range.
    #[error("delivery cost for package {0} is out of range")]
    CostOverflow(String),
}

/// Price breakdown for one package, at full precision.
#[derive(Clone, Debug, PartialEq)]
pub struct Quote<'a> {
    /// Cost before any discount
    pub delivery_cost: Decimal,

    /// Amount taken off by the applied offer
    pub discount: Decimal,

    /// Cost after discount
    pub total_cost: Decimal,

    /// The applied offer, if any matched
    pub applied_offer: Option<&'a Offer>,
}

impl Quote<'_> {
    /// Code of the applied offer, if any.
    pub fn offer_code(&self) -> Option<&str> {
        self.applied_offer.map(Offer::code)
    }
}

/// Cost before discount: `base + weight * 10 + distance * 5`.
///
/// Returns `None` if the cost overflows.
pub fn delivery_cost(base_cost: Decimal, package: &Package) -> Option<Decimal> {
    let weight = package.weight().checked_mul(RATE_PER_KG)?;
    let distance = package.distance().checked_mul(RATE_PER_KM)?;

    base_cost.checked_add(weight)?.checked_add(distance)
}

/// Prices a package against the offer table.
///
/// Only the first offer in table order that applies to the package is used.
///
/// # Errors
///
/// Returns [`PricingError::CostOverflow`] if the cost or discount leaves the
/// decimal range.
pub fn price_of<'a>(
    base_cost: Decimal,
    package: &Package,
    offers: &'a OfferTable,
) -> Result<Quote<'a>, PricingError> {
    let overflow = || PricingError::CostOverflow(package.id().to_string());

    let delivery_cost = delivery_cost(base_cost, package).ok_or_else(overflow)?;
    let applied_offer = offers.first_match(package);

    let discount = match applied_offer {
        Some(offer) => offer.discount_on(delivery_cost).ok_or_else(overflow)?,
        None => Decimal::ZERO,
    };

    let total_cost = delivery_cost.checked_sub(discount).ok_or_else(overflow)?;

    Ok(Quote {
        delivery_cost,
        discount,
        total_cost,
        applied_offer,
    })
}
