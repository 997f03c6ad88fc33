//! Offer Fixtures

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{fixtures::FixtureError, offers::Offer};

/// Offer entry in a scenario file
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OfferFixture {
    /// Offer code (e.g. `OFR001`)
    pub code: String,

    /// Discount in percent points (e.g. `10` for 10%)
    pub discount_percent: Decimal,

    /// Inclusive `[min, max]` weight band in kg
    pub weight: (Decimal, Decimal),

    /// Inclusive `[min, max]` distance band in km
    pub distance: (Decimal, Decimal),
}

impl TryFrom<OfferFixture> for Offer {
    type Error = FixtureError;

    fn try_from(fixture: OfferFixture) -> Result<Self, Self::Error> {
        if fixture.discount_percent < Decimal::ZERO
            || fixture.discount_percent > Decimal::ONE_HUNDRED
        {
            return Err(FixtureError::InvalidDiscount(
                fixture.code,
                fixture.discount_percent,
            ));
        }

        for (field, (min, max)) in [("weight", fixture.weight), ("distance", fixture.distance)] {
            if min > max {
                return Err(FixtureError::InvalidRange {
                    code: fixture.code,
                    field,
                    min,
                    max,
                });
            }
        }

        let (min_weight, max_weight) = fixture.weight;
        let (min_distance, max_distance) = fixture.distance;

        Ok(Offer::new(
            fixture.code,
            fixture.discount_percent,
            min_weight..=max_weight,
            min_distance..=max_distance,
        ))
    }
}
