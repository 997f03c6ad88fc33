//! Fixtures
//!
//! YAML scenario files describing a session: base cost, currency, packages,
//! vehicles and optionally a custom offer table.

use std::{
    fs,
    path::{Path, PathBuf},
};

use rust_decimal::Decimal;
use rusty_money::iso::{Currency, EUR, GBP, INR, USD};
use serde::Deserialize;
use thiserror::Error;

use crate::{
    fixtures::offers::OfferFixture,
    offers::{Offer, OfferTable},
    packages::Package,
    pricing::DEFAULT_BASE_COST,
    session::CourierSession,
};

pub mod offers;

/// Default fixture directory, relative to the working directory
pub const DEFAULT_BASE_PATH: &str = "./fixtures";

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// A range whose minimum is above its maximum
    #[error("Invalid {field} range for offer {code}: {min} > {max}")]
    InvalidRange {
        /// Offer code
        code: String,
        /// `weight` or `distance`
        field: &'static str,
        /// Lower bound
        min: Decimal,
        /// Upper bound
        max: Decimal,
    },

    /// Discount outside 0..=100 percent
    #[error("Invalid discount for offer {0}: {1}% is outside 0..=100")]
    InvalidDiscount(String, Decimal),
}

/// Scenario file layout
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioFixture {
    /// Base delivery cost
    #[serde(default = "default_base_cost")]
    pub base_cost: Decimal,

    /// ISO currency code used when rendering money
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Packages, in the order they are added
    #[serde(default)]
    pub packages: Vec<PackageFixture>,

    /// Vehicles, in registration order
    #[serde(default)]
    pub vehicles: Vec<VehicleFixture>,

    /// Offer table; the standard offers when omitted
    #[serde(default)]
    pub offers: Option<Vec<OfferFixture>>,
}

/// Package entry
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackageFixture {
    /// Package identifier
    pub id: String,

    /// Weight in kg
    pub weight: Decimal,

    /// Distance in km
    pub distance: Decimal,
}

/// Vehicle entry; ids are assigned on registration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VehicleFixture {
    /// Maximum load in kg
    pub max_weight: Decimal,

    /// Speed in km/h
    pub speed: Decimal,
}

fn default_base_cost() -> Decimal {
    DEFAULT_BASE_COST
}

fn default_currency() -> String {
    "GBP".to_string()
}

/// A loaded and validated scenario
#[derive(Debug)]
pub struct Fixture {
    base_cost: Decimal,
    currency: &'static Currency,
    packages: Vec<Package>,
    vehicles: Vec<(Decimal, Decimal)>,
    offers: OfferTable,
}

impl Fixture {
    /// Load a scenario from a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, names an unknown
    /// currency, or contains an invalid offer.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml(&contents)
    }

    /// Load a named scenario from `fixtures/scenarios/{name}.yml`
    ///
    /// # Errors
    ///
    /// Returns an error if the scenario cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        Self::load(scenario_path(DEFAULT_BASE_PATH, name))
    }

    /// Parse a scenario from YAML text
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed, names an unknown currency, or
    /// contains an invalid offer.
    pub fn from_yaml(yaml: &str) -> Result<Self, FixtureError> {
        let fixture: ScenarioFixture = serde_norway::from_str(yaml)?;

        fixture.try_into()
    }

    /// Base delivery cost
    pub fn base_cost(&self) -> Decimal {
        self.base_cost
    }

    /// Currency used when rendering money
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Packages in file order
    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    /// Offer table
    pub fn offers(&self) -> &OfferTable {
        &self.offers
    }

    /// Build a session, adding packages and vehicles one at a time.
    pub fn session(&self) -> CourierSession {
        let mut session = CourierSession::new(self.offers.clone());
        session.set_base_cost(self.base_cost);

        for package in &self.packages {
            session.add_package(package.clone());
        }

        for &(max_weight, speed) in &self.vehicles {
            session.add_vehicle(max_weight, speed);
        }

        session
    }
}

impl TryFrom<ScenarioFixture> for Fixture {
    type Error = FixtureError;

    fn try_from(fixture: ScenarioFixture) -> Result<Self, Self::Error> {
        let currency = parse_currency(&fixture.currency)?;

        let offers = match fixture.offers {
            Some(offers) => OfferTable::new(
                offers
                    .into_iter()
                    .map(TryInto::try_into)
                    .collect::<Result<Vec<Offer>, FixtureError>>()?,
            ),
            None => OfferTable::standard(),
        };

        let packages = fixture
            .packages
            .into_iter()
            .map(|p| Package::new(p.id, p.weight, p.distance))
            .collect();

        let vehicles = fixture
            .vehicles
            .into_iter()
            .map(|v| (v.max_weight, v.speed))
            .collect();

        Ok(Fixture {
            base_cost: fixture.base_cost,
            currency,
            packages,
            vehicles,
            offers,
        })
    }
}

/// Path of a named scenario under a fixture directory
pub fn scenario_path(base_path: impl Into<PathBuf>, name: &str) -> PathBuf {
    base_path
        .into()
        .join("scenarios")
        .join(format!("{name}.yml"))
}

/// Parse a supported ISO currency code
///
/// # Errors
///
/// Returns [`FixtureError::UnknownCurrency`] for codes other than GBP, USD, EUR
/// and INR.
pub fn parse_currency(code: &str) -> Result<&'static Currency, FixtureError> {
    match code.trim().to_ascii_uppercase().as_str() {
        "GBP" => Ok(GBP),
        "USD" => Ok(USD),
        "EUR" => Ok(EUR),
        "INR" => Ok(INR),
        _ => Err(FixtureError::UnknownCurrency(code.to_string())),
    }
}
