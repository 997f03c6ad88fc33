//! Courier command line
//!
//! Loads a scenario, schedules its packages onto the fleet and prints the
//! delivery estimates.

use std::io::{self, Write};

use anyhow::{Context, Result};
use tracing::info;

use courier::{
    config::CourierConfig,
    fixtures::{Fixture, parse_currency},
    observability::init_subscriber,
    report::{DeliveryReport, FleetSummary},
};

fn main() -> Result<()> {
    let config = CourierConfig::load().unwrap_or_else(|err| err.exit());

    init_subscriber(&config.logging)?;

    let fixture = match &config.scenario {
        Some(path) => Fixture::load(path)
            .with_context(|| format!("loading scenario {}", path.display()))?,
        None => Fixture::from_set(&config.fixture)
            .with_context(|| format!("loading fixture set {}", config.fixture))?,
    };

    let currency = match config.currency.as_deref() {
        Some(code) => parse_currency(code)?,
        None => fixture.currency(),
    };

    let mut session = fixture.session();

    if let Some(base_cost) = config.base_cost {
        session.set_base_cost(base_cost);
    }

    info!(
        packages = session.packages().len(),
        vehicles = session.vehicles().len(),
        currency = currency.iso_alpha_code,
        "scenario loaded"
    );

    session.calculate()?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    DeliveryReport::new(session.results(), currency).write_to(&mut handle)?;

    if let Some(fleet) = session.dispatched() {
        FleetSummary::new(fleet, session.results())?.write_to(&mut handle)?;
    }

    handle.flush()?;

    Ok(())
}
