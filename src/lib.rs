//! Courier
//!
//! Courier estimates delivery costs and delivery times for packages carried by
//! a small vehicle fleet, applying first-match promotional offers.

pub mod config;
pub mod fixtures;
pub mod observability;
pub mod offers;
pub mod packages;
pub mod prelude;
pub mod pricing;
pub mod report;
pub mod scheduler;
pub mod session;
pub mod vehicles;
