//! Vehicles

use std::fmt;

use rust_decimal::Decimal;

/// Vehicle identifier, assigned sequentially from 1 in registration order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VehicleId(u32);

impl VehicleId {
    /// Wraps a raw identifier.
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A delivery vehicle and its simulated clock.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Vehicle {
    id: VehicleId,
    max_weight: Decimal,
    speed: Decimal,
    available_at: Decimal,
}

impl Vehicle {
    /// Creates a vehicle that is free from time zero.
    pub fn new(id: VehicleId, max_weight: Decimal, speed: Decimal) -> Self {
        Self {
            id,
            max_weight,
            speed,
            available_at: Decimal::ZERO,
        }
    }

    /// Returns the vehicle id
    pub fn id(&self) -> VehicleId {
        self.id
    }

    /// Maximum load in kg
    pub fn max_weight(&self) -> Decimal {
        self.max_weight
    }

    /// Speed in km/h
    pub fn speed(&self) -> Decimal {
        self.speed
    }

    /// Time in hours at which the vehicle is free for its next assignment.
    pub fn available_at(&self) -> Decimal {
        self.available_at
    }

    /// Whether the package weight is within this vehicle's capacity.
    pub fn can_carry(&self, weight: Decimal) -> bool {
        self.max_weight >= weight
    }

    pub(crate) fn set_available_at(&mut self, available_at: Decimal) {
        self.available_at = available_at;
    }
}

/// Picks the vehicle for a package of the given weight.
///
/// Prefers the earliest-free vehicle that can carry the weight and falls back
/// to the earliest-free vehicle overall. Ties go to the vehicle registered
/// first. Returns the index into `vehicles` and whether the pick is within
/// capacity, or `None` when there are no vehicles.
pub fn select_vehicle(vehicles: &[Vehicle], weight: Decimal) -> Option<(usize, bool)> {
    let earliest_capable = vehicles
        .iter()
        .enumerate()
        .filter(|(_, vehicle)| vehicle.can_carry(weight))
        .min_by_key(|(_, vehicle)| vehicle.available_at());

    if let Some((idx, _)) = earliest_capable {
        return Some((idx, true));
    }

    vehicles
        .iter()
        .enumerate()
        .min_by_key(|(_, vehicle)| vehicle.available_at())
        .map(|(idx, _)| (idx, false))
}

/// Registered vehicles together with the id counter.
#[derive(Clone, Debug)]
pub struct Fleet {
    vehicles: Vec<Vehicle>,
    next_id: u32,
}

impl Default for Fleet {
    fn default() -> Self {
        Self::new()
    }
}

impl Fleet {
    /// Creates an empty fleet whose first vehicle will be id 1.
    pub fn new() -> Self {
        Self {
            vehicles: Vec::new(),
            next_id: 1,
        }
    }

    /// Registers a vehicle and returns its id.
    ///
    /// Ids come from a counter, not the number of vehicles held.
    pub fn add(&mut self, max_weight: Decimal, speed: Decimal) -> VehicleId {
        let id = VehicleId(self.next_id);
        self.next_id = self.next_id.saturating_add(1);

        self.vehicles.push(Vehicle::new(id, max_weight, speed));

        id
    }

    /// Removes every vehicle and restarts ids at 1.
    pub fn clear(&mut self) {
        self.vehicles.clear();
        self.next_id = 1;
    }

    /// Looks up a vehicle by id.
    pub fn get(&self, id: VehicleId) -> Option<&Vehicle> {
        self.vehicles.iter().find(|vehicle| vehicle.id() == id)
    }

    /// Vehicles in registration order.
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// Vehicles in registration order, mutably.
    pub fn vehicles_mut(&mut self) -> &mut [Vehicle] {
        &mut self.vehicles
    }

    /// Number of registered vehicles.
    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    /// Check if no vehicles are registered.
    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn vehicle(id: u32, max_weight: i64, available_at: i64) -> Vehicle {
        let mut vehicle = Vehicle::new(VehicleId(id), Decimal::from(max_weight), Decimal::from(70));
        vehicle.set_available_at(Decimal::from(available_at));
        vehicle
    }

    #[test]
    fn new_vehicle_is_free_at_zero() {
        let vehicle = Vehicle::new(VehicleId(1), Decimal::from(200), Decimal::from(70));

        assert_eq!(vehicle.available_at(), Decimal::ZERO);
        assert!(vehicle.can_carry(Decimal::from(200)));
        assert!(!vehicle.can_carry(Decimal::from(201)));
    }

    #[test]
    fn fleet_assigns_sequential_ids() {
        let mut fleet = Fleet::new();

        let first = fleet.add(Decimal::from(200), Decimal::from(70));
        let second = fleet.add(Decimal::from(150), Decimal::from(60));

        assert_eq!(first, VehicleId(1));
        assert_eq!(second, VehicleId(2));
        assert_eq!(fleet.len(), 2);
    }

    #[test]
    fn fleet_clear_restarts_ids() {
        let mut fleet = Fleet::new();
        fleet.add(Decimal::from(200), Decimal::from(70));
        fleet.add(Decimal::from(200), Decimal::from(70));

        fleet.clear();

        assert!(fleet.is_empty());
        assert_eq!(fleet.add(Decimal::from(100), Decimal::from(50)), VehicleId(1));
    }

    #[test]
    fn fleet_get_finds_vehicle_by_id() -> TestResult {
        let mut fleet = Fleet::new();
        fleet.add(Decimal::from(200), Decimal::from(70));
        let id = fleet.add(Decimal::from(120), Decimal::from(40));

        let vehicle = fleet.get(id).ok_or("expected vehicle 2")?;

        assert_eq!(vehicle.max_weight(), Decimal::from(120));
        assert!(fleet.get(VehicleId(9)).is_none());

        Ok(())
    }

    #[test]
    fn select_prefers_earliest_capable_vehicle() {
        let vehicles = [vehicle(1, 100, 0), vehicle(2, 300, 5), vehicle(3, 300, 2)];

        assert_eq!(select_vehicle(&vehicles, Decimal::from(150)), Some((2, true)));
    }

    #[test]
    fn select_breaks_ties_by_registration_order() {
        let vehicles = [vehicle(1, 200, 3), vehicle(2, 200, 3)];

        assert_eq!(select_vehicle(&vehicles, Decimal::from(50)), Some((0, true)));
    }

    #[test]
    fn select_falls_back_when_nothing_can_carry() {
        let vehicles = [vehicle(1, 100, 4), vehicle(2, 100, 1)];

        assert_eq!(select_vehicle(&vehicles, Decimal::from(500)), Some((1, false)));
    }

    #[test]
    fn select_returns_none_without_vehicles() {
        assert_eq!(select_vehicle(&[], Decimal::from(10)), None);
    }
}
