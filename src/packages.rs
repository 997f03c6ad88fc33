//! Packages

use std::cmp::Reverse;

use rust_decimal::Decimal;

/// A package awaiting delivery.
///
/// Identifiers are assigned by the caller and are not checked for uniqueness.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Package {
    id: String,
    weight: Decimal,
    distance: Decimal,
}

impl Package {
    /// Creates a new package with a weight in kg and a distance in km.
    pub fn new(id: impl Into<String>, weight: Decimal, distance: Decimal) -> Self {
        Self {
            id: id.into(),
            weight,
            distance,
        }
    }

    /// Returns the package identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the package weight in kg
    pub fn weight(&self) -> Decimal {
        self.weight
    }

    /// Returns the delivery distance in km
    pub fn distance(&self) -> Decimal {
        self.distance
    }
}

/// Returns the packages ordered heaviest first.
///
/// Packages of equal weight keep their relative input order.
pub fn heaviest_first(packages: &[Package]) -> Vec<&Package> {
    let mut ordered: Vec<&Package> = packages.iter().collect();

    ordered.sort_by_key(|package| Reverse(package.weight()));

    ordered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_return_constructor_values() {
        let package = Package::new("PKG1", Decimal::from(50), Decimal::from(30));

        assert_eq!(package.id(), "PKG1");
        assert_eq!(package.weight(), Decimal::from(50));
        assert_eq!(package.distance(), Decimal::from(30));
    }

    #[test]
    fn heaviest_first_sorts_descending() {
        let packages = [
            Package::new("light", Decimal::from(10), Decimal::from(5)),
            Package::new("heavy", Decimal::from(110), Decimal::from(60)),
            Package::new("medium", Decimal::from(75), Decimal::from(125)),
        ];

        let ids: Vec<&str> = heaviest_first(&packages)
            .into_iter()
            .map(Package::id)
            .collect();

        assert_eq!(ids, ["heavy", "medium", "light"]);
    }

    #[test]
    fn heaviest_first_keeps_input_order_for_equal_weights() {
        let packages = [
            Package::new("first", Decimal::from(50), Decimal::from(5)),
            Package::new("heavy", Decimal::from(80), Decimal::from(5)),
            Package::new("second", Decimal::from(50), Decimal::from(10)),
            Package::new("third", Decimal::new(500, 1), Decimal::from(15)),
        ];

        let ids: Vec<&str> = heaviest_first(&packages)
            .into_iter()
            .map(Package::id)
            .collect();

        assert_eq!(ids, ["heavy", "first", "second", "third"]);
    }
}
