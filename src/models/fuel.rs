//! Bunker fuel types and per-fuel quantities.

use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

/// The two bunker grades a vessel carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FuelType {
    /// Very-low-sulphur fuel oil, burnt by the main engine at sea.
    Vlsfo,
    /// Marine gas oil, burnt by auxiliaries and in port.
    Mgo,
}

impl FuelType {
    /// Both fuel types in a fixed order.
    pub const ALL: [FuelType; 2] = [FuelType::Vlsfo, FuelType::Mgo];
}

/// A value per fuel type: tonnes aboard, tonnes per day, or $ per tonne.
///
/// # Examples
///
/// ```
/// use u_voyage::models::{FuelQuantities, FuelType};
///
/// let rate = FuelQuantities::new(30.0, 2.0);
/// let burnt = rate * 10.0;
/// assert_eq!(burnt.get(FuelType::Vlsfo), 300.0);
/// assert_eq!(burnt.get(FuelType::Mgo), 20.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FuelQuantities {
    pub vlsfo: f64,
    pub mgo: f64,
}

impl FuelQuantities {
    /// Creates a new pair of quantities.
    pub fn new(vlsfo: f64, mgo: f64) -> Self {
        Self { vlsfo, mgo }
    }

    /// Zero for both fuels.
    pub fn zero() -> Self {
        Self::default()
    }

    /// The quantity for a single fuel type.
    pub fn get(&self, fuel: FuelType) -> f64 {
        match fuel {
            FuelType::Vlsfo => self.vlsfo,
            FuelType::Mgo => self.mgo,
        }
    }

    /// Sets the quantity for a single fuel type.
    pub fn set(&mut self, fuel: FuelType, value: f64) {
        match fuel {
            FuelType::Vlsfo => self.vlsfo = value,
            FuelType::Mgo => self.mgo = value,
        }
    }

    /// Element-wise product (e.g. tonnes × price).
    pub fn product(&self, other: &FuelQuantities) -> FuelQuantities {
        FuelQuantities::new(self.vlsfo * other.vlsfo, self.mgo * other.mgo)
    }

    /// Sum across both fuels.
    pub fn total(&self) -> f64 {
        self.vlsfo + self.mgo
    }

    /// Element-wise `max(self - other, 0)`.
    pub fn shortfall_against(&self, available: &FuelQuantities) -> FuelQuantities {
        FuelQuantities::new(
            (self.vlsfo - available.vlsfo).max(0.0),
            (self.mgo - available.mgo).max(0.0),
        )
    }

    /// Returns `true` if both values are finite and non-negative.
    pub fn is_valid(&self) -> bool {
        self.vlsfo.is_finite() && self.mgo.is_finite() && self.vlsfo >= 0.0 && self.mgo >= 0.0
    }
}

impl Add for FuelQuantities {
    type Output = FuelQuantities;

    fn add(self, rhs: FuelQuantities) -> FuelQuantities {
        FuelQuantities::new(self.vlsfo + rhs.vlsfo, self.mgo + rhs.mgo)
    }
}

impl Sub for FuelQuantities {
    type Output = FuelQuantities;

    fn sub(self, rhs: FuelQuantities) -> FuelQuantities {
        FuelQuantities::new(self.vlsfo - rhs.vlsfo, self.mgo - rhs.mgo)
    }
}

impl Mul<f64> for FuelQuantities {
    type Output = FuelQuantities;

    fn mul(self, rhs: f64) -> FuelQuantities {
        FuelQuantities::new(self.vlsfo * rhs, self.mgo * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set() {
        let mut q = FuelQuantities::zero();
        q.set(FuelType::Mgo, 12.5);
        assert_eq!(q.get(FuelType::Mgo), 12.5);
        assert_eq!(q.get(FuelType::Vlsfo), 0.0);
    }

    #[test]
    fn test_shortfall() {
        let burn = FuelQuantities::new(900.0, 40.0);
        let rob = FuelQuantities::new(600.0, 80.0);
        let short = burn.shortfall_against(&rob);
        assert_eq!(short, FuelQuantities::new(300.0, 0.0));
    }

    #[test]
    fn test_product_and_total() {
        let tonnes = FuelQuantities::new(100.0, 10.0);
        let prices = FuelQuantities::new(500.0, 800.0);
        assert_eq!(tonnes.product(&prices).total(), 58_000.0);
    }

    #[test]
    fn test_is_valid() {
        assert!(FuelQuantities::new(0.0, 1.0).is_valid());
        assert!(!FuelQuantities::new(-1.0, 1.0).is_valid());
        assert!(!FuelQuantities::new(f64::NAN, 1.0).is_valid());
    }
}
