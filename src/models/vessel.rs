//! Vessel type with speed, hire and bunker parameters.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::FuelQuantities;

/// Speed setting used for both sea legs of a voyage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeedMode {
    /// Full service speed.
    Normal,
    /// Reduced speed trading transit time for lower fuel burn.
    #[default]
    Eco,
}

impl SpeedMode {
    /// Maps the wire flag `use_eco_speed` to a speed mode.
    pub fn from_eco_flag(use_eco: bool) -> Self {
        if use_eco {
            SpeedMode::Eco
        } else {
            SpeedMode::Normal
        }
    }
}

impl std::fmt::Display for SpeedMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpeedMode::Normal => f.write_str("normal"),
            SpeedMode::Eco => f.write_str("eco"),
        }
    }
}

/// A sea leg of a voyage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Leg {
    /// Unloaded transit from the vessel's position to the load port.
    Ballast,
    /// Loaded transit from the load port to the discharge port.
    Laden,
}

/// Speeds in knots for each leg and speed mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedProfile {
    #[serde(rename = "speed_laden")]
    pub laden: f64,
    #[serde(rename = "speed_laden_eco")]
    pub laden_eco: f64,
    #[serde(rename = "speed_ballast")]
    pub ballast: f64,
    #[serde(rename = "speed_ballast_eco")]
    pub ballast_eco: f64,
}

impl SpeedProfile {
    /// Creates a profile from the four speed variants.
    pub fn new(laden: f64, laden_eco: f64, ballast: f64, ballast_eco: f64) -> Self {
        Self {
            laden,
            laden_eco,
            ballast,
            ballast_eco,
        }
    }

    /// Speed in knots for the given leg and mode.
    pub fn speed(&self, leg: Leg, mode: SpeedMode) -> f64 {
        match (leg, mode) {
            (Leg::Laden, SpeedMode::Normal) => self.laden,
            (Leg::Laden, SpeedMode::Eco) => self.laden_eco,
            (Leg::Ballast, SpeedMode::Normal) => self.ballast,
            (Leg::Ballast, SpeedMode::Eco) => self.ballast_eco,
        }
    }

    /// Returns `true` if every speed is finite and strictly positive.
    pub fn is_valid(&self) -> bool {
        [self.laden, self.laden_eco, self.ballast, self.ballast_eco]
            .iter()
            .all(|s| s.is_finite() && *s > 0.0)
    }
}

/// A vessel available to the fleet.
///
/// Immutable once loaded; the name is the vessel's identity.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use u_voyage::models::{Leg, SpeedMode, SpeedProfile, Vessel};
///
/// let etd = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
/// let v = Vessel::new("Ann Bell", 180_000, 11_750.0, SpeedProfile::new(13.5, 12.0, 14.5, 12.5), "Qingdao", etd)
///     .with_bunkers_rob(400.0, 60.0);
/// assert_eq!(v.name(), "Ann Bell");
/// assert_eq!(v.speeds().speed(Leg::Laden, SpeedMode::Eco), 12.0);
/// assert_eq!(v.bunkers_rob().mgo, 60.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vessel {
    name: String,
    dwt: u32,
    hire_rate: f64,
    #[serde(flatten)]
    speeds: SpeedProfile,
    current_port: String,
    etd: NaiveDate,
    #[serde(default)]
    bunker_rob_vlsfo: f64,
    #[serde(default)]
    bunker_rob_mgo: f64,
    #[serde(default)]
    is_owned: bool,
}

impl Vessel {
    /// Creates a vessel with no bunkers aboard that is not owned by the fleet operator.
    pub fn new(
        name: impl Into<String>,
        dwt: u32,
        hire_rate: f64,
        speeds: SpeedProfile,
        current_port: impl Into<String>,
        etd: NaiveDate,
    ) -> Self {
        Self {
            name: name.into(),
            dwt,
            hire_rate,
            speeds,
            current_port: current_port.into(),
            etd,
            bunker_rob_vlsfo: 0.0,
            bunker_rob_mgo: 0.0,
            is_owned: false,
        }
    }

    /// Sets the bunkers remaining on board.
    pub fn with_bunkers_rob(mut self, vlsfo: f64, mgo: f64) -> Self {
        self.bunker_rob_vlsfo = vlsfo;
        self.bunker_rob_mgo = mgo;
        self
    }

    /// Marks the vessel as owned (or long-term chartered) by the operator.
    pub fn with_owned(mut self, owned: bool) -> Self {
        self.is_owned = owned;
        self
    }

    /// Vessel name (identity).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Deadweight tonnage.
    pub fn dwt(&self) -> u32 {
        self.dwt
    }

    /// Daily hire cost in $/day.
    pub fn hire_rate(&self) -> f64 {
        self.hire_rate
    }

    /// Speed profile in knots.
    pub fn speeds(&self) -> &SpeedProfile {
        &self.speeds
    }

    /// Port the vessel is currently at (or will open at).
    pub fn current_port(&self) -> &str {
        &self.current_port
    }

    /// Earliest departure date.
    pub fn etd(&self) -> NaiveDate {
        self.etd
    }

    /// Bunkers remaining on board, in tonnes.
    pub fn bunkers_rob(&self) -> FuelQuantities {
        FuelQuantities::new(self.bunker_rob_vlsfo, self.bunker_rob_mgo)
    }

    /// Whether the vessel belongs to the operator's own fleet.
    pub fn is_owned(&self) -> bool {
        self.is_owned
    }
}
