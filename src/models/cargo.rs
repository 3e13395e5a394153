//! Cargo lot and laycan types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Fractional days from `from` to `to`, both taken at midnight.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> f64 {
    (to - from).num_days() as f64
}

/// The calendar date `days` after `start`, truncating any part-day.
///
/// Returns `None` if `days` is negative, not finite, or lands beyond the
/// representable calendar.
pub fn date_after(start: NaiveDate, days: f64) -> Option<NaiveDate> {
    // absorb float noise such as 8.999999999 before truncating
    let whole = (days + 1e-9).floor();
    if !whole.is_finite() || whole < 0.0 || whole > u32::MAX as f64 {
        return None;
    }
    start.checked_add_days(chrono::Days::new(whole as u64))
}

/// The window within which loading must commence.
///
/// A vessel may arrive before `start` (it waits) but must arrive no later
/// than `end`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use u_voyage::models::Laycan;
///
/// let d = |day| NaiveDate::from_ymd_opt(2026, 1, day).unwrap();
/// let laycan = Laycan::new(d(10), d(20)).unwrap();
/// assert!(laycan.contains(d(15)));
/// assert!(!laycan.contains(d(21)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Laycan {
    #[serde(rename = "laycan_start")]
    start: NaiveDate,
    #[serde(rename = "laycan_end")]
    end: NaiveDate,
}

impl Laycan {
    /// Creates a new laycan.
    ///
    /// Returns `None` if `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        if start > end {
            return None;
        }
        Some(Self { start, end })
    }

    /// First day loading may commence.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day loading may commence.
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Returns `true` if `start <= end`.
    pub fn is_valid(&self) -> bool {
        self.start <= self.end
    }

    /// Returns `true` if the given date falls within this laycan.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// A cargo lot offered for carriage.
///
/// Immutable once loaded; the name is the cargo's identity.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use u_voyage::models::{Cargo, Laycan};
///
/// let d = |day| NaiveDate::from_ymd_opt(2026, 1, day).unwrap();
/// let cargo = Cargo::new("EGA Bauxite", "Kamsar", "Qingdao", 180_000, 23.0)
///     .with_laycan(Laycan::new(d(10), d(20)).unwrap())
///     .with_rates(30_000.0, 25_000.0);
/// assert_eq!(cargo.quantity(), 180_000);
/// assert_eq!(cargo.laycan().end(), d(20));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cargo {
    name: String,
    #[serde(default)]
    customer: String,
    #[serde(default)]
    commodity: String,
    quantity: u32,
    #[serde(default)]
    quantity_tolerance: f64,
    #[serde(flatten)]
    laycan: Laycan,
    freight_rate: f64,
    load_port: String,
    discharge_port: String,
    load_rate: f64,
    discharge_rate: f64,
    #[serde(default)]
    port_cost_load: f64,
    #[serde(default)]
    port_cost_discharge: f64,
    #[serde(default)]
    commission: f64,
    #[serde(default)]
    is_owned: bool,
}

impl Cargo {
    /// Creates a cargo with a single-day laycan on the Unix epoch, unit
    /// handling rates, no port costs and no commission.
    ///
    /// Use the `with_*` builders to fill in the commercial terms.
    pub fn new(
        name: impl Into<String>,
        load_port: impl Into<String>,
        discharge_port: impl Into<String>,
        quantity: u32,
        freight_rate: f64,
    ) -> Self {
        let epoch = NaiveDate::default();
        Self {
            name: name.into(),
            customer: String::new(),
            commodity: String::new(),
            quantity,
            quantity_tolerance: 0.0,
            laycan: Laycan {
                start: epoch,
                end: epoch,
            },
            freight_rate,
            load_port: load_port.into(),
            discharge_port: discharge_port.into(),
            load_rate: 1.0,
            discharge_rate: 1.0,
            port_cost_load: 0.0,
            port_cost_discharge: 0.0,
            commission: 0.0,
            is_owned: false,
        }
    }

    /// Sets the customer and commodity descriptions.
    pub fn with_parties(mut self, customer: impl Into<String>, commodity: impl Into<String>) -> Self {
        self.customer = customer.into();
        self.commodity = commodity.into();
        self
    }

    /// Sets the allowed quantity tolerance fraction (e.g. 0.1 for ±10%).
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.quantity_tolerance = tolerance;
        self
    }

    /// Sets the laycan.
    pub fn with_laycan(mut self, laycan: Laycan) -> Self {
        self.laycan = laycan;
        self
    }

    /// Sets load and discharge throughput in tonnes per day.
    pub fn with_rates(mut self, load_rate: f64, discharge_rate: f64) -> Self {
        self.load_rate = load_rate;
        self.discharge_rate = discharge_rate;
        self
    }

    /// Sets fixed port costs at the load and discharge ports.
    pub fn with_port_costs(mut self, load: f64, discharge: f64) -> Self {
        self.port_cost_load = load;
        self.port_cost_discharge = discharge;
        self
    }

    /// Sets the brokerage commission fraction.
    pub fn with_commission(mut self, commission: f64) -> Self {
        self.commission = commission;
        self
    }

    /// Marks the cargo as an operator-committed cargo.
    pub fn with_owned(mut self, owned: bool) -> Self {
        self.is_owned = owned;
        self
    }

    /// Cargo name (identity).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Customer (charterer) name.
    pub fn customer(&self) -> &str {
        &self.customer
    }

    /// Commodity carried.
    pub fn commodity(&self) -> &str {
        &self.commodity
    }

    /// Nominal quantity in tonnes.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Allowed quantity tolerance fraction.
    pub fn quantity_tolerance(&self) -> f64 {
        self.quantity_tolerance
    }

    /// Lowest and highest acceptable quantity under the tolerance.
    pub fn quantity_bounds(&self) -> (f64, f64) {
        let q = self.quantity as f64;
        (q * (1.0 - self.quantity_tolerance), q * (1.0 + self.quantity_tolerance))
    }

    /// Loading window.
    pub fn laycan(&self) -> &Laycan {
        &self.laycan
    }

    /// Freight rate in $/tonne.
    pub fn freight_rate(&self) -> f64 {
        self.freight_rate
    }

    /// Load port name.
    pub fn load_port(&self) -> &str {
        &self.load_port
    }

    /// Discharge port name.
    pub fn discharge_port(&self) -> &str {
        &self.discharge_port
    }

    /// Load throughput in tonnes per day.
    pub fn load_rate(&self) -> f64 {
        self.load_rate
    }

    /// Discharge throughput in tonnes per day.
    pub fn discharge_rate(&self) -> f64 {
        self.discharge_rate
    }

    /// Fixed port cost at the load port.
    pub fn port_cost_load(&self) -> f64 {
        self.port_cost_load
    }

    /// Fixed port cost at the discharge port.
    pub fn port_cost_discharge(&self) -> f64 {
        self.port_cost_discharge
    }

    /// Commission fraction of gross freight.
    pub fn commission(&self) -> f64 {
        self.commission
    }

    /// Whether the cargo is an operator-committed cargo.
    pub fn is_owned(&self) -> bool {
        self.is_owned
    }
}
