//! Dense port-to-port distance table.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One known sea distance, as it appears in a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteDistance {
    pub from: String,
    pub to: String,
    /// Nautical miles.
    pub distance: f64,
}

/// A dense n×n port distance table stored in row-major order.
///
/// Unknown entries are stored as NaN and reported as `None`. A port's
/// distance to itself is always zero.
///
/// # Examples
///
/// ```
/// use u_voyage::reference::PortDistanceTable;
///
/// let mut table = PortDistanceTable::new();
/// table.set_symmetric("Kamsar", "Qingdao", 11_124.0);
/// assert_eq!(table.get("Qingdao", "Kamsar"), Some(11_124.0));
/// assert_eq!(table.get("Kamsar", "Kamsar"), Some(0.0));
/// assert_eq!(table.get("Kamsar", "Rotterdam"), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PortDistanceTable {
    ports: Vec<String>,
    index: HashMap<String, usize>,
    data: Vec<f64>,
}

impl PortDistanceTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from explicit route distances.
    ///
    /// Each entry is mirrored to the reverse direction unless the reverse
    /// direction is listed explicitly as well.
    pub fn from_routes(routes: &[RouteDistance]) -> Self {
        let mut table = Self::new();
        for r in routes {
            table.set(&r.from, &r.to, r.distance);
        }
        for r in routes {
            if table.get(&r.to, &r.from).is_none() {
                table.set(&r.to, &r.from, r.distance);
            }
        }
        table
    }

    fn ensure_port(&mut self, port: &str) -> usize {
        if let Some(&i) = self.index.get(port) {
            return i;
        }
        let old = self.ports.len();
        let size = old + 1;
        let mut data = vec![f64::NAN; size * size];
        for i in 0..old {
            for j in 0..old {
                data[i * size + j] = self.data[i * old + j];
            }
        }
        self.data = data;
        self.ports.push(port.to_string());
        self.index.insert(port.to_string(), old);
        old
    }

    /// Sets the distance from `from` to `to`, registering unseen ports.
    pub fn set(&mut self, from: &str, to: &str, distance: f64) {
        let i = self.ensure_port(from);
        let j = self.ensure_port(to);
        let size = self.ports.len();
        self.data[i * size + j] = distance;
    }

    /// Sets the distance in both directions.
    pub fn set_symmetric(&mut self, a: &str, b: &str, distance: f64) {
        self.set(a, b, distance);
        self.set(b, a, distance);
    }

    /// Returns the distance from `from` to `to`, if known.
    pub fn get(&self, from: &str, to: &str) -> Option<f64> {
        if from == to {
            return Some(0.0);
        }
        let i = *self.index.get(from)?;
        let j = *self.index.get(to)?;
        let d = self.data[i * self.ports.len() + j];
        if d.is_nan() {
            None
        } else {
            Some(d)
        }
    }

    /// Number of ports in this table.
    pub fn size(&self) -> usize {
        self.ports.len()
    }

    /// Port names in registration order.
    pub fn ports(&self) -> &[String] {
        &self.ports
    }

    /// Returns `true` if every known pair matches its reverse within `tol`.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        let n = self.ports.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let a = self.data[i * n + j];
                let b = self.data[j * n + i];
                if a.is_nan() != b.is_nan() {
                    return false;
                }
                if !a.is_nan() && (a - b).abs() > tol {
                    return false;
                }
            }
        }
        true
    }
}
