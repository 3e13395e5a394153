//! Domain model types for vessel-cargo voyage planning.
//!
//! Provides the core abstractions: vessels with speed and bunker profiles,
//! cargoes with laycans and commercial terms, the per-voyage economics
//! breakdown, and the portfolio of assignments built from them.

mod cargo;
mod fuel;
mod portfolio;
mod vessel;
mod voyage;

pub use cargo::{date_after, days_between, Cargo, Laycan};
pub use fuel::{FuelQuantities, FuelType};
pub use portfolio::{Assignment, PortfolioResult};
pub use vessel::{Leg, SpeedMode, SpeedProfile, Vessel};
pub use voyage::{DayBreakdown, VoyageParams, VoyageResult};
