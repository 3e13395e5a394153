//! # u-voyage
//!
//! Voyage economics and fleet assignment library for dry bulk chartering:
//! laycan feasibility, bunker and hire cost accounting, exact portfolio
//! optimization, scenario sweeps and port delay prediction.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Vessel, Cargo, VoyageResult, PortfolioResult)
//! - [`reference`] — Distances, consumption profiles, bunker prices and the fleet dataset
//! - [`calculator`] — Per-voyage timing, fuel, revenue and cost breakdown
//! - [`optimizer`] — Exact profit-maximizing vessel-cargo assignment (Hungarian method)
//! - [`scenario`] — Bunker price and port delay sweeps, tipping points
//! - [`prediction`] — Port delay regression model and congestion bands
//! - [`chat`] — Cancellable streamed chat over the cached results
//! - [`service`] — Long-lived facade over an atomically swapped fleet snapshot
//! - [`settings`], [`logging`], [`error`] — Configuration, tracing setup and error taxonomy

pub mod calculator;
pub mod chat;
pub mod error;
pub mod logging;
pub mod models;
pub mod optimizer;
pub mod prediction;
pub mod reference;
pub mod scenario;
pub mod service;
pub mod settings;

pub use error::{Result, VoyageError};
