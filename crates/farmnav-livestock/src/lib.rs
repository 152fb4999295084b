//! Livestock engine for the Farm Navigator simulation.
//!
//! Drives animal condition over time and the player's care actions. Every
//! function is synchronous and pure over a [`LivestockUnit`] and the shared
//! reference tables; the farm state decides what to commit.
//!
//! # Modules
//!
//! - [`config`] -- Tunable penalties and the per-mode multiplier.
//! - [`health`] -- Daily hunger, health, age and productivity update.
//! - [`produce`] -- Daily product yield and the points it earns.
//! - [`care`] -- Feeding, feed plans and breeding advisories.
//! - [`herd`] -- Daily care log and the herd-wide update.
//! - [`error`] -- Error types for livestock operations.
//!
//! [`LivestockUnit`]: farmnav_types::LivestockUnit

pub mod care;
pub mod config;
pub mod error;
pub mod health;
pub mod herd;
pub mod produce;

pub use care::{BreedingInfo, apply_feeding, breeding_info, feed_recommendations};
pub use config::LivestockConfig;
pub use error::LivestockError;
pub use health::{CareRecord, productivity_for, update_livestock_health};
pub use herd::{DailyCareLog, HerdSummary, update_herd};
pub use produce::{DailyYield, calculate_daily_yield};
