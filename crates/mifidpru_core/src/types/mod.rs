//! Shared identifier, money and error types.
//!
//! This module provides:
//! - `ids`: Newtype identifiers for firms, calculations, harms, scenarios and exposures
//! - `money`: GBP display formatting and guarded ratio helpers
//! - `error`: Structured errors for parsing profile enumerations
//!
//! # Re-exports
//!
//! - [`FirmId`], [`CalculationId`], [`HarmId`], [`ScenarioId`], [`ExposureId`] from `ids`
//! - [`format_gbp`], [`format_percent`], [`non_negative`], [`percent_of`] from `money`
//! - [`ProfileError`] from `error`

pub mod error;
pub mod ids;
pub mod money;

pub use error::ProfileError;
pub use ids::{CalculationId, ExposureId, FirmId, HarmId, ScenarioId};
pub use money::{format_gbp, format_percent, non_negative, percent_of};
