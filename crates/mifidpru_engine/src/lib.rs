//! # mifidpru_engine: MIFIDPRU Prudential Calculation Engines
//!
//! ## Calculation Layer Role
//!
//! mifidpru_engine turns a [`FirmProfile`](mifidpru_core::profile::FirmProfile)
//! into prudential requirements and the analyses built on them:
//! - SNI / Non-SNI classification with breached criteria (`classification`)
//! - K-factor, fixed overhead, own funds and liquid assets requirements
//! - The ICARA summary and the full calculation pass (`calculation`)
//! - Harm register totals (`risk_register`)
//! - Concentration risk and K-CON (`concentration`)
//! - Derived-field recompute between passes (`derived`)
//! - Stress testing against a baseline profile (`stress`)
//! - Compliance thresholds, alerts and buffer history (`monitor`)
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────┐
//! │                    FirmProfile                        │
//! └──────────────┬────────────────────────┬───────────────┘
//!                │                        │
//!                ▼                        ▼
//! ┌──────────────────────────┐  ┌──────────────────────────┐
//! │  run_calculation         │  │  recompute_derived       │
//! │  classification          │  │  risk_register totals    │
//! │  kfactor -> FOR          │  │  concentration (K-CON)   │
//! │  own_funds, liquid       │  └──────────────────────────┘
//! │  icara summary           │
//! └────────────┬─────────────┘
//!              ▼
//! ┌──────────────────────────┐  ┌──────────────────────────┐
//! │   CalculationResult      │─▶│  monitor / stress        │
//! └──────────────────────────┘  └──────────────────────────┘
//! ```
//!
//! Every engine is a pure function of its inputs. Derived profile fields are
//! written only by [`derived::recompute_derived`], which returns a new profile.
//!
//! ## Example
//!
//! ```
//! use mifidpru_core::profile::{FirmActivity, FirmProfile};
//! use mifidpru_engine::calculation::run_calculation;
//! use mifidpru_engine::classification::FirmClassification;
//!
//! let mut profile = FirmProfile::default();
//! profile.firm_activity = FirmActivity::HoldingClientMoney;
//! profile.overheads.total_expenditure = 8_000_000.0;
//! profile.overheads.discretionary_bonuses = 2_700_000.0;
//!
//! let result = run_calculation(&profile);
//! assert_eq!(result.firm_classification, FirmClassification::Sni);
//! assert_eq!(result.fixed_overhead_requirement.for_amount, 1_325_000.0);
//! assert_eq!(result.own_funds_requirement.total_own_funds_requirement, 1_325_000.0);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod calculation;
pub mod classification;
pub mod concentration;
pub mod derived;
pub mod error;
pub mod fixed_overhead;
pub mod icara;
pub mod kfactor;
pub mod liquid_assets;
pub mod monitor;
pub mod own_funds;
pub mod risk_register;
pub mod stress;

pub use calculation::{run_calculation, CalculationResult};
pub use classification::{classify, ClassificationOutcome, FirmClassification, SniCriterion};
pub use concentration::{assess_concentration, ConcentrationResult, ExposureAssessment};
pub use derived::recompute_derived;
pub use error::EngineError;
pub use fixed_overhead::{calculate_for, FixedOverheadRequirement};
pub use icara::{summarise_icara, IcaraSummary};
pub use kfactor::{calculate_k_factors, KFactorRequirement};
pub use liquid_assets::{calculate_liquid_assets, LiquidAssetsRequirement};
pub use monitor::{ComplianceMetrics, ComplianceMonitor, ThresholdLevel};
pub use own_funds::{calculate_own_funds, permanent_minimum_requirement, OwnFundsRequirement};
pub use risk_register::{HarmAllowances, RiskRegister};
pub use stress::{run_stress_suite, run_stress_test, StressPreset, StressResult};
