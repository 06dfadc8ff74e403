//! Firm profile and the records attached to it.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                FirmProfile                  │
//! ├─────────────────────────────────────────────┤
//! │  classification  - SNI threshold metrics    │
//! │  k_factors       - K-factor exposures       │
//! │  overheads       - expenditure, deductions  │
//! │  identified_harms - risk register entries   │
//! │  stress_scenarios - scenario definitions    │
//! │  exposures        - concentration inputs    │
//! └─────────────────────────────────────────────┘
//! ```

mod exposure;
mod firm;
mod harm;
mod scenario;
pub mod validation;

pub use exposure::{CounterpartyType, Exposure};
pub use firm::{ClassificationMetrics, FirmActivity, FirmProfile, KFactorInputs, OverheadInputs};
pub use harm::{impact_label, likelihood_label, Harm, HarmCategory, RiskRating, MATERIALITY_THRESHOLD};
pub use scenario::{Impact, StressFactor, StressScenario};
pub use validation::InputCorrection;
