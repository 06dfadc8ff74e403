//! Stress testing.
//!
//! A scenario moves selected profile fields away from a baseline; the
//! requirement engines are then re-run on the stressed copy and compared with
//! the baseline.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │               Stress Engine                  │
//! ├──────────────────────────────────────────────┤
//! │  mapping   - factor -> profile field table   │
//! │  presets   - default scenarios               │
//! │  engine    - apply, compare, record          │
//! └──────────────────────────────────────────────┘
//! ```

mod engine;
mod mapping;
mod presets;

pub use engine::{
    apply_scenario, record_scenario, run_stress_suite, run_stress_test, worst_case,
    AdditionalRequirements, MetricDelta, StressImpacts, StressResult,
};
pub use mapping::{factor_mapping, FactorMapping, StressTarget};
pub use presets::{default_scenarios, StressPreset};
