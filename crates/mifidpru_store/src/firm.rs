//! Firm records and saved calculation snapshots.

use chrono::{DateTime, Utc};
use mifidpru_core::profile::FirmProfile;
use mifidpru_core::types::{CalculationId, FirmId};
use mifidpru_engine::{recompute_derived, run_calculation, CalculationResult};
use serde::{Deserialize, Serialize};

/// A saved calculation: the profile as it was and the results it produced.
///
/// Both halves are value copies taken at save time; later edits to the
/// firm's live profile never reach a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Calculation {
    /// Snapshot identifier
    pub id: CalculationId,
    /// User-supplied label
    pub name: String,
    /// When the snapshot was taken
    pub timestamp: DateTime<Utc>,
    /// Profile the results were computed from
    pub input_data: FirmProfile,
    /// Results of the calculation pass
    pub results: CalculationResult,
}

impl Calculation {
    /// Runs a calculation pass over `profile` and captures it as a snapshot.
    ///
    /// Derived fields are refreshed first and the snapshot keeps the
    /// refreshed inputs alongside their results.
    pub fn capture(name: impl Into<String>, profile: &FirmProfile) -> Self {
        let input_data = recompute_derived(profile);
        let results = run_calculation(&input_data);
        Self {
            id: CalculationId::generate(),
            name: name.into(),
            timestamp: Utc::now(),
            input_data,
            results,
        }
    }
}

/// A persisted firm: its live profile and its saved calculations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Firm {
    /// Firm identifier
    pub id: FirmId,
    /// Firm name
    pub name: String,
    /// Creation timestamp
    #[serde(default = "Utc::now")]
    pub created_date: DateTime<Utc>,
    /// Last modification timestamp
    #[serde(default = "Utc::now")]
    pub modified_date: DateTime<Utc>,
    /// Live profile
    pub profile: FirmProfile,
    /// Saved calculations, oldest first
    #[serde(default)]
    pub calculations: Vec<Calculation>,
}

impl Firm {
    /// Creates a firm with a generated identifier.
    pub fn new(name: impl Into<String>, profile: FirmProfile) -> Self {
        let now = Utc::now();
        Self {
            id: FirmId::generate(),
            name: name.into(),
            created_date: now,
            modified_date: now,
            profile,
            calculations: Vec::new(),
        }
    }

    /// Builder: set the identifier.
    pub fn with_id(mut self, id: impl Into<FirmId>) -> Self {
        self.id = id.into();
        self
    }

    /// Marks the record as modified now.
    pub fn touch(&mut self) {
        self.modified_date = Utc::now().max(self.created_date);
    }

    /// Looks up a saved calculation.
    pub fn calculation(&self, id: &CalculationId) -> Option<&Calculation> {
        self.calculations.iter().find(|c| &c.id == id)
    }

    /// Most recently saved calculation.
    pub fn latest_calculation(&self) -> Option<&Calculation> {
        self.calculations.last()
    }
}
