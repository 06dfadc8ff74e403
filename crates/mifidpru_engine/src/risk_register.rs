//! Harm register and its capital and liquidity allowances.
//!
//! Edits are validated against the current register before anything
//! changes; a failed edit leaves the register as it was.

use crate::error::EngineError;
use mifidpru_core::profile::{FirmProfile, Harm, HarmCategory};
use mifidpru_core::types::{non_negative, HarmId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Additional resources required by the material harms in a register.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HarmAllowances {
    /// Sum of additional own funds over material harms.
    pub additional_own_funds: f64,
    /// Sum of additional liquid assets over material harms.
    pub additional_liquid_assets: f64,
    /// Number of material harms.
    pub material_count: usize,
}

impl HarmAllowances {
    /// Sums the allowances of the material harms in `harms`.
    ///
    /// # Examples
    ///
    /// ```
    /// use mifidpru_core::profile::{Harm, HarmCategory};
    /// use mifidpru_engine::risk_register::HarmAllowances;
    ///
    /// let harms = vec![
    ///     Harm::new("a", HarmCategory::Client, 2, 4).with_additional_own_funds(250_000.0),
    ///     Harm::new("b", HarmCategory::Firm, 3, 3).with_additional_own_funds(300_000.0),
    ///     Harm::new("c", HarmCategory::Market, 1, 2).with_additional_own_funds(999_999.0),
    /// ];
    /// let totals = HarmAllowances::from_harms(&harms);
    /// assert_eq!(totals.additional_own_funds, 550_000.0);
    /// assert_eq!(totals.material_count, 2);
    /// ```
    pub fn from_harms(harms: &[Harm]) -> Self {
        harms
            .iter()
            .filter(|h| h.is_material())
            .fold(Self::default(), |acc, h| Self {
                additional_own_funds: acc.additional_own_funds
                    + non_negative(h.additional_own_funds),
                additional_liquid_assets: acc.additional_liquid_assets
                    + non_negative(h.additional_liquid_assets),
                material_count: acc.material_count + 1,
            })
    }
}

/// Ordered collection of harms keyed by id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RiskRegister {
    harms: Vec<Harm>,
}

impl RiskRegister {
    /// Creates an empty register.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a register holding a copy of the profile's harms.
    pub fn from_profile(profile: &FirmProfile) -> Self {
        Self {
            harms: profile.identified_harms.clone(),
        }
    }

    /// Harms in entry order.
    pub fn harms(&self) -> &[Harm] {
        &self.harms
    }

    /// Number of harms.
    pub fn len(&self) -> usize {
        self.harms.len()
    }

    /// True when the register is empty.
    pub fn is_empty(&self) -> bool {
        self.harms.is_empty()
    }

    /// Finds a harm by id.
    pub fn get(&self, id: &HarmId) -> Option<&Harm> {
        self.harms.iter().find(|h| &h.id == id)
    }

    fn position(&self, id: &HarmId) -> Result<usize, EngineError> {
        self.harms
            .iter()
            .position(|h| &h.id == id)
            .ok_or_else(|| EngineError::HarmNotFound(id.to_string()))
    }

    /// Appends a harm.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::DuplicateHarm`] if the id is already present.
    pub fn add(&mut self, harm: Harm) -> Result<(), EngineError> {
        if self.get(&harm.id).is_some() {
            return Err(EngineError::DuplicateHarm(harm.id.to_string()));
        }
        debug!(harm_id = %harm.id, score = harm.risk_score(), "Harm added");
        self.harms.push(harm);
        Ok(())
    }

    /// Replaces the harm with the same id, keeping its position.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::HarmNotFound`] if no harm has that id.
    pub fn update(&mut self, harm: Harm) -> Result<(), EngineError> {
        let idx = self.position(&harm.id)?;
        debug!(harm_id = %harm.id, score = harm.risk_score(), "Harm updated");
        self.harms[idx] = harm;
        Ok(())
    }

    /// Removes and returns the harm with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::HarmNotFound`] if no harm has that id.
    pub fn remove(&mut self, id: &HarmId) -> Result<Harm, EngineError> {
        let idx = self.position(id)?;
        debug!(harm_id = %id, "Harm removed");
        Ok(self.harms.remove(idx))
    }

    /// Allowances over the material harms.
    pub fn allowances(&self) -> HarmAllowances {
        HarmAllowances::from_harms(&self.harms)
    }

    /// Harms grouped by category, each group in entry order.
    pub fn by_category(&self) -> BTreeMap<HarmCategory, Vec<&Harm>> {
        let mut groups: BTreeMap<HarmCategory, Vec<&Harm>> = BTreeMap::new();
        for harm in &self.harms {
            groups.entry(harm.category).or_default().push(harm);
        }
        groups
    }

    /// Harms sorted by descending risk score; ties keep entry order.
    pub fn ranked(&self) -> Vec<&Harm> {
        let mut ranked: Vec<&Harm> = self.harms.iter().collect();
        ranked.sort_by(|a, b| b.risk_score().cmp(&a.risk_score()));
        ranked
    }

    /// Returns a copy of `profile` with this register and its allowances.
    ///
    /// The harm list and both allowance fields are replaced together.
    pub fn apply_to(&self, profile: &FirmProfile) -> FirmProfile {
        let totals = self.allowances();
        info!(
            harms = self.harms.len(),
            material = totals.material_count,
            additional_own_funds = totals.additional_own_funds,
            additional_liquid_assets = totals.additional_liquid_assets,
            "Risk register applied"
        );
        FirmProfile {
            identified_harms: self.harms.clone(),
            additional_own_funds_for_harm: totals.additional_own_funds,
            additional_liquid_assets_for_harm: totals.additional_liquid_assets,
            ..profile.clone()
        }
    }
}

impl From<Vec<Harm>> for RiskRegister {
    fn from(harms: Vec<Harm>) -> Self {
        Self { harms }
    }
}
