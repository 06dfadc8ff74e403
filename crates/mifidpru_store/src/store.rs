//! In-memory firm store with JSON export and import.

use crate::error::StoreError;
use crate::firm::{Calculation, Firm};
use mifidpru_core::profile::validation::sanitise;
use mifidpru_core::profile::{FirmProfile, InputCorrection};
use mifidpru_core::types::{CalculationId, FirmId};
use mifidpru_engine::{recompute_derived, run_calculation, CalculationResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Result of merging an imported firm into the store.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportOutcome {
    /// Identifier of the imported firm
    pub firm_id: FirmId,
    /// True if an existing firm with the same id was replaced
    pub replaced: bool,
    /// Corrections applied while sanitising the imported profiles
    pub corrections: Vec<InputCorrection>,
}

/// Ordered collection of firms with an optional current selection.
///
/// Every mutating operation either succeeds completely or leaves the
/// store as it was.
///
/// # Examples
/// ```
/// use mifidpru_core::profile::FirmProfile;
/// use mifidpru_store::FirmStore;
///
/// let mut store = FirmStore::new();
/// let id = store.create_firm("Sample Investment Firm Ltd", FirmProfile::default()).unwrap();
/// let json = store.export_firm(&id).unwrap();
///
/// let mut other = FirmStore::new();
/// let outcome = other.import_firm(&json).unwrap();
/// assert_eq!(outcome.firm_id, id);
/// assert_eq!(other.export_firm(&id).unwrap(), json);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FirmStore {
    firms: Vec<Firm>,
    current_firm_id: Option<FirmId>,
}

impl FirmStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// All firms in insertion order.
    pub fn firms(&self) -> &[Firm] {
        &self.firms
    }

    /// Number of firms.
    pub fn len(&self) -> usize {
        self.firms.len()
    }

    /// Returns true if the store holds no firms.
    pub fn is_empty(&self) -> bool {
        self.firms.is_empty()
    }

    /// Looks up a firm.
    pub fn get(&self, id: &FirmId) -> Option<&Firm> {
        self.firms.iter().find(|f| &f.id == id)
    }

    fn position(&self, id: &FirmId) -> Result<usize, StoreError> {
        self.firms
            .iter()
            .position(|f| &f.id == id)
            .ok_or_else(|| StoreError::FirmNotFound(id.to_string()))
    }

    /// Creates a firm and selects it.
    ///
    /// # Errors
    /// [`StoreError::MissingField`] if `name` is blank.
    pub fn create_firm(
        &mut self,
        name: impl Into<String>,
        profile: FirmProfile,
    ) -> Result<FirmId, StoreError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(StoreError::MissingField("name"));
        }
        let firm = Firm::new(name, profile);
        let id = firm.id.clone();
        info!(firm_id = %id, name = %firm.name, "Firm created");
        self.firms.push(firm);
        self.current_firm_id = Some(id.clone());
        Ok(id)
    }

    /// Replaces a firm's live profile.
    pub fn update_profile(&mut self, id: &FirmId, profile: FirmProfile) -> Result<(), StoreError> {
        let idx = self.position(id)?;
        let firm = &mut self.firms[idx];
        firm.profile = profile;
        firm.touch();
        debug!(firm_id = %id, "Firm profile updated");
        Ok(())
    }

    /// Renames a firm.
    pub fn rename_firm(&mut self, id: &FirmId, name: impl Into<String>) -> Result<(), StoreError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(StoreError::MissingField("name"));
        }
        let idx = self.position(id)?;
        let firm = &mut self.firms[idx];
        firm.name = name;
        firm.touch();
        Ok(())
    }

    /// Removes a firm, clearing the selection if it was current.
    pub fn delete_firm(&mut self, id: &FirmId) -> Result<Firm, StoreError> {
        let idx = self.position(id)?;
        if self.current_firm_id.as_ref() == Some(id) {
            self.current_firm_id = None;
        }
        info!(firm_id = %id, "Firm deleted");
        Ok(self.firms.remove(idx))
    }

    /// Selects the current firm.
    pub fn select(&mut self, id: &FirmId) -> Result<(), StoreError> {
        self.position(id)?;
        self.current_firm_id = Some(id.clone());
        Ok(())
    }

    /// The currently selected firm.
    pub fn current(&self) -> Option<&Firm> {
        self.current_firm_id.as_ref().and_then(|id| self.get(id))
    }

    /// Runs a calculation over the firm's live profile and saves the snapshot.
    pub fn save_calculation(
        &mut self,
        id: &FirmId,
        name: impl Into<String>,
    ) -> Result<CalculationId, StoreError> {
        let idx = self.position(id)?;
        let firm = &mut self.firms[idx];
        let calc = Calculation::capture(name, &firm.profile);
        let calc_id = calc.id.clone();
        info!(
            firm_id = %id,
            calculation_id = %calc_id,
            ofr = calc.results.total_own_funds_requirement(),
            "Calculation saved"
        );
        firm.calculations.push(calc);
        firm.touch();
        Ok(calc_id)
    }

    /// Restores a saved calculation's inputs as the firm's live profile.
    ///
    /// Returns the restored profile and a fresh calculation pass over it.
    pub fn load_calculation(
        &mut self,
        id: &FirmId,
        calculation_id: &CalculationId,
    ) -> Result<(FirmProfile, CalculationResult), StoreError> {
        let idx = self.position(id)?;
        let firm = &mut self.firms[idx];
        let profile = firm
            .calculation(calculation_id)
            .map(|c| c.input_data.clone())
            .ok_or_else(|| StoreError::CalculationNotFound(calculation_id.to_string()))?;
        firm.profile = profile.clone();
        firm.touch();
        let result = run_calculation(&recompute_derived(&profile));
        debug!(firm_id = %id, calculation_id = %calculation_id, "Calculation loaded");
        Ok((profile, result))
    }

    /// Removes a saved calculation.
    pub fn delete_calculation(
        &mut self,
        id: &FirmId,
        calculation_id: &CalculationId,
    ) -> Result<Calculation, StoreError> {
        let idx = self.position(id)?;
        let firm = &mut self.firms[idx];
        let pos = firm
            .calculations
            .iter()
            .position(|c| &c.id == calculation_id)
            .ok_or_else(|| StoreError::CalculationNotFound(calculation_id.to_string()))?;
        let removed = firm.calculations.remove(pos);
        firm.touch();
        Ok(removed)
    }

    /// Serialises one firm as pretty-printed JSON.
    pub fn export_firm(&self, id: &FirmId) -> Result<String, StoreError> {
        let firm = self
            .get(id)
            .ok_or_else(|| StoreError::FirmNotFound(id.to_string()))?;
        export_firm_json(firm)
    }

    /// Parses, validates and sanitises a firm, then merges it.
    ///
    /// A firm with the same id is replaced in place; otherwise the firm is
    /// appended. On any error the store is left untouched.
    pub fn import_firm(&mut self, json: &str) -> Result<ImportOutcome, StoreError> {
        let (firm, corrections) = parse_firm_json(json)?;
        let firm_id = firm.id.clone();

        let replaced = match self.firms.iter_mut().find(|f| f.id == firm.id) {
            Some(existing) => {
                *existing = firm;
                true
            }
            None => {
                self.firms.push(firm);
                false
            }
        };

        info!(
            firm_id = %firm_id,
            replaced,
            corrections = corrections.len(),
            "Firm imported"
        );
        Ok(ImportOutcome {
            firm_id,
            replaced,
            corrections,
        })
    }
}

/// Serialises a firm in the export format.
pub fn export_firm_json(firm: &Firm) -> Result<String, StoreError> {
    serde_json::to_string_pretty(firm).map_err(|e| StoreError::Serialisation(e.to_string()))
}

/// Parses and sanitises a firm record without touching any store.
///
/// The live profile and every snapshot's input profile are sanitised.
/// Corrections to snapshot inputs are reported with a
/// `calculations[i].inputData.` prefix.
pub fn parse_firm_json(json: &str) -> Result<(Firm, Vec<InputCorrection>), StoreError> {
    let mut firm: Firm = serde_json::from_str(json).map_err(StoreError::from_parse)?;

    if firm.id.is_blank() {
        warn!("Import rejected: blank firm id");
        return Err(StoreError::MissingField("id"));
    }
    if firm.name.trim().is_empty() {
        warn!(firm_id = %firm.id, "Import rejected: blank firm name");
        return Err(StoreError::MissingField("name"));
    }

    let (profile, mut corrections) = sanitise(&firm.profile);
    firm.profile = profile;

    for (i, calc) in firm.calculations.iter_mut().enumerate() {
        let (input, fixes) = sanitise(&calc.input_data);
        calc.input_data = input;
        corrections.extend(fixes.into_iter().map(|mut c| {
            c.field = format!("calculations[{}].inputData.{}", i, c.field);
            c
        }));
    }

    Ok((firm, corrections))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn store_with_firm() -> (FirmStore, FirmId) {
        let mut store = FirmStore::new();
        let mut profile = FirmProfile::default();
        profile.overheads.total_expenditure = 8_000_000.0;
        let id = store.create_firm("Sample Investment Firm Ltd", profile).unwrap();
        (store, id)
    }

    #[test]
    fn test_create_selects_firm() {
        let (store, id) = store_with_firm();
        assert_eq!(store.len(), 1);
        assert_eq!(store.current().map(|f| &f.id), Some(&id));
    }

    #[test]
    fn test_create_rejects_blank_name() {
        let mut store = FirmStore::new();
        let err = store.create_firm("  ", FirmProfile::default()).unwrap_err();
        assert!(matches!(err, StoreError::MissingField("name")));
        assert!(store.is_empty());
    }

    #[test]
    fn test_update_profile_bumps_modified_date() {
        let (mut store, id) = store_with_firm();
        let before = store.get(&id).unwrap().modified_date;
        let mut profile = FirmProfile::default();
        profile.actual_own_funds = 5.0;
        store.update_profile(&id, profile).unwrap();

        let firm = store.get(&id).unwrap();
        assert_eq!(firm.profile.actual_own_funds, 5.0);
        assert!(firm.modified_date >= before);
    }

    #[test]
    fn test_unknown_firm() {
        let mut store = FirmStore::new();
        let err = store.select(&FirmId::new("nope")).unwrap_err();
        assert!(matches!(err, StoreError::FirmNotFound(_)));
    }

    #[test]
    fn test_save_and_load_calculation() {
        let (mut store, id) = store_with_firm();
        let calc_id = store.save_calculation(&id, "Year end").unwrap();

        let mut edited = FirmProfile::default();
        edited.overheads.total_expenditure = 1.0;
        store.update_profile(&id, edited).unwrap();

        let (profile, result) = store.load_calculation(&id, &calc_id).unwrap();
        assert_eq!(profile.overheads.total_expenditure, 8_000_000.0);
        assert_relative_eq!(result.fixed_overhead_requirement.for_amount, 2_000_000.0);
        assert_eq!(store.get(&id).unwrap().profile, profile);
    }

    #[test]
    fn test_delete_calculation() {
        let (mut store, id) = store_with_firm();
        let calc_id = store.save_calculation(&id, "Q1").unwrap();
        store.delete_calculation(&id, &calc_id).unwrap();
        assert!(store.get(&id).unwrap().calculations.is_empty());

        let err = store.delete_calculation(&id, &calc_id).unwrap_err();
        assert!(matches!(err, StoreError::CalculationNotFound(_)));
    }

    #[test]
    fn test_delete_current_clears_selection() {
        let (mut store, id) = store_with_firm();
        store.delete_firm(&id).unwrap();
        assert!(store.current().is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_import_replaces_same_id() {
        let (mut store, id) = store_with_firm();
        let mut firm = store.get(&id).unwrap().clone();
        firm.name = "Renamed Ltd".to_string();
        let json = export_firm_json(&firm).unwrap();

        let outcome = store.import_firm(&json).unwrap();
        assert!(outcome.replaced);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&id).unwrap().name, "Renamed Ltd");
    }

    #[test]
    fn test_import_rejects_blank_id_and_leaves_store() {
        let (mut store, _) = store_with_firm();
        let before = store.clone();
        let json = r#"{"id": " ", "name": "X", "profile": {}}"#;
        let err = store.import_firm(json).unwrap_err();
        assert!(matches!(err, StoreError::MissingField("id")));
        assert_eq!(store, before);
    }

    #[test]
    fn test_import_sanitises_snapshot_inputs() {
        let json = r#"{
            "id": "firm_1",
            "name": "A",
            "profile": {"actualOwnFunds": -5},
            "calculations": []
        }"#;
        let (firm, corrections) = parse_firm_json(json).unwrap();
        assert_eq!(firm.profile.actual_own_funds, 0.0);
        assert_eq!(corrections.len(), 1);
        assert_eq!(corrections[0].field, "actualOwnFunds");
    }
}
