//! Fixed overhead requirement.

use mifidpru_core::profile::OverheadInputs;
use mifidpru_core::types::non_negative;
use serde::{Deserialize, Serialize};

/// Share of relevant annual expenditure held as FOR.
pub const FOR_RATE: f64 = 0.25;

/// Fixed overhead requirement with its workings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixedOverheadRequirement {
    /// Total expenditure from the latest audited accounts.
    pub total_expenditure: f64,
    /// Sum of the deductible items.
    pub total_deductions: f64,
    /// Expenditure after deductions, floored at zero.
    pub relevant_expenditure: f64,
    /// The requirement, a quarter of relevant expenditure.
    #[serde(rename = "FOR")]
    pub for_amount: f64,
}

/// Computes FOR as 25% of expenditure net of deductibles.
pub fn calculate_for(overheads: &OverheadInputs) -> FixedOverheadRequirement {
    let total_expenditure = non_negative(overheads.total_expenditure);
    let total_deductions = non_negative(overheads.total_deductions());
    let relevant_expenditure = (total_expenditure - total_deductions).max(0.0);
    FixedOverheadRequirement {
        total_expenditure,
        total_deductions,
        relevant_expenditure,
        for_amount: relevant_expenditure * FOR_RATE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_with_deductions() {
        let overheads = OverheadInputs {
            total_expenditure: 8_000_000.0,
            discretionary_bonuses: 1_000_000.0,
            profit_shares: 500_000.0,
            other_discretionary_payments: 200_000.0,
            shared_commissions: 300_000.0,
            fees_paid_to_ccps: 150_000.0,
            interest_on_client_money: 50_000.0,
            non_recurring_expenses: 400_000.0,
            tied_agent_fees: 100_000.0,
        };
        let result = calculate_for(&overheads);
        assert_eq!(result.total_deductions, 2_700_000.0);
        assert_eq!(result.relevant_expenditure, 5_300_000.0);
        assert_eq!(result.for_amount, 1_325_000.0);
    }

    #[test]
    fn test_deductions_exceeding_expenditure_floor_at_zero() {
        let overheads = OverheadInputs {
            total_expenditure: 100.0,
            discretionary_bonuses: 500.0,
            ..Default::default()
        };
        let result = calculate_for(&overheads);
        assert_eq!(result.relevant_expenditure, 0.0);
        assert_eq!(result.for_amount, 0.0);
    }

    #[test]
    fn test_serialised_for_key() {
        let json = serde_json::to_value(calculate_for(&OverheadInputs::default())).unwrap();
        assert!(json.get("FOR").is_some());
        assert!(json.get("relevantExpenditure").is_some());
    }
}
