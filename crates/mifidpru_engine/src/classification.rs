//! SNI / Non-SNI firm classification.
//!
//! A firm is small and non-interconnected only when every criterion holds.
//! Negative or non-finite metrics are read as zero.

use mifidpru_core::profile::ClassificationMetrics;
use mifidpru_core::types::{format_gbp, non_negative};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Prudential classification of an investment firm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FirmClassification {
    /// Small and non-interconnected.
    #[serde(rename = "SNI")]
    Sni,
    /// Not small and non-interconnected.
    #[default]
    #[serde(rename = "Non-SNI")]
    NonSni,
}

impl FirmClassification {
    /// Short label, `"SNI"` or `"Non-SNI"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sni => "SNI",
            Self::NonSni => "Non-SNI",
        }
    }

    /// Regime description shown alongside the label.
    pub fn regime(&self) -> &'static str {
        match self {
            Self::Sni => "Simplified regime",
            Self::NonSni => "Standard regime",
        }
    }
}

impl fmt::Display for FirmClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Upper bounds for the SNI size criteria.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SniThresholds {
    /// Assets under management.
    pub aum: f64,
    /// Client orders handled, cash trades.
    pub coh_cash: f64,
    /// Client orders handled, derivative trades.
    pub coh_derivatives: f64,
    /// On- and off-balance sheet total.
    pub balance_sheet_total: f64,
    /// Total annual gross revenue.
    pub annual_revenue: f64,
}

impl Default for SniThresholds {
    fn default() -> Self {
        Self {
            aum: 1_200_000_000.0,
            coh_cash: 100_000.0,
            coh_derivatives: 1_000_000.0,
            balance_sheet_total: 100_000_000.0,
            annual_revenue: 30_000_000.0,
        }
    }
}

/// A single SNI criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SniCriterion {
    /// AUM below threshold.
    Aum,
    /// COH cash below threshold.
    CohCash,
    /// COH derivatives below threshold.
    CohDerivatives,
    /// No assets safeguarded and administered.
    Asa,
    /// No client money held.
    Cmh,
    /// No daily trading flow.
    Dtf,
    /// No net position risk.
    Npr,
    /// No clearing margin given.
    Cmg,
    /// No trading counterparty default exposure.
    Tcd,
    /// Balance sheet below threshold.
    BalanceSheetTotal,
    /// Revenue below threshold.
    AnnualRevenue,
}

impl SniCriterion {
    /// All criteria in evaluation order.
    pub fn all() -> [Self; 11] {
        [
            Self::Aum,
            Self::CohCash,
            Self::CohDerivatives,
            Self::Asa,
            Self::Cmh,
            Self::Dtf,
            Self::Npr,
            Self::Cmg,
            Self::Tcd,
            Self::BalanceSheetTotal,
            Self::AnnualRevenue,
        ]
    }

    fn value(&self, m: &ClassificationMetrics) -> f64 {
        let raw = match self {
            Self::Aum => m.aum,
            Self::CohCash => m.coh_cash,
            Self::CohDerivatives => m.coh_derivatives,
            Self::Asa => m.asa,
            Self::Cmh => m.cmh,
            Self::Dtf => m.dtf,
            Self::Npr => m.npr,
            Self::Cmg => m.cmg,
            Self::Tcd => m.tcd,
            Self::BalanceSheetTotal => m.balance_sheet_total,
            Self::AnnualRevenue => m.annual_revenue,
        };
        non_negative(raw)
    }

    /// Upper bound for size criteria, `None` for the must-be-zero criteria.
    pub fn limit(&self, thresholds: &SniThresholds) -> Option<f64> {
        match self {
            Self::Aum => Some(thresholds.aum),
            Self::CohCash => Some(thresholds.coh_cash),
            Self::CohDerivatives => Some(thresholds.coh_derivatives),
            Self::BalanceSheetTotal => Some(thresholds.balance_sheet_total),
            Self::AnnualRevenue => Some(thresholds.annual_revenue),
            _ => None,
        }
    }

    /// Whether the metric satisfies this criterion.
    pub fn is_met(&self, m: &ClassificationMetrics, thresholds: &SniThresholds) -> bool {
        let value = self.value(m);
        match self.limit(thresholds) {
            Some(limit) => value < limit,
            None => value == 0.0,
        }
    }

    /// Human-readable description of the requirement.
    pub fn describe(&self, thresholds: &SniThresholds) -> String {
        let name = match self {
            Self::Aum => "Assets under management",
            Self::CohCash => "Client orders handled (cash)",
            Self::CohDerivatives => "Client orders handled (derivatives)",
            Self::Asa => "Assets safeguarded and administered",
            Self::Cmh => "Client money held",
            Self::Dtf => "Daily trading flow",
            Self::Npr => "Net position risk",
            Self::Cmg => "Clearing margin given",
            Self::Tcd => "Trading counterparty default",
            Self::BalanceSheetTotal => "Balance sheet total",
            Self::AnnualRevenue => "Annual revenue",
        };
        match self.limit(thresholds) {
            Some(limit) => format!("{name} below {}", format_gbp(limit)),
            None => format!("{name} equal to zero"),
        }
    }
}

/// Classification with the criteria that prevented SNI status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationOutcome {
    /// Resulting classification.
    pub classification: FirmClassification,
    /// Criteria not met, in evaluation order. Empty for SNI firms.
    pub breached: Vec<SniCriterion>,
}

/// Classifies a firm against the default thresholds.
///
/// # Examples
///
/// ```
/// use mifidpru_core::profile::ClassificationMetrics;
/// use mifidpru_engine::classification::{classify, FirmClassification, SniCriterion};
///
/// let mut metrics = ClassificationMetrics::default();
/// assert_eq!(classify(&metrics).classification, FirmClassification::Sni);
///
/// metrics.cmh = 1.0;
/// let outcome = classify(&metrics);
/// assert_eq!(outcome.classification, FirmClassification::NonSni);
/// assert_eq!(outcome.breached, vec![SniCriterion::Cmh]);
/// ```
pub fn classify(metrics: &ClassificationMetrics) -> ClassificationOutcome {
    classify_with(metrics, &SniThresholds::default())
}

/// Classifies a firm against explicit thresholds.
pub fn classify_with(
    metrics: &ClassificationMetrics,
    thresholds: &SniThresholds,
) -> ClassificationOutcome {
    let breached: Vec<SniCriterion> = SniCriterion::all()
        .into_iter()
        .filter(|c| !c.is_met(metrics, thresholds))
        .collect();
    let classification = if breached.is_empty() {
        FirmClassification::Sni
    } else {
        FirmClassification::NonSni
    };
    ClassificationOutcome {
        classification,
        breached,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_zero_metrics_are_sni() {
        let outcome = classify(&ClassificationMetrics::default());
        assert_eq!(outcome.classification, FirmClassification::Sni);
        assert!(outcome.breached.is_empty());
    }

    #[test]
    fn test_thresholds_are_strict() {
        let metrics = ClassificationMetrics {
            aum: 1_200_000_000.0,
            ..Default::default()
        };
        let outcome = classify(&metrics);
        assert_eq!(outcome.classification, FirmClassification::NonSni);
        assert_eq!(outcome.breached, vec![SniCriterion::Aum]);

        let metrics = ClassificationMetrics {
            aum: 1_199_999_999.0,
            coh_cash: 99_999.0,
            coh_derivatives: 999_999.0,
            balance_sheet_total: 99_999_999.0,
            annual_revenue: 29_999_999.0,
            ..Default::default()
        };
        assert_eq!(classify(&metrics).classification, FirmClassification::Sni);
    }

    #[test]
    fn test_sample_firm_breaches_many_criteria() {
        let metrics = ClassificationMetrics {
            aum: 500_000_000.0,
            coh_cash: 50_000_000.0,
            coh_derivatives: 200_000_000.0,
            asa: 300_000_000.0,
            cmh: 100_000_000.0,
            dtf: 30_000_000.0,
            npr: 5_000_000.0,
            cmg: 0.0,
            tcd: 2_000_000.0,
            balance_sheet_total: 50_000_000.0,
            annual_revenue: 15_000_000.0,
        };
        let outcome = classify(&metrics);
        assert_eq!(outcome.classification, FirmClassification::NonSni);
        assert_eq!(
            outcome.breached,
            vec![
                SniCriterion::CohCash,
                SniCriterion::CohDerivatives,
                SniCriterion::Asa,
                SniCriterion::Cmh,
                SniCriterion::Dtf,
                SniCriterion::Npr,
                SniCriterion::Tcd,
            ]
        );
    }

    #[test]
    fn test_negative_metrics_read_as_zero() {
        let metrics = ClassificationMetrics {
            asa: -10.0,
            npr: f64::NAN,
            ..Default::default()
        };
        assert_eq!(classify(&metrics).classification, FirmClassification::Sni);
    }

    #[test]
    fn test_classification_serde_labels() {
        assert_eq!(serde_json::to_string(&FirmClassification::Sni).unwrap(), "\"SNI\"");
        assert_eq!(
            serde_json::to_string(&FirmClassification::NonSni).unwrap(),
            "\"Non-SNI\""
        );
    }

    #[test]
    fn test_describe() {
        let t = SniThresholds::default();
        assert_eq!(
            SniCriterion::CohCash.describe(&t),
            "Client orders handled (cash) below £100,000"
        );
        assert_eq!(SniCriterion::Cmg.describe(&t), "Clearing margin given equal to zero");
    }

    fn set(m: &mut ClassificationMetrics, idx: usize, v: f64) {
        match idx {
            0 => m.aum = v,
            1 => m.coh_cash = v,
            2 => m.coh_derivatives = v,
            3 => m.asa = v,
            4 => m.cmh = v,
            5 => m.dtf = v,
            6 => m.npr = v,
            7 => m.cmg = v,
            8 => m.tcd = v,
            9 => m.balance_sheet_total = v,
            _ => m.annual_revenue = v,
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_raising_a_metric_never_restores_sni(
            values in prop::collection::vec(0.0f64..2e9, 11),
            idx in 0usize..11,
            bump in 0.0f64..1e9,
        ) {
            let mut before = ClassificationMetrics::default();
            for (i, v) in values.iter().enumerate() {
                set(&mut before, i, *v);
            }
            let mut after = before.clone();
            let current = SniCriterion::all()[idx].value(&before);
            set(&mut after, idx, current + bump);

            let was = classify(&before).classification;
            let now = classify(&after).classification;
            prop_assert!(!(was == FirmClassification::NonSni && now == FirmClassification::Sni));
        }
    }
}
