//! Potential harms recorded in the risk register.

use crate::types::{HarmId, ProfileError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Risk score at or above which a harm is material.
pub const MATERIALITY_THRESHOLD: u8 = 6;

/// Who a harm falls on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HarmCategory {
    /// Harm to clients.
    Client,
    /// Harm to markets.
    Market,
    /// Harm to the firm itself.
    Firm,
    /// Anything else.
    #[default]
    Other,
}

impl HarmCategory {
    /// Section heading used when harms are grouped by category.
    pub fn heading(&self) -> &'static str {
        match self {
            Self::Client => "Harms to Clients",
            Self::Market => "Harms to Markets",
            Self::Firm => "Harms to the Firm",
            Self::Other => "Other Harms",
        }
    }
}

impl FromStr for HarmCategory {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "client" => Ok(Self::Client),
            "market" => Ok(Self::Market),
            "firm" => Ok(Self::Firm),
            "other" => Ok(Self::Other),
            _ => Err(ProfileError::UnknownHarmCategory(s.to_string())),
        }
    }
}

/// Qualitative band of a risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskRating {
    /// Score below 4.
    #[serde(rename = "Very Low")]
    VeryLow,
    /// Score 4 to 7.
    Low,
    /// Score 8 to 14.
    Medium,
    /// Score 15 and above.
    High,
}

impl RiskRating {
    /// Bands a likelihood x impact score.
    pub fn from_score(score: u8) -> Self {
        match score {
            s if s >= 15 => Self::High,
            s if s >= 8 => Self::Medium,
            s if s >= 4 => Self::Low,
            _ => Self::VeryLow,
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::VeryLow => "Very Low",
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl fmt::Display for RiskRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Label for a likelihood rating on the 1-5 scale.
pub fn likelihood_label(value: u8) -> &'static str {
    match value {
        1 => "Rare",
        2 => "Unlikely",
        3 => "Possible",
        4 => "Likely",
        5 => "Almost Certain",
        _ => "Unknown",
    }
}

/// Label for an impact rating on the 1-5 scale.
pub fn impact_label(value: u8) -> &'static str {
    match value {
        1 => "Minimal",
        2 => "Minor",
        3 => "Moderate",
        4 => "Major",
        5 => "Catastrophic",
        _ => "Unknown",
    }
}

/// A potential harm to clients, markets or the firm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Harm {
    /// Register identifier.
    pub id: HarmId,
    /// What could go wrong.
    pub description: String,
    /// Who bears the harm.
    #[serde(default)]
    pub category: HarmCategory,
    /// Free-text subcategory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    /// Likelihood on a 1-5 scale.
    pub likelihood: u8,
    /// Impact on a 1-5 scale.
    pub impact: u8,
    /// Controls in place.
    #[serde(default)]
    pub controls: String,
    /// Own funds held against this harm.
    #[serde(default)]
    pub additional_own_funds: f64,
    /// Liquid assets held against this harm.
    #[serde(default)]
    pub additional_liquid_assets: f64,
}

impl Harm {
    /// Creates a harm with a generated id.
    ///
    /// Likelihood and impact are clamped into `[1, 5]`.
    pub fn new(
        description: impl Into<String>,
        category: HarmCategory,
        likelihood: u8,
        impact: u8,
    ) -> Self {
        Self {
            id: HarmId::generate(),
            description: description.into(),
            category,
            subcategory: None,
            likelihood: likelihood.clamp(1, 5),
            impact: impact.clamp(1, 5),
            controls: String::new(),
            additional_own_funds: 0.0,
            additional_liquid_assets: 0.0,
        }
    }

    /// Sets the identifier.
    pub fn with_id(mut self, id: impl Into<HarmId>) -> Self {
        self.id = id.into();
        self
    }

    /// Sets the controls text.
    pub fn with_controls(mut self, controls: impl Into<String>) -> Self {
        self.controls = controls.into();
        self
    }

    /// Sets the subcategory.
    pub fn with_subcategory(mut self, subcategory: impl Into<String>) -> Self {
        self.subcategory = Some(subcategory.into());
        self
    }

    /// Sets the additional own funds held against this harm.
    pub fn with_additional_own_funds(mut self, amount: f64) -> Self {
        self.additional_own_funds = amount;
        self
    }

    /// Sets the additional liquid assets held against this harm.
    pub fn with_additional_liquid_assets(mut self, amount: f64) -> Self {
        self.additional_liquid_assets = amount;
        self
    }

    /// Likelihood x impact, in `[1, 25]` for in-range ratings.
    #[inline]
    pub fn risk_score(&self) -> u8 {
        self.likelihood.saturating_mul(self.impact)
    }

    /// Rating band of the risk score.
    pub fn rating(&self) -> RiskRating {
        RiskRating::from_score(self.risk_score())
    }

    /// True when the risk score reaches [`MATERIALITY_THRESHOLD`].
    #[inline]
    pub fn is_material(&self) -> bool {
        self.risk_score() >= MATERIALITY_THRESHOLD
    }
}
