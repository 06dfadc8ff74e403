//! Identifier types for persisted entities.
//!
//! Firms, saved calculations, harms, stress scenarios and exposures are all
//! addressed by string identifiers in the persistence contract. Newtypes keep
//! a harm id from being passed where a scenario id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Prefix used by [`Self::generate`].
            pub const PREFIX: &'static str = $prefix;

            /// Creates an identifier from an existing value.
            #[inline]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Generates a fresh random identifier of the form `<prefix>_<uuid>`.
            pub fn generate() -> Self {
                Self(format!("{}_{}", $prefix, uuid::Uuid::new_v4().simple()))
            }

            /// Returns the identifier as a string slice.
            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Returns true if the identifier is empty or whitespace.
            pub fn is_blank(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

define_id!(
    /// Unique identifier for a firm record.
    ///
    /// # Examples
    ///
    /// ```
    /// use mifidpru_core::types::FirmId;
    ///
    /// let id = FirmId::new("firm_12345");
    /// assert_eq!(id.as_str(), "firm_12345");
    /// ```
    FirmId,
    "firm"
);

define_id!(
    /// Unique identifier for a saved calculation snapshot.
    CalculationId,
    "calc"
);

define_id!(
    /// Unique identifier for a harm in the risk register.
    HarmId,
    "harm"
);

define_id!(
    /// Unique identifier for a stress scenario.
    ScenarioId,
    "scenario"
);

define_id!(
    /// Unique identifier for a counterparty exposure.
    ExposureId,
    "exposure"
);
