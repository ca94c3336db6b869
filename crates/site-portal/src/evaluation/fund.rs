use serde::{Deserialize, Serialize};

/// Fund-level configuration; a single record is active at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundSettings {
    pub fund_size: f64,
    pub pref_return: f64,
    pub lp_split: f64,
    pub gp_split: f64,
    pub management_fee: f64,
    pub commitment_fee_per_m: f64,
}

impl FundSettings {
    /// Simple range checks applied before a record becomes active.
    ///
    /// The LP/GP splits are deliberately not required to sum to one.
    pub fn validate(&self) -> Result<(), FundSettingsError> {
        let amounts = [
            ("fund_size", self.fund_size),
            ("commitment_fee_per_m", self.commitment_fee_per_m),
        ];
        for (field, value) in amounts {
            if !value.is_finite() || value < 0.0 {
                return Err(FundSettingsError::NegativeAmount { field, value });
            }
        }

        let fractions = [
            ("pref_return", self.pref_return),
            ("lp_split", self.lp_split),
            ("gp_split", self.gp_split),
            ("management_fee", self.management_fee),
        ];
        for (field, value) in fractions {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(FundSettingsError::FractionOutOfRange { field, value });
            }
        }

        Ok(())
    }

    /// Management fee charged per year on committed capital.
    pub fn annual_management_fee(&self) -> f64 {
        self.fund_size * self.management_fee
    }

    /// Commitment fee owed on a commitment of `commitment` US$.
    pub fn commitment_fee_for(&self, commitment: f64) -> f64 {
        commitment / 1_000_000.0 * self.commitment_fee_per_m
    }
}

impl Default for FundSettings {
    fn default() -> Self {
        Self {
            fund_size: 10_000_000.0,
            pref_return: 0.16,
            lp_split: 0.6,
            gp_split: 0.4,
            management_fee: 0.02,
            commitment_fee_per_m: 10_000.0,
        }
    }
}

/// Range-check failures for fund settings.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FundSettingsError {
    #[error("{field} must be a non-negative amount (found {value})")]
    NegativeAmount { field: &'static str, value: f64 },
    #[error("{field} must be a fraction between 0 and 1 (found {value})")]
    FractionOutOfRange { field: &'static str, value: f64 },
}
