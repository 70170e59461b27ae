use std::fmt::Display;

use serde::{Deserialize, Serialize};
use sqlx::Type;
use thiserror::Error;

pub const DEFAULT_CURRENCY_CODE: &str = "INR";
/// Every supported currency has two decimal places, so one major unit is worth 100 minor units (e.g. 1 INR = 100
/// paise).
pub const MINOR_UNITS_PER_MAJOR: i64 = 100;

//--------------------------------------     MinorUnits       ---------------------------------------------------------
/// An amount of money expressed in the smallest unit of its currency. The currency itself is tracked alongside the
/// amount, never inside it.
#[derive(Debug, Clone, Copy, Default, Type, PartialEq, Eq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[sqlx(transparent)]
#[serde(transparent)]
pub struct MinorUnits(i64);

#[derive(Debug, Clone, Error)]
#[error("Value cannot be represented in minor units: {0}")]
pub struct MinorUnitsConversionError(String);

impl From<i64> for MinorUnits {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl Display for MinorUnits {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let per_major = MINOR_UNITS_PER_MAJOR.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / per_major, abs % per_major)
    }
}

impl MinorUnits {
    pub fn value(&self) -> i64 {
        self.0
    }

    /// Converts an amount in major units (e.g. rupees) into minor units, rounding to the nearest integer. Halves are
    /// rounded away from zero.
    ///
    /// Note that the conversion is done in floating point, so values that cannot be represented exactly, such as
    /// `1.005`, may round down (`1.005 * 100 == 100.49999...`).
    pub fn from_major(major: f64) -> Result<Self, MinorUnitsConversionError> {
        if !major.is_finite() {
            return Err(MinorUnitsConversionError(format!("{major} is not a finite number")));
        }
        #[allow(clippy::cast_precision_loss)]
        let minor = (major * MINOR_UNITS_PER_MAJOR as f64).round();
        #[allow(clippy::cast_precision_loss)]
        if minor >= i64::MAX as f64 || minor <= i64::MIN as f64 {
            return Err(MinorUnitsConversionError(format!("{major} is out of range")));
        }
        #[allow(clippy::cast_possible_truncation)]
        Ok(Self(minor as i64))
    }

    /// The amount in major units. Used for display and reporting only, never for arithmetic.
    #[allow(clippy::cast_precision_loss)]
    pub fn to_major(&self) -> f64 {
        self.0 as f64 / MINOR_UNITS_PER_MAJOR as f64
    }
}
