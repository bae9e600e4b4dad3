//! DrawingML length units.

use serde::{Deserialize, Serialize};

/// EMUs per inch.
pub const EMU_PER_INCH: i64 = 914_400;

/// EMUs per typographic point.
pub const EMU_PER_POINT: i64 = 12_700;

/// A length in English Metric Units, the coordinate unit of DrawingML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Emu(pub i64);

impl Emu {
    /// Convert inches to EMUs, rounding to the nearest unit.
    pub fn from_inches(inches: f64) -> Self {
        Self((inches * EMU_PER_INCH as f64).round() as i64)
    }

    /// Convert points to EMUs, rounding to the nearest unit.
    pub fn from_points(points: f64) -> Self {
        Self((points * EMU_PER_POINT as f64).round() as i64)
    }

    /// Raw EMU value.
    pub fn get(self) -> i64 {
        self.0
    }

    /// Length in inches.
    pub fn inches(self) -> f64 {
        self.0 as f64 / EMU_PER_INCH as f64
    }
}

impl From<i64> for Emu {
    fn from(value: i64) -> Self {
        Self(value)
    }
}
