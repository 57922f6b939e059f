use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// Fixed-point liquid volume, stored as a count of hundredths of a unit.
///
/// All solution arithmetic runs on integer hundredths, so repeated splits and
/// merges never accumulate floating-point drift. Amounts smaller than one
/// hundredth do not exist.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct FixedVolume(i32);

impl FixedVolume {
    pub const ZERO: FixedVolume = FixedVolume(0);

    /// Smallest representable non-zero volume (0.01 units).
    pub const EPSILON: FixedVolume = FixedVolume(1);

    /// Stand-in for the free volume of an uncapped container.
    pub const MAX: FixedVolume = FixedVolume(i32::MAX);

    const SCALE: i32 = 100;

    /// Whole units: `from_units(5)` is 5.00.
    pub const fn from_units(units: i32) -> Self {
        FixedVolume(units * Self::SCALE)
    }

    /// Raw hundredths of a unit.
    pub const fn from_hundredths(raw: i32) -> Self {
        FixedVolume(raw)
    }

    /// Nearest hundredth, rounding halves away from zero.
    pub fn from_f32(value: f32) -> Self {
        FixedVolume((value * Self::SCALE as f32).round() as i32)
    }

    pub const fn raw(self) -> i32 {
        self.0
    }

    pub fn to_f32(self) -> f32 {
        self.0 as f32 / Self::SCALE as f32
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub const fn saturating_sub(self, other: Self) -> Self {
        FixedVolume(self.0.saturating_sub(other.0))
    }
}

impl Add for FixedVolume {
    type Output = FixedVolume;

    fn add(self, rhs: Self) -> Self {
        FixedVolume(self.0 + rhs.0)
    }
}

impl Sub for FixedVolume {
    type Output = FixedVolume;

    fn sub(self, rhs: Self) -> Self {
        FixedVolume(self.0 - rhs.0)
    }
}

impl AddAssign for FixedVolume {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl SubAssign for FixedVolume {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Sum for FixedVolume {
    fn sum<I: Iterator<Item = FixedVolume>>(iter: I) -> Self {
        iter.fold(FixedVolume::ZERO, Add::add)
    }
}

impl fmt::Display for FixedVolume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let units = self.0 / Self::SCALE;
        let cents = (self.0 % Self::SCALE).abs();
        let sign = if self.0 < 0 && units == 0 { "-" } else { "" };
        if cents == 0 {
            write!(f, "{sign}{units}")
        } else if cents % 10 == 0 {
            write!(f, "{sign}{units}.{}", cents / 10)
        } else {
            write!(f, "{sign}{units}.{cents:02}")
        }
    }
}
