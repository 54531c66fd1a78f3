//! Integer-first percent helpers.
//!
//! Percentages are carried as tenths of a percent (`600` = 60.0%) and only
//! turned into text at render time. No float arithmetic.

use core::fmt;

use crate::area::Area;

/// A percentage in tenths (0..=1000 for shares of a whole).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PctTenths(pub u32);

impl PctTenths {
    pub const ZERO: PctTenths = PctTenths(0);

    #[inline]
    pub fn tenths(self) -> u32 { self.0 }
}

impl fmt::Display for PctTenths {
    /// Exactly one decimal: `60.0`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.0 / 10, self.0 % 10)
    }
}

/// `num / den` as tenths of a percent, rounded half-up. `den == 0` yields 0.
pub fn percent_tenths(num: u64, den: u64) -> PctTenths {
    if den == 0 {
        return PctTenths::ZERO;
    }
    let n = u128::from(num) * 1000;
    let d = u128::from(den);
    let q = (2 * n + d) / (2 * d);
    PctTenths(u32::try_from(q).unwrap_or(u32::MAX))
}

/// Share of `part` in `whole` (areas) as tenths of a percent.
#[inline]
pub fn area_share(part: Area, whole: Area) -> PctTenths {
    percent_tenths(part.hundredths(), whole.hundredths())
}

/// Exact strict-majority test: `part / whole > 1/2`.
#[inline]
pub fn is_strict_majority(part: Area, whole: Area) -> bool {
    !whole.is_zero() && u128::from(part.hundredths()) * 2 > u128::from(whole.hundredths())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_half_up() {
        assert_eq!(percent_tenths(1, 3), PctTenths(333));
        assert_eq!(percent_tenths(2, 3), PctTenths(667));
        assert_eq!(percent_tenths(1, 8), PctTenths(125));
        assert_eq!(percent_tenths(1, 16), PctTenths(63)); // 6.25 -> 6.3
        assert_eq!(percent_tenths(0, 0), PctTenths::ZERO);
    }

    #[test]
    fn display_has_one_decimal() {
        assert_eq!(PctTenths(600).to_string(), "60.0");
        assert_eq!(PctTenths(5).to_string(), "0.5");
        assert_eq!(PctTenths(1000).to_string(), "100.0");
    }

    #[test]
    fn majority_is_strict_and_exact() {
        let h = Area::from_hundredths;
        assert!(is_strict_majority(h(5001), h(10000)));
        assert!(!is_strict_majority(h(5000), h(10000)));
        assert!(!is_strict_majority(Area::ZERO, Area::ZERO));
    }
}
