//! crates/mp_core/src/area.rs
//! Fixed-point floor area (square metres, two decimals).
//!
//! Areas are stored as integer hundredths so tallies add up exactly and the
//! protocol always prints the same digits the caller sent. Floats only appear
//! at the deserialization boundary.

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Largest float we accept before its decimal form loses the hundredths digit.
const MAX_EXACT_F64: f64 = 9.0e13;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AreaError {
    Negative,
    NotFinite,
    TooLarge,
    Malformed,
}

impl fmt::Display for AreaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AreaError::Negative => write!(f, "area must not be negative"),
            AreaError::NotFinite => write!(f, "area must be a finite number"),
            AreaError::TooLarge => write!(f, "area is out of range"),
            AreaError::Malformed => write!(f, "area must be a decimal number like 123.45"),
        }
    }
}

/// Non-negative area in hundredths of a square metre.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Area(u64);

impl Area {
    pub const ZERO: Area = Area(0);

    #[inline]
    pub const fn from_hundredths(h: u64) -> Self { Area(h) }

    #[inline]
    pub const fn hundredths(self) -> u64 { self.0 }

    #[inline]
    pub const fn is_zero(self) -> bool { self.0 == 0 }

    /// Round a float to hundredths through its shortest decimal form, so
    /// `54.305` rounds exactly like the string `"54.305"`.
    pub fn from_f64(v: f64) -> Result<Self, AreaError> {
        if !v.is_finite() {
            return Err(AreaError::NotFinite);
        }
        if v < 0.0 {
            return Err(AreaError::Negative);
        }
        if v > MAX_EXACT_F64 {
            return Err(AreaError::TooLarge);
        }
        v.to_string().parse()
    }

    pub fn to_f64(self) -> f64 { self.0 as f64 / 100.0 }

    #[inline]
    pub fn checked_add(self, rhs: Area) -> Option<Area> { self.0.checked_add(rhs.0).map(Area) }

    /// Sum of areas; `None` on overflow.
    pub fn checked_sum<I: IntoIterator<Item = Area>>(it: I) -> Option<Area> {
        it.into_iter().try_fold(Area::ZERO, Area::checked_add)
    }
}

impl fmt::Display for Area {
    /// Always two decimals: `600.00`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl FromStr for Area {
    type Err = AreaError;

    /// Exact decimal parse. A third fraction digit rounds half-up; further digits are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.starts_with('-') {
            return Err(AreaError::Negative);
        }
        let (int_part, frac_part) = match s.split_once('.') {
            Some((i, f)) => (i, f),
            None => (s, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(AreaError::Malformed);
        }
        let all_digits = |p: &str| p.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(int_part) || !all_digits(frac_part) {
            return Err(AreaError::Malformed);
        }

        let whole: u64 = if int_part.is_empty() {
            0
        } else {
            int_part.parse().map_err(|_| AreaError::TooLarge)?
        };
        let fb = frac_part.as_bytes();
        let digit = |i: usize| fb.get(i).map(|b| u64::from(b - b'0')).unwrap_or(0);
        let mut cents = digit(0) * 10 + digit(1);
        if digit(2) >= 5 {
            cents += 1;
        }

        whole
            .checked_mul(100)
            .and_then(|w| w.checked_add(cents))
            .map(Area)
            .ok_or(AreaError::TooLarge)
    }
}

#[cfg(feature = "serde")]
impl Serialize for Area {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_f64(self.to_f64())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Area {
    /// Accepts a JSON number or a decimal string.
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        struct AreaVisitor;

        impl de::Visitor<'_> for AreaVisitor {
            type Value = Area;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a non-negative area as number or decimal string")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Area, E> {
                v.checked_mul(100).map(Area).ok_or_else(|| E::custom(AreaError::TooLarge))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Area, E> {
                if v < 0 {
                    return Err(E::custom(AreaError::Negative));
                }
                self.visit_u64(v as u64)
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Area, E> {
                Area::from_f64(v).map_err(E::custom)
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Area, E> {
                v.parse().map_err(E::custom)
            }
        }

        d.deserialize_any(AreaVisitor)
    }
}
