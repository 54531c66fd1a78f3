//! crates/mp_core/src/ids.rs
//! Caller-supplied identifiers (meeting, agenda item, voter).
//! ASCII-only, strict token shape; no I/O.

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{de::Error as _, Deserialize, Deserializer, Serialize};

/// Errors returned when validating or parsing IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdError {
    Empty,
    TooLong,
    BadShape,
}

impl fmt::Display for IdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdError::Empty => write!(f, "empty id"),
            IdError::TooLong => write!(f, "id longer than {TOKEN_MAX_LEN} bytes"),
            IdError::BadShape => write!(f, "id must match [A-Za-z0-9_.:-]"),
        }
    }
}

const TOKEN_MAX_LEN: usize = 64;

/// Token: ^[A-Za-z0-9_.:-]{1,64}$ (ASCII only)
#[inline]
pub fn check_token(s: &str) -> Result<(), IdError> {
    if s.is_empty() {
        return Err(IdError::Empty);
    }
    if s.len() > TOKEN_MAX_LEN {
        return Err(IdError::TooLong);
    }
    let ok = s
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'.' | b':' | b'-'));
    if ok { Ok(()) } else { Err(IdError::BadShape) }
}

macro_rules! token_newtype {
    ($(#[$m:meta])* $name:ident) => {
        $(#[$m])*
        #[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
        #[cfg_attr(feature = "serde", derive(Serialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(String);

        impl $name {
            #[inline] pub fn as_str(&self) -> &str { &self.0 }
        }

        impl fmt::Display for $name {
            #[inline]
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
        }

        impl FromStr for $name {
            type Err = IdError;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                check_token(s)?;
                Ok(Self(s.to_owned()))
            }
        }

        impl TryFrom<&str> for $name {
            type Error = IdError;
            #[inline]
            fn try_from(value: &str) -> Result<Self, Self::Error> { value.parse() }
        }

        #[cfg(feature = "serde")]
        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
                let s = String::deserialize(d)?;
                s.parse().map_err(|e: IdError| D::Error::custom(format!("{}: {e}", stringify!($name))))
            }
        }
    }
}

token_newtype!(
    /// Meeting identifier as issued by the backing store.
    MeetingId
);
token_newtype!(
    /// Agenda item identifier; also the grouping key for ballots.
    AgendaItemId
);
token_newtype!(
    /// Voter identifier. One identity image is generated per distinct value.
    VoterId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_uuid_like_tokens() {
        let v: VoterId = "3f2b9c1e-7a4d-4e2b-9b1f-0c8d2e6a5b71".parse().unwrap();
        assert_eq!(v.as_str().len(), 36);
    }

    #[test]
    fn rejects_bad_shapes() {
        assert_eq!("".parse::<MeetingId>().unwrap_err(), IdError::Empty);
        assert_eq!("a b".parse::<MeetingId>().unwrap_err(), IdError::BadShape);
        assert_eq!("кв-1".parse::<VoterId>().unwrap_err(), IdError::BadShape);
        assert_eq!("x".repeat(65).parse::<AgendaItemId>().unwrap_err(), IdError::TooLong);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_is_transparent_and_validated() {
        let id: AgendaItemId = serde_json::from_str("\"item-7\"").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"item-7\"");
        assert!(serde_json::from_str::<AgendaItemId>("\"bad id\"").is_err());
    }
}
