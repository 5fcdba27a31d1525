//! Likert value object (1 to 5 agreement scale).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Five-point agreement rating: 1 (strongly disagree) to 5 (strongly agree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum Likert {
    StronglyDisagree = 1,
    Disagree = 2,
    Neutral = 3,
    Agree = 4,
    StronglyAgree = 5,
}

impl Likert {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Creates a Likert value from an integer, returning error if out of range.
    pub fn try_from_u8(value: u8) -> Result<Self, ValidationError> {
        match value {
            1 => Ok(Likert::StronglyDisagree),
            2 => Ok(Likert::Disagree),
            3 => Ok(Likert::Neutral),
            4 => Ok(Likert::Agree),
            5 => Ok(Likert::StronglyAgree),
            _ => Err(ValidationError::out_of_range(
                "likert",
                Self::MIN as i32,
                Self::MAX as i32,
                value as i32,
            )),
        }
    }

    /// Accepts a JSON-ish number (integral floats included) in range 1..=5.
    pub fn from_f64(value: f64) -> Option<Self> {
        if value.fract() != 0.0 || value < Self::MIN as f64 || value > Self::MAX as f64 {
            return None;
        }
        Self::try_from_u8(value as u8).ok()
    }

    /// Returns the numeric value.
    pub fn value(&self) -> u8 {
        *self as u8
    }
}

impl TryFrom<u8> for Likert {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::try_from_u8(value)
    }
}

impl From<Likert> for u8 {
    fn from(value: Likert) -> Self {
        value.value()
    }
}

impl fmt::Display for Likert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn likert_accepts_one_through_five() {
        for v in 1..=5u8 {
            assert_eq!(Likert::try_from_u8(v).unwrap().value(), v);
        }
    }

    #[test]
    fn likert_rejects_out_of_range() {
        assert!(Likert::try_from_u8(0).is_err());
        assert!(Likert::try_from_u8(6).is_err());
    }

    #[test]
    fn likert_from_f64_requires_integral_values() {
        assert_eq!(Likert::from_f64(4.0), Some(Likert::Agree));
        assert_eq!(Likert::from_f64(4.5), None);
        assert_eq!(Likert::from_f64(0.0), None);
        assert_eq!(Likert::from_f64(f64::NAN), None);
    }

    #[test]
    fn likert_serde_round_trips_as_integer() {
        assert_eq!(serde_json::to_string(&Likert::Neutral).unwrap(), "3");
        let parsed: Likert = serde_json::from_str("5").unwrap();
        assert_eq!(parsed, Likert::StronglyAgree);
        assert!(serde_json::from_str::<Likert>("9").is_err());
    }
}
