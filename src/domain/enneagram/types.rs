//! Core vocabulary: the nine types, the three instincts, discriminator pairs.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{Locale, ValidationError};

/// One of the nine Enneagram types.
///
/// Declaration order is the canonical order `1..9`; `Ord` follows it and every
/// tie-break in the engine relies on that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum EnneagramType {
    One = 1,
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Eight = 8,
    Nine = 9,
}

impl EnneagramType {
    /// All nine types in canonical order.
    pub const ALL: [EnneagramType; 9] = [
        EnneagramType::One,
        EnneagramType::Two,
        EnneagramType::Three,
        EnneagramType::Four,
        EnneagramType::Five,
        EnneagramType::Six,
        EnneagramType::Seven,
        EnneagramType::Eight,
        EnneagramType::Nine,
    ];

    pub fn try_from_u8(value: u8) -> Result<Self, ValidationError> {
        match value {
            1..=9 => Ok(Self::ALL[(value - 1) as usize]),
            _ => Err(ValidationError::out_of_range("type", 1, 9, value as i32)),
        }
    }

    /// Returns the numeric type (1..=9).
    pub fn number(&self) -> u8 {
        *self as u8
    }

    /// Zero-based position in canonical order.
    pub fn index(&self) -> usize {
        (self.number() - 1) as usize
    }

    /// Type label used as map key on the wire ("1".."9").
    pub fn label(&self) -> String {
        self.number().to_string()
    }

    /// Neighbour counter-clockwise on the circle (1 wraps to 9).
    pub fn left_neighbor(&self) -> Self {
        match self {
            EnneagramType::One => EnneagramType::Nine,
            other => Self::ALL[other.index() - 1],
        }
    }

    /// Neighbour clockwise on the circle (9 wraps to 1).
    pub fn right_neighbor(&self) -> Self {
        match self {
            EnneagramType::Nine => EnneagramType::One,
            other => Self::ALL[other.index() + 1],
        }
    }
}

impl fmt::Display for EnneagramType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

impl FromStr for EnneagramType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u8 = s
            .trim()
            .parse()
            .map_err(|_| ValidationError::invalid_format("type", format!("'{}' is not a type", s)))?;
        Self::try_from_u8(value)
    }
}

impl Serialize for EnneagramType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.label())
    }
}

impl<'de> Deserialize<'de> for EnneagramType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TypeVisitor;

        impl<'de> Visitor<'de> for TypeVisitor {
            type Value = EnneagramType;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an enneagram type 1..9 as number or string")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                u8::try_from(v)
                    .ok()
                    .and_then(|v| EnneagramType::try_from_u8(v).ok())
                    .ok_or_else(|| E::custom(format!("invalid enneagram type {}", v)))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                u64::try_from(v)
                    .map_err(|_| E::custom(format!("invalid enneagram type {}", v)))
                    .and_then(|v| self.visit_u64(v))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                v.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_any(TypeVisitor)
    }
}

/// Instinctual subtype.
///
/// Declaration order `sp, so, sx` is the tie-break order for the dominant
/// instinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Instinct {
    Sp,
    So,
    Sx,
}

impl Instinct {
    pub const ALL: [Instinct; 3] = [Instinct::Sp, Instinct::So, Instinct::Sx];

    pub fn code(&self) -> &'static str {
        match self {
            Instinct::Sp => "sp",
            Instinct::So => "so",
            Instinct::Sx => "sx",
        }
    }

    /// Localised display name.
    pub fn display_name(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Instinct::Sp, Locale::En) => "Self Preservation",
            (Instinct::So, Locale::En) => "Social",
            (Instinct::Sx, Locale::En) => "Intimate",
            (Instinct::Sp, Locale::Kr) => "자기보존",
            (Instinct::So, Locale::Kr) => "사회적",
            (Instinct::Sx, Locale::Kr) => "친밀",
        }
    }
}

impl fmt::Display for Instinct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A pair of commonly confused types that has its own forced-choice items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DiscriminatorPair {
    #[serde(rename = "1vs6")]
    OneSix,
    #[serde(rename = "3vs7")]
    ThreeSeven,
    #[serde(rename = "4vs9")]
    FourNine,
    #[serde(rename = "5vs1")]
    FiveOne,
    #[serde(rename = "2vs9")]
    TwoNine,
    #[serde(rename = "8vs3")]
    EightThree,
}

impl DiscriminatorPair {
    /// Catalog order; the fallback in pair selection walks this order.
    pub const ALL: [DiscriminatorPair; 6] = [
        DiscriminatorPair::OneSix,
        DiscriminatorPair::ThreeSeven,
        DiscriminatorPair::FourNine,
        DiscriminatorPair::FiveOne,
        DiscriminatorPair::TwoNine,
        DiscriminatorPair::EightThree,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            DiscriminatorPair::OneSix => "1vs6",
            DiscriminatorPair::ThreeSeven => "3vs7",
            DiscriminatorPair::FourNine => "4vs9",
            DiscriminatorPair::FiveOne => "5vs1",
            DiscriminatorPair::TwoNine => "2vs9",
            DiscriminatorPair::EightThree => "8vs3",
        }
    }

    /// Type credited by option `A`.
    pub fn left(&self) -> EnneagramType {
        use EnneagramType::*;
        match self {
            DiscriminatorPair::OneSix => One,
            DiscriminatorPair::ThreeSeven => Three,
            DiscriminatorPair::FourNine => Four,
            DiscriminatorPair::FiveOne => Five,
            DiscriminatorPair::TwoNine => Two,
            DiscriminatorPair::EightThree => Eight,
        }
    }

    /// Type credited by option `B`.
    pub fn right(&self) -> EnneagramType {
        use EnneagramType::*;
        match self {
            DiscriminatorPair::OneSix => Six,
            DiscriminatorPair::ThreeSeven => Seven,
            DiscriminatorPair::FourNine => Nine,
            DiscriminatorPair::FiveOne => One,
            DiscriminatorPair::TwoNine => Nine,
            DiscriminatorPair::EightThree => Three,
        }
    }

    pub fn contains(&self, t: EnneagramType) -> bool {
        self.left() == t || self.right() == t
    }

    /// True when this pair is exactly `{a, b}` in either order.
    pub fn covers(&self, a: EnneagramType, b: EnneagramType) -> bool {
        (self.left() == a && self.right() == b) || (self.left() == b && self.right() == a)
    }
}

impl fmt::Display for DiscriminatorPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn canonical_order_is_numeric() {
        let numbers: Vec<u8> = EnneagramType::ALL.iter().map(|t| t.number()).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5, 6, 7, 8, 9]);
        assert!(EnneagramType::One < EnneagramType::Nine);
    }

    #[test]
    fn try_from_u8_bounds() {
        assert_eq!(EnneagramType::try_from_u8(4).unwrap(), EnneagramType::Four);
        assert!(EnneagramType::try_from_u8(0).is_err());
        assert!(EnneagramType::try_from_u8(10).is_err());
    }

    #[test]
    fn neighbors_wrap_around_the_circle() {
        assert_eq!(EnneagramType::One.left_neighbor(), EnneagramType::Nine);
        assert_eq!(EnneagramType::One.right_neighbor(), EnneagramType::Two);
        assert_eq!(EnneagramType::Nine.right_neighbor(), EnneagramType::One);
        assert_eq!(EnneagramType::Five.left_neighbor(), EnneagramType::Four);
    }

    #[test]
    fn type_serializes_as_label_and_accepts_numbers() {
        assert_eq!(serde_json::to_string(&EnneagramType::Seven).unwrap(), "\"7\"");
        let from_str: EnneagramType = serde_json::from_str("\"3\"").unwrap();
        let from_num: EnneagramType = serde_json::from_str("3").unwrap();
        assert_eq!(from_str, EnneagramType::Three);
        assert_eq!(from_num, EnneagramType::Three);
        assert!(serde_json::from_str::<EnneagramType>("12").is_err());
    }

    #[test]
    fn type_keyed_map_serializes_with_string_keys() {
        let mut map = BTreeMap::new();
        map.insert(EnneagramType::Two, 4u32);
        map.insert(EnneagramType::One, 3u32);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"1":3,"2":4}"#);
    }

    #[test]
    fn instinct_order_and_codes() {
        assert!(Instinct::Sp < Instinct::So && Instinct::So < Instinct::Sx);
        assert_eq!(serde_json::to_string(&Instinct::Sx).unwrap(), "\"sx\"");
        assert_eq!(Instinct::Sx.display_name(Locale::En), "Intimate");
    }

    #[test]
    fn pair_sides_match_id() {
        for pair in DiscriminatorPair::ALL {
            let expected = format!("{}vs{}", pair.left(), pair.right());
            assert_eq!(pair.id(), expected);
        }
    }

    #[test]
    fn pair_covers_is_unordered() {
        let pair = DiscriminatorPair::FiveOne;
        assert!(pair.covers(EnneagramType::One, EnneagramType::Five));
        assert!(pair.covers(EnneagramType::Five, EnneagramType::One));
        assert!(!pair.covers(EnneagramType::One, EnneagramType::Six));
        assert!(pair.contains(EnneagramType::Five));
    }
}
