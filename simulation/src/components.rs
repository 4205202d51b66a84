//! Plain data types shared by individuals and the population
//!
//! Nothing in here draws randomness or mutates other people.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SimError;

// ============================================================================
// Identity
// ============================================================================

/// Identifier issued by the population's monotonic counter.
///
/// The value doubles as the index into the registry arena, so ids are dense
/// and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PersonId(pub u64);

impl PersonId {
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Stable opaque tag for external reporting.
    ///
    /// The splitmix64 finalizer is a bijection on `u64`, so distinct counters
    /// always map to distinct tags.
    pub fn tag(self) -> String {
        let mut z = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^= z >> 31;
        format!("{z:016x}")
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ============================================================================
// Person attributes
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl FromStr for Gender {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            other => Err(SimError::InvalidGender(other.to_string())),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CivilStatus {
    #[default]
    Single,
    Married,
    Widow,
}

/// One line of a biography: the year something happened and what it was.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BiographyEntry {
    pub year: u32,
    pub event: String,
}

impl BiographyEntry {
    pub fn new(year: u32, event: impl Into<String>) -> Self {
        Self {
            year,
            event: event.into(),
        }
    }
}

/// Personal survival curve, sampled once at birth.
///
/// `x0` is the logistic midpoint in years, `alpha` its spread.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MortalityParams {
    pub x0: f64,
    pub alpha: f64,
}

impl MortalityParams {
    /// Maps two uniform draws onto `x0 in [50, 70)` and
    /// `alpha in [x0/8, x0/4)`.
    pub fn from_uniforms(u1: f64, u2: f64) -> Self {
        let x0 = u1 * 20.0 + 50.0;
        let alpha = (1.0 + u2) * x0 / 8.0;
        Self { x0, alpha }
    }
}

/// An active marriage between two living people.
///
/// Unordered: `Couple::new(a, b) == Couple::new(b, a)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Couple {
    first: PersonId,
    second: PersonId,
}

impl Couple {
    pub fn new(a: PersonId, b: PersonId) -> Self {
        if a <= b {
            Self { first: a, second: b }
        } else {
            Self { first: b, second: a }
        }
    }

    pub fn members(self) -> (PersonId, PersonId) {
        (self.first, self.second)
    }

    pub fn contains(self, id: PersonId) -> bool {
        self.first == id || self.second == id
    }
}

// ============================================================================
// Calendar
// ============================================================================

/// Simulation clock. One tick is one year; founders are born in year 0.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Calendar {
    pub year: u32,
}

impl Calendar {
    pub fn advance(&mut self) {
        self.year += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::collections::HashSet;

    #[test]
    fn test_tags_are_unique_and_stable() {
        let tags: HashSet<String> = (0..10_000).map(|i| PersonId(i).tag()).collect();
        assert_eq!(tags.len(), 10_000);
        assert_eq!(PersonId(7).tag(), PersonId(7).tag());
        assert_eq!(PersonId(7).tag().len(), 16);
    }

    #[test]
    fn test_gender_parsing() {
        assert_eq!("male".parse::<Gender>().unwrap(), Gender::Male);
        assert_eq!("female".parse::<Gender>().unwrap(), Gender::Female);

        let err = "other".parse::<Gender>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvariantViolation);
    }

    #[test]
    fn test_mortality_params_ranges() {
        let low = MortalityParams::from_uniforms(0.0, 0.0);
        assert_eq!(low.x0, 50.0);
        assert_eq!(low.alpha, 50.0 / 8.0);

        let high = MortalityParams::from_uniforms(0.999, 0.999);
        assert!(high.x0 < 70.0);
        assert!(high.alpha < high.x0 / 4.0);
    }

    #[test]
    fn test_couple_is_unordered() {
        let c = Couple::new(PersonId(9), PersonId(2));
        assert_eq!(c, Couple::new(PersonId(2), PersonId(9)));
        assert_eq!(c.members(), (PersonId(2), PersonId(9)));
        assert!(c.contains(PersonId(9)));
        assert!(!c.contains(PersonId(3)));
    }

    #[test]
    fn test_calendar_advance() {
        let mut cal = Calendar::default();
        cal.advance();
        cal.advance();
        assert_eq!(cal.year, 2);
    }
}
