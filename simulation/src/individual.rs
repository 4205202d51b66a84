//! Individual - one simulated person and their life-event model
//!
//! Every decision is an independent draw from the caller's random source.
//! An individual only ever mutates itself: deaths report the widowed partner
//! back to the caller instead of reaching into the partner directly.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::components::{BiographyEntry, CivilStatus, Gender, MortalityParams, PersonId};
use crate::error::{Result, SimError};
use crate::names::NameProvider;
use crate::random::RandomSource;

/// Ceiling of the yearly death probability, reached far past `x0`
const MAX_DEATH_PROBABILITY: f64 = 0.1;

/// Singles start wanting to marry at this age, +20% per year after
const SINGLE_MARRIAGE_AGE: f64 = 15.0;
const SINGLE_MARRIAGE_SLOPE: f64 = 0.2;

/// Widows lose interest past this age, -3% per year
const WIDOW_REFERENCE_AGE: f64 = 70.0;
const WIDOW_BASE_DESIRE: f64 = 0.5;
const WIDOW_SLOPE: f64 = 0.03;
const WIDOW_MAX_DESIRE: f64 = 0.6;

/// Each existing child lowers the wish for another by 20%
const CHILD_DESIRE_PENALTY: f64 = 0.2;

/// Fertility starts declining past these ages
const MALE_FERTILITY_AGE: f64 = 40.0;
const MALE_FERTILITY_SLOPE: f64 = 0.1;
const FEMALE_FERTILITY_AGE: f64 = 30.0;
const FEMALE_FERTILITY_SLOPE: f64 = 0.3;

/// Cumulative odds of a one, two or three part given name
const GIVEN_NAME_PARTS: [(f64, usize); 3] = [(0.85, 1), (0.995, 2), (1.0, 3)];

/// Redraws allowed when a given name is already taken by a sibling
const MAX_NAME_ATTEMPTS: usize = 100;

/// What happened to an individual during one year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearOutcome {
    AlreadyDead,
    Survived,
    /// Died this year. If they were married the partner must be notified.
    Died { widowed_partner: Option<PersonId> },
}

/// Construction parameters. Anything left `None` is drawn at random.
#[derive(Debug, Clone)]
pub struct NewIndividual {
    pub id: PersonId,
    pub born: u32,
    pub gender: Option<Gender>,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub father: Option<PersonId>,
    pub mother: Option<PersonId>,
}

impl NewIndividual {
    /// A founder: no parents, everything else random.
    pub fn founder(id: PersonId, born: u32) -> Self {
        Self {
            id,
            born,
            gender: None,
            given_name: None,
            family_name: None,
            father: None,
            mother: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Individual {
    id: PersonId,
    born: u32,
    gender: Gender,
    given_name: String,
    family_name: String,
    age: u32,
    alive: bool,
    died: Option<u32>,
    civil_status: CivilStatus,
    partners: Vec<PersonId>,
    married_at_age: Option<u32>,
    children: Vec<PersonId>,
    father: Option<PersonId>,
    mother: Option<PersonId>,
    mortality: MortalityParams,
    biography: Vec<BiographyEntry>,
}

impl Individual {
    /// Create a newborn (or founder) aged zero.
    ///
    /// `taken_given_names` holds the given names of the father's existing
    /// children; a drawn given name is redrawn while it collides with one.
    pub fn new(
        params: NewIndividual,
        taken_given_names: &[String],
        rng: &mut dyn RandomSource,
        names: &mut dyn NameProvider,
    ) -> Self {
        let mortality = MortalityParams::from_uniforms(rng.uniform(), rng.uniform());

        let gender = params.gender.unwrap_or_else(|| {
            if rng.weighted_bool(0.5) {
                Gender::Male
            } else {
                Gender::Female
            }
        });

        let given_name = match params.given_name {
            Some(name) => name,
            None => draw_given_name(gender, taken_given_names, rng, names),
        };
        let family_name = match params.family_name {
            Some(name) => name,
            None => names.family_name(rng),
        };

        Self {
            id: params.id,
            born: params.born,
            gender,
            given_name,
            family_name,
            age: 0,
            alive: true,
            died: None,
            civil_status: CivilStatus::Single,
            partners: Vec::new(),
            married_at_age: None,
            children: Vec::new(),
            father: params.father,
            mother: params.mother,
            mortality,
            biography: vec![BiographyEntry::new(params.born, "I was born.")],
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn id(&self) -> PersonId {
        self.id
    }

    pub fn born(&self) -> u32 {
        self.born
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn given_name(&self) -> &str {
        &self.given_name
    }

    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    pub fn name(&self) -> String {
        format!("{} {}", self.given_name, self.family_name)
    }

    /// Years since birth. Frozen at the age of death once deceased.
    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn died(&self) -> Option<u32> {
        self.died
    }

    pub fn civil_status(&self) -> CivilStatus {
        self.civil_status
    }

    pub fn partners(&self) -> &[PersonId] {
        &self.partners
    }

    /// The partner of an ongoing marriage.
    pub fn current_partner(&self) -> Option<PersonId> {
        match self.civil_status {
            CivilStatus::Married => self.partners.last().copied(),
            _ => None,
        }
    }

    pub fn married_at_age(&self) -> Option<u32> {
        self.married_at_age
    }

    pub fn children(&self) -> &[PersonId] {
        &self.children
    }

    pub fn father(&self) -> Option<PersonId> {
        self.father
    }

    pub fn mother(&self) -> Option<PersonId> {
        self.mother
    }

    pub fn mortality(&self) -> MortalityParams {
        self.mortality
    }

    pub fn biography(&self) -> &[BiographyEntry] {
        &self.biography
    }

    /// Year in the simulation clock matching the individual's current age.
    fn current_year(&self) -> u32 {
        self.born + self.age
    }

    fn ensure_alive(&self, operation: &'static str) -> Result<()> {
        if self.alive {
            Ok(())
        } else {
            Err(SimError::Deceased {
                id: self.id,
                operation,
            })
        }
    }

    // ------------------------------------------------------------------
    // Mortality
    // ------------------------------------------------------------------

    /// Probability of dying before reaching the next birthday.
    pub fn death_probability(&self) -> f64 {
        let next_age = f64::from(self.age + 1);
        let MortalityParams { x0, alpha } = self.mortality;
        MAX_DEATH_PROBABILITY / (1.0 + (-(next_age - x0) / alpha).exp())
    }

    /// Live through one year, or die trying.
    pub fn advance_one_year(&mut self, rng: &mut dyn RandomSource) -> YearOutcome {
        if !self.alive {
            return YearOutcome::AlreadyDead;
        }

        if rng.uniform() < self.death_probability() {
            let died = self.current_year();
            self.alive = false;
            self.died = Some(died);
            self.biography
                .push(BiographyEntry::new(died, format!("I passed away, at age {}", self.age)));
            YearOutcome::Died {
                widowed_partner: self.current_partner(),
            }
        } else {
            self.age += 1;
            YearOutcome::Survived
        }
    }

    pub fn notify_partner_died(&mut self, partner_name: &str) -> Result<()> {
        self.ensure_alive("be widowed")?;
        self.civil_status = CivilStatus::Widow;
        self.biography.push(BiographyEntry::new(
            self.current_year(),
            format!("My partner, {partner_name} passed away."),
        ));
        Ok(())
    }

    // ------------------------------------------------------------------
    // Marriage
    // ------------------------------------------------------------------

    pub fn marriage_desire(&self) -> f64 {
        let age = f64::from(self.age);
        match self.civil_status {
            CivilStatus::Married => 0.0,
            CivilStatus::Widow => {
                (WIDOW_BASE_DESIRE - (age - WIDOW_REFERENCE_AGE) * WIDOW_SLOPE)
                    .clamp(0.0, WIDOW_MAX_DESIRE)
            }
            CivilStatus::Single => ((age - SINGLE_MARRIAGE_AGE) * SINGLE_MARRIAGE_SLOPE).clamp(0.0, 1.0),
        }
    }

    pub fn wants_to_marry(&self, rng: &mut dyn RandomSource) -> bool {
        if !self.alive || self.civil_status == CivilStatus::Married {
            return false;
        }
        rng.weighted_bool(self.marriage_desire())
    }

    /// Odds of finding `other` acceptable, from the age gap alone.
    pub fn compatibility(&self, other: &Individual) -> f64 {
        let diff = f64::from(self.age.abs_diff(other.age));
        let d2 = diff * diff;
        0.8 * (-0.05 * d2).exp() + 0.2 * (-0.005 * d2).exp()
    }

    /// One-sided: `a.is_compatible_with(b)` and `b.is_compatible_with(a)`
    /// are separate draws.
    pub fn is_compatible_with(&self, other: &Individual, rng: &mut dyn RandomSource) -> bool {
        if !self.alive || !other.alive || self.id == other.id || self.gender == other.gender {
            return false;
        }
        rng.weighted_bool(self.compatibility(other))
    }

    /// Record a marriage on this side only; the caller marries both sides.
    pub fn marry(&mut self, other: PersonId, other_name: &str) -> Result<()> {
        self.ensure_alive("marry")?;
        if self.civil_status == CivilStatus::Married {
            return Err(SimError::AlreadyMarried { id: self.id });
        }
        if other == self.id {
            return Err(SimError::SelfReference {
                id: self.id,
                relation: "marry",
            });
        }

        self.civil_status = CivilStatus::Married;
        self.partners.push(other);
        self.married_at_age = Some(self.age);
        self.biography
            .push(BiographyEntry::new(self.current_year(), format!("I married {other_name}")));
        Ok(())
    }

    // ------------------------------------------------------------------
    // Reproduction
    // ------------------------------------------------------------------

    pub fn child_desire(&self) -> f64 {
        (1.0 - CHILD_DESIRE_PENALTY * self.children.len() as f64).clamp(0.0, 1.0)
    }

    pub fn wants_child(&self, rng: &mut dyn RandomSource) -> bool {
        if !self.alive {
            return false;
        }
        rng.weighted_bool(self.child_desire())
    }

    pub fn fertility(&self) -> f64 {
        let age = f64::from(self.age);
        let (onset, slope) = match self.gender {
            Gender::Male => (MALE_FERTILITY_AGE, MALE_FERTILITY_SLOPE),
            Gender::Female => (FEMALE_FERTILITY_AGE, FEMALE_FERTILITY_SLOPE),
        };
        (1.0 - slope * (age - onset)).clamp(0.0, 1.0)
    }

    pub fn can_conceive(&self, rng: &mut dyn RandomSource) -> bool {
        if !self.alive {
            return false;
        }
        rng.weighted_bool(self.fertility())
    }

    pub fn register_child(&mut self, child: PersonId, child_name: &str) -> Result<()> {
        self.ensure_alive("register a child")?;
        if child == self.id {
            return Err(SimError::SelfReference {
                id: self.id,
                relation: "parent",
            });
        }
        self.children.push(child);
        self.biography
            .push(BiographyEntry::new(self.current_year(), format!("{child_name} was born.")));
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn set_age(&mut self, age: u32) {
        self.age = age;
    }
}

fn draw_given_name(
    gender: Gender,
    taken: &[String],
    rng: &mut dyn RandomSource,
    names: &mut dyn NameProvider,
) -> String {
    let mut attempts = 0;
    loop {
        let roll = rng.uniform();
        let parts = GIVEN_NAME_PARTS
            .iter()
            .find(|(cumulative, _)| roll < *cumulative)
            .map(|(_, parts)| *parts)
            .unwrap_or(1);
        let name = (0..parts)
            .map(|_| names.given_name(gender, rng))
            .collect::<Vec<_>>()
            .join(" ");

        attempts += 1;
        if !taken.contains(&name) {
            return name;
        }
        if attempts >= MAX_NAME_ATTEMPTS {
            tracing::warn!("Giving up on a unique given name after {} attempts, keeping {}", attempts, name);
            return name;
        }
    }
}

impl fmt::Display for Individual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.died {
            Some(died) => write!(f, "{} ({} - {})", self.name(), self.born, died),
            None => write!(f, "{} ({} - )", self.name(), self.born),
        }
    }
}
