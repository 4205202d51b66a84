//! Matchmaking System
//!
//! Pairs willing adults into marriages. Greedy: each willing person scans a
//! random handful of candidates and takes the first one that works out.

use tracing::debug;

use crate::components::{Couple, PersonId};
use crate::error::Result;
use crate::random::RandomSource;
use crate::registry::Registry;

/// Candidate pool size is drawn from `[MIN_CANDIDATES, MAX_CANDIDATES)`,
/// capped by the population size.
const MIN_CANDIDATES: usize = 5;
const MAX_CANDIDATES: usize = 50;

/// How one willing person fared in the marriage pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    Matched(PersonId),
    /// Nobody else alive to consider.
    NoCandidates,
    /// Candidates were scanned but none was willing and compatible.
    NoMatch,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub marriages: Vec<Couple>,
    pub unmatched: u32,
    pub no_candidates: u32,
}

/// Run the marriage pass over `living`, the living set as it stood before
/// this year's births. New couples are appended to `couples`.
pub fn matchmaking_system(
    registry: &mut Registry,
    living: &[PersonId],
    couples: &mut Vec<Couple>,
    rng: &mut dyn RandomSource,
) -> Result<MatchResult> {
    let mut result = MatchResult::default();

    for &id in living {
        if !registry.get(id)?.wants_to_marry(rng) {
            continue;
        }

        match find_match(registry, id, living, rng)? {
            MatchOutcome::Matched(partner) => {
                let (person, other) = registry.pair_mut(id, partner)?;
                let (person_name, other_name) = (person.name(), other.name());
                person.marry(partner, &other_name)?;
                other.marry(id, &person_name)?;
                debug!("{} married {}", person_name, other_name);

                let couple = Couple::new(id, partner);
                couples.push(couple);
                result.marriages.push(couple);
            }
            MatchOutcome::NoCandidates => result.no_candidates += 1,
            MatchOutcome::NoMatch => result.unmatched += 1,
        }
    }

    Ok(result)
}

/// Scan a random sample of `living` for the first mutual match for `id`.
///
/// The sample may include `id` itself; it is never compatible with itself.
pub fn find_match(
    registry: &Registry,
    id: PersonId,
    living: &[PersonId],
    rng: &mut dyn RandomSource,
) -> Result<MatchOutcome> {
    if living.len() < 2 {
        return Ok(MatchOutcome::NoCandidates);
    }

    let size = rng.int_in_range(MIN_CANDIDATES, MAX_CANDIDATES).min(living.len());
    let person = registry.get(id)?;

    for index in rng.sample_indices(living.len(), size) {
        let candidate = registry.get(living[index])?;
        if !candidate.wants_to_marry(rng) {
            continue;
        }
        let wanted = person.is_compatible_with(candidate, rng);
        let wanted_back = candidate.is_compatible_with(person, rng);
        if wanted && wanted_back {
            return Ok(MatchOutcome::Matched(candidate.id()));
        }
    }

    Ok(MatchOutcome::NoMatch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{CivilStatus, Gender};
    use crate::individual::{Individual, NewIndividual};
    use crate::names::ListNames;
    use crate::random::testing::ForcedRandom;
    use crate::random::SimRng;

    fn adults(genders: &[Gender], age: u32) -> Registry {
        let mut rng = SimRng::seed_from_u64(21);
        let mut registry = Registry::new();
        for (i, &gender) in genders.iter().enumerate() {
            let mut params = NewIndividual::founder(PersonId(i as u64), 0);
            params.gender = Some(gender);
            let mut person = Individual::new(params, &[], &mut rng, &mut ListNames);
            person.set_age(age);
            registry.insert(person).unwrap();
        }
        registry
    }

    fn ids(n: u64) -> Vec<PersonId> {
        (0..n).map(PersonId).collect()
    }

    #[test]
    fn test_willing_pair_marries_once() {
        let mut registry = adults(&[Gender::Male, Gender::Female], 25);
        let mut couples = vec![];
        let mut rng = ForcedRandom::agreeable(3);

        let result = matchmaking_system(&mut registry, &ids(2), &mut couples, &mut rng).unwrap();
        assert_eq!(result.marriages.len(), 1);
        assert_eq!(couples, vec![Couple::new(PersonId(0), PersonId(1))]);

        let a = registry.get(PersonId(0)).unwrap();
        let b = registry.get(PersonId(1)).unwrap();
        assert_eq!(a.civil_status(), CivilStatus::Married);
        assert_eq!(a.current_partner(), Some(PersonId(1)));
        assert_eq!(b.current_partner(), Some(PersonId(0)));

        // Married people are out of the market
        let again = matchmaking_system(&mut registry, &ids(2), &mut couples, &mut rng).unwrap();
        assert!(again.marriages.is_empty());
        assert_eq!(couples.len(), 1);
    }

    #[test]
    fn test_widow_marries_again() {
        let mut registry = adults(&[Gender::Male, Gender::Female, Gender::Male], 40);
        let (first, widow) = registry.pair_mut(PersonId(0), PersonId(1)).unwrap();
        let (first_name, widow_name) = (first.name(), widow.name());
        first.marry(PersonId(1), &widow_name).unwrap();
        widow.marry(PersonId(0), &first_name).unwrap();
        first.advance_one_year(&mut ForcedRandom::lethal(0));
        widow.notify_partner_died(&first_name).unwrap();

        let mut couples = vec![];
        let mut rng = ForcedRandom::agreeable(3);
        let living = vec![PersonId(1), PersonId(2)];
        let result = matchmaking_system(&mut registry, &living, &mut couples, &mut rng).unwrap();

        assert_eq!(result.marriages, vec![Couple::new(PersonId(1), PersonId(2))]);
        assert_eq!(couples, vec![Couple::new(PersonId(1), PersonId(2))]);
        let widow = registry.get(PersonId(1)).unwrap();
        assert_eq!(widow.civil_status(), CivilStatus::Married);
        assert_eq!(widow.current_partner(), Some(PersonId(2)));
        assert_eq!(widow.partners(), &[PersonId(0), PersonId(2)]);
        assert_eq!(registry.get(PersonId(2)).unwrap().current_partner(), Some(PersonId(1)));
    }

    #[test]
    fn test_same_gender_never_matches() {
        let mut registry = adults(&[Gender::Female, Gender::Female, Gender::Female], 25);
        let mut couples = vec![];
        let mut rng = ForcedRandom::agreeable(3);
        let result = matchmaking_system(&mut registry, &ids(3), &mut couples, &mut rng).unwrap();
        assert!(couples.is_empty());
        assert_eq!(result.unmatched, 3);
    }

    #[test]
    fn test_lone_person_has_no_candidates() {
        let mut registry = adults(&[Gender::Male], 25);
        let mut couples = vec![];
        let mut rng = ForcedRandom::agreeable(3);
        let result = matchmaking_system(&mut registry, &ids(1), &mut couples, &mut rng).unwrap();
        assert!(couples.is_empty());
        assert_eq!(result.no_candidates, 1);
    }

    #[test]
    fn test_children_are_not_willing() {
        let mut registry = adults(&[Gender::Male, Gender::Female], 10);
        let mut couples = vec![];
        let mut rng = ForcedRandom::agreeable(3);
        let result = matchmaking_system(&mut registry, &ids(2), &mut couples, &mut rng).unwrap();
        assert_eq!(result, MatchResult::default());
    }

    #[test]
    fn test_everyone_married_at_most_once_per_pass() {
        let genders: Vec<Gender> = (0..40)
            .map(|i| if i % 2 == 0 { Gender::Male } else { Gender::Female })
            .collect();
        let mut registry = adults(&genders, 25);
        let mut couples = vec![];
        let mut rng = SimRng::seed_from_u64(99);
        matchmaking_system(&mut registry, &ids(40), &mut couples, &mut rng).unwrap();

        assert!(!couples.is_empty());
        let mut seen = std::collections::HashSet::new();
        for couple in &couples {
            let (a, b) = couple.members();
            assert!(seen.insert(a));
            assert!(seen.insert(b));
            assert_eq!(registry.get(a).unwrap().current_partner(), Some(b));
            assert_eq!(registry.get(b).unwrap().current_partner(), Some(a));
        }
    }
}
