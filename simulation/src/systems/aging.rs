//! Aging System - one year of life (or death) for every living person

use tracing::debug;

use crate::components::PersonId;
use crate::error::Result;
use crate::individual::YearOutcome;
use crate::random::RandomSource;
use crate::registry::Registry;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AgingResult {
    pub deaths: Vec<PersonId>,
    pub widowed: u32,
}

/// Advance everyone in `living` by a year, in order.
///
/// `living` must be a snapshot taken before the pass. A death is reported to
/// the surviving partner immediately, so a partner aged later in the same pass
/// is already a widow when their own draw happens.
pub fn aging_system(
    registry: &mut Registry,
    living: &[PersonId],
    rng: &mut dyn RandomSource,
) -> Result<AgingResult> {
    let mut result = AgingResult::default();

    for &id in living {
        let outcome = registry.get_mut(id)?.advance_one_year(rng);
        if let YearOutcome::Died { widowed_partner } = outcome {
            let deceased = registry.get(id)?;
            let name = deceased.name();
            debug!("{} died at age {}", name, deceased.age());
            result.deaths.push(id);

            if let Some(partner) = widowed_partner {
                registry.get_mut(partner)?.notify_partner_died(&name)?;
                result.widowed += 1;
            }
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{CivilStatus, Gender};
    use crate::individual::{Individual, NewIndividual};
    use crate::names::ListNames;
    use crate::random::testing::ForcedRandom;
    use crate::random::SimRng;

    fn married_pair() -> Registry {
        let mut rng = SimRng::seed_from_u64(2);
        let mut registry = Registry::new();
        for (i, gender) in [Gender::Male, Gender::Female].into_iter().enumerate() {
            let mut params = NewIndividual::founder(PersonId(i as u64), 0);
            params.gender = Some(gender);
            registry
                .insert(Individual::new(params, &[], &mut rng, &mut ListNames))
                .unwrap();
        }
        let (a, b) = registry.pair_mut(PersonId(0), PersonId(1)).unwrap();
        let (a_name, b_name) = (a.name(), b.name());
        a.marry(PersonId(1), &b_name).unwrap();
        b.marry(PersonId(0), &a_name).unwrap();
        registry
    }

    #[test]
    fn test_everyone_ages() {
        let mut registry = married_pair();
        let mut rng = ForcedRandom::agreeable(0);
        let result = aging_system(&mut registry, &[PersonId(0), PersonId(1)], &mut rng).unwrap();
        assert!(result.deaths.is_empty());
        assert!(registry.iter().all(|p| p.age() == 1));
    }

    #[test]
    fn test_death_widows_the_partner() {
        let mut registry = married_pair();
        let mut rng = ForcedRandom::lethal(0);
        // Only the husband goes through the pass, so the wife survives as a widow
        let result = aging_system(&mut registry, &[PersonId(0)], &mut rng).unwrap();
        assert_eq!(result.deaths, vec![PersonId(0)]);
        assert_eq!(result.widowed, 1);

        let wife = registry.get(PersonId(1)).unwrap();
        assert!(wife.is_alive());
        assert_eq!(wife.civil_status(), CivilStatus::Widow);
    }

    #[test]
    fn test_both_die_in_the_same_year() {
        let mut registry = married_pair();
        let mut rng = ForcedRandom::lethal(0);
        let result = aging_system(&mut registry, &[PersonId(0), PersonId(1)], &mut rng).unwrap();
        assert_eq!(result.deaths.len(), 2);
        // The second to die was already widowed, so nobody is left to notify
        assert_eq!(result.widowed, 1);
        assert_eq!(registry.get(PersonId(1)).unwrap().civil_status(), CivilStatus::Widow);
    }
}
