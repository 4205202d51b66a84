//! Death System
//!
//! Moves the newly deceased from the living set into the archive and
//! dissolves couples that lost a member.

use crate::components::{Couple, PersonId};
use crate::error::Result;
use crate::registry::Registry;

/// Split `living` into survivors and the dead; the dead are appended to
/// `archive` in living-set order. Returns how many were archived.
///
/// Every id is looked up before anything moves, so an unknown id leaves
/// both sets untouched.
pub fn death_system(registry: &Registry, living: &mut Vec<PersonId>, archive: &mut Vec<PersonId>) -> Result<u32> {
    let alive = living
        .iter()
        .map(|&id| registry.get(id).map(|p| p.is_alive()))
        .collect::<Result<Vec<bool>>>()?;

    let mut survivors = Vec::with_capacity(living.len());
    let mut archived = 0;
    for (id, alive) in living.iter().copied().zip(alive) {
        if alive {
            survivors.push(id);
        } else {
            archive.push(id);
            archived += 1;
        }
    }
    *living = survivors;

    Ok(archived)
}

/// Drop every couple with a deceased member. Returns the number dissolved.
pub fn prune_couples(registry: &Registry, couples: &mut Vec<Couple>) -> Result<u32> {
    let intact = couples
        .iter()
        .map(|couple| {
            let (a, b) = couple.members();
            Ok(registry.get(a)?.is_alive() && registry.get(b)?.is_alive())
        })
        .collect::<Result<Vec<bool>>>()?;

    let before = couples.len();
    *couples = couples
        .iter()
        .copied()
        .zip(intact)
        .filter_map(|(couple, keep)| keep.then_some(couple))
        .collect();

    Ok((before - couples.len()) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimError;
    use crate::individual::{Individual, NewIndividual};
    use crate::names::ListNames;
    use crate::random::testing::ForcedRandom;
    use crate::random::SimRng;

    fn registry_of(n: u64) -> Registry {
        let mut rng = SimRng::seed_from_u64(11);
        let mut registry = Registry::new();
        for i in 0..n {
            let person = Individual::new(NewIndividual::founder(PersonId(i), 0), &[], &mut rng, &mut ListNames);
            registry.insert(person).unwrap();
        }
        registry
    }

    fn kill(registry: &mut Registry, id: PersonId) {
        registry
            .get_mut(id)
            .unwrap()
            .advance_one_year(&mut ForcedRandom::lethal(0));
    }

    #[test]
    fn test_partition_preserves_order() {
        let mut registry = registry_of(5);
        kill(&mut registry, PersonId(3));
        kill(&mut registry, PersonId(1));

        let mut living: Vec<PersonId> = (0..5).map(PersonId).collect();
        let mut archive = vec![];
        let deaths = death_system(&registry, &mut living, &mut archive).unwrap();

        assert_eq!(deaths, 2);
        assert_eq!(living, vec![PersonId(0), PersonId(2), PersonId(4)]);
        assert_eq!(archive, vec![PersonId(1), PersonId(3)]);
    }

    #[test]
    fn test_prune_couples() {
        let mut registry = registry_of(4);
        kill(&mut registry, PersonId(2));

        let mut couples = vec![
            Couple::new(PersonId(0), PersonId(1)),
            Couple::new(PersonId(2), PersonId(3)),
        ];
        assert_eq!(prune_couples(&registry, &mut couples).unwrap(), 1);
        assert_eq!(couples, vec![Couple::new(PersonId(0), PersonId(1))]);
    }

    #[test]
    fn test_empty_population() {
        let registry = Registry::new();
        let mut living = vec![];
        let mut archive = vec![];
        let mut couples = vec![];
        assert_eq!(death_system(&registry, &mut living, &mut archive).unwrap(), 0);
        assert_eq!(prune_couples(&registry, &mut couples).unwrap(), 0);
    }

    #[test]
    fn test_unknown_id_is_an_error_not_a_death() {
        let registry = registry_of(2);
        let mut living = vec![PersonId(0), PersonId(42), PersonId(1)];
        let mut archive = vec![];

        let err = death_system(&registry, &mut living, &mut archive).unwrap_err();
        assert!(matches!(err, SimError::UnknownPerson(PersonId(42))));
        assert!(archive.is_empty());
        assert_eq!(living, vec![PersonId(0), PersonId(42), PersonId(1)]);

        let err = death_system(&Registry::new(), &mut vec![PersonId(42)], &mut archive).unwrap_err();
        assert!(matches!(err, SimError::UnknownPerson(PersonId(42))));
        assert!(archive.is_empty());
    }

    #[test]
    fn test_prune_couples_rejects_unknown_member() {
        let mut registry = registry_of(2);
        kill(&mut registry, PersonId(0));
        let mut couples = vec![
            Couple::new(PersonId(0), PersonId(1)),
            Couple::new(PersonId(1), PersonId(9)),
        ];

        let err = prune_couples(&registry, &mut couples).unwrap_err();
        assert!(matches!(err, SimError::UnknownPerson(PersonId(9))));
        assert_eq!(couples.len(), 2);
    }
}
