//! Birth System
//!
//! Every active couple gets one chance per year at a child.

use tracing::debug;

use crate::components::{Calendar, Couple, Gender, PersonId};
use crate::error::Result;
use crate::individual::{Individual, NewIndividual};
use crate::names::NameProvider;
use crate::random::RandomSource;
use crate::registry::Registry;

/// Odds that a child starts a new family name instead of the father's
const NEW_FAMILY_NAME_RATE: f64 = 0.001;

/// Run the reproduction pass over `couples`.
///
/// Newborns are appended to `living` and their ids returned in birth order.
pub fn birth_system(
    registry: &mut Registry,
    couples: &[Couple],
    living: &mut Vec<PersonId>,
    cal: &Calendar,
    rng: &mut dyn RandomSource,
    names: &mut dyn NameProvider,
) -> Result<Vec<PersonId>> {
    let mut births = Vec::new();

    for couple in couples {
        let (a, b) = couple.members();

        let wanted = registry.get(a)?.wants_child(rng) && registry.get(b)?.wants_child(rng);
        if !wanted {
            continue;
        }
        let able = registry.get(a)?.can_conceive(rng) && registry.get(b)?.can_conceive(rng);
        if !able {
            continue;
        }

        let (father, mother) = match registry.get(a)?.gender() {
            Gender::Male => (a, b),
            Gender::Female => (b, a),
        };

        let father_ref = registry.get(father)?;
        let mut family_name = Some(father_ref.family_name().to_string());
        if rng.uniform() < NEW_FAMILY_NAME_RATE {
            family_name = None;
        }
        let taken: Vec<String> = father_ref
            .children()
            .iter()
            .map(|&c| registry.get(c).map(|p| p.given_name().to_string()))
            .collect::<Result<_>>()?;

        let child_id = registry.next_id();
        let child = Individual::new(
            NewIndividual {
                id: child_id,
                born: cal.year,
                gender: None,
                given_name: None,
                family_name,
                father: Some(father),
                mother: Some(mother),
            },
            &taken,
            rng,
            names,
        );
        let child_name = child.name();
        registry.insert(child)?;
        living.push(child_id);

        registry.get_mut(a)?.register_child(child_id, &child_name)?;
        registry.get_mut(b)?.register_child(child_id, &child_name)?;

        debug!("{} born in year {}", child_name, cal.year);
        births.push(child_id);
    }

    Ok(births)
}
