//! Name Generation for People
//!
//! A `NameProvider` hands out given and family names. The default draws from
//! fixed lists using the simulation's random source, so names are part of the
//! reproducible stream.

use crate::components::Gender;
use crate::random::RandomSource;

/// Given names for boys, drawn from old parish registers
const MALE_FIRST_NAMES: &[&str] = &[
    "Aldric", "Ambrose", "Anselm", "Arne", "Bartholomew", "Bertram", "Casimir",
    "Conrad", "Cuthbert", "Dietrich", "Edmund", "Eilif", "Emeric", "Florian",
    "Gervase", "Godfrey", "Gunnar", "Hamish", "Hartwig", "Hugo", "Ignatius",
    "Ingram", "Jasper", "Jorund", "Lambert", "Leofric", "Lorenz", "Magnus",
    "Matthias", "Nikolaus", "Odo", "Osric", "Oswin", "Piers", "Quentin",
    "Rainer", "Reinhold", "Roland", "Rutger", "Sigurd", "Silas", "Tancred",
    "Thorvald", "Ulric", "Valentin", "Wendel", "Wolfram", "Wystan",
];

/// Given names for girls
const FEMALE_FIRST_NAMES: &[&str] = &[
    "Adela", "Agnes", "Alruna", "Amabel", "Astrid", "Beatrix", "Brigida",
    "Cecily", "Clemence", "Dagny", "Dorothea", "Ebba", "Edith", "Elsbeth",
    "Ermengard", "Felicia", "Gisela", "Godiva", "Gudrun", "Hedwig", "Hildegard",
    "Ida", "Ingrid", "Isolde", "Jutta", "Kunigunde", "Leofrun", "Liesel",
    "Mathilde", "Mechthild", "Odila", "Ottilie", "Petronella", "Ragna",
    "Rohesia", "Sabina", "Sigrid", "Solveig", "Thora", "Ursula", "Walburga",
    "Wilhelmina", "Wynflaed", "Yvette",
];

/// Family names
const LAST_NAMES: &[&str] = &[
    "Abelard", "Ackermann", "Arkwright", "Asmundsen", "Backhouse", "Bauer",
    "Birkeland", "Blackwood", "Brandt", "Chandler", "Cooper", "Dahl",
    "Dunstable", "Eckhart", "Falk", "Fairweather", "Fletcher", "Fuchs",
    "Gardiner", "Grieve", "Halvorsen", "Hartmann", "Holloway", "Huber",
    "Ironside", "Jessop", "Kessler", "Kirkby", "Lindqvist", "Lockhart",
    "Mercer", "Moller", "Nordahl", "Oakley", "Pargeter", "Pfeiffer",
    "Quarrier", "Ravensworth", "Reiter", "Sandvik", "Schreiber", "Sexton",
    "Stromberg", "Thatcher", "Tolliver", "Underhill", "Vogt", "Wainwright",
    "Weaver", "Winterbourne", "Wolff", "Yardley", "Zimmermann",
];

pub trait NameProvider {
    fn given_name(&mut self, gender: Gender, rng: &mut dyn RandomSource) -> String;
    fn family_name(&mut self, rng: &mut dyn RandomSource) -> String;
}

/// Draws names uniformly from the built-in lists.
#[derive(Debug, Default, Clone, Copy)]
pub struct ListNames;

fn pick(list: &'static [&'static str], rng: &mut dyn RandomSource) -> &'static str {
    list[rng.int_in_range(0, list.len())]
}

impl NameProvider for ListNames {
    fn given_name(&mut self, gender: Gender, rng: &mut dyn RandomSource) -> String {
        match gender {
            Gender::Male => pick(MALE_FIRST_NAMES, rng).to_string(),
            Gender::Female => pick(FEMALE_FIRST_NAMES, rng).to_string(),
        }
    }

    fn family_name(&mut self, rng: &mut dyn RandomSource) -> String {
        pick(LAST_NAMES, rng).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SimRng;

    #[test]
    fn test_name_generation() {
        let mut rng = SimRng::seed_from_u64(5);
        let mut names = ListNames;

        let first = names.given_name(Gender::Male, &mut rng);
        assert!(MALE_FIRST_NAMES.contains(&first.as_str()));

        let first = names.given_name(Gender::Female, &mut rng);
        assert!(FEMALE_FIRST_NAMES.contains(&first.as_str()));

        let last = names.family_name(&mut rng);
        assert!(LAST_NAMES.contains(&last.as_str()));
    }

    #[test]
    fn test_names_follow_the_seed() {
        let mut a = SimRng::seed_from_u64(77);
        let mut b = SimRng::seed_from_u64(77);
        let drawn_a: Vec<String> = (0..20).map(|_| ListNames.family_name(&mut a)).collect();
        let drawn_b: Vec<String> = (0..20).map(|_| ListNames.family_name(&mut b)).collect();
        assert_eq!(drawn_a, drawn_b);
    }
}
