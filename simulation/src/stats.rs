//! Population statistics
//!
//! Read-only summaries for reporting. Nothing here touches the random source,
//! so the tallies can run on the rayon pool without affecting reproducibility.

use rayon::prelude::*;
use serde::Serialize;
use std::fmt;

use crate::components::{CivilStatus, Gender, PersonId};
use crate::error::Result;
use crate::registry::Registry;

/// What happened during a single tick.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TickReport {
    pub year: u32,
    pub births: u32,
    pub deaths: u32,
    pub marriages: u32,
    pub widowed: u32,
    pub dissolutions: u32,
    /// Living count at the end of the tick
    pub population: u32,
    /// Archive size at the end of the tick
    pub archived: u32,
}

impl fmt::Display for TickReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Year {}, {} people living. (+{} born, -{} died, {} married)",
            self.year, self.population, self.births, self.deaths, self.marriages
        )
    }
}

/// Snapshot of the living population.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Demographics {
    pub year: u32,
    pub living: u32,
    pub deceased: u32,
    pub males: u32,
    pub females: u32,
    pub single: u32,
    pub married: u32,
    pub widowed: u32,
    pub couples: u32,
    pub mean_age: f64,
    pub oldest_age: u32,
}

#[derive(Debug, Default, Clone, Copy)]
struct Tally {
    count: u32,
    males: u32,
    females: u32,
    single: u32,
    married: u32,
    widowed: u32,
    age_sum: u64,
    oldest: u32,
}

impl Tally {
    fn merge(self, other: Tally) -> Tally {
        Tally {
            count: self.count + other.count,
            males: self.males + other.males,
            females: self.females + other.females,
            single: self.single + other.single,
            married: self.married + other.married,
            widowed: self.widowed + other.widowed,
            age_sum: self.age_sum + other.age_sum,
            oldest: self.oldest.max(other.oldest),
        }
    }
}

/// Tally the living set. An id missing from the registry is an error.
pub fn demographics(
    registry: &Registry,
    living: &[PersonId],
    deceased: usize,
    couples: usize,
    year: u32,
) -> Result<Demographics> {
    let tally = living
        .par_iter()
        .map(|&id| registry.get(id))
        .try_fold(Tally::default, |mut t, person| -> Result<Tally> {
            let person = person?;
            t.count += 1;
            match person.gender() {
                Gender::Male => t.males += 1,
                Gender::Female => t.females += 1,
            }
            match person.civil_status() {
                CivilStatus::Single => t.single += 1,
                CivilStatus::Married => t.married += 1,
                CivilStatus::Widow => t.widowed += 1,
            }
            t.age_sum += u64::from(person.age());
            t.oldest = t.oldest.max(person.age());
            Ok(t)
        })
        .try_reduce(Tally::default, |a, b| Ok(a.merge(b)))?;

    let mean_age = if tally.count == 0 {
        0.0
    } else {
        tally.age_sum as f64 / f64::from(tally.count)
    };

    Ok(Demographics {
        year,
        living: tally.count,
        deceased: deceased as u32,
        males: tally.males,
        females: tally.females,
        single: tally.single,
        married: tally.married,
        widowed: tally.widowed,
        couples: couples as u32,
        mean_age,
        oldest_age: tally.oldest,
    })
}
