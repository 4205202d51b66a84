//! Population - main orchestrator
//!
//! Owns every individual (through the registry), the living set, the archive
//! of the deceased and the active couples. One `tick` is one year.

use std::fmt;
use tracing::{info, warn};

use crate::components::{Calendar, CivilStatus, Couple, Gender, PersonId};
use crate::error::{Result, SimError};
use crate::individual::{Individual, NewIndividual};
use crate::names::NameProvider;
use crate::random::RandomSource;
use crate::registry::Registry;
use crate::stats::{self, Demographics, TickReport};
use crate::systems;

#[derive(Debug, Clone, Default)]
pub struct Population {
    pub(crate) registry: Registry,
    pub(crate) calendar: Calendar,
    pub(crate) living: Vec<PersonId>,
    pub(crate) archive: Vec<PersonId>,
    pub(crate) couples: Vec<Couple>,
}

impl Population {
    /// `size` founders born in year 0 with random genders and names.
    pub fn new(size: usize, rng: &mut dyn RandomSource, names: &mut dyn NameProvider) -> Result<Self> {
        let mut population = Self::default();
        for _ in 0..size {
            population.add_founder(None, rng, names)?;
        }
        info!("Seeded {} founders", size);
        Ok(population)
    }

    /// Founders with the given genders, in order.
    pub fn from_founders(
        genders: &[Gender],
        rng: &mut dyn RandomSource,
        names: &mut dyn NameProvider,
    ) -> Result<Self> {
        let mut population = Self::default();
        for &gender in genders {
            population.add_founder(Some(gender), rng, names)?;
        }
        Ok(population)
    }

    fn add_founder(
        &mut self,
        gender: Option<Gender>,
        rng: &mut dyn RandomSource,
        names: &mut dyn NameProvider,
    ) -> Result<PersonId> {
        let mut params = NewIndividual::founder(self.registry.next_id(), self.calendar.year);
        params.gender = gender;
        let person = Individual::new(params, &[], rng, names);
        let id = self.registry.insert(person)?;
        self.living.push(id);
        Ok(id)
    }

    // ------------------------------------------------------------------
    // Simulation
    // ------------------------------------------------------------------

    /// Advance the whole population by one year.
    ///
    /// Order is fixed: age everyone alive at the start of the year, archive
    /// the dead, drop broken couples, births, then marriages. Children born
    /// this year are neither aged nor matched until the next tick.
    pub fn tick(&mut self, rng: &mut dyn RandomSource, names: &mut dyn NameProvider) -> Result<TickReport> {
        self.calendar.advance();

        let snapshot = self.living.clone();
        let aging = systems::aging_system(&mut self.registry, &snapshot, rng)?;
        let deaths = systems::death_system(&self.registry, &mut self.living, &mut self.archive)?;
        let dissolutions = systems::prune_couples(&self.registry, &mut self.couples)?;

        let survivors = self.living.clone();
        let births = systems::birth_system(
            &mut self.registry,
            &self.couples,
            &mut self.living,
            &self.calendar,
            rng,
            names,
        )?;
        let matches = systems::matchmaking_system(&mut self.registry, &survivors, &mut self.couples, rng)?;

        if self.living.is_empty() && deaths > 0 {
            warn!("Population went extinct in year {}", self.calendar.year);
        }

        Ok(TickReport {
            year: self.calendar.year,
            births: births.len() as u32,
            deaths,
            marriages: matches.marriages.len() as u32,
            widowed: aging.widowed,
            dissolutions,
            population: self.living.len() as u32,
            archived: self.archive.len() as u32,
        })
    }

    /// Run `n` ticks, logging each year's summary.
    pub fn run_years(
        &mut self,
        n: u32,
        rng: &mut dyn RandomSource,
        names: &mut dyn NameProvider,
    ) -> Result<Vec<TickReport>> {
        let mut reports = Vec::with_capacity(n as usize);
        for _ in 0..n {
            let report = self.tick(rng, names)?;
            info!("{}", report);
            reports.push(report);
        }
        Ok(reports)
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn year(&self) -> u32 {
        self.calendar.year
    }

    pub fn living(&self) -> &[PersonId] {
        &self.living
    }

    pub fn archive(&self) -> &[PersonId] {
        &self.archive
    }

    pub fn couples(&self) -> &[Couple] {
        &self.couples
    }

    pub fn living_count(&self) -> usize {
        self.living.len()
    }

    pub fn deceased_count(&self) -> usize {
        self.archive.len()
    }

    /// Id the next created individual will receive.
    pub fn next_id(&self) -> PersonId {
        self.registry.next_id()
    }

    pub fn get(&self, id: PersonId) -> Result<&Individual> {
        self.registry.get(id)
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn demographics(&self) -> Result<Demographics> {
        stats::demographics(
            &self.registry,
            &self.living,
            self.archive.len(),
            self.couples.len(),
            self.calendar.year,
        )
    }

    /// Human-readable life story of one individual.
    pub fn summary(&self, id: PersonId) -> Result<String> {
        let person = self.registry.get(id)?;
        let died = person.died().map(|d| d.to_string()).unwrap_or_default();

        let mut lines = vec![format!(
            "{}. ({} - {} [age {}])",
            person.name(),
            person.born(),
            died,
            person.age()
        )];
        if let Some(father) = person.father() {
            let father = self.registry.get(father)?;
            lines.push(format!("  father: {}, born: {}", father.name(), father.born()));
        }
        if let Some(mother) = person.mother() {
            let mother = self.registry.get(mother)?;
            lines.push(format!("  mother: {}, born: {}", mother.name(), mother.born()));
        }
        for entry in person.biography() {
            lines.push(format!(
                "  {} [age {}]: {}",
                entry.year,
                entry.year.saturating_sub(person.born()),
                entry.event
            ));
        }
        Ok(lines.join("\n"))
    }

    // ------------------------------------------------------------------
    // Invariants
    // ------------------------------------------------------------------

    /// Verify the structural invariants of the whole population.
    pub fn check_invariants(&self) -> Result<()> {
        let broken = |msg: String| Err(SimError::Invariant(msg));
        let year = self.calendar.year;

        for (slot, person) in self.registry.iter().enumerate() {
            let id = person.id();
            if id.index() != slot {
                return broken(format!("{id} stored in slot {slot}"));
            }
            if person.is_alive() == person.died().is_some() {
                return broken(format!("{id} alive flag disagrees with year of death"));
            }
            if person.father() == Some(id) || person.mother() == Some(id) {
                return broken(format!("{id} is their own parent"));
            }
            if person.partners().contains(&id) || person.children().contains(&id) {
                return broken(format!("{id} is their own partner or child"));
            }
            if person.civil_status() == CivilStatus::Married && person.partners().is_empty() {
                return broken(format!("{id} is married without a partner"));
            }
        }

        let mut seen = vec![0u8; self.registry.len()];
        for &id in self.living.iter().chain(&self.archive) {
            match seen.get_mut(id.index()) {
                Some(count) => *count += 1,
                None => return Err(SimError::UnknownPerson(id)),
            }
        }
        if let Some(slot) = seen.iter().position(|&count| count != 1) {
            return broken(format!(
                "{} appears {} times across living and archive",
                PersonId(slot as u64),
                seen[slot]
            ));
        }

        for &id in &self.living {
            let person = self.registry.get(id)?;
            if !person.is_alive() {
                return broken(format!("{id} is in the living set but dead"));
            }
            if person.born() + person.age() != year {
                return broken(format!(
                    "{id} born {} is {} in year {year}",
                    person.born(),
                    person.age()
                ));
            }
            if let Some(partner) = person.current_partner() {
                if !self.couples.contains(&Couple::new(id, partner)) {
                    return broken(format!("{id} is married to {partner} without an active couple"));
                }
            }
        }
        for &id in &self.archive {
            if self.registry.get(id)?.is_alive() {
                return broken(format!("{id} is archived but alive"));
            }
        }

        for couple in &self.couples {
            let (a, b) = couple.members();
            let (pa, pb) = (self.registry.get(a)?, self.registry.get(b)?);
            if !pa.is_alive() || !pb.is_alive() {
                return broken(format!("couple {a}/{b} has a deceased member"));
            }
            if pa.current_partner() != Some(b) || pb.current_partner() != Some(a) {
                return broken(format!("couple {a}/{b} is not married to each other"));
            }
        }

        Ok(())
    }
}

impl fmt::Display for Population {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Year {}, {} people living.", self.calendar.year, self.living.len())
    }
}
