//! Registry - arena of every individual ever created
//!
//! Slot `n` holds the individual with `PersonId(n)`. Relationships between
//! people are ids into this arena, never references.

use serde::{Deserialize, Serialize};

use crate::components::PersonId;
use crate::error::{Result, SimError};
use crate::individual::Individual;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Registry {
    people: Vec<Individual>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    /// The id the next inserted individual must carry.
    pub fn next_id(&self) -> PersonId {
        PersonId(self.people.len() as u64)
    }

    pub fn insert(&mut self, person: Individual) -> Result<PersonId> {
        let expected = self.next_id();
        if person.id() != expected {
            return Err(SimError::Invariant(format!(
                "registry expected {} but was handed {}",
                expected,
                person.id()
            )));
        }
        self.people.push(person);
        Ok(expected)
    }

    pub fn get(&self, id: PersonId) -> Result<&Individual> {
        self.people.get(id.index()).ok_or(SimError::UnknownPerson(id))
    }

    pub fn get_mut(&mut self, id: PersonId) -> Result<&mut Individual> {
        self.people.get_mut(id.index()).ok_or(SimError::UnknownPerson(id))
    }

    /// Mutable access to two different people at once.
    pub fn pair_mut(&mut self, a: PersonId, b: PersonId) -> Result<(&mut Individual, &mut Individual)> {
        if a == b {
            return Err(SimError::SelfReference {
                id: a,
                relation: "pair with",
            });
        }
        let len = self.people.len();
        if a.index() >= len {
            return Err(SimError::UnknownPerson(a));
        }
        if b.index() >= len {
            return Err(SimError::UnknownPerson(b));
        }

        if a.index() < b.index() {
            let (left, right) = self.people.split_at_mut(b.index());
            Ok((&mut left[a.index()], &mut right[0]))
        } else {
            let (left, right) = self.people.split_at_mut(a.index());
            Ok((&mut right[0], &mut left[b.index()]))
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Individual> {
        self.people.iter()
    }

    pub fn as_slice(&self) -> &[Individual] {
        &self.people
    }
}
