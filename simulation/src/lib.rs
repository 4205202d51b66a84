//! Lineage Simulation Engine
//!
//! Agent-based demographic simulation: a closed population ages, dies,
//! marries and has children one year at a time, leaving a genealogy behind.
//! Every stochastic decision draws from an explicit `RandomSource`, so a run
//! is reproducible from its seed.

pub mod components;
pub mod config;
pub mod error;
pub mod individual;
pub mod names;
pub mod persistence;
pub mod population;
pub mod random;
pub mod registry;
pub mod stats;
pub mod systems;

pub use components::*;
pub use error::{ErrorKind, Result, SimError};
pub use individual::{Individual, NewIndividual, YearOutcome};
pub use population::Population;
pub use persistence::{ExportData, SaveFormat, SaveStats};
pub use stats::{Demographics, TickReport};
