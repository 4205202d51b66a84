//! Per-tick passes over the population
//!
//! Each system works on the registry plus the collection it is responsible
//! for. `Population::tick` runs them in a fixed order.

pub mod aging;
pub mod death;
pub mod matchmaking;
pub mod birth;

pub use aging::{aging_system, AgingResult};
pub use death::{death_system, prune_couples};
pub use matchmaking::{matchmaking_system, MatchOutcome, MatchResult};
pub use birth::birth_system;
