//! Turn-based roster combat: stat vectors, items, characters, and the
//! turn/round/match engines that play two rosters against each other.

pub mod cli;
pub mod combat;
pub mod data;
pub mod parallel;
