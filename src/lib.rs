//! Counterbalanced stimulus-list generation for rating experiments.
//!
//! Given a pool of multi-condition items and a pool of fillers, the crate
//! rotates each item's conditions over presentation lists (a Latin
//! square), interleaves each list with the fillers in randomized order,
//! renders a document per list, and records the realized presentation
//! order for later analysis.

pub mod assign;
pub mod cli;
pub mod compile;
pub mod compose;
pub mod config;
pub mod error;
pub mod paths;
pub mod ratio;
pub mod render;
pub mod run;
pub mod stimuli;
