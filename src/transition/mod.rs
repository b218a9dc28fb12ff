//! Land-use transition
//!
//! Cellular-automata rule for one transition epoch: candidate selection,
//! a budget-limited pass in shuffled order, and a closing validity repair.

pub mod candidates;
pub mod engine;
pub mod landscape;
pub mod output;
pub mod repair;
pub mod simulation;

pub use candidates::select_candidates;
pub use engine::{majority_category, run_transition, CellOutcome, EngineTally, TransitionEngine};
pub use landscape::Landscape;
pub use output::{count_changed_cells, TransitionOutput, TransitionStats};
pub use repair::{repair, RepairReport};
pub use simulation::{simulate, simulate_seeded};
