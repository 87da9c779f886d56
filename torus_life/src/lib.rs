//! Toroidal cellular automaton with configurable survival and reproduction
//! thresholds, double-buffered generations and per-cell stability tags.

pub mod config;       // Runtime options
pub mod engine;       // Transition rule and generation sweep
pub mod grid;         // Board storage and the buffer pair
pub mod host;         // Tick scheduling
pub mod interaction;  // Pointer to cell mapping
pub mod patterns;     // Seed patterns
pub mod rules;        // Rule parsing and predicates
pub mod stability;    // Display categories
pub mod state;        // Owning controller state

pub use config::{ConfigError, Rgb, SimulationConfig};
pub use engine::{GenerationReport, Transition, TransitionEngine, count_neighbors, next_state};
pub use grid::{Board, BoardError, BoardPair, CellState};
pub use host::HostLoop;
pub use interaction::{InteractionLayer, grid_dimensions};
pub use rules::{RuleList, RuleSet, RuleTokenError};
pub use stability::{Stability, StabilityTag};
pub use state::SimulationState;
