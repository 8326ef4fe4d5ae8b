//! An epidemic spreading through agents that move around a walled arena.
//!
//! Every agent is a small disc bouncing around the square arena `[-10, 10]²`. Agents carry a
//! viral state: one of them starts out infected, and the infection passes on contact with a
//! fixed probability. After a fixed incubation period an infected agent either recovers or
//! dies, as decided when it was created. Some agents shelter in place and never move; rooms
//! made of rectangular walls partition the arena.
//!
//! The central object is the [`Simulation`], which owns every agent and obstacle of one run,
//! a seeded random number generator and a bounded history of population fractions. Each call
//! to [`Simulation::step`] runs one tick:
//! * agent-agent collisions, with infection on contact;
//! * agent-obstacle collisions;
//! * the infection clock and removal of dead agents;
//! * movement and a new statistics sample.
//!
//! A run is fully determined by its [`Parameters`], including the seed:
//!
//! ```rust
//! use contagion::{ParametersBuilder, Simulation};
//!
//! let parameters = ParametersBuilder::default()
//!     .population(50)
//!     .rooms(1)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//! let mut simulation = Simulation::new(&parameters);
//! let outcome = simulation.run_until_extinct(Some(2_000));
//! assert!(outcome.ticks <= 2_000);
//! ```
//!
//! The `contagion` binary wraps this in a command line runner (see [`runner`]) that runs
//! several simulations in a row and reports averaged outcomes.
pub mod agent;
pub mod arena;
pub mod collision;
pub mod error;
pub mod execution_stats;
pub mod log;
mod macros;
pub mod numeric;
pub mod obstacle;
pub mod parameters;
pub mod prelude;
pub mod random;
pub mod runner;
pub mod simulation;
pub mod stats;
pub mod summary;

pub use crate::agent::{Agent, AgentId, ViralState, INCUBATION_TICKS};
pub use crate::error::ContagionError;
pub use crate::log::{debug, error, info, trace, warn};
pub use crate::obstacle::{Obstacle, ObstacleId};
pub use crate::parameters::{Parameters, ParametersBuilder};
pub use crate::simulation::{AgentView, RunOutcome, Simulation};
pub use crate::stats::{Sample, StatsAggregator};
pub use crate::summary::RunSummary;

// Re-exports for the geometry and randomness types that appear in the public API.
pub use glam;
pub use rand;
