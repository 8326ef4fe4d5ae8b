//! Everything needed to build and drive a simulation from code.
pub use crate::agent::{Agent, AgentId, ViralState};
pub use crate::arena::{layout_rooms, AGENT_RADIUS, ARENA_HALF_EXTENT};
pub use crate::error::ContagionError;
pub use crate::log::{debug, error, info, trace, warn};
pub use crate::obstacle::{Obstacle, ObstacleId};
pub use crate::parameters::{Parameters, ParametersBuilder};
pub use crate::random::{seeded_rng, SimulationRng};
pub use crate::simulation::{AgentView, RunOutcome, Simulation};
pub use crate::stats::{Sample, StatsAggregator};
pub use crate::summary::RunSummary;
pub use glam::DVec2;
