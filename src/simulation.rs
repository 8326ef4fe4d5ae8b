//! The `Simulation` owns every agent, obstacle and sample of one run and advances them one
//! tick at a time.
//!
//! A tick runs these phases, in order:
//! 1. agent-agent collisions over every pair of live agents;
//! 2. agent-obstacle collisions for each live agent;
//! 3. viral state advance for each live agent;
//! 4. newly dead agents move from the live collection to the dead one;
//! 5. stale contact handles are released and live agents move;
//! 6. the population fractions are sampled.
//!
//! Nothing outside a tick ever observes a partially updated state.
use glam::DVec2;
use log::{debug, info, warn};

use crate::agent::{Agent, AgentId, ViralState};
use crate::arena::layout_rooms;
use crate::collision::{resolve_agent_collisions, resolve_obstacle_collisions};
use crate::obstacle::Obstacle;
use crate::parameters::Parameters;
use crate::random::{seeded_rng, SimulationRng};
use crate::stats::{Sample, StatsAggregator};

/// Number of rejected candidate positions after which an agent is placed anyway.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 10_000;

/// A read-only view of one agent, enough to draw it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AgentView {
    pub id: AgentId,
    pub position: DVec2,
    pub radius: f64,
    pub state: ViralState,
}

impl From<&Agent> for AgentView {
    fn from(agent: &Agent) -> Self {
        AgentView {
            id: agent.id(),
            position: agent.position(),
            radius: agent.radius(),
            state: agent.state(),
        }
    }
}

/// How a run ended.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RunOutcome {
    pub ticks: u64,
    pub final_sample: Sample,
    /// Whether the run ended because no agent was infected any more.
    pub extinct: bool,
}

pub struct Simulation {
    rng: SimulationRng,
    alive: Vec<Agent>,
    dead: Vec<Agent>,
    obstacles: Vec<Obstacle>,
    stats: StatsAggregator,
    tick: u64,
}

impl Simulation {
    /// Lays out the rooms and places the population. The last agent created is the one that
    /// starts out infected; unless everyone shelters, it never shelters itself.
    ///
    /// Every agent is placed even when the arena is too crowded to fit it. After
    /// [`MAX_PLACEMENT_ATTEMPTS`] rejected spots the last candidate is kept, so a large
    /// population in a walled arena can start with overlapping agents.
    #[must_use]
    pub fn new(parameters: &Parameters) -> Simulation {
        let mut simulation = Simulation {
            rng: seeded_rng(parameters.seed),
            alive: Vec::with_capacity(parameters.population),
            dead: Vec::new(),
            obstacles: layout_rooms(parameters.rooms),
            stats: StatsAggregator::new(parameters.history_capacity),
            tick: 0,
        };
        simulation.populate(parameters);
        debug!(
            "placed {} agents and {} obstacles",
            simulation.alive.len(),
            simulation.obstacles.len()
        );
        simulation
    }

    /// Builds a simulation from agents and obstacles placed by the caller. Agents are kept
    /// in id order.
    #[must_use]
    pub fn from_parts(
        mut agents: Vec<Agent>,
        obstacles: Vec<Obstacle>,
        rng: SimulationRng,
        history_capacity: usize,
    ) -> Simulation {
        agents.sort_by_key(Agent::id);
        let (dead, alive): (Vec<Agent>, Vec<Agent>) = agents
            .into_iter()
            .partition(|agent| agent.state() == ViralState::Dead);
        Simulation {
            rng,
            alive,
            dead,
            obstacles,
            stats: StatsAggregator::new(history_capacity),
            tick: 0,
        }
    }

    fn populate(&mut self, parameters: &Parameters) {
        let Some(susceptible) = parameters.population.checked_sub(1) else {
            return;
        };
        for index in 0..susceptible {
            self.place_agent(
                parameters,
                AgentId(index),
                ViralState::Susceptible,
                parameters.shelter_fraction,
            );
        }
        let sentinel_shelter = if parameters.shelter_fraction < 1.0 {
            0.0
        } else {
            parameters.shelter_fraction
        };
        self.place_agent(
            parameters,
            AgentId(susceptible),
            ViralState::Infected,
            sentinel_shelter,
        );
    }

    /// Draws candidates until one overlaps neither an agent nor an obstacle.
    fn place_agent(
        &mut self,
        parameters: &Parameters,
        id: AgentId,
        state: ViralState,
        shelter_fraction: f64,
    ) {
        let draw = |rng: &mut SimulationRng| {
            Agent::random(
                id,
                state,
                parameters.infect_rate,
                shelter_fraction,
                parameters.death_fraction,
                rng,
            )
        };
        let mut candidate = draw(&mut self.rng);
        let mut rejected = 0;
        while self.overlaps_anything(&candidate) {
            if rejected == MAX_PLACEMENT_ATTEMPTS {
                warn!(
                    "no free spot for agent {:?} after {} attempts, placing it overlapping",
                    id, rejected
                );
                break;
            }
            rejected += 1;
            candidate = draw(&mut self.rng);
        }
        self.alive.push(candidate);
    }

    fn overlaps_anything(&self, candidate: &Agent) -> bool {
        self.alive.iter().any(|agent| agent.collides_with(candidate))
            || self.obstacles.iter().any(|wall| wall.touches(candidate))
    }

    /// Runs one tick and returns its sample.
    pub fn step(&mut self) -> Sample {
        self.tick += 1;

        resolve_agent_collisions(&mut self.alive, &mut self.rng);
        for agent in &mut self.alive {
            resolve_obstacle_collisions(agent, &self.obstacles);
        }
        for agent in &mut self.alive {
            if let Some(state) = agent.advance_state() {
                debug!("tick {}: agent {:?} is now {}", self.tick, agent.id(), state);
            }
        }
        self.retire_dead();
        self.release_stale_contacts();
        for agent in &mut self.alive {
            agent.advance_position();
        }

        self.stats.record(&self.alive, self.dead.len())
    }

    /// Moves every dead agent to the dead collection in one pass, keeping both collections
    /// in id order.
    fn retire_dead(&mut self) {
        if self.alive.iter().all(|agent| agent.state() != ViralState::Dead) {
            return;
        }
        let (dead, alive): (Vec<Agent>, Vec<Agent>) = std::mem::take(&mut self.alive)
            .into_iter()
            .partition(|agent| agent.state() == ViralState::Dead);
        self.alive = alive;
        for mut agent in dead {
            agent.forget_contacts();
            self.dead.push(agent);
        }
    }

    /// Clears each live agent's last collided agent once the two no longer touch, including
    /// when the partner has died.
    fn release_stale_contacts(&mut self) {
        for index in 0..self.alive.len() {
            let Some(partner) = self.alive[index].last_collided_agent() else {
                continue;
            };
            let touching = self
                .alive
                .binary_search_by_key(&partner, Agent::id)
                .is_ok_and(|other| self.alive[index].collides_with(&self.alive[other]));
            if !touching {
                self.alive[index].clear_last_collided_agent();
            }
        }
    }

    /// No live agent is infected. Before the first tick this looks at the starting
    /// population.
    #[must_use]
    pub fn is_extinct(&self) -> bool {
        self.current_sample().infected == 0.0
    }

    /// Steps until the infection dies out or `max_ticks` ticks have run in total.
    pub fn run_until_extinct(&mut self, max_ticks: Option<u64>) -> RunOutcome {
        while !self.is_extinct() && max_ticks.is_none_or(|max| self.tick < max) {
            self.step();
        }
        let outcome = RunOutcome {
            ticks: self.tick,
            final_sample: self.current_sample(),
            extinct: self.is_extinct(),
        };
        info!(
            "run finished after {} ticks: {:.1}% susceptible, {:.1}% recovered, {:.1}% dead",
            outcome.ticks,
            outcome.final_sample.susceptible * 100.0,
            outcome.final_sample.recovered * 100.0,
            outcome.final_sample.dead * 100.0
        );
        outcome
    }

    /// The latest recorded sample, or a fresh one if no tick has run yet.
    #[must_use]
    pub fn current_sample(&self) -> Sample {
        self.stats
            .latest()
            .unwrap_or_else(|| Sample::from_population(&self.alive, self.dead.len()))
    }

    #[must_use]
    pub fn tick(&self) -> u64 {
        self.tick
    }

    #[must_use]
    pub fn population(&self) -> usize {
        self.alive.len() + self.dead.len()
    }

    #[must_use]
    pub fn alive(&self) -> &[Agent] {
        &self.alive
    }

    #[must_use]
    pub fn dead(&self) -> &[Agent] {
        &self.dead
    }

    #[must_use]
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    #[must_use]
    pub fn stats(&self) -> &StatsAggregator {
        &self.stats
    }

    /// Every agent, dead ones first, as a renderer would draw them.
    pub fn agents(&self) -> impl Iterator<Item = AgentView> + '_ {
        self.dead.iter().chain(self.alive.iter()).map(AgentView::from)
    }
}
