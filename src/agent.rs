//! Agents are moving discs that carry a viral state.
//!
//! An agent's viral state only ever moves forward:
//!
//! ```text
//! Susceptible -> Infected -> Recovered
//!                         \-> Dead
//! ```
//!
//! Infection happens on contact (see [`Agent::resolve_collision_with`]); the way out of
//! `Infected` is decided at creation time by the agent's `will_die` flag and happens after
//! exactly [`INCUBATION_TICKS`] ticks (see [`Agent::advance_state`]).
use std::f64::consts::PI;

use glam::DVec2;
use log::trace;
use rand::Rng;
use strum::{Display, EnumCount, EnumIter};

use crate::arena::{AGENT_RADIUS, ARENA_HALF_EXTENT};
use crate::obstacle::ObstacleId;
use crate::random::{rate_passes, sample_symmetric};

/// Number of ticks an agent stays `Infected` before it recovers or dies.
pub const INCUBATION_TICKS: u32 = 600;

/// Bound on the random offset added to the angle of a deflection off a sheltering agent.
pub const DEFLECTION_JITTER: f64 = PI / 16.0;

/// A stable identifier assigned in creation order and never reused.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AgentId(pub(crate) usize);

impl AgentId {
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Display, EnumIter, EnumCount)]
pub enum ViralState {
    Susceptible,
    Infected,
    Recovered,
    Dead,
}

impl ViralState {
    /// `Recovered` and `Dead` are never left.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, ViralState::Recovered | ViralState::Dead)
    }
}

#[derive(Clone, Debug)]
pub struct Agent {
    id: AgentId,
    position: DVec2,
    velocity: DVec2,
    radius: f64,
    state: ViralState,
    days_sick: u32,
    will_die: bool,
    infect_rate: f64,
    shelter_in_place: bool,
    last_collided_agent: Option<AgentId>,
    last_collided_wall: Option<ObstacleId>,
}

impl Agent {
    #[must_use]
    pub fn new(
        id: AgentId,
        position: DVec2,
        velocity: DVec2,
        state: ViralState,
        infect_rate: f64,
        shelter_in_place: bool,
        will_die: bool,
    ) -> Agent {
        Agent {
            id,
            position,
            velocity,
            radius: AGENT_RADIUS,
            state,
            days_sick: 0,
            will_die,
            infect_rate,
            shelter_in_place,
            last_collided_agent: None,
            last_collided_wall: None,
        }
    }

    /// Draws a fresh agent somewhere in the arena. The draws happen in a fixed order:
    /// position x and y, velocity x and y, the shelter fate, then the death fate.
    pub fn random<R: Rng + ?Sized>(
        id: AgentId,
        state: ViralState,
        infect_rate: f64,
        shelter_fraction: f64,
        death_fraction: f64,
        rng: &mut R,
    ) -> Agent {
        let reach = ARENA_HALF_EXTENT - AGENT_RADIUS;
        let x = sample_symmetric(rng, reach);
        let y = sample_symmetric(rng, reach);
        let dx = sample_symmetric(rng, AGENT_RADIUS / 2.0);
        let dy = sample_symmetric(rng, AGENT_RADIUS / 2.0);
        let shelter_in_place = rate_passes(rng, shelter_fraction);
        let will_die = rate_passes(rng, death_fraction);
        Agent::new(
            id,
            DVec2::new(x, y),
            DVec2::new(dx, dy),
            state,
            infect_rate,
            shelter_in_place,
            will_die,
        )
    }

    #[must_use]
    pub fn id(&self) -> AgentId {
        self.id
    }

    #[must_use]
    pub fn position(&self) -> DVec2 {
        self.position
    }

    #[must_use]
    pub fn velocity(&self) -> DVec2 {
        self.velocity
    }

    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    #[must_use]
    pub fn state(&self) -> ViralState {
        self.state
    }

    #[must_use]
    pub fn days_sick(&self) -> u32 {
        self.days_sick
    }

    #[must_use]
    pub fn will_die(&self) -> bool {
        self.will_die
    }

    #[must_use]
    pub fn infect_rate(&self) -> f64 {
        self.infect_rate
    }

    #[must_use]
    pub fn is_sheltering(&self) -> bool {
        self.shelter_in_place
    }

    #[must_use]
    pub fn last_collided_agent(&self) -> Option<AgentId> {
        self.last_collided_agent
    }

    #[must_use]
    pub fn last_collided_wall(&self) -> Option<ObstacleId> {
        self.last_collided_wall
    }

    pub(crate) fn negate_horizontal_speed(&mut self) {
        self.velocity.x = -self.velocity.x;
    }

    pub(crate) fn negate_vertical_speed(&mut self) {
        self.velocity.y = -self.velocity.y;
    }

    pub(crate) fn set_last_collided_wall(&mut self, wall: Option<ObstacleId>) {
        self.last_collided_wall = wall;
    }

    pub(crate) fn clear_last_collided_agent(&mut self) {
        self.last_collided_agent = None;
    }

    /// Drops both contact handles.
    pub(crate) fn forget_contacts(&mut self) {
        self.last_collided_agent = None;
        self.last_collided_wall = None;
    }

    /// Moves a `Susceptible` agent to `Infected`. Returns whether the state changed; any
    /// other state is left alone.
    pub fn infect(&mut self) -> bool {
        if self.state != ViralState::Susceptible {
            return false;
        }
        self.state = ViralState::Infected;
        true
    }

    /// Reflects off the arena boundary and integrates one velocity step. Sheltering
    /// agents never move.
    pub fn advance_position(&mut self) {
        if self.shelter_in_place {
            return;
        }
        let bound = ARENA_HALF_EXTENT - self.radius;
        if (self.position.x + self.velocity.x).abs() > bound {
            self.velocity.x = -self.velocity.x;
        }
        if (self.position.y + self.velocity.y).abs() > bound {
            self.velocity.y = -self.velocity.y;
        }
        self.position += self.velocity;
    }

    /// Advances the infection clock by one tick. Returns the new state when the agent
    /// leaves `Infected`.
    pub fn advance_state(&mut self) -> Option<ViralState> {
        if self.state != ViralState::Infected {
            return None;
        }
        self.days_sick += 1;
        if self.days_sick < INCUBATION_TICKS {
            return None;
        }
        self.state = if self.will_die {
            ViralState::Dead
        } else {
            ViralState::Recovered
        };
        Some(self.state)
    }

    /// Two live agents collide when their discs touch or overlap.
    #[must_use]
    pub fn collides_with(&self, other: &Agent) -> bool {
        self.state != ViralState::Dead
            && other.state != ViralState::Dead
            && self.position.distance(other.position) <= self.radius + other.radius
    }

    /// Sends this agent off at the angle pointing away from `shelterer`, jittered by up to
    /// [`DEFLECTION_JITTER`], keeping its speed.
    fn deflect_from<R: Rng + ?Sized>(&mut self, shelterer: DVec2, rng: &mut R) {
        let away = self.position - shelterer;
        let speed = self.velocity.length();
        let theta = away.y.atan2(away.x) + sample_symmetric(rng, DEFLECTION_JITTER);
        self.velocity = DVec2::new(theta.cos(), theta.sin()) * speed;
    }

    fn transmit<R: Rng + ?Sized>(&mut self, other: &mut Agent, rng: &mut R) {
        match (self.state, other.state) {
            (ViralState::Susceptible, ViralState::Infected) => {
                if rate_passes(rng, other.infect_rate) {
                    self.infect();
                    trace!("agent {:?} infected by {:?}", self.id, other.id);
                }
            }
            (ViralState::Infected, ViralState::Susceptible) => {
                if rate_passes(rng, self.infect_rate) {
                    other.infect();
                    trace!("agent {:?} infected by {:?}", other.id, self.id);
                }
            }
            _ => {}
        }
    }

    /// Responds to a collision with `other`, if there is a new one.
    ///
    /// Nothing happens when the two are not touching, or when `other` is the agent this one
    /// last responded to (the two are still in the same contact episode). Otherwise:
    /// * if one of them shelters in place, the other is deflected away from it;
    /// * if neither does, the two swap velocities;
    /// * if exactly one is `Infected` and the other `Susceptible`, one draw against the
    ///   infected agent's `infect_rate` decides whether the infection is passed on;
    /// * each records the other as its last collided agent.
    ///
    /// Returns whether a response happened.
    pub fn resolve_collision_with<R: Rng + ?Sized>(
        &mut self,
        other: &mut Agent,
        rng: &mut R,
    ) -> bool {
        if self.last_collided_agent == Some(other.id) || !self.collides_with(other) {
            return false;
        }
        match (self.shelter_in_place, other.shelter_in_place) {
            (true, true) => {}
            (true, false) => other.deflect_from(self.position, rng),
            (false, true) => self.deflect_from(other.position, rng),
            (false, false) => std::mem::swap(&mut self.velocity, &mut other.velocity),
        }
        self.transmit(other, rng);
        self.last_collided_agent = Some(other.id);
        other.last_collided_agent = Some(self.id);
        trace!("collision between {:?} and {:?}", self.id, other.id);
        true
    }
}
