//! Collision detection and response for a tick.
//!
//! Agent-agent collisions are resolved over every unordered pair of live agents in a fixed
//! order: outer index `i`, inner index `j > i`. When three or more agents touch during the
//! same tick, an earlier pair can change velocities a later pair then exchanges, so the
//! order is part of what makes a run reproducible.
//!
//! Agent-obstacle collisions are checked per agent, obstacle by obstacle, stopping at the
//! first obstacle that produces a response.
use log::trace;
use rand::Rng;

use crate::agent::Agent;
use crate::obstacle::{Obstacle, ObstacleId};

/// Resolves every pair of agents once. Returns the number of pairs that responded.
pub fn resolve_agent_collisions<R: Rng + ?Sized>(agents: &mut [Agent], rng: &mut R) -> usize {
    let mut responses = 0;
    for i in 0..agents.len() {
        let (head, tail) = agents.split_at_mut(i + 1);
        let current = &mut head[i];
        for other in tail.iter_mut() {
            if current.resolve_collision_with(other, rng) {
                responses += 1;
            }
        }
    }
    responses
}

/// Checks one agent against one obstacle and bounces it off if this is a new contact.
///
/// An agent still in contact with the obstacle it last bounced off is left alone; once it
/// touches that obstacle on neither axis the handle is cleared. A new vertical hit negates
/// the vertical velocity, otherwise a new horizontal hit negates the horizontal velocity.
/// Returns `true` when a response happened.
pub fn check_obstacle_collision(agent: &mut Agent, id: ObstacleId, obstacle: &Obstacle) -> bool {
    let vertical = obstacle.collides_vertically(agent);
    let horizontal = obstacle.collides_horizontally(agent);

    if agent.last_collided_wall() == Some(id) {
        if !vertical && !horizontal {
            agent.set_last_collided_wall(None);
        }
        return false;
    }

    if vertical {
        agent.negate_vertical_speed();
    } else if horizontal {
        agent.negate_horizontal_speed();
    } else {
        return false;
    }
    agent.set_last_collided_wall(Some(id));
    trace!("agent {:?} bounced off obstacle {:?}", agent.id(), id);
    true
}

/// Checks an agent against the obstacles in order and stops at the first response.
/// Sheltering agents stay where they are and are skipped.
pub fn resolve_obstacle_collisions(agent: &mut Agent, obstacles: &[Obstacle]) -> Option<ObstacleId> {
    if agent.is_sheltering() {
        return None;
    }
    obstacles.iter().enumerate().find_map(|(index, obstacle)| {
        let id = ObstacleId(index);
        check_obstacle_collision(agent, id, obstacle).then_some(id)
    })
}
