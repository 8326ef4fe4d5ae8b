//! The arena is the square `[-ARENA_HALF_EXTENT, ARENA_HALF_EXTENT]²`. Rooms are groups of
//! five obstacles placed inside it: a top wall, two side walls and a bottom wall split in
//! two so that agents can get in and out through the gap.
use std::f64::consts::{FRAC_PI_2, PI};

use glam::DVec2;

use crate::obstacle::Obstacle;

/// Half the side length of the square arena.
pub const ARENA_HALF_EXTENT: f64 = 10.0;

/// Radius shared by every agent.
pub const AGENT_RADIUS: f64 = 0.2;

pub const MAX_ROOMS: usize = 5;

pub const OBSTACLES_PER_ROOM: usize = 5;

/// Distance of each room center from the origin when there is more than one room.
pub const ROOM_RING_RADIUS: f64 = 6.0;

/// Room centers, equidistant from the origin and starting straight up. A single room
/// sits at the origin.
#[must_use]
pub fn room_centers(count: usize) -> Vec<DVec2> {
    if count == 1 {
        return vec![DVec2::ZERO];
    }
    (0..count)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let theta = FRAC_PI_2 + 2.0 * PI / count as f64 * i as f64;
            DVec2::new(ROOM_RING_RADIUS * theta.cos(), ROOM_RING_RADIUS * theta.sin())
        })
        .collect()
}

/// The five walls of the room centered on `center`.
#[must_use]
pub fn room_walls(center: DVec2) -> [Obstacle; OBSTACLES_PER_ROOM] {
    let DVec2 { x, y } = center;
    [
        Obstacle::new(x, y + 2.5, 2.5, 0.3),
        Obstacle::new(x - 2.2, y, 0.3, 2.2),
        Obstacle::new(x + 2.2, y, 0.3, 2.2),
        Obstacle::new(x - 1.5, y - 2.5, 1.0, 0.3),
        Obstacle::new(x + 1.5, y - 2.5, 1.0, 0.3),
    ]
}

/// All obstacles for `count` rooms, room by room.
#[must_use]
pub fn layout_rooms(count: usize) -> Vec<Obstacle> {
    room_centers(count).into_iter().flat_map(room_walls).collect()
}
