//! Static, axis-aligned rectangular wall segments.
use glam::DVec2;

use crate::agent::Agent;

/// Index of an obstacle in the simulation's obstacle list. Obstacles are never
/// added or removed during a run, so the index is stable.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObstacleId(pub(crate) usize);

impl ObstacleId {
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// An axis-aligned rectangle given by its center, its horizontal half-extent
/// (`half_length`) and its vertical half-extent (`half_width`).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Obstacle {
    center: DVec2,
    half_length: f64,
    half_width: f64,
}

fn in_range(value: f64, lower: f64, upper: f64) -> bool {
    value >= lower && value <= upper
}

impl Obstacle {
    #[must_use]
    pub fn new(center_x: f64, center_y: f64, half_length: f64, half_width: f64) -> Obstacle {
        Obstacle {
            center: DVec2::new(center_x, center_y),
            half_length,
            half_width,
        }
    }

    #[must_use]
    pub fn center(&self) -> DVec2 {
        self.center
    }

    #[must_use]
    pub fn half_length(&self) -> f64 {
        self.half_length
    }

    #[must_use]
    pub fn half_width(&self) -> f64 {
        self.half_width
    }

    /// Lower-left corner.
    #[must_use]
    pub fn min(&self) -> DVec2 {
        self.center - DVec2::new(self.half_length, self.half_width)
    }

    /// Upper-right corner.
    #[must_use]
    pub fn max(&self) -> DVec2 {
        self.center + DVec2::new(self.half_length, self.half_width)
    }

    fn spans_x(&self, x: f64) -> bool {
        in_range(
            x,
            self.center.x - self.half_length,
            self.center.x + self.half_length,
        )
    }

    fn spans_y(&self, y: f64) -> bool {
        in_range(
            y,
            self.center.y - self.half_width,
            self.center.y + self.half_width,
        )
    }

    /// Whether the agent, one velocity step ahead, would have its top or bottom face
    /// inside this obstacle while its center lies within the obstacle's horizontal extent.
    #[must_use]
    pub fn collides_vertically(&self, agent: &Agent) -> bool {
        let next = agent.position() + agent.velocity();
        let radius = agent.radius();
        self.spans_x(next.x) && (self.spans_y(next.y + radius) || self.spans_y(next.y - radius))
    }

    /// Whether the agent, two velocity steps ahead, would have its left or right face
    /// inside this obstacle while its center lies within the obstacle's vertical extent.
    ///
    /// Note the lookahead is two steps here but one step in
    /// [`collides_vertically`](Self::collides_vertically).
    #[must_use]
    pub fn collides_horizontally(&self, agent: &Agent) -> bool {
        let ahead = agent.position() + 2.0 * agent.velocity();
        let radius = agent.radius();
        self.spans_y(ahead.y) && (self.spans_x(ahead.x + radius) || self.spans_x(ahead.x - radius))
    }

    /// Whether the agent touches this obstacle on either axis.
    #[must_use]
    pub fn touches(&self, agent: &Agent) -> bool {
        self.collides_vertically(agent) || self.collides_horizontally(agent)
    }
}
