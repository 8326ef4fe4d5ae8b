//! Per-tick population fractions with a bounded history.
use std::collections::VecDeque;

use strum::{EnumCount, IntoEnumIterator};

use crate::agent::{Agent, ViralState};
use crate::numeric::{almost_eq, FRACTION_EPSILON};

/// Number of samples retained by default.
pub const DEFAULT_HISTORY_CAPACITY: usize = 1000;

/// The fraction of the whole population (alive and dead) in each viral state at one tick.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Sample {
    pub susceptible: f64,
    pub infected: f64,
    pub recovered: f64,
    pub dead: f64,
}

impl Sample {
    /// Counts `alive` by state, adds `dead_count` to the dead, and divides by the total.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_population(alive: &[Agent], dead_count: usize) -> Sample {
        let mut counts = [0usize; ViralState::COUNT];
        for agent in alive {
            counts[agent.state() as usize] += 1;
        }
        counts[ViralState::Dead as usize] += dead_count;
        let total = (alive.len() + dead_count) as f64;
        if total == 0.0 {
            return Sample::default();
        }
        Sample {
            susceptible: counts[ViralState::Susceptible as usize] as f64 / total,
            infected: counts[ViralState::Infected as usize] as f64 / total,
            recovered: counts[ViralState::Recovered as usize] as f64 / total,
            dead: counts[ViralState::Dead as usize] as f64 / total,
        }
    }

    #[must_use]
    pub fn fraction(&self, state: ViralState) -> f64 {
        match state {
            ViralState::Susceptible => self.susceptible,
            ViralState::Infected => self.infected,
            ViralState::Recovered => self.recovered,
            ViralState::Dead => self.dead,
        }
    }

    #[must_use]
    pub fn total(&self) -> f64 {
        ViralState::iter().map(|state| self.fraction(state)).sum()
    }
}

/// Keeps the last `capacity` samples as four parallel sequences, one per viral state.
/// Pushing past the capacity evicts the oldest sample from all four together.
#[derive(Debug, Clone)]
pub struct StatsAggregator {
    capacity: usize,
    susceptible: VecDeque<f64>,
    infected: VecDeque<f64>,
    recovered: VecDeque<f64>,
    dead: VecDeque<f64>,
}

impl StatsAggregator {
    /// # Panics
    /// If `capacity` is zero.
    #[must_use]
    pub fn new(capacity: usize) -> StatsAggregator {
        assert!(capacity > 0, "history capacity must be positive");
        StatsAggregator {
            capacity,
            susceptible: VecDeque::with_capacity(capacity + 1),
            infected: VecDeque::with_capacity(capacity + 1),
            recovered: VecDeque::with_capacity(capacity + 1),
            dead: VecDeque::with_capacity(capacity + 1),
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.susceptible.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.susceptible.is_empty()
    }

    /// Samples the population and appends the sample.
    pub fn record(&mut self, alive: &[Agent], dead_count: usize) -> Sample {
        let sample = Sample::from_population(alive, dead_count);
        self.push(sample);
        sample
    }

    pub fn push(&mut self, sample: Sample) {
        debug_assert!(
            almost_eq(sample.total(), 1.0, FRACTION_EPSILON),
            "fractions sum to {}",
            sample.total()
        );
        self.susceptible.push_back(sample.susceptible);
        self.infected.push_back(sample.infected);
        self.recovered.push_back(sample.recovered);
        self.dead.push_back(sample.dead);
        if self.len() > self.capacity {
            self.susceptible.pop_front();
            self.infected.pop_front();
            self.recovered.pop_front();
            self.dead.pop_front();
        }
    }

    #[must_use]
    pub fn latest(&self) -> Option<Sample> {
        self.get(self.len().checked_sub(1)?)
    }

    /// The `index`-th retained sample, oldest first.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Sample> {
        Some(Sample {
            susceptible: *self.susceptible.get(index)?,
            infected: *self.infected.get(index)?,
            recovered: *self.recovered.get(index)?,
            dead: *self.dead.get(index)?,
        })
    }

    /// The retained history of one state's fraction, oldest first.
    #[must_use]
    pub fn series(&self, state: ViralState) -> &VecDeque<f64> {
        match state {
            ViralState::Susceptible => &self.susceptible,
            ViralState::Infected => &self.infected,
            ViralState::Recovered => &self.recovered,
            ViralState::Dead => &self.dead,
        }
    }

    /// All retained samples, oldest first.
    pub fn samples(&self) -> impl Iterator<Item = Sample> + '_ {
        (0..self.len()).filter_map(|index| self.get(index))
    }
}

impl Default for StatsAggregator {
    fn default() -> Self {
        StatsAggregator::new(DEFAULT_HISTORY_CAPACITY)
    }
}
