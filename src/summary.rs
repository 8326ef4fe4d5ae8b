//! Averages of final outcomes across several runs.
use crate::stats::Sample;

/// Accumulates the final sample of each run. Everyone who is not still susceptible at the
/// end of a run counts as having been infected.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunSummary {
    runs: u32,
    total_uninfected: f64,
    total_cured: f64,
    total_dead: f64,
}

impl RunSummary {
    #[must_use]
    pub fn new() -> RunSummary {
        RunSummary::default()
    }

    pub fn record_run(&mut self, final_sample: &Sample) {
        self.runs += 1;
        self.total_uninfected += final_sample.susceptible;
        self.total_cured += final_sample.recovered;
        self.total_dead += final_sample.dead;
    }

    #[must_use]
    pub fn runs(&self) -> u32 {
        self.runs
    }

    fn average_percent(&self, total: f64) -> f64 {
        if self.runs == 0 {
            return 0.0;
        }
        100.0 * total / f64::from(self.runs)
    }

    #[must_use]
    pub fn percent_uninfected(&self) -> f64 {
        self.average_percent(self.total_uninfected)
    }

    /// Everyone not left susceptible. Once every run has ended in extinction this equals
    /// cured plus dead.
    #[must_use]
    pub fn percent_infected(&self) -> f64 {
        if self.runs == 0 {
            return 0.0;
        }
        100.0 - self.percent_uninfected()
    }

    #[must_use]
    pub fn percent_cured(&self) -> f64 {
        self.average_percent(self.total_cured)
    }

    #[must_use]
    pub fn percent_dead(&self) -> f64 {
        self.average_percent(self.total_dead)
    }
}
