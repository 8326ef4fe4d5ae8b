//! Stands in for `log4rs` when the `logging` feature is off. Filters are tracked but nothing is
//! written; only the facade's maximum level follows the global level.

use crate::log::{LevelFilter, LogConfiguration};

impl LogConfiguration {
    pub(in crate::log) fn set_config(&mut self) {
        let most_verbose = self
            .module_levels
            .values()
            .copied()
            .fold(self.global_log_level, LevelFilter::max);
        log::set_max_level(most_verbose);
    }
}
