//! Where the simulation's log messages go and which of them get through.
//!
//! The simulation logs with the `log` facade macros, re-exported here. Nothing is printed until a
//! level is set, normally by the runner's `--log-level` and `-v` options. A level can be set for
//! the whole crate and overridden per module path:
//!
//! ```rust
//! use contagion::log::{apply_log_spec, LogSpec};
//!
//! // Run summaries everywhere, every single collision from the collision module.
//! let spec: LogSpec = "info,contagion::collision=trace".parse().unwrap();
//! apply_log_spec(&spec);
//! ```
//!
//! With the `logging` feature (on by default) messages are written to stderr by `log4rs`.
//! Without it the filters are still tracked but nothing is written.
#[cfg(feature = "logging")]
mod standard_logger;

#[cfg(not(feature = "logging"))]
mod null_logger;

use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::{LazyLock, Mutex, MutexGuard, PoisonError};

pub use log::{debug, error, info, trace, warn, LevelFilter};
#[cfg(feature = "logging")]
use log4rs::Handle;

use crate::error::ContagionError;

static LOG_CONFIGURATION: LazyLock<Mutex<LogConfiguration>> = LazyLock::new(Mutex::default);

/// The global level, the per-module overrides, and the installed logger. Only the instance in
/// `LOG_CONFIGURATION` exists; the free functions below lock it and rebuild the logger.
#[derive(Debug)]
pub(in crate::log) struct LogConfiguration {
    /// `Off` unless something turned logging on.
    pub(in crate::log) global_log_level: LevelFilter,
    /// Module path to level, e.g. `"contagion::simulation" => Debug`.
    pub(in crate::log) module_levels: BTreeMap<String, LevelFilter>,

    #[cfg(feature = "logging")]
    root_handle: Option<Handle>,
}

impl Default for LogConfiguration {
    fn default() -> Self {
        Self {
            global_log_level: LevelFilter::Off,
            module_levels: BTreeMap::new(),

            #[cfg(feature = "logging")]
            root_handle: None,
        }
    }
}

impl LogConfiguration {
    /// Records the filters and rebuilds the logger only if anything changed.
    fn update<'a>(
        &mut self,
        global: Option<LevelFilter>,
        modules: impl IntoIterator<Item = (&'a str, LevelFilter)>,
    ) {
        let mut changed = false;
        if let Some(level) = global {
            changed |= self.global_log_level != level;
            self.global_log_level = level;
        }
        for (module, level) in modules {
            changed |= self.module_levels.insert(module.to_string(), level) != Some(level);
        }
        if changed {
            self.set_config();
        }
    }

    fn remove(&mut self, module: &str) {
        if self.module_levels.remove(module).is_some() {
            self.set_config();
        }
    }
}

/// A parsed `--log-level` value: comma separated entries, each either a bare level, which sets
/// the global level, or `module=level`. Levels are case-insensitive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogSpec {
    pub global: Option<LevelFilter>,
    pub modules: Vec<(String, LevelFilter)>,
}

impl LogSpec {
    /// Keeps the more verbose of the two global levels.
    #[must_use]
    pub fn with_minimum_level(mut self, level: Option<LevelFilter>) -> LogSpec {
        self.global = self.global.max(level);
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.global.is_none() && self.modules.is_empty()
    }
}

fn parse_level(level: &str) -> Result<LevelFilter, ContagionError> {
    level.trim().parse::<LevelFilter>().map_err(|_| {
        ContagionError::InvalidParameter(format!("log-level: unknown level `{}`", level.trim()))
    })
}

impl FromStr for LogSpec {
    type Err = ContagionError;

    fn from_str(spec: &str) -> Result<LogSpec, ContagionError> {
        let mut parsed = LogSpec::default();
        for entry in spec.split(',').map(str::trim).filter(|entry| !entry.is_empty()) {
            let Some((module, level)) = entry.split_once('=') else {
                parsed.global = Some(parse_level(entry)?);
                continue;
            };
            let module = module.trim();
            if module.is_empty() {
                return Err(ContagionError::InvalidParameter(format!(
                    "log-level: missing module name in `{entry}`"
                )));
            }
            parsed.modules.push((module.to_string(), parse_level(level)?));
        }
        Ok(parsed)
    }
}

fn log_configuration() -> MutexGuard<'static, LogConfiguration> {
    LOG_CONFIGURATION
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

/// Installs every filter in `spec` with a single logger rebuild.
pub fn apply_log_spec(spec: &LogSpec) {
    log_configuration().update(
        spec.global,
        spec.modules
            .iter()
            .map(|(module, level)| (module.as_str(), *level)),
    );
}

/// Sets the level for modules without their own filter. `LevelFilter::Off` silences them.
pub fn set_log_level(level: LevelFilter) {
    log_configuration().update(Some(level), std::iter::empty());
}

pub fn disable_logging() {
    set_log_level(LevelFilter::Off);
}

/// Overrides the global level for `module_path` and everything below it.
pub fn set_module_filter(module_path: &str, level: LevelFilter) {
    log_configuration().update(None, [(module_path, level)]);
}

pub fn set_module_filters<S: AsRef<str>>(module_filters: &[(S, LevelFilter)]) {
    log_configuration().update(
        None,
        module_filters
            .iter()
            .map(|(module, level)| (module.as_ref(), *level)),
    );
}

/// Drops the override for `module_path`; the global level applies to it again.
pub fn remove_module_filter(module_path: &str) {
    log_configuration().remove(module_path);
}

#[must_use]
pub fn log_level() -> LevelFilter {
    log_configuration().global_log_level
}

#[must_use]
pub fn module_filter(module_path: &str) -> Option<LevelFilter> {
    log_configuration().module_levels.get(module_path).copied()
}
