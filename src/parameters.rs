//! The configuration a simulation is built from.
//!
//! `Parameters` can be built in code with [`ParametersBuilder`] or loaded from a JSON
//! file, where any field left out takes its default:
//!
//! ```json
//! {
//!     "population": 800,
//!     "infect_rate": 0.4,
//!     "shelter_fraction": 0.25,
//!     "rooms": 3
//! }
//! ```
//!
//! The simulation trusts its parameters; call [`Parameters::validate`] before handing
//! values that came from outside the program to a simulation.
use std::path::Path;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::arena::MAX_ROOMS;
use crate::error::ContagionError;
use crate::stats::DEFAULT_HISTORY_CAPACITY;

pub const MAX_POPULATION: usize = 2000;

const DEFAULT_POPULATION: usize = 500;
const DEFAULT_INFECT_RATE: f64 = 0.5;
const DEFAULT_SHELTER_FRACTION: f64 = 0.0;
const DEFAULT_DEATH_FRACTION: f64 = 0.1;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Builder)]
#[serde(default, deny_unknown_fields)]
pub struct Parameters {
    /// Number of agents, including the initially infected one.
    #[builder(default = "DEFAULT_POPULATION")]
    pub population: usize,

    /// Probability that a contact with an infected agent transmits the virus.
    #[builder(default = "DEFAULT_INFECT_RATE")]
    pub infect_rate: f64,

    /// Fraction of agents that shelter in place.
    #[builder(default = "DEFAULT_SHELTER_FRACTION")]
    pub shelter_fraction: f64,

    /// Fraction of agents fated to die if they are ever infected.
    #[builder(default = "DEFAULT_DEATH_FRACTION")]
    pub death_fraction: f64,

    /// Number of rooms placed in the arena.
    #[builder(default = "0")]
    pub rooms: usize,

    #[builder(default = "0")]
    pub seed: u64,

    /// Number of samples the statistics history keeps.
    #[builder(default = "DEFAULT_HISTORY_CAPACITY")]
    pub history_capacity: usize,
}

impl Default for Parameters {
    fn default() -> Self {
        Parameters {
            population: DEFAULT_POPULATION,
            infect_rate: DEFAULT_INFECT_RATE,
            shelter_fraction: DEFAULT_SHELTER_FRACTION,
            death_fraction: DEFAULT_DEATH_FRACTION,
            rooms: 0,
            seed: 0,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

fn check_probability(name: &str, value: f64) -> Result<(), ContagionError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ContagionError::InvalidParameter(format!(
            "{name} must be between 0.0 and 1.0, got {value}"
        )))
    }
}

impl Parameters {
    /// Checks every value against its allowed range.
    ///
    /// # Errors
    /// `ContagionError::InvalidParameter` naming the first offending field.
    pub fn validate(&self) -> Result<(), ContagionError> {
        if !(1..=MAX_POPULATION).contains(&self.population) {
            return Err(ContagionError::InvalidParameter(format!(
                "population must be between 1 and {MAX_POPULATION}, got {}",
                self.population
            )));
        }
        check_probability("infect_rate", self.infect_rate)?;
        check_probability("shelter_fraction", self.shelter_fraction)?;
        check_probability("death_fraction", self.death_fraction)?;
        if self.rooms > MAX_ROOMS {
            return Err(ContagionError::InvalidParameter(format!(
                "rooms must be between 0 and {MAX_ROOMS}, got {}",
                self.rooms
            )));
        }
        if self.history_capacity == 0 {
            return Err(ContagionError::InvalidParameter(
                "history_capacity must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Reads parameters from a JSON file and validates them.
    ///
    /// # Errors
    /// If the file cannot be read, is not valid JSON for `Parameters`, or holds
    /// out-of-range values.
    pub fn from_json_file(path: &Path) -> Result<Parameters, ContagionError> {
        let data = std::fs::read_to_string(path)?;
        let parameters: Parameters = serde_json::from_str(&data)?;
        parameters.validate()?;
        Ok(parameters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn builder_defaults_match_default() {
        let built = ParametersBuilder::default().build().unwrap();
        assert_eq!(built, Parameters::default());
        assert!(built.validate().is_ok());
    }

    #[test]
    fn builder_overrides() {
        let parameters = ParametersBuilder::default()
            .population(12)
            .rooms(2)
            .seed(99)
            .build()
            .unwrap();
        assert_eq!(parameters.population, 12);
        assert_eq!(parameters.rooms, 2);
        assert_eq!(parameters.seed, 99);
        assert_eq!(parameters.infect_rate, DEFAULT_INFECT_RATE);
    }

    #[test]
    fn validate_rejects_out_of_range_values() {
        let cases = [
            (ParametersBuilder::default().population(0).build().unwrap(), "population"),
            (ParametersBuilder::default().population(2001).build().unwrap(), "population"),
            (ParametersBuilder::default().infect_rate(1.5).build().unwrap(), "infect_rate"),
            (
                ParametersBuilder::default().shelter_fraction(-0.1).build().unwrap(),
                "shelter_fraction",
            ),
            (
                ParametersBuilder::default().death_fraction(f64::NAN).build().unwrap(),
                "death_fraction",
            ),
            (ParametersBuilder::default().rooms(6).build().unwrap(), "rooms"),
            (
                ParametersBuilder::default().history_capacity(0).build().unwrap(),
                "history_capacity",
            ),
        ];
        for (parameters, field) in cases {
            match parameters.validate() {
                Err(ContagionError::InvalidParameter(message)) => {
                    assert!(message.starts_with(field), "{message}");
                }
                other => panic!("expected invalid {field}, got {other:?}"),
            }
        }
    }

    #[test]
    fn validate_accepts_boundaries() {
        let parameters = ParametersBuilder::default()
            .population(MAX_POPULATION)
            .infect_rate(1.0)
            .shelter_fraction(0.0)
            .death_fraction(1.0)
            .rooms(MAX_ROOMS)
            .build()
            .unwrap();
        assert!(parameters.validate().is_ok());
    }

    #[test]
    fn load_partial_config() {
        let file = write_config(r#"{ "population": 40, "rooms": 1, "infect_rate": 0.9 }"#);
        let parameters = Parameters::from_json_file(file.path()).unwrap();
        assert_eq!(parameters.population, 40);
        assert_eq!(parameters.rooms, 1);
        assert_eq!(parameters.infect_rate, 0.9);
        assert_eq!(parameters.death_fraction, DEFAULT_DEATH_FRACTION);
    }

    #[test]
    fn saved_config_loads_back() {
        let parameters = ParametersBuilder::default()
            .population(250)
            .infect_rate(0.75)
            .shelter_fraction(0.2)
            .rooms(4)
            .seed(31)
            .build()
            .unwrap();
        let file = write_config(&serde_json::to_string_pretty(&parameters).unwrap());
        assert_eq!(Parameters::from_json_file(file.path()).unwrap(), parameters);
    }

    #[test]
    fn load_rejects_unknown_fields() {
        let file = write_config(r#"{ "populaton": 40 }"#);
        assert!(matches!(
            Parameters::from_json_file(file.path()),
            Err(ContagionError::JsonError(_))
        ));
    }

    #[test]
    fn load_rejects_invalid_values() {
        let file = write_config(r#"{ "death_fraction": 2.0 }"#);
        assert!(matches!(
            Parameters::from_json_file(file.path()),
            Err(ContagionError::InvalidParameter(_))
        ));
    }

    #[test]
    fn load_missing_file() {
        let result = Parameters::from_json_file(Path::new("does/not/exist.json"));
        assert!(matches!(result, Err(ContagionError::IoError(_))));
    }
}
