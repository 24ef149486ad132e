//! Configuration for the wardplan heuristics.
//!
//! Load solver parameters from TOML or YAML to tune every search strategy
//! without code changes. Each section falls back to its defaults when it is
//! missing, and so does each field within a section.
//!
//! # Examples
//!
//! ```
//! use wardplan_config::SolverConfig;
//! use std::time::Duration;
//!
//! let config = SolverConfig::from_toml_str(r#"
//!     random_seed = 7
//!
//!     [objective]
//!     lambda_cost = 0.8
//!     lambda_balance = 0.2
//!
//!     [iterated_local_search]
//!     seconds_spent_limit = 60
//! "#).unwrap();
//!
//! assert_eq!(config.random_seed, Some(7));
//! assert_eq!(config.iterated_local_search.time_limit(), Duration::from_secs(60));
//! assert_eq!(config.tabu_search.tenure, 50);
//! ```
//!
//! Use defaults when the file is missing:
//!
//! ```
//! use wardplan_config::SolverConfig;
//!
//! let config = SolverConfig::load("wardplan.toml").unwrap_or_default();
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use wardplan_scoring::ObjectiveWeights;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid(message.into())
}

/// Main solver configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", default)]
pub struct SolverConfig {
    /// Seed shared by every stochastic component. `None` seeds from the OS.
    pub random_seed: Option<u64>,

    pub objective: ObjectiveConfig,
    pub construction: ConstructionConfig,
    pub local_improvement: LocalImprovementConfig,
    pub simulated_annealing: SimulatedAnnealingConfig,
    pub tabu_search: TabuSearchConfig,
    pub iterated_local_search: IteratedLocalSearchConfig,
    pub variable_neighborhood_search: VariableNeighborhoodSearchConfig,
    pub hybrid: HybridConfig,
}

impl SolverConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist, contains invalid TOML, or holds
    /// values rejected by [`validate`](Self::validate).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the random seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Sets the objective weights.
    pub fn with_objective(mut self, lambda_cost: f64, lambda_balance: f64) -> Self {
        self.objective.lambda_cost = lambda_cost;
        self.objective.lambda_balance = lambda_balance;
        self
    }

    /// Rejects values no search strategy can run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.objective.validate()?;
        self.simulated_annealing.validate()?;
        self.tabu_search.validate()?;
        self.iterated_local_search.validate()?;
        self.variable_neighborhood_search.validate()?;
        self.hybrid.validate()
    }
}

/// Scalarization weights and the capacity penalty.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", default)]
pub struct ObjectiveConfig {
    /// Weight of the cost objective (delay, overtime, undertime).
    pub lambda_cost: f64,
    /// Weight of the workload balance objective.
    pub lambda_balance: f64,
    /// Penalty per excess bed inside capacity-soft local search.
    pub capacity_penalty: f64,
}

impl Default for ObjectiveConfig {
    fn default() -> Self {
        let weights = ObjectiveWeights::default();
        Self {
            lambda_cost: weights.lambda_cost,
            lambda_balance: weights.lambda_balance,
            capacity_penalty: weights.capacity_penalty,
        }
    }
}

impl ObjectiveConfig {
    pub fn weights(&self) -> ObjectiveWeights {
        ObjectiveWeights::new(self.lambda_cost, self.lambda_balance, self.capacity_penalty)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("lambda_cost", self.lambda_cost),
            ("lambda_balance", self.lambda_balance),
            ("capacity_penalty", self.capacity_penalty),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(format!(
                    "objective.{name} must be a non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Constructive heuristic configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", default)]
pub struct ConstructionConfig {
    /// Already-placed patients tried per congested ward-day during repair.
    pub repair_candidates: usize,
    /// Successful forward shifts allowed while placing one patient.
    pub repair_shift_limit: usize,
}

impl Default for ConstructionConfig {
    fn default() -> Self {
        Self {
            repair_candidates: 3,
            repair_shift_limit: 3,
        }
    }
}

/// Greedy descent configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", default)]
pub struct LocalImprovementConfig {
    pub max_rounds: usize,
}

impl Default for LocalImprovementConfig {
    fn default() -> Self {
        Self { max_rounds: 6 }
    }
}

/// Simulated annealing configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", default)]
pub struct SimulatedAnnealingConfig {
    pub max_iterations: u64,
    pub initial_temperature: f64,
    /// Temperature multiplier applied after every iteration.
    pub cooling_rate: f64,
    /// The run stops once the temperature falls below this floor.
    pub min_temperature: f64,
}

impl Default for SimulatedAnnealingConfig {
    fn default() -> Self {
        Self {
            max_iterations: 10_000,
            initial_temperature: 1000.0,
            cooling_rate: 0.95,
            min_temperature: 0.01,
        }
    }
}

impl SimulatedAnnealingConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.cooling_rate > 0.0 && self.cooling_rate < 1.0) {
            return Err(invalid(format!(
                "simulated_annealing.cooling_rate must be in (0, 1), got {}",
                self.cooling_rate
            )));
        }
        if !(self.initial_temperature >= 0.0) || !(self.min_temperature >= 0.0) {
            return Err(invalid("simulated_annealing temperatures must be non-negative"));
        }
        Ok(())
    }
}

/// Tabu search configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", default)]
pub struct TabuSearchConfig {
    pub max_iterations: u64,
    /// Number of recently visited allocations that are tabu.
    pub tenure: usize,
    /// Random neighbors sampled per iteration.
    pub neighbor_sample_size: usize,
    /// Accept a tabu neighbor when it beats the best known objective.
    pub aspiration: bool,
}

impl Default for TabuSearchConfig {
    fn default() -> Self {
        Self {
            max_iterations: 5_000,
            tenure: 50,
            neighbor_sample_size: 20,
            aspiration: true,
        }
    }
}

impl TabuSearchConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.tenure == 0 {
            return Err(invalid("tabu_search.tenure must be at least 1"));
        }
        if self.neighbor_sample_size == 0 {
            return Err(invalid("tabu_search.neighbor_sample_size must be at least 1"));
        }
        Ok(())
    }
}

/// Sampled first-improvement local search used inside ILS and VNS.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", default)]
pub struct FastLocalSearchConfig {
    pub rounds: usize,
    /// Share of patients sampled per round.
    pub patient_fraction: f64,
    /// Lower bound on the sample size.
    pub min_patients: usize,
    /// Window days tried per sampled patient.
    pub days_per_patient: usize,
    /// Wall-clock budget per call.
    pub seconds_spent_limit: u64,
}

impl Default for FastLocalSearchConfig {
    fn default() -> Self {
        Self {
            rounds: 10,
            patient_fraction: 0.30,
            min_patients: 10,
            days_per_patient: 3,
            seconds_spent_limit: 30,
        }
    }
}

impl FastLocalSearchConfig {
    pub fn time_limit(&self) -> Duration {
        Duration::from_secs(self.seconds_spent_limit)
    }

    fn validate(&self, section: &str) -> Result<(), ConfigError> {
        if !(self.patient_fraction > 0.0 && self.patient_fraction <= 1.0) {
            return Err(invalid(format!(
                "{section}.local_search.patient_fraction must be in (0, 1], got {}",
                self.patient_fraction
            )));
        }
        if self.days_per_patient == 0 {
            return Err(invalid(format!(
                "{section}.local_search.days_per_patient must be at least 1"
            )));
        }
        Ok(())
    }
}

/// Iterated local search configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", default)]
pub struct IteratedLocalSearchConfig {
    pub max_iterations: u64,
    pub seconds_spent_limit: u64,
    /// Non-improving iterations before the best allocation is perturbed.
    pub stagnation_limit: u32,
    /// Share of patients reassigned by the first perturbation.
    pub perturbation_base: f64,
    /// Upper bound on the perturbed share after repeated stagnation.
    pub perturbation_max: f64,
    pub local_search: FastLocalSearchConfig,
}

impl Default for IteratedLocalSearchConfig {
    fn default() -> Self {
        Self {
            max_iterations: 50,
            seconds_spent_limit: 300,
            stagnation_limit: 20,
            perturbation_base: 0.10,
            perturbation_max: 0.25,
            local_search: FastLocalSearchConfig::default(),
        }
    }
}

impl IteratedLocalSearchConfig {
    pub fn time_limit(&self) -> Duration {
        Duration::from_secs(self.seconds_spent_limit)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.stagnation_limit == 0 {
            return Err(invalid("iterated_local_search.stagnation_limit must be at least 1"));
        }
        if !(self.perturbation_base > 0.0
            && self.perturbation_base <= self.perturbation_max
            && self.perturbation_max <= 1.0)
        {
            return Err(invalid(format!(
                "iterated_local_search perturbation bounds must satisfy 0 < base <= max <= 1, got {} and {}",
                self.perturbation_base, self.perturbation_max
            )));
        }
        self.local_search.validate("iterated_local_search")
    }
}

/// Variable neighborhood search configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", default)]
pub struct VariableNeighborhoodSearchConfig {
    pub max_iterations: u64,
    pub seconds_spent_limit: u64,
    /// Largest neighborhood index, at most 4.
    pub k_max: usize,
    /// Day offsets tried by the day-shift neighborhood.
    pub day_shifts: Vec<i64>,
    pub local_search: FastLocalSearchConfig,
}

impl Default for VariableNeighborhoodSearchConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            seconds_spent_limit: 300,
            k_max: 4,
            day_shifts: vec![-2, -1, 1, 2],
            local_search: FastLocalSearchConfig {
                rounds: 5,
                patient_fraction: 0.20,
                min_patients: 10,
                days_per_patient: 2,
                seconds_spent_limit: 15,
            },
        }
    }
}

impl VariableNeighborhoodSearchConfig {
    /// Number of shake neighborhoods available.
    pub const NEIGHBORHOODS: usize = 4;

    pub fn time_limit(&self) -> Duration {
        Duration::from_secs(self.seconds_spent_limit)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.k_max == 0 || self.k_max > Self::NEIGHBORHOODS {
            return Err(invalid(format!(
                "variable_neighborhood_search.k_max must be in 1..={}, got {}",
                Self::NEIGHBORHOODS,
                self.k_max
            )));
        }
        if self.day_shifts.is_empty() || self.day_shifts.contains(&0) {
            return Err(invalid(
                "variable_neighborhood_search.day_shifts must be non-empty and non-zero",
            ));
        }
        self.local_search.validate("variable_neighborhood_search")
    }
}

/// Hybrid coordinator configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", default)]
pub struct HybridConfig {
    /// Strategy run before the exact oracle, e.g. `"sa"` or `"tabu"`.
    pub metaheuristic: String,
    pub oracle_seconds_limit: u64,
    pub oracle_threads: usize,
}

impl Default for HybridConfig {
    fn default() -> Self {
        Self {
            metaheuristic: "sa".to_string(),
            oracle_seconds_limit: 300,
            oracle_threads: 4,
        }
    }
}

impl HybridConfig {
    pub fn oracle_time_limit(&self) -> Duration {
        Duration::from_secs(self.oracle_seconds_limit)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.oracle_threads == 0 {
            return Err(invalid("hybrid.oracle_threads must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
