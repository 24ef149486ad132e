//! Metaheuristic selection by name.

use std::fmt;
use std::str::FromStr;

use wardplan_config::SolverConfig;

use crate::error::SolveError;
use crate::phase::{
    IteratedLocalSearch, Search, SimulatedAnnealing, TabuSearch, VariableNeighborhoodSearch,
};

/// The search strategies the hybrid coordinator can run.
///
/// # Example
///
/// ```
/// use wardplan_solver::Metaheuristic;
///
/// assert_eq!("ts".parse::<Metaheuristic>().unwrap(), Metaheuristic::TabuSearch);
/// assert!("genetic".parse::<Metaheuristic>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metaheuristic {
    SimulatedAnnealing,
    TabuSearch,
    IteratedLocalSearch,
    VariableNeighborhoodSearch,
}

impl Metaheuristic {
    pub fn name(&self) -> &'static str {
        match self {
            Metaheuristic::SimulatedAnnealing => "sa",
            Metaheuristic::TabuSearch => "ts",
            Metaheuristic::IteratedLocalSearch => "ils",
            Metaheuristic::VariableNeighborhoodSearch => "vns",
        }
    }

    /// Builds the strategy from its configuration section.
    pub fn build(&self, config: &SolverConfig) -> Box<dyn Search> {
        let weights = config.objective.weights();
        match self {
            Metaheuristic::SimulatedAnnealing => Box::new(SimulatedAnnealing::new(
                config.simulated_annealing.clone(),
                weights,
            )),
            Metaheuristic::TabuSearch => {
                Box::new(TabuSearch::new(config.tabu_search.clone(), weights))
            }
            Metaheuristic::IteratedLocalSearch => Box::new(IteratedLocalSearch::new(
                config.iterated_local_search.clone(),
                weights,
            )),
            Metaheuristic::VariableNeighborhoodSearch => Box::new(
                VariableNeighborhoodSearch::new(config.variable_neighborhood_search.clone(), weights),
            ),
        }
    }
}

impl FromStr for Metaheuristic {
    type Err = SolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sa" | "simulated_annealing" => Ok(Metaheuristic::SimulatedAnnealing),
            "ts" | "tabu" | "tabu_search" => Ok(Metaheuristic::TabuSearch),
            "ils" | "iterated_local_search" => Ok(Metaheuristic::IteratedLocalSearch),
            "vns" | "variable_neighborhood_search" => Ok(Metaheuristic::VariableNeighborhoodSearch),
            _ => Err(SolveError::UnknownStrategy(s.to_string())),
        }
    }
}

impl fmt::Display for Metaheuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
