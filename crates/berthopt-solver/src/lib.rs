//! # berthopt-solver
//!
//! The CP-SAT-style constraint model and solver driver for the berth
//! allocation + quay crane assignment problem: decision variables, the
//! eleven constraint families, the weighted objective, and the extraction
//! back into a `berthopt_core::Solution`.
//!
//! ```rust,no_run
//! use berthopt_core::config::{Config, SolverSettings};
//! use berthopt_core::problem::Problem;
//! use berthopt_solver::solve;
//!
//! # fn load() -> serde_json::Value { unimplemented!() }
//! let config: Config = serde_json::from_value(load()).unwrap();
//! let settings: SolverSettings = config.solver_settings();
//! let problem = Problem::try_from(config).unwrap();
//! let solution = solve(&problem, &settings);
//! ```

pub mod error;
pub mod model;
pub mod solve;

pub use error::SolveError;
pub use solve::solve;
