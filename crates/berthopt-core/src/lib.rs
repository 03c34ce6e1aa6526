//! # berthopt-core
//!
//! Data model for an integrated berth allocation and quay crane assignment
//! instance, plus the preprocessing step that turns raw configuration into
//! something a constraint model can be built over.
//!
//! This crate provides:
//! - Domain types: `Berth`, `Horizon`, `Vessel`, `Crane`, `ForbiddenZone`,
//!   `YardQuayZone`, `Problem`
//! - The `Config` JSON contract and its conversion into a `Problem`
//! - `preprocess_problem`, which derives feasible berth positions and
//!   arrival timing ahead of model construction
//! - `Solution`/`VesselSolution`, the JSON contract emitted back out
//!
//! ## Example
//!
//! ```rust
//! use berthopt_core::config::Config;
//! use berthopt_core::problem::Problem;
//! use berthopt_core::preprocess::{preprocess_problem, PreprocessResult};
//!
//! # fn load() -> serde_json::Value {
//! #     serde_json::json!({
//! #         "berth": {"length": 1000, "depth_map": [{"position": 0, "depth": 16.0}]},
//! #         "shifts": {"start_date": "01062026", "num_shifts": 2},
//! #         "vessels": [{"name": "V1", "workload": 100, "loa": 200, "draft": 10.0,
//! #                      "arrival_shift": 0, "max_cranes": 2, "productivity_preference": "MAX"}],
//! #         "cranes": [{"id": "STS-01", "name": "STS-01", "crane_type": "STS",
//! #                     "berth_range_start": 0, "berth_range_end": 1000,
//! #                     "min_productivity": 100, "max_productivity": 130}],
//! #         "solver_settings": {"time_limit_seconds": 60}
//! #     })
//! # }
//! let config: Config = serde_json::from_value(load()).unwrap();
//! let problem = Problem::try_from(config).unwrap();
//! match preprocess_problem(&problem) {
//!     PreprocessResult::Ready(_) => {}
//!     PreprocessResult::Infeasible { .. } => {}
//! }
//! ```

pub mod berth;
pub mod config;
pub mod crane;
pub mod error;
pub mod preprocess;
pub mod problem;
pub mod rules;
pub mod shift;
pub mod solution;
pub mod vessel;
pub mod zones;

pub use berth::{Berth, DepthBreak, GAP};
pub use config::{Config, SolverSettings};
pub use crane::{Crane, CraneType};
pub use error::ConfigError;
pub use preprocess::{preprocess_problem, FeasiblePositions, PreprocessResult, VesselPreprocess};
pub use problem::{CraneUnavailability, Problem};
pub use rules::RuleToggles;
pub use shift::Horizon;
pub use solution::{Solution, Status, VesselSolution};
pub use vessel::{ProductivityPreference, TargetZone, Vessel};
pub use zones::{ForbiddenZone, YardQuayZone};
