//! C5: drives the CP solve and extracts a `Solution` from the final
//! assignment (spec §4.5).

use std::collections::BTreeMap;
use std::time::Duration;

use pumpkin_solver::optimisation::linear_sat_unsat::LinearSatUnsat;
use pumpkin_solver::optimisation::OptimisationDirection;
use pumpkin_solver::results::{OptimisationResult, ProblemSolution};
use pumpkin_solver::termination::TimeBudget;
use pumpkin_solver::Solver;

use berthopt_core::config::SolverSettings;
use berthopt_core::preprocess::{preprocess_problem, PreprocessResult, VesselPreprocess};
use berthopt_core::problem::Problem;
use berthopt_core::solution::{Solution, Status, VesselSolution};

use crate::model::constraints::build_constraints;
use crate::model::objective::{build as build_objective, true_objective, ExtractedAssignment};
use crate::model::variables::Variables;

fn noop_callback<B>(_: &Solver, _: pumpkin_solver::results::SolutionReference, _: &B) {}

/// Builds the model for `problem` and drives the CP solve, returning the
/// extracted `Solution` (never an `Err` for infeasibility or timeout — those
/// are ordinary results, per spec §7).
pub fn solve(problem: &Problem, settings: &SolverSettings) -> Solution {
    let span = tracing::info_span!(
        "solve",
        n_vessels = problem.num_vessels(),
        n_cranes = problem.num_cranes(),
        time_limit_s = settings.time_limit_seconds,
    );
    let _guard = span.enter();

    let preprocessed = match preprocess_problem(problem) {
        PreprocessResult::Ready(p) => p,
        PreprocessResult::Infeasible { vessel_index } => {
            tracing::info!(vessel_index, status = "INFEASIBLE", "no depth-feasible berth position");
            return Solution::empty(problem, Status::Infeasible);
        }
    };

    let mut solver = Solver::default();
    let tag = solver.new_constraint_tag();
    let vars = Variables::build(&mut solver, problem, &preprocessed);
    build_constraints(&mut solver, problem, &preprocessed, &vars, tag);
    let objective = build_objective(&mut solver, problem, &preprocessed, &vars, tag);

    let mut brancher = solver.default_brancher();
    let mut termination = TimeBudget::starting_now(Duration::from_secs(settings.time_limit_seconds));

    let result = solver.optimise(
        &mut brancher,
        &mut termination,
        LinearSatUnsat::new(OptimisationDirection::Minimise, objective.objective_var, noop_callback),
    );

    match result {
        OptimisationResult::Optimal(sol) => {
            tracing::info!(status = "OPTIMAL", "solve finished");
            extract(problem, &preprocessed, &vars, &sol, Status::Optimal)
        }
        OptimisationResult::Satisfiable(sol) => {
            tracing::info!(status = "FEASIBLE", "solve finished");
            extract(problem, &preprocessed, &vars, &sol, Status::Feasible)
        }
        OptimisationResult::Unsatisfiable => {
            tracing::info!(status = "INFEASIBLE", "solve finished");
            Solution::empty(problem, Status::Infeasible)
        }
        OptimisationResult::Unknown => {
            tracing::info!(status = "UNKNOWN", "solve finished");
            Solution::empty(problem, Status::Unknown)
        }
    }
}

fn extract<S: ProblemSolution>(
    problem: &Problem,
    preprocessed: &[VesselPreprocess],
    vars: &Variables,
    sol: &S,
    status: Status,
) -> Solution {
    let pos: Vec<i64> = vars.pos.iter().map(|&v| sol.get_integer_value(v) as i64).collect();
    let start: Vec<i64> = vars.start.iter().map(|&v| sol.get_integer_value(v) as i64).collect();
    let end: Vec<i64> = vars.end.iter().map(|&v| sol.get_integer_value(v) as i64).collect();

    let mut moves_by_vessel: Vec<BTreeMap<i64, Vec<String>>> =
        (0..problem.num_vessels()).map(|_| BTreeMap::new()).collect();
    let mut total_cranes_used = 0i64;

    for (&(k, i, t), &moves_var) in &vars.moves {
        let t_i64 = t as i64;
        let in_window = t_i64 >= start[i] && t_i64 < end[i];
        if in_window && sol.get_integer_value(moves_var) > 0 {
            moves_by_vessel[i]
                .entry(t_i64)
                .or_default()
                .push(problem.cranes[k].id.clone());
        }
        let crane_active = vars.crane_active[&(k, i, t)];
        if in_window && sol.get_integer_value(crane_active) > 0 {
            total_cranes_used += 1;
        }
    }
    for cranes in &mut moves_by_vessel {
        for ids in cranes.values_mut() {
            ids.sort();
        }
    }

    let vessels: Vec<VesselSolution> = problem
        .vessels
        .iter()
        .enumerate()
        .map(|(i, vessel)| {
            VesselSolution::new(
                vessel.name.clone(),
                pos[i],
                start[i],
                end[i],
                vessel.loa,
                vessel.workload,
                preprocessed[i].clamped_arrival_shift,
                vessel.productivity_preference,
                std::mem::take(&mut moves_by_vessel[i]),
                i,
            )
        })
        .collect();

    let objective_value = true_objective(
        problem,
        preprocessed,
        &ExtractedAssignment { pos, start, end, total_cranes_used },
    );

    let mut solution = Solution::empty(problem, status);
    solution.vessels = vessels;
    solution.objective_value = objective_value;
    solution
}
