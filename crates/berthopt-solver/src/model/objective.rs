//! The five weighted objective terms from spec §4.4, folded into a single
//! integer variable for `pumpkin_solver::Solver::optimise`.
//!
//! The in-model objective is built at twice the spec's true scale: the
//! yard-distance term involves `loa/2` and a zone centre that is itself an
//! average of two integers, both of which can be half-integers. Doubling
//! every term clears the denominator without changing the argmin — the
//! value reported back to callers is recomputed from the extracted
//! assignment by [`true_objective`], never read off this scaled variable, so
//! the doubling never leaks into the reported `Solution::objective_value`.

use pumpkin_solver::variables::DomainId;
use pumpkin_solver::{ConstraintTag, Solver};

use berthopt_core::preprocess::VesselPreprocess;
use berthopt_core::problem::Problem;

use crate::model::reify::{post_eq, post_ge};
use crate::model::variables::Variables;

pub struct Objective {
    pub objective_var: DomainId,
    pub makespan: DomainId,
}

pub fn build(
    solver: &mut Solver,
    problem: &Problem,
    preprocessed: &[VesselPreprocess],
    vars: &Variables,
    tag: ConstraintTag,
) -> Objective {
    let n = problem.num_vessels() as i64;
    let t = problem.num_shifts() as i64;
    let l = problem.berth.length;

    let makespan = solver.new_bounded_integer(0, t as i32);
    for i in 0..vars.pos.len() {
        post_ge(solver, &[(makespan, 1), (vars.end[i], -1)], 0, tag);
    }

    let mut yard2 = Vec::with_capacity(vars.pos.len());
    for i in 0..vars.pos.len() {
        let y = solver.new_bounded_integer(0, (2 * l) as i32);
        if let Some(zone) = problem.vessels[i]
            .best_zone()
            .and_then(|tz| problem.yard_quay_zone(&tz.yard_quay_zone_id))
        {
            let loa_i = problem.vessels[i].loa as i32;
            let doubled_centre = (zone.start_dist + zone.end_dist) as i32;
            post_ge(
                solver,
                &[(y, 1), (vars.pos[i], -2)],
                loa_i - doubled_centre,
                tag,
            );
            post_ge(
                solver,
                &[(y, 1), (vars.pos[i], 2)],
                doubled_centre - loa_i,
                tag,
            );
        } else {
            post_eq(solver, &[(y, 1)], 0, tag);
        }
        yard2.push(y);
    }

    let sum_arrival: i64 = preprocessed.iter().map(|p| p.clamped_arrival_shift).sum();

    let max_bound = 10_000 * n * (t - 1).max(0)
        + 1_000 * n * t
        + 200 * t
        + 2 * l * n;
    let min_bound = -(200 * vars.crane_active.len() as i64) - 1;
    let objective_var = solver.new_bounded_integer(min_bound as i32, max_bound as i32);

    let mut terms: Vec<(DomainId, i32)> = Vec::new();
    for i in 0..vars.pos.len() {
        terms.push((vars.start[i], 10_000));
        terms.push((vars.end[i], 1_000));
    }
    terms.push((makespan, 200));
    for &ca in vars.crane_active.values() {
        terms.push((ca, -200));
    }
    for &y in &yard2 {
        terms.push((y, 1));
    }
    terms.push((objective_var, -1));

    post_eq(solver, &terms, (11_000 * sum_arrival) as i32, tag);

    Objective { objective_var, makespan }
}

/// The extracted values `solve` needs to recompute the true (unscaled)
/// objective — see the module-level note on why this isn't read off the
/// in-model scaled variable.
pub struct ExtractedAssignment {
    pub pos: Vec<i64>,
    pub start: Vec<i64>,
    pub end: Vec<i64>,
    pub total_cranes_used: i64,
}

/// Recomputes spec §4.4's weighted objective directly from a final
/// assignment, independent of however the in-model variable encoded it.
pub fn true_objective(
    problem: &Problem,
    preprocessed: &[VesselPreprocess],
    assignment: &ExtractedAssignment,
) -> f64 {
    let mut total_start_delay = 0i64;
    let mut total_turnaround = 0i64;
    let mut makespan = 0i64;
    let mut yard_distance = 0.0f64;

    for i in 0..problem.num_vessels() {
        let arrival = preprocessed[i].clamped_arrival_shift;
        total_start_delay += assignment.start[i] - arrival;
        total_turnaround += assignment.end[i] - arrival;
        makespan = makespan.max(assignment.end[i]);

        if let Some(zone) = problem.vessels[i]
            .best_zone()
            .and_then(|tz| problem.yard_quay_zone(&tz.yard_quay_zone_id))
        {
            let vessel_centre = assignment.pos[i] as f64 + problem.vessels[i].loa as f64 / 2.0;
            yard_distance += (vessel_centre - zone.centre()).abs();
        }
    }

    5_000.0 * total_start_delay as f64 + 500.0 * total_turnaround as f64 + 100.0 * makespan as f64
        - 100.0 * assignment.total_cranes_used as f64
        + yard_distance
}
