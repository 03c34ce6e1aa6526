use std::collections::HashMap;

use berthopt_core::preprocess::{FeasiblePositions, VesselPreprocess};
use berthopt_core::problem::Problem;
use berthopt_core::vessel::ProductivityPreference;
use pumpkin_solver::variables::DomainId;
use pumpkin_solver::Solver;

/// `limit(k,i,t)` from spec §4.3: the productivity figure `V_i`'s preference
/// selects for crane `k`, floored and reduced by the arrival fraction on the
/// vessel's first active shift.
pub fn limit_for(
    problem: &Problem,
    vessel_idx: usize,
    crane_idx: usize,
    t: i64,
    clamped_arrival_shift: i64,
    arrival_fraction: f64,
) -> i32 {
    let vessel = &problem.vessels[vessel_idx];
    let crane = &problem.cranes[crane_idx];
    let base = crane.productivity_for(vessel.productivity_preference);
    if t == clamped_arrival_shift {
        ((base as f64) * arrival_fraction).floor() as i32
    } else {
        base as i32
    }
}

/// Every decision variable named in spec §4.3, created in the order the
/// spec's concurrency notes require: vessels by index, shifts ascending,
/// cranes by fleet index.
pub struct Variables {
    pub pos: Vec<DomainId>,
    pub start: Vec<DomainId>,
    pub end: Vec<DomainId>,
    pub duration: Vec<DomainId>,
    /// `(vessel, shift) -> active[i,t]`.
    pub active: HashMap<(usize, usize), DomainId>,
    /// `(vessel, shift) -> isAfterStart[i,t]`.
    pub is_after_start: HashMap<(usize, usize), DomainId>,
    /// `(vessel, shift) -> isBeforeEnd[i,t]`.
    pub is_before_end: HashMap<(usize, usize), DomainId>,
    /// `(crane, vessel, shift) -> moves[k,i,t]`, present only where
    /// `limit(k,i,t) > 0` and crane `k` is available and active.
    pub moves: HashMap<(usize, usize, usize), DomainId>,
    /// `(crane, vessel, shift) -> craneActive[k,i,t]`, same domain as `moves`.
    pub crane_active: HashMap<(usize, usize, usize), DomainId>,
    /// `limit(k,i,t)` for every entry that has a `moves` variable.
    pub limit: HashMap<(usize, usize, usize), i32>,
}

impl Variables {
    pub fn build(solver: &mut Solver, problem: &Problem, preprocessed: &[VesselPreprocess]) -> Self {
        let num_shifts = problem.num_shifts();
        let t_max = (num_shifts as i64 - 1).max(0) as i32;

        let mut pos = Vec::with_capacity(problem.num_vessels());
        let mut start = Vec::with_capacity(problem.num_vessels());
        let mut end = Vec::with_capacity(problem.num_vessels());
        let mut duration = Vec::with_capacity(problem.num_vessels());
        let mut active = HashMap::new();
        let mut is_after_start = HashMap::new();
        let mut is_before_end = HashMap::new();
        let mut moves = HashMap::new();
        let mut crane_active = HashMap::new();
        let mut limit = HashMap::new();

        for (i, prep) in preprocessed.iter().enumerate() {
            let (pos_min, pos_max) = match &prep.feasible_positions {
                FeasiblePositions::Contiguous { min, max } => (*min as i32, *max as i32),
                FeasiblePositions::Sparse(positions) => (
                    *positions.iter().min().unwrap() as i32,
                    *positions.iter().max().unwrap() as i32,
                ),
            };
            pos.push(solver.new_bounded_integer(pos_min, pos_max));

            let arrival = prep.clamped_arrival_shift as i32;
            start.push(solver.new_bounded_integer(arrival, t_max));
            end.push(solver.new_bounded_integer((arrival + 1).min(num_shifts as i32), num_shifts as i32));
            duration.push(solver.new_bounded_integer(1, num_shifts as i32));

            for t in 0..num_shifts {
                active.insert((i, t), solver.new_bounded_integer(0, 1));
                is_after_start.insert((i, t), solver.new_bounded_integer(0, 1));
                is_before_end.insert((i, t), solver.new_bounded_integer(0, 1));

                for k in 0..problem.num_cranes() {
                    if !problem.crane_available(k, t as i64) {
                        continue;
                    }
                    if (t as i64) < prep.clamped_arrival_shift {
                        continue;
                    }
                    let l = limit_for(
                        problem,
                        i,
                        k,
                        t as i64,
                        prep.clamped_arrival_shift,
                        prep.arrival_fraction,
                    );
                    if l <= 0 {
                        continue;
                    }
                    moves.insert((k, i, t), solver.new_bounded_integer(0, l));
                    crane_active.insert((k, i, t), solver.new_bounded_integer(0, 1));
                    limit.insert((k, i, t), l);
                }
            }
        }

        Self {
            pos,
            start,
            end,
            duration,
            active,
            is_after_start,
            is_before_end,
            moves,
            crane_active,
            limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use berthopt_core::berth::{Berth, DepthBreak};
    use berthopt_core::crane::{Crane, CraneType};
    use berthopt_core::rules::RuleToggles;
    use berthopt_core::shift::Horizon;
    use berthopt_core::vessel::Vessel;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn single_vessel_problem() -> Problem {
        let start = NaiveDate::from_ymd_opt(2026, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        Problem {
            berth: Berth::new(1000, vec![DepthBreak { position: 0, depth: 16.0 }]),
            horizon: Horizon::new(start, 6, 2),
            vessels: vec![Vessel {
                name: "V1".into(),
                loa: 200,
                draft: 10.0,
                workload: 100,
                max_cranes: 2,
                productivity_preference: ProductivityPreference::Max,
                arrival_shift_index: 0,
                arrival_hour_offset: 0.0,
                target_zones: vec![],
            }],
            cranes: vec![Crane {
                id: "STS-01".into(),
                name: "STS-01".into(),
                crane_type: CraneType::Sts,
                berth_range_start: 0,
                berth_range_end: 1000,
                min_productivity: 100,
                max_productivity: 131,
            }],
            forbidden_zones: vec![],
            yard_quay_zones: vec![],
            crane_unavailability: vec![],
            rule_toggles: RuleToggles::default(),
        }
    }

    #[test]
    fn limit_is_floored_and_scaled_on_arrival_shift() {
        let problem = single_vessel_problem();
        let l = limit_for(&problem, 0, 0, 0, 0, 0.5);
        assert_eq!(l, 65);
    }

    #[test]
    fn limit_is_unscaled_off_the_arrival_shift() {
        let problem = single_vessel_problem();
        let l = limit_for(&problem, 0, 0, 1, 0, 0.5);
        assert_eq!(l, problem.cranes[0].max_productivity as i32);
    }
}
