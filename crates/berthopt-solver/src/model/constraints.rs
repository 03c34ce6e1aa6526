//! The eleven numbered constraint families of spec §4.3, plus the two
//! variable *definitions* (`active`, `craneActive`) that the decision
//! variable table states as "true iff ..." rather than listing among the
//! eleven — those are never toggle-gated since they pin down what the
//! variables mean, not an optional model refinement.

use berthopt_core::berth::GAP;
use berthopt_core::preprocess::{FeasiblePositions, VesselPreprocess};
use berthopt_core::problem::Problem;
use pumpkin_solver::{ConstraintTag, Solver};

use crate::model::reify::{imply_ge, iff_ge, post_eq, post_ge, post_le};
use crate::model::variables::Variables;

/// Big-M bound for position-valued linear expressions: no position exceeds
/// the berth length.
fn big_m_position(problem: &Problem) -> i32 {
    (problem.berth.length + 1) as i32
}

/// Big-M bound for shift-valued linear expressions.
fn big_m_time(problem: &Problem) -> i32 {
    (problem.num_shifts() as i32) + 2
}

pub fn build_constraints(
    solver: &mut Solver,
    problem: &Problem,
    preprocessed: &[VesselPreprocess],
    vars: &Variables,
    tag: ConstraintTag,
) {
    let big_m_pos = big_m_position(problem);
    let big_m_t = big_m_time(problem);
    let num_shifts = problem.num_shifts();

    link_duration(solver, vars, tag);
    link_active_window(solver, problem, vars, big_m_t, tag);
    link_crane_active(solver, vars, tag);
    link_crane_active_requires_window(solver, vars, tag);

    constraint_2_depth_tuples(solver, problem, preprocessed, vars, tag);
    constraint_3_no_overlap(solver, problem, vars, big_m_pos, big_m_t, tag);
    constraint_4_forbidden_zones(solver, problem, vars, big_m_pos, big_m_t, tag);
    constraint_5_workload(solver, problem, vars, tag);
    constraint_6_crane_capacity(solver, problem, vars, tag);
    constraint_7_max_cranes(solver, problem, vars, tag);
    constraint_8_min_work_when_active(solver, problem, vars, tag);
    constraint_9_crane_reach(solver, problem, vars, big_m_pos, tag);
    constraint_10_sts_non_crossing(solver, problem, vars, big_m_pos, tag);
    constraint_11_shifting_gang(solver, problem, vars, big_m_t, tag);

    let _ = num_shifts;
}

/// `duration[i] = end[i] - start[i]`.
fn link_duration(solver: &mut Solver, vars: &Variables, tag: ConstraintTag) {
    for i in 0..vars.pos.len() {
        post_eq(
            solver,
            &[(vars.end[i], 1), (vars.start[i], -1), (vars.duration[i], -1)],
            0,
            tag,
        );
    }
}

/// `isAfterStart[i,t] ⇔ start[i] ≤ t`, `isBeforeEnd[i,t] ⇔ end[i] ≥ t+1`,
/// `active[i,t] ⇔ isAfterStart[i,t] ∧ isBeforeEnd[i,t]` — all bidirectional,
/// per spec §9's "both directions must be enforced" note.
fn link_active_window(
    solver: &mut Solver,
    problem: &Problem,
    vars: &Variables,
    big_m_t: i32,
    tag: ConstraintTag,
) {
    for i in 0..vars.pos.len() {
        for t in 0..problem.num_shifts() {
            let is_after_start = vars.is_after_start[&(i, t)];
            let is_before_end = vars.is_before_end[&(i, t)];
            let active = vars.active[&(i, t)];

            iff_ge(solver, &[(vars.start[i], -1)], -(t as i32), is_after_start, big_m_t, tag);
            iff_ge(solver, &[(vars.end[i], 1)], t as i32 + 1, is_before_end, big_m_t, tag);
            iff_ge(solver, &[(is_after_start, 1), (is_before_end, 1)], 2, active, 2, tag);
        }
    }
}

/// `craneActive[k,i,t] ⇔ moves[k,i,t] ≥ 1`.
fn link_crane_active(solver: &mut Solver, vars: &Variables, tag: ConstraintTag) {
    for (&(k, i, t), &moves) in &vars.moves {
        let crane_active = vars.crane_active[&(k, i, t)];
        let limit = vars.limit[&(k, i, t)];
        iff_ge(solver, &[(moves, 1)], 1, crane_active, limit.max(1), tag);
    }
}

/// `craneActive[k,i,t] ⟹ active[i,t]` — a crane can only be lit up on a
/// vessel during the shifts it is actually berthed, closing the gate
/// `active[i,t]` exists to provide (spec §4.3, §4.5). Both variables are
/// already 0/1, so the gate is a direct linear inequality rather than a
/// big-M implication: `active[i,t] - craneActive[k,i,t] ≥ 0`.
fn link_crane_active_requires_window(solver: &mut Solver, vars: &Variables, tag: ConstraintTag) {
    for (&(_k, i, t), &crane_active) in &vars.crane_active {
        let active = vars.active[&(i, t)];
        post_ge(solver, &[(active, 1), (crane_active, -1)], 0, tag);
    }
}

/// Constraint 2: restrict `pos[i]` to the depth-feasible tuple set via a
/// one-hot selection, but only when that set has gaps and the toggle is on
/// — a contiguous set is already exactly the variable's domain.
fn constraint_2_depth_tuples(
    solver: &mut Solver,
    problem: &Problem,
    preprocessed: &[VesselPreprocess],
    vars: &Variables,
    tag: ConstraintTag,
) {
    if !problem.rule_toggles.enable_depth_tuples {
        return;
    }
    for (i, prep) in preprocessed.iter().enumerate() {
        let FeasiblePositions::Sparse(positions) = &prep.feasible_positions else {
            continue;
        };
        let sel: Vec<_> = positions.iter().map(|_| solver.new_bounded_integer(0, 1)).collect();
        post_eq(solver, &sel.iter().map(|&s| (s, 1)).collect::<Vec<_>>(), 1, tag);

        let mut pos_terms: Vec<(_, i32)> =
            sel.iter().zip(positions).map(|(&s, &p)| (s, p as i32)).collect();
        pos_terms.push((vars.pos[i], -1));
        post_eq(solver, &pos_terms, 0, tag);
    }
}

/// Constraint 3: pairwise 2D no-overlap between vessel footprints
/// `[pos[i], pos[i]+loa_i+GAP) x [start[i], end[i])`.
fn constraint_3_no_overlap(
    solver: &mut Solver,
    problem: &Problem,
    vars: &Variables,
    big_m_pos: i32,
    big_m_t: i32,
    tag: ConstraintTag,
) {
    let n = vars.pos.len();
    for i in 0..n {
        for j in (i + 1)..n {
            let loa_i = problem.vessels[i].loa as i32;
            let loa_j = problem.vessels[j].loa as i32;

            let sep_left = solver.new_bounded_integer(0, 1);
            let sep_right = solver.new_bounded_integer(0, 1);
            let sep_before = solver.new_bounded_integer(0, 1);
            let sep_after = solver.new_bounded_integer(0, 1);

            imply_ge(
                solver,
                &[(vars.pos[j], 1), (vars.pos[i], -1)],
                loa_i + GAP as i32,
                sep_left,
                big_m_pos,
                tag,
            );
            imply_ge(
                solver,
                &[(vars.pos[i], 1), (vars.pos[j], -1)],
                loa_j + GAP as i32,
                sep_right,
                big_m_pos,
                tag,
            );
            imply_ge(
                solver,
                &[(vars.start[j], 1), (vars.end[i], -1)],
                0,
                sep_before,
                big_m_t,
                tag,
            );
            imply_ge(
                solver,
                &[(vars.start[i], 1), (vars.end[j], -1)],
                0,
                sep_after,
                big_m_t,
                tag,
            );
            post_ge(
                solver,
                &[(sep_left, 1), (sep_right, 1), (sep_before, 1), (sep_after, 1)],
                1,
                tag,
            );
        }
    }
}

/// Constraint 4 (`enable_forbidden_zones`): each vessel footprint rectangle
/// must not overlap any forbidden rectangle.
fn constraint_4_forbidden_zones(
    solver: &mut Solver,
    problem: &Problem,
    vars: &Variables,
    big_m_pos: i32,
    big_m_t: i32,
    tag: ConstraintTag,
) {
    if !problem.rule_toggles.enable_forbidden_zones {
        return;
    }
    for i in 0..vars.pos.len() {
        let loa_i = problem.vessels[i].loa as i32;
        for zone in &problem.forbidden_zones {
            let sep_left = solver.new_bounded_integer(0, 1);
            let sep_right = solver.new_bounded_integer(0, 1);
            let sep_before = solver.new_bounded_integer(0, 1);
            let sep_after = solver.new_bounded_integer(0, 1);

            imply_ge(
                solver,
                &[(vars.pos[i], -1)],
                loa_i + GAP as i32 - zone.start_berth_position as i32,
                sep_left,
                big_m_pos,
                tag,
            );
            imply_ge(
                solver,
                &[(vars.pos[i], 1)],
                zone.end_berth_position as i32,
                sep_right,
                big_m_pos,
                tag,
            );
            imply_ge(
                solver,
                &[(vars.end[i], -1)],
                -(zone.start_shift as i32),
                sep_before,
                big_m_t,
                tag,
            );
            imply_ge(
                solver,
                &[(vars.start[i], 1)],
                zone.end_shift as i32,
                sep_after,
                big_m_t,
                tag,
            );
            post_ge(
                solver,
                &[(sep_left, 1), (sep_right, 1), (sep_before, 1), (sep_after, 1)],
                1,
                tag,
            );
        }
    }
}

/// Constraint 5: every vessel's workload is fully covered by assigned moves.
fn constraint_5_workload(solver: &mut Solver, problem: &Problem, vars: &Variables, tag: ConstraintTag) {
    for i in 0..vars.pos.len() {
        let terms: Vec<_> = vars
            .moves
            .iter()
            .filter(|((_, vi, _), _)| *vi == i)
            .map(|(_, &m)| (m, 1))
            .collect();
        post_ge(solver, &terms, problem.vessels[i].workload as i32, tag);
    }
}

/// Constraint 6 (`enable_crane_capacity`): `Σ_i moves[k,i,t] ≤ maxProductivity_k`.
fn constraint_6_crane_capacity(solver: &mut Solver, problem: &Problem, vars: &Variables, tag: ConstraintTag) {
    if !problem.rule_toggles.enable_crane_capacity {
        return;
    }
    for k in 0..problem.num_cranes() {
        for t in 0..problem.num_shifts() {
            let terms: Vec<_> = vars
                .moves
                .iter()
                .filter(|((ck, _, ct), _)| *ck == k && *ct == t)
                .map(|(_, &m)| (m, 1))
                .collect();
            if terms.is_empty() {
                continue;
            }
            post_le(solver, &terms, problem.cranes[k].max_productivity as i32, tag);
        }
    }
}

/// Constraint 7 (`enable_max_cranes`): `Σ_k craneActive[k,i,t] ≤ maxCranes_i`.
fn constraint_7_max_cranes(solver: &mut Solver, problem: &Problem, vars: &Variables, tag: ConstraintTag) {
    if !problem.rule_toggles.enable_max_cranes {
        return;
    }
    for i in 0..vars.pos.len() {
        for t in 0..problem.num_shifts() {
            let terms: Vec<_> = vars
                .crane_active
                .iter()
                .filter(|((_, vi, ct), _)| *vi == i && *ct == t)
                .map(|(_, &c)| (c, 1))
                .collect();
            if terms.is_empty() {
                continue;
            }
            post_le(solver, &terms, problem.vessels[i].max_cranes as i32, tag);
        }
    }
}

/// Constraint 8 (`enable_min_cranes_on_arrival`): an active shift performs
/// at least one move.
fn constraint_8_min_work_when_active(
    solver: &mut Solver,
    problem: &Problem,
    vars: &Variables,
    tag: ConstraintTag,
) {
    if !problem.rule_toggles.enable_min_cranes_on_arrival {
        return;
    }
    for i in 0..vars.pos.len() {
        for t in 0..problem.num_shifts() {
            let terms: Vec<_> = vars
                .moves
                .iter()
                .filter(|((_, vi, ct), _)| *vi == i && *ct == t)
                .map(|(_, &m)| (m, 1))
                .collect();
            if terms.is_empty() {
                continue;
            }
            let big_m: i32 = vars
                .moves
                .iter()
                .filter(|((_, vi, ct), _)| *vi == i && *ct == t)
                .map(|(key, _)| vars.limit[key])
                .sum::<i32>()
                .max(1);
            imply_ge(solver, &terms, 1, vars.active[&(i, t)], big_m, tag);
        }
    }
}

/// Constraint 9 (`enable_crane_reach`, and the new `enable_crane_reach_strict`):
/// a crane active on a vessel must reach its berth position.
fn constraint_9_crane_reach(
    solver: &mut Solver,
    problem: &Problem,
    vars: &Variables,
    big_m_pos: i32,
    tag: ConstraintTag,
) {
    if !problem.rule_toggles.enable_crane_reach {
        return;
    }
    for (&(k, i, _t), &crane_active) in &vars.crane_active {
        let crane = &problem.cranes[k];
        imply_ge(
            solver,
            &[(vars.pos[i], 1)],
            crane.berth_range_start as i32,
            crane_active,
            big_m_pos,
            tag,
        );
        if problem.rule_toggles.enable_crane_reach_strict {
            let loa_i = problem.vessels[i].loa as i32;
            imply_ge(
                solver,
                &[(vars.pos[i], -1)],
                loa_i - crane.berth_range_end as i32,
                crane_active,
                big_m_pos,
                tag,
            );
        }
    }
}

/// Constraint 10 (`enable_sts_non_crossing`): STS cranes cannot cross.
fn constraint_10_sts_non_crossing(
    solver: &mut Solver,
    problem: &Problem,
    vars: &Variables,
    big_m_pos: i32,
    tag: ConstraintTag,
) {
    if !problem.rule_toggles.enable_sts_non_crossing {
        return;
    }
    let sts: Vec<usize> = (0..problem.num_cranes())
        .filter(|&k| problem.cranes[k].crane_type == berthopt_core::crane::CraneType::Sts)
        .collect();

    for t in 0..problem.num_shifts() {
        for (idx1, &k1) in sts.iter().enumerate() {
            for &k2 in &sts[(idx1 + 1)..] {
                for a in 0..vars.pos.len() {
                    let Some(&ca1) = vars.crane_active.get(&(k1, a, t)) else { continue };
                    for b in 0..vars.pos.len() {
                        if a == b {
                            continue;
                        }
                        let Some(&ca2) = vars.crane_active.get(&(k2, b, t)) else { continue };

                        let both_active = solver.new_bounded_integer(0, 1);
                        iff_ge(solver, &[(ca1, 1), (ca2, 1)], 2, both_active, 2, tag);
                        imply_ge(
                            solver,
                            &[(vars.pos[b], 1), (vars.pos[a], -1)],
                            0,
                            both_active,
                            big_m_pos,
                            tag,
                        );
                    }
                }
            }
        }
    }
}

/// Constraint 11 (`enable_shifting_gang`): a crane that will still be
/// working on this vessel next shift must run at full throttle this shift.
fn constraint_11_shifting_gang(
    solver: &mut Solver,
    problem: &Problem,
    vars: &Variables,
    big_m_t: i32,
    tag: ConstraintTag,
) {
    if !problem.rule_toggles.enable_shifting_gang {
        return;
    }
    let mut is_intermediate = std::collections::HashMap::new();
    for (&(k, i, t), &moves) in &vars.moves {
        let limit = vars.limit[&(k, i, t)];
        let crane_active = vars.crane_active[&(k, i, t)];
        let intermediate = *is_intermediate.entry((i, t)).or_insert_with(|| {
            let b = solver.new_bounded_integer(0, 1);
            iff_ge(solver, &[(vars.end[i], 1)], t as i32 + 2, b, big_m_t, tag);
            b
        });

        let both = solver.new_bounded_integer(0, 1);
        iff_ge(solver, &[(crane_active, 1), (intermediate, 1)], 2, both, 2, tag);
        imply_ge(solver, &[(moves, 1)], limit, both, limit.max(1), tag);
        imply_ge(solver, &[(moves, -1)], -limit, both, limit.max(1), tag);
    }
}
