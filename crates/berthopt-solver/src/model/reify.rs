//! Linear-inequality building blocks the rest of `model` is written against.
//!
//! `pumpkin_solver`'s only demonstrated constraint primitive is
//! `greater_than_or_equals` over scaled integer variables (see
//! `utf8proj-solver`'s RCPSP encoding this crate was grounded on). Every
//! equality, implication, and bidirectional "iff" this model needs is built
//! from that one primitive plus a big-M term on a 0/1 indicator variable —
//! no reification method is assumed to exist beyond it.

use pumpkin_solver::constraints as cp;
use pumpkin_solver::variables::{DomainId, TransformableVariable};
use pumpkin_solver::{ConstraintTag, Solver};

fn scaled_terms(terms: &[(DomainId, i32)]) -> Vec<pumpkin_solver::variables::AffineView<DomainId>> {
    terms.iter().map(|(v, c)| v.scaled(*c)).collect()
}

/// Posts `sum(terms) >= rhs`.
pub fn post_ge(solver: &mut Solver, terms: &[(DomainId, i32)], rhs: i32, tag: ConstraintTag) {
    let _ = solver
        .add_constraint(cp::greater_than_or_equals(scaled_terms(terms), rhs, tag))
        .post();
}

/// Posts `sum(terms) <= rhs`, i.e. `sum(-terms) >= -rhs`.
pub fn post_le(solver: &mut Solver, terms: &[(DomainId, i32)], rhs: i32, tag: ConstraintTag) {
    let negated: Vec<(DomainId, i32)> = terms.iter().map(|(v, c)| (*v, -c)).collect();
    post_ge(solver, &negated, -rhs, tag);
}

/// Posts `sum(terms) == rhs` as a pair of opposing inequalities.
pub fn post_eq(solver: &mut Solver, terms: &[(DomainId, i32)], rhs: i32, tag: ConstraintTag) {
    post_ge(solver, terms, rhs, tag);
    post_le(solver, terms, rhs, tag);
}

/// Posts `indicator == 1 ⟹ sum(terms) >= rhs`, one direction only.
///
/// Encoded as `sum(terms) - big_m * indicator >= rhs - big_m`: trivially
/// true when `indicator == 0` provided `big_m` dominates every feasible
/// value `sum(terms)` can fall short of `rhs` by.
pub fn imply_ge(
    solver: &mut Solver,
    terms: &[(DomainId, i32)],
    rhs: i32,
    indicator: DomainId,
    big_m: i32,
    tag: ConstraintTag,
) {
    let mut vars = scaled_terms(terms);
    vars.push(indicator.scaled(-big_m));
    let _ = solver.add_constraint(cp::greater_than_or_equals(vars, rhs - big_m, tag)).post();
}

/// Posts the full bidirectional `indicator ⇔ sum(terms) >= rhs`.
///
/// The forward direction is `imply_ge`; the reverse direction forces
/// `sum(terms) < rhs` whenever `indicator == 0`, via the same big-M idiom on
/// the negated sum. Both directions must be present — a one-sided version of
/// this is exactly the STS non-crossing bug this crate's predecessor shipped
/// (see the solver driver's design notes).
pub fn iff_ge(
    solver: &mut Solver,
    terms: &[(DomainId, i32)],
    rhs: i32,
    indicator: DomainId,
    big_m: i32,
    tag: ConstraintTag,
) {
    imply_ge(solver, terms, rhs, indicator, big_m, tag);
    let negated: Vec<(DomainId, i32)> = terms.iter().map(|(v, c)| (*v, -c)).collect();
    let mut vars = scaled_terms(&negated);
    vars.push(indicator.scaled(big_m));
    let _ = solver.add_constraint(cp::greater_than_or_equals(vars, 1 - rhs, tag)).post();
}
