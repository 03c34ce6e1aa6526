use crate::berth::GAP;
use crate::problem::Problem;
use crate::vessel::Vessel;

/// The set of berth positions a vessel's bow may legally occupy, ignoring
/// time entirely — depth is a property of the quay, not the schedule.
///
/// `Sparse` is built only when the depth-feasible set has gaps; a gapless
/// set is always reported as `Contiguous`, which lets the model builder use
/// a plain bounded-integer domain instead of the one-hot selection encoding
/// `Sparse` requires (spec §4.3, depth tuples).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FeasiblePositions {
    Contiguous { min: i64, max: i64 },
    Sparse(Vec<i64>),
}

impl FeasiblePositions {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Contiguous { min, max } => min > max,
            Self::Sparse(positions) => positions.is_empty(),
        }
    }
}

/// Everything `preprocess_problem` derives for a single vessel ahead of
/// model construction.
#[derive(Clone, Debug, PartialEq)]
pub struct VesselPreprocess {
    pub feasible_positions: FeasiblePositions,
    pub clamped_arrival_shift: i64,
    pub arrival_fraction: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub enum PreprocessResult {
    Ready(Vec<VesselPreprocess>),
    /// A vessel has no depth-feasible berth position at all: no draft,
    /// length, and berth combination can satisfy it, so the model is
    /// infeasible before the solver ever runs (spec §9, replacing the
    /// hard-coded FEASIBLE status with a real infeasibility check).
    Infeasible { vessel_index: usize },
}

/// Every integer position `x` in `[GAP, L - loa - GAP]` such that the
/// shoalest point under the vessel's footprint is still deep enough.
fn depth_feasible_positions(problem: &Problem, vessel: &Vessel) -> FeasiblePositions {
    let min_start = GAP;
    let max_start = problem.berth.length - vessel.loa - GAP;
    if max_start < min_start {
        return FeasiblePositions::Sparse(Vec::new());
    }
    let positions: Vec<i64> = (min_start..=max_start)
        .filter(|&x| problem.berth.min_depth_over(x, vessel.loa) >= vessel.draft)
        .collect();
    match positions.as_slice() {
        [] => FeasiblePositions::Sparse(positions),
        [only] => FeasiblePositions::Contiguous { min: *only, max: *only },
        [first, .., last] if (*last - *first + 1) as usize == positions.len() => {
            FeasiblePositions::Contiguous { min: *first, max: *last }
        }
        _ => FeasiblePositions::Sparse(positions),
    }
}

/// Clamps a vessel's configured arrival shift into `[0, num_shifts - 1]`.
/// A vessel declared to arrive after the horizon ends is treated as arriving
/// on the last shift rather than rejected outright.
pub fn clamp_arrival(vessel: &Vessel, num_shifts: usize) -> i64 {
    vessel
        .arrival_shift_index
        .clamp(0, num_shifts.saturating_sub(1) as i64)
}

/// The usable fraction of a vessel's arrival shift: `1.0` if the vessel
/// arrives exactly on a shift boundary, otherwise `1 - offset/shift_hours`.
pub fn arrival_fraction(vessel: &Vessel, shift_hours: i64) -> f64 {
    if vessel.arrival_hour_offset == 0.0 {
        1.0
    } else {
        1.0 - vessel.arrival_hour_offset / shift_hours as f64
    }
}

pub fn preprocess_problem(problem: &Problem) -> PreprocessResult {
    let mut out = Vec::with_capacity(problem.vessels.len());
    for (idx, vessel) in problem.vessels.iter().enumerate() {
        let feasible_positions = depth_feasible_positions(problem, vessel);
        let set_size = match &feasible_positions {
            FeasiblePositions::Contiguous { min, max } => (max - min + 1).max(0) as usize,
            FeasiblePositions::Sparse(positions) => positions.len(),
        };
        tracing::debug!(vessel = vessel.name.as_str(), vessel_index = idx, set_size, "feasible berth positions");
        if feasible_positions.is_empty() {
            return PreprocessResult::Infeasible { vessel_index: idx };
        }
        out.push(VesselPreprocess {
            feasible_positions,
            clamped_arrival_shift: clamp_arrival(vessel, problem.num_shifts()),
            arrival_fraction: arrival_fraction(vessel, problem.horizon.shift_hours),
        });
    }
    PreprocessResult::Ready(out)
}
