use std::collections::BTreeMap;

use serde::Serialize;

use crate::berth::{Berth, DepthBreak};
use crate::crane::{Crane, CraneType};
use crate::problem::Problem;
use crate::vessel::ProductivityPreference;
use crate::zones::{ForbiddenZone, YardQuayZone};

/// The solver's outcome for a problem, independent of which CP engine
/// produced it (spec §4.5).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Optimal,
    Feasible,
    Infeasible,
    ModelInvalid,
    Unknown,
}

impl Status {
    /// Whether this status carries an actual assignment worth extracting.
    pub fn has_solution(self) -> bool {
        matches!(self, Self::Optimal | Self::Feasible)
    }
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq)]
#[serde(rename_all = "UPPERCASE")]
enum ProductivityPreferenceWire {
    Min,
    Intermediate,
    Max,
}

impl From<ProductivityPreference> for ProductivityPreferenceWire {
    fn from(p: ProductivityPreference) -> Self {
        match p {
            ProductivityPreference::Min => Self::Min,
            ProductivityPreference::Intermediate => Self::Intermediate,
            ProductivityPreference::Max => Self::Max,
        }
    }
}

/// One vessel's extracted assignment: berth position, active window, and
/// which cranes worked it in which shift.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VesselSolution {
    pub name: String,
    pub berth_position: i64,
    pub start_shift: i64,
    pub end_shift: i64,
    pub loa: i64,
    pub workload: i64,
    pub arrival_shift_index: i64,
    productivity_preference: ProductivityPreferenceWire,
    /// Shift index to the crane ids active on this vessel that shift,
    /// restricted to shifts in `[start_shift, end_shift)`.
    pub assigned_cranes: BTreeMap<i64, Vec<String>>,
    /// Stable per-vessel index used only by external renderers to pick a
    /// consistent colour; has no bearing on the model.
    pub color_index: usize,
}

impl VesselSolution {
    pub fn new(
        name: String,
        berth_position: i64,
        start_shift: i64,
        end_shift: i64,
        loa: i64,
        workload: i64,
        arrival_shift_index: i64,
        productivity_preference: ProductivityPreference,
        assigned_cranes: BTreeMap<i64, Vec<String>>,
        color_index: usize,
    ) -> Self {
        Self {
            name,
            berth_position,
            start_shift,
            end_shift,
            loa,
            workload,
            arrival_shift_index,
            productivity_preference: productivity_preference.into(),
            assigned_cranes,
            color_index,
        }
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
struct DepthBreakEcho {
    position: i64,
    depth: f64,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
struct BerthEcho {
    length: i64,
    depth_map: Vec<DepthBreakEcho>,
}

impl BerthEcho {
    fn new(berth: &Berth) -> Self {
        Self {
            length: berth.length,
            depth_map: berth
                .depth_breaks()
                .iter()
                .map(|b| DepthBreakEcho { position: b.position, depth: b.depth })
                .collect(),
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq)]
#[serde(rename_all = "UPPERCASE")]
enum CraneTypeWire {
    Sts,
    Mhc,
}

impl From<CraneType> for CraneTypeWire {
    fn from(t: CraneType) -> Self {
        match t {
            CraneType::Sts => Self::Sts,
            CraneType::Mhc => Self::Mhc,
        }
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
struct CraneEcho {
    id: String,
    name: String,
    crane_type: CraneTypeWire,
    berth_range_start: i64,
    berth_range_end: i64,
    min_productivity: i64,
    max_productivity: i64,
}

impl From<&Crane> for CraneEcho {
    fn from(c: &Crane) -> Self {
        Self {
            id: c.id.clone(),
            name: c.name.clone(),
            crane_type: c.crane_type.into(),
            berth_range_start: c.berth_range_start,
            berth_range_end: c.berth_range_end,
            min_productivity: c.min_productivity,
            max_productivity: c.max_productivity,
        }
    }
}

/// The solver's full report: the extracted vessel schedules plus an echo of
/// the static problem data an external renderer needs alongside them.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Solution {
    pub status: Status,
    pub objective_value: f64,
    pub vessels: Vec<VesselSolution>,
    berth: BerthEcho,
    pub num_shifts: usize,
    pub shift_labels: Vec<String>,
    pub forbidden_zones: Vec<ForbiddenZone>,
    pub yard_quay_zones: Vec<YardQuayZone>,
    /// Shift index to the crane ids in service that shift.
    pub crane_availability: BTreeMap<i64, Vec<String>>,
    cranes: Vec<CraneEcho>,
}

impl Solution {
    /// Builds the echoed, status-independent portion of a `Solution` from a
    /// `Problem`; callers then attach `vessels` and `objective_value`.
    pub fn empty(problem: &Problem, status: Status) -> Self {
        let num_shifts = problem.num_shifts();
        let mut crane_availability: BTreeMap<i64, Vec<String>> = BTreeMap::new();
        for t in 0..num_shifts as i64 {
            let ids: Vec<String> = problem
                .cranes
                .iter()
                .enumerate()
                .filter(|(idx, _)| problem.crane_available(*idx, t))
                .map(|(_, c)| c.id.clone())
                .collect();
            crane_availability.insert(t, ids);
        }
        Self {
            status,
            objective_value: 0.0,
            vessels: Vec::new(),
            berth: BerthEcho::new(&problem.berth),
            num_shifts,
            shift_labels: problem.horizon.labels(),
            forbidden_zones: problem.forbidden_zones.clone(),
            yard_quay_zones: problem.yard_quay_zones.clone(),
            crane_availability,
            cranes: problem.cranes.iter().map(CraneEcho::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::berth::GAP;
    use crate::crane::CraneType;
    use crate::rules::RuleToggles;
    use crate::shift::Horizon;
    use crate::vessel::Vessel;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn problem() -> Problem {
        let start = NaiveDate::from_ymd_opt(2026, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        Problem {
            berth: Berth::new(1000, vec![DepthBreak { position: 0, depth: 16.0 }]),
            horizon: Horizon::new(start, 6, 2),
            vessels: vec![],
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
    fn empty_solution_echoes_crane_availability() {
        let p = problem();
        let sol = Solution::empty(&p, Status::Infeasible);
        assert_eq!(sol.status, Status::Infeasible);
        assert!(sol.vessels.is_empty());
        assert_eq!(sol.crane_availability[&0], vec!["STS-01".to_string()]);
        assert_eq!(sol.crane_availability[&1], vec!["STS-01".to_string()]);
    }

    #[test]
    fn vessel_solution_round_trips_through_json() {
        let mut assigned = BTreeMap::new();
        assigned.insert(0, vec!["STS-01".to_string()]);
        let vs = VesselSolution::new(
            "V1".into(),
            GAP,
            0,
            1,
            200,
            100,
            0,
            ProductivityPreference::Max,
            assigned,
            0,
        );
        let json = serde_json::to_string(&vs).unwrap();
        assert!(json.contains("\"berthPosition\":40"));
        assert!(json.contains("\"productivityPreference\":\"MAX\""));
    }
}
