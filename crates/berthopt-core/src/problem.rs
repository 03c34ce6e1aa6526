use crate::berth::Berth;
use crate::crane::Crane;
use crate::rules::RuleToggles;
use crate::shift::Horizon;
use crate::vessel::Vessel;
use crate::zones::{ForbiddenZone, YardQuayZone};

/// The specific shifts during which a crane is out of service (maintenance,
/// reserved for another job, etc.) — an explicit set rather than a range,
/// matching the `shifts: [int, ...]` shape of the configuration contract.
#[derive(Clone, Debug, PartialEq)]
pub struct CraneUnavailability {
    pub crane_id: String,
    pub shifts: Vec<i64>,
}

/// The complete berth allocation + quay crane assignment instance: every
/// input the solver needs, already parsed into domain types. Built only via
/// `config::Config::try_into`, which is where the invariants below are
/// actually checked — by the time a `Problem` exists they hold.
#[derive(Clone, Debug, PartialEq)]
pub struct Problem {
    pub berth: Berth,
    pub horizon: Horizon,
    pub vessels: Vec<Vessel>,
    pub cranes: Vec<Crane>,
    pub forbidden_zones: Vec<ForbiddenZone>,
    pub yard_quay_zones: Vec<YardQuayZone>,
    pub crane_unavailability: Vec<CraneUnavailability>,
    pub rule_toggles: RuleToggles,
}

impl Problem {
    pub fn num_vessels(&self) -> usize {
        self.vessels.len()
    }

    pub fn num_cranes(&self) -> usize {
        self.cranes.len()
    }

    pub fn num_shifts(&self) -> usize {
        self.horizon.num_shifts()
    }

    pub fn depth_at(&self, x: i64) -> f64 {
        self.berth.depth_at(x)
    }

    /// Whether crane `crane_idx` (an index into `self.cranes`) is in service
    /// during shift `t`.
    pub fn crane_available(&self, crane_idx: usize, t: i64) -> bool {
        let id = &self.cranes[crane_idx].id;
        !self
            .crane_unavailability
            .iter()
            .any(|u| &u.crane_id == id && u.shifts.contains(&t))
    }

    pub fn yard_quay_zone(&self, id: &str) -> Option<&YardQuayZone> {
        self.yard_quay_zones.iter().find(|z| z.id == id)
    }
}
