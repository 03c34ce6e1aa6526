/// Which crane productivity figure a vessel's moves are counted against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProductivityPreference {
    Min,
    Intermediate,
    Max,
}

/// A declared preference for a yard-quay zone: the vessel would like its
/// berth position to sit near this zone's centre, weighted by volume.
#[derive(Clone, Debug, PartialEq)]
pub struct TargetZone {
    pub yard_quay_zone_id: String,
    pub volume: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Vessel {
    pub name: String,
    pub loa: i64,
    pub draft: f64,
    pub workload: i64,
    pub max_cranes: i64,
    pub productivity_preference: ProductivityPreference,
    /// Raw arrival shift index as configured; may exceed `T-1`. Clamping to
    /// the horizon happens in `preprocess::clamp_arrival`, not here — the
    /// `Vessel` value stores exactly what was configured.
    pub arrival_shift_index: i64,
    /// Hours into the arrival shift before the vessel is actually usable.
    /// `preprocess::arrival_fraction` turns this into the `(0,1]` fraction
    /// the model builder needs; a `Vessel` never stores that fraction
    /// directly since it depends on the horizon's shift length.
    pub arrival_hour_offset: f64,
    pub target_zones: Vec<TargetZone>,
}

impl Vessel {
    /// The zone with the largest declared volume, used by the objective's
    /// yard-distance term (spec §4.4). `None` if the vessel declared no
    /// target zones.
    pub fn best_zone(&self) -> Option<&TargetZone> {
        self.target_zones
            .iter()
            .max_by(|a, b| a.volume.partial_cmp(&b.volume).unwrap())
    }
}
