/// Gates for the optional constraint families in spec §4.3.
///
/// Every field defaults to `true` except `enable_crane_reach_strict`, the
/// one toggle this crate adds beyond spec.md's eight (see SPEC_FULL.md §9):
/// the symmetric crane-reach upper bound spec.md explicitly left out of the
/// source it was distilled from. Defaulting it to `false` keeps existing
/// configurations' behavior unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RuleToggles {
    pub enable_forbidden_zones: bool,
    pub enable_crane_capacity: bool,
    pub enable_max_cranes: bool,
    pub enable_min_cranes_on_arrival: bool,
    pub enable_crane_reach: bool,
    pub enable_sts_non_crossing: bool,
    pub enable_shifting_gang: bool,
    pub enable_depth_tuples: bool,
    pub enable_crane_reach_strict: bool,
}

impl Default for RuleToggles {
    fn default() -> Self {
        Self {
            enable_forbidden_zones: true,
            enable_crane_capacity: true,
            enable_max_cranes: true,
            enable_min_cranes_on_arrival: true,
            enable_crane_reach: true,
            enable_sts_non_crossing: true,
            enable_shifting_gang: true,
            enable_depth_tuples: true,
            enable_crane_reach_strict: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_spec_except_strict_reach() {
        let rules = RuleToggles::default();
        assert!(rules.enable_forbidden_zones);
        assert!(rules.enable_crane_capacity);
        assert!(rules.enable_max_cranes);
        assert!(rules.enable_min_cranes_on_arrival);
        assert!(rules.enable_crane_reach);
        assert!(rules.enable_sts_non_crossing);
        assert!(rules.enable_shifting_gang);
        assert!(rules.enable_depth_tuples);
        assert!(!rules.enable_crane_reach_strict);
    }
}
