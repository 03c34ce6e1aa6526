use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::berth::{Berth, DepthBreak};
use crate::crane::{Crane, CraneType};
use crate::error::ConfigError;
use crate::problem::{CraneUnavailability, Problem};
use crate::rules::RuleToggles;
use crate::shift::Horizon;
use crate::vessel::{ProductivityPreference, TargetZone, Vessel};
use crate::zones::{ForbiddenZone, YardQuayZone};

/// A fixed 6-hour shift length. The configuration contract exposes a start
/// date and a shift count but no shift length, so this crate fixes one value
/// rather than inventing a field the contract doesn't have (spec §3 notes
/// 6-hour granularity as "typical"; this crate makes it the only option).
const SHIFT_HOURS: i64 = 6;

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct DepthBreakConfig {
    pub position: i64,
    pub depth: f64,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct BerthConfig {
    pub length: i64,
    pub depth_map: Vec<DepthBreakConfig>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ShiftsConfig {
    /// `DDMMYYYY`, e.g. `"01062026"`.
    pub start_date: String,
    pub num_shifts: usize,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct TargetZoneConfig {
    pub yard_quay_zone_id: String,
    pub volume: f64,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct VesselConfig {
    pub name: String,
    pub workload: i64,
    pub loa: i64,
    pub draft: f64,
    pub arrival_shift: i64,
    #[serde(default)]
    pub arrival_hour_offset: f64,
    pub max_cranes: i64,
    pub productivity_preference: String,
    #[serde(default)]
    pub target_zones: Vec<TargetZoneConfig>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CraneConfig {
    pub id: String,
    pub name: String,
    pub crane_type: String,
    pub berth_range_start: i64,
    pub berth_range_end: i64,
    pub min_productivity: i64,
    pub max_productivity: i64,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CraneUnavailabilityConfig {
    pub crane_id: String,
    pub shifts: Vec<i64>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ForbiddenZoneConfig {
    pub start_berth_position: i64,
    pub end_berth_position: i64,
    pub start_shift: i64,
    pub end_shift: i64,
    pub description: String,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct YardQuayZoneConfig {
    pub id: String,
    pub name: String,
    pub start_dist: i64,
    pub end_dist: i64,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SolverSettingsConfig {
    #[serde(default = "default_time_limit_seconds")]
    pub time_limit_seconds: u64,
}

fn default_time_limit_seconds() -> u64 {
    60
}

/// The plain domain-level counterpart of [`SolverSettingsConfig`], decoupled
/// from serde so `berthopt_solver::solve` doesn't depend on the wire format.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolverSettings {
    pub time_limit_seconds: u64,
}

/// The decoded configuration the hosting application hands to this crate
/// (spec §6). Structurally invalid JSON (missing fields, wrong types) is
/// rejected by serde before a `Config` value exists; `Config::try_into`
/// catches everything serde's type system can't: unknown enum values,
/// unknown rule toggle names, and out-of-range numbers.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Config {
    pub berth: BerthConfig,
    pub shifts: ShiftsConfig,
    pub vessels: Vec<VesselConfig>,
    pub cranes: Vec<CraneConfig>,
    #[serde(default)]
    pub crane_unavailability: Vec<CraneUnavailabilityConfig>,
    #[serde(default)]
    pub forbidden_zones: Vec<ForbiddenZoneConfig>,
    #[serde(default)]
    pub yard_quay_zones: Vec<YardQuayZoneConfig>,
    pub solver_settings: SolverSettingsConfig,
    #[serde(default)]
    pub solver_rules: HashMap<String, bool>,
}

fn parse_productivity_preference(
    field: &str,
    value: &str,
) -> Result<ProductivityPreference, ConfigError> {
    match value {
        "MAX" => Ok(ProductivityPreference::Max),
        "MIN" => Ok(ProductivityPreference::Min),
        "INTERMEDIATE" => Ok(ProductivityPreference::Intermediate),
        other => Err(ConfigError::UnknownVariant {
            field: field.to_string(),
            value: other.to_string(),
        }),
    }
}

fn parse_crane_type(field: &str, value: &str) -> Result<CraneType, ConfigError> {
    match value {
        "STS" => Ok(CraneType::Sts),
        "MHC" => Ok(CraneType::Mhc),
        other => Err(ConfigError::UnknownVariant {
            field: field.to_string(),
            value: other.to_string(),
        }),
    }
}

fn apply_rule_toggle(
    toggles: &mut RuleToggles,
    name: &str,
    value: bool,
) -> Result<(), ConfigError> {
    match name {
        "enable_forbidden_zones" => toggles.enable_forbidden_zones = value,
        "enable_crane_capacity" => toggles.enable_crane_capacity = value,
        "enable_max_cranes" => toggles.enable_max_cranes = value,
        "enable_min_cranes_on_arrival" => toggles.enable_min_cranes_on_arrival = value,
        "enable_crane_reach" => toggles.enable_crane_reach = value,
        "enable_sts_non_crossing" => toggles.enable_sts_non_crossing = value,
        "enable_shifting_gang" => toggles.enable_shifting_gang = value,
        "enable_depth_tuples" => toggles.enable_depth_tuples = value,
        "enable_crane_reach_strict" => toggles.enable_crane_reach_strict = value,
        other => {
            return Err(ConfigError::UnknownRuleToggle {
                field: "solver_rules".to_string(),
                name: other.to_string(),
            })
        }
    }
    Ok(())
}

impl Config {
    /// Extracted by reference since `Problem::try_from` consumes the rest of
    /// the config by value.
    pub fn solver_settings(&self) -> SolverSettings {
        SolverSettings { time_limit_seconds: self.solver_settings.time_limit_seconds }
    }
}

impl TryFrom<Config> for Problem {
    type Error = ConfigError;

    fn try_from(config: Config) -> Result<Self, ConfigError> {
        if config.berth.depth_map.is_empty() {
            return Err(ConfigError::MissingField("berth.depth_map".to_string()));
        }
        let berth = Berth::new(
            config.berth.length,
            config
                .berth
                .depth_map
                .iter()
                .map(|b| DepthBreak { position: b.position, depth: b.depth })
                .collect(),
        );

        if config.shifts.num_shifts == 0 {
            return Err(ConfigError::OutOfRange {
                field: "shifts.num_shifts".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        let start_date = NaiveDate::parse_from_str(&config.shifts.start_date, "%d%m%Y").map_err(
            |_| ConfigError::OutOfRange {
                field: "shifts.start_date".to_string(),
                reason: format!("expected DDMMYYYY, got {:?}", config.shifts.start_date),
            },
        )?;
        let horizon = Horizon::new(
            start_date.and_hms_opt(0, 0, 0).expect("midnight is always valid"),
            SHIFT_HOURS,
            config.shifts.num_shifts,
        );

        if config.vessels.is_empty() {
            return Err(ConfigError::MissingField("vessels".to_string()));
        }
        let vessels = config
            .vessels
            .into_iter()
            .map(|v| {
                Ok(Vessel {
                    name: v.name,
                    loa: v.loa,
                    draft: v.draft,
                    workload: v.workload,
                    max_cranes: v.max_cranes,
                    productivity_preference: parse_productivity_preference(
                        "vessels[].productivity_preference",
                        &v.productivity_preference,
                    )?,
                    arrival_shift_index: v.arrival_shift,
                    arrival_hour_offset: v.arrival_hour_offset,
                    target_zones: v
                        .target_zones
                        .into_iter()
                        .map(|z| TargetZone {
                            yard_quay_zone_id: z.yard_quay_zone_id,
                            volume: z.volume,
                        })
                        .collect(),
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        if config.cranes.is_empty() {
            return Err(ConfigError::MissingField("cranes".to_string()));
        }
        let cranes = config
            .cranes
            .into_iter()
            .map(|c| {
                Ok(Crane {
                    id: c.id,
                    name: c.name,
                    crane_type: parse_crane_type("cranes[].crane_type", &c.crane_type)?,
                    berth_range_start: c.berth_range_start,
                    berth_range_end: c.berth_range_end,
                    min_productivity: c.min_productivity,
                    max_productivity: c.max_productivity,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        let crane_unavailability = config
            .crane_unavailability
            .into_iter()
            .map(|u| CraneUnavailability { crane_id: u.crane_id, shifts: u.shifts })
            .collect();

        let forbidden_zones = config
            .forbidden_zones
            .into_iter()
            .map(|z| ForbiddenZone {
                start_berth_position: z.start_berth_position,
                end_berth_position: z.end_berth_position,
                start_shift: z.start_shift,
                end_shift: z.end_shift,
                description: z.description,
            })
            .collect();

        let yard_quay_zones = config
            .yard_quay_zones
            .into_iter()
            .map(|z| YardQuayZone {
                id: z.id,
                name: z.name,
                start_dist: z.start_dist,
                end_dist: z.end_dist,
            })
            .collect();

        let mut rule_toggles = RuleToggles::default();
        for (name, value) in &config.solver_rules {
            apply_rule_toggle(&mut rule_toggles, name, *value)?;
        }

        Ok(Problem {
            berth,
            horizon,
            vessels,
            cranes,
            forbidden_zones,
            yard_quay_zones,
            crane_unavailability,
            rule_toggles,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn minimal_json() -> serde_json::Value {
        serde_json::json!({
            "berth": {"length": 1000, "depth_map": [{"position": 0, "depth": 16.0}]},
            "shifts": {"start_date": "01062026", "num_shifts": 2},
            "vessels": [{
                "name": "V1",
                "workload": 100,
                "loa": 200,
                "draft": 10.0,
                "arrival_shift": 0,
                "max_cranes": 2,
                "productivity_preference": "MAX"
            }],
            "cranes": [{
                "id": "STS-01",
                "name": "STS-01",
                "crane_type": "STS",
                "berth_range_start": 0,
                "berth_range_end": 1000,
                "min_productivity": 100,
                "max_productivity": 130
            }],
            "solver_settings": {"time_limit_seconds": 60}
        })
    }

    #[test]
    fn parses_minimal_config_into_a_problem() {
        let config: Config = serde_json::from_value(minimal_json()).unwrap();
        let problem = Problem::try_from(config).unwrap();
        assert_eq!(problem.num_vessels(), 1);
        assert_eq!(problem.num_cranes(), 1);
        assert_eq!(problem.num_shifts(), 2);
        assert!(problem.rule_toggles.enable_forbidden_zones);
        assert!(!problem.rule_toggles.enable_crane_reach_strict);
    }

    #[test]
    fn unknown_productivity_preference_is_rejected() {
        let mut json = minimal_json();
        json["vessels"][0]["productivity_preference"] = serde_json::json!("ABSURD");
        let config: Config = serde_json::from_value(json).unwrap();
        let err = Problem::try_from(config).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownVariant { .. }));
    }

    #[test]
    fn unknown_rule_toggle_is_rejected() {
        let mut json = minimal_json();
        json["solver_rules"] = serde_json::json!({"enable_teleportation": true});
        let config: Config = serde_json::from_value(json).unwrap();
        let err = Problem::try_from(config).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownRuleToggle { .. }));
    }

    #[test]
    fn malformed_start_date_is_rejected() {
        let mut json = minimal_json();
        json["shifts"]["start_date"] = serde_json::json!("2026-06-01");
        let config: Config = serde_json::from_value(json).unwrap();
        let err = Problem::try_from(config).unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { .. }));
    }

    #[test]
    fn solver_settings_reads_the_configured_time_limit() {
        let mut json = minimal_json();
        json["solver_settings"]["time_limit_seconds"] = serde_json::json!(15);
        let config: Config = serde_json::from_value(json).unwrap();
        assert_eq!(config.solver_settings().time_limit_seconds, 15);
    }

    #[test]
    fn empty_vessel_list_is_rejected() {
        let mut json = minimal_json();
        json["vessels"] = serde_json::json!([]);
        let config: Config = serde_json::from_value(json).unwrap();
        let err = Problem::try_from(config).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField(_)));
    }
}
