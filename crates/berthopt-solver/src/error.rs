use thiserror::Error;

/// A genuine internal fault, never an ordinary solve outcome — infeasibility
/// and timeouts are reported via `Solution::status`, not `Err` (spec.md §7).
#[derive(Debug, Error)]
pub enum SolveError {
    #[error("unrecognized rule toggle reached the model builder: {0:?}")]
    UnknownRuleToggle(String),
}
