//! Constraint model construction: variables (spec §4.3's decision variable
//! table), the linear-inequality toolkit they're built from, and the eleven
//! numbered constraint families.

pub mod constraints;
pub mod objective;
pub mod reify;
pub mod variables;

/// Minimum clearance a vessel's footprint keeps from the quay ends and from
/// every other vessel, in the same position units as [`berthopt_core::berth::Berth::length`].
pub use berthopt_core::berth::GAP;
