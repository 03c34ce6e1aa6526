use crate::vessel::ProductivityPreference;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CraneType {
    /// Ship-to-shore: gantry crane running on rails along the quay. Cannot
    /// cross another STS crane (spec §4.3, constraint 10).
    Sts,
    /// Mobile harbour crane: self-propelled, more flexible, lower
    /// productivity.
    Mhc,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Crane {
    pub id: String,
    pub name: String,
    pub crane_type: CraneType,
    pub berth_range_start: i64,
    pub berth_range_end: i64,
    pub min_productivity: i64,
    pub max_productivity: i64,
}

impl Crane {
    /// The productivity figure a vessel's preference selects (spec §4.3).
    pub fn productivity_for(&self, pref: ProductivityPreference) -> i64 {
        match pref {
            ProductivityPreference::Max => self.max_productivity,
            ProductivityPreference::Min => self.min_productivity,
            ProductivityPreference::Intermediate => {
                (self.min_productivity + self.max_productivity) / 2
            }
        }
    }
}
