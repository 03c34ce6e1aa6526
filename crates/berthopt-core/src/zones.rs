/// A rectangular space-time block a vessel's footprint must avoid entirely:
/// `[start_berth_position, end_berth_position) x [start_shift, end_shift)`.
#[derive(Clone, Debug, PartialEq)]
pub struct ForbiddenZone {
    pub start_berth_position: i64,
    pub end_berth_position: i64,
    pub start_shift: i64,
    pub end_shift: i64,
    pub description: String,
}

/// A named interval along the quay, used only by the objective's
/// yard-distance term (spec §4.4).
#[derive(Clone, Debug, PartialEq)]
pub struct YardQuayZone {
    pub id: String,
    pub name: String,
    pub start_dist: i64,
    pub end_dist: i64,
}

impl YardQuayZone {
    pub fn centre(&self) -> f64 {
        (self.start_dist + self.end_dist) as f64 / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn zone_centre() {
        let z = YardQuayZone {
            id: "z1".into(),
            name: "North yard".into(),
            start_dist: 100,
            end_dist: 300,
        };
        assert_eq!(z.centre(), 200.0);
    }
}
