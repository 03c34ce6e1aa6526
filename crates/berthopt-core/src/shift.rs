use chrono::{Duration, NaiveDateTime};

/// The planning horizon: an ordered sequence of fixed-length work shifts.
#[derive(Clone, Debug, PartialEq)]
pub struct Horizon {
    pub shift_hours: i64,
    starts: Vec<NaiveDateTime>,
}

impl Horizon {
    /// Builds a horizon of `num_shifts` consecutive shifts of `shift_hours`
    /// hours each, beginning at `start`.
    pub fn new(start: NaiveDateTime, shift_hours: i64, num_shifts: usize) -> Self {
        let starts = (0..num_shifts)
            .map(|t| start + Duration::hours(shift_hours * t as i64))
            .collect();
        Self { shift_hours, starts }
    }

    pub fn num_shifts(&self) -> usize {
        self.starts.len()
    }

    pub fn start_of(&self, t: usize) -> NaiveDateTime {
        self.starts[t]
    }

    pub fn end_of(&self, t: usize) -> NaiveDateTime {
        self.starts[t] + Duration::hours(self.shift_hours)
    }

    /// Human-readable labels for each shift, e.g. for an external Gantt
    /// renderer. Not used by the solver itself.
    pub fn labels(&self) -> Vec<String> {
        self.starts
            .iter()
            .map(|s| s.format("%Y-%m-%d %H:%M").to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    #[test]
    fn horizon_advances_by_shift_length() {
        let start = NaiveDate::from_ymd_opt(2026, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let h = Horizon::new(start, 6, 4);
        assert_eq!(h.num_shifts(), 4);
        assert_eq!(h.start_of(0), start);
        assert_eq!(h.start_of(1), start + Duration::hours(6));
        assert_eq!(h.end_of(0), h.start_of(1));
    }
}
