use chrono::{DateTime, Utc};

/// Inclusive bounds on `last_purchase_date` for an export
///
/// At least one bound is always present, and `from <= to` when both are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
}

impl DateRange {
    /// Build a range, swapping reversed bounds; `None` when both are absent
    pub fn new(from: Option<DateTime<Utc>>, to: Option<DateTime<Utc>>) -> Option<Self> {
        match (from, to) {
            (None, None) => None,
            (Some(a), Some(b)) if b < a => Some(Self {
                from: Some(b),
                to: Some(a),
            }),
            _ => Some(Self { from, to }),
        }
    }

    pub fn between(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self {
            from: Some(from.min(to)),
            to: Some(from.max(to)),
        }
    }

    pub fn since(from: DateTime<Utc>) -> Self {
        Self {
            from: Some(from),
            to: None,
        }
    }

    pub fn until(to: DateTime<Utc>) -> Self {
        Self {
            from: None,
            to: Some(to),
        }
    }

    pub fn from(&self) -> Option<DateTime<Utc>> {
        self.from
    }

    pub fn to(&self) -> Option<DateTime<Utc>> {
        self.to
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.from.is_none_or(|from| from <= at) && self.to.is_none_or(|to| at <= to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2021, 1, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn requires_a_bound() {
        assert_eq!(DateRange::new(None, None), None);
    }

    #[test]
    fn swaps_reversed_bounds() {
        let range = DateRange::new(Some(day(3)), Some(day(2))).unwrap();
        assert_eq!(range.from(), Some(day(2)));
        assert_eq!(range.to(), Some(day(3)));
        assert_eq!(DateRange::between(day(3), day(2)), range);
    }

    #[test]
    fn contains_is_inclusive() {
        let range = DateRange::between(day(2), day(4));
        assert!(range.contains(day(2)));
        assert!(range.contains(day(4)));
        assert!(!range.contains(day(1)));
        assert!(!range.contains(day(5)));
    }

    #[test]
    fn open_ended_ranges() {
        assert!(DateRange::since(day(2)).contains(day(30)));
        assert!(!DateRange::since(day(2)).contains(day(1)));
        assert!(DateRange::until(day(2)).contains(day(1)));
        assert!(!DateRange::until(day(2)).contains(day(3)));
    }
}
