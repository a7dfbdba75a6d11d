use crate::models::{Interval, RawRange};

/// Minimal canonical cover of everything observed as watched.
///
/// Invariant: spans are sorted ascending by start and pairwise separated by
/// a gap larger than the merge tolerance.
#[derive(Debug, Clone)]
pub struct WatchedSet {
    spans: Vec<Interval>,
    tolerance: f64,
}

impl WatchedSet {
    pub fn new(tolerance: f64) -> Self {
        Self {
            spans: Vec::new(),
            tolerance,
        }
    }

    /// Build from raw host-supplied ranges, dropping malformed entries.
    pub fn from_raw_ranges(ranges: &[RawRange], tolerance: f64) -> Self {
        let mut set = Self::new(tolerance);
        set.spans = ranges.iter().filter_map(RawRange::normalize).collect();
        set.coalesce();
        set
    }

    /// Insert a newly observed span and restore the canonical cover.
    pub fn insert(&mut self, span: Interval) {
        self.spans.push(span);
        self.coalesce();
    }

    // Single left-to-right merge scan: extend the accumulator while the next
    // span starts within the tolerance of its end, otherwise flush.
    fn coalesce(&mut self) {
        if self.spans.is_empty() {
            return;
        }

        self.spans.sort_by(|a, b| a.start.total_cmp(&b.start));

        let mut merged = Vec::with_capacity(self.spans.len());
        let mut current = self.spans[0];
        for span in &self.spans[1..] {
            if span.start <= current.end + self.tolerance {
                current.end = current.end.max(span.end);
            } else {
                merged.push(current);
                current = *span;
            }
        }
        merged.push(current);

        self.spans = merged;
    }

    /// Total covered duration in seconds.
    pub fn total_watched(&self) -> f64 {
        self.spans.iter().map(Interval::length).sum()
    }

    pub fn spans(&self) -> &[Interval] {
        &self.spans
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(set: &WatchedSet) -> Vec<(f64, f64)> {
        set.spans().iter().map(|s| (s.start, s.end)).collect()
    }

    #[test]
    fn merges_overlapping_and_distant_spans() {
        // Every insertion order must converge on the same canonical cover.
        let intervals = [
            Interval::new(0.0, 10.0),
            Interval::new(9.0, 15.0),
            Interval::new(20.0, 21.0),
        ];
        let orders: [[usize; 3]; 6] = [
            [0, 1, 2],
            [0, 2, 1],
            [1, 0, 2],
            [1, 2, 0],
            [2, 0, 1],
            [2, 1, 0],
        ];

        for order in orders {
            let mut set = WatchedSet::new(0.5);
            for i in order {
                set.insert(intervals[i]);
            }
            assert_eq!(spans(&set), vec![(0.0, 15.0), (20.0, 21.0)], "order {order:?}");
        }
    }

    #[test]
    fn coalesce_is_idempotent() {
        let mut set = WatchedSet::new(0.5);
        set.insert(Interval::new(0.0, 10.0));
        set.insert(Interval::new(12.0, 15.0));

        let before = spans(&set);
        set.coalesce();
        assert_eq!(spans(&set), before);
    }

    #[test]
    fn adjacent_within_tolerance_merge() {
        let mut set = WatchedSet::new(0.5);
        set.insert(Interval::new(0.0, 10.0));
        set.insert(Interval::new(10.4, 12.0));
        assert_eq!(spans(&set), vec![(0.0, 12.0)]);
    }

    #[test]
    fn gap_beyond_tolerance_stays_separate() {
        let mut set = WatchedSet::new(0.5);
        set.insert(Interval::new(0.0, 10.0));
        set.insert(Interval::new(10.6, 12.0));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn contained_span_does_not_shrink_cover() {
        let mut set = WatchedSet::new(0.5);
        set.insert(Interval::new(0.0, 20.0));
        set.insert(Interval::new(5.0, 6.0));
        assert_eq!(spans(&set), vec![(0.0, 20.0)]);
        assert_eq!(set.total_watched(), 20.0);
    }

    #[test]
    fn total_watched_sums_span_lengths() {
        let mut set = WatchedSet::new(0.5);
        set.insert(Interval::new(0.0, 10.0));
        set.insert(Interval::new(20.0, 25.0));
        assert_eq!(set.total_watched(), 15.0);
    }

    #[test]
    fn from_raw_ranges_filters_and_canonicalizes() {
        let raw: Vec<RawRange> = serde_json::from_value(serde_json::json!([
            [9.0, 15.0],
            {"start": 0.0, "end": 10.0},
            {"foo": 1},
            [3.0],
            "garbage",
        ]))
        .unwrap();

        let set = WatchedSet::from_raw_ranges(&raw, 0.5);
        assert_eq!(spans(&set), vec![(0.0, 15.0)]);
    }

    #[test]
    fn empty_raw_ranges_yield_empty_set() {
        let set = WatchedSet::from_raw_ranges(&[], 0.5);
        assert!(set.is_empty());
        assert_eq!(set.total_watched(), 0.0);
    }
}
