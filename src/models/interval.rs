use serde::{Deserialize, Serialize};

/// One contiguous span of playback observed as watched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub start: f64,
    pub end: f64,
}

impl Interval {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Covered duration in seconds.
    pub fn length(&self) -> f64 {
        self.end - self.start
    }

    fn is_well_formed(&self) -> bool {
        self.start.is_finite() && self.end.is_finite() && self.start <= self.end
    }
}

/// Raw inbound watched-range entry. Hosts have historically sent both the
/// legacy `[start, end]` pair shape and the `{start, end}` object shape.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawRange {
    Pair(Vec<f64>),
    Span {
        start: f64,
        #[serde(default)]
        end: Option<f64>,
    },
    Other(serde_json::Value),
}

impl RawRange {
    /// Normalize to an `Interval`. Malformed entries yield `None` and are
    /// dropped by the caller, never surfaced as errors.
    pub fn normalize(&self) -> Option<Interval> {
        let span = match self {
            RawRange::Pair(values) if values.len() >= 2 => Interval::new(values[0], values[1]),
            // An object with `start` but no `end` still records the
            // observation, as a zero-length span.
            RawRange::Span { start, end } => Interval::new(*start, end.unwrap_or(*start)),
            _ => return None,
        };

        if span.is_well_formed() { Some(span) } else { None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> RawRange {
        serde_json::from_value(value).expect("raw range should deserialize")
    }

    #[test]
    fn pair_and_object_shapes_normalize_identically() {
        let pair = parse(json!([5.0, 12.0])).normalize().unwrap();
        let object = parse(json!({"start": 5.0, "end": 12.0})).normalize().unwrap();
        assert_eq!(pair, object);
        assert_eq!(pair, Interval::new(5.0, 12.0));
    }

    #[test]
    fn object_without_start_is_dropped() {
        assert!(parse(json!({"foo": 1})).normalize().is_none());
    }

    #[test]
    fn short_pair_is_dropped() {
        assert!(parse(json!([5.0])).normalize().is_none());
    }

    #[test]
    fn scalar_entry_is_dropped() {
        assert!(parse(json!("0-10")).normalize().is_none());
        assert!(parse(json!(7)).normalize().is_none());
    }

    #[test]
    fn object_without_end_becomes_zero_length() {
        let span = parse(json!({"start": 30.0})).normalize().unwrap();
        assert_eq!(span, Interval::new(30.0, 30.0));
        assert_eq!(span.length(), 0.0);
    }

    #[test]
    fn inverted_pair_is_dropped() {
        assert!(parse(json!([12.0, 5.0])).normalize().is_none());
    }

    #[test]
    fn non_finite_endpoints_are_dropped() {
        assert!(RawRange::Pair(vec![0.0, f64::NAN]).normalize().is_none());
        assert!(RawRange::Pair(vec![f64::INFINITY, 10.0]).normalize().is_none());
    }

    #[test]
    fn interval_serializes_as_start_end_object() {
        let json = serde_json::to_value(Interval::new(1.5, 4.0)).unwrap();
        assert_eq!(json, json!({"start": 1.5, "end": 4.0}));
    }
}
