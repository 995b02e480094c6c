use crate::{
    carto::datum::GeoPoint,
    units::{Elapsed, Unit},
    vars::*,
};
use chrono::{DateTime, Utc};

/// visibility of an event `elapsed` milliseconds after it happened
///
/// Nothing before the event, a plateau until the onset of decay, then a
/// linear fade to nothing.
pub fn intensity(elapsed: f64) -> f64 {
    if elapsed.is_nan() || elapsed <= 0.0 || elapsed >= DECAY_END {
        0.0
    } else if elapsed < DECAY_ONSET {
        PLATEAU
    } else {
        PLATEAU - PLATEAU * (elapsed - DECAY_ONSET) / (DECAY_END - DECAY_ONSET)
    }
}

/// something that happened at a known place and time
#[derive(Clone, Debug, PartialEq)]
pub struct TemporalEvent {
    pub occurs_at: DateTime<Utc>,
    pub location: GeoPoint,
    pub identity: String,
}

impl TemporalEvent {
    pub fn intensity_at(&self, now: &DateTime<Utc>) -> f64 {
        intensity(Elapsed::between(now, &self.occurs_at).release())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{Duration, TimeZone};
    use float_eq::assert_float_eq;
    const EPSILON: f64 = 0.000_001;

    #[test]
    fn before_the_event() {
        assert_eq!(intensity(-100.0), 0.0);
        assert_eq!(intensity(0.0), 0.0);
        assert_eq!(intensity(f64::NEG_INFINITY), 0.0);
    }

    #[test]
    fn plateau() {
        assert_eq!(intensity(1.0), 0.5);
        assert_eq!(intensity(2_500_000.0), 0.5);
        assert_eq!(intensity(DECAY_ONSET - 1.0), 0.5);
    }

    #[test]
    fn fade() {
        assert_float_eq!(intensity(DECAY_ONSET), 0.5, abs <= EPSILON);
        assert_float_eq!(intensity(7_500_000.0), 0.25, abs <= EPSILON);
        assert_float_eq!(intensity(DECAY_END - 1.0), 0.0, abs <= EPSILON);
        assert_eq!(intensity(DECAY_END), 0.0);
        assert_eq!(intensity(DECAY_END + 1.0), 0.0);
        assert_eq!(intensity(f64::INFINITY), 0.0);
    }

    #[test]
    fn continuous_at_breakpoints() {
        for z in [DECAY_ONSET, DECAY_END] {
            assert_float_eq!(intensity(z - 0.001), intensity(z + 0.001), abs <= EPSILON);
        }
    }

    #[test]
    fn bounded() {
        for j in -20..=120 {
            let value = intensity(j as f64 * 100_000.0);
            assert!((0.0..=0.5).contains(&value));
        }
    }

    #[test]
    fn event_fades() {
        let occurs_at = Utc.with_ymd_and_hms(2021, 2, 15, 0, 0, 0).unwrap();
        let event = TemporalEvent {
            occurs_at,
            location: GeoPoint::new(52.2, 21.0),
            identity: "msg-1613347200-522210".to_string(),
        };
        assert_eq!(event.intensity_at(&(occurs_at - Duration::minutes(1))), 0.0);
        assert_eq!(event.intensity_at(&(occurs_at + Duration::minutes(20))), 0.5);
        // 125 minutes is 7 500 000 ms
        assert_float_eq!(
            event.intensity_at(&(occurs_at + Duration::minutes(125))),
            0.25,
            abs <= EPSILON
        );
        assert_eq!(event.intensity_at(&(occurs_at + Duration::hours(3))), 0.0);
    }
}
