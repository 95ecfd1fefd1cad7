use crate::consts;
use std::fmt;
use std::time::Duration;

/// Movement speed multiplier, derived from the score
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub(crate) struct Speed(f64);

impl Speed {
    pub(crate) const INITIAL: Speed = Speed(1.0);

    /// `min(2.5, 1.0 + score * 0.05)`
    pub(crate) fn for_score(score: u32) -> Speed {
        // Multiply then add, rounding twice, so that the values shown in the
        // HUD land where the browser game's do.
        #[allow(clippy::suboptimal_flops)]
        let speed = 1.0 + f64::from(score) * consts::SPEED_STEP;
        Speed(speed.min(consts::MAX_SPEED))
    }

    /// Time between ticks at this speed: `max(70ms, 150ms / speed)`, to the
    /// microsecond
    pub(crate) fn tick_interval(self) -> Duration {
        let base = consts::BASE_TICK_INTERVAL.as_secs_f64() * 1_000_000.0;
        // Speeds are always between 1.0 and MAX_SPEED, so this is a small
        // positive number.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let micros = (base / self.0).round() as u64;
        Duration::from_micros(micros).max(consts::MIN_TICK_INTERVAL)
    }
}

impl Default for Speed {
    fn default() -> Speed {
        Speed::INITIAL
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `{:.1}` rounds exact ties to even, but a speed sitting exactly
        // halfway between two tenths (an odd number of quarters) rounds up.
        let value = if (self.0 * 4.0).fract() == 0.0 && (self.0 * 2.0).fract() != 0.0 {
            self.0 + 0.05
        } else {
            self.0
        };
        write!(f, "{value:.1}x")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 1.0)]
    #[case(1, 1.05)]
    #[case(10, 1.5)]
    #[case(29, 2.45)]
    #[case(30, 2.5)]
    #[case(31, 2.5)]
    #[case(100, 2.5)]
    #[case(u32::MAX, 2.5)]
    fn test_for_score(#[case] score: u32, #[case] speed: f64) {
        assert!((Speed::for_score(score).0 - speed).abs() < 1e-9);
    }

    #[test]
    fn speed_is_monotonic() {
        let mut prev = Speed::for_score(0);
        for score in 1..200 {
            let next = Speed::for_score(score);
            assert!(next >= prev, "speed decreased at score {score}");
            prev = next;
        }
    }

    #[rstest]
    #[case(Speed(1.0), Duration::from_millis(150))]
    #[case(Speed(1.05), Duration::from_micros(142_857))]
    #[case(Speed(1.5), Duration::from_millis(100))]
    #[case(Speed(2.0), Duration::from_millis(75))]
    #[case(Speed(2.1), Duration::from_micros(71_429))]
    #[case(Speed(2.5), Duration::from_millis(70))]
    fn test_tick_interval(#[case] speed: Speed, #[case] interval: Duration) {
        assert_eq!(speed.tick_interval(), interval);
    }

    #[test]
    fn initial_interval() {
        assert_eq!(Speed::INITIAL.tick_interval(), Duration::from_millis(150));
        assert_eq!(Speed::for_score(30).tick_interval(), Duration::from_millis(70));
    }

    #[rstest]
    #[case(0, "1.0x")]
    #[case(1, "1.1x")]
    #[case(3, "1.1x")]
    #[case(5, "1.3x")]
    #[case(9, "1.4x")]
    #[case(10, "1.5x")]
    #[case(15, "1.8x")]
    #[case(19, "2.0x")]
    #[case(21, "2.0x")]
    #[case(23, "2.2x")]
    #[case(25, "2.3x")]
    #[case(30, "2.5x")]
    #[case(31, "2.5x")]
    fn test_display(#[case] score: u32, #[case] s: &str) {
        assert_eq!(Speed::for_score(score).to_string(), s);
    }
}
