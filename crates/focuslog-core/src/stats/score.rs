//! Productivity score: a 0-100 rating of the work:break ratio.
//!
//! - **Ideal band**: 4 <= work/break <= 6 scores 100
//! - **Overwork**: above 6, lose 25 points per unit of ratio, floored at 50
//! - **Too many breaks**: below 4, scale linearly, floored at 50
//!
//! With no break time at all the ratio saturates at 100, which lands on the
//! overwork floor.

const IDEAL_LOW: f64 = 4.0;
const IDEAL_HIGH: f64 = 6.0;
const SATURATED_RATIO: f64 = 100.0;
const FLOOR: f64 = 50.0;

/// Score work and break totals (seconds). Returns 0 when both are zero.
pub fn productivity_score(work_secs: u64, break_secs: u64) -> u8 {
    if work_secs == 0 && break_secs == 0 {
        return 0;
    }

    let ratio = if break_secs > 0 {
        work_secs as f64 / break_secs as f64
    } else if work_secs > 0 {
        SATURATED_RATIO
    } else {
        0.0
    };

    let score = if (IDEAL_LOW..=IDEAL_HIGH).contains(&ratio) {
        100.0
    } else if ratio > IDEAL_HIGH {
        100.0 - (((ratio - IDEAL_HIGH) / 4.0) * 100.0).min(FLOOR)
    } else {
        ((ratio / IDEAL_LOW) * 100.0).max(FLOOR)
    };

    score.round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn ideal_ratio_scores_full() {
        assert_eq!(productivity_score(1000, 200), 100);
        assert_eq!(productivity_score(400, 100), 100);
        assert_eq!(productivity_score(600, 100), 100);
    }

    #[test]
    fn no_breaks_saturates_to_floor() {
        assert_eq!(productivity_score(1000, 0), 50);
    }

    #[test]
    fn nothing_tracked_scores_zero() {
        assert_eq!(productivity_score(0, 0), 0);
    }

    #[test]
    fn overwork_penalty_is_linear_until_floor() {
        // ratio 7 -> 100 - 25
        assert_eq!(productivity_score(700, 100), 75);
        // ratio 8 -> floor
        assert_eq!(productivity_score(800, 100), 50);
        assert_eq!(productivity_score(2000, 100), 50);
    }

    #[test]
    fn excessive_breaks_scale_down_to_floor() {
        // ratio 3 -> 75
        assert_eq!(productivity_score(300, 100), 75);
        // ratio 1 -> 25, floored
        assert_eq!(productivity_score(100, 100), 50);
        assert_eq!(productivity_score(0, 100), 50);
    }

    #[test]
    fn rounds_to_nearest() {
        // ratio 3.5 -> 87.5 -> 88
        assert_eq!(productivity_score(350, 100), 88);
    }

    proptest! {
        #[test]
        fn any_tracked_time_scores_between_floor_and_full(w in 0u64..1_000_000, b in 0u64..1_000_000) {
            prop_assume!(w > 0 || b > 0);
            let score = productivity_score(w, b);
            prop_assert!((50..=100).contains(&score));
        }
    }
}
