//! Truth probability model for bids.
//!
//! Estimates the chance that a bid is true from one player's point of view:
//! their own dice are known, every other die in play is unknown. Each unknown
//! die is treated as matching with probability 1/3 (the bid face or a wild
//! one), so the estimate is an upper binomial tail.
//!
//! ```text
//! known   = own dice showing face or 1
//! unknown = total dice in play - own dice
//! needed  = bid.count - known
//!
//! P(true) = sum_{k = needed}^{unknown} C(unknown, k) (1/3)^k (2/3)^(unknown - k)
//! ```
//!
//! The same function is used by the round engine when polling challengers
//! and by strategies that want to rate their own bids.

use crate::engine::bid::{Bid, WILD_FACE};

/// Probability that a single hidden die counts toward a bid.
pub const MATCH_PROBABILITY: f64 = 1.0 / 3.0;

/// Count dice that show `face` or are wild.
pub fn count_matching(dice: &[u8], face: u8) -> usize {
    dice.iter().filter(|&&d| d == face || d == WILD_FACE).count()
}

/// Probability that at least `needed` of `unknown` hidden dice match.
///
/// Returns 1.0 when nothing is needed and 0.0 when more dice are needed than
/// remain hidden. Terms are summed in log space, so any pool size stays
/// within [0, 1].
pub fn upper_tail(needed: usize, unknown: usize) -> f64 {
    if needed == 0 {
        return 1.0;
    }
    if needed > unknown {
        return 0.0;
    }

    // ln P(X = k + 1) - ln P(X = k)
    let odds = (MATCH_PROBABILITY / (1.0 - MATCH_PROBABILITY)).ln();
    let step = |k: usize| ((unknown - k) as f64 / (k + 1) as f64).ln() + odds;

    let mut ln_pmf = unknown as f64 * (1.0 - MATCH_PROBABILITY).ln();
    for k in 0..needed {
        ln_pmf += step(k);
    }

    let mut terms = Vec::with_capacity(unknown - needed + 1);
    for k in needed..=unknown {
        terms.push(ln_pmf);
        if k < unknown {
            ln_pmf += step(k);
        }
    }

    let peak = terms.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let scaled: f64 = terms.iter().map(|t| (t - peak).exp()).sum();
    (peak + scaled.ln()).exp().clamp(0.0, 1.0)
}

/// Estimate the probability that `bid` is true.
///
/// # Arguments
/// * `bid` - The bid being judged; `None` when nothing has been bid yet
/// * `own_dice` - The perspective player's dice; `None` when there is no
///   perspective player
/// * `total_dice` - Every die in play this round, the perspective player's
///   included
///
/// # Returns
/// A probability in [0, 1]. An absent bid or perspective yields 1.0.
pub fn estimate_truth_probability(
    bid: Option<&Bid>,
    own_dice: Option<&[u8]>,
    total_dice: usize,
) -> f64 {
    let (bid, own_dice) = match (bid, own_dice) {
        (Some(bid), Some(dice)) => (bid, dice),
        _ => return 1.0,
    };

    let known = count_matching(own_dice, bid.face);
    if known >= bid.count {
        return 1.0;
    }

    let unknown = total_dice.saturating_sub(own_dice.len());
    upper_tail(bid.count - known, unknown)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_count_matching_includes_wilds() {
        assert_eq!(count_matching(&[1, 4, 4, 6, 2], 4), 3);
        assert_eq!(count_matching(&[1, 1, 1], 6), 3);
        assert_eq!(count_matching(&[2, 3, 5], 6), 0);
    }

    #[test]
    fn test_absent_inputs_are_certain() {
        let dice = [3, 3];
        assert_eq!(estimate_truth_probability(None, Some(&dice), 10), 1.0);
        assert_eq!(estimate_truth_probability(Some(&Bid::new(5, 3)), None, 10), 1.0);
    }

    #[test]
    fn test_own_dice_cover_bid() {
        let dice = [1, 4, 4];
        let bid = Bid::new(3, 4);
        for total in [3, 10, 50] {
            assert_eq!(estimate_truth_probability(Some(&bid), Some(&dice), total), 1.0);
        }
    }

    #[test]
    fn test_single_unknown_die() {
        // Need one more match from one hidden die: exactly 1/3
        let dice = [4];
        let p = estimate_truth_probability(Some(&Bid::new(2, 4)), Some(&dice), 2);
        assert!((p - 1.0 / 3.0).abs() < EPS);
    }

    #[test]
    fn test_two_unknown_dice() {
        // Need 1 of 2 hidden dice: 1 - (2/3)^2 = 5/9
        let dice = [2];
        let p = estimate_truth_probability(Some(&Bid::new(1, 5)), Some(&dice), 3);
        assert!((p - 5.0 / 9.0).abs() < EPS);

        // Need both: (1/3)^2 = 1/9
        let p = estimate_truth_probability(Some(&Bid::new(2, 5)), Some(&dice), 3);
        assert!((p - 1.0 / 9.0).abs() < EPS);
    }

    #[test]
    fn test_impossible_bid() {
        let dice = [2, 3];
        let p = estimate_truth_probability(Some(&Bid::new(6, 5)), Some(&dice), 4);
        assert_eq!(p, 0.0);
    }

    #[test]
    fn test_monotone_in_count() {
        let dice = [1, 5, 2, 3, 6];
        let mut last = 1.0;
        for count in 1..=20 {
            let p = estimate_truth_probability(Some(&Bid::new(count, 5)), Some(&dice), 20);
            assert!(p <= last + EPS, "count {} rose from {} to {}", count, last, p);
            assert!((0.0..=1.0).contains(&p));
            last = p;
        }
    }

    #[test]
    fn test_upper_tail_sums_to_one() {
        let unknown = 12;
        let exact: f64 = (0..=unknown)
            .map(|k| upper_tail(k, unknown) - upper_tail(k + 1, unknown))
            .sum();
        assert!((exact - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_large_pool_stays_finite() {
        let p = upper_tail(40, 120);
        assert!(p.is_finite());
        assert!(p > 0.0 && p < 1.0);
    }

    #[test]
    fn test_huge_pools_stay_in_range() {
        for (needed, unknown) in [(300, 1000), (400, 1100), (700, 2000), (1, 2000), (2000, 2000)] {
            let p = upper_tail(needed, unknown);
            assert!((0.0..=1.0).contains(&p), "upper_tail({}, {}) = {}", needed, unknown, p);
        }
        // Mean of 1000 hidden dice is 333
        assert!(upper_tail(300, 1000) > 0.95);
        assert!(upper_tail(1, 2000) > 1.0 - 1e-12);
        assert!(upper_tail(2000, 2000) < 1e-300);

        let p = estimate_truth_probability(Some(&Bid::new(700, 4)), Some(&[2, 3, 4, 5, 6]), 2005);
        assert!(p > 0.0 && p < 0.5, "got {}", p);
    }

    #[test]
    fn test_matches_direct_sum_on_small_pools() {
        // C(6, k) (1/3)^k (2/3)^(6 - k) for k = 0..=6, in 729ths
        let pmf = [64.0, 192.0, 240.0, 160.0, 60.0, 12.0, 1.0];
        for needed in 0..=6 {
            let expected: f64 = pmf[needed..].iter().sum::<f64>() / 729.0;
            assert!((upper_tail(needed, 6) - expected).abs() < 1e-12);
        }
    }
}
