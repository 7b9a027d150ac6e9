//! Verdict aggregation.
//!
//! A pure function of the two score collections: average each, the larger
//! average wins, equal averages are inconclusive.

use claimcheck_contracts::verdict::{ScoreBoard, Verdict, VerdictLabel};

fn mean(scores: &[f64]) -> f64 {
    if scores.is_empty() {
        0.0
    } else {
        scores.iter().sum::<f64>() / scores.len() as f64
    }
}

/// Compute the verdict for one claim's support and refute scores.
///
/// - higher average support → `Supported`, confidence = average support
/// - higher average refutation → `Refuted`, confidence = average refutation
/// - equal averages (including no evidence at all) → `Inconclusive`,
///   confidence = the larger of the two (so 0.0 with no evidence)
pub fn aggregate(supports: &[f64], refutes: &[f64]) -> Verdict {
    let avg_support = mean(supports);
    let avg_refute = mean(refutes);

    let (label, confidence) = if avg_support > avg_refute {
        (VerdictLabel::Supported, avg_support)
    } else if avg_refute > avg_support {
        (VerdictLabel::Refuted, avg_refute)
    } else {
        (VerdictLabel::Inconclusive, avg_support.max(avg_refute))
    };

    Verdict {
        label,
        confidence,
        avg_support,
        avg_refute,
        support_count: supports.len(),
        refute_count: refutes.len(),
    }
}

/// [`aggregate`] over a score board.
pub fn aggregate_board(board: &ScoreBoard) -> Verdict {
    aggregate(&board.supports, &board.refutes)
}

#[cfg(test)]
mod tests {
    use claimcheck_contracts::verdict::{ScoreBoard, VerdictLabel};

    use super::{aggregate, aggregate_board};

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn no_evidence_is_inconclusive_zero() {
        let verdict = aggregate(&[], &[]);
        assert_eq!(verdict.label, VerdictLabel::Inconclusive);
        assert_eq!(verdict.confidence, 0.0);
        assert!(verdict.has_no_evidence());
    }

    #[test]
    fn higher_support_average_wins() {
        let verdict = aggregate(&[0.9, 0.7], &[0.2]);
        assert_eq!(verdict.label, VerdictLabel::Supported);
        assert!(approx(verdict.confidence, 0.8), "confidence {}", verdict.confidence);
        assert_eq!(verdict.support_count, 2);
        assert_eq!(verdict.refute_count, 1);
    }

    #[test]
    fn balanced_evidence_is_inconclusive() {
        let verdict = aggregate(&[0.5], &[0.5]);
        assert_eq!(verdict.label, VerdictLabel::Inconclusive);
        assert_eq!(verdict.confidence, 0.5);
        assert!(!verdict.has_no_evidence());
    }

    #[test]
    fn refute_only_is_refuted() {
        let verdict = aggregate(&[], &[0.6]);
        assert_eq!(verdict.label, VerdictLabel::Refuted);
        assert_eq!(verdict.confidence, 0.6);
        assert_eq!(verdict.avg_support, 0.0);
    }

    #[test]
    fn averages_not_counts_decide() {
        // Three weak supports lose to one strong refutation.
        let verdict = aggregate(&[0.3, 0.3, 0.3], &[0.9]);
        assert_eq!(verdict.label, VerdictLabel::Refuted);
        assert_eq!(verdict.confidence, 0.9);
    }

    #[test]
    fn board_aggregation_matches_slices() {
        let board = ScoreBoard {
            supports: vec![0.8],
            refutes: vec![0.4, 0.2],
        };
        assert_eq!(aggregate_board(&board), aggregate(&[0.8], &[0.4, 0.2]));
    }
}
