// crates/swt-model/src/metrics.rs
//
// Evaluation metrics for binary probability estimates.

use swt_core::SwError;

/// Probabilities are clipped to [CLIP, 1 - CLIP] before taking logs.
const LOG_LOSS_CLIP: f64 = 1e-15;

fn check_lengths(labels: &[f64], scores: &[f64]) -> Result<(), SwError> {
    if labels.len() != scores.len() {
        return Err(SwError::LabelDimension {
            expected: scores.len(),
            actual: labels.len(),
        });
    }
    Ok(())
}

/// Area under the ROC curve, computed from average ranks (Mann-Whitney U).
///
/// Tied scores receive the mean of the ranks they span, so a constant scorer
/// gets exactly 0.5. Labels are 0/1 indicators.
///
/// Returns an error if the lengths differ or only one class is present.
pub fn roc_auc(labels: &[f64], scores: &[f64]) -> Result<f64, SwError> {
    check_lengths(labels, scores)?;

    let n_pos = labels.iter().filter(|&&l| l == 1.0).count();
    let n_neg = labels.len() - n_pos;
    if n_pos == 0 || n_neg == 0 {
        return Err(SwError::SingleClass);
    }

    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[a].total_cmp(&scores[b]));

    // Assign 1-based ranks, averaging over runs of equal scores.
    let mut ranks = vec![0.0_f64; scores.len()];
    let mut start = 0;
    while start < order.len() {
        let mut end = start;
        while end + 1 < order.len() && scores[order[end + 1]] == scores[order[start]] {
            end += 1;
        }
        let avg_rank = (start + end) as f64 / 2.0 + 1.0;
        for &idx in &order[start..=end] {
            ranks[idx] = avg_rank;
        }
        start = end + 1;
    }

    let pos_rank_sum: f64 = labels
        .iter()
        .zip(&ranks)
        .filter(|&(&l, _)| l == 1.0)
        .map(|(_, &r)| r)
        .sum();
    let n_pos = n_pos as f64;
    let n_neg = n_neg as f64;
    Ok((pos_rank_sum - n_pos * (n_pos + 1.0) / 2.0) / (n_pos * n_neg))
}

/// Mean binary cross-entropy of positive-class probabilities.
pub fn log_loss(labels: &[f64], probabilities: &[f64]) -> Result<f64, SwError> {
    check_lengths(labels, probabilities)?;
    if labels.is_empty() {
        return Ok(0.0);
    }
    let total: f64 = labels
        .iter()
        .zip(probabilities)
        .map(|(&y, &p)| {
            let p = p.clamp(LOG_LOSS_CLIP, 1.0 - LOG_LOSS_CLIP);
            -(y * p.ln() + (1.0 - y) * (1.0 - p).ln())
        })
        .sum();
    Ok(total / labels.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_ranking_is_one() {
        let auc = roc_auc(&[0.0, 0.0, 1.0, 1.0], &[0.1, 0.2, 0.8, 0.9]).unwrap();
        assert!((auc - 1.0).abs() < 1e-12);
    }

    #[test]
    fn inverted_ranking_is_zero() {
        let auc = roc_auc(&[1.0, 1.0, 0.0, 0.0], &[0.1, 0.2, 0.8, 0.9]).unwrap();
        assert!(auc.abs() < 1e-12);
    }

    #[test]
    fn constant_scores_give_one_half() {
        let auc = roc_auc(&[1.0, 0.0, 1.0, 0.0, 0.0], &[0.3; 5]).unwrap();
        assert!((auc - 0.5).abs() < 1e-12);
    }

    #[test]
    fn partial_ranking() {
        // Pairs (pos, neg): (0.4 vs 0.1) win, (0.4 vs 0.5) loss,
        // (0.9 vs 0.1) win, (0.9 vs 0.5) win -> 3/4
        let auc = roc_auc(&[1.0, 0.0, 1.0, 0.0], &[0.4, 0.1, 0.9, 0.5]).unwrap();
        assert!((auc - 0.75).abs() < 1e-12);
    }

    #[test]
    fn single_class_is_rejected() {
        assert!(matches!(
            roc_auc(&[1.0, 1.0], &[0.2, 0.3]),
            Err(SwError::SingleClass)
        ));
    }

    #[test]
    fn length_mismatch_is_rejected() {
        assert!(roc_auc(&[1.0, 0.0], &[0.2]).is_err());
        assert!(log_loss(&[1.0], &[0.2, 0.3]).is_err());
    }

    #[test]
    fn log_loss_of_confident_correct_predictions_is_small() {
        let loss = log_loss(&[1.0, 0.0], &[1.0, 0.0]).unwrap();
        assert!(loss < 1e-12);
    }

    #[test]
    fn log_loss_at_one_half() {
        let loss = log_loss(&[1.0, 0.0], &[0.5, 0.5]).unwrap();
        assert!((loss - std::f64::consts::LN_2).abs() < 1e-12);
    }
}
