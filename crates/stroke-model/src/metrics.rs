//! Accuracy and per-class precision/recall/F1.

use std::collections::BTreeSet;
use std::fmt;

/// Fraction of positions where `predicted` equals `actual`.
///
/// Returns `0.0` for empty input. Extra elements in the longer slice are
/// ignored.
#[expect(
    clippy::cast_precision_loss,
    reason = "row counts are far below f64 precision limits"
)]
pub fn accuracy_score(actual: &[usize], predicted: &[usize]) -> f64 {
    let total = actual.len().min(predicted.len());
    if total == 0 {
        return 0.0;
    }
    let correct = actual
        .iter()
        .zip(predicted)
        .filter(|(a, p)| a == p)
        .count();
    correct as f64 / total as f64
}

/// Precision, recall, F1, and support for a single class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassMetrics {
    pub class: usize,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

/// Per-class metrics plus accuracy, macro, and weighted averages.
///
/// Divisions by zero yield `0.0`. The [`fmt::Display`] rendering is a fixed
/// width text table.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationReport {
    pub classes: Vec<ClassMetrics>,
    pub accuracy: f64,
    pub macro_avg: ClassMetrics,
    pub weighted_avg: ClassMetrics,
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        #[expect(
            clippy::cast_precision_loss,
            reason = "row counts are far below f64 precision limits"
        )]
        let value = numerator as f64 / denominator as f64;
        value
    }
}

fn harmonic_mean(precision: f64, recall: f64) -> f64 {
    if precision + recall == 0.0 {
        0.0
    } else {
        2.0 * precision * recall / (precision + recall)
    }
}

impl ClassificationReport {
    /// Build a report over every class that appears in either slice.
    #[expect(
        clippy::cast_precision_loss,
        reason = "row counts are far below f64 precision limits"
    )]
    pub fn new(actual: &[usize], predicted: &[usize]) -> Self {
        let pairs: Vec<(usize, usize)> = actual
            .iter()
            .copied()
            .zip(predicted.iter().copied())
            .collect();
        let labels: BTreeSet<usize> = pairs.iter().flat_map(|&(a, p)| [a, p]).collect();

        let classes: Vec<ClassMetrics> = labels
            .into_iter()
            .map(|class| {
                let true_positive = pairs.iter().filter(|&&(a, p)| a == class && p == class).count();
                let predicted_positive = pairs.iter().filter(|&&(_, p)| p == class).count();
                let support = pairs.iter().filter(|&&(a, _)| a == class).count();
                let precision = ratio(true_positive, predicted_positive);
                let recall = ratio(true_positive, support);
                ClassMetrics {
                    class,
                    precision,
                    recall,
                    f1: harmonic_mean(precision, recall),
                    support,
                }
            })
            .collect();

        let total = pairs.len();
        let count = classes.len().max(1) as f64;
        let mean = |f: fn(&ClassMetrics) -> f64| classes.iter().map(f).sum::<f64>() / count;
        let weighted = |f: fn(&ClassMetrics) -> f64| {
            if total == 0 {
                0.0
            } else {
                classes
                    .iter()
                    .map(|m| f(m) * m.support as f64)
                    .sum::<f64>()
                    / total as f64
            }
        };

        let macro_avg = ClassMetrics {
            class: 0,
            precision: mean(|m| m.precision),
            recall: mean(|m| m.recall),
            f1: mean(|m| m.f1),
            support: total,
        };
        let weighted_avg = ClassMetrics {
            class: 0,
            precision: weighted(|m| m.precision),
            recall: weighted(|m| m.recall),
            f1: weighted(|m| m.f1),
            support: total,
        };

        Self {
            classes,
            accuracy: accuracy_score(actual, predicted),
            macro_avg,
            weighted_avg,
        }
    }

    /// Metrics for `class`, if it appeared in the evaluated rows.
    pub fn class(&self, class: usize) -> Option<&ClassMetrics> {
        self.classes.iter().find(|m| m.class == class)
    }
}

const WIDTH: usize = 12;

fn write_row(f: &mut fmt::Formatter<'_>, label: &str, m: &ClassMetrics) -> fmt::Result {
    writeln!(
        f,
        "{label:>WIDTH$} {:>9.2} {:>9.2} {:>9.2} {:>9}",
        m.precision, m.recall, m.f1, m.support
    )
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>WIDTH$} {:>9} {:>9} {:>9} {:>9}",
            "", "precision", "recall", "f1-score", "support"
        )?;
        writeln!(f)?;
        for metrics in &self.classes {
            write_row(f, &metrics.class.to_string(), metrics)?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{:>WIDTH$} {:>9} {:>9} {:>9.2} {:>9}",
            "accuracy", "", "", self.accuracy, self.macro_avg.support
        )?;
        write_row(f, "macro avg", &self.macro_avg)?;
        write_row(f, "weighted avg", &self.weighted_avg)
    }
}
