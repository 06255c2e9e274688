//! Descriptive statistics over plain `f64` slices.

use std::cmp::Ordering;

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Quantile `q` in `[0, 1]` of already sorted values, linearly interpolated
/// between the two closest ranks.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64))
}

pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut s = values.to_vec();
    s.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    s
}

// ---------------------------------------------------------------------------
// Box-plot summary
// ---------------------------------------------------------------------------

/// Five-number summary drawn as one box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxSummary {
    pub lower_whisker: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub upper_whisker: f64,
}

impl BoxSummary {
    /// Whiskers reach the most extreme values within 1.5 IQR of the box.
    /// Values beyond them are not represented.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let s = sorted(values);
        let q1 = quantile_sorted(&s, 0.25)?;
        let median = quantile_sorted(&s, 0.5)?;
        let q3 = quantile_sorted(&s, 0.75)?;

        let reach = 1.5 * (q3 - q1);
        let lower_whisker = s
            .iter()
            .copied()
            .find(|v| *v >= q1 - reach)
            .unwrap_or(q1);
        let upper_whisker = s
            .iter()
            .rev()
            .copied()
            .find(|v| *v <= q3 + reach)
            .unwrap_or(q3);

        Some(BoxSummary {
            lower_whisker,
            q1,
            median,
            q3,
            upper_whisker,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_empty_is_none() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[1.0, 2.0, 6.0]), Some(3.0));
    }

    #[test]
    fn median_odd_and_even() {
        assert_eq!(quantile_sorted(&sorted(&[9.0, 1.0, 5.0, 3.0, 7.0]), 0.5), Some(5.0));
        assert_eq!(quantile_sorted(&sorted(&[4.0, 1.0, 3.0, 2.0]), 0.5), Some(2.5));
    }

    #[test]
    fn quartiles_interpolate_linearly() {
        let s = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile_sorted(&s, 0.25), Some(1.75));
        assert_eq!(quantile_sorted(&s, 0.75), Some(3.25));
        assert_eq!(quantile_sorted(&[42.0], 0.25), Some(42.0));
    }

    #[test]
    fn box_whiskers_exclude_outliers() {
        let mut values: Vec<f64> = (1..=9).map(f64::from).collect();
        values.push(100.0);
        let b = BoxSummary::from_values(&values).unwrap();
        assert_eq!(b.lower_whisker, 1.0);
        assert_eq!(b.upper_whisker, 9.0);
        assert!(b.q1 <= b.median && b.median <= b.q3);
    }
}
