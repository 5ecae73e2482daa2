//! Closed-form estimators shared by the analyzers. All of them are total
//! functions: degenerate inputs (empty slices, zero denominators) yield the
//! defined zero value instead of NaN or infinity.

/// Ordinary-least-squares slope of `values` against their index positions
/// 0..n-1. Bucket spacing is deliberately index-based, not calendar-based:
/// unevenly spaced months are treated as adjacent.
pub fn ols_slope(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    if values.is_empty() {
        return 0.0;
    }
    let sum_x = n * (n - 1.0) / 2.0;
    let sum_y: f64 = values.iter().sum();
    let sum_xy: f64 = values.iter().enumerate().map(|(i, v)| i as f64 * v).sum();
    let sum_x2: f64 = (0..values.len()).map(|i| (i * i) as f64).sum();
    let denom = n * sum_x2 - sum_x * sum_x;
    let denom = if denom == 0.0 { 1.0 } else { denom };
    (n * sum_xy - sum_x * sum_y) / denom
}

/// Gini coefficient over per-person totals. `values` need not be sorted.
/// Returns 0 for empty input or an all-zero distribution.
pub fn gini(values: &[u64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted: Vec<u64> = values.to_vec();
    sorted.sort_unstable();
    let n = sorted.len() as f64;
    let total: f64 = sorted.iter().map(|v| *v as f64).sum();
    if total == 0.0 {
        return 0.0;
    }
    let weighted: f64 = sorted
        .iter()
        .enumerate()
        .map(|(i, v)| (i as f64 + 1.0) * *v as f64)
        .sum();
    2.0 * weighted / (n * total) - (n + 1.0) / n
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation.
pub fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    (values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64).sqrt()
}

/// Coefficient of variation as a percentage; 0 when the mean is 0.
pub fn coefficient_of_variation(values: &[f64]) -> f64 {
    let m = mean(values);
    if m == 0.0 {
        return 0.0;
    }
    std_dev(values) / m * 100.0
}

pub fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

pub fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

/// Integer percentage with the denominator clamped to 1.
pub fn pct(num: usize, denom: usize) -> i64 {
    (num as f64 / denom.max(1) as f64 * 100.0).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slope_sign_follows_trend() {
        assert!(ols_slope(&[1.0, 2.0, 3.0, 4.0]) > 0.0);
        assert!(ols_slope(&[5.0, 3.0, 2.0, 1.0]) < 0.0);
        assert_eq!(ols_slope(&[2.0, 2.0, 2.0]), 0.0);
    }

    #[test]
    fn slope_of_perfect_line_is_exact() {
        // y = 2x + 1
        let slope = ols_slope(&[1.0, 3.0, 5.0, 7.0]);
        assert!((slope - 2.0).abs() < 1e-9);
    }

    #[test]
    fn slope_degenerate_inputs_do_not_blow_up() {
        assert_eq!(ols_slope(&[]), 0.0);
        assert_eq!(ols_slope(&[7.0]), 0.0);
    }

    #[test]
    fn gini_is_zero_for_equal_distribution() {
        let g = gini(&[100, 100, 100, 100]);
        assert!(g.abs() < 1e-9);
    }

    #[test]
    fn gini_stays_in_unit_interval() {
        for vals in [
            vec![0, 0, 0, 1000],
            vec![1, 2, 3, 4, 5],
            vec![500],
            vec![0, 0, 0],
        ] {
            let g = gini(&vals);
            assert!((0.0..=1.0).contains(&g), "gini {g} out of range for {vals:?}");
        }
    }

    #[test]
    fn gini_concentrated_distribution_is_high() {
        assert!(gini(&[0, 0, 0, 0, 0, 0, 0, 0, 0, 1000]) > 0.8);
    }

    #[test]
    fn cv_handles_zero_mean() {
        assert_eq!(coefficient_of_variation(&[0.0, 0.0]), 0.0);
        assert_eq!(coefficient_of_variation(&[]), 0.0);
    }

    #[test]
    fn cv_of_uniform_values_is_zero() {
        assert!(coefficient_of_variation(&[4.0, 4.0, 4.0]).abs() < 1e-9);
    }

    #[test]
    fn pct_clamps_denominator() {
        assert_eq!(pct(3, 0), 300);
        assert_eq!(pct(1, 4), 25);
        assert_eq!(pct(0, 0), 0);
    }

    #[test]
    fn rounding_helpers() {
        assert_eq!(round1(33.333), 33.3);
        assert_eq!(round3(0.12345), 0.123);
    }
}
