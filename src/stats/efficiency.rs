//! Scalar skill scores.

use super::mean;

/// Mean of the squared signed errors. NaN for empty input.
pub fn mean_squared_error(x: &[f64], x_true: &[f64]) -> f64 {
    let n = x.len().min(x_true.len());
    let sse: f64 = x.iter().zip(x_true).map(|(m, o)| (m - o).powi(2)).sum();
    sse / n as f64
}

/// Coefficient of determination as the squared Pearson correlation.
///
/// Fewer than two points or a constant series gives NaN (0/0), matching the
/// undefined correlation.
pub fn r_squared(modeled: &[f64], observed: &[f64]) -> f64 {
    let mean_m = mean(modeled);
    let mean_o = mean(observed);

    let mut cov = 0.0;
    let mut var_m = 0.0;
    let mut var_o = 0.0;
    for (m, o) in modeled.iter().zip(observed) {
        let dm = m - mean_m;
        let d_o = o - mean_o;
        cov += dm * d_o;
        var_m += dm * dm;
        var_o += d_o * d_o;
    }

    let r = cov / (var_m * var_o).sqrt();
    r * r
}

/// Nash-Sutcliffe Efficiency. Range: (-inf, 1], 1 = perfect.
///
/// A constant observed series has zero variance: the result is -inf, or NaN
/// when the model also matches exactly.
pub fn nash_sutcliffe(modeled: &[f64], observed: &[f64]) -> f64 {
    let mean_obs = mean(observed);
    let numerator: f64 = observed
        .iter()
        .zip(modeled)
        .map(|(o, m)| (o - m).powi(2))
        .sum();
    let denominator: f64 = observed.iter().map(|o| (o - mean_obs).powi(2)).sum();
    1.0 - numerator / denominator
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const MODELED: [f64; 5] = [55.5, 62.1, 65.3, 64.4, 61.2];
    const OBSERVED: [f64; 5] = [55.7, 62.0, 65.5, 64.7, 61.1];

    // --- MSE ---

    #[test]
    fn mse_known_value() {
        assert_relative_eq!(mean_squared_error(&MODELED, &OBSERVED), 0.038, epsilon = 1e-9);
    }

    #[test]
    fn mse_matches_mean_of_squared_absolute_error() {
        let x = [1.0, 4.0, -2.0];
        let t = [0.5, 5.0, -2.0];
        let abs = crate::stats::absolute_error(&x, &t);
        let expected = abs.iter().map(|e| e * e).sum::<f64>() / 3.0;
        assert_relative_eq!(mean_squared_error(&x, &t), expected, epsilon = 1e-12);
    }

    #[test]
    fn mse_empty_is_nan() {
        assert!(mean_squared_error(&[], &[]).is_nan());
    }

    // --- R² ---

    #[test]
    fn r_squared_known_value() {
        assert_relative_eq!(r_squared(&MODELED, &OBSERVED), 0.997_685_876_381, epsilon = 1e-9);
    }

    #[test]
    fn r_squared_self_is_one() {
        let x = [3.0, 1.0, 4.0, 1.0, 5.0, 9.0];
        assert_relative_eq!(r_squared(&x, &x), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn r_squared_ignores_linear_bias() {
        let obs = [1.0, 2.0, 3.0, 4.0];
        let sim = [12.0, 14.0, 16.0, 18.0];
        assert_relative_eq!(r_squared(&sim, &obs), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn r_squared_constant_or_single_point_is_nan() {
        assert!(r_squared(&[1.0, 2.0, 3.0], &[2.0, 2.0, 2.0]).is_nan());
        assert!(r_squared(&[1.0], &[2.0]).is_nan());
    }

    // --- NSE ---

    #[test]
    fn nse_known_value() {
        assert_relative_eq!(nash_sutcliffe(&MODELED, &OBSERVED), 0.996_824_866_310, epsilon = 1e-9);
    }

    #[test]
    fn nse_perfect_match() {
        let obs = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_relative_eq!(nash_sutcliffe(&obs, &obs), 1.0);
    }

    #[test]
    fn nse_mean_simulation_gives_zero() {
        let obs = [1.0, 2.0, 3.0, 4.0, 5.0];
        let sim = [3.0; 5];
        assert_relative_eq!(nash_sutcliffe(&sim, &obs), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn nse_poor_simulation_negative() {
        let obs = [1.0, 2.0, 3.0, 4.0, 5.0];
        let sim = [5.0, 4.0, 3.0, 2.0, 1.0];
        assert!(nash_sutcliffe(&sim, &obs) < 0.0);
    }

    #[test]
    fn nse_constant_observed_is_non_finite() {
        let obs = [5.0; 4];
        assert_eq!(nash_sutcliffe(&[1.0, 2.0, 3.0, 4.0], &obs), f64::NEG_INFINITY);
        assert!(nash_sutcliffe(&obs, &obs).is_nan());
    }
}
