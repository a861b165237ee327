//! Per-sample error sequences, one output value per input index.

/// Signed error `x - x_true`.
pub fn absolute_error(x: &[f64], x_true: &[f64]) -> Vec<f64> {
    x.iter().zip(x_true).map(|(m, o)| m - o).collect()
}

/// `(x - x_true) / x_true`. A zero reference value yields ±inf or NaN.
pub fn relative_error(x: &[f64], x_true: &[f64]) -> Vec<f64> {
    x.iter().zip(x_true).map(|(m, o)| (m - o) / o).collect()
}

/// Relative error scaled to percent.
pub fn percent_error(x: &[f64], x_true: &[f64]) -> Vec<f64> {
    relative_error(x, x_true).into_iter().map(|e| e * 100.0).collect()
}

/// Difference normalized by the pairwise mean of the two samples, in percent.
pub fn percent_difference(x: &[f64], x_true: &[f64]) -> Vec<f64> {
    x.iter()
        .zip(x_true)
        .map(|(m, o)| {
            let avg = (m + o) / 2.0;
            (m - o) / avg * 100.0
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const MODELED: [f64; 5] = [55.5, 62.1, 65.3, 64.4, 61.2];
    const OBSERVED: [f64; 5] = [55.7, 62.0, 65.5, 64.7, 61.1];

    #[test]
    fn absolute_error_is_signed_difference() {
        let err = absolute_error(&MODELED, &OBSERVED);
        let expected = [-0.2, 0.1, -0.2, -0.3, 0.1];
        for (e, x) in err.iter().zip(expected) {
            assert_relative_eq!(*e, x, epsilon = 1e-9);
        }
    }

    #[test]
    fn relative_error_known_values() {
        let err = relative_error(&MODELED, &OBSERVED);
        let expected = [-0.00359066, 0.0016129, -0.00305344, -0.00463679, 0.00163666];
        for (e, x) in err.iter().zip(expected) {
            assert_relative_eq!(*e, x, epsilon = 1e-8);
        }
    }

    #[test]
    fn percent_error_is_relative_error_times_100() {
        let rel = relative_error(&MODELED, &OBSERVED);
        let pct = percent_error(&MODELED, &OBSERVED);
        for (r, p) in rel.iter().zip(&pct) {
            assert_relative_eq!(r * 100.0, *p, epsilon = 1e-12);
        }
    }

    #[test]
    fn percent_difference_known_values() {
        let diff = percent_difference(&MODELED, &OBSERVED);
        let expected = [-0.35971223, 0.16116035, -0.3058104, -0.464756, 0.1635323];
        for (d, x) in diff.iter().zip(expected) {
            assert_relative_eq!(*d, x, epsilon = 1e-7);
        }
    }

    #[test]
    fn percent_difference_is_symmetric_in_magnitude() {
        let a = percent_difference(&[10.0], &[12.0]);
        let b = percent_difference(&[12.0], &[10.0]);
        assert_relative_eq!(a[0], -b[0], epsilon = 1e-12);
    }

    #[test]
    fn zero_reference_propagates_non_finite() {
        let rel = relative_error(&[1.0, 0.0], &[0.0, 0.0]);
        assert_eq!(rel[0], f64::INFINITY);
        assert!(rel[1].is_nan());

        let diff = percent_difference(&[0.0], &[0.0]);
        assert!(diff[0].is_nan());
    }
}
