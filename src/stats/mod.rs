//! Small numeric helpers shared by the aggregator and the forecaster

use num_traits::{Float, NumCast};

/// Arithmetic mean, `None` for an empty slice
pub fn mean<T: Float>(values: &[T]) -> Option<T> {
    if values.is_empty() {
        return None;
    }
    let n: T = NumCast::from(values.len())?;
    let sum = values.iter().fold(T::zero(), |acc, &v| acc + v);
    Some(sum / n)
}

/// Mean of the squared values, `None` for an empty slice
pub fn mean_square<T: Float>(values: &[T]) -> Option<T> {
    if values.is_empty() {
        return None;
    }
    let n: T = NumCast::from(values.len())?;
    let sum_sq = values.iter().fold(T::zero(), |acc, &v| acc + v * v);
    Some(sum_sq / n)
}

/// Round half away from zero to `decimals` places
pub fn round_to<T: Float>(value: T, decimals: i32) -> T {
    let factor = match <T as NumCast>::from(10.0f64.powi(decimals)) {
        Some(f) => f,
        None => return value,
    };
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[1.0, 2.0, 3.0, 4.0]), Some(2.5));
        assert_eq!(mean::<f64>(&[]), None);
    }

    #[test]
    fn test_mean_square() {
        assert_eq!(mean_square(&[1.0, -1.0, 3.0, -3.0]), Some(5.0));
        assert_eq!(mean_square::<f64>(&[]), None);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(28.571428, 2), 28.57);
        assert_eq!(round_to(66.666666, 2), 66.67);
        assert_eq!(round_to(-1.23456, 3), -1.235);
        assert_eq!(round_to(4.0f32, 2), 4.0f32);
    }
}
