//! Shared inference utilities.

/// Sigmoid activation function.
#[inline]
#[must_use]
pub fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sigmoid() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-6);
        assert!(sigmoid(10.0) > 0.999);
        assert!(sigmoid(-10.0) < 0.001);
    }

    #[test]
    fn test_sigmoid_stays_in_unit_interval() {
        for logit in [-100.0, -1.0, 0.0, 0.5, 1.0, 100.0] {
            let p = sigmoid(logit);
            assert!((0.0..=1.0).contains(&p));
        }
    }
}
