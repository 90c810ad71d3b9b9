//! Simple Moving Average.
//!
//! SMA[i] = mean(values[i-n+1..=i]). Warmup: first (n-1) positions are null.

pub fn calculate_sma(values: &[f64], period: usize) -> Vec<Option<f64>> {
    if period == 0 {
        return vec![None; values.len()];
    }

    (0..values.len())
        .map(|i| {
            if i + 1 < period {
                None
            } else {
                let window = &values[i + 1 - period..=i];
                Some(window.iter().sum::<f64>() / period as f64)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sma_warmup() {
        let sma = calculate_sma(&[1.0, 2.0, 3.0, 4.0, 5.0], 3);
        assert_eq!(sma[0], None);
        assert_eq!(sma[1], None);
        assert!(sma[2].is_some());
        assert!(sma[4].is_some());
    }

    #[test]
    fn sma_values() {
        let sma = calculate_sma(&[10.0, 20.0, 30.0, 40.0, 50.0], 3);
        assert!((sma[2].unwrap() - 20.0).abs() < f64::EPSILON);
        assert!((sma[3].unwrap() - 30.0).abs() < f64::EPSILON);
        assert!((sma[4].unwrap() - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn sma_period_1_is_identity() {
        let values = [3.0, 1.0, 4.0];
        let sma = calculate_sma(&values, 1);
        assert_eq!(sma, vec![Some(3.0), Some(1.0), Some(4.0)]);
    }

    #[test]
    fn sma_shorter_than_period() {
        let sma = calculate_sma(&[1.0, 2.0], 5);
        assert_eq!(sma, vec![None, None]);
    }

    #[test]
    fn sma_period_0() {
        let sma = calculate_sma(&[1.0, 2.0], 0);
        assert_eq!(sma, vec![None, None]);
    }

    #[test]
    fn sma_empty() {
        assert!(calculate_sma(&[], 5).is_empty());
    }
}
