//! RSI (Relative Strength Index) indicator implementation.
//!
//! Average gain/loss are plain trailing means of the last n price changes
//! (no Wilder smoothing).
//!
//! Formula: RSI = 100 - (100 / (1 + avg_gain / avg_loss))
//! If avg_loss == 0: RSI = 100
//!
//! Warmup: first n positions are null (need n price changes).

pub fn calculate_rsi(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    if period == 0 || closes.len() <= period {
        return vec![None; closes.len()];
    }

    // gains[i] / losses[i] describe the change into bar i; index 0 is unused.
    let mut gains = vec![0.0; closes.len()];
    let mut losses = vec![0.0; closes.len()];
    for i in 1..closes.len() {
        let change = closes[i] - closes[i - 1];
        gains[i] = change.max(0.0);
        losses[i] = (-change).max(0.0);
    }

    let mut values = vec![None; period];
    for i in period..closes.len() {
        let window = i + 1 - period..=i;
        let avg_gain = gains[window.clone()].iter().sum::<f64>() / period as f64;
        let avg_loss = losses[window].iter().sum::<f64>() / period as f64;
        values.push(Some(rsi_from_averages(avg_gain, avg_loss)));
    }

    values
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        100.0
    } else {
        100.0 - (100.0 / (1.0 + avg_gain / avg_loss))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rsi_empty() {
        assert!(calculate_rsi(&[], 14).is_empty());
    }

    #[test]
    fn rsi_single_bar() {
        assert_eq!(calculate_rsi(&[100.0], 14), vec![None]);
    }

    #[test]
    fn rsi_warmup_period() {
        let closes: Vec<f64> = (1..=15).map(|i| 100.0 + (i as f64 % 5.0) * 2.0).collect();
        let rsi = calculate_rsi(&closes, 14);

        assert_eq!(rsi.len(), 15);
        for (i, value) in rsi.iter().enumerate().take(14) {
            assert!(value.is_none(), "Bar {} should be null", i);
        }
        assert!(rsi[14].is_some(), "Bar 14 should be defined");
    }

    #[test]
    fn rsi_all_gains_no_losses() {
        let closes: Vec<f64> = (0..15).map(|i| 100.0 + i as f64).collect();
        let rsi = calculate_rsi(&closes, 14);
        assert!((rsi[14].unwrap() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rsi_flat_prices_is_100() {
        let rsi = calculate_rsi(&[50.0; 20], 14);
        assert!((rsi[19].unwrap() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rsi_all_losses_no_gains() {
        let closes: Vec<f64> = (0..15).map(|i| 100.0 - i as f64).collect();
        let rsi = calculate_rsi(&closes, 14);
        assert!(rsi[14].unwrap().abs() < f64::EPSILON);
    }

    #[test]
    fn rsi_uses_trailing_window_only() {
        // Early losses scroll out of the window; the last 14 changes are all gains.
        let mut closes: Vec<f64> = (0..10).map(|i| 100.0 - i as f64).collect();
        closes.extend((0..15).map(|i| 91.0 + i as f64));
        let rsi = calculate_rsi(&closes, 14);
        assert!((rsi[closes.len() - 1].unwrap() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rsi_known_calculation() {
        let closes = [
            44.0, 44.25, 44.50, 43.75, 44.50, 44.25, 44.75, 45.25, 45.50, 45.25, 45.50, 46.0,
            46.25, 46.0, 46.50,
        ];
        let rsi = calculate_rsi(&closes, 14);

        // gains: 0.25+0.25+0.75+0.5+0.5+0.25+0.25+0.5+0.25+0.5 = 4.0
        // losses: 0.75+0.25+0.25+0.25 = 1.5
        let expected = 100.0 - 100.0 / (1.0 + 4.0 / 1.5);
        assert!((rsi[14].unwrap() - expected).abs() < 1e-9);
    }

    #[test]
    fn rsi_in_range() {
        let closes: Vec<f64> = (1..=40)
            .map(|i| 100.0 + (i as f64 % 7.0 - 3.0) * 2.0)
            .collect();
        for value in calculate_rsi(&closes, 14).into_iter().flatten() {
            assert!((0.0..=100.0).contains(&value), "RSI {} out of range", value);
        }
    }

    #[test]
    fn rsi_zero_period() {
        assert_eq!(calculate_rsi(&[100.0, 101.0], 0), vec![None, None]);
    }
}
