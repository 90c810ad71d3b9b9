//! Exponential Moving Average indicator.
//!
//! k = 2/(n+1), seeded with the first value, then EMA[i] = V[i]*k + EMA[i-1]*(1-k).
//! No warmup: every position is defined.

pub fn calculate_ema(values: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || values.is_empty() {
        return Vec::new();
    }

    let k = smoothing_factor(period);
    let mut out = Vec::with_capacity(values.len());
    let mut ema = values[0];
    out.push(ema);

    for &value in &values[1..] {
        ema = value * k + ema * (1.0 - k);
        out.push(ema);
    }

    out
}

pub fn smoothing_factor(period: usize) -> f64 {
    2.0 / (period as f64 + 1.0)
}
