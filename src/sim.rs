use rand::Rng;
use thiserror::Error;

/// Parameter-domain violations, rejected before any simulation runs.
#[derive(Debug, Error)]
pub enum ParamError {
    #[error("drop rate must be in (0, 1], got {0}")]
    DropRate(f64),
    #[error("smoothing param must be in [0, 1), got {0}")]
    SmoothingParam(f64),
    #[error("window size must be at least 1, got {0}")]
    WindowSize(usize),
}

pub fn validate_drop_rate(drop_rate: f64) -> Result<(), ParamError> {
    if drop_rate > 0.0 && drop_rate <= 1.0 {
        Ok(())
    } else {
        Err(ParamError::DropRate(drop_rate))
    }
}

pub fn validate_param(param: f64) -> Result<(), ParamError> {
    if (0.0..1.0).contains(&param) {
        Ok(())
    } else {
        Err(ParamError::SmoothingParam(param))
    }
}

pub fn validate_window_size(window_size: usize) -> Result<(), ParamError> {
    if window_size >= 1 {
        Ok(())
    } else {
        Err(ParamError::WindowSize(window_size))
    }
}

/// Simulate `trials` packet sends and reduce them to per-window success
/// ratios.
///
/// Each trial draws a uniform sample scaled by `1/drop_rate`; a scaled sample
/// <= 1 counts as a drop. Every trial counts as sent, so drops also advance
/// the window; once `window_size` packets are sent the window closes with
/// ratio (sent - dropped) / sent. A trailing incomplete window is discarded.
pub fn generate_ratios<R: Rng>(
    rng: &mut R,
    drop_rate: f64,
    window_size: usize,
    trials: usize,
) -> Vec<f64> {
    let mut ratios = Vec::with_capacity(trials / window_size);
    let mut sent: usize = 0;
    let mut dropped: usize = 0;
    for _ in 0..trials {
        let sample = rng.gen::<f64>() * (1.0 / drop_rate);
        sent += 1;
        if sample <= 1.0 {
            dropped += 1;
        }
        if sent >= window_size {
            ratios.push((sent - dropped) as f64 / sent as f64);
            sent = 0;
            dropped = 0;
        }
    }
    ratios
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn always_drop_yields_zero_ratios() {
        let mut rng = StdRng::seed_from_u64(7);
        let ratios = generate_ratios(&mut rng, 1.0, 10, 100);
        assert_eq!(ratios.len(), 10);
        assert!(ratios.iter().all(|&r| r == 0.0));
    }

    #[test]
    fn window_count_and_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        let ratios = generate_ratios(&mut rng, 0.3, 100, 10_000);
        assert_eq!(ratios.len(), 100);
        assert!(ratios.iter().all(|&r| (0.0..=1.0).contains(&r)));
    }

    #[test]
    fn trailing_incomplete_window_is_discarded() {
        let mut rng = StdRng::seed_from_u64(1);
        let ratios = generate_ratios(&mut rng, 0.5, 100, 150);
        assert_eq!(ratios.len(), 1);
    }

    #[test]
    fn same_seed_reproduces_sequence() {
        let mut a = StdRng::seed_from_u64(0xC0FFEE);
        let mut b = StdRng::seed_from_u64(0xC0FFEE);
        assert_eq!(
            generate_ratios(&mut a, 0.3, 50, 1_000),
            generate_ratios(&mut b, 0.3, 50, 1_000),
        );
    }

    #[test]
    fn low_drop_rate_gives_high_ratios() {
        let mut rng = StdRng::seed_from_u64(9);
        let ratios = generate_ratios(&mut rng, 0.1, 100, 10_000);
        let mean: f64 = ratios.iter().sum::<f64>() / ratios.len() as f64;
        assert!(mean > 0.8, "mean ratio {mean} too low for drop rate 0.1");
    }

    #[test]
    fn validation_rejects_out_of_range() {
        assert!(validate_drop_rate(0.0).is_err());
        assert!(validate_drop_rate(1.5).is_err());
        assert!(validate_drop_rate(1.0).is_ok());
        assert!(validate_param(1.0).is_err());
        assert!(validate_param(-0.1).is_err());
        assert!(validate_param(0.0).is_ok());
        assert!(validate_window_size(0).is_err());
        assert!(validate_window_size(1).is_ok());
    }
}
