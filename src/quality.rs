/// EWMA over per-window success ratios, seeded with a perfect-quality prior.
pub struct QualityTracker {
    param: f64,
    value: f64,
}

impl QualityTracker {
    pub fn new(param: f64) -> Self {
        // prior of 1.0: assume a good connection until measured otherwise
        Self { param, value: 1.0 }
    }

    pub fn update(&mut self, ratio: f64) -> f64 {
        self.value = self.param * self.value + (1.0 - self.param) * ratio;
        self.value
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

/// Smooth a whole ratio sequence; output length always equals input length.
pub fn quality_sequence(ratios: &[f64], param: f64) -> Vec<f64> {
    let mut tracker = QualityTracker::new(param);
    ratios.iter().map(|&r| tracker.update(r)).collect()
}
