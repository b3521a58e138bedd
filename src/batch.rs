//! Batched gradient evaluation over f64 slices.
//!
//! Scores are row-major `[sample][output]`; targets hold one value per
//! sample. Samples are packed `P::LANES` at a time; a short tail is padded
//! with zeros and only the real lanes are written back.

use rayon::prelude::*;

use crate::loss::Loss;
use crate::traits::{GradientPair, PackedValue};

/// NaN/Inf flags collected with the packed any-lane predicates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NumericHealth {
    pub any_nan: bool,
    pub any_inf: bool,
}

impl NumericHealth {
    pub fn is_finite(&self) -> bool {
        !self.any_nan && !self.any_inf
    }

    pub fn merge(self, other: Self) -> Self {
        Self {
            any_nan: self.any_nan || other.any_nan,
            any_inf: self.any_inf || other.any_inf,
        }
    }

    /// Record the first `real` lanes of `v`. Padding lanes past `real` are
    /// ignored.
    #[inline(always)]
    fn observe<P: PackedValue>(&mut self, v: P, real: usize) {
        if real >= P::LANES {
            self.any_nan |= v.is_any_nan();
            self.any_inf |= v.is_any_inf();
            return;
        }
        for lane in 0..real {
            let x = v.lane(lane);
            self.any_nan |= x.is_nan();
            self.any_inf |= x.is_infinite();
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LossSummary {
    pub mean: f64,
    pub health: NumericHealth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchConfig {
    /// Samples per rayon task. Rounded up to a multiple of the lane count.
    pub chunk_samples: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self { chunk_samples: 4096 }
    }
}

impl BatchConfig {
    fn chunk_for<P: PackedValue>(&self) -> usize {
        self.chunk_samples.max(1).div_ceil(P::LANES) * P::LANES
    }
}

fn check_shapes(outputs: usize, scores: usize, targets: usize) {
    assert!(outputs > 0, "loss reports zero outputs");
    assert_eq!(scores, targets * outputs, "scores must hold outputs x samples values");
}

/// Gather output `k` of samples `[base, base + LANES)`, zero-padding past `n`.
#[inline(always)]
fn gather<P: PackedValue>(data: &[f64], base: usize, n: usize, stride: usize, k: usize) -> P {
    if stride == 1 && base + P::LANES <= n {
        return P::load(&data[base..]);
    }
    P::from_fn(|lane| {
        let i = base + lane;
        if i < n {
            data[i * stride + k]
        } else {
            0.0
        }
    })
}

#[inline(always)]
fn scatter<P: PackedValue>(v: P, data: &mut [f64], base: usize, n: usize, stride: usize, k: usize) {
    if stride == 1 && base + P::LANES <= n {
        v.store(&mut data[base..]);
        return;
    }
    for lane in 0..P::LANES.min(n - base) {
        data[(base + lane) * stride + k] = v.lane(lane);
    }
}

/// Evaluate gradients and hessians for every sample.
///
/// # Panics
/// Panics if `scores`, `gradients` and `hessians` do not all hold
/// `targets.len() * loss.output_count()` values.
pub fn compute_gradients<P: PackedValue>(
    loss: &dyn Loss<P>,
    scores: &[f64],
    targets: &[f64],
    gradients: &mut [f64],
    hessians: &mut [f64],
) -> NumericHealth {
    let outputs = loss.output_count();
    let n = targets.len();
    check_shapes(outputs, scores.len(), n);
    assert_eq!(gradients.len(), scores.len());
    assert_eq!(hessians.len(), scores.len());

    let mut packed = vec![P::default(); outputs];
    let mut pairs = vec![GradientPair::<P>::default(); outputs];
    let mut health = NumericHealth::default();

    for base in (0..n).step_by(P::LANES) {
        for (k, slot) in packed.iter_mut().enumerate() {
            *slot = gather(scores, base, n, outputs, k);
        }
        let target: P = gather(targets, base, n, 1, 0);

        loss.gradient_hessian(&packed, target, &mut pairs);

        let real = n - base;
        for (k, pair) in pairs.iter().enumerate() {
            health.observe(pair.gradient, real);
            health.observe(pair.hessian, real);
            scatter(pair.gradient, gradients, base, n, outputs, k);
            scatter(pair.hessian, hessians, base, n, outputs, k);
        }
    }
    health
}

/// [`compute_gradients`] fanned out over the rayon pool.
pub fn par_compute_gradients<P: PackedValue>(
    loss: &dyn Loss<P>,
    scores: &[f64],
    targets: &[f64],
    gradients: &mut [f64],
    hessians: &mut [f64],
    config: &BatchConfig,
) -> NumericHealth {
    let outputs = loss.output_count();
    check_shapes(outputs, scores.len(), targets.len());
    assert_eq!(gradients.len(), scores.len());
    assert_eq!(hessians.len(), scores.len());

    let chunk = config.chunk_for::<P>();
    scores
        .par_chunks(chunk * outputs)
        .zip(targets.par_chunks(chunk))
        .zip(gradients.par_chunks_mut(chunk * outputs))
        .zip(hessians.par_chunks_mut(chunk * outputs))
        .map(|(((s, t), g), h)| compute_gradients(loss, s, t, g, h))
        .reduce(NumericHealth::default, NumericHealth::merge)
}

/// Mean per-sample loss, accumulated with Kahan summation.
pub fn evaluate_loss<P: PackedValue>(
    loss: &dyn Loss<P>,
    scores: &[f64],
    targets: &[f64],
) -> LossSummary {
    let outputs = loss.output_count();
    let n = targets.len();
    check_shapes(outputs, scores.len(), n);

    let mut packed = vec![P::default(); outputs];
    let mut health = NumericHealth::default();
    let mut sum = 0.0f64;
    let mut c = 0.0f64;

    for base in (0..n).step_by(P::LANES) {
        for (k, slot) in packed.iter_mut().enumerate() {
            *slot = gather(scores, base, n, outputs, k);
        }
        let target: P = gather(targets, base, n, 1, 0);
        let value = loss.sample_loss(&packed, target);
        let real = n - base;
        health.observe(value, real);

        for lane in 0..P::LANES.min(real) {
            let y = value.lane(lane) - c;
            let t = sum + y;
            c = (t - sum) - y;
            sum = t;
        }
    }

    let mean = if n == 0 { 0.0 } else { sum / n as f64 };
    LossSummary { mean, health }
}
