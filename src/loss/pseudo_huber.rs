use crate::error::{LossError, LossResult};
use crate::params::LossParams;
use crate::registration::{LossConfig, RegistrableLoss};
use crate::traits::{GradientPair, PackedValue};

use super::{require_single_output, Loss, LossTask};

/// Pseudo-Huber: L = δ²(√(1 + (r/δ)²) - 1), r = s - y
///
/// Quadratic near zero and linear in the tails, with smooth derivatives:
/// grad = r / √(1 + (r/δ)²), hess = (1 + (r/δ)²)^(-3/2).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PseudoHuber {
    delta: f64,
}

impl PseudoHuber {
    pub const DEFAULT_DELTA: f64 = 1.0;

    pub fn new(delta: f64) -> LossResult<Self> {
        if !(delta.is_finite() && delta > 0.0) {
            return Err(LossError::OutOfRange {
                param: "delta",
                value: delta,
                expected: "a finite value > 0",
            });
        }
        Ok(Self { delta })
    }

    pub fn delta(&self) -> f64 {
        self.delta
    }
}

impl Default for PseudoHuber {
    fn default() -> Self {
        Self { delta: Self::DEFAULT_DELTA }
    }
}

impl<P: PackedValue> Loss<P> for PseudoHuber {
    fn name(&self) -> &'static str {
        "pseudo_huber"
    }

    fn task(&self) -> LossTask {
        LossTask::Regression
    }

    fn output_count(&self) -> usize {
        1
    }

    #[inline(always)]
    fn gradient_hessian(&self, scores: &[P], target: P, out: &mut [GradientPair<P>]) {
        let one = P::splat(1.0);
        let r = scores[0] - target;
        let scaled = r / P::splat(self.delta);
        let q = one + scaled * scaled;
        let root = q.sqrt();
        out[0] = GradientPair::new(r / root, one / (q * root));
    }

    #[inline(always)]
    fn sample_loss(&self, scores: &[P], target: P) -> P {
        let one = P::splat(1.0);
        let delta = P::splat(self.delta);
        let scaled = (scores[0] - target) / delta;
        delta * delta * ((one + scaled * scaled).sqrt() - one)
    }
}

impl<P: PackedValue> RegistrableLoss<P> for PseudoHuber {
    const NAME: &'static str = "pseudo_huber";

    fn construct(config: &LossConfig, params: &mut LossParams<'_>) -> LossResult<Self> {
        require_single_output(<Self as RegistrableLoss<P>>::NAME, config.output_count)?;
        Self::new(params.take_f64("delta", Self::DEFAULT_DELTA)?)
    }
}
