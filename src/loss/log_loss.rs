use crate::error::{LossError, LossResult};
use crate::params::LossParams;
use crate::registration::{LossConfig, RegistrableLoss};
use crate::traits::{GradientPair, PackedValue};

use super::{Loss, LossTask};

/// Hessian floor; keeps Newton steps bounded when p saturates.
const HESSIAN_FLOOR: f64 = 1e-16;

/// Cross-entropy on logits.
///
/// With one output the score is the binary logit and targets are 0 or 1:
/// p = σ(s), grad = p - y, hess = p(1 - p).
///
/// With `k >= 2` outputs the scores are per-class logits and the target
/// holds the class index: p = softmax(s), grad_k = p_k - [y = k],
/// hess_k = p_k(1 - p_k).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogLoss {
    classes: usize,
}

impl LogLoss {
    pub fn binary() -> Self {
        Self { classes: 1 }
    }

    pub fn multiclass(classes: usize) -> LossResult<Self> {
        if classes < 2 {
            return Err(LossError::OutputCount { loss: "log_loss", output_count: classes });
        }
        Ok(Self { classes })
    }

    pub fn is_binary(&self) -> bool {
        self.classes == 1
    }

    #[inline(always)]
    fn binary_gradient<P: PackedValue>(score: P, target: P) -> GradientPair<P> {
        let one = P::splat(1.0);
        let p = one / (one + (-score).exp());
        let hess = (p * (one - p)).max(P::splat(HESSIAN_FLOOR));
        GradientPair::new(p - target, hess)
    }

    fn multiclass_gradient<P: PackedValue>(scores: &[P], target: P, out: &mut [GradientPair<P>]) {
        let one = P::splat(1.0);
        let floor = P::splat(HESSIAN_FLOOR);
        let max = scores[1..].iter().fold(scores[0], |m, &s| m.max(s));

        // Stash the shifted exponentials in the gradient slots.
        let mut sum = P::splat(0.0);
        for (slot, &s) in out.iter_mut().zip(scores) {
            let e = (s - max).exp();
            slot.gradient = e;
            sum = sum + e;
        }

        for (k, slot) in out.iter_mut().enumerate() {
            let p = slot.gradient / sum;
            let hit = target.eq_mask(P::splat(k as f64));
            *slot = GradientPair::new(p - hit, (p * (one - p)).max(floor));
        }
    }
}

impl<P: PackedValue> Loss<P> for LogLoss {
    fn name(&self) -> &'static str {
        "log_loss"
    }

    fn task(&self) -> LossTask {
        LossTask::Classification
    }

    fn output_count(&self) -> usize {
        self.classes
    }

    #[inline(always)]
    fn gradient_hessian(&self, scores: &[P], target: P, out: &mut [GradientPair<P>]) {
        debug_assert_eq!(scores.len(), self.classes);
        debug_assert_eq!(out.len(), self.classes);
        if self.is_binary() {
            out[0] = Self::binary_gradient(scores[0], target);
        } else {
            Self::multiclass_gradient(scores, target, out);
        }
    }

    fn sample_loss(&self, scores: &[P], target: P) -> P {
        let zero = P::splat(0.0);
        let one = P::splat(1.0);
        if self.is_binary() {
            // softplus(s) - y·s, in the overflow-free form
            let s = scores[0];
            return s.max(zero) + (one + (-s.abs()).exp()).ln() - target * s;
        }

        let max = scores[1..].iter().fold(scores[0], |m, &s| m.max(s));
        let mut sum = zero;
        let mut picked = zero;
        for (k, &s) in scores.iter().enumerate() {
            sum = sum + (s - max).exp();
            picked = picked + target.eq_mask(P::splat(k as f64)) * s;
        }
        max + sum.ln() - picked
    }
}

impl<P: PackedValue> RegistrableLoss<P> for LogLoss {
    const NAME: &'static str = "log_loss";

    fn construct(config: &LossConfig, _params: &mut LossParams<'_>) -> LossResult<Self> {
        match config.output_count {
            0 => Err(LossError::OutputCount {
                loss: <Self as RegistrableLoss<P>>::NAME,
                output_count: 0,
            }),
            1 => Ok(Self::binary()),
            k => Self::multiclass(k),
        }
    }
}
