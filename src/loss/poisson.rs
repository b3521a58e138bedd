use crate::error::{LossError, LossResult};
use crate::params::LossParams;
use crate::registration::{LossConfig, RegistrableLoss};
use crate::traits::{GradientPair, PackedValue};

use super::{require_single_output, Loss, LossTask};

/// Poisson negative log-likelihood with a log link: L = e^s - y·s
///
/// grad = e^s - y. The hessian is inflated to e^(s + max_delta_step), which
/// caps the Newton step early in boosting when e^s is tiny.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoissonDeviance {
    max_delta_step: f64,
}

impl PoissonDeviance {
    pub const DEFAULT_MAX_DELTA_STEP: f64 = 0.7;

    pub fn new(max_delta_step: f64) -> LossResult<Self> {
        if !(max_delta_step.is_finite() && max_delta_step >= 0.0) {
            return Err(LossError::OutOfRange {
                param: "max_delta_step",
                value: max_delta_step,
                expected: "a finite value >= 0",
            });
        }
        Ok(Self { max_delta_step })
    }

    pub fn max_delta_step(&self) -> f64 {
        self.max_delta_step
    }
}

impl Default for PoissonDeviance {
    fn default() -> Self {
        Self { max_delta_step: Self::DEFAULT_MAX_DELTA_STEP }
    }
}

impl<P: PackedValue> Loss<P> for PoissonDeviance {
    fn name(&self) -> &'static str {
        "poisson_deviance"
    }

    fn task(&self) -> LossTask {
        LossTask::Regression
    }

    fn output_count(&self) -> usize {
        1
    }

    #[inline(always)]
    fn gradient_hessian(&self, scores: &[P], target: P, out: &mut [GradientPair<P>]) {
        let mu = scores[0].exp();
        let hess = (scores[0] + P::splat(self.max_delta_step)).exp();
        out[0] = GradientPair::new(mu - target, hess);
    }

    #[inline(always)]
    fn sample_loss(&self, scores: &[P], target: P) -> P {
        scores[0].exp() - target * scores[0]
    }
}

impl<P: PackedValue> RegistrableLoss<P> for PoissonDeviance {
    const NAME: &'static str = "poisson_deviance";

    fn construct(config: &LossConfig, params: &mut LossParams<'_>) -> LossResult<Self> {
        require_single_output(<Self as RegistrableLoss<P>>::NAME, config.output_count)?;
        Self::new(params.take_f64("max_delta_step", Self::DEFAULT_MAX_DELTA_STEP)?)
    }
}
