use crate::error::LossResult;
use crate::params::LossParams;
use crate::registration::{LossConfig, RegistrableLoss};
use crate::traits::{GradientPair, PackedValue};

use super::{require_single_output, Loss, LossTask};

/// Squared error: L = ½(s - y)²
///
/// grad = s - y, hess = 1.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SquaredError;

impl<P: PackedValue> Loss<P> for SquaredError {
    fn name(&self) -> &'static str {
        "squared_error"
    }

    fn task(&self) -> LossTask {
        LossTask::Regression
    }

    fn output_count(&self) -> usize {
        1
    }

    #[inline(always)]
    fn gradient_hessian(&self, scores: &[P], target: P, out: &mut [GradientPair<P>]) {
        out[0] = GradientPair::new(scores[0] - target, P::splat(1.0));
    }

    #[inline(always)]
    fn sample_loss(&self, scores: &[P], target: P) -> P {
        let r = scores[0] - target;
        P::splat(0.5) * r * r
    }
}

impl<P: PackedValue> RegistrableLoss<P> for SquaredError {
    const NAME: &'static str = "squared_error";

    fn construct(config: &LossConfig, _params: &mut LossParams<'_>) -> LossResult<Self> {
        require_single_output(<Self as RegistrableLoss<P>>::NAME, config.output_count)?;
        Ok(SquaredError)
    }
}
