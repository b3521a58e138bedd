use crate::error::{LossError, LossResult};
use crate::params::LossParams;
use crate::registration::{LossConfig, RegistrableLoss};
use crate::traits::{GradientPair, PackedValue};

use super::{require_single_output, Loss, LossTask};

/// Tweedie negative log-likelihood with a log link, variance power ρ in (1, 2):
///
/// L = -y·e^((1-ρ)s)/(1-ρ) + e^((2-ρ)s)/(2-ρ)
///
/// grad = -y·e^((1-ρ)s) + e^((2-ρ)s)
/// hess = -y(1-ρ)·e^((1-ρ)s) + (2-ρ)·e^((2-ρ)s)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweedieDeviance {
    variance_power: f64,
}

impl TweedieDeviance {
    pub const DEFAULT_VARIANCE_POWER: f64 = 1.5;

    pub fn new(variance_power: f64) -> LossResult<Self> {
        if !(variance_power > 1.0 && variance_power < 2.0) {
            return Err(LossError::OutOfRange {
                param: "variance_power",
                value: variance_power,
                expected: "1 < variance_power < 2",
            });
        }
        Ok(Self { variance_power })
    }

    pub fn variance_power(&self) -> f64 {
        self.variance_power
    }

    /// (e^((1-ρ)s), e^((2-ρ)s))
    #[inline(always)]
    fn powers<P: PackedValue>(&self, score: P) -> (P, P) {
        let a = P::splat(1.0 - self.variance_power);
        let b = P::splat(2.0 - self.variance_power);
        ((a * score).exp(), (b * score).exp())
    }
}

impl Default for TweedieDeviance {
    fn default() -> Self {
        Self { variance_power: Self::DEFAULT_VARIANCE_POWER }
    }
}

impl<P: PackedValue> Loss<P> for TweedieDeviance {
    fn name(&self) -> &'static str {
        "tweedie_deviance"
    }

    fn task(&self) -> LossTask {
        LossTask::Regression
    }

    fn output_count(&self) -> usize {
        1
    }

    #[inline(always)]
    fn gradient_hessian(&self, scores: &[P], target: P, out: &mut [GradientPair<P>]) {
        let a = P::splat(1.0 - self.variance_power);
        let b = P::splat(2.0 - self.variance_power);
        let (ea, eb) = self.powers(scores[0]);
        let grad = eb - target * ea;
        let hess = b * eb - target * a * ea;
        out[0] = GradientPair::new(grad, hess);
    }

    #[inline(always)]
    fn sample_loss(&self, scores: &[P], target: P) -> P {
        let a = P::splat(1.0 - self.variance_power);
        let b = P::splat(2.0 - self.variance_power);
        let (ea, eb) = self.powers(scores[0]);
        eb / b - target * ea / a
    }
}

impl<P: PackedValue> RegistrableLoss<P> for TweedieDeviance {
    const NAME: &'static str = "tweedie_deviance";

    fn construct(config: &LossConfig, params: &mut LossParams<'_>) -> LossResult<Self> {
        require_single_output(<Self as RegistrableLoss<P>>::NAME, config.output_count)?;
        Self::new(params.take_f64("variance_power", Self::DEFAULT_VARIANCE_POWER)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu_kernels::scalar::Simd64None;
    use crate::loss::test_util::{check_gradient, check_hessian};

    #[test]
    fn derivatives_match_finite_differences() {
        for rho in [1.1, 1.5, 1.9] {
            let loss = TweedieDeviance::new(rho).unwrap();
            for (score, target) in [(0.0, 1.0), (0.8, 0.0), (-1.5, 4.0)] {
                check_gradient::<Simd64None>(&loss, score, target);
                check_hessian::<Simd64None>(&loss, score, target);
            }
        }
    }

    #[test]
    fn variance_power_bounds_are_open() {
        assert!(TweedieDeviance::new(1.0).is_err());
        assert!(TweedieDeviance::new(2.0).is_err());
        assert!(TweedieDeviance::new(f64::NAN).is_err());
        assert!(TweedieDeviance::new(1.5).is_ok());
    }
}
