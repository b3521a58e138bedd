//! Loss objectives, generic over the zone's packed value type.
//!
//! Every loss evaluates per-sample gradients and hessians on packed lanes.
//! Each zone builds its catalog from [`register_losses`]; only the packed
//! type parameter differs between zones.

mod log_loss;
mod poisson;
mod pseudo_huber;
mod squared_error;
mod tweedie;

pub use log_loss::LogLoss;
pub use poisson::PoissonDeviance;
pub use pseudo_huber::PseudoHuber;
pub use squared_error::SquaredError;
pub use tweedie::TweedieDeviance;

use std::fmt;
use std::ops::Deref;

use crate::error::{LossError, LossResult};
use crate::registration::{register, Registration};
use crate::traits::{GradientPair, PackedValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LossTask {
    Regression,
    Classification,
}

/// An objective function evaluated on packed lanes.
///
/// `scores` holds one packed score per model output and `out` receives one
/// gradient pair per output; both have length [`output_count`](Loss::output_count).
/// Each lane is an independent sample.
pub trait Loss<P: PackedValue>: Send + Sync + fmt::Debug {
    fn name(&self) -> &'static str;

    fn task(&self) -> LossTask;

    fn output_count(&self) -> usize;

    fn gradient_hessian(&self, scores: &[P], target: P, out: &mut [GradientPair<P>]);

    /// Per-sample loss value.
    fn sample_loss(&self, scores: &[P], target: P) -> P;
}

/// Owned loss produced by a zone factory. Dropping it releases the loss.
pub struct LossHandle<P: PackedValue> {
    inner: Box<dyn Loss<P>>,
}

impl<P: PackedValue> LossHandle<P> {
    pub fn new(inner: Box<dyn Loss<P>>) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> Box<dyn Loss<P>> {
        self.inner
    }
}

impl<P: PackedValue> Deref for LossHandle<P> {
    type Target = dyn Loss<P>;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl<P: PackedValue> fmt::Debug for LossHandle<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LossHandle").field(&self.inner).finish()
    }
}

/// Every loss available to a zone, in declaration order.
pub fn register_losses<P: PackedValue>() -> Vec<Registration<P>> {
    vec![
        register::<P, SquaredError>(),
        register::<P, PseudoHuber>(),
        register::<P, LogLoss>(),
        register::<P, PoissonDeviance>(),
        register::<P, TweedieDeviance>(),
    ]
}

/// Reject any output count other than one.
pub(crate) fn require_single_output(loss: &'static str, output_count: usize) -> LossResult<()> {
    if output_count == 1 {
        Ok(())
    } else {
        Err(LossError::OutputCount { loss, output_count })
    }
}

#[cfg(test)]
pub(crate) mod test_util {
    use crate::traits::{GradientPair, PackedValue};

    use super::Loss;

    /// Central finite difference of `sample_loss` against the analytic gradient
    /// for a single-output loss, on lane 0.
    pub fn check_gradient<P: PackedValue>(loss: &dyn Loss<P>, score: f64, target: f64) {
        let h = 1e-5;
        let t = P::from(target);
        let up = loss.sample_loss(&[P::from(score + h)], t).lane(0);
        let down = loss.sample_loss(&[P::from(score - h)], t).lane(0);
        let numeric = (up - down) / (2.0 * h);

        let mut out = [GradientPair::<P>::default()];
        loss.gradient_hessian(&[P::from(score)], t, &mut out);
        let analytic = out[0].gradient.lane(0);
        assert!(
            (numeric - analytic).abs() < 1e-5 * (1.0 + analytic.abs()),
            "{}: score={score} target={target} numeric={numeric} analytic={analytic}",
            loss.name()
        );
    }

    /// Same check for the hessian, differencing the analytic gradient.
    pub fn check_hessian<P: PackedValue>(loss: &dyn Loss<P>, score: f64, target: f64) {
        let h = 1e-5;
        let t = P::from(target);
        let grad_at = |s: f64| {
            let mut out = [GradientPair::<P>::default()];
            loss.gradient_hessian(&[P::from(s)], t, &mut out);
            out[0].gradient.lane(0)
        };
        let numeric = (grad_at(score + h) - grad_at(score - h)) / (2.0 * h);

        let mut out = [GradientPair::<P>::default()];
        loss.gradient_hessian(&[P::from(score)], t, &mut out);
        let analytic = out[0].hessian.lane(0);
        assert!(
            (numeric - analytic).abs() < 1e-5 * (1.0 + analytic.abs()),
            "{}: score={score} target={target} numeric={numeric} analytic={analytic}",
            loss.name()
        );
    }
}
