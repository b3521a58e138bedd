use std::fmt::Debug;
use std::ops::{Add, Div, Mul, Neg, Sub};

use bytemuck::Pod;

/// Core packed-value trait consumed by every loss kernel.
///
/// A packed value is a group of `LANES` f64 lanes processed together. The
/// scalar zone instantiates it with one lane; wider zones carry more lanes
/// under the same contract. All operations are pure and return new values.
///
/// The `is_any_*` predicates are horizontal reductions: they return true if
/// ANY lane satisfies the condition. Division by zero, overflow and NaN are
/// representable results, never errors; callers detect them with
/// [`is_any_inf`](PackedValue::is_any_inf) and
/// [`is_any_nan`](PackedValue::is_any_nan).
pub trait PackedValue:
    Debug + Clone + Copy + Send + Sync + Default + 'static + Pod
    + From<f64>
    + From<f32>
    + From<i32>
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
{
    /// Number of f64 lanes.
    const LANES: usize;

    /// Broadcast one value to every lane.
    fn splat(v: f64) -> Self;

    /// Build lanes from a closure over the lane index.
    fn from_fn(f: impl FnMut(usize) -> f64) -> Self;

    /// Read `LANES` consecutive values.
    ///
    /// # Panics
    /// Panics if `src` is shorter than `LANES`.
    fn load(src: &[f64]) -> Self;

    /// Write `LANES` consecutive values.
    ///
    /// # Panics
    /// Panics if `dst` is shorter than `LANES`.
    fn store(self, dst: &mut [f64]);

    /// Extract a single lane.
    ///
    /// # Panics
    /// Panics if `i >= LANES`.
    fn lane(self, i: usize) -> f64;

    fn is_any_equal(self, other: Self) -> bool;
    fn is_any_inf(self) -> bool;
    fn is_any_nan(self) -> bool;

    fn sqrt(self) -> Self;
    fn exp(self) -> Self;
    fn ln(self) -> Self;
    fn abs(self) -> Self;
    fn max(self, other: Self) -> Self;
    fn min(self, other: Self) -> Self;

    /// 1.0 in lanes where `self == other`, 0.0 elsewhere.
    fn eq_mask(self, other: Self) -> Self;

    /// Sum of all lanes.
    fn reduce_sum(self) -> f64;
}

/// First and second derivative of a loss with respect to one output score.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GradientPair<P> {
    pub gradient: P,
    pub hessian: P,
}

impl<P> GradientPair<P> {
    #[inline(always)]
    pub fn new(gradient: P, hessian: P) -> Self {
        Self { gradient, hessian }
    }
}
