//! Property tests for the packed value contract in both zones.
//!
//! Uses proptest to verify invariants that must hold for all inputs:
//! - addition is bit-identical to f64 addition
//! - x / 0 is Inf for x != 0 and NaN for x == 0
//! - sqrt of a negative value is NaN
//! - four-lane results equal four scalar results

use gbm_kernels::{PackedValue, Simd64None, Simd64x4};
use proptest::prelude::*;

fn finite() -> impl Strategy<Value = f64> {
    prop::num::f64::POSITIVE
        | prop::num::f64::NEGATIVE
        | prop::num::f64::NORMAL
        | prop::num::f64::SUBNORMAL
        | prop::num::f64::ZERO
}

proptest! {
    #[test]
    fn prop_add_is_bit_exact(a in finite(), b in finite()) {
        let sum = Simd64None::from(a) + Simd64None::from(b);
        prop_assert_eq!(sum.lane(0).to_bits(), Simd64None::from(a + b).lane(0).to_bits());

        let wide = Simd64x4::splat(a) + Simd64x4::splat(b);
        for lane in 0..4 {
            prop_assert_eq!(wide.lane(lane).to_bits(), (a + b).to_bits());
        }
    }

    #[test]
    fn prop_divide_by_zero(a in finite()) {
        let q = Simd64None::from(a) / Simd64None::from(0.0f64);
        if a == 0.0 {
            prop_assert!(q.is_any_nan());
        } else {
            prop_assert!(q.is_any_inf());
            prop_assert!(!q.is_any_nan());
        }
    }

    #[test]
    fn prop_sqrt_negative_is_nan(
        a in prop::num::f64::NEGATIVE.prop_filter("nonzero", |v| *v != 0.0)
    ) {
        prop_assert!(Simd64None::from(a).sqrt().is_any_nan());
        prop_assert!(Simd64x4::splat(a).sqrt().is_any_nan());
    }

    #[test]
    fn prop_wide_matches_scalar(
        xs in prop::array::uniform4(finite()),
        ys in prop::array::uniform4(finite())
    ) {
        let a = Simd64x4::load(&xs);
        let b = Simd64x4::load(&ys);
        let ops: [(Simd64x4, fn(f64, f64) -> f64); 4] = [
            (a + b, |x, y| x + y),
            (a - b, |x, y| x - y),
            (a * b, |x, y| x * y),
            (a / b, |x, y| x / y),
        ];
        for (packed, scalar) in ops {
            for lane in 0..4 {
                let expected = (Simd64None::from(scalar(xs[lane], ys[lane]))).lane(0);
                prop_assert_eq!(packed.lane(lane).to_bits(), expected.to_bits());
            }
        }
    }

    #[test]
    fn prop_store_load_identity(xs in prop::array::uniform4(any::<f64>())) {
        let mut out = [0.0; 4];
        Simd64x4::load(&xs).store(&mut out);
        for lane in 0..4 {
            prop_assert_eq!(out[lane].to_bits(), xs[lane].to_bits());
        }
    }
}

#[test]
fn one_over_zero_scenario() {
    let q = Simd64None::from(1.0f64) / Simd64None::from(0.0f64);
    assert!(q.is_any_inf());
    assert!(!q.is_any_nan());
}
