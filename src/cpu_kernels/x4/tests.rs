use super::cpu_64x4;
use super::Simd64x4;
use crate::error::ErrorKind;
use crate::loss::Loss;
use crate::traits::{GradientPair, PackedValue};

fn lanes(v: Simd64x4) -> [f64; 4] {
    let mut out = [0.0; 4];
    v.store(&mut out);
    out
}

#[test]
fn scalar_construction_splats() {
    assert_eq!(lanes(Simd64x4::from(3i32)), [3.0; 4]);
    assert_eq!(lanes(Simd64x4::from(0.5f32)), [0.5; 4]);
}

#[test]
fn lanewise_arithmetic() {
    let a = Simd64x4::load(&[1.0, 2.0, 3.0, 4.0]);
    let b = Simd64x4::load(&[4.0, 3.0, 2.0, 1.0]);
    assert_eq!(lanes(a + b), [5.0; 4]);
    assert_eq!(lanes(a - b), [-3.0, -1.0, 1.0, 3.0]);
    assert_eq!(lanes(a * b), [4.0, 6.0, 6.0, 4.0]);
    assert_eq!(lanes(a / b), [0.25, 2.0 / 3.0, 1.5, 4.0]);
    assert_eq!(lanes(a.max(b)), [4.0, 3.0, 3.0, 4.0]);
    assert_eq!(a.reduce_sum(), 10.0);
}

#[test]
fn predicates_fire_on_any_single_lane() {
    for hot in 0..4 {
        let denom = Simd64x4::from_fn(|i| if i == hot { 0.0 } else { 1.0 });
        let q = Simd64x4::splat(1.0) / denom;
        assert!(q.is_any_inf(), "lane {hot}");
        assert!(!q.is_any_nan(), "lane {hot}");

        let roots = Simd64x4::from_fn(|i| if i == hot { -1.0 } else { 4.0 }).sqrt();
        assert!(roots.is_any_nan(), "lane {hot}");

        let probe = Simd64x4::from_fn(|i| if i == hot { 7.0 } else { 0.0 });
        assert!(probe.is_any_equal(Simd64x4::splat(7.0)), "lane {hot}");
    }
    let clean = Simd64x4::load(&[1.0, 2.0, 3.0, 4.0]);
    assert!(!clean.is_any_inf() && !clean.is_any_nan());
    assert!(!clean.is_any_equal(Simd64x4::splat(5.0)));
}

#[test]
fn load_reads_unaligned_slices() {
    let data = [9.0, 1.0, 2.0, 3.0, 4.0];
    assert_eq!(lanes(Simd64x4::load(&data[1..])), [1.0, 2.0, 3.0, 4.0]);
}

#[test]
#[should_panic]
fn load_panics_on_short_slice() {
    let _ = Simd64x4::load(&[1.0, 2.0]);
}

#[test]
fn eq_mask_is_one_hot() {
    let v = Simd64x4::load(&[0.0, 2.0, 1.0, 2.0]);
    assert_eq!(lanes(v.eq_mask(Simd64x4::splat(2.0))), [0.0, 1.0, 0.0, 1.0]);
}

#[test]
fn zone_catalog_matches_scalar_zone() {
    let scalar: Vec<_> = crate::cpu_kernels::scalar::cpu_64::init().names().collect();
    let wide: Vec<_> = cpu_64x4::init().names().collect();
    assert_eq!(scalar, wide);
}

#[test]
fn log_loss_in_wide_zone() {
    let mut out = None;
    assert_eq!(cpu_64x4::create_loss_status(3, b"log_loss", &mut out), ErrorKind::None);
    let loss = out.unwrap();
    assert_eq!(loss.output_count(), 3);

    let scores = [Simd64x4::splat(0.0); 3];
    let target = Simd64x4::load(&[0.0, 1.0, 2.0, 0.0]);
    let mut pairs = [GradientPair::default(); 3];
    loss.gradient_hessian(&scores, target, &mut pairs);
    let g1 = lanes(pairs[1].gradient);
    let third = 1.0 / 3.0;
    assert!((g1[1] - (third - 1.0)).abs() < 1e-15);
    assert!((g1[0] - third).abs() < 1e-15);
}

#[test]
#[should_panic]
fn lane_past_three_panics() {
    Simd64x4::splat(1.0).lane(4);
}
