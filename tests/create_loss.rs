//! End-to-end loss factory scenarios through the public zone entry points.

use gbm_kernels::{
    cpu_64, cpu_64x4, CaseMatching, ErrorKind, GradientPair, LookupPolicy, Loss, LossError,
    PackedValue, Precedence, Simd64None, Simd64x4,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn squared_error_returns_handle() {
    init_logging();
    let mut out = None;
    let status = cpu_64::create_loss_status(1, b"squared_error", &mut out);
    assert_eq!(status, ErrorKind::None);
    let loss = out.expect("handle");

    let mut pair = [GradientPair::default()];
    loss.gradient_hessian(&[Simd64None::splat(4.0)], Simd64None::splat(1.0), &mut pair);
    assert_eq!(pair[0].gradient.lane(0), 3.0);
    assert_eq!(pair[0].hessian.lane(0), 1.0);
}

#[test]
fn unmatched_name_leaves_handle_unset() {
    init_logging();
    let mut out = None;
    let status = cpu_64x4::create_loss_status(1, b"not_a_real_loss", &mut out);
    assert_eq!(status, ErrorKind::UnrecognizedLossName);
    assert!(out.is_none());
}

#[test]
fn empty_name_is_unrecognized() {
    let mut out = None;
    assert_eq!(cpu_64::create_loss_status(1, b"", &mut out), ErrorKind::UnrecognizedLossName);
    assert!(out.is_none());
}

#[test]
fn name_is_matched_within_a_larger_buffer() {
    // Substring view of a config line; nothing after the name is copied.
    let line = b"objective=log_loss;trees=100";
    let name = &line[10..18];
    let loss = cpu_64::create_loss(1, name).unwrap();
    assert_eq!(loss.name(), "log_loss");
}

#[test]
fn parameterized_family() {
    let loss = cpu_64::create_loss(1, b"tweedie_deviance:variance_power=1.2").unwrap();
    assert_eq!(loss.name(), "tweedie_deviance");

    for (spec, expected) in [
        (&b"tweedie_deviance:variance_power=2.5"[..], ErrorKind::MalformedLossParameter),
        (b"tweedie_deviance:variance_power=", ErrorKind::MalformedLossParameter),
        (b"pseudo_huber:", ErrorKind::MalformedLossParameter),
        (b"pseudo_huber:delta=1,delta=2", ErrorKind::MalformedLossParameter),
        (b"pseudo_huber:gamma=1", ErrorKind::MalformedLossParameter),
        (b"pseudo_huber;delta=1", ErrorKind::UnrecognizedLossName),
    ] {
        let mut out = None;
        assert_eq!(
            cpu_64::create_loss_status(1, spec, &mut out),
            expected,
            "{}",
            String::from_utf8_lossy(spec)
        );
        assert!(out.is_none());
    }
}

#[test]
fn matching_is_case_sensitive_by_default() {
    let err = cpu_64::create_loss(1, b"SQUARED_ERROR").unwrap_err();
    assert!(matches!(err, LossError::UnknownLoss(_)));

    let relaxed = cpu_64::catalog_with_policy(
        LookupPolicy::default()
            .with_case(CaseMatching::AsciiInsensitive)
            .with_precedence(Precedence::Last),
    );
    assert_eq!(relaxed.create(1, b"SQUARED_ERROR").unwrap().name(), "squared_error");
}

#[test]
fn idempotent_creation() {
    let a = cpu_64x4::create_loss(4, b"log_loss").unwrap();
    let b = cpu_64x4::create_loss(4, b"log_loss").unwrap();
    assert_eq!(a.output_count(), b.output_count());

    let scores = [0.1, -0.2, 0.3, 0.0].map(Simd64x4::splat);
    let target = Simd64x4::load(&[0.0, 1.0, 2.0, 3.0]);
    let mut ga = [GradientPair::default(); 4];
    let mut gb = [GradientPair::default(); 4];
    a.gradient_hessian(&scores, target, &mut ga);
    b.gradient_hessian(&scores, target, &mut gb);
    assert_eq!(ga, gb);

    drop(a);
    assert_eq!(b.name(), "log_loss");
}

#[test]
fn catalog_is_shared_across_threads() {
    let handles: Vec<_> = (0..4)
        .map(|_| std::thread::spawn(|| cpu_64::init() as *const _ as usize))
        .collect();
    let addrs: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(addrs.windows(2).all(|w| w[0] == w[1]));
}
