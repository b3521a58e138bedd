/// Maps abstract f64 lane operations to concrete per-ISA expressions.
///
/// # Architecture
/// This macro is "Layer 1" of the macro architecture. Every packed value
/// type routes its arithmetic and predicates through here, so a new zone only
/// has to add one branch group keyed by its ISA identifier.
///
/// Raw operands are the packed type's storage: `f64` for `scalar`,
/// `[f64; 4]` for `x4`.
///
/// # Usage
/// ```ignore
/// simd_primitive!(scalar, f64, add, a, b) // -> a + b
/// simd_primitive!(x4, f64, add, a, b)     // -> [a[0] + b[0], ..]
/// ```
#[macro_export]
macro_rules! simd_primitive {
    // ========================================================================
    // Scalar (one lane)
    // ========================================================================

    (scalar, f64, lanes) => { 1 };
    (scalar, f64, zero) => { 0.0f64 };
    (scalar, f64, splat, $v:expr) => { $v };
    (scalar, f64, from_fn, $f:expr) => { ($f)(0usize) };
    (scalar, f64, extract, $a:expr, $i:expr) => {{
        assert!($i == 0, "lane index out of range");
        $a
    }};

    (scalar, f64, add, $a:expr, $b:expr) => { $a + $b };
    (scalar, f64, sub, $a:expr, $b:expr) => { $a - $b };
    (scalar, f64, mul, $a:expr, $b:expr) => { $a * $b };
    (scalar, f64, div, $a:expr, $b:expr) => { $a / $b };
    (scalar, f64, neg, $a:expr) => { -$a };
    (scalar, f64, max, $a:expr, $b:expr) => { $a.max($b) };
    (scalar, f64, min, $a:expr, $b:expr) => { $a.min($b) };
    (scalar, f64, abs, $a:expr) => { $a.abs() };
    (scalar, f64, sqrt, $a:expr) => { $a.sqrt() };
    (scalar, f64, exp, $a:expr) => { $a.exp() };
    (scalar, f64, ln, $a:expr) => { $a.ln() };
    (scalar, f64, eq_mask, $a:expr, $b:expr) => { if $a == $b { 1.0 } else { 0.0 } };
    (scalar, f64, reduce_sum, $a:expr) => { $a };

    // Horizontal predicates degrade to plain comparisons.
    (scalar, f64, any_eq, $a:expr, $b:expr) => { $a == $b };
    (scalar, f64, any_inf, $a:expr) => { $a.is_infinite() };
    (scalar, f64, any_nan, $a:expr) => { $a.is_nan() };

    // ========================================================================
    // Portable 4 x f64
    // ========================================================================

    (x4, f64, lanes) => { 4 };
    (x4, f64, zero) => { [0.0f64; 4] };
    (x4, f64, splat, $v:expr) => { [$v; 4] };
    (x4, f64, from_fn, $f:expr) => { core::array::from_fn::<f64, 4, _>($f) };
    (x4, f64, extract, $a:expr, $i:expr) => { $a[$i] };

    (x4, f64, add, $a:expr, $b:expr) => { $crate::simd_primitive!(@x4_zip, $a, $b, |x, y| x + y) };
    (x4, f64, sub, $a:expr, $b:expr) => { $crate::simd_primitive!(@x4_zip, $a, $b, |x, y| x - y) };
    (x4, f64, mul, $a:expr, $b:expr) => { $crate::simd_primitive!(@x4_zip, $a, $b, |x, y| x * y) };
    (x4, f64, div, $a:expr, $b:expr) => { $crate::simd_primitive!(@x4_zip, $a, $b, |x, y| x / y) };
    (x4, f64, max, $a:expr, $b:expr) => { $crate::simd_primitive!(@x4_zip, $a, $b, f64::max) };
    (x4, f64, min, $a:expr, $b:expr) => { $crate::simd_primitive!(@x4_zip, $a, $b, f64::min) };
    (x4, f64, eq_mask, $a:expr, $b:expr) => {
        $crate::simd_primitive!(@x4_zip, $a, $b, |x: f64, y: f64| if x == y { 1.0 } else { 0.0 })
    };
    (x4, f64, neg, $a:expr) => { $a.map(|x| -x) };
    (x4, f64, abs, $a:expr) => { $a.map(f64::abs) };
    (x4, f64, sqrt, $a:expr) => { $a.map(f64::sqrt) };
    (x4, f64, exp, $a:expr) => { $a.map(f64::exp) };
    (x4, f64, ln, $a:expr) => { $a.map(f64::ln) };
    (x4, f64, reduce_sum, $a:expr) => { ($a[0] + $a[1]) + ($a[2] + $a[3]) };

    // Horizontal predicates: true when ANY lane satisfies the condition.
    (x4, f64, any_eq, $a:expr, $b:expr) => {{
        let (a, b) = ($a, $b);
        a[0] == b[0] || a[1] == b[1] || a[2] == b[2] || a[3] == b[3]
    }};
    (x4, f64, any_inf, $a:expr) => { $a.iter().any(|x| x.is_infinite()) };
    (x4, f64, any_nan, $a:expr) => { $a.iter().any(|x| x.is_nan()) };

    (@x4_zip, $a:expr, $b:expr, $op:expr) => {{
        let (a, b) = ($a, $b);
        let op = $op;
        [op(a[0], b[0]), op(a[1], b[1]), op(a[2], b[2]), op(a[3], b[3])]
    }};
}
