/// Defines the full packed-value operator set for a storage type and ISA.
///
/// "Layer 2" of the macro architecture: the operator bodies are written
/// once, parameterized by the ISA identifier that selects the
/// `simd_primitive!` branch. `$ty` must be a `#[repr(transparent)]` newtype
/// over the raw storage for `$isa`.
#[macro_export]
macro_rules! define_packed_ops {
    ($ty:ident, $isa:ident) => {
        impl From<f64> for $ty {
            #[inline(always)]
            fn from(v: f64) -> Self {
                $ty($crate::simd_primitive!($isa, f64, splat, v))
            }
        }

        impl From<f32> for $ty {
            #[inline(always)]
            fn from(v: f32) -> Self {
                $ty($crate::simd_primitive!($isa, f64, splat, f64::from(v)))
            }
        }

        impl From<i32> for $ty {
            #[inline(always)]
            fn from(v: i32) -> Self {
                $ty($crate::simd_primitive!($isa, f64, splat, f64::from(v)))
            }
        }

        impl std::ops::Add for $ty {
            type Output = Self;
            #[inline(always)]
            fn add(self, other: Self) -> Self {
                $ty($crate::simd_primitive!($isa, f64, add, self.0, other.0))
            }
        }

        impl std::ops::Sub for $ty {
            type Output = Self;
            #[inline(always)]
            fn sub(self, other: Self) -> Self {
                $ty($crate::simd_primitive!($isa, f64, sub, self.0, other.0))
            }
        }

        impl std::ops::Mul for $ty {
            type Output = Self;
            #[inline(always)]
            fn mul(self, other: Self) -> Self {
                $ty($crate::simd_primitive!($isa, f64, mul, self.0, other.0))
            }
        }

        impl std::ops::Div for $ty {
            type Output = Self;
            #[inline(always)]
            fn div(self, other: Self) -> Self {
                $ty($crate::simd_primitive!($isa, f64, div, self.0, other.0))
            }
        }

        impl std::ops::Neg for $ty {
            type Output = Self;
            #[inline(always)]
            fn neg(self) -> Self {
                $ty($crate::simd_primitive!($isa, f64, neg, self.0))
            }
        }

        impl $crate::traits::PackedValue for $ty {
            const LANES: usize = $crate::simd_primitive!($isa, f64, lanes);

            #[inline(always)]
            fn splat(v: f64) -> Self {
                $ty($crate::simd_primitive!($isa, f64, splat, v))
            }

            #[inline(always)]
            fn from_fn(mut f: impl FnMut(usize) -> f64) -> Self {
                $ty($crate::simd_primitive!($isa, f64, from_fn, &mut f))
            }

            #[inline(always)]
            fn load(src: &[f64]) -> Self {
                let bytes: &[u8] = bytemuck::cast_slice(&src[..Self::LANES]);
                bytemuck::pod_read_unaligned(bytes)
            }

            #[inline(always)]
            fn store(self, dst: &mut [f64]) {
                let bytes: &mut [u8] = bytemuck::cast_slice_mut(&mut dst[..Self::LANES]);
                bytes.copy_from_slice(bytemuck::bytes_of(&self));
            }

            #[inline(always)]
            fn lane(self, i: usize) -> f64 {
                $crate::simd_primitive!($isa, f64, extract, self.0, i)
            }

            #[inline(always)]
            fn is_any_equal(self, other: Self) -> bool {
                $crate::simd_primitive!($isa, f64, any_eq, self.0, other.0)
            }

            #[inline(always)]
            fn is_any_inf(self) -> bool {
                $crate::simd_primitive!($isa, f64, any_inf, self.0)
            }

            #[inline(always)]
            fn is_any_nan(self) -> bool {
                $crate::simd_primitive!($isa, f64, any_nan, self.0)
            }

            #[inline(always)]
            fn sqrt(self) -> Self {
                $ty($crate::simd_primitive!($isa, f64, sqrt, self.0))
            }

            #[inline(always)]
            fn exp(self) -> Self {
                $ty($crate::simd_primitive!($isa, f64, exp, self.0))
            }

            #[inline(always)]
            fn ln(self) -> Self {
                $ty($crate::simd_primitive!($isa, f64, ln, self.0))
            }

            #[inline(always)]
            fn abs(self) -> Self {
                $ty($crate::simd_primitive!($isa, f64, abs, self.0))
            }

            #[inline(always)]
            fn max(self, other: Self) -> Self {
                $ty($crate::simd_primitive!($isa, f64, max, self.0, other.0))
            }

            #[inline(always)]
            fn min(self, other: Self) -> Self {
                $ty($crate::simd_primitive!($isa, f64, min, self.0, other.0))
            }

            #[inline(always)]
            fn eq_mask(self, other: Self) -> Self {
                $ty($crate::simd_primitive!($isa, f64, eq_mask, self.0, other.0))
            }

            #[inline(always)]
            fn reduce_sum(self) -> f64 {
                $crate::simd_primitive!($isa, f64, reduce_sum, self.0)
            }
        }
    };
}
