use bytemuck::{Pod, Zeroable};

/// Four f64 lanes in portable code. Lanes are independent; the `is_any_*`
/// predicates reduce across all four.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct Simd64x4([f64; 4]);

crate::define_packed_ops!(Simd64x4, x4);

// Expand the four-lane f64 zone
crate::expand_zone!(
    cpu_64x4,
    super::Simd64x4,
    create = gbm_create_loss_cpu_64x4,
    free = gbm_free_loss_cpu_64x4
);

#[cfg(test)]
mod tests;
