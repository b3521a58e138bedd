use bytemuck::{Pod, Zeroable};

/// One f64 lane. The baseline zone compiled for every target.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct Simd64None(f64);

crate::define_packed_ops!(Simd64None, scalar);

// Expand the scalar f64 zone
crate::expand_zone!(
    cpu_64,
    super::Simd64None,
    create = gbm_create_loss_cpu_64,
    free = gbm_free_loss_cpu_64
);
