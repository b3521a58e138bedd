//! Macro system for gbm-kernels.
//!
//! Follows a strict 3-layer architecture:
//! 1. simd_primitive! (Lane Primitives)
//! 2. define_packed_ops! (Packed Value Operators)
//! 3. expand_zone! (Per-Zone Registry Expansion)

#[macro_use]
pub mod simd_primitive;
#[macro_use]
pub mod operator_templates;
#[macro_use]
pub mod expand;
