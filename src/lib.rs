//! gbm-kernels: per-hardware-zone numeric core for gradient boosting.
//!
//! This crate provides:
//! - **Packed Values**: `PackedValue` lane groups with IEEE-754 f64 arithmetic
//!   and any-lane NaN/Inf/equality predicates
//! - **Zones**: one module per hardware target, each with its own loss catalog
//!   and its own C entry points (`cpu_64`, `cpu_64x4`)
//! - **Loss Registry**: name-keyed factories with embedded parameters
//!   (`pseudo_huber:delta=0.5`) and an explicit lookup policy
//! - **Batch Evaluation**: packed gradient/hessian evaluation over f64 slices,
//!   optionally fanned out with rayon
//!
//! # Quick Start
//!
//! ```ignore
//! use gbm_kernels::cpu_64;
//!
//! let loss = cpu_64::create_loss(1, b"squared_error")?;
//! assert_eq!(loss.name(), "squared_error");
//! ```

#[macro_use]
pub mod macros;

pub mod batch;
pub mod cpu_kernels;
pub mod error;
pub mod ffi;
pub mod loss;
pub mod params;
pub mod registration;
pub mod traits;

pub use cpu_kernels::scalar::{cpu_64, Simd64None};
pub use cpu_kernels::x4::{cpu_64x4, Simd64x4};
pub use cpu_kernels::{
    create_loss, get_isa_level, resolve_zone, select_zone, AnyLoss, IsaLevel, Zone, ZONE_ENV_VAR,
};

pub use batch::{
    compute_gradients, evaluate_loss, par_compute_gradients, BatchConfig, LossSummary,
    NumericHealth,
};
pub use error::{ErrorKind, LossError, LossResult};
pub use loss::{
    register_losses, LogLoss, Loss, LossHandle, LossTask, PoissonDeviance, PseudoHuber,
    SquaredError, TweedieDeviance,
};
pub use params::LossParams;
pub use registration::{
    register, CaseMatching, LookupPolicy, LossCatalog, LossConfig, Precedence, RegistrableLoss,
    Registration,
};
pub use traits::{GradientPair, PackedValue};
