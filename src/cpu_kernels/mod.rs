//! # CPU Zones
//!
//! Each hardware zone is a module produced by two macro layers:
//!
//! ## Layer 1: `simd_primitive!` (src/macros/simd_primitive.rs)
//! Maps abstract f64 lane ops to per-ISA expressions:
//! `simd_primitive!(x4, f64, add, a, b)`.
//!
//! ## Layer 2: `define_packed_ops!` (src/macros/operator_templates.rs)
//! Implements `PackedValue` and the arithmetic operators for a storage type.
//!
//! ## Layer 3: `expand_zone!` (src/macros/expand.rs)
//! Generates the zone module: catalog static, `init`, `create_loss`, and the
//! zone's C symbols.
//!
//! | Zone | Packed type | Lanes | C entry point |
//! |---|---|---|---|
//! | `cpu_64` | `Simd64None` | 1 | `gbm_create_loss_cpu_64` |
//! | `cpu_64x4` | `Simd64x4` | 4 | `gbm_create_loss_cpu_64x4` |

pub mod scalar;
pub mod x4;

use std::fmt;
use std::sync::OnceLock;

use crate::error::LossResult;
use crate::loss::LossHandle;

use self::scalar::Simd64None;
use self::x4::Simd64x4;

/// Environment variable that forces a zone by name.
pub const ZONE_ENV_VAR: &str = "GBM_ZONE";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IsaLevel {
    Scalar,
    Avx2,
    Avx512,
    Neon,
}

static ISA_LEVEL: OnceLock<IsaLevel> = OnceLock::new();

pub fn get_isa_level() -> IsaLevel {
    *ISA_LEVEL.get_or_init(detect_isa_features)
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
fn detect_isa_features() -> IsaLevel {
    if is_x86_feature_detected!("avx512f") {
        IsaLevel::Avx512
    } else if is_x86_feature_detected!("avx2") {
        IsaLevel::Avx2
    } else {
        IsaLevel::Scalar
    }
}

#[cfg(target_arch = "aarch64")]
fn detect_isa_features() -> IsaLevel {
    IsaLevel::Neon
}

#[cfg(not(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")))]
fn detect_isa_features() -> IsaLevel {
    IsaLevel::Scalar
}

/// A hardware zone: one packed value type and one loss catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Zone {
    Cpu64,
    Cpu64x4,
}

impl Zone {
    pub const ALL: [Zone; 2] = [Zone::Cpu64, Zone::Cpu64x4];

    pub fn name(self) -> &'static str {
        match self {
            Zone::Cpu64 => scalar::cpu_64::NAME,
            Zone::Cpu64x4 => x4::cpu_64x4::NAME,
        }
    }

    pub fn lanes(self) -> usize {
        use crate::traits::PackedValue;
        match self {
            Zone::Cpu64 => Simd64None::LANES,
            Zone::Cpu64x4 => Simd64x4::LANES,
        }
    }

    pub fn from_name(name: &str) -> Option<Zone> {
        Zone::ALL.into_iter().find(|z| z.name() == name)
    }

    /// Widest zone the ISA is expected to benefit from.
    pub fn for_isa(isa: IsaLevel) -> Zone {
        match isa {
            IsaLevel::Avx2 | IsaLevel::Avx512 => Zone::Cpu64x4,
            IsaLevel::Scalar | IsaLevel::Neon => Zone::Cpu64,
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolve a zone override value, falling back to ISA detection.
pub fn resolve_zone(override_value: Option<&str>) -> Zone {
    if let Some(value) = override_value {
        match Zone::from_name(value.trim()) {
            Some(zone) => return zone,
            None => log::warn!("{ZONE_ENV_VAR}={value:?} is not a known zone, using detection"),
        }
    }
    Zone::for_isa(get_isa_level())
}

/// Zone for this process, honoring `GBM_ZONE`.
pub fn select_zone() -> Zone {
    let value = std::env::var(ZONE_ENV_VAR).ok();
    resolve_zone(value.as_deref())
}

/// A loss from whichever zone was selected at runtime.
#[derive(Debug)]
pub enum AnyLoss {
    Cpu64(LossHandle<Simd64None>),
    Cpu64x4(LossHandle<Simd64x4>),
}

impl AnyLoss {
    pub fn zone(&self) -> Zone {
        match self {
            AnyLoss::Cpu64(_) => Zone::Cpu64,
            AnyLoss::Cpu64x4(_) => Zone::Cpu64x4,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AnyLoss::Cpu64(l) => l.name(),
            AnyLoss::Cpu64x4(l) => l.name(),
        }
    }

    pub fn output_count(&self) -> usize {
        match self {
            AnyLoss::Cpu64(l) => l.output_count(),
            AnyLoss::Cpu64x4(l) => l.output_count(),
        }
    }
}

/// Create a loss in `zone`.
pub fn create_loss(zone: Zone, output_count: usize, name: &[u8]) -> LossResult<AnyLoss> {
    match zone {
        Zone::Cpu64 => scalar::cpu_64::create_loss(output_count, name).map(AnyLoss::Cpu64),
        Zone::Cpu64x4 => x4::cpu_64x4::create_loss(output_count, name).map(AnyLoss::Cpu64x4),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LossError;

    #[test]
    fn zone_names_round_trip() {
        for zone in Zone::ALL {
            assert_eq!(Zone::from_name(zone.name()), Some(zone));
        }
        assert_eq!(Zone::Cpu64.to_string(), "cpu_64");
        assert_eq!(Zone::from_name("avx9"), None);
    }

    #[test]
    fn lane_counts() {
        assert_eq!(Zone::Cpu64.lanes(), 1);
        assert_eq!(Zone::Cpu64x4.lanes(), 4);
    }

    #[test]
    fn override_wins_over_detection() {
        assert_eq!(resolve_zone(Some("cpu_64")), Zone::Cpu64);
        assert_eq!(resolve_zone(Some(" cpu_64x4 ")), Zone::Cpu64x4);
        assert_eq!(resolve_zone(Some("bogus")), Zone::for_isa(get_isa_level()));
        assert_eq!(resolve_zone(None), Zone::for_isa(get_isa_level()));
    }

    #[test]
    fn isa_level_is_stable() {
        assert_eq!(get_isa_level(), get_isa_level());
    }

    #[test]
    fn create_in_each_zone() {
        for zone in Zone::ALL {
            let loss = create_loss(zone, 1, b"squared_error").unwrap();
            assert_eq!(loss.zone(), zone);
            assert_eq!(loss.name(), "squared_error");
            assert_eq!(loss.output_count(), 1);
        }
        assert_eq!(
            create_loss(Zone::Cpu64x4, 1, b"nope").unwrap_err(),
            LossError::UnknownLoss("nope".into())
        );
    }

    #[test]
    fn zones_own_distinct_catalogs() {
        let a = scalar::cpu_64::init() as *const _ as *const u8;
        let b = x4::cpu_64x4::init() as *const _ as *const u8;
        assert_ne!(a, b);
    }
}
