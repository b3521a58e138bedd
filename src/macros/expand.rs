/// Expands the loss registry for one hardware zone.
///
/// This macro is "Layer 3" of the architecture. It takes a zone module name,
/// the zone's packed value type, and the C symbol names for the zone's entry
/// points, and generates a module owning that zone's catalog. Statics cannot
/// be generic, so each expansion carries its own `OnceLock`; the C symbols
/// are spelled out per zone so no two zones export the same name.
#[macro_export]
macro_rules! expand_zone {
    ($zone:ident, $packed:ty, create = $create_sym:ident, free = $free_sym:ident) => {
        pub mod $zone {
            use std::ffi::{c_char, c_void};
            use std::sync::OnceLock;

            use $crate::error::{ErrorKind, LossResult};
            use $crate::loss::LossHandle;
            use $crate::registration::{LookupPolicy, LossCatalog, Registration};

            pub type Packed = $packed;

            pub const NAME: &str = stringify!($zone);

            static CATALOG: OnceLock<LossCatalog<Packed>> = OnceLock::new();

            /// Fresh registration list for this zone, in declaration order.
            pub fn register_losses() -> Vec<Registration<Packed>> {
                $crate::loss::register_losses::<Packed>()
            }

            /// Build the zone catalog on first call; later calls return the
            /// same instance.
            pub fn init() -> &'static LossCatalog<Packed> {
                CATALOG.get_or_init(|| {
                    let catalog = LossCatalog::new(register_losses(), LookupPolicy::default());
                    log::debug!(
                        "zone {}: registered {} losses ({} lanes)",
                        NAME,
                        catalog.len(),
                        <Packed as $crate::traits::PackedValue>::LANES
                    );
                    catalog
                })
            }

            /// A separate catalog with a non-default lookup policy.
            pub fn catalog_with_policy(policy: LookupPolicy) -> LossCatalog<Packed> {
                LossCatalog::new(register_losses(), policy)
            }

            pub fn create_loss(output_count: usize, name: &[u8]) -> LossResult<LossHandle<Packed>> {
                init().create(output_count, name)
            }

            /// Status-code form of [`create_loss`]. `out` is written only on
            /// success.
            pub fn create_loss_status(
                output_count: usize,
                name: &[u8],
                out: &mut Option<LossHandle<Packed>>,
            ) -> ErrorKind {
                match create_loss(output_count, name) {
                    Ok(handle) => {
                        *out = Some(handle);
                        ErrorKind::None
                    }
                    Err(e) => ErrorKind::from(&e),
                }
            }

            /// Construct a loss from the byte range `[name, name_end)`.
            ///
            /// # Safety
            /// `[name, name_end)` must be a readable byte range (or both
            /// pointers equal). `out` must point to a writable pointer.
            #[no_mangle]
            pub unsafe extern "C" fn $create_sym(
                output_count: usize,
                name: *const c_char,
                name_end: *const c_char,
                out: *mut *mut c_void,
            ) -> i32 {
                $crate::ffi::create_loss_raw(init(), output_count, name, name_end, out)
            }

            /// Release a handle returned by the matching create function.
            ///
            /// # Safety
            /// `handle` must come from this zone's create function, or be null.
            #[no_mangle]
            pub unsafe extern "C" fn $free_sym(handle: *mut c_void) {
                $crate::ffi::free_loss_raw::<Packed>(handle)
            }
        }
    };
}
