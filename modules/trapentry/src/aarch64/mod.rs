//! AArch64: the 16-entry vector table at `exception_vector_base`.

#[macro_use]
#[cfg_attr(
    not(all(target_arch = "aarch64", target_os = "none")),
    allow(unused_macros)
)]
mod macros;

mod handler;
mod trap;

#[cfg(all(target_arch = "aarch64", target_os = "none"))]
pub mod asm;
#[cfg(all(target_arch = "aarch64", target_os = "none"))]
mod init;
#[cfg(feature = "uspace")]
mod uspace;

pub use trapctx::aarch64::{TrapFrame, TrapKind, TrapSource};

pub use self::handler::{
    handle_breakpoint_or_panic, register_trap_handler, trap_handler, Esr, TrapHandler,
};
pub use self::trap::{dispatch, route, Route};

#[cfg(all(target_arch = "aarch64", target_os = "none"))]
pub use self::asm::{read_trap_vector_base, write_trap_vector_base};
#[cfg(all(target_arch = "aarch64", target_os = "none"))]
pub use self::init::init_trap;
#[cfg(feature = "uspace")]
pub use self::uspace::UspaceContext;

use trapctx::aarch64::{VECTOR_ENTRY_COUNT, VECTOR_ENTRY_SIZE};

/// Alignment `VBAR_EL1` requires (2 KiB): the size of the whole table.
pub const VECTOR_TABLE_ALIGN: usize = VECTOR_ENTRY_COUNT * VECTOR_ENTRY_SIZE;

const _: () = assert!(VECTOR_TABLE_ALIGN == 0x800);

/// Whether `vbar` can be written to `VBAR_EL1`.
pub fn is_valid_vector_base(vbar: usize) -> bool {
    vbar != 0 && memory_addr::is_aligned(vbar, VECTOR_TABLE_ALIGN)
}
