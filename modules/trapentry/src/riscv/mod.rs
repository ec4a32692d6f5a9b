//! RISC-V: the single trap vector at `trap_vector_base`.
//!
//! `sscratch` tells the vector where the trap came from: zero while the hart
//! runs kernel code, the top of the current task's kernel stack while it runs
//! user code.

#[macro_use]
#[cfg_attr(
    not(all(target_arch = "riscv64", target_os = "none")),
    allow(unused_macros)
)]
mod macros;

mod handler;
mod trap;

#[cfg(all(target_arch = "riscv64", target_os = "none"))]
pub mod asm;
#[cfg(all(target_arch = "riscv64", target_os = "none"))]
mod init;
#[cfg(test)]
mod exec;
#[cfg(feature = "uspace")]
mod uspace;

pub use trapctx::riscv::{EntryMode, TrapFrame};

pub use self::handler::{
    handle_breakpoint_or_panic, register_trap_handler, trap_handler, TrapCause, TrapHandler,
};
pub use self::trap::dispatch;

#[cfg(all(target_arch = "riscv64", target_os = "none"))]
pub use self::asm::{read_trap_vector_base, write_trap_vector_base};
#[cfg(all(target_arch = "riscv64", target_os = "none"))]
pub use self::init::init_trap;
#[cfg(feature = "uspace")]
pub use self::uspace::UspaceContext;

/// Alignment `stvec` requires in direct mode.
pub const TRAP_VECTOR_ALIGN: usize = 4;

/// Whether `base` can be written to `stvec`.
pub fn is_valid_trap_vector_base(base: usize) -> bool {
    base != 0 && memory_addr::is_aligned(base, TRAP_VECTOR_ALIGN)
}
