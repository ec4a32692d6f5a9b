//! The entry of trap handling: the vector tables, the save/restore of the
//! interrupted context and the hand-off to the kernel's trap handlers.
//!
//! The trap frames are defined in `trapctx`; this crate only executes the
//! protocol around them. Every offset the assembly uses comes from
//! `trapctx::{aarch64,riscv}::layout`, so the frame layout can change without
//! touching `trap.S`.
//!
//! The kernel plugs in its logic by implementing the per-architecture
//! `TrapHandler` trait and calling `register_trap_handler` once during boot.
//! Until then a default handler is used, which panics on anything it cannot
//! survive.
//!
//! # Cargo Features
//!
//! - `uspace`: `UspaceContext`, the first entry into user space. Enabled by default.
#![cfg_attr(not(test), no_std)]

#[macro_use]
extern crate log;

mod registry;

#[cfg(test)]
mod asm_sim;

pub mod aarch64;
pub mod riscv;

cfg_if::cfg_if! {
    if #[cfg(target_arch = "aarch64")] {
        pub use self::aarch64::{register_trap_handler, TrapHandler};
        #[cfg(target_os = "none")]
        pub use self::aarch64::{init_trap, read_trap_vector_base};
        #[cfg(feature = "uspace")]
        pub use self::aarch64::UspaceContext;
    } else if #[cfg(target_arch = "riscv64")] {
        pub use self::riscv::{register_trap_handler, TrapCause, TrapHandler};
        #[cfg(target_os = "none")]
        pub use self::riscv::{init_trap, read_trap_vector_base};
        #[cfg(feature = "uspace")]
        pub use self::riscv::UspaceContext;
    }
}
