//! Trap frames saved on the kernel stack when a trap (interrupt or exception) occurs.
//!
//! The frames are defined here and the entry code lives in `trapentry`, so that code
//! which only inspects or mutates a trap frame (syscall dispatch, signal delivery,
//! the scheduler) does not depend on the assembly.
//!
//! Each architecture module exposes its `TrapFrame` together with a `layout`
//! module. The byte offsets in `layout` are derived from the Rust struct and are the
//! only offsets the assembly in `trapentry` uses, so the save path, the restore path
//! and every Rust user of the frame agree on one layout.
//!
//! Both architectures are always compiled, so the layouts can be checked on any host.
//! The one matching the target is re-exported as [`arch`].
//!
//! # Cargo Features
//!
//! - `sim`: a software register machine per architecture (the hardware side of
//!   taking a trap and returning from it) plus stack memory to run against. The
//!   tests of `trapentry` execute its assembly on top of it.
#![cfg_attr(not(test), no_std)]

#[cfg(any(test, feature = "sim"))]
extern crate alloc;

pub mod aarch64;
pub mod riscv;

mod kstack;

#[cfg(any(test, feature = "sim"))]
mod stack;

pub use kstack::{read_trapframe_from_kstack, trapframe_addr, write_trapframe_to_kstack};

#[cfg(any(test, feature = "sim"))]
pub use stack::SimStack;

/// Size in bytes of one saved machine word.
pub const WORD: usize = core::mem::size_of::<usize>();

cfg_if::cfg_if! {
    if #[cfg(target_arch = "aarch64")] {
        pub use self::aarch64 as arch;
        pub use self::aarch64::TrapFrame;
    } else if #[cfg(target_arch = "riscv64")] {
        pub use self::riscv as arch;
        pub use self::riscv::TrapFrame;
    }
}
