//! Byte offsets of the AArch64 trap frame.
//!
//! `trapentry` feeds these constants into its `trap.S` as `const` operands. The
//! general registers are stored as pairs by one assembler macro at `N * 8`, which
//! the asserts below tie to `X0`.

use core::mem::{offset_of, size_of};

use super::TrapFrame;
use crate::WORD;

/// Bytes reserved on the kernel stack by `SAVE_REGS` and released by `RESTORE_REGS`.
pub const TRAPFRAME_SIZE: usize = size_of::<TrapFrame>();

/// Offset of `x0`. `xN` is stored at `X0 + N * WORD`.
pub const X0: usize = offset_of!(TrapFrame, r);
/// Offset of the link register `x30`.
pub const LR: usize = X0 + 30 * WORD;
/// Offset of the saved `SP_EL0`.
pub const USP: usize = offset_of!(TrapFrame, usp);
/// Offset of the saved `ELR_EL1`.
pub const ELR: usize = offset_of!(TrapFrame, elr);
/// Offset of the saved `SPSR_EL1`.
pub const SPSR: usize = offset_of!(TrapFrame, spsr);
/// Offset of the saved `TPIDR_EL0`.
pub const TPIDR_EL0: usize = offset_of!(TrapFrame, tpidr_el0);

// The assembly stores x0..x29 as pairs at `N * 8` from the frame base.
const _: () = assert!(X0 == 0);
const _: () = assert!(WORD == 8);
// `stp x30, x9` with x9 = SP_EL0.
const _: () = assert!(USP == LR + WORD);
// `stp x10, x11` with ELR and SPSR.
const _: () = assert!(SPSR == ELR + WORD);
// SP must stay 16-byte aligned at EL1.
const _: () = assert!(TRAPFRAME_SIZE % 16 == 0);
const _: () = assert!(TRAPFRAME_SIZE == 36 * WORD);

/// A machine register that has a home in the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// General-purpose register `xN`, `N` in `0..=30`.
    X(u8),
    SpEl0,
    ElrEl1,
    SpsrEl1,
    TpidrEl0,
}

/// Number of registers captured in a frame.
pub const SLOT_COUNT: usize = 35;

/// Every register captured by `SAVE_REGS` and reloaded by `RESTORE_REGS`, with
/// its byte offset.
pub const SLOTS: [(Slot, usize); SLOT_COUNT] = {
    let mut slots = [(Slot::ElrEl1, 0); SLOT_COUNT];
    let mut i = 0;
    while i < 31 {
        slots[i] = (Slot::X(i as u8), X0 + i * WORD);
        i += 1;
    }
    slots[31] = (Slot::SpEl0, USP);
    slots[32] = (Slot::ElrEl1, ELR);
    slots[33] = (Slot::SpsrEl1, SPSR);
    slots[34] = (Slot::TpidrEl0, TPIDR_EL0);
    slots
};
