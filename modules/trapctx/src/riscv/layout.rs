//! Byte offsets of the RISC-V trap frame.
//!
//! `trapentry` feeds these constants into its `trap.S` and `enter_uspace` as
//! `const` operands, so the assembly never spells out an offset of its own.

use core::mem::{offset_of, size_of};

use super::{GeneralRegisters, TrapFrame};
use crate::WORD;

/// Bytes reserved on the kernel stack by `SAVE_REGS` and released by `RESTORE_REGS`.
pub const TRAPFRAME_SIZE: usize = size_of::<TrapFrame>();

const REGS: usize = offset_of!(TrapFrame, regs);

/// Offset of register `xN`, `N` in `1..=31`.
pub const fn xreg(n: usize) -> usize {
    assert!(n >= 1 && n <= 31);
    REGS + (n - 1) * WORD
}

/// Offset of the saved `sp`.
pub const SP: usize = REGS + offset_of!(GeneralRegisters, sp);
/// Offset of the saved `gp`.
pub const GP: usize = REGS + offset_of!(GeneralRegisters, gp);
/// Offset of the saved `tp`.
pub const TP: usize = REGS + offset_of!(GeneralRegisters, tp);
/// Offset of the saved `sepc`.
pub const SEPC: usize = offset_of!(TrapFrame, sepc);
/// Offset of the saved `sstatus`.
pub const SSTATUS: usize = offset_of!(TrapFrame, sstatus);

// `PUSH_GENERAL_REGS` addresses `xN` as word `N - 1` of the frame.
const _: () = assert!(REGS == 0);
const _: () = assert!(REGS + offset_of!(GeneralRegisters, ra) == xreg(1));
const _: () = assert!(SP == xreg(2));
const _: () = assert!(GP == xreg(3));
const _: () = assert!(TP == xreg(4));
const _: () = assert!(REGS + offset_of!(GeneralRegisters, t0) == xreg(5));
const _: () = assert!(REGS + offset_of!(GeneralRegisters, s0) == xreg(8));
const _: () = assert!(REGS + offset_of!(GeneralRegisters, a0) == xreg(10));
const _: () = assert!(REGS + offset_of!(GeneralRegisters, a7) == xreg(17));
const _: () = assert!(REGS + offset_of!(GeneralRegisters, s2) == xreg(18));
const _: () = assert!(REGS + offset_of!(GeneralRegisters, s11) == xreg(27));
const _: () = assert!(REGS + offset_of!(GeneralRegisters, t3) == xreg(28));
const _: () = assert!(REGS + offset_of!(GeneralRegisters, t6) == xreg(31));
const _: () = assert!(SEPC == 31 * WORD);
const _: () = assert!(SSTATUS == SEPC + WORD);
// The psABI requires a 16-byte aligned `sp` at every call.
const _: () = assert!(TRAPFRAME_SIZE % 16 == 0);
const _: () = assert!(TRAPFRAME_SIZE == 34 * WORD);

/// Registers stored by `PUSH_GENERAL_REGS` in store order: every `xN` except `sp`,
/// `gp` and `tp`, which go through `sscratch` and the domain swap instead.
///
/// `POP_GENERAL_REGS` reloads the same list.
pub const PUSHED_REGS: [usize; 28] = {
    let mut regs = [0; 28];
    let mut n = 1;
    let mut i = 0;
    while n <= 31 {
        if n < 2 || n > 4 {
            regs[i] = n;
            i += 1;
        }
        n += 1;
    }
    regs
};
