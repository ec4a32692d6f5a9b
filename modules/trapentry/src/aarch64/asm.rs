//! Wrappers for the AArch64 system registers the trap path touches.

use aarch64_cpu::asm::barrier;
use aarch64_cpu::registers::{DAIF, VBAR_EL1};
use tock_registers::interfaces::{ReadWriteable, Readable, Writeable};

use super::is_valid_vector_base;

/// Unmasks IRQs on the current CPU.
#[inline]
pub fn enable_irqs() {
    DAIF.modify(DAIF::I::Unmasked);
}

/// Masks IRQs on the current CPU.
#[inline]
pub fn disable_irqs() {
    DAIF.modify(DAIF::I::Masked);
}

/// Whether the current CPU takes IRQs.
#[inline]
pub fn irqs_enabled() -> bool {
    !DAIF.matches_all(DAIF::I::Masked)
}

/// Writes the Vector Base Address Register of EL1 (`VBAR_EL1`).
///
/// # Safety
///
/// `vbar` must point to a complete vector table whose entries stay valid for as
/// long as exceptions can be taken.
pub unsafe fn write_trap_vector_base(vbar: usize) {
    assert!(
        is_valid_vector_base(vbar),
        "exception vector base {:#x} is not 2 KiB aligned",
        vbar
    );
    VBAR_EL1.set(vbar as _);
    barrier::isb(barrier::SY);
}

/// Reads `VBAR_EL1`.
#[inline]
pub fn read_trap_vector_base() -> usize {
    VBAR_EL1.get() as usize
}
