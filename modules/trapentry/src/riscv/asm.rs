//! Wrappers for the RISC-V CSRs the trap path touches.

use riscv::register::mtvec::TrapMode;
use riscv::register::sstatus;
use riscv::register::stvec::{self, Stvec};

use super::is_valid_trap_vector_base;

/// Sets `sstatus.SIE`.
#[inline]
pub fn enable_irqs() {
    unsafe { sstatus::set_sie() }
}

/// Clears `sstatus.SIE`.
#[inline]
pub fn disable_irqs() {
    unsafe { sstatus::clear_sie() }
}

/// Whether `sstatus.SIE` is set.
#[inline]
pub fn irqs_enabled() -> bool {
    sstatus::read().sie()
}

/// Writes the Supervisor Trap Vector Base Address Register (`stvec`), direct mode.
///
/// # Safety
///
/// `base` must point to code that follows the `sscratch` protocol of
/// `trap_vector_base`.
pub unsafe fn write_trap_vector_base(base: usize) {
    assert!(
        is_valid_trap_vector_base(base),
        "trap vector base {:#x} is not 4-byte aligned",
        base
    );
    stvec::write(Stvec::new(base, TrapMode::Direct));
}

/// Reads the base address in `stvec`.
#[inline]
pub fn read_trap_vector_base() -> usize {
    stvec::read().address()
}
