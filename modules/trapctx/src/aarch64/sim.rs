//! AArch64 register machine.
//!
//! Models what the hardware does around the trap path: taking an exception to
//! EL1 and `eret`. `trapentry`'s tests run the instructions of its `trap.S` on
//! top of this state.

use super::layout::Slot;
use super::{spsr, vector_offset, TrapKind, TrapSource};

/// Architectural state visible to the trap path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cpu {
    pub x: [usize; 31],
    pub sp_el0: usize,
    pub sp_el1: usize,
    pub elr_el1: usize,
    pub spsr_el1: usize,
    pub tpidr_el0: usize,
    pub vbar_el1: usize,
    pub pc: usize,
    /// Current `PSTATE`, in `SPSR` format.
    pub pstate: usize,
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    /// A core running at EL1h with all exceptions masked, as after reset.
    pub const fn new() -> Self {
        Self {
            x: [0; 31],
            sp_el0: 0,
            sp_el1: 0,
            elr_el1: 0,
            spsr_el1: 0,
            tpidr_el0: 0,
            vbar_el1: 0,
            pc: 0,
            pstate: spsr::M_EL1H | spsr::DAIF,
        }
    }

    /// The stack pointer selected by the current `PSTATE`.
    pub fn sp(&self) -> usize {
        if self.pstate & spsr::M_MASK == spsr::M_EL1H {
            self.sp_el1
        } else {
            self.sp_el0
        }
    }

    /// Which vector table group an exception taken right now would use.
    pub fn trap_source(&self) -> TrapSource {
        if self.pstate & spsr::NRW != 0 {
            return TrapSource::LowerAArch32;
        }
        match self.pstate & spsr::M_MASK {
            spsr::M_EL0T => TrapSource::LowerAArch64,
            spsr::M_EL1T => TrapSource::CurrentSpEl0,
            _ => TrapSource::CurrentSpElx,
        }
    }

    /// Takes an exception of `kind` to EL1.
    ///
    /// Records the return state in `ELR_EL1`/`SPSR_EL1`, masks all exceptions,
    /// switches to `SP_EL1` and jumps into the vector table.
    pub fn take_exception(&mut self, kind: TrapKind) -> TrapSource {
        let source = self.trap_source();
        self.elr_el1 = self.pc;
        self.spsr_el1 = self.pstate;
        self.pstate = spsr::M_EL1H | spsr::DAIF;
        self.pc = self.vbar_el1 + vector_offset(kind, source);
        source
    }

    /// Reads the register that owns `slot`.
    pub fn read(&self, slot: Slot) -> usize {
        match slot {
            Slot::X(n) => self.x[n as usize],
            Slot::SpEl0 => self.sp_el0,
            Slot::ElrEl1 => self.elr_el1,
            Slot::SpsrEl1 => self.spsr_el1,
            Slot::TpidrEl0 => self.tpidr_el0,
        }
    }

    /// Writes the register that owns `slot`.
    pub fn write(&mut self, slot: Slot, value: usize) {
        match slot {
            Slot::X(n) => self.x[n as usize] = value,
            Slot::SpEl0 => self.sp_el0 = value,
            Slot::ElrEl1 => self.elr_el1 = value,
            Slot::SpsrEl1 => self.spsr_el1 = value,
            Slot::TpidrEl0 => self.tpidr_el0 = value,
        }
    }

    /// Trashes what an AAPCS64 call may trash (`x0..=x18`, `x30`).
    pub fn clobber_caller_saved(&mut self, junk: usize) {
        for (i, r) in self.x[..=18].iter_mut().enumerate() {
            *r = junk ^ i;
        }
        self.x[30] = !junk;
    }

    /// `eret`: resumes at `ELR_EL1` with `PSTATE` from `SPSR_EL1`.
    pub fn eret(&mut self) {
        self.pc = self.elr_el1;
        self.pstate = self.spsr_el1;
    }
}
