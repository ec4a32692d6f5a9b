//! RISC-V register machine.
//!
//! Models what the hart does around the trap path: taking a trap into S-mode
//! and `sret`. `trapentry`'s tests run the instructions of its `trap.S` on top of
//! this state.

use super::sstatus;

/// Privilege level the hart is running at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Privilege {
    User,
    Supervisor,
}

/// Architectural state visible to the trap path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cpu {
    /// `x0..=x31`; `x0` stays zero.
    pub x: [usize; 32],
    pub pc: usize,
    pub sepc: usize,
    pub sstatus: usize,
    pub sscratch: usize,
    pub stvec: usize,
    pub mode: Privilege,
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    /// A hart in S-mode with interrupts disabled and `sscratch` cleared, as left by
    /// `init_trap`.
    pub const fn new() -> Self {
        Self {
            x: [0; 32],
            pc: 0,
            sepc: 0,
            sstatus: 0,
            sscratch: 0,
            stvec: 0,
            mode: Privilege::Supervisor,
        }
    }

    /// Takes a trap into S-mode and jumps to `stvec`.
    pub fn take_trap(&mut self) {
        self.sepc = self.pc;
        let mut status = self.sstatus & !(sstatus::SPP | sstatus::SPIE | sstatus::SIE);
        if self.mode == Privilege::Supervisor {
            status |= sstatus::SPP;
        }
        if self.sstatus & sstatus::SIE != 0 {
            status |= sstatus::SPIE;
        }
        self.sstatus = status;
        self.mode = Privilege::Supervisor;
        self.pc = self.stvec;
    }

    /// Trashes what a psABI call may trash (`ra`, `t0..t6`, `a0..a7`).
    pub fn clobber_caller_saved(&mut self, junk: usize) {
        for n in [1, 5, 6, 7, 10, 11, 12, 13, 14, 15, 16, 17, 28, 29, 30, 31] {
            self.x[n] = junk ^ n;
        }
    }

    /// `sret`: resumes at `sepc` in the privilege level recorded in `SPP`.
    pub fn sret(&mut self) {
        self.pc = self.sepc;
        self.mode = if self.sstatus & sstatus::SPP != 0 {
            Privilege::Supervisor
        } else {
            Privilege::User
        };
        let mut status = self.sstatus & !(sstatus::SIE | sstatus::SPP);
        if self.sstatus & sstatus::SPIE != 0 {
            status |= sstatus::SIE;
        }
        self.sstatus = status | sstatus::SPIE;
    }
}
