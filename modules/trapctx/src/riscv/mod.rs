//! RISC-V 64 (S-mode kernel, U-mode user) trap frame.

mod frame;
pub mod layout;

#[cfg(any(test, feature = "sim"))]
pub mod sim;

pub use self::frame::{EntryMode, GeneralRegisters, TrapFrame};

/// Bits of `sstatus` the trap path cares about.
pub mod sstatus {
    /// Supervisor interrupt enable.
    pub const SIE: usize = 1 << 1;
    /// Previous `SIE`, restored by `sret`.
    pub const SPIE: usize = 1 << 5;
    /// Previous privilege: set when the trap came from S-mode.
    pub const SPP: usize = 1 << 8;
    /// Permit supervisor access to user memory.
    pub const SUM: usize = 1 << 18;
}
