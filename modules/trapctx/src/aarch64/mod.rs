//! AArch64 (EL1 kernel, EL0 user) trap frame.

mod frame;
mod kind;
pub mod layout;

#[cfg(any(test, feature = "sim"))]
pub mod sim;

pub use self::frame::TrapFrame;
pub use self::kind::{
    vector_entry, vector_offset, TrapKind, TrapSource, VECTOR_ENTRY_COUNT, VECTOR_ENTRY_SIZE,
};

/// Bits of the saved program status (`SPSR_EL1`) the trap path cares about.
pub mod spsr {
    /// Mode field, `M[3:0]`.
    pub const M_MASK: usize = 0b1111;
    /// EL0 with `SP_EL0`.
    pub const M_EL0T: usize = 0b0000;
    /// EL1 with `SP_EL0`.
    pub const M_EL1T: usize = 0b0100;
    /// EL1 with `SP_EL1`.
    pub const M_EL1H: usize = 0b0101;
    /// Execution state was AArch32.
    pub const NRW: usize = 1 << 4;
    /// FIQ mask.
    pub const F: usize = 1 << 6;
    /// IRQ mask.
    pub const I: usize = 1 << 7;
    /// SError mask.
    pub const A: usize = 1 << 8;
    /// Debug mask.
    pub const D: usize = 1 << 9;
    /// All four exception masks.
    pub const DAIF: usize = D | A | I | F;
}
