/// Exception class of a vector table entry, in table order.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrapKind {
    Synchronous = 0,
    Irq = 1,
    Fiq = 2,
    SError = 3,
}

/// Where the exception was taken from, i.e. the vector table group, in table order.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrapSource {
    CurrentSpEl0 = 0,
    CurrentSpElx = 1,
    LowerAArch64 = 2,
    LowerAArch32 = 3,
}

/// Bytes between two consecutive vector table entries.
pub const VECTOR_ENTRY_SIZE: usize = 0x80;

/// Number of entries in the vector table.
pub const VECTOR_ENTRY_COUNT: usize = 16;

/// Offset from `VBAR_EL1` of the entry the hardware jumps to for `kind` taken
/// from `source`.
pub const fn vector_offset(kind: TrapKind, source: TrapSource) -> usize {
    (source as usize * TrapKind::ALL.len() + kind as usize) * VECTOR_ENTRY_SIZE
}

/// Inverse of [`vector_offset`].
pub fn vector_entry(offset: usize) -> Option<(TrapKind, TrapSource)> {
    if offset % VECTOR_ENTRY_SIZE != 0 {
        return None;
    }
    let index = offset / VECTOR_ENTRY_SIZE;
    let kind = TrapKind::try_from(index % TrapKind::ALL.len()).ok()?;
    let source = TrapSource::try_from(index / TrapKind::ALL.len()).ok()?;
    Some((kind, source))
}

impl TrapKind {
    /// Every kind, in vector table order.
    pub const ALL: [TrapKind; 4] = [Self::Synchronous, Self::Irq, Self::Fiq, Self::SError];
}

impl TrapSource {
    /// Every source, in vector table order.
    pub const ALL: [TrapSource; 4] = [
        Self::CurrentSpEl0,
        Self::CurrentSpElx,
        Self::LowerAArch64,
        Self::LowerAArch32,
    ];

    /// Whether the exception came from EL0.
    pub const fn is_lower(self) -> bool {
        matches!(self, Self::LowerAArch64 | Self::LowerAArch32)
    }
}

impl TryFrom<usize> for TrapKind {
    type Error = usize;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::ALL.get(value).copied().ok_or(value)
    }
}

impl TryFrom<usize> for TrapSource {
    type Error = usize;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::ALL.get(value).copied().ok_or(value)
    }
}
