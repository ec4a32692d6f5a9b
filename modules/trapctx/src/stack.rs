//! Kernel stack memory used by the register machines.

use alloc::vec;
use alloc::vec::Vec;

use crate::WORD;

/// A 16-byte aligned block of memory standing in for a kernel stack.
///
/// Addresses handed out by this type are real host addresses, so a frame written
/// word by word through the layout offsets can be reinterpreted as the Rust
/// `TrapFrame` it is supposed to be.
pub struct SimStack {
    mem: Vec<u128>,
}

impl SimStack {
    /// Allocates a zeroed stack of `size` bytes, rounded up to 16 bytes.
    pub fn new(size: usize) -> Self {
        Self {
            mem: vec![0; size.div_ceil(16)],
        }
    }

    /// Lowest address of the stack.
    pub fn base(&self) -> usize {
        self.mem.as_ptr() as usize
    }

    /// One past the highest address of the stack, i.e. the initial stack pointer.
    pub fn top(&self) -> usize {
        self.base() + self.mem.len() * 16
    }

    fn offset_of(&self, addr: usize) -> usize {
        assert!(
            addr >= self.base() && addr + WORD <= self.top(),
            "stack access {:#x} outside [{:#x}, {:#x})",
            addr,
            self.base(),
            self.top()
        );
        assert_eq!(addr % WORD, 0, "misaligned stack access {:#x}", addr);
        addr - self.base()
    }

    /// Loads the word at `addr`.
    pub fn read_word(&self, addr: usize) -> usize {
        let off = self.offset_of(addr);
        unsafe { self.mem.as_ptr().cast::<u8>().add(off).cast::<usize>().read() }
    }

    /// Stores `value` at `addr`.
    pub fn write_word(&mut self, addr: usize, value: usize) {
        let off = self.offset_of(addr);
        unsafe {
            self.mem
                .as_mut_ptr()
                .cast::<u8>()
                .add(off)
                .cast::<usize>()
                .write(value)
        }
    }

    /// Views the memory at `addr` as a `F`, the way a handler sees its frame.
    ///
    /// # Safety
    ///
    /// Every bit pattern must be a valid `F` (true for the trap frames, which only
    /// hold machine words).
    pub unsafe fn view_mut<F>(&mut self, addr: usize) -> &mut F {
        let size = core::mem::size_of::<F>();
        assert!(addr >= self.base() && addr + size <= self.top());
        assert_eq!(addr % core::mem::align_of::<F>(), 0);
        let off = addr - self.base();
        unsafe { &mut *self.mem.as_mut_ptr().cast::<u8>().add(off).cast::<F>() }
    }
}
