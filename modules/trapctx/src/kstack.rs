//! Placement of the trap frame at the top of a kernel stack.
//!
//! A trap taken from user space always lands at `kstack_top - size_of::<F>()`,
//! because the entry code derives the stack from the value it left in the scratch
//! register on the previous return to user space.

use memory_addr::VirtAddr;

/// Returns the address of the trap frame of type `F` taken from user space on the
/// kernel stack ending at `kstack_top`.
#[inline]
pub fn trapframe_addr<F>(kstack_top: VirtAddr) -> VirtAddr {
    VirtAddr::from(kstack_top.as_usize() - core::mem::size_of::<F>())
}

/// Writes the trap frame into the kernel stack.
///
/// # Safety
///
/// The caller must guarantee that the kernel stack ending at `kstack_top` is valid,
/// writable and suitably aligned for `F`.
pub unsafe fn write_trapframe_to_kstack<F: Copy>(kstack_top: VirtAddr, trap_frame: &F) {
    let trap_frame_ptr = trapframe_addr::<F>(kstack_top).as_usize() as *mut F;
    unsafe { trap_frame_ptr.write(*trap_frame) }
}

/// Reads the trap frame from the kernel stack.
///
/// # Safety
///
/// The caller must guarantee that the kernel stack ending at `kstack_top` is valid,
/// readable and holds an initialized `F` at its top.
pub unsafe fn read_trapframe_from_kstack<F: Copy>(kstack_top: VirtAddr) -> F {
    let trap_frame_ptr = trapframe_addr::<F>(kstack_top).as_usize() as *const F;
    unsafe { trap_frame_ptr.read() }
}
