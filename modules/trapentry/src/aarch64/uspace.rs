use core::ops::{Deref, DerefMut};

use memory_addr::VirtAddr;
use trapctx::aarch64::TrapFrame;

/// Context to enter user space.
///
/// A [`TrapFrame`] describing the user state `eret` lands in.
#[derive(Debug, Default, Clone, Copy)]
pub struct UspaceContext(TrapFrame);

impl UspaceContext {
    /// Creates a context that starts at `entry` on the user stack
    /// `ustack_top`, with `arg0` in `x0`.
    pub fn new(entry: usize, ustack_top: VirtAddr, arg0: usize) -> Self {
        Self(TrapFrame::new_user(entry, ustack_top.as_usize(), arg0))
    }

    /// Creates a context that resumes the state saved in `tf`, e.g. a child
    /// returning from `clone`.
    pub const fn from(tf: &TrapFrame) -> Self {
        Self(*tf)
    }

    /// Enters user space.
    ///
    /// Masks IRQs, resets `SP_EL1` to `kstack_top` so the next exception from
    /// EL0 saves its frame at the top of the kernel stack, loads every register
    /// from the context and executes `eret`.
    ///
    /// # Safety
    ///
    /// The context must describe an EL0 state (`SPSR_EL1.M == EL0t`) and
    /// `kstack_top` must be the top of the current task's kernel stack.
    #[cfg(all(target_arch = "aarch64", target_os = "none"))]
    pub unsafe fn enter_uspace(&self, kstack_top: VirtAddr) -> ! {
        use trapctx::aarch64::layout;

        super::asm::disable_irqs();
        core::arch::asm!(
            include_asm_macros!(),
            include_str!("uspace.S"),
            in("x0") &self.0,
            in("x1") kstack_top.as_usize(),
            tpidr_el0 = const layout::TPIDR_EL0,
            lr = const layout::LR,
            elr = const layout::ELR,
            options(noreturn),
        )
    }
}

impl Deref for UspaceContext {
    type Target = TrapFrame;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for UspaceContext {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}
