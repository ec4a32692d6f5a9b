use core::ops::{Deref, DerefMut};

use memory_addr::VirtAddr;
use trapctx::riscv::TrapFrame;

/// Context to enter user space.
#[derive(Debug, Default, Clone, Copy)]
pub struct UspaceContext(TrapFrame);

impl UspaceContext {
    /// Creates a context that starts at `entry` on the user stack
    /// `ustack_top`, with `arg0` in `a0`.
    pub fn new(entry: usize, ustack_top: VirtAddr, arg0: usize) -> Self {
        Self(TrapFrame::new_user(entry, ustack_top.as_usize(), arg0))
    }

    /// Creates a context that resumes the state saved in `tf`.
    pub const fn from(tf: &TrapFrame) -> Self {
        Self(*tf)
    }

    /// Enters user space.
    ///
    /// Clears `sstatus.SIE` and sets `sscratch` to `kstack_top`, so the next
    /// trap from U-mode saves its frame at the top of the kernel stack. Parks the
    /// current (kernel) `gp` and `tp` in that frame's slots for the trap path to
    /// swap back in, then loads every register from the context and executes
    /// `sret`.
    ///
    /// # Safety
    ///
    /// The context must describe a U-mode state (`sstatus.SPP == 0`) and
    /// `kstack_top` must be the top of the current task's kernel stack.
    #[cfg(all(target_arch = "riscv64", target_os = "none"))]
    pub unsafe fn enter_uspace(&self, kstack_top: VirtAddr) -> ! {
        use trapctx::riscv::layout;

        let kernel_trap_addr = trapctx::trapframe_addr::<TrapFrame>(kstack_top).as_usize();
        super::asm::disable_irqs();
        core::arch::asm!(
            include_asm_macros!(),
            include_str!("uspace.S"),
            tf = in(reg) &self.0,
            kstack_top = in(reg) kstack_top.as_usize(),
            kernel_trap_addr = in(reg) kernel_trap_addr,
            gp_slot = const layout::GP,
            tp_slot = const layout::TP,
            sepc = const layout::SEPC,
            sstatus = const layout::SSTATUS,
            sp_slot = const layout::SP,
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
