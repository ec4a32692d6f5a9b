use riscv::interrupt::Trap;

use super::{EntryMode, TrapCause, TrapFrame, TrapHandler};

#[cfg(all(target_arch = "riscv64", target_os = "none"))]
core::arch::global_asm!(
    include_asm_macros!(),
    include_str!("trap.S"),
    trapframe_size = const trapctx::riscv::layout::TRAPFRAME_SIZE,
    sepc = const trapctx::riscv::layout::SEPC,
    sstatus = const trapctx::riscv::layout::SSTATUS,
    sp_slot = const trapctx::riscv::layout::SP,
    gp_slot = const trapctx::riscv::layout::GP,
    tp_slot = const trapctx::riscv::layout::TP,
    vector_align = const super::TRAP_VECTOR_ALIGN,
);

/// Decodes the raw `scause` and hands one saved trap to `handler`.
///
/// Panics on a cause the standard S-mode encoding does not define.
pub fn dispatch(
    handler: &dyn TrapHandler,
    tf: &mut TrapFrame,
    mode: EntryMode,
    raw: Trap<usize, usize>,
    stval: usize,
) {
    let cause: TrapCause = match raw.try_into() {
        Ok(cause) => cause,
        Err(_) => panic!(
            "Unknown trap {:?} @ {:#x} from {:?}, stval={:#x}:\n{:#x?}",
            raw, tf.sepc, mode, stval, tf
        ),
    };
    trace!("{:?} from {:?} @ {:#x}", cause, mode, tf.sepc);
    handler.handle_trap(tf, mode, cause, stval);
}

#[cfg(all(target_arch = "riscv64", target_os = "none"))]
#[no_mangle]
extern "C" fn riscv_trap_handler(tf: &mut TrapFrame, from_user: bool) {
    use riscv::register::{scause, stval};

    let cause = scause::read().cause();
    // read before anything can take another trap
    let stval = stval::read();
    dispatch(super::trap_handler(), tf, EntryMode::from(from_user), cause, stval);
}
