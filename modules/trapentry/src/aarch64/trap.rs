use trapctx::aarch64::{TrapFrame, TrapKind, TrapSource};

use super::{Esr, TrapHandler};

#[cfg(all(target_arch = "aarch64", target_os = "none"))]
core::arch::global_asm!(
    include_asm_macros!(),
    include_str!("trap.S"),
    trapframe_size = const trapctx::aarch64::layout::TRAPFRAME_SIZE,
    lr = const trapctx::aarch64::layout::LR,
    elr = const trapctx::aarch64::layout::ELR,
    tpidr_el0 = const trapctx::aarch64::layout::TPIDR_EL0,
    entry_align = const trapctx::aarch64::VECTOR_ENTRY_SIZE.trailing_zeros(),
    table_align = const super::VECTOR_TABLE_ALIGN.trailing_zeros(),
);

/// Which handler a vector table entry calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `invalid_exception` with the entry's kind and source.
    Invalid,
    /// `handle_sync_exception`.
    Sync,
    /// `handle_irq_exception`.
    Irq,
}

/// The routing `exception_vector_base` implements.
///
/// Only synchronous exceptions and IRQs taken at EL1h or from EL0 (AArch64)
/// have a handler.
pub const fn route(kind: TrapKind, source: TrapSource) -> Route {
    match (kind, source) {
        (TrapKind::Synchronous, TrapSource::CurrentSpElx | TrapSource::LowerAArch64) => {
            Route::Sync
        }
        (TrapKind::Irq, TrapSource::CurrentSpElx | TrapSource::LowerAArch64) => Route::Irq,
        _ => Route::Invalid,
    }
}

/// Calls the `handler` method the vector entry for `kind` from `source` calls.
///
/// `esr` and `far` are only looked at for synchronous exceptions.
pub fn dispatch(
    handler: &dyn TrapHandler,
    tf: &mut TrapFrame,
    kind: TrapKind,
    source: TrapSource,
    esr: Esr,
    far: usize,
) {
    trace!("{:?} from {:?} @ {:#x}", kind, source, tf.elr);
    match route(kind, source) {
        Route::Invalid => handler.invalid_exception(tf, kind, source),
        Route::Sync => handler.handle_sync(tf, esr, far),
        Route::Irq => handler.handle_irq(tf),
    }
}

#[cfg(all(target_arch = "aarch64", target_os = "none"))]
mod entry {
    use aarch64_cpu::registers::{ESR_EL1, FAR_EL1};
    use tock_registers::interfaces::Readable;

    use super::super::trap_handler;
    use super::*;

    #[no_mangle]
    extern "C" fn invalid_exception(tf: &mut TrapFrame, kind: usize, source: usize) -> ! {
        match (TrapKind::try_from(kind), TrapSource::try_from(source)) {
            (Ok(kind), Ok(source)) => trap_handler().invalid_exception(tf, kind, source),
            _ => panic!(
                "Invalid exception of unknown kind {} from unknown source {}:\n{:#x?}",
                kind, source, tf
            ),
        }
    }

    #[no_mangle]
    extern "C" fn handle_sync_exception(tf: &mut TrapFrame) {
        let esr = ESR_EL1.extract();
        let far = FAR_EL1.get() as usize;
        trace!("sync exception @ {:#x}, ESR={:#x}", tf.elr, esr.get());
        trap_handler().handle_sync(tf, esr, far);
    }

    #[no_mangle]
    extern "C" fn handle_irq_exception(tf: &mut TrapFrame) {
        trace!("IRQ @ {:#x}", tf.elr);
        trap_handler().handle_irq(tf);
    }
}
