use riscv::interrupt::supervisor::{Exception, Interrupt};
use riscv::interrupt::Trap;

use super::{EntryMode, TrapFrame};
use crate::registry::HandlerSlot;

/// A decoded `scause`.
pub type TrapCause = Trap<Interrupt, Exception>;

/// The kernel side of RISC-V trap handling.
pub trait TrapHandler: Sync {
    /// Handles one trap.
    ///
    /// Runs on the kernel stack with `sstatus.SIE` clear. `mode` tells where the
    /// trap came from, `cause` is the decoded `scause` and `stval` the trap
    /// value. Whatever is left in `tf` is what `sret` resumes.
    fn handle_trap(&self, tf: &mut TrapFrame, mode: EntryMode, cause: TrapCause, stval: usize) {
        handle_breakpoint_or_panic(tf, mode, cause, stval);
    }
}

/// Skips over an `ebreak` and panics on everything else.
///
/// Interrupts panic too: nothing here acknowledges them, so returning would
/// take the same interrupt again right after `sret`.
pub fn handle_breakpoint_or_panic(
    tf: &mut TrapFrame,
    mode: EntryMode,
    cause: TrapCause,
    stval: usize,
) {
    match cause {
        Trap::Exception(Exception::Breakpoint) => {
            debug!("Exception(Breakpoint) @ {:#x} ", tf.sepc);
            // `c.ebreak`, the kernel is built with the C extension
            tf.sepc = tf.sepc.wrapping_add(2);
        }
        Trap::Interrupt(irq) => {
            panic!(
                "Unhandled interrupt {:?} @ {:#x} from {:?}, no trap handler registered:\n{:#x?}",
                irq, tf.sepc, mode, tf
            );
        }
        Trap::Exception(e) => {
            panic!(
                "Unhandled trap Exception({:?}) @ {:#x} from {:?}, stval={:#x}:\n{:#x?}",
                e, tf.sepc, mode, stval, tf
            );
        }
    }
}

struct DefaultHandler;

impl TrapHandler for DefaultHandler {}

static DEFAULT_HANDLER: DefaultHandler = DefaultHandler;
static TRAP_HANDLER: HandlerSlot<dyn TrapHandler> = HandlerSlot::new();

/// Installs the kernel's trap handler.
///
/// Only the first call takes effect; later ones return `false`.
pub fn register_trap_handler(handler: &'static dyn TrapHandler) -> bool {
    let installed = TRAP_HANDLER.install(handler);
    if installed {
        info!("riscv trap handler registered");
    } else {
        warn!("riscv trap handler already registered, ignoring");
    }
    installed
}

/// The registered trap handler, or the default one.
pub fn trap_handler() -> &'static dyn TrapHandler {
    TRAP_HANDLER.get().unwrap_or(&DEFAULT_HANDLER)
}
