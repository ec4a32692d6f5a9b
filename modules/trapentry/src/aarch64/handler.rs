use aarch64_cpu::registers::ESR_EL1;
use tock_registers::LocalRegisterCopy;

use super::{TrapFrame, TrapKind, TrapSource};
use crate::registry::HandlerSlot;

/// A copy of `ESR_EL1` taken when a synchronous exception was entered.
pub type Esr = LocalRegisterCopy<u64, ESR_EL1::Register>;

/// The kernel side of AArch64 trap handling.
///
/// Every method runs on the kernel stack with all of DAIF masked, right after
/// the interrupted context was saved to `tf`. Whatever the method leaves in
/// `tf` is what `eret` resumes.
pub trait TrapHandler: Sync {
    /// An exception the vector table routes to no handler: anything taken with
    /// `SP_EL0` selected at EL1, any FIQ or SError, and anything from AArch32.
    ///
    /// `kind` and `source` name the entry that fired.
    fn invalid_exception(&self, tf: &mut TrapFrame, kind: TrapKind, source: TrapSource) -> ! {
        panic!("Invalid exception {:?} from {:?}:\n{:#x?}", kind, source, tf);
    }

    /// A synchronous exception from EL1h or from EL0 (AArch64).
    ///
    /// `far` is `FAR_EL1`, meaningful for aborts and alignment faults.
    fn handle_sync(&self, tf: &mut TrapFrame, esr: Esr, far: usize) {
        handle_breakpoint_or_panic(tf, esr, far);
    }

    /// An IRQ from EL1h or from EL0 (AArch64).
    ///
    /// Nothing acknowledges the interrupt here, so returning would take it
    /// again on the next `eret`.
    fn handle_irq(&self, tf: &mut TrapFrame) {
        panic!(
            "Unhandled IRQ @ {:#x}, no trap handler registered:\n{:#x?}",
            tf.elr, tf
        );
    }
}

/// Skips over a `brk` and resumes, panics on every other exception class.
pub fn handle_breakpoint_or_panic(tf: &mut TrapFrame, esr: Esr, far: usize) {
    match esr.read_as_enum(ESR_EL1::EC) {
        Some(ESR_EL1::EC::Value::Brk64) => {
            debug!("BRK #{:#x} @ {:#x} ", esr.read(ESR_EL1::ISS), tf.elr);
            tf.step_pc();
        }
        Some(ESR_EL1::EC::Value::DataAbortCurrentEL)
        | Some(ESR_EL1::EC::Value::InstrAbortCurrentEL)
        | Some(ESR_EL1::EC::Value::DataAbortLowerEL)
        | Some(ESR_EL1::EC::Value::InstrAbortLowerEL) => {
            panic!(
                "Page fault @ {:#x}, FAR={:#x}, ISS={:#x}:\n{:#x?}",
                tf.elr,
                far,
                esr.read(ESR_EL1::ISS),
                tf,
            );
        }
        _ => {
            panic!(
                "Unhandled synchronous exception @ {:#x}: ESR={:#x} (EC {:#08b}, ISS {:#x}):\n{:#x?}",
                tf.elr,
                esr.get(),
                esr.read(ESR_EL1::EC),
                esr.read(ESR_EL1::ISS),
                tf,
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
        info!("aarch64 trap handler registered");
    } else {
        warn!("aarch64 trap handler already registered, ignoring");
    }
    installed
}

/// The registered trap handler, or the default one.
pub fn trap_handler() -> &'static dyn TrapHandler {
    TRAP_HANDLER.get().unwrap_or(&DEFAULT_HANDLER)
}
