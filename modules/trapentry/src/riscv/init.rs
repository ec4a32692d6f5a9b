use riscv::register::sscratch;

use super::asm::write_trap_vector_base;

extern "C" {
    fn trap_vector_base();
}

/// Marks the hart as running kernel code (`sscratch = 0`) and points `stvec`
/// at `trap_vector_base`. Must run on every hart before it enables interrupts.
pub fn init_trap() {
    let base = trap_vector_base as *const () as usize;
    unsafe {
        sscratch::write(0);
        write_trap_vector_base(base);
    }
    info!("trap vector base set to {:#x}", base);
}
