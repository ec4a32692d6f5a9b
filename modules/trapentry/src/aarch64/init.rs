use super::asm::write_trap_vector_base;

extern "C" {
    fn exception_vector_base();
}

/// Points `VBAR_EL1` at `exception_vector_base`. Must run on every CPU before
/// it unmasks exceptions.
pub fn init_trap() {
    let base = exception_vector_base as *const () as usize;
    unsafe { write_trap_vector_base(base) };
    info!("exception vector base set to {:#x}", base);
}
