use super::spsr;

/// Saved registers when a trap (exception) occurs.
#[repr(C)]
#[derive(Debug, Default, Clone, Copy)]
pub struct TrapFrame {
    /// General-purpose registers (X0..X30).
    pub r: [usize; 31],
    /// Stack pointer of the interrupted context (`SP_EL0`).
    pub usp: usize,
    /// Exception Link Register (`ELR_EL1`).
    pub elr: usize,
    /// Saved Process Status Register (`SPSR_EL1`).
    pub spsr: usize,
    /// Saved `TPIDR_EL0`.
    pub tpidr_el0: usize,
    /// Keeps the frame a multiple of 16 bytes so `sp` stays aligned.
    __pad: usize,
}

impl TrapFrame {
    /// Creates a frame that enters EL0 at `entry` with `user_sp`, all exceptions
    /// unmasked.
    pub fn new_user(entry: usize, user_sp: usize, arg0: usize) -> Self {
        let mut tf = Self {
            usp: user_sp,
            elr: entry,
            spsr: spsr::M_EL0T,
            ..Default::default()
        };
        tf.r[0] = arg0;
        tf
    }

    /// Whether the trap was taken from EL0.
    pub const fn is_user(&self) -> bool {
        self.spsr & spsr::M_MASK == spsr::M_EL0T
    }

    /// Gets the 0th syscall argument.
    pub const fn arg0(&self) -> usize {
        self.r[0]
    }

    /// Gets the 1st syscall argument.
    pub const fn arg1(&self) -> usize {
        self.r[1]
    }

    /// Gets the 2nd syscall argument.
    pub const fn arg2(&self) -> usize {
        self.r[2]
    }

    /// Gets the 3rd syscall argument.
    pub const fn arg3(&self) -> usize {
        self.r[3]
    }

    /// Gets the 4th syscall argument.
    pub const fn arg4(&self) -> usize {
        self.r[4]
    }

    /// Gets the 5th syscall argument.
    pub const fn arg5(&self) -> usize {
        self.r[5]
    }

    /// Gets all syscall arguments.
    pub const fn syscall_args(&self) -> [usize; 6] {
        [self.r[0], self.r[1], self.r[2], self.r[3], self.r[4], self.r[5]]
    }

    /// Gets the syscall number (`x8`).
    pub const fn syscall_num(&self) -> usize {
        self.r[8]
    }

    /// Sets the 0th syscall argument.
    pub fn set_arg0(&mut self, param: usize) {
        self.r[0] = param;
    }

    /// Sets the 1st syscall argument.
    pub fn set_arg1(&mut self, param: usize) {
        self.r[1] = param;
    }

    /// Sets the 2nd syscall argument.
    pub fn set_arg2(&mut self, param: usize) {
        self.r[2] = param;
    }

    /// Gets the return value register.
    pub const fn retval(&self) -> usize {
        self.r[0]
    }

    /// Sets the return value register.
    pub fn set_retval(&mut self, ret: usize) {
        self.r[0] = ret;
    }

    /// Gets the instruction pointer.
    pub const fn ip(&self) -> usize {
        self.elr
    }

    /// Sets the instruction pointer.
    pub fn set_ip(&mut self, pc: usize) {
        self.elr = pc;
    }

    /// Gets the stack pointer.
    pub const fn sp(&self) -> usize {
        self.usp
    }

    /// Sets the stack pointer.
    pub fn set_sp(&mut self, sp: usize) {
        self.usp = sp;
    }

    /// Gets the TLS area.
    pub const fn tls(&self) -> usize {
        self.tpidr_el0
    }

    /// Sets the TLS area.
    pub fn set_tls(&mut self, tls: usize) {
        self.tpidr_el0 = tls;
    }

    /// Sets the return address.
    pub fn set_ra(&mut self, ra: usize) {
        self.r[30] = ra;
    }

    /// Moves the pc back over the `svc` that trapped, so it runs again.
    pub fn rewind_pc(&mut self) {
        self.elr = self.elr.wrapping_sub(4);
    }

    /// Moves the pc past the instruction that trapped.
    pub fn step_pc(&mut self) {
        self.elr = self.elr.wrapping_add(4);
    }
}
