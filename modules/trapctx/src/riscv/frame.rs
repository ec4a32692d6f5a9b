use super::sstatus;

/// General registers of RISC-V, `x1` to `x31` in register number order.
#[allow(missing_docs)]
#[repr(C)]
#[derive(Debug, Default, Clone, Copy)]
pub struct GeneralRegisters {
    pub ra: usize,
    pub sp: usize,
    pub gp: usize, // only valid for user traps
    pub tp: usize, // only valid for user traps
    pub t0: usize,
    pub t1: usize,
    pub t2: usize,
    pub s0: usize,
    pub s1: usize,
    pub a0: usize,
    pub a1: usize,
    pub a2: usize,
    pub a3: usize,
    pub a4: usize,
    pub a5: usize,
    pub a6: usize,
    pub a7: usize,
    pub s2: usize,
    pub s3: usize,
    pub s4: usize,
    pub s5: usize,
    pub s6: usize,
    pub s7: usize,
    pub s8: usize,
    pub s9: usize,
    pub s10: usize,
    pub s11: usize,
    pub t3: usize,
    pub t4: usize,
    pub t5: usize,
    pub t6: usize,
}

/// Saved registers when a trap (interrupt or exception) occurs.
///
/// For traps from U-mode, `regs.gp` and `regs.tp` hold the user values while the
/// handler runs; the kernel's own `gp`/`tp` are live in the registers. Traps from
/// S-mode leave both slots untouched, the kernel pointers belong to the CPU.
#[repr(C)]
#[derive(Debug, Default, Clone, Copy)]
pub struct TrapFrame {
    /// All general registers.
    pub regs: GeneralRegisters,
    /// Supervisor Exception Program Counter.
    pub sepc: usize,
    /// Supervisor Status Register.
    pub sstatus: usize,
    /// Keeps the frame a multiple of 16 bytes so `sp` stays aligned.
    __pad: usize,
}

/// Which privilege level a trap was taken from.
///
/// Decided once by the vector from `sscratch`, before the stack is touched, and
/// passed down to the save path, the handler and the restore path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryMode {
    /// `sscratch` was zero: the trap interrupted kernel code.
    FromSupervisor,
    /// `sscratch` held the kernel stack top: the trap interrupted a user task.
    FromUser,
}

impl EntryMode {
    /// Decides the mode from the value `csrrw sp, sscratch, sp` left in `sp`.
    pub const fn from_scratch(swapped_sp: usize) -> Self {
        if swapped_sp == 0 {
            Self::FromSupervisor
        } else {
            Self::FromUser
        }
    }

    /// Whether the trap came from U-mode.
    pub const fn is_user(self) -> bool {
        matches!(self, Self::FromUser)
    }
}

impl From<bool> for EntryMode {
    fn from(from_user: bool) -> Self {
        if from_user {
            Self::FromUser
        } else {
            Self::FromSupervisor
        }
    }
}

impl TrapFrame {
    /// Creates a frame that enters U-mode at `entry` with `ustack_top`, interrupts
    /// enabled after `sret` and supervisor access to user memory permitted.
    pub fn new_user(entry: usize, ustack_top: usize, arg0: usize) -> Self {
        Self {
            regs: GeneralRegisters {
                a0: arg0,
                sp: ustack_top,
                ..Default::default()
            },
            sepc: entry,
            sstatus: sstatus::SPIE | sstatus::SUM,
            __pad: 0,
        }
    }

    /// Whether the trap was taken from U-mode, according to `sstatus.SPP`.
    pub const fn is_user(&self) -> bool {
        self.sstatus & sstatus::SPP == 0
    }

    /// Gets the 0th syscall argument.
    pub const fn arg0(&self) -> usize {
        self.regs.a0
    }

    /// Sets the 0th syscall argument.
    pub fn set_arg0(&mut self, a0: usize) {
        self.regs.a0 = a0;
    }

    /// Gets the 1st syscall argument.
    pub const fn arg1(&self) -> usize {
        self.regs.a1
    }

    /// Sets the 1st syscall argument.
    pub fn set_arg1(&mut self, a1: usize) {
        self.regs.a1 = a1;
    }

    /// Gets the 2nd syscall argument.
    pub const fn arg2(&self) -> usize {
        self.regs.a2
    }

    /// Sets the 2nd syscall argument.
    pub fn set_arg2(&mut self, a2: usize) {
        self.regs.a2 = a2;
    }

    /// Gets the 3rd syscall argument.
    pub const fn arg3(&self) -> usize {
        self.regs.a3
    }

    /// Gets the 4th syscall argument.
    pub const fn arg4(&self) -> usize {
        self.regs.a4
    }

    /// Gets the 5th syscall argument.
    pub const fn arg5(&self) -> usize {
        self.regs.a5
    }

    /// Gets all syscall arguments.
    pub const fn syscall_args(&self) -> [usize; 6] {
        [
            self.regs.a0,
            self.regs.a1,
            self.regs.a2,
            self.regs.a3,
            self.regs.a4,
            self.regs.a5,
        ]
    }

    /// Gets the syscall number (`a7`).
    pub const fn syscall_num(&self) -> usize {
        self.regs.a7
    }

    /// Gets the instruction pointer.
    pub const fn ip(&self) -> usize {
        self.sepc
    }

    /// Sets the instruction pointer.
    pub fn set_ip(&mut self, pc: usize) {
        self.sepc = pc;
    }

    /// Gets the stack pointer.
    pub const fn sp(&self) -> usize {
        self.regs.sp
    }

    /// Sets the stack pointer.
    pub fn set_sp(&mut self, sp: usize) {
        self.regs.sp = sp;
    }

    /// Gets the return value register.
    pub const fn retval(&self) -> usize {
        self.regs.a0
    }

    /// Sets the return value register.
    pub fn set_retval(&mut self, a0: usize) {
        self.regs.a0 = a0;
    }

    /// Gets the TLS pointer (`tp`).
    pub const fn tls(&self) -> usize {
        self.regs.tp
    }

    /// Sets the TLS pointer (`tp`).
    pub fn set_tls(&mut self, tls: usize) {
        self.regs.tp = tls;
    }

    /// Sets the return address.
    pub fn set_ra(&mut self, ra: usize) {
        self.regs.ra = ra;
    }

    /// Moves the pc back over the `ecall` that trapped, so it runs again.
    pub fn rewind_pc(&mut self) {
        self.sepc = self.sepc.wrapping_sub(4);
    }

    /// Moves the pc past the `ecall` that trapped.
    pub fn step_pc(&mut self) {
        self.sepc = self.sepc.wrapping_add(4);
    }
}
