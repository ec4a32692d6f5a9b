//! Runs `trap.S` and `uspace.S` on [`trapctx::riscv::sim::Cpu`].

use trapctx::riscv::{layout, sim::Cpu};
use trapctx::SimStack;

use crate::asm_sim::{decode, Listing};

/// Registers `enter_uspace` gets its `in(reg)` operands in. Any but `sp`, `gp`,
/// `tp` and `t0`/`t1` would do.
pub const USPACE_TF: usize = 10;
pub const USPACE_KSTACK_TOP: usize = 11;
pub const USPACE_KERNEL_TRAP_ADDR: usize = 12;

/// `trap.S` with the operands `global_asm!` passes.
pub fn trap_listing() -> Listing {
    Listing::assemble(
        &[include_asm_macros!(), include_str!("trap.S")],
        &[
            ("trapframe_size", layout::TRAPFRAME_SIZE.to_string()),
            ("sepc", layout::SEPC.to_string()),
            ("sstatus", layout::SSTATUS.to_string()),
            ("sp_slot", layout::SP.to_string()),
            ("gp_slot", layout::GP.to_string()),
            ("tp_slot", layout::TP.to_string()),
            ("vector_align", super::TRAP_VECTOR_ALIGN.to_string()),
        ],
    )
}

/// `uspace.S` with the operands `enter_uspace` passes.
pub fn uspace_listing() -> Listing {
    Listing::assemble(
        &[include_asm_macros!(), include_str!("uspace.S")],
        &[
            ("tf", format!("x{}", USPACE_TF)),
            ("kstack_top", format!("x{}", USPACE_KSTACK_TOP)),
            ("kernel_trap_addr", format!("x{}", USPACE_KERNEL_TRAP_ADDR)),
            ("gp_slot", layout::GP.to_string()),
            ("tp_slot", layout::TP.to_string()),
            ("sepc", layout::SEPC.to_string()),
            ("sstatus", layout::SSTATUS.to_string()),
            ("sp_slot", layout::SP.to_string()),
        ],
    )
}

/// Register number of an ABI or `xN` name.
pub fn reg(name: &str) -> usize {
    let abi = match name {
        "zero" => Some(0),
        "ra" => Some(1),
        "sp" => Some(2),
        "gp" => Some(3),
        "tp" => Some(4),
        "fp" => Some(8),
        _ => None,
    };
    if let Some(n) = abi {
        return n;
    }
    let (class, index) = name.split_at(1);
    match (class, index.parse::<usize>()) {
        ("x", Ok(n @ 0..=31)) => n,
        ("t", Ok(i @ 0..=2)) => 5 + i,
        ("t", Ok(i @ 3..=6)) => 25 + i,
        ("s", Ok(i @ 0..=1)) => 8 + i,
        ("s", Ok(i @ 2..=11)) => 16 + i,
        ("a", Ok(i @ 0..=7)) => 10 + i,
        _ => panic!("unknown register {}", name),
    }
}

fn csr<'a>(cpu: &'a mut Cpu, name: &str) -> &'a mut usize {
    match name {
        "sepc" => &mut cpu.sepc,
        "sstatus" => &mut cpu.sstatus,
        "sscratch" => &mut cpu.sscratch,
        _ => panic!("unknown CSR {}", name),
    }
}

fn set(cpu: &mut Cpu, rd: usize, value: usize) {
    if rd != 0 {
        cpu.x[rd] = value;
    }
}

/// `offset(base)`.
pub fn address(listing: &Listing, cpu: &Cpu, operand: &str) -> usize {
    let (offset, base) = operand
        .strip_suffix(')')
        .and_then(|o| o.rsplit_once('('))
        .unwrap_or_else(|| panic!("not a memory operand: {}", operand));
    let offset = if offset.is_empty() {
        0
    } else {
        listing.eval(offset)
    };
    cpu.x[reg(base)].wrapping_add_signed(offset as isize)
}

/// Executes from `line` until `sret`, which it performs on `cpu`.
///
/// Every `call` calls `on_call` with the target symbol, then falls through to
/// the next line, as if the callee had returned.
pub fn run(
    listing: &Listing,
    cpu: &mut Cpu,
    stack: &mut SimStack,
    mut line: usize,
    on_call: &mut dyn FnMut(&str, &mut Cpu, &mut SimStack),
) {
    for _ in 0..1000 {
        let text = &listing.lines[line];
        let (op, args) = decode(text);
        line += 1;
        match op {
            ".p2align" | ".balign" => {}
            "addi" => {
                let v = cpu.x[reg(args[1])].wrapping_add_signed(listing.eval(args[2]) as isize);
                set(cpu, reg(args[0]), v);
            }
            "mv" => {
                let v = cpu.x[reg(args[1])];
                set(cpu, reg(args[0]), v);
            }
            "li" => set(cpu, reg(args[0]), listing.eval(args[1]) as usize),
            "csrrw" => {
                let new = cpu.x[reg(args[2])];
                let old = core::mem::replace(csr(cpu, args[1]), new);
                set(cpu, reg(args[0]), old);
            }
            "csrr" => {
                let v = *csr(cpu, args[1]);
                set(cpu, reg(args[0]), v);
            }
            "csrw" => {
                let v = cpu.x[reg(args[1])];
                *csr(cpu, args[0]) = v;
            }
            "sd" => {
                let addr = address(listing, cpu, args[1]);
                stack.write_word(addr, cpu.x[reg(args[0])]);
            }
            "ld" => {
                let addr = address(listing, cpu, args[1]);
                let v = stack.read_word(addr);
                set(cpu, reg(args[0]), v);
            }
            "bnez" => {
                if cpu.x[reg(args[0])] != 0 {
                    line = listing.label(args[1]);
                }
            }
            "j" => line = listing.label(args[0]),
            "call" => {
                cpu.x[1] = line;
                on_call(args[0], cpu, stack);
            }
            "sret" => {
                cpu.sret();
                return;
            }
            _ => panic!("unsupported instruction: {}", text),
        }
    }
    panic!("no sret reached");
}
