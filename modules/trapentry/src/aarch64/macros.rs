/// Assembler macros shared by `trap.S` and `uspace.S`.
///
/// `PUSH_GPRS`/`POP_GPRS` store and load `x0..=x29` as pairs, `xN` at `N * 8`
/// from the base register, matching `trapctx::aarch64::layout::X0`. The pairs
/// are listed once, highest first, so a `POP_GPRS x0` overwrites its base last.
macro_rules! include_asm_macros {
    () => {
        r"
        .ifndef TRAPENTRY_GPRS
        .equ TRAPENTRY_GPRS, 1

        .macro PUSH_POP_GPRS, op, base
            \op x28, x29, [\base, 28 * 8]
            \op x26, x27, [\base, 26 * 8]
            \op x24, x25, [\base, 24 * 8]
            \op x22, x23, [\base, 22 * 8]
            \op x20, x21, [\base, 20 * 8]
            \op x18, x19, [\base, 18 * 8]
            \op x16, x17, [\base, 16 * 8]
            \op x14, x15, [\base, 14 * 8]
            \op x12, x13, [\base, 12 * 8]
            \op x10, x11, [\base, 10 * 8]
            \op x8, x9, [\base, 8 * 8]
            \op x6, x7, [\base, 6 * 8]
            \op x4, x5, [\base, 4 * 8]
            \op x2, x3, [\base, 2 * 8]
            \op x0, x1, [\base]
        .endm

        .macro PUSH_GPRS, base
            PUSH_POP_GPRS stp, \base
        .endm
        .macro POP_GPRS, base
            PUSH_POP_GPRS ldp, \base
        .endm

        .endif
        "
    };
}
