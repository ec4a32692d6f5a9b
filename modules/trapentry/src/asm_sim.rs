//! A reader for the small GNU assembler subset the trap paths are written in.
//!
//! It expands `.macro`s, resolves `.if`/`.ifndef`/`.equ` and the `{name}`
//! operands `asm!` would substitute, and leaves a flat list of instructions plus
//! labels. The per-architecture `exec` modules run that list on the `trapctx`
//! register machines, so the tests exercise the same text the kernel is built
//! from.

use std::collections::{HashMap, VecDeque};

struct Macro {
    params: Vec<(String, Option<String>)>,
    body: Vec<String>,
}

/// Expanded assembly: one instruction or alignment directive per line.
pub struct Listing {
    pub lines: Vec<String>,
    labels: HashMap<String, usize>,
    symbols: HashMap<String, i64>,
}

/// `(parent active, this branch taken)`
type Cond = (bool, bool);

fn words(s: &str) -> Vec<String> {
    s.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

fn split_head(line: &str) -> (&str, &str) {
    match line.find(char::is_whitespace) {
        Some(i) => (&line[..i], line[i..].trim()),
        None => (line, ""),
    }
}

impl Listing {
    /// Concatenates `sources` and expands them, replacing each `{name}` with its
    /// value from `operands` first.
    pub fn assemble(sources: &[&str], operands: &[(&str, String)]) -> Self {
        let mut text = String::new();
        for src in sources {
            for line in src.lines() {
                text.push_str(line.split("//").next().unwrap_or(""));
                text.push('\n');
            }
        }
        for (name, value) in operands {
            text = text.replace(&format!("{{{}}}", name), value);
        }
        assert!(
            !text.contains('{') && !text.contains('}'),
            "operand left unsubstituted in:\n{}",
            text
        );

        let mut listing = Self {
            lines: Vec::new(),
            labels: HashMap::new(),
            symbols: HashMap::new(),
        };
        let mut macros: HashMap<String, Macro> = HashMap::new();
        let mut conds: Vec<Cond> = Vec::new();
        let mut queue: VecDeque<String> = text.lines().map(str::to_string).collect();

        while let Some(raw) = queue.pop_front() {
            let line = raw.split_whitespace().collect::<Vec<_>>().join(" ");
            if line.is_empty() {
                continue;
            }
            let active = conds.iter().all(|&(parent, taken)| parent && taken);
            let (head, rest) = split_head(&line);
            match head {
                ".if" | ".ifdef" | ".ifndef" => {
                    let taken = active
                        && match head {
                            ".if" => listing.condition(rest),
                            ".ifdef" => listing.symbols.contains_key(rest),
                            _ => !listing.symbols.contains_key(rest),
                        };
                    conds.push((active, taken));
                    continue;
                }
                ".else" => {
                    let top = conds.last_mut().expect(".else without .if");
                    top.1 = !top.1;
                    continue;
                }
                ".endif" => {
                    conds.pop().expect(".endif without .if");
                    continue;
                }
                _ if !active => continue,
                _ => {}
            }

            if let Some(label) = line.strip_suffix(':') {
                listing.labels.insert(label.to_string(), listing.lines.len());
                continue;
            }
            match head {
                ".macro" => {
                    let mut decl = words(rest).into_iter();
                    let name = decl.next().expect(".macro without a name");
                    let params = decl
                        .map(|p| match p.split_once('=') {
                            Some((p, default)) => (p.to_string(), Some(default.to_string())),
                            None => (p, None),
                        })
                        .collect();
                    let mut body = Vec::new();
                    loop {
                        let l = queue.pop_front().expect(".macro without .endm");
                        if l.trim() == ".endm" {
                            break;
                        }
                        body.push(l);
                    }
                    macros.insert(name, Macro { params, body });
                }
                ".equ" | ".set" => {
                    let (name, expr) = rest.split_once(',').expect(".equ without a value");
                    let value = listing.eval(expr);
                    listing.symbols.insert(name.trim().to_string(), value);
                }
                ".section" | ".text" | ".global" | ".globl" => {}
                _ if macros.contains_key(head) => {
                    let m = &macros[head];
                    let args = words(rest);
                    assert!(args.len() <= m.params.len(), "too many arguments: {}", line);
                    let mut params: Vec<(String, String)> = m
                        .params
                        .iter()
                        .enumerate()
                        .map(|(i, (p, default))| {
                            let arg = args.get(i).cloned().or_else(|| default.clone());
                            (p.clone(), arg.unwrap_or_else(|| panic!("missing \\{}: {}", p, line)))
                        })
                        .collect();
                    params.sort_by_key(|(p, _)| std::cmp::Reverse(p.len()));
                    for body_line in m.body.iter().rev() {
                        let mut l = body_line.replace("\\()", "");
                        for (p, arg) in &params {
                            l = l.replace(&format!("\\{}", p), arg);
                        }
                        queue.push_front(l);
                    }
                }
                _ => listing.lines.push(line.clone()),
            }
        }
        assert!(conds.is_empty(), "unterminated .if");
        listing
    }

    /// Index of the first line after `name:`.
    pub fn label(&self, name: &str) -> usize {
        *self
            .labels
            .get(name)
            .unwrap_or_else(|| panic!("no label {}", name))
    }

    fn condition(&self, expr: &str) -> bool {
        match expr.split_once("==") {
            Some((a, b)) => self.eval(a) == self.eval(b),
            None => self.eval(expr) != 0,
        }
    }

    fn atom(&self, atom: &str) -> i64 {
        if let Some(hex) = atom.strip_prefix("0x") {
            return i64::from_str_radix(hex, 16).unwrap_or_else(|_| panic!("bad number {}", atom));
        }
        atom.parse()
            .ok()
            .or_else(|| self.symbols.get(atom).copied())
            .unwrap_or_else(|| panic!("unknown symbol {}", atom))
    }

    /// Evaluates `+`, `-` and `*` over numbers and `.equ` symbols.
    pub fn eval(&self, expr: &str) -> i64 {
        let expr: String = expr.chars().filter(|c| !c.is_whitespace()).collect();
        let expr = expr.trim_start_matches('#');
        let mut total = 0;
        let mut sign = 1;
        let mut term = String::new();
        for c in expr.chars().chain(Some('+')) {
            match c {
                '+' | '-' if term.is_empty() => {
                    if c == '-' {
                        sign = -sign;
                    }
                }
                '+' | '-' => {
                    total += sign * term.split('*').map(|a| self.atom(a)).product::<i64>();
                    term.clear();
                    sign = if c == '-' { -1 } else { 1 };
                }
                _ => term.push(c),
            }
        }
        total
    }
}

/// Splits an instruction into its mnemonic and operands. Commas inside `[]` or
/// `()` do not separate operands.
pub fn decode(line: &str) -> (&str, Vec<&str>) {
    let (op, rest) = split_head(line);
    let mut operands = Vec::new();
    let mut depth = 0;
    let mut start = 0;
    for (i, c) in rest.char_indices() {
        match c {
            '[' | '(' => depth += 1,
            ']' | ')' => depth -= 1,
            ',' if depth == 0 => {
                operands.push(rest[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    if !rest.trim().is_empty() {
        operands.push(rest[start..].trim());
    }
    (op, operands)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_macros_conditionals_and_operands() {
        let src = r"
            .ifndef GUARD
            .equ GUARD, 1
            .equ WIDTH, 8
            .macro LOAD rd, off
                ld \rd, \off*WIDTH(sp)   // comment
            .endm
            .macro SAVE reg, from_user=0
                LOAD \reg, 1
            .if \from_user == 1
                LOAD tp, 2
            .else
                nop
            .endif
            .endm
            .endif
            .ifndef GUARD
                never
            .endif
        top:
            addi sp, sp, -{size}
            SAVE a0
        mid:
            SAVE t1, 1
        ";
        let listing = Listing::assemble(&[src], &[("size", "272".into())]);
        assert_eq!(
            listing.lines,
            [
                "addi sp, sp, -272",
                "ld a0, 1*WIDTH(sp)",
                "nop",
                "ld t1, 1*WIDTH(sp)",
                "ld tp, 2*WIDTH(sp)",
            ]
        );
        assert_eq!(listing.label("top"), 0);
        assert_eq!(listing.label("mid"), 3);
        assert_eq!(listing.eval("2*WIDTH"), 16);
        assert_eq!(listing.eval("-272 + 0x10"), -256);
        assert_eq!(listing.eval("#28 * 8"), 224);
    }

    #[test]
    fn test_decode_keeps_addressing_modes() {
        assert_eq!(
            decode("stp x0, x1, [sp, 2 * 8]"),
            ("stp", vec!["x0", "x1", "[sp, 2 * 8]"])
        );
        assert_eq!(decode("sd t0, 248(sp)"), ("sd", vec!["t0", "248(sp)"]));
        assert_eq!(decode("eret"), ("eret", vec![]));
    }

    #[test]
    #[should_panic(expected = "operand left unsubstituted")]
    fn test_missing_operand_is_an_error() {
        Listing::assemble(&["sub sp, sp, {trapframe_size}"], &[]);
    }
}
