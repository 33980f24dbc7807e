//! Three-address instructions.
//!
//! Only three shapes are emitted:
//!
//! ```text
//! t0 = i * 32        Binary
//! x = t9             Copy
//! t3 = b [t2]        Load (indexed)
//! ```

use smartstring::alias::String;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    Mul,
    Div,
    Add,
    Sub,
}

impl BinOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Add => "+",
            BinOp::Sub => "-",
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instr {
    /// `dest = lhs op rhs`
    Binary {
        dest: String,
        lhs: String,
        op: BinOp,
        rhs: String,
    },
    /// `dest = src`
    Copy { dest: String, src: String },
    /// `dest = base [offset]`
    Load {
        dest: String,
        base: String,
        offset: String,
    },
}

impl Instr {
    pub fn dest(&self) -> &str {
        match self {
            Instr::Binary { dest, .. } | Instr::Copy { dest, .. } | Instr::Load { dest, .. } => {
                dest.as_str()
            }
        }
    }
}

impl fmt::Display for Instr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instr::Binary { dest, lhs, op, rhs } => write!(f, "{} = {} {} {}", dest, lhs, op, rhs),
            Instr::Copy { dest, src } => write!(f, "{} = {}", dest, src),
            Instr::Load { dest, base, offset } => write!(f, "{} = {} [{}]", dest, base, offset),
        }
    }
}

/// Renders instructions one per line, each terminated by `\n`.
pub fn render(instrs: &[Instr]) -> std::string::String {
    let mut out = std::string::String::new();
    for instr in instrs {
        out.push_str(&instr.to_string());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instruction_shapes() {
        let bin = Instr::Binary {
            dest: "t0".into(),
            lhs: "i".into(),
            op: BinOp::Mul,
            rhs: "32".into(),
        };
        let copy = Instr::Copy {
            dest: "x".into(),
            src: "t9".into(),
        };
        let load = Instr::Load {
            dest: "t3".into(),
            base: "b".into(),
            offset: "t2".into(),
        };
        assert_eq!(bin.to_string(), "t0 = i * 32");
        assert_eq!(copy.to_string(), "x = t9");
        assert_eq!(load.to_string(), "t3 = b [t2]");
        assert_eq!(load.dest(), "t3");
        assert_eq!(render(&[bin, copy]), "t0 = i * 32\nx = t9\n");
        assert_eq!(render(&[]), "");
    }

    #[test]
    fn operator_symbols() {
        let ops: Vec<_> = [BinOp::Mul, BinOp::Div, BinOp::Add, BinOp::Sub]
            .iter()
            .map(|op| op.to_string())
            .collect();
        assert_eq!(ops, ["*", "/", "+", "-"]);
    }
}
