//! MIPS32 Assembly Instruction Definitions
//!
//! This module defines the subset of the MIPS32 instruction set and register
//! file that the translator emits.

use mtac_common::SymbolType;
use std::fmt;

/// Register classes handed out by the register tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegClass {
    /// `$t0`-`$t9`
    General,
    /// `$f0`-`$f31`
    Float,
}

impl RegClass {
    /// Number of registers of this class available on the hardware
    pub fn capacity(&self) -> usize {
        match self {
            RegClass::General => 10,
            RegClass::Float => 32,
        }
    }

    /// Register `index` of this class
    pub fn reg(&self, index: u8) -> Reg {
        match self {
            RegClass::General => Reg::T(index),
            RegClass::Float => Reg::F(index),
        }
    }

    /// The class a value of the given type is loaded into
    pub fn for_type(ty: SymbolType) -> Self {
        if ty.is_float() {
            RegClass::Float
        } else {
            RegClass::General
        }
    }
}

impl fmt::Display for RegClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegClass::General => write!(f, "general"),
            RegClass::Float => write!(f, "float"),
        }
    }
}

/// MIPS32 registers used by generated code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reg {
    /// Hard-wired zero
    Zero,
    /// Syscall number and return value
    V0,
    /// First argument
    A0,
    /// Temporary `$tN`
    T(u8),
    /// Floating-point `$fN`
    F(u8),
}

impl Reg {
    /// The allocatable class this register belongs to, if any
    pub fn class(&self) -> Option<RegClass> {
        match self {
            Reg::T(_) => Some(RegClass::General),
            Reg::F(_) => Some(RegClass::Float),
            Reg::Zero | Reg::V0 | Reg::A0 => None,
        }
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Reg::F(_))
    }
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reg::Zero => write!(f, "$zero"),
            Reg::V0 => write!(f, "$v0"),
            Reg::A0 => write!(f, "$a0"),
            Reg::T(n) => write!(f, "$t{}", n),
            Reg::F(n) => write!(f, "$f{}", n),
        }
    }
}

/// MIPS32 Assembly Instructions
///
/// Memory operands are symbolic: loads and stores address a label in the
/// data section. Immediates are kept as written in the 3AC so that
/// character literals such as `'a'` reach the assembler untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum AsmInst {
    // Arithmetic
    Add(Reg, Reg, Reg),           // rd = rs + rt
    AddS(Reg, Reg, Reg),          // fd = fs + ft (single precision)
    AddI(Reg, Reg, i32),          // rd = rs + imm
    Sub(Reg, Reg, Reg),           // rd = rs - rt
    Mult(Reg, Reg),               // HI:LO = rs * rt
    Div(Reg, Reg),                // LO = rs / rt, HI = rs % rt
    Mflo(Reg),                    // rd = LO

    // Comparison
    Sgt(Reg, Reg, Reg),           // rd = rs > rt
    Slt(Reg, Reg, Reg),           // rd = rs < rt
    Seq(Reg, Reg, Reg),           // rd = rs == rt
    Sne(Reg, Reg, Reg),           // rd = rs != rt

    // Logical
    And(Reg, Reg, Reg),           // rd = rs & rt
    Or(Reg, Reg, Reg),            // rd = rs | rt

    // Immediates and moves
    Li(Reg, String),              // rd = immediate
    LiS(Reg, String),             // fd = float immediate
    Move(Reg, Reg),               // rd = rs
    MovS(Reg, Reg),               // fd = fs
    Mfc1(Reg, Reg),               // rd = raw bits of fs

    // Memory
    Lw(Reg, String),              // load word
    Lb(Reg, String),              // load byte
    La(Reg, String),              // load address
    Ls(Reg, String),              // load single
    Sw(Reg, String),              // store word
    Sb(Reg, String),              // store byte
    Ss(Reg, String),              // store single

    // Control flow
    Beqz(Reg, String),            // branch if rs == 0
    J(String),                    // unconditional jump
    Syscall,

    // Assembly pseudo-instructions
    Label(String),                // label line, kept verbatim (including the colon)
    Comment(String),              // `#` comment
    Raw(String),                  // unrecognized 3AC passed through unchanged
}

impl AsmInst {
    /// Load a variable of the given type into `rd`
    pub fn load_for(ty: SymbolType, rd: Reg, symbol: &str) -> AsmInst {
        let symbol = symbol.to_string();
        match ty {
            SymbolType::Int => AsmInst::Lw(rd, symbol),
            SymbolType::Float => AsmInst::Ls(rd, symbol),
            SymbolType::Char => AsmInst::Lb(rd, symbol),
            SymbolType::Str | SymbolType::Array => AsmInst::La(rd, symbol),
        }
    }

    /// Store `rs` into a variable of the given type
    pub fn store_for(ty: SymbolType, rs: Reg, symbol: &str) -> AsmInst {
        let symbol = symbol.to_string();
        match ty {
            SymbolType::Float => AsmInst::Ss(rs, symbol),
            SymbolType::Char => AsmInst::Sb(rs, symbol),
            SymbolType::Int | SymbolType::Str | SymbolType::Array => AsmInst::Sw(rs, symbol),
        }
    }

    /// Whether this line executes at runtime (labels and comments do not)
    pub fn is_instruction(&self) -> bool {
        !matches!(self, AsmInst::Label(_) | AsmInst::Comment(_))
    }
}

impl fmt::Display for AsmInst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Arithmetic
            AsmInst::Add(rd, rs, rt) => write!(f, "add {}, {}, {}", rd, rs, rt),
            AsmInst::AddS(fd, fs, ft) => write!(f, "add.s {}, {}, {}", fd, fs, ft),
            AsmInst::AddI(rd, rs, imm) => write!(f, "addi {}, {}, {}", rd, rs, imm),
            AsmInst::Sub(rd, rs, rt) => write!(f, "sub {}, {}, {}", rd, rs, rt),
            AsmInst::Mult(rs, rt) => write!(f, "mult {}, {}", rs, rt),
            AsmInst::Div(rs, rt) => write!(f, "div {}, {}", rs, rt),
            AsmInst::Mflo(rd) => write!(f, "mflo {}", rd),

            // Comparison
            AsmInst::Sgt(rd, rs, rt) => write!(f, "sgt {}, {}, {}", rd, rs, rt),
            AsmInst::Slt(rd, rs, rt) => write!(f, "slt {}, {}, {}", rd, rs, rt),
            AsmInst::Seq(rd, rs, rt) => write!(f, "seq {}, {}, {}", rd, rs, rt),
            AsmInst::Sne(rd, rs, rt) => write!(f, "sne {}, {}, {}", rd, rs, rt),

            // Logical
            AsmInst::And(rd, rs, rt) => write!(f, "and {}, {}, {}", rd, rs, rt),
            AsmInst::Or(rd, rs, rt) => write!(f, "or {}, {}, {}", rd, rs, rt),

            // Immediates and moves
            AsmInst::Li(rd, imm) => write!(f, "li {}, {}", rd, imm),
            AsmInst::LiS(fd, imm) => write!(f, "li.s {}, {}", fd, imm),
            AsmInst::Move(rd, rs) => write!(f, "move {}, {}", rd, rs),
            AsmInst::MovS(fd, fs) => write!(f, "mov.s {}, {}", fd, fs),
            AsmInst::Mfc1(rd, fs) => write!(f, "mfc1 {}, {}", rd, fs),

            // Memory
            AsmInst::Lw(rd, sym) => write!(f, "lw {}, {}", rd, sym),
            AsmInst::Lb(rd, sym) => write!(f, "lb {}, {}", rd, sym),
            AsmInst::La(rd, sym) => write!(f, "la {}, {}", rd, sym),
            AsmInst::Ls(fd, sym) => write!(f, "l.s {}, {}", fd, sym),
            AsmInst::Sw(rs, sym) => write!(f, "sw {}, {}", rs, sym),
            AsmInst::Sb(rs, sym) => write!(f, "sb {}, {}", rs, sym),
            AsmInst::Ss(fs, sym) => write!(f, "s.s {}, {}", fs, sym),

            // Control flow
            AsmInst::Beqz(rs, label) => write!(f, "beqz {}, {}", rs, label),
            AsmInst::J(label) => write!(f, "j {}", label),
            AsmInst::Syscall => write!(f, "syscall"),

            // Pseudo
            AsmInst::Label(label) => write!(f, "{}", label),
            AsmInst::Comment(text) => write!(f, "#{}", text),
            AsmInst::Raw(text) => write!(f, "{}", text),
        }
    }
}
