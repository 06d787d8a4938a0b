//! MIPS Three-Address Compiler - Code Generation
//! 
//! This crate turns three-address code into MIPS32 assembly text. It
//! includes:
//! 
//! - Line classification into tagged 3AC instructions
//! - Counter-based register tracking with temp bindings
//! - The syscall convention used for `print` and program exit
//! - The single-pass translator and assembly emission

pub mod abi;
pub mod asm;
pub mod classify;
pub mod emit;
pub mod regalloc;
pub mod translator;

pub use asm::{AsmInst, Reg, RegClass};
pub use classify::{classify_line, TacLine};
pub use regalloc::{RegAllocError, RegisterTracker};
pub use translator::{TranslateOptions, Translation, Translator};

use mtac_common::{CompilerError, Program};

/// Main entry point: translate a program with default options
pub fn translate_program(program: &Program) -> Result<Translation, CompilerError> {
    Translator::translate(program, TranslateOptions::default())
}
