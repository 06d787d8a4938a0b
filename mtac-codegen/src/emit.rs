//! Assembly text emission
//!
//! The data and text sections are accumulated separately while translating
//! and rendered only once, at the end.

use crate::asm::AsmInst;
use std::fmt;

/// Fixed preamble written before both sections
pub const PREAMBLE: &str = ".text\n.globl main\n";

/// Storage reserved for one data-section symbol
#[derive(Debug, Clone, PartialEq)]
pub enum DataKind {
    /// `.word <value>`
    Word(i32),
    /// `.float <value>`
    Float(f32),
    /// `.space <bytes>`
    Space(u32),
}

/// One `.data` entry
#[derive(Debug, Clone, PartialEq)]
pub struct DataDirective {
    pub name: String,
    pub kind: DataKind,
}

impl DataDirective {
    pub fn word(name: &str, value: i32) -> Self {
        Self { name: name.to_string(), kind: DataKind::Word(value) }
    }

    pub fn float(name: &str, value: f32) -> Self {
        Self { name: name.to_string(), kind: DataKind::Float(value) }
    }

    pub fn space(name: &str, bytes: u32) -> Self {
        Self { name: name.to_string(), kind: DataKind::Space(bytes) }
    }
}

impl fmt::Display for DataDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DataKind::Word(value) => write!(f, "{}: .word {}", self.name, value),
            // Debug formatting keeps the fractional part: 0.0, not 0
            DataKind::Float(value) => write!(f, "{}: .float {:?}", self.name, value),
            DataKind::Space(bytes) => write!(f, "{}: .space {}", self.name, bytes),
        }
    }
}

/// Render the data section, including its `.data` header
pub fn emit_data_section(data: &[DataDirective]) -> String {
    let mut out = String::from(".data\n");
    for directive in data {
        out.push_str(&directive.to_string());
        out.push('\n');
    }
    out
}

/// Render the text section, one line per instruction
pub fn emit_text_section(text: &[AsmInst]) -> String {
    let mut out = String::new();
    for inst in text {
        out.push_str(&inst.to_string());
        out.push('\n');
    }
    out
}

/// Render a complete program: preamble, data section, text section
pub fn emit_program(data: &[DataDirective], text: &[AsmInst]) -> String {
    let mut out = String::from(PREAMBLE);
    out.push_str(&emit_data_section(data));
    out.push_str(&emit_text_section(text));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asm::Reg;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_data_directive_display() {
        assert_eq!(DataDirective::word("x", 0).to_string(), "x: .word 0");
        assert_eq!(DataDirective::float("f", 0.0).to_string(), "f: .float 0.0");
        assert_eq!(DataDirective::space("arr", 40).to_string(), "arr: .space 40");
    }

    #[test]
    fn test_empty_program() {
        assert_eq!(emit_program(&[], &[]), ".text\n.globl main\n.data\n");
    }

    #[test]
    fn test_program_layout() {
        let data = vec![DataDirective::word("x", 0), DataDirective::space("c", 1)];
        let text = vec![
            AsmInst::Label("main:".to_string()),
            AsmInst::Li(Reg::T(0), "5".to_string()),
            AsmInst::Sw(Reg::T(0), "x".to_string()),
        ];

        let expected = "\
.text
.globl main
.data
x: .word 0
c: .space 1
main:
li $t0, 5
sw $t0, x
";
        assert_eq!(emit_program(&data, &text), expected);
        assert_eq!(
            emit_program(&data, &text),
            format!("{}{}{}", PREAMBLE, emit_data_section(&data), emit_text_section(&text))
        );
    }
}
