//! Three-address code to MIPS32 translator
//!
//! A single pass over the program: each line is classified once, then
//! handed to the handler for its category. Handlers append to the data and
//! text buffers and update the register tracker. Nothing already emitted
//! is revisited.
//!
//! All mutable state lives in [`Translator`], so independent translations
//! never share anything.

mod assign;
mod binary;
mod call;
mod control;
mod declare;


use crate::asm::{AsmInst, Reg, RegClass};
use crate::classify::{classify_line, TacLine};
use crate::emit::{self, DataDirective};
use crate::regalloc::{RegAllocError, RegisterTracker};
use log::{debug, error, warn};
use mtac_common::{
    CompilerError, Diagnostic, ErrorReporter, Program, SourceLocation, SymbolType, SymbolTypeTable,
};
use std::fs;
use std::path::Path;

/// Library-level translation settings
#[derive(Debug, Clone)]
pub struct TranslateOptions {
    /// Emit `#` marker comments ahead of each translated construct
    pub emit_comments: bool,

    /// Call-site label of the enclosing function. When set, `return`
    /// jumps here instead of exiting the program.
    pub return_label: Option<String>,
}

impl Default for TranslateOptions {
    fn default() -> Self {
        Self {
            emit_comments: true,
            return_label: None,
        }
    }
}

/// Translation state for one program
pub struct Translator {
    options: TranslateOptions,

    /// Declared variable types
    symbols: SymbolTypeTable,

    /// Register counters and temp/variable bindings
    registers: RegisterTracker,

    /// Arguments pushed by `param`, consumed from the end by `call`
    pending_args: Vec<String>,

    /// Type of the most recently declared int/float variable
    current_type: Option<SymbolType>,

    data: Vec<DataDirective>,
    text: Vec<AsmInst>,
    reporter: ErrorReporter,

    /// Line currently being translated, for diagnostics
    location: SourceLocation,
}

impl Translator {
    pub fn new(options: TranslateOptions) -> Self {
        Self {
            options,
            symbols: SymbolTypeTable::new(),
            registers: RegisterTracker::new(),
            pending_args: Vec::new(),
            current_type: None,
            data: Vec::new(),
            text: Vec::new(),
            reporter: ErrorReporter::new(),
            location: SourceLocation::new_simple(0),
        }
    }

    /// Translate a whole program in one go
    pub fn translate(program: &Program, options: TranslateOptions) -> Result<Translation, CompilerError> {
        let mut translator = Self::new(options);
        translator.translate_program(program)?;
        Ok(translator.finish())
    }

    /// Translate every line of `program`, stopping at the first fatal error
    pub fn translate_program(&mut self, program: &Program) -> Result<(), CompilerError> {
        for (line_number, raw) in program.lines() {
            self.location = program.location(line_number);
            self.translate_line(raw)?;
        }
        Ok(())
    }

    /// Translate a single raw 3AC line
    pub fn translate_line(&mut self, raw: &str) -> Result<(), CompilerError> {
        let Some(line) = classify_line(raw) else {
            return Ok(());
        };
        debug!("{}: {:?}", self.location, line);

        match line {
            TacLine::Label(label) => self.push(AsmInst::Label(label)),
            TacLine::Declaration(decl) => self.handle_declaration(decl),
            TacLine::ControlFlow(flow) => self.handle_control_flow(flow),
            TacLine::Call(call) => self.handle_call(call),
            TacLine::BinaryOp { dest, lhs, op, rhs } => self.handle_binary_op(&dest, &lhs, op, &rhs)?,
            TacLine::SimpleAssign { dest, value } => self.handle_simple_assign(&dest, value)?,
            TacLine::StoreTemp { dest, temp } => self.handle_store_temp(&dest, &temp),
            TacLine::Generic(text) => self.push(AsmInst::Raw(text)),
        }

        Ok(())
    }

    /// Finish translation and hand back the accumulated sections
    pub fn finish(self) -> Translation {
        Translation {
            data: self.data,
            text: self.text,
            reporter: self.reporter,
        }
    }

    pub fn registers(&self) -> &RegisterTracker {
        &self.registers
    }

    pub fn symbols(&self) -> &SymbolTypeTable {
        &self.symbols
    }

    pub fn pending_args(&self) -> &[String] {
        &self.pending_args
    }

    pub fn current_type(&self) -> Option<SymbolType> {
        self.current_type
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        self.reporter.diagnostics()
    }

    fn push(&mut self, inst: AsmInst) {
        self.text.push(inst);
    }

    fn push_all(&mut self, insts: impl IntoIterator<Item = AsmInst>) {
        self.text.extend(insts);
    }

    fn comment(&mut self, text: impl Into<String>) {
        if self.options.emit_comments {
            self.text.push(AsmInst::Comment(text.into()));
        }
    }

    fn allocate(&mut self, class: RegClass) -> Result<Reg, CompilerError> {
        self.registers.allocate(class).map_err(|err| match err {
            RegAllocError::OutOfRegisters { class, limit } => {
                CompilerError::register_exhausted(&class.to_string(), limit, self.location.clone())
            }
        })
    }

    fn report_warning(&mut self, message: String) {
        warn!("{}: {}", self.location, message);
        self.reporter.warning(message, self.location.clone());
    }

    /// Code for the current line was dropped
    fn report_error(&mut self, message: String, note: String) {
        error!("{}: {}", self.location, message);
        self.reporter
            .report(Diagnostic::error(message, self.location.clone()).with_note(note));
    }

    fn report_note(&mut self, message: String) {
        debug!("{}: note: {}", self.location, message);
        self.reporter.note(message, self.location.clone());
    }

    /// Declared type of `name`, defaulting to int with a warning
    fn variable_type(&mut self, name: &str) -> SymbolType {
        match self.symbols.lookup(name) {
            Some(ty) => ty,
            None => {
                self.report_warning(format!("no declared type for variable '{}', assuming int", name));
                SymbolType::Int
            }
        }
    }
}

/// Result of a completed translation
#[derive(Debug, Clone)]
pub struct Translation {
    data: Vec<DataDirective>,
    text: Vec<AsmInst>,
    reporter: ErrorReporter,
}

impl Translation {
    pub fn data(&self) -> &[DataDirective] {
        &self.data
    }

    pub fn text(&self) -> &[AsmInst] {
        &self.text
    }

    pub fn reporter(&self) -> &ErrorReporter {
        &self.reporter
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        self.reporter.diagnostics()
    }

    /// `.data` header and one line per directive
    pub fn data_section(&self) -> String {
        emit::emit_data_section(&self.data)
    }

    /// One line per emitted instruction, label or comment
    pub fn text_section(&self) -> String {
        emit::emit_text_section(&self.text)
    }

    /// The complete assembly file
    pub fn assembly(&self) -> String {
        emit::emit_program(&self.data, &self.text)
    }

    /// Write the assembly file in a single write
    pub fn write_to(&self, path: &Path) -> Result<(), CompilerError> {
        fs::write(path, self.assembly())
            .map_err(|e| CompilerError::io_error(&path.display().to_string(), &e))?;
        debug!("Assembly written to {}", path.display());
        Ok(())
    }
}
