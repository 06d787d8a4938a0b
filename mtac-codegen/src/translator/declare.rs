//! Declarations: `.data` storage and type records

use super::Translator;
use crate::classify::Declaration;
use crate::emit::DataDirective;
use log::debug;
use mtac_common::SymbolType;

/// Bytes per array element
const ARRAY_ELEMENT_SIZE: u32 = 4;

impl Translator {
    pub(super) fn handle_declaration(&mut self, decl: Declaration) {
        match decl {
            Declaration::Array { name, count } => {
                self.comment("array declaration");
                self.define_data(DataDirective::space(&name, count.saturating_mul(ARRAY_ELEMENT_SIZE)));
                self.symbols.declare(&name, SymbolType::Array);
            }
            Declaration::Char { name } => {
                self.comment("char declaration");
                self.define_data(DataDirective::space(&name, SymbolType::Char.size_in_bytes()));
                self.symbols.declare(&name, SymbolType::Char);
            }
            Declaration::Int { name } => {
                self.comment("int declaration");
                self.define_data(DataDirective::word(&name, 0));
                self.symbols.declare(&name, SymbolType::Int);
                self.current_type = Some(SymbolType::Int);
            }
            Declaration::Float { name } => {
                self.comment("float declaration");
                self.define_data(DataDirective::float(&name, 0.0));
                self.symbols.declare(&name, SymbolType::Float);
                self.current_type = Some(SymbolType::Float);
            }
        }
    }

    /// Add a data entry, replacing an earlier entry of the same name in place
    fn define_data(&mut self, directive: DataDirective) {
        match self.data.iter_mut().find(|d| d.name == directive.name) {
            Some(existing) => {
                debug!("{}: redeclaring '{}'", self.location, directive.name);
                *existing = directive;
            }
            None => self.data.push(directive),
        }
    }
}
