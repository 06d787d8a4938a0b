//! Simple assignments into temporaries, and stores of temporaries into
//! variables

use super::Translator;
use crate::asm::{AsmInst, Reg, RegClass};
use crate::classify::AssignValue;
use mtac_common::CompilerError;

impl Translator {
    pub(super) fn handle_simple_assign(&mut self, dest: &str, value: AssignValue) -> Result<(), CompilerError> {
        match value {
            AssignValue::Increment(var) => {
                // Read-modify-write through memory
                let loaded = self.allocate(RegClass::General)?;
                self.push(AsmInst::Lw(loaded, var.clone()));
                let incremented = self.allocate(RegClass::General)?;
                self.push(AsmInst::AddI(incremented, loaded, 1));
                self.push(AsmInst::Sw(incremented, var.clone()));
                self.registers.bind_register_source(loaded, &var);
                self.registers.bind_temp(dest, incremented);
            }
            AssignValue::IntOrChar(literal) => {
                let reg = self.allocate(RegClass::General)?;
                self.push(AsmInst::Li(reg, literal));
                self.registers.bind_temp(dest, reg);
            }
            AssignValue::Float(literal) => {
                let reg = self.allocate(RegClass::Float)?;
                self.push(AsmInst::LiS(reg, literal));
                self.registers.bind_temp(dest, reg);
            }
            AssignValue::Temp(source) => self.assign_from_temp(dest, &source)?,
            AssignValue::Variable(var) => {
                self.load_variable(dest, &var)?;
            }
        }
        Ok(())
    }

    /// `dest = tN`: copy the resident value if `tN` has a register,
    /// otherwise load it as a variable. The result is then stored back under
    /// the source's name with a byte store. `sb` only takes general
    /// registers, so a float value is first moved out with `mfc1`.
    fn assign_from_temp(&mut self, dest: &str, source: &str) -> Result<(), CompilerError> {
        let reg = match self.registers.temp_register(source) {
            Some(src) => {
                let class = src.class().unwrap_or(RegClass::General);
                let reg = self.allocate(class)?;
                if src.is_float() {
                    self.push(AsmInst::MovS(reg, src));
                } else {
                    self.push(AsmInst::Move(reg, src));
                }
                self.registers.bind_temp(dest, reg);
                reg
            }
            None => self.load_variable(dest, source)?,
        };

        let stored = if reg.is_float() {
            let bits = self.allocate(RegClass::General)?;
            self.push(AsmInst::Mfc1(bits, reg));
            bits
        } else {
            reg
        };
        self.push(AsmInst::Sb(stored, source.to_string()));
        Ok(())
    }

    /// Load `var` into a fresh register of its type's class
    fn load_variable(&mut self, dest: &str, var: &str) -> Result<Reg, CompilerError> {
        let ty = self.variable_type(var);
        let reg = self.allocate(RegClass::for_type(ty))?;
        self.push(AsmInst::load_for(ty, reg, var));
        self.registers.bind_register_source(reg, var);
        self.registers.bind_temp(dest, reg);
        Ok(reg)
    }

    /// `x = tN`: store the temporary into a declared variable
    pub(super) fn handle_store_temp(&mut self, dest: &str, temp: &str) {
        let ty = self.variable_type(dest);
        let class = RegClass::for_type(ty);

        let source = self
            .registers
            .temp_register(temp)
            .filter(|reg| reg.class() == Some(class))
            .or_else(|| self.registers.last(class));

        match source {
            Some(reg) => self.push(AsmInst::store_for(ty, reg, dest)),
            None => self.report_error(
                format!("no {} register holds '{}', store to '{}' skipped", class, temp, dest),
                format!("'{}' is {} and no {} register has been allocated yet", dest, ty, class),
            ),
        }
    }
}
