//! Arithmetic, comparison and logical operators
//!
//! Operands are always the two most recently allocated registers of the
//! class in use, and every operation allocates one fresh destination.
//! Only addition has a floating-point form.

use super::Translator;
use crate::asm::{AsmInst, Reg, RegClass};
use crate::classify::BinaryOperator;
use mtac_common::{CompilerError, SymbolType};

impl Translator {
    pub(super) fn handle_binary_op(
        &mut self,
        dest: &str,
        lhs: &str,
        op: BinaryOperator,
        rhs: &str,
    ) -> Result<(), CompilerError> {
        self.comment(format!("op = {}", op));

        let class = match op {
            BinaryOperator::Add => self.addition_class(lhs, rhs),
            _ => RegClass::General,
        };

        let (a, b) = self.operand_pair(class, op);
        let d = self.allocate(class)?;

        match op {
            BinaryOperator::Add if class == RegClass::Float => self.push(AsmInst::AddS(d, a, b)),
            BinaryOperator::Add => self.push(AsmInst::Add(d, a, b)),
            BinaryOperator::Sub => self.push(AsmInst::Sub(d, a, b)),
            BinaryOperator::Gt => self.push(AsmInst::Sgt(d, a, b)),
            BinaryOperator::Lt => self.push(AsmInst::Slt(d, a, b)),
            BinaryOperator::Eq => self.push(AsmInst::Seq(d, a, b)),
            BinaryOperator::Ne => self.push(AsmInst::Sne(d, a, b)),
            BinaryOperator::And => self.push(AsmInst::And(d, a, b)),
            BinaryOperator::Or => self.push(AsmInst::Or(d, a, b)),
            // mult/div leave their result in LO
            BinaryOperator::Mul => self.push_all([AsmInst::Mult(a, b), AsmInst::Mflo(d)]),
            BinaryOperator::Div => self.push_all([AsmInst::Div(a, b), AsmInst::Mflo(d)]),
        }

        self.registers.bind_temp(dest, d);
        Ok(())
    }

    /// Register class for `lhs + rhs`, taken from where the operands live.
    /// Falls back to the most recently declared type when neither operand
    /// has a binding that settles it.
    fn addition_class(&self, lhs: &str, rhs: &str) -> RegClass {
        let lhs_class = self.registers.temp_register(lhs).and_then(|r| r.class());
        let rhs_class = self.registers.temp_register(rhs).and_then(|r| r.class());

        match (lhs_class, rhs_class) {
            (Some(RegClass::Float), _) | (_, Some(RegClass::Float)) => RegClass::Float,
            (Some(RegClass::General), Some(RegClass::General)) => RegClass::General,
            _ => match self.current_type {
                Some(SymbolType::Float) => RegClass::Float,
                _ => RegClass::General,
            },
        }
    }

    fn operand_pair(&mut self, class: RegClass, op: BinaryOperator) -> (Reg, Reg) {
        let first = self.registers.second_last(class);
        let second = self.registers.last(class);

        if first.is_none() {
            self.report_warning(format!(
                "'{}' needs two {} operand registers but only {} allocated, using $zero",
                op,
                class,
                self.registers.count(class)
            ));
        }

        (first.unwrap_or(Reg::Zero), second.unwrap_or(Reg::Zero))
    }
}
